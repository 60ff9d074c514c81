use std::time::Duration;

use crate::animation::ease::Ease;
use crate::timing::queue::TimerQueue;

/// Identifier of a site page. The set is closed: invalid pages are
/// unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    /// Landing page.
    Home,
    /// Contact page with social links.
    Contact,
    /// Portfolio showcase page.
    Works,
    /// Team/about page.
    About,
}

/// Screen-relative direction a page transition visually moves.
///
/// Purely a rendering hint; the controller stores whatever the caller passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideDirection {
    /// Incoming page enters from the right.
    Left,
    /// Incoming page enters from the left.
    Right,
}

/// Fixed duration of a page transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(500);

/// One page together with its horizontal offset, as a signed fraction of the
/// viewport width (`0.0` centered, `-1.0` fully off-screen left, `1.0` fully
/// off-screen right).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlidingPage {
    /// The page to render.
    pub page: PageId,
    /// Horizontal offset fraction.
    pub offset: f64,
}

/// What the renderer should draw right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PageView {
    /// No transition in flight: one page, centered.
    Stable(PageId),
    /// Mid-transition: the outgoing page sliding off and the incoming page
    /// sliding on are rendered simultaneously.
    Transition {
        /// Page animating off-screen, opposite the slide direction.
        outgoing: SlidingPage,
        /// Page animating on-screen from the direction matching the slide.
        incoming: SlidingPage,
    },
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    target: PageId,
    started: Duration,
}

#[derive(Clone, Copy, Debug)]
struct CommitTimer;

/// Owns current/next page state and drives the timed two-phase page swap.
///
/// The controller never renders; it exposes state for the renderer to
/// consult. At most one transition is active at a time: a `navigate` call
/// during a transition is a silent no-op. An accepted navigation always
/// commits after [`TRANSITION_DURATION`]; the commit is not cancellable.
#[derive(Debug)]
pub struct TransitionController {
    current: PageId,
    pending: Option<Pending>,
    direction: SlideDirection,
    timers: TimerQueue<CommitTimer>,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionController {
    /// Start on the home page, not transitioning.
    pub fn new() -> Self {
        Self {
            current: PageId::Home,
            pending: None,
            direction: SlideDirection::Right,
            timers: TimerQueue::new(),
        }
    }

    /// The page currently committed.
    pub fn current(&self) -> PageId {
        self.current
    }

    /// The transition target, while one is in flight.
    pub fn next(&self) -> Option<PageId> {
        self.pending.map(|p| p.target)
    }

    /// `true` while a transition is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// The most recently requested slide direction.
    pub fn direction(&self) -> SlideDirection {
        self.direction
    }

    /// Request a transition to `target`.
    ///
    /// Returns `false` (leaving all state untouched) when a transition is
    /// already in progress. Otherwise records the direction and target and
    /// schedules the commit.
    pub fn navigate(&mut self, now: Duration, target: PageId, direction: SlideDirection) -> bool {
        if self.pending.is_some() {
            tracing::debug!(?target, "navigation rejected: transition in progress");
            return false;
        }
        tracing::info!(from = ?self.current, to = ?target, ?direction, "navigation accepted");
        self.direction = direction;
        self.pending = Some(Pending {
            target,
            started: now,
        });
        self.timers
            .schedule_after(now, TRANSITION_DURATION, CommitTimer);
        true
    }

    /// Advance the controller's clock, committing a due transition.
    ///
    /// Returns the newly committed page when the commit fired.
    pub fn advance(&mut self, now: Duration) -> Option<PageId> {
        let _ = self.timers.pop_due(now)?;
        let pending = self.pending.take()?;
        self.current = pending.target;
        tracing::debug!(page = ?self.current, "transition committed");
        Some(self.current)
    }

    /// The render state at `now`: one stable page, or both pages of an
    /// in-flight transition with eased slide offsets.
    pub fn view(&self, now: Duration) -> PageView {
        let Some(pending) = self.pending else {
            return PageView::Stable(self.current);
        };

        let raw = (now.saturating_sub(pending.started)).as_secs_f64()
            / TRANSITION_DURATION.as_secs_f64();
        let t = Ease::InOutCubic.apply(raw);

        // Slide direction Left: incoming enters from the right edge while the
        // outgoing page exits through the left edge; Right mirrors that.
        let (out_to, in_from) = match self.direction {
            SlideDirection::Left => (-1.0, 1.0),
            SlideDirection::Right => (1.0, -1.0),
        };

        PageView::Transition {
            outgoing: SlidingPage {
                page: self.current,
                offset: out_to * t,
            },
            incoming: SlidingPage {
                page: pending.target,
                offset: in_from * (1.0 - t),
            },
        }
    }
}
