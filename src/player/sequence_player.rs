use std::time::Duration;

use crate::assets::decode::PreparedImage;
use crate::assets::sequence::FrameLoad;
use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::render::blit::{INTRO_FIT_FRACTION, blit_scaled, fit_rect};
use crate::render::surface::Surface;
use crate::timing::queue::TimerQueue;

/// Lifecycle stage of a [`SequencePlayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Frames are still resolving; playback has not started.
    Loading,
    /// All frames resolved; the tick timer is driving playback.
    Playing,
    /// The sequence finished and completion has been signaled.
    Complete,
}

/// Options controlling a playback.
#[derive(Clone, Copy, Debug)]
pub struct PlayerOpts {
    /// Number of frames in the sequence.
    pub total_frames: u32,
    /// Playback rate.
    pub fps: Fps,
    /// Delay between the end of the sequence and the completion signal.
    pub settle: Duration,
}

impl PlayerOpts {
    /// The sequence shipped with the site: 120 frames at 50 fps with a one
    /// second settle.
    pub fn standard() -> Self {
        Self {
            total_frames: 120,
            fps: Fps { num: 50, den: 1 },
            settle: Duration::from_secs(1),
        }
    }
}

/// Observer for player signals.
///
/// All methods default to no-ops so callers implement only what they consume.
pub trait PlayerEvents {
    /// A frame resolved (loaded or failed); `loaded` of `total` are done.
    fn on_progress(&mut self, loaded: u32, total: u32) {
        let _ = (loaded, total);
    }

    /// A frame was displayed.
    fn on_frame(&mut self, frame: FrameIndex) {
        let _ = frame;
    }

    /// The playback finished. Fires exactly once per player.
    fn on_complete(&mut self) {}
}

/// Sink that discards every signal.
#[derive(Debug, Default)]
pub struct NullEvents;

impl PlayerEvents for NullEvents {}

#[derive(Clone, Debug)]
enum FrameSlot {
    Pending,
    Ready(PreparedImage),
    Missing,
}

#[derive(Clone, Copy, Debug)]
enum PlayerTimer {
    Tick,
    Settle,
}

/// Preloads a numbered frame sequence, then plays it back at a fixed rate onto
/// a [`Surface`], reporting progress per resolved frame and signaling
/// completion exactly once.
///
/// The player is event-driven: load resolutions arrive through
/// [`SequencePlayer::resolve_frame`] in any order, and time advances only when
/// the owner calls [`SequencePlayer::advance`]. Dropping the player drops its
/// pending timers with it; resolutions simply stop being delivered.
#[derive(Debug)]
pub struct SequencePlayer {
    opts: PlayerOpts,
    frames: Vec<FrameSlot>,
    loaded: u32,
    cursor: Option<FrameIndex>,
    phase: PlayerPhase,
    timers: TimerQueue<PlayerTimer>,
    completed: bool,
}

impl SequencePlayer {
    /// Create a player in the `Loading` phase.
    pub fn new(opts: PlayerOpts) -> ShowreelResult<Self> {
        if opts.total_frames == 0 {
            return Err(ShowreelError::validation(
                "player total_frames must be > 0",
            ));
        }
        Fps::new(opts.fps.num, opts.fps.den)?;
        Ok(Self {
            opts,
            frames: vec![FrameSlot::Pending; opts.total_frames as usize],
            loaded: 0,
            cursor: None,
            phase: PlayerPhase::Loading,
            timers: TimerQueue::new(),
            completed: false,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Number of frames that have resolved (loaded or failed).
    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    /// Total frames in the sequence.
    pub fn total(&self) -> u32 {
        self.opts.total_frames
    }

    /// Load progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        f64::from(self.loaded) / f64::from(self.opts.total_frames)
    }

    /// Load progress as a rounded percentage for the progress readout.
    pub fn progress_percent(&self) -> u32 {
        (self.progress() * 100.0).round() as u32
    }

    /// The frame most recently displayed; `None` before the first tick.
    pub fn current_frame(&self) -> Option<FrameIndex> {
        self.cursor
    }

    /// The next scheduled timer deadline, for drivers that step the clock
    /// deadline-to-deadline instead of polling.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Deliver one frame's load resolution.
    ///
    /// Success and failure both count toward progress; a frame resolves at
    /// most once and out-of-range or repeated resolutions are ignored. The
    /// resolution that completes the set starts playback: the first tick is
    /// scheduled one frame period after `now`.
    pub fn resolve_frame(
        &mut self,
        now: Duration,
        index: FrameIndex,
        load: FrameLoad,
        events: &mut dyn PlayerEvents,
    ) {
        if self.phase != PlayerPhase::Loading {
            tracing::debug!(frame = index.0, "resolution after load phase ignored");
            return;
        }
        let Some(slot) = self.frames.get_mut(index.0 as usize) else {
            tracing::debug!(frame = index.0, "out-of-range resolution ignored");
            return;
        };
        if !matches!(slot, FrameSlot::Pending) {
            tracing::debug!(frame = index.0, "duplicate resolution ignored");
            return;
        }

        *slot = match load {
            FrameLoad::Loaded(img) => FrameSlot::Ready(img),
            FrameLoad::Failed => FrameSlot::Missing,
        };
        self.loaded += 1;
        tracing::debug!(
            frame = index.0,
            loaded = self.loaded,
            total = self.opts.total_frames,
            "frame resolved"
        );
        events.on_progress(self.loaded, self.opts.total_frames);

        if self.loaded == self.opts.total_frames {
            self.phase = PlayerPhase::Playing;
            self.timers
                .schedule_after(now, self.opts.fps.frame_period(), PlayerTimer::Tick);
            tracing::info!(
                frames = self.opts.total_frames,
                fps = self.opts.fps.as_f64(),
                "playback started"
            );
        }
    }

    /// Advance the player's clock to `now`, drawing any due frames onto
    /// `surface`.
    ///
    /// The surface's dimensions are re-read for every draw, so resizing it
    /// between calls never corrupts playback. Ticks reschedule relative to
    /// their own deadline, keeping the cadence even under coarse clock steps.
    pub fn advance(&mut self, now: Duration, surface: &mut Surface, events: &mut dyn PlayerEvents) {
        while let Some(expired) = self.timers.pop_due(now) {
            match expired.event {
                PlayerTimer::Tick => self.on_tick(expired.deadline, surface, events),
                PlayerTimer::Settle => self.on_settle(events),
            }
        }
    }

    fn on_tick(&mut self, due: Duration, surface: &mut Surface, events: &mut dyn PlayerEvents) {
        let next = match self.cursor {
            None => 0,
            Some(FrameIndex(i)) => i + 1,
        };

        if next < self.opts.total_frames {
            self.cursor = Some(FrameIndex(next));
            self.draw_frame(FrameIndex(next), surface);
            events.on_frame(FrameIndex(next));
            self.timers
                .schedule_at(due + self.opts.fps.frame_period(), PlayerTimer::Tick);
        } else {
            // The trailing tick past the last frame ends playback.
            self.timers
                .schedule_at(due + self.opts.settle, PlayerTimer::Settle);
        }
    }

    fn on_settle(&mut self, events: &mut dyn PlayerEvents) {
        self.phase = PlayerPhase::Complete;
        self.timers.clear();
        if !self.completed {
            self.completed = true;
            tracing::info!("playback complete");
            events.on_complete();
        }
    }

    fn draw_frame(&self, index: FrameIndex, surface: &mut Surface) {
        // A frame that failed to load is skipped without clearing, leaving
        // the previous frame on screen for one tick.
        let FrameSlot::Ready(img) = &self.frames[index.0 as usize] else {
            return;
        };
        surface.clear();
        let dest = fit_rect(
            img.width(),
            img.height(),
            surface.size(),
            INTRO_FIT_FRACTION,
        );
        blit_scaled(surface, img, dest);
    }
}
