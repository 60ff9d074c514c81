use std::time::Duration;

use crate::timing::queue::TimerQueue;

/// Interval between language steps while hovering.
const STEP_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug)]
enum CyclerTimer {
    Step(usize),
    Reset,
}

/// Hover label that flips through translations of its text.
///
/// On hover-enter the label steps through the translation list once, one step
/// every 100 ms, then snaps back to the primary text. Hover-leave cancels the
/// cycle and resets immediately. With fewer than two translations the hover
/// is inert.
#[derive(Debug)]
pub struct LanguageCycler {
    primary: String,
    languages: Vec<String>,
    shown: usize,
    hovered: bool,
    timers: TimerQueue<CyclerTimer>,
}

impl LanguageCycler {
    /// Build a cycler for `primary` with its translation list.
    pub fn new(primary: impl Into<String>, languages: Vec<String>) -> Self {
        Self {
            primary: primary.into(),
            languages,
            shown: 0,
            hovered: false,
            timers: TimerQueue::new(),
        }
    }

    /// The text to display right now.
    pub fn label(&self) -> &str {
        match self.shown {
            0 => &self.primary,
            i => &self.languages[i % self.languages.len()],
        }
    }

    /// `true` while the pointer is over the label.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Pointer entered the label: start cycling.
    pub fn hover_enter(&mut self, now: Duration) {
        self.hovered = true;
        if self.languages.len() < 2 {
            return;
        }
        for step in 1..self.languages.len() {
            self.timers
                .schedule_after(now, STEP_INTERVAL * step as u32, CyclerTimer::Step(step));
        }
        self.timers.schedule_after(
            now,
            STEP_INTERVAL * self.languages.len() as u32,
            CyclerTimer::Reset,
        );
    }

    /// Pointer left the label: cancel the cycle and reset immediately.
    pub fn hover_leave(&mut self) {
        self.hovered = false;
        self.timers.clear();
        self.shown = 0;
    }

    /// Advance the cycler's clock to `now`.
    pub fn advance(&mut self, now: Duration) {
        while let Some(expired) = self.timers.pop_due(now) {
            match expired.event {
                CyclerTimer::Step(i) => self.shown = i,
                CyclerTimer::Reset => self.shown = 0,
            }
        }
    }
}
