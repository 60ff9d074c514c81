use std::time::Duration;

use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::assets::sequence::FrameLoad;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::ShowreelResult;
use crate::nav::controller::{PageId, PageView, SlideDirection, TransitionController};
use crate::player::sequence_player::{PlayerEvents, PlayerOpts, PlayerPhase, SequencePlayer};
use crate::render::surface::Surface;
use crate::site::manifest::SiteManifest;
use crate::timing::queue::TimerQueue;
use crate::ui::cursor::CursorFollower;
use crate::ui::cycler::LanguageCycler;
use crate::ui::promo::PromoModal;

/// Boot stage of a [`SiteSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    /// The intro sequence is loading or playing; page content is hidden.
    Intro,
    /// The intro finished; the overlay is fading out and the reveal is
    /// settling.
    Revealing,
    /// Page content is interactive; navigation is accepted.
    Ready,
}

/// Options controlling the reveal handoff between intro and page content.
#[derive(Clone, Copy, Debug)]
pub struct SessionOpts {
    /// How long the intro overlay takes to fade before it is torn down.
    pub reveal_hide: Duration,
    /// Additional settle time after the overlay is gone.
    pub reveal_settle: Duration,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            reveal_hide: Duration::from_millis(500),
            reveal_settle: Duration::from_millis(300),
        }
    }
}

/// What the embedder should render for the current session state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionView {
    /// Intro playback (or preload) with its progress readout.
    Intro {
        /// Load progress in `[0, 1]`.
        progress: f64,
        /// Rounded percentage for the progress bar label.
        percent: u32,
        /// 0-based frame most recently displayed, once playback started.
        frame: Option<FrameIndex>,
        /// Total frames, for the "Frame i / N" counter.
        total: u32,
    },
    /// Intro overlay fading out over the revealed page content.
    Revealing {
        /// Overlay opacity in `[0, 1]`.
        overlay_opacity: f64,
        /// The page content underneath.
        page: PageView,
    },
    /// Normal operation.
    Ready {
        /// Current page state, including any in-flight transition.
        page: PageView,
    },
}

#[derive(Clone, Copy, Debug)]
enum SessionTimer {
    HideIntro,
    RevealSettled,
}

#[derive(Default)]
struct Gather {
    completed: bool,
}

impl PlayerEvents for Gather {
    fn on_complete(&mut self) {
        self.completed = true;
    }
}

/// One running instance of the site: the intro player, the page transition
/// controller, the promo modal, and the drawing surface, all advanced by a
/// single caller-supplied clock.
pub struct SiteSession {
    manifest: SiteManifest,
    opts: SessionOpts,
    phase: SessionPhase,
    surface: Surface,
    player: Option<SequencePlayer>,
    nav: TransitionController,
    promo: Option<PromoModal>,
    cursor: CursorFollower,
    intro_fade: Tween,
    timers: TimerQueue<SessionTimer>,
}

impl SiteSession {
    /// Build a session from a validated manifest.
    ///
    /// A manifest without an intro boots directly into
    /// [`SessionPhase::Ready`].
    #[tracing::instrument(skip(manifest), fields(pages = manifest.pages.len()))]
    pub fn new(
        manifest: SiteManifest,
        surface_width: u32,
        surface_height: u32,
        opts: SessionOpts,
    ) -> ShowreelResult<Self> {
        manifest.validate()?;
        let surface = Surface::new(surface_width, surface_height)?;

        let player = manifest
            .intro
            .as_ref()
            .map(|intro| {
                SequencePlayer::new(PlayerOpts {
                    total_frames: intro.total_frames,
                    fps: intro.fps,
                    settle: Duration::from_secs(1),
                })
            })
            .transpose()?;

        let phase = if player.is_some() {
            SessionPhase::Intro
        } else {
            SessionPhase::Ready
        };
        tracing::info!(?phase, "session started");

        let promo = manifest.promo.as_ref().map(|_| PromoModal::new());

        Ok(Self {
            manifest,
            opts,
            phase,
            surface,
            player,
            nav: TransitionController::new(),
            promo,
            cursor: CursorFollower::new(),
            intro_fade: Tween::resting(1.0),
            timers: TimerQueue::new(),
        })
    }

    /// The manifest the session was built from.
    pub fn manifest(&self) -> &SiteManifest {
        &self.manifest
    }

    /// Current boot stage.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The drawing surface the intro renders into.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Resize the drawing surface (viewport change). Safe at any time.
    pub fn resize_surface(&mut self, width: u32, height: u32) -> ShowreelResult<()> {
        self.surface.resize(width, height)
    }

    /// The intro player, while the intro is alive.
    pub fn intro(&self) -> Option<&SequencePlayer> {
        self.player.as_ref()
    }

    /// The promo modal, when the site declares one.
    pub fn promo(&self) -> Option<&PromoModal> {
        self.promo.as_ref()
    }

    /// Mutable promo modal access for click handling.
    pub fn promo_mut(&mut self) -> Option<&mut PromoModal> {
        self.promo.as_mut()
    }

    /// The custom cursor follower.
    pub fn cursor(&self) -> &CursorFollower {
        &self.cursor
    }

    /// Mutable cursor access for pointer events.
    pub fn cursor_mut(&mut self) -> &mut CursorFollower {
        &mut self.cursor
    }

    /// Build the hover cycler for a declared page's header label.
    ///
    /// `None` for pages the site does not declare; a page without
    /// translations yields an inert cycler.
    pub fn label_cycler(&self, id: PageId) -> Option<LanguageCycler> {
        let page = self.manifest.page(id)?;
        Some(LanguageCycler::new(
            page.label.clone(),
            page.label_translations.clone(),
        ))
    }

    /// The committed page.
    pub fn current_page(&self) -> PageId {
        self.nav.current()
    }

    /// Deliver an intro frame load resolution. Ignored once the intro is
    /// torn down.
    pub fn resolve_intro_frame(&mut self, now: Duration, index: FrameIndex, load: FrameLoad) {
        if let Some(player) = &mut self.player {
            let mut gather = Gather::default();
            player.resolve_frame(now, index, load, &mut gather);
        }
    }

    /// Advance every clock-driven part of the session to `now`.
    pub fn advance(&mut self, now: Duration) {
        if let Some(player) = &mut self.player {
            let mut gather = Gather::default();
            player.advance(now, &mut self.surface, &mut gather);
            if gather.completed {
                self.begin_reveal(now);
            }
        }

        while let Some(expired) = self.timers.pop_due(now) {
            match expired.event {
                SessionTimer::HideIntro => {
                    // Tearing the player down drops its timers and detaches
                    // any load resolutions still in flight.
                    self.player = None;
                    self.surface.clear();
                    self.timers.schedule_at(
                        expired.deadline + self.opts.reveal_settle,
                        SessionTimer::RevealSettled,
                    );
                    tracing::debug!("intro overlay torn down");
                }
                SessionTimer::RevealSettled => {
                    self.phase = SessionPhase::Ready;
                    tracing::info!("session ready");
                }
            }
        }

        self.nav.advance(now);
        self.cursor.advance(now);
    }

    /// Navigate back to the home page (slides in from the left).
    pub fn navigate_to_home(&mut self, now: Duration) -> bool {
        self.request_page(now, PageId::Home, SlideDirection::Right)
    }

    /// Navigate to the contact page (slides in from the right).
    pub fn navigate_to_contact(&mut self, now: Duration) -> bool {
        self.request_page(now, PageId::Contact, SlideDirection::Left)
    }

    /// Navigate to the works page (slides in from the right).
    pub fn navigate_to_works(&mut self, now: Duration) -> bool {
        self.request_page(now, PageId::Works, SlideDirection::Left)
    }

    /// Navigate to the about page (slides in from the right).
    pub fn navigate_to_about(&mut self, now: Duration) -> bool {
        self.request_page(now, PageId::About, SlideDirection::Left)
    }

    /// What to render at `now`.
    pub fn view(&self, now: Duration) -> SessionView {
        match self.phase {
            SessionPhase::Intro => {
                let (progress, percent, frame, total) = match &self.player {
                    Some(p) => (
                        p.progress(),
                        p.progress_percent(),
                        p.current_frame(),
                        p.total(),
                    ),
                    None => (1.0, 100, None, 0),
                };
                SessionView::Intro {
                    progress,
                    percent,
                    frame,
                    total,
                }
            }
            SessionPhase::Revealing => SessionView::Revealing {
                overlay_opacity: self.intro_fade.sample(now),
                page: self.nav.view(now),
            },
            SessionPhase::Ready => SessionView::Ready {
                page: self.nav.view(now),
            },
        }
    }

    fn begin_reveal(&mut self, now: Duration) {
        self.phase = SessionPhase::Revealing;
        self.intro_fade
            .retarget(now, 0.0, self.opts.reveal_hide, Ease::InOutQuad);
        self.timers
            .schedule_after(now, self.opts.reveal_hide, SessionTimer::HideIntro);
        tracing::info!("intro complete, revealing page content");
    }

    fn request_page(&mut self, now: Duration, target: PageId, direction: SlideDirection) -> bool {
        if self.phase != SessionPhase::Ready {
            tracing::debug!(?target, phase = ?self.phase, "navigation rejected: not ready");
            return false;
        }
        if self.manifest.page(target).is_none() {
            tracing::debug!(?target, "navigation rejected: page not declared");
            return false;
        }
        self.nav.navigate(now, target, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::decode::PreparedImage;
    use crate::foundation::core::Fps;
    use crate::site::manifest::{IntroDef, PageDef};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn pages() -> Vec<PageDef> {
        [
            (PageId::Home, "HOME"),
            (PageId::Contact, "CONTACT"),
            (PageId::Works, "WORKS"),
            (PageId::About, "ABOUT"),
        ]
        .into_iter()
        .map(|(id, label)| PageDef {
            id,
            label: label.to_owned(),
            label_translations: Vec::new(),
        })
        .collect()
    }

    fn manifest_with_intro(total_frames: u32) -> SiteManifest {
        SiteManifest {
            intro: Some(IntroDef {
                frames_dir: "clapper".to_owned(),
                total_frames,
                fps: Fps { num: 50, den: 1 },
            }),
            pages: pages(),
            promo: None,
        }
    }

    fn frame() -> FrameLoad {
        FrameLoad::Loaded(PreparedImage::from_rgba8(1, 1, vec![9, 9, 9, 255]).unwrap())
    }

    #[test]
    fn no_intro_boots_straight_to_ready() {
        let manifest = SiteManifest {
            intro: None,
            pages: pages(),
            promo: None,
        };
        let session = SiteSession::new(manifest, 640, 480, SessionOpts::default()).unwrap();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.intro().is_none());
    }

    #[test]
    fn navigation_is_gated_until_ready() {
        let mut session =
            SiteSession::new(manifest_with_intro(1), 64, 64, SessionOpts::default()).unwrap();
        assert_eq!(session.phase(), SessionPhase::Intro);
        assert!(!session.navigate_to_works(ms(0)));

        // One frame at 50 fps: ticks at 20 ms (draw) and 40 ms (end), settle
        // at 1040 ms, reveal hidden at 1540 ms, settled at 1840 ms.
        session.resolve_intro_frame(ms(0), FrameIndex(0), frame());
        session.advance(ms(1_040));
        assert_eq!(session.phase(), SessionPhase::Revealing);
        assert!(!session.navigate_to_works(ms(1_100)));

        session.advance(ms(1_840));
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.navigate_to_works(ms(1_900)));
    }

    #[test]
    fn cursor_follows_the_session_clock() {
        let manifest = SiteManifest {
            intro: None,
            pages: pages(),
            promo: None,
        };
        let mut session = SiteSession::new(manifest, 640, 480, SessionOpts::default()).unwrap();

        session.cursor_mut().pointer_entered(ms(0));
        session
            .cursor_mut()
            .pointer_moved(ms(0), crate::foundation::core::Point::new(300.0, 200.0), false);
        session.advance(ms(2_000));

        assert_eq!(session.cursor().scale(ms(2_000)), 1.0);
        assert!(session.cursor().position().x > 290.0);
    }

    #[test]
    fn label_cyclers_come_from_the_manifest() {
        let mut manifest = SiteManifest {
            intro: None,
            pages: pages(),
            promo: None,
        };
        manifest.pages[2].label_translations =
            vec!["WORKS".to_owned(), "PRACE".to_owned(), "WERKE".to_owned()];
        let session = SiteSession::new(manifest, 64, 64, SessionOpts::default()).unwrap();

        let mut cycler = session.label_cycler(PageId::Works).unwrap();
        assert_eq!(cycler.label(), "WORKS");
        cycler.hover_enter(ms(0));
        cycler.advance(ms(200));
        assert_eq!(cycler.label(), "WERKE");

        // Pages without translations still cycle inertly.
        let mut home = session.label_cycler(PageId::Home).unwrap();
        home.hover_enter(ms(0));
        home.advance(ms(500));
        assert_eq!(home.label(), "HOME");
    }

    #[test]
    fn undeclared_pages_are_rejected() {
        let manifest = SiteManifest {
            intro: None,
            pages: vec![PageDef {
                id: PageId::Home,
                label: "HOME".to_owned(),
                label_translations: Vec::new(),
            }],
            promo: None,
        };
        let mut session = SiteSession::new(manifest, 64, 64, SessionOpts::default()).unwrap();
        assert!(!session.navigate_to_works(ms(0)));
        assert!(
            session.navigate_to_home(ms(0)),
            "declared pages are accepted even when already current"
        );
    }
}
