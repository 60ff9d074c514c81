//! Showreel is the sequencing engine behind a film-studio showcase site.
//!
//! It reproduces the site's two cooperating state machines with deterministic,
//! clock-injected timing:
//!
//! - [`SequencePlayer`] preloads a numbered frame sequence, plays it back at a
//!   fixed rate onto a [`Surface`], and signals completion exactly once.
//! - [`TransitionController`] owns page navigation state and drives the timed
//!   two-phase page swap.
//!
//! [`SiteSession`] composes both from a JSON [`SiteManifest`]: boot plays the
//!   intro, completion triggers the reveal handoff, and navigation entry
//!   points apply the site's slide-direction policy. Time never comes from a
//!   wall clock; every component advances on a caller-supplied monotone
//!   `Duration`, so the whole engine is drivable from tests and headless
//!   tools.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod animation;
pub mod assets;
pub mod foundation;
pub mod nav;
pub mod player;
pub mod render;
pub mod session;
pub mod site;
pub mod timing;
pub mod ui;

pub use crate::foundation::core::{FrameIndex, Fps, Point, Rect, SurfaceSize, Vec2};
pub use crate::foundation::error::{ShowreelError, ShowreelResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::tween::Tween;
pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::sequence::{FrameDir, FrameLoad, frame_file_name};
pub use crate::nav::controller::{
    PageId, PageView, SlideDirection, SlidingPage, TRANSITION_DURATION, TransitionController,
};
pub use crate::player::sequence_player::{
    NullEvents, PlayerEvents, PlayerOpts, PlayerPhase, SequencePlayer,
};
pub use crate::render::blit::{INTRO_FIT_FRACTION, blit_scaled, fit_rect};
pub use crate::render::surface::Surface;
pub use crate::session::site_session::{SessionOpts, SessionPhase, SessionView, SiteSession};
pub use crate::site::manifest::{IntroDef, PageDef, PromoDef, SiteManifest};
pub use crate::timing::queue::{Expired, TimerId, TimerQueue};
pub use crate::ui::cursor::CursorFollower;
pub use crate::ui::cycler::LanguageCycler;
pub use crate::ui::promo::{PromoModal, ShakeOffset};
