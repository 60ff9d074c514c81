use std::time::Duration;

use showreel::{
    FrameIndex, FrameLoad, Fps, IntroDef, PageDef, PageId, PreparedImage, SessionOpts,
    SessionPhase, SiteManifest, SiteSession,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let total_frames = 24;
    let manifest = SiteManifest {
        intro: Some(IntroDef {
            frames_dir: "clapper".to_owned(),
            total_frames,
            fps: Fps { num: 50, den: 1 },
        }),
        pages: [
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
        .collect(),
        promo: None,
    };

    let mut session = SiteSession::new(manifest, 640, 360, SessionOpts::default())?;

    // Synthesize a grey ramp instead of reading numbered PNGs from disk.
    for i in 0..total_frames {
        let shade = (i * 10) as u8;
        let img = PreparedImage::from_rgba8(64, 64, vec![shade, shade, shade, 255].repeat(64 * 64))?;
        session.resolve_intro_frame(Duration::ZERO, FrameIndex(i), FrameLoad::Loaded(img));
    }

    let mut now = Duration::ZERO;
    while session.phase() != SessionPhase::Ready {
        now += Duration::from_millis(10);
        session.advance(now);
    }
    println!("ready after {:.2}s on {:?}", now.as_secs_f64(), session.current_page());

    session.navigate_to_works(now);
    session.advance(now + Duration::from_millis(500));
    println!("navigated to {:?}", session.current_page());
    Ok(())
}
