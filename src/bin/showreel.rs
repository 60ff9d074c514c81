use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use showreel::{
    FrameDir, FrameIndex, Fps, PlayerEvents, PlayerOpts, PlayerPhase, SequencePlayer, SiteManifest,
    Surface,
};

#[derive(Parser, Debug)]
#[command(name = "showreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a site manifest and print a summary.
    Check(CheckArgs),
    /// Run the intro playback headless over a frame directory.
    Intro(IntroArgs),
    /// Run the full boot sequence (intro, reveal, ready) from a manifest.
    Boot(BootArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input site manifest JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct IntroArgs {
    /// Directory of numbered frame files (0001.png, 0002.png, ...).
    #[arg(long)]
    frames: PathBuf,

    /// Number of frames in the sequence.
    #[arg(long, default_value_t = 120)]
    total: u32,

    /// Playback rate in frames per second.
    #[arg(long, default_value_t = 50)]
    fps: u32,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// If set, write each displayed frame's composited surface here as PNG.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BootArgs {
    /// Input site manifest JSON. Intro frames resolve relative to it.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Intro(args) => cmd_intro(args),
        Command::Boot(args) => cmd_boot(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let manifest = SiteManifest::from_path(&args.in_path)?;
    manifest.validate()?;

    match &manifest.intro {
        Some(intro) => println!(
            "intro: {} frames @ {} fps from '{}'",
            intro.total_frames,
            intro.fps.as_f64(),
            intro.frames_dir
        ),
        None => println!("intro: none (boots straight to content)"),
    }
    let pages: Vec<String> = manifest
        .pages
        .iter()
        .map(|p| format!("{:?}", p.id).to_lowercase())
        .collect();
    println!("pages: {}", pages.join(", "));
    println!(
        "promo: {}",
        if manifest.promo.is_some() {
            "declared"
        } else {
            "none"
        }
    );
    eprintln!("ok {}", args.in_path.display());
    Ok(())
}

#[derive(Default)]
struct IntroStats {
    shown: Vec<FrameIndex>,
    completed: bool,
}

impl PlayerEvents for IntroStats {
    fn on_frame(&mut self, frame: FrameIndex) {
        self.shown.push(frame);
    }

    fn on_complete(&mut self) {
        self.completed = true;
    }
}

fn cmd_intro(args: IntroArgs) -> anyhow::Result<()> {
    let fps = Fps::new(args.fps, 1)?;
    let mut player = SequencePlayer::new(PlayerOpts {
        total_frames: args.total,
        fps,
        settle: Duration::from_secs(1),
    })?;
    let mut surface = Surface::new(args.width, args.height)?;

    if let Some(out) = &args.out {
        std::fs::create_dir_all(out)
            .with_context(|| format!("create output dir '{}'", out.display()))?;
    }

    let dir = FrameDir::new(&args.frames);
    let mut stats = IntroStats::default();
    let mut failed = 0u32;
    for i in 0..args.total {
        let load = dir.load_frame(FrameIndex(i));
        if !load.is_loaded() {
            failed += 1;
        }
        player.resolve_frame(Duration::ZERO, FrameIndex(i), load, &mut stats);
    }

    let mut displayed = 0u64;
    while player.phase() != PlayerPhase::Complete {
        let Some(deadline) = player.next_deadline() else {
            break;
        };
        stats.shown.clear();
        player.advance(deadline, &mut surface, &mut stats);

        if let (Some(out), Some(frame)) = (&args.out, stats.shown.last()) {
            let path = out.join(format!("frame_{:04}.png", frame.0 + 1));
            image::save_buffer_with_format(
                &path,
                surface.rgba8_premul(),
                surface.size().width,
                surface.size().height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", path.display()))?;
        }
        displayed += stats.shown.len() as u64;
    }

    eprintln!(
        "played {displayed} of {} frames ({failed} failed to load), completed: {}",
        args.total, stats.completed
    );
    Ok(())
}

fn cmd_boot(args: BootArgs) -> anyhow::Result<()> {
    let manifest = SiteManifest::from_path(&args.in_path)?;
    let assets_root = args
        .in_path
        .parent()
        .unwrap_or_else(|| std::path::Path::new("."));

    let intro = manifest.intro.clone();
    let mut session = showreel::SiteSession::new(
        manifest,
        args.width,
        args.height,
        showreel::SessionOpts::default(),
    )?;

    let mut now = Duration::ZERO;
    let mut failed = 0u32;
    let deadline_cap = if let Some(intro) = &intro {
        let dir = FrameDir::new(assets_root.join(&intro.frames_dir));
        for i in 0..intro.total_frames {
            let load = dir.load_frame(FrameIndex(i));
            if !load.is_loaded() {
                failed += 1;
            }
            session.resolve_intro_frame(now, FrameIndex(i), load);
        }
        // Full playback, the settle, the reveal handoff, and slack.
        intro.fps.frame_period() * (intro.total_frames + 1) + Duration::from_secs(3)
    } else {
        Duration::from_secs(1)
    };

    let step = Duration::from_millis(10);
    while session.phase() != showreel::SessionPhase::Ready {
        now += step;
        session.advance(now);
        if now > deadline_cap {
            anyhow::bail!("boot did not reach ready within {deadline_cap:?}");
        }
    }

    eprintln!(
        "ready after {:.2}s on page {:?} ({failed} intro frames failed to load)",
        now.as_secs_f64(),
        session.current_page()
    );
    Ok(())
}
