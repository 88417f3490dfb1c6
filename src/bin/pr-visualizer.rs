use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use pr_visualizer::encode::{FfmpegSink, FfmpegSinkOpts, export_slides, is_ffmpeg_on_path, save_png};
use pr_visualizer::github::{GitHubClient, GitHubClientOpts, fetch_snapshot, sample_snapshot};
use pr_visualizer::insight::{GeminiInsights, GeminiOpts, InsightGenerator};
use pr_visualizer::render::{AssetStore, HttpImageFetcher, RenderThreading, SvgRasterizer};
use pr_visualizer::scene::ImageSource;
use pr_visualizer::storage::{FileStore, HistoryEntry, HistoryStore, Theme, ThemeStore};
use pr_visualizer::timeline::{VideoConfig, VideoMetadata, VisualizationTimeline};
use pr_visualizer::{FrameIndex, Player, PrComposition, PullRequestSnapshot};

#[derive(Parser, Debug)]
#[command(name = "pr-visualizer", version, about = "Turn a GitHub pull request into a video")]
struct Cli {
    /// Key-value file holding history and theme (defaults to the user data dir).
    #[arg(long, global = true, env = "PR_VISUALIZER_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the WebM video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render one PNG key frame per scene.
    Slides(SlidesArgs),
    /// Print the scene timeline as JSON.
    Timeline(SourceArgs),
    /// Show or clear previously visualized PRs.
    History {
        #[command(subcommand)]
        cmd: HistoryCommand,
    },
    /// Show or change the color theme.
    Theme {
        #[command(subcommand)]
        cmd: ThemeCommand,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    List,
    Clear,
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    Get,
    Set { theme: Theme },
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Pull request URL, e.g. https://github.com/owner/repo/pull/123.
    #[arg(required_unless_present = "sample")]
    url: Option<String>,

    /// Use the built-in sample PR instead of fetching one.
    #[arg(long, conflicts_with = "url")]
    sample: bool,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api_url: String,

    /// Enables the AI review insight.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    #[arg(
        long,
        env = "GEMINI_API_URL",
        default_value = "https://generativelanguage.googleapis.com"
    )]
    gemini_api_url: String,

    /// Skip the AI review insight even when a key is set.
    #[arg(long)]
    no_insight: bool,

    /// JSON file overriding video settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Theme for this run (defaults to the stored preference).
    #[arg(long)]
    theme: Option<Theme>,

    /// Directory holding local images and a `fonts/` folder.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Image URL or asset path shown behind the title scene.
    #[arg(long)]
    title_background: Option<String>,

    /// Do not download remote images; avatars fall back to icons.
    #[arg(long)]
    offline: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output path (defaults to `pr-visualizer-{number}.webm`).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Rasterize every frame even when it repeats the previous one.
    #[arg(long, default_value_t = false)]
    no_elision: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SlidesArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Directory the PNGs are written to.
    #[arg(long, default_value = "slides")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = open_store(cli.store.as_deref())?;
    match cli.cmd {
        Command::Render(args) => cmd_render(args, &store),
        Command::Frame(args) => cmd_frame(args, &store),
        Command::Slides(args) => cmd_slides(args, &store),
        Command::Timeline(args) => cmd_timeline(args, &store),
        Command::History { cmd } => cmd_history(cmd, &store),
        Command::Theme { cmd } => cmd_theme(cmd, &store),
    }
}

fn open_store(path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => FileStore::default_path().context("no user data directory; pass --store"),
    }
}

/// A composition ready to render, plus what is needed to draw its images.
struct Prepared {
    comp: PrComposition,
    assets: AssetStore,
    raster: SvgRasterizer,
}

fn load_snapshot(args: &SourceArgs, store: &Path) -> anyhow::Result<PullRequestSnapshot> {
    if args.sample {
        return Ok(sample_snapshot());
    }
    let url = args.url.as_deref().context("a pull request URL is required")?;

    let client = GitHubClient::new(GitHubClientOpts {
        base_url: args.github_api_url.trim_end_matches('/').to_owned(),
        token: args.github_token.clone(),
        ..GitHubClientOpts::default()
    })?;
    let insights = match args.gemini_api_key.as_deref() {
        Some(key) if !args.no_insight => Some(GeminiInsights::new(GeminiOpts {
            base_url: args.gemini_api_url.trim_end_matches('/').to_owned(),
            ..GeminiOpts::new(key)
        })?),
        _ => None,
    };

    let snapshot = fetch_snapshot(
        &client,
        insights.as_ref().map(|g| g as &dyn InsightGenerator),
        url,
    )?;

    let entry = HistoryEntry::from_snapshot(url, &snapshot, chrono::Utc::now().timestamp_millis());
    if let Err(e) = HistoryStore::new(FileStore::new(store)).record(entry) {
        tracing::warn!(error = %e, "could not update history");
    }
    Ok(snapshot)
}

fn build_composition(args: &SourceArgs, store: &Path) -> anyhow::Result<PrComposition> {
    let cfg = match args.config.as_deref() {
        Some(path) => VideoConfig::from_json_file(path)?,
        None => VideoConfig::default(),
    };
    let theme = match args.theme {
        Some(theme) => theme,
        None => ThemeStore::new(FileStore::new(store)).get()?,
    };
    let snapshot = load_snapshot(args, store)?;
    Ok(PrComposition::new(snapshot, cfg, theme)?
        .with_title_background(args.title_background.as_deref().map(ImageSource::parse)))
}

fn prepare(args: &SourceArgs, store: &Path) -> anyhow::Result<Prepared> {
    let comp = build_composition(args, store)?;
    let mut assets = AssetStore::new(&args.assets);
    let mut sources = comp.image_sources();
    if args.offline {
        sources.retain(|s| matches!(s, ImageSource::Local(_)));
    }
    let fetcher = HttpImageFetcher::new(Duration::from_secs(15))?;
    assets.prepare(&sources, &fetcher);
    let fonts = args.assets.join("fonts");
    let raster = SvgRasterizer::new(&[fonts.as_path(), args.assets.as_path()]);
    Ok(Prepared {
        comp,
        assets,
        raster,
    })
}

fn cmd_render(args: RenderArgs, store: &Path) -> anyhow::Result<()> {
    if !is_ffmpeg_on_path() {
        anyhow::bail!("ffmpeg is required for rendering, but was not found on PATH");
    }
    let Prepared {
        comp,
        assets,
        raster,
    } = prepare(&args.source, store)?;
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("pr-visualizer-{}.webm", comp.snapshot().number)));

    let threading = RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        static_frame_elision: !args.no_elision,
    };
    let total = comp.total_frames();
    let step = u64::from(comp.config().fps.num).max(1) * 5;

    let mut player = Player::new(raster, threading);
    player.on_frame(move |f| {
        if (f.0 + 1) % step == 0 || f.0 + 1 == total {
            tracing::info!(frame = f.0 + 1, total, "rendering");
        }
    });
    player.mount(comp, assets)?;
    player.record(Box::new(FfmpegSink::new(FfmpegSinkOpts::new(&out))))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs, store: &Path) -> anyhow::Result<()> {
    let Prepared {
        comp,
        assets,
        raster,
    } = prepare(&args.source, store)?;
    let frame =
        pr_visualizer::render::render_frame(&comp, FrameIndex(args.frame), &raster, &assets)?;
    save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_slides(args: SlidesArgs, store: &Path) -> anyhow::Result<()> {
    let Prepared {
        comp,
        assets,
        raster,
    } = prepare(&args.source, store)?;
    let slides = export_slides(&comp, &raster, &assets, &args.out_dir)?;
    for slide in &slides {
        eprintln!("wrote {}", slide.path.display());
    }
    Ok(())
}

#[derive(Serialize)]
struct TimelineDump<'a> {
    metadata: VideoMetadata,
    timeline: &'a VisualizationTimeline,
}

fn cmd_timeline(args: SourceArgs, store: &Path) -> anyhow::Result<()> {
    let comp = build_composition(&args, store)?;
    let dump = TimelineDump {
        metadata: comp.metadata(),
        timeline: comp.timeline(),
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}

fn cmd_history(cmd: HistoryCommand, store: &Path) -> anyhow::Result<()> {
    let mut history = HistoryStore::new(FileStore::new(store));
    match cmd {
        HistoryCommand::List => {
            let entries = history.entries()?;
            if entries.is_empty() {
                println!("No visualizations yet.");
            }
            for e in entries {
                let when = chrono::DateTime::from_timestamp_millis(e.timestamp)
                    .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{when}  {} #{}  {}  {}", e.repo_name, e.id, e.title, e.pr_url);
            }
        }
        HistoryCommand::Clear => {
            history.clear()?;
            println!("History cleared.");
        }
    }
    Ok(())
}

fn cmd_theme(cmd: ThemeCommand, store: &Path) -> anyhow::Result<()> {
    let mut themes = ThemeStore::new(FileStore::new(store));
    match cmd {
        ThemeCommand::Get => {
            let theme = themes.get()?;
            println!("{theme} (renders as {})", theme.resolved());
        }
        ThemeCommand::Set { theme } => {
            themes.set(theme)?;
            println!("{theme}");
        }
    }
    Ok(())
}
