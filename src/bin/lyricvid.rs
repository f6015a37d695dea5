use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lyricvid::{
    BOTTOM_MARGIN_DOMAIN, EN_FONT_CATALOG, FONT_SIZE_DOMAIN, HandleRegistry, HeaderProbe,
    JA_FONT_CATALOG, JobSession, JobStore, LyricVidError, MediaAsset, OUTLINE_SIZE_DOMAIN,
    PreviewCompositor, PreviewOpts, RendererClient, RendererConfig, SettingsPatch,
    is_cataloged_en, is_cataloged_ja, normalize_hex_color,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lyricvid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable subtitle fonts.
    Fonts,
    /// Print the preview layout as JSON (no renderer needed).
    Preview(PreviewArgs),
    /// Submit a job to the renderer and save the video.
    Create(CreateArgs),
}

#[derive(clap::Args, Debug)]
struct SettingsArgs {
    /// JSON settings patch applied before the flags below.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Japanese (primary line) font family.
    #[arg(long)]
    font_ja: Option<String>,

    /// Latin (secondary line) font family.
    #[arg(long)]
    font_en: Option<String>,

    /// Primary font size in px (16..=72).
    #[arg(long)]
    font_size: Option<f64>,

    /// Text color, `RRGGBB` or `#RRGGBB`.
    #[arg(long)]
    color: Option<String>,

    /// Outline color, `RRGGBB` or `#RRGGBB`.
    #[arg(long)]
    outline_color: Option<String>,

    /// Outline width in px (0..=4, step 0.25).
    #[arg(long)]
    outline_size: Option<f64>,

    /// Distance from the bottom edge in px (0..=150, step 5).
    #[arg(long)]
    bottom_margin: Option<f64>,

    /// Fade each subtitle in and out.
    #[arg(long)]
    fade: Option<bool>,
}

impl SettingsArgs {
    /// File patch first, then the flags, each flag snapped like its widget would be.
    fn patch(&self) -> anyhow::Result<SettingsPatch> {
        let base = match &self.settings {
            Some(path) => SettingsPatch::from_path(path)?,
            None => SettingsPatch::default(),
        };
        let flags = SettingsPatch {
            font_family_ja: self.font_ja.clone(),
            font_family_en: self.font_en.clone(),
            font_size: self.font_size.map(|v| FONT_SIZE_DOMAIN.snap_u32(v)),
            color: self.color.as_deref().map(normalize_hex_color).transpose()?,
            outline_color: self
                .outline_color
                .as_deref()
                .map(normalize_hex_color)
                .transpose()?,
            outline_size: self.outline_size.map(|v| OUTLINE_SIZE_DOMAIN.snap(v)),
            bottom_margin: self.bottom_margin.map(|v| BOTTOM_MARGIN_DOMAIN.snap_u32(v)),
            enable_fade: self.fade,
        };
        Ok(base.and(flags))
    }
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Background image used to size the frame.
    #[arg(long)]
    image: Option<PathBuf>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Preview frame width in px.
    #[arg(long, default_value_t = 640.0)]
    frame_width: f64,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Audio track.
    #[arg(long)]
    audio: PathBuf,

    /// Background image.
    #[arg(long)]
    image: PathBuf,

    /// Lyrics text file, one cue per line.
    #[arg(long)]
    lyrics: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Renderer base URL, e.g. `http://127.0.0.1:8000`.
    #[arg(long)]
    renderer: Option<String>,

    /// Renderer config JSON; `--renderer` overrides its base URL.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Give up connecting after this many milliseconds.
    #[arg(long)]
    connect_timeout_ms: Option<u64>,

    /// Directory the video is saved into.
    #[arg(long)]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Fonts => cmd_fonts(),
        Command::Preview(args) => cmd_preview(args).await,
        Command::Create(args) => cmd_create(args).await,
    }
}

fn cmd_fonts() -> anyhow::Result<()> {
    println!("ja:");
    for name in JA_FONT_CATALOG {
        println!("  {name}");
    }
    println!("en:");
    for name in EN_FONT_CATALOG {
        println!("  {name}");
    }
    Ok(())
}

async fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let store = JobStore::new();
    if let Some(path) = &args.image {
        store.set_background(Some(MediaAsset::from_path(path).await?));
    }
    store.update_settings(&args.settings.patch()?);
    note_uncataloged_fonts(&store);

    let opts = PreviewOpts {
        frame_width: args.frame_width,
        ..PreviewOpts::default()
    };
    let mut compositor = PreviewCompositor::new(opts, HandleRegistry::new());
    let layout = compositor.refresh_with(&store.snapshot(), &HeaderProbe);
    let json = serde_json::to_string_pretty(&layout).context("serialize preview layout")?;

    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write preview '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn cmd_create(args: CreateArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => RendererConfig::from_path(path)?,
        None => RendererConfig::default(),
    };
    if let Some(url) = args.renderer {
        config.base_url = url;
    }
    if args.connect_timeout_ms.is_some() {
        config.connect_timeout_ms = args.connect_timeout_ms;
    }

    let session = JobSession::new(JobStore::new(), RendererClient::new(&config)?);
    let store = session.store();
    store.set_audio(Some(MediaAsset::from_path(&args.audio).await?));
    store.set_background(Some(MediaAsset::from_path(&args.image).await?));
    let lyrics = tokio::fs::read_to_string(&args.lyrics)
        .await
        .with_context(|| format!("read lyrics '{}'", args.lyrics.display()))?;
    store.set_lyrics(lyrics);
    store.update_settings(&args.settings.patch()?);
    note_uncataloged_fonts(store);

    if !session.can_submit() {
        anyhow::bail!(
            "job is incomplete: missing {}",
            store.snapshot().missing_inputs().join(", ")
        );
    }

    let artifact = match session.submit().await {
        Ok(artifact) => artifact,
        Err(LyricVidError::Transport(detail)) => {
            tracing::debug!(%detail, "transport failure");
            anyhow::bail!(
                "could not reach the renderer at {}",
                config.endpoint_url()
            );
        }
        Err(e) => return Err(e.into()),
    };
    for anomaly in &artifact.anomalies {
        eprintln!("warning: {anomaly}");
    }
    let path = artifact.write_to_dir(&args.out_dir).await?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn note_uncataloged_fonts(store: &JobStore) {
    let job = store.snapshot();
    let s = job.settings();
    if !is_cataloged_ja(&s.font_family_ja) {
        tracing::info!(font = %s.font_family_ja, "primary font is not in the catalog");
    }
    if !is_cataloged_en(&s.font_family_en) {
        tracing::info!(font = %s.font_family_en, "secondary font is not in the catalog");
    }
}
