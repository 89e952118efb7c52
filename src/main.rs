use spritecue::config::PlayerConfig;
use spritecue::parser::parse_timecode;
use spritecue::scrub::{self, Bounds, Preview};
use spritecue::serialiser::{self, format_clock};
use spritecue::{Cue, Loader, LoaderConfig, PreviewTrack, Source};

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();
    match run().await {
        Ok(()) => (),
        Err(err) => {
            eprintln!("An error occurred: {}", err);
            for cause in err.chain().skip(1) {
                eprintln!("    {}", cause);
            }
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spritecue=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[derive(ClapParser)]
#[command(about = "Inspect thumbnail cue sheets used for seek-bar previews")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "SOURCE",
        global = true,
        help = "Cue sheet to read, as a file path or an http(s) URL. If not supplied, the preview sheet from the config file is used."
    )]
    source: Option<Source>,
    #[arg(
        short,
        long,
        value_name = "FILE",
        global = true,
        help = "Player setup JSON with a `preview.vtt` and `preview.image` entry."
    )]
    config: Option<String>,
    #[arg(
        long,
        value_name = "SECS",
        global = true,
        default_value_t = 30,
        help = "Give up on a remote cue sheet after this many seconds."
    )]
    timeout: u64,
    #[arg(long, global = true, help = "Ignore proxy settings from the environment.")]
    no_proxy: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every cue in the sheet.
    Parse {
        #[arg(long, help = "Print the cues as JSON.")]
        json: bool,
    },
    /// Find the sprite region shown at the given times.
    Lookup {
        #[arg(
            required = true,
            value_name = "TIME",
            value_parser = parse_time,
            help = "Seconds, MM:SS or HH:MM:SS, fractions allowed."
        )]
        times: Vec<f64>,
    },
    /// Work out the preview panel for a pointer position over the seek bar.
    Scrub {
        #[arg(long, help = "Media duration in seconds.")]
        duration: f64,
        #[arg(long, help = "Pointer x position.")]
        pointer: f64,
        #[arg(long, default_value_t = 0.0, help = "Left edge of the seek bar.")]
        bar_left: f64,
        #[arg(long, help = "Width of the seek bar.")]
        bar_width: f64,
        #[arg(long, help = "Left edge of the player. Defaults to the seek bar's.")]
        container_left: Option<f64>,
        #[arg(long, help = "Width of the player. Defaults to the seek bar's.")]
        container_width: Option<f64>,
    },
    /// Rewrite the sheet in canonical form.
    Normalise {
        #[arg(
            short,
            long,
            value_name = "FILE",
            default_value = "-",
            help = "The file to write to. If not supplied, the sheet is written to standard output."
        )]
        output: String,
    },
}

fn parse_time(s: &str) -> Result<f64, String> {
    let t = parse_timecode(s.trim());
    if t.is_nan() {
        Err(format!("'{}' is not a time", s))
    } else {
        Ok(t)
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlayerConfig::from_path(path)?,
        None => PlayerConfig::default(),
    };
    let source = resolve_source(cli.source, &config)?;
    let loader = Loader::new(&LoaderConfig {
        timeout: Duration::from_secs(cli.timeout),
        use_proxy: !cli.no_proxy,
    })?;
    debug!(%source, "using cue sheet");

    match cli.command {
        Command::Parse { json } => {
            let index = loader
                .load(&source)
                .await
                .context(format!("Failed to load cue sheet: '{}'", source))?;
            let mut out = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &index)?;
                writeln!(out)?;
            } else {
                for cue in &index {
                    writeln!(out, "{}", describe(cue))?;
                }
            }
        }
        Command::Lookup { times } => {
            let track = load_track(loader, source).await?;
            for t in times {
                match track.lookup(t) {
                    Some(cue) => println!("{}  {}", format_clock(t), describe(cue)),
                    None => println!("{}  none", format_clock(t)),
                }
            }
        }
        Command::Scrub {
            duration,
            pointer,
            bar_left,
            bar_width,
            container_left,
            container_width,
        } => {
            let track = load_track(loader, source).await?;
            let bar = Bounds::new(bar_left, bar_width);
            let container = Bounds::new(
                container_left.unwrap_or(bar_left),
                container_width.unwrap_or(bar_width),
            );
            if let Some(t) = scrub::pointer_time(pointer, bar, duration) {
                debug!(time = t, "pointer over seek bar");
            }
            match scrub::preview_at(track.index(), pointer, bar, container, duration) {
                Preview::Visible(placement) => println!("{}", serde_json::to_string(&placement)?),
                Preview::Hidden => println!("hidden"),
            }
        }
        Command::Normalise { output } => {
            let index = loader
                .load(&source)
                .await
                .context(format!("Failed to load cue sheet: '{}'", source))?;
            if output == "-" {
                let mut out = io::stdout().lock();
                serialiser::write_index(&mut out, &index)?;
                out.flush()?;
            } else {
                serialiser::serialise(&index, &output)
                    .context(format!("Failed to write cue sheet: '{}'", output))?;
            }
        }
    }

    Ok(())
}

fn resolve_source(arg: Option<Source>, config: &PlayerConfig) -> Result<Source> {
    if let Some(source) = arg {
        return Ok(source);
    }
    let configured = config
        .preview_source()
        .ok_or_else(|| anyhow!("No cue sheet given and no preview configured."))?;
    configured
        .parse::<Source>()
        .context(format!("Invalid preview sheet in config: '{}'", configured))
}

// Loads through the same path a player would: a failed fetch leaves the
// track empty and every lookup comes back empty.
async fn load_track(loader: Loader, source: Source) -> Result<Arc<PreviewTrack>> {
    let track = Arc::new(PreviewTrack::new());
    track
        .spawn_load(loader, source)
        .await
        .context("Preview loader task failed")?;
    Ok(track)
}

fn describe(cue: &Cue) -> String {
    format!(
        "{} --> {}  x:{} y:{} w:{} h:{}",
        format_clock(cue.start),
        format_clock(cue.end),
        cue.x,
        cue.y,
        cue.w,
        cue.h
    )
}
