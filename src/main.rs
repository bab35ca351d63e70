//! Scene Touch - touch script replay
//!
//! Replays recorded touch events through the translator and prints the
//! resulting `#touch` messages.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scene_touch::config::{AppConfig, OutputFormat};
use scene_touch::replay::Replayer;
use scene_touch::sink::{ConsoleSink, JsonLinesSink, MessageSink};
use scene_touch::touch::{ActionKind, ImageSize, MotionAction};
use scene_touch::translator::{Scope, TouchCapability, TouchTranslator};

/// Scene Touch - translate touch events into #touch messages
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "scene-touch.yaml")]
    config: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Touch script to replay (JSON lines, '-' for stdin)
    #[arg(short, long)]
    script: Option<String>,

    /// Override the configured touch capability
    #[arg(long, value_enum)]
    capability: Option<CapabilityArg>,

    /// Override the configured image size (WIDTHxHEIGHT)
    #[arg(long)]
    image: Option<String>,

    /// Override the configured output format
    #[arg(long, value_enum)]
    output: Option<OutputArg>,

    /// Keep replaying after an event fails
    #[arg(long)]
    keep_going: bool,

    /// Print the action classification table and exit
    #[arg(long)]
    list_actions: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CapabilityArg {
    Multi,
    Single,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputArg {
    Log,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting Scene Touch...");

    let config = AppConfig::load_or_default(&args.config).await?;

    let capability = match args.capability {
        Some(CapabilityArg::Multi) => TouchCapability::Multi,
        Some(CapabilityArg::Single) => TouchCapability::Single,
        None => config.resolve_capability(),
    };
    let translator = TouchTranslator::new(capability);

    if args.list_actions {
        print_action_table(&translator);
        return Ok(());
    }

    let image = match &args.image {
        Some(spec) => ImageSize::parse(spec)
            .with_context(|| format!("Invalid image size '{}' (expected WIDTHxHEIGHT)", spec))?,
        None => config.image_size()?,
    };

    let output = match args.output {
        Some(OutputArg::Log) => OutputFormat::Log,
        Some(OutputArg::Json) => OutputFormat::Json,
        None => config.output,
    };

    let mut sink: Box<dyn MessageSink> = match output {
        OutputFormat::Log => Box::new(ConsoleSink::new("console")),
        OutputFormat::Json => Box::new(JsonLinesSink::new(std::io::stdout())),
    };

    info!(
        "Replaying with {} support against {}x{} image",
        translator.strategy_name(),
        image.width(),
        image.height()
    );

    let replayer = Replayer::new(&translator, image).keep_going(args.keep_going);

    let summary = match args.script.as_deref() {
        None | Some("-") => {
            replayer
                .run(BufReader::new(tokio::io::stdin()), &mut sink)
                .await?
        }
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open touch script: {}", path))?;
            replayer.run(BufReader::new(file), &mut sink).await?
        }
    };

    if summary.failed_events > 0 {
        warn!(
            "⚠️  {} of {} events failed",
            summary.failed_events, summary.events
        );
    }
    info!(
        "✅ Replayed {} events ({} messages)",
        summary.events, summary.messages
    );

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr so JSON output on stdout stays clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

fn print_action_table(translator: &TouchTranslator) {
    use colored::*;

    println!(
        "\n{} {}",
        "=== Action Classification ===".bold().cyan(),
        format!("({})", translator.strategy_name()).yellow()
    );

    let mut actions: Vec<MotionAction> = ActionKind::named()
        .into_iter()
        .map(|kind| {
            if kind.is_pointer_action() {
                MotionAction {
                    kind,
                    pointer_index: 1,
                }
            } else {
                MotionAction::new(kind)
            }
        })
        .collect();
    actions.push(MotionAction::new(ActionKind::Other(9)));

    for action in actions {
        let row = translator.classify(action);
        let scope = match row.scope {
            Scope::Pointer(index) => format!("pointer at index {}", index),
            Scope::All => "every active pointer".to_string(),
            Scope::Primary => "primary pointer (contact 1)".to_string(),
        };
        println!(
            "  {:<14} raw {:#06x} → {:<5} {}",
            action.kind.to_string().bright_white(),
            action.to_raw(),
            row.tag.as_str().green(),
            scope
        );
    }
}
