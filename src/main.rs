use clap::{Parser, Subcommand};
use colored::Colorize;
use seamark::catalog::{self, Mark};
use seamark::playback::{compile_with, OverrunPolicy, Scheduler, TimedSegment};
use seamark::{
    describe, parse_with_default_period, ConfigError, Language, LightSpecification, NotationError,
    PlayerConfig,
};
use std::path::PathBuf;
use std::process;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error("{0}")]
    Notation(#[from] NotationError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Cannot format output: {0}")]
    Output(#[from] serde_yaml::Error),

    #[error("Cannot listen for Ctrl+C: {0}")]
    Signal(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "seamark", version, about = "Decode and play maritime light characteristics")]
struct Args {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log playback and compiler details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the decoded specification as YAML
    Parse { notation: String },
    /// Print the timed segments of one period
    Compile {
        notation: String,
        /// Clip the cycle to exactly one period
        #[arg(long)]
        truncate: bool,
    },
    /// Print the characteristic in plain language
    Describe {
        notation: String,
        /// Description language: en or fr
        #[arg(long, value_parser = parse_language)]
        lang: Option<Language>,
    },
    /// Flash a lamp in the terminal
    Play {
        notation: String,
        /// Stop after this many periods
        #[arg(long)]
        cycles: Option<u64>,
        /// Playback speed multiplier (2 plays twice as fast)
        #[arg(long)]
        speed: Option<f64>,
    },
    /// List known marks
    Catalog,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code)
        .ok_or_else(|| format!("unknown language '{}', expected en or fr", code))
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "seamark=debug" } else { "seamark=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PlayerConfig::load(path)?
        }
        None => PlayerConfig::default(),
    };
    let marks = known_marks(&config)?;

    match args.cmd {
        Command::Parse { notation } => {
            let spec = resolve(&notation, &marks, &config)?;
            print!("{}", serde_yaml::to_string(&spec)?);
        }
        Command::Compile { notation, truncate } => {
            let spec = resolve(&notation, &marks, &config)?;
            let policy = if truncate { OverrunPolicy::Truncate } else { config.overrun };
            let sequence = compile_with(&spec, policy);
            for (index, segment) in sequence.iter().enumerate() {
                println!("{:>3}  {}", index, segment_line(segment));
            }
            println!(
                "total {} ms, lit {} ms, period {} ms",
                sequence.total_ms(),
                sequence.lit_ms(),
                sequence.period_ms
            );
        }
        Command::Describe { notation, lang } => {
            let spec = resolve(&notation, &marks, &config)?;
            let language = lang.unwrap_or(config.language);
            println!("{}", describe(&spec, language));
        }
        Command::Play { notation, cycles, speed } => {
            let spec = resolve(&notation, &marks, &config)?;
            let time_scale = match speed {
                Some(speed) if speed.is_finite() && speed > 0.0 => config.time_scale / speed,
                _ => config.time_scale,
            };
            play(&spec, &config, cycles, time_scale).await?;
        }
        Command::Catalog => {
            let width = marks.iter().map(|m| m.name.len()).max().unwrap_or(0);
            for mark in &marks {
                println!("{:<width$}  {}", mark.name, mark.notation.bold(), width = width);
            }
        }
    }
    Ok(())
}

/// Built-in marks followed by the configured catalog, if any.
fn known_marks(config: &PlayerConfig) -> Result<Vec<Mark>, CliError> {
    let mut marks = catalog::builtin_marks();
    if let Some(path) = &config.catalog {
        marks.extend(catalog::load_marks(path)?);
    }
    Ok(marks)
}

/// Accept a mark name in place of a notation.
fn resolve(
    input: &str,
    marks: &[Mark],
    config: &PlayerConfig,
) -> Result<LightSpecification, NotationError> {
    let notation = catalog::find_mark(marks, input)
        .map(|mark| mark.notation.as_str())
        .unwrap_or(input);
    parse_with_default_period(notation, config.default_period_seconds)
}

fn segment_line(segment: &TimedSegment) -> String {
    if segment.on {
        format!("on  {:>6} ms  {}", segment.duration_ms, segment.color.code())
    } else {
        format!("off {:>6} ms", segment.duration_ms)
    }
}

fn lamp(segment: &TimedSegment) -> String {
    if !segment.on {
        return "○".dimmed().to_string();
    }
    let glyph = "●".bold();
    match segment.color {
        seamark::Color::White => glyph.white(),
        seamark::Color::Red => glyph.red(),
        seamark::Color::Green => glyph.green(),
        seamark::Color::Yellow => glyph.yellow(),
        seamark::Color::Blue => glyph.blue(),
    }
    .to_string()
}

async fn play(
    spec: &LightSpecification,
    config: &PlayerConfig,
    cycles: Option<u64>,
    time_scale: f64,
) -> Result<(), CliError> {
    let sequence = compile_with(spec, config.overrun);
    let per_cycle = sequence.len() as u64;
    println!("{}  {}", spec.to_string().bold(), describe(spec, config.language).dimmed());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut scheduler = Scheduler::with_time_scale(time_scale);
    scheduler.play("terminal", sequence, move |segment: &TimedSegment| {
        // The receiver only goes away when playback is shutting down.
        let _ = tx.send(*segment);
    });

    let limit = cycles.map(|n| n.max(1).saturating_mul(per_cycle));
    let mut shown = 0u64;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                info!("Interrupted after {} segments", shown);
                break;
            }
            segment = rx.recv() => {
                let Some(segment) = segment else { break };
                if limit.is_some_and(|limit| shown >= limit) {
                    break;
                }
                println!("{}  {}", lamp(&segment), segment_line(&segment));
                shown += 1;
            }
        }
    }

    scheduler.cancel_all();
    Ok(())
}
