use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use date_extensions::{Breakdown, DateConfig, Instant, Zone};

#[derive(Parser)]
#[command(
    name = "datefmt",
    version,
    about = "Format instants, relative times and timezone offsets"
)]
struct Cli {
    /// IANA timezone or ±HH:MM offset for rendering and parsing (default: system zone)
    #[arg(short, long, global = true)]
    zone: Option<String>,

    /// Locale for month names; repeat to give a preference list
    #[arg(short, long, global = true)]
    locale: Vec<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render an instant through a token pattern (e.g. "YY-MM-DD HH:mm:ss Z")
    Format {
        pattern: String,

        /// Instant to render (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Seconds from REFERENCE to INSTANT
    Diff {
        instant: String,

        /// Reference instant (default: now)
        reference: Option<String>,

        /// Print relative-time text instead of seconds
        #[arg(long)]
        text: bool,

        /// Print the day/hour/minute/second breakdown as JSON
        #[arg(long, conflicts_with = "text")]
        json: bool,
    },
    /// Offset in minutes (UTC minus local) of an IANA timezone
    Offset {
        zone_name: String,

        /// Instant at which to read the offset (default: now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Seconds since the Unix epoch
    Timestamp {
        /// Instant to convert (default: now)
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {e:#}");
    }

    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let config = build_config(cli)?;

    match &cli.command {
        Command::Format { pattern, at } => {
            let instant = instant_or_now(at.as_deref(), &config)?;
            Ok(instant.format(pattern, &config))
        }
        Command::Diff {
            instant,
            reference,
            text,
            json,
        } => {
            let instant = parse_instant(instant, &config)?;
            let reference = instant_or_now(reference.as_deref(), &config)?;
            let delta = instant.diff_from(&reference);
            if *json {
                let breakdown = Breakdown::from_delta(delta);
                serde_json::to_string(&breakdown).context("serializing breakdown")
            } else if *text {
                Ok(instant.text_diff_from(&reference))
            } else {
                Ok(delta.to_string())
            }
        }
        Command::Offset { zone_name, at } => {
            let instant = instant_or_now(at.as_deref(), &config)?;
            let minutes = instant.get_timezone_offset_from(zone_name)?;
            Ok(minutes.to_string())
        }
        Command::Timestamp { at } => {
            let instant = instant_or_now(at.as_deref(), &config)?;
            Ok(instant.to_unix_timestamp().to_string())
        }
    }
}

fn build_config(cli: &Cli) -> Result<DateConfig> {
    let mut config = DateConfig::system();
    if let Some(zone) = &cli.zone {
        let zone: Zone = zone
            .parse()
            .with_context(|| format!("invalid --zone '{zone}'"))?;
        config = config.with_zone(zone);
    }
    if !cli.locale.is_empty() {
        config = config.with_locales(cli.locale.iter().cloned());
    }
    log::debug!("zone {}, locales {:?}", config.zone, config.locales);
    Ok(config)
}

fn parse_instant(s: &str, config: &DateConfig) -> Result<Instant> {
    Instant::parse_in(s, &config.zone).with_context(|| format!("reading instant '{s}'"))
}

fn instant_or_now(s: Option<&str>, config: &DateConfig) -> Result<Instant> {
    s.map_or_else(|| Ok(Instant::now()), |s| parse_instant(s, config))
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
        .context("installing logger")
}
