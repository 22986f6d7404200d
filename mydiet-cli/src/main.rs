use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use mydiet_core::AppDiet;
use mydiet_ingest::{RawDietRecord, parse_raw_file, parse_raw_str};
use mydiet_normalize::{ConvertReport, convert_with_report};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "mydiet", version, about = "Convert model-extracted diet plans into the app format")]
struct Cli {
    /// Config file (default: ~/.mydiet/config.toml)
    #[arg(long, global = true, env = "MYDIET_CONFIG")]
    config: Option<PathBuf>,

    /// Log conversion details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a raw model response into canonical plan + substitutions JSON
    Convert {
        /// Raw JSON file ("-" or omitted reads stdin)
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Indent the output JSON
        #[arg(long)]
        pretty: bool,

        /// Rewrite quantities as "<n> <unit>"
        #[arg(long)]
        normalize_quantities: bool,
    },

    /// Print every food the converted diet allows, one per line
    Foods {
        /// Raw JSON file ("-" or omitted reads stdin)
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Manage the config file (--config, or ~/.mydiet/config.toml)
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Convert {
            input,
            output,
            pretty,
            normalize_quantities,
        } => {
            let mut opts = cfg.conversion;
            opts.normalize_quantities |= normalize_quantities;

            let raw = read_input(input.as_deref())?;
            let (diet, report) = convert_with_report(raw.as_ref(), &opts);

            let json = if pretty || cfg.output.pretty {
                serde_json::to_string_pretty(&diet)?
            } else {
                serde_json::to_string(&diet)?
            };
            write_output(output.as_deref(), &json)?;
            eprintln!("{}", summary(&report));
        }

        Command::Foods { input } => {
            let raw = read_input(input.as_deref())?;
            let (diet, _) = convert_with_report(raw.as_ref(), &cfg.conversion);
            print_foods(&diet)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                let (path, created) = config::init_config(cli.config.as_deref())?;
                if created {
                    println!("Wrote {}", path.display());
                } else {
                    println!("Config already exists: {}", path.display());
                }
            }
            ConfigCommand::Show => print!("{}", config::render_config(&cfg)?),
        },
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<Option<RawDietRecord>> {
    match input {
        Some(p) if p != Path::new("-") => {
            if !p.exists() {
                bail!("input not found: {} (pass --input <file>)", p.display());
            }
            info!(path = %p.display(), "reading raw diet");
            parse_raw_file(p)
        }
        _ => {
            let text = io::read_to_string(io::stdin()).context("read stdin")?;
            parse_raw_str(&text).context("parsing stdin")
        }
    }
}

fn write_output(output: Option<&Path>, json: &str) -> Result<()> {
    match output {
        Some(p) => fs::write(p, format!("{json}\n")).with_context(|| format!("write {}", p.display())),
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{json}").context("write stdout")
        }
    }
}

fn print_foods(diet: &AppDiet) -> Result<()> {
    let mut out = io::stdout().lock();
    for food in diet.allowed_foods() {
        writeln!(out, "{food}")?;
    }
    Ok(())
}

fn summary(r: &ConvertReport) -> String {
    format!(
        "days={} meals={} dishes={} substitutions={} (skipped {}) backfilled={} merged={}",
        r.days,
        r.meal_slots,
        r.dishes,
        r.substitution_groups,
        r.skipped_groups,
        r.backfilled_codes,
        r.merged_slots
    )
}
