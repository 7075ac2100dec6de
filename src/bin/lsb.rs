//! # LSB Command-Line Tool
//!
//! Embed text into an image, extract it again, or render the LSB plane.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin lsb -- embed cover.bmp carrier.bmp --text "This is a test message."
//! cargo run --bin lsb -- extract carrier.bmp
//! cargo run --bin lsb -- visualize carrier.bmp carrier_lsb.png
//! cargo run --bin lsb -- capacity cover.bmp --text "Will this fit?"
//! ```
//!
//! Settings not given on the command line come from `--config` (TOML).

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info, warn};

use lsb_stego::common::config::AppConfig;
use lsb_stego::common::logging::init_logger;
use lsb_stego::processing::{
    check_fit, embed_text_file, extract_text_file, visualize_file, Extraction, RandomBits,
};

/// Hide text in the least significant bits of an image.
#[derive(Parser, Debug)]
#[command(name = "lsb", author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hide text in a cover image and write the carrier
    Embed {
        /// Cover image
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Carrier image to write (lossless format, e.g. .bmp or .png)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Text to hide
        #[arg(short, long, conflicts_with = "text_file")]
        text: Option<String>,

        /// Read the text to hide from a file
        #[arg(long, value_name = "PATH")]
        text_file: Option<PathBuf>,

        /// End-of-message marker
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Seed for the padding bits
        #[arg(long, value_name = "INT")]
        seed: Option<u64>,
    },

    /// Print the text hidden in a carrier
    Extract {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// End-of-message marker
        #[arg(short, long)]
        delimiter: Option<String>,
    },

    /// Render the blue-channel LSB plane as a black and white image
    Visualize {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Show how many bits an image can carry
    Capacity {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Also check whether this text fits
        #[arg(short, long)]
        text: Option<String>,

        /// End-of-message marker
        #[arg(short, long)]
        delimiter: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Embed {
            input,
            output,
            text,
            text_file,
            delimiter,
            seed,
        } => {
            let text = match (text, text_file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read text from {}", path.display()))?,
                (None, None) => bail!("Provide the text to hide with --text or --text-file"),
            };
            let delimiter = delimiter.unwrap_or(config.stego.delimiter);
            let mut padding = RandomBits::from_seed_option(seed.or(config.stego.seed));

            if text.contains(&delimiter) {
                warn!(
                    "Text contains the delimiter '{delimiter}'; \
                     extraction will stop at its first occurrence"
                );
            }

            let report = embed_text_file(&input, &text, &output, &delimiter, &mut padding)
                .context("Failed to embed text")?;

            println!(
                "Embedded {} bytes into {} ({}/{} bits used)",
                report.payload_bits / 8,
                output.display(),
                report.payload_bits,
                report.capacity_bits
            );
            Ok(ExitCode::SUCCESS)
        }

        Command::Extract { input, delimiter } => {
            let delimiter = delimiter.unwrap_or(config.stego.delimiter);

            match extract_text_file(&input, &delimiter).context("Failed to extract text")? {
                Extraction::Found(text) => {
                    println!("{text}");
                    Ok(ExitCode::SUCCESS)
                }
                // extract_text_file already logs the miss
                Extraction::NotFound => Ok(ExitCode::from(2)),
            }
        }

        Command::Visualize { input, output } => {
            visualize_file(&input, &output).context("Failed to render LSB plane")?;
            info!("LSB plane of {} written to {}", input.display(), output.display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Capacity {
            input,
            text,
            delimiter,
        } => {
            let delimiter = delimiter.unwrap_or(config.stego.delimiter);
            let text = text.unwrap_or_default();
            let (available, needed) = check_fit(&input, &text, &delimiter)?;

            println!(
                "{}: {} bits, room for {} bytes of text after the {}-byte delimiter",
                input.display(),
                available,
                (available / 8).saturating_sub(delimiter.len()),
                delimiter.len()
            );

            if needed > available {
                println!("Text does not fit: needs {needed} bits");
                Ok(ExitCode::FAILURE)
            } else {
                println!("Text fits: needs {needed} bits");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}
