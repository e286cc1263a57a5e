use acurite_rs::logging::{init_logger_with_default, log_debug, log_info};
use acurite_rs::util::hex::parse_row_spec;
use acurite_rs::{CandidateFrame, Decoded, DecoderConfig, Dispatcher, Protocol};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acurite-cli")]
#[command(about = "Decode Acurite weather sensor rows captured as hex")]
struct Cli {
    /// JSON decoder configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode one batch given as HEX[:BITS] rows
    Decode {
        /// Only try this protocol (5n1, rain-gauge, th, 592txr)
        #[arg(short, long)]
        protocol: Option<Protocol>,
        rows: Vec<String>,
    },
    /// Decode batches from stdin, one batch per line of whitespace-separated rows
    Stream {
        /// Print session statistics when input ends
        #[arg(long)]
        stats: bool,
    },
    /// List the supported protocols
    Protocols,
}

fn parse_batch<'a>(rows: impl IntoIterator<Item = &'a str>) -> Result<CandidateFrame> {
    let mut frame = CandidateFrame::new();
    for spec in rows {
        let (bytes, bits) =
            parse_row_spec(spec).with_context(|| format!("invalid row '{spec}'"))?;
        frame.push_row(&bytes, bits)?;
    }
    Ok(frame)
}

fn main() -> Result<()> {
    init_logger_with_default("info");

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DecoderConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DecoderConfig::default(),
    };
    let dispatcher = Dispatcher::new(config);
    let mut state = dispatcher.new_state();

    match cli.command {
        Commands::Decode { protocol, rows } => {
            let frame = parse_batch(rows.iter().map(String::as_str))?;
            let decoded = match protocol {
                Some(protocol) => dispatcher.decode_protocol(protocol, &frame, &mut state),
                None => dispatcher.decode(&frame, &mut state),
            };
            match decoded {
                Some(decoded) => println!(
                    "{}",
                    serde_json::to_string(&Decoded { received_at: Some(Utc::now()), ..decoded })?
                ),
                None => log_info("No match"),
            }
        }
        Commands::Stream { stats } => {
            let stdin = std::io::stdin();
            for (line_no, line) in stdin.lock().lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let frame = parse_batch(line.split_whitespace())
                    .with_context(|| format!("line {}", line_no + 1))?;
                match dispatcher.decode_at(&frame, &mut state, Utc::now()) {
                    Some(decoded) => println!("{}", serde_json::to_string(&decoded)?),
                    None => log_debug(&format!("line {}: no match", line_no + 1)),
                }
            }
            if stats {
                println!("{}", state.stats().to_json());
            }
        }
        Commands::Protocols => {
            for descriptor in acurite_rs::protocol::DESCRIPTORS.iter() {
                println!("{:<12} {}", descriptor.protocol.key(), descriptor.name);
            }
        }
    }

    Ok(())
}
