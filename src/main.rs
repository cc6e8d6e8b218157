//! veiltrie CLI - Command line interface for the blinded name index
//!
//! Builds an in-memory index from a names file and answers lookups against
//! it. One name per line, optionally followed by whitespace and an item
//! token; a line with no item stores the name itself.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use veiltrie::{parse_modulus_hex, GroupParameters, Index, RFC3526_MODP_2048};

#[derive(Parser)]
#[command(name = "veiltrie")]
#[command(about = "A privacy-preserving hierarchical name index")]
#[command(version)]
struct Cli {
    /// Hex-encoded prime modulus (defaults to the RFC 3526 2048-bit prime)
    #[arg(short, long)]
    modulus: Option<String>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Print per-operation timings to stderr
    #[arg(long)]
    timings: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an index from a names file and print its structure
    Build {
        /// File with one name (and optional item) per line
        file: PathBuf,

        /// Also print the blinded tree rendering
        #[arg(long)]
        tree: bool,
    },

    /// Build an index from a names file, then look a name up
    Query {
        /// File with one name (and optional item) per line
        file: PathBuf,

        /// The name to look up
        name: String,

        /// Resume matching at this prefix depth instead of the root
        #[arg(short, long, default_value_t = 0)]
        start_depth: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::thread_rng();

    let modulus_hex = cli.modulus.as_deref().unwrap_or(RFC3526_MODP_2048);
    let modulus = parse_modulus_hex(modulus_hex)?;
    let params = GroupParameters::generate(modulus, &mut rng)?;

    match cli.command {
        Commands::Build { file, tree } => {
            let index = build_index(params, &file, cli.timings, &mut rng)?;
            let rendering = tree.then(|| index.render());
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "file": file.display().to_string(),
                    "nodes": index.node_count(),
                    "depths": index.depth_count(),
                    "tree": rendering
                }),
            );
        }

        Commands::Query {
            file,
            name,
            start_depth,
        } => {
            let index = build_index(params, &file, cli.timings, &mut rng)?;
            match index.lookup(&name, start_depth, &mut rng)? {
                Some(items) => {
                    let items: Vec<&String> = items.iter().collect();
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "ok",
                            "name": name,
                            "start_depth": start_depth,
                            "items": items
                        }),
                    );
                }
                None => {
                    output(
                        &cli.format,
                        &serde_json::json!({
                            "status": "error",
                            "message": format!("Name not found: {}", name)
                        }),
                    );
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

fn build_index(
    params: GroupParameters,
    file: &PathBuf,
    timings: bool,
    rng: &mut impl rand::Rng,
) -> anyhow::Result<Index<String>> {
    let mut index = Index::new(params);
    if timings {
        index = index.with_instrument(|op, elapsed| {
            eprintln!("{}: {:.3}ms", op, elapsed.as_secs_f64() * 1000.0);
        });
    }

    let contents = fs::read_to_string(file)
        .with_context(|| format!("Failed to read names from {}", file.display()))?;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (name, item) = match line.split_once(char::is_whitespace) {
            Some((name, item)) => (name, item.trim().to_string()),
            None => (line, line.to_string()),
        };
        index
            .add_item(name, item, rng)
            .with_context(|| format!("Failed to index name {:?}", name))?;
    }
    Ok(index)
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value).unwrap());
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
    }
}
