use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::path::Path;

use sigma16_disasm::{load_object, section_summary};
use sigma16_rs::disasm::{listing_lines, render_annotated};
use sigma16_rs::{Disassembler, DisasmConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sigma16 object-code disassembler", long_about = None)]
struct Cli {
    /// Object file: one `<section> <tok>,<tok>,...` line per section
    #[arg(value_name = "OBJFILE")]
    input: String,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show token counts per section and the module ids
    Sections,
    /// Disassemble the data section into an address-annotated listing
    List {
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Leave RX displacements as raw addresses
        #[arg(long)]
        no_relocate: bool,
        /// Append the source words of each unit (text format only)
        #[arg(long)]
        show_words: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let obj = load_object(Path::new(&cli.input))?;

    match cli.cmd {
        Command::Sections => {
            println!("{:<10} {:>6}", "section", "tokens");
            for (name, count) in section_summary(&obj) {
                println!("{name:<10} {count:>6}");
            }
            if !obj.module.is_empty() {
                println!("modules: {}", obj.module.join(", "));
            }
        }
        Command::List { format, no_relocate, show_words, out } => {
            let cfg = DisasmConfig { relocate: !no_relocate };
            let listing = Disassembler::with_config(cfg)
                .run(&obj)
                .with_context(|| format!("failed to disassemble {}", cli.input))?;
            tracing::info!(units = listing.map.len(), relocated = listing.relocated, "listing ready");

            let buf = match format {
                OutputFormat::Json => {
                    let mut json = serde_json::to_string_pretty(&listing_lines(&listing))?;
                    json.push('\n');
                    json
                }
                OutputFormat::Text if show_words => render_annotated(&listing),
                OutputFormat::Text => listing.render(),
            };
            if let Some(path) = out {
                std::fs::write(&path, buf).with_context(|| format!("failed to write {path}"))?;
            } else {
                print!("{}", buf);
            }
        }
    }

    Ok(())
}
