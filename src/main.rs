use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mdblocks::{Config, Document, logging, wire};

#[derive(Parser)]
#[command(name = "mdblocks")]
#[command(about = "Convert between markdown and block documents")]
struct Cli {
    /// Config file (defaults are used if it does not exist)
    #[arg(short, long, value_name = "FILE", default_value = "mdblocks.toml")]
    config: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a markdown file into a JSON block payload
    ToBlocks {
        /// Input markdown file, `-` for stdin
        input: PathBuf,

        /// Output JSON file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Render a JSON block array as markdown
    ToMarkdown {
        /// Input JSON file, `-` for stdin
        input: PathBuf,

        /// Output markdown file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Title emitted as the leading `# ` line
        #[arg(long, default_value = "")]
        title: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading config {}", cli.config.display()))?;

    match cli.command {
        Commands::ToBlocks {
            input,
            output,
            pretty,
        } => {
            let markdown = read_input(&input)?;
            let document = mdblocks::parse_markdown_with_config(&markdown, &config);
            let payload = wire::encode_document(&document)?;
            let json = if pretty {
                serde_json::to_string_pretty(&payload)?
            } else {
                serde_json::to_string(&payload)?
            };
            write_output(output.as_deref(), &json)?;
        }
        Commands::ToMarkdown {
            input,
            output,
            title,
        } => {
            let json = read_input(&input)?;
            let blocks = wire::decode_blocks(&json)
                .with_context(|| format!("decoding blocks from {}", input.display()))?;
            let document = Document::new(title, blocks);
            let markdown = mdblocks::serialize_document_with_config(&document, &config)?;
            write_output(output.as_deref(), &markdown)?;
        }
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("reading stdin")?;
        return Ok(content);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
