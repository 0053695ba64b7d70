use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use promptbudget::{
    ChunkBudgeter, Document, ExtractorRegistry, PipelineConfig, collect_files, combined_text,
    load_document, sanitize_text, split_into_chunks,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "promptbudget",
    version,
    about = "Estimate, chunk and truncate documents for a model's token budget"
)]
struct Cli {
    /// JSON config file (missing fields use defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the model token limit
    #[arg(long, global = true)]
    token_limit: Option<usize>,

    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG wins when set
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the estimated token count of each file
    Estimate { path: PathBuf },

    /// Show the chunk size picked for each file and the resulting chunks
    Chunk {
        path: PathBuf,

        /// Override the configured chunk overlap
        #[arg(long)]
        overlap: Option<usize>,

        /// Print chunks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cut the combined text of all files to fit beside a fixed prompt
    Truncate {
        path: PathBuf,

        /// Tokens already used by the fixed part of the prompt
        #[arg(long, default_value_t = 0)]
        reserved: usize,

        /// Print the truncation record as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let budgeter = ChunkBudgeter::new(config.budget.clone()).context("Invalid budget")?;
    let registry = ExtractorRegistry::with_defaults();

    match cli.command {
        Command::Estimate { path } => {
            let documents = load_documents(&path, &registry)?;
            let mut total = 0;
            for doc in &documents {
                let tokens = budgeter.estimate_tokens(&doc.text);
                total += tokens;
                println!("{:>8}  {}", tokens, doc.name);
            }
            println!("{:>8}  total ({} files)", total, documents.len());
            if let Some(warning) = budgeter.check_input(&combined_text(&documents)) {
                eprintln!("warning: {}", warning);
            }
        }

        Command::Chunk {
            path,
            overlap,
            json,
        } => {
            let overlap = overlap.unwrap_or(config.budget.chunk_overlap);
            for doc in load_documents(&path, &registry)? {
                let text = sanitize_text(&doc.text);
                let size = budgeter.chunk_size_for(&text);
                let chunks = split_into_chunks(&text, size, overlap)
                    .with_context(|| format!("Failed to chunk {}", doc.name))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&chunks)?);
                    continue;
                }

                println!(
                    "{}: {} tokens, chunk size {}, {} chunks",
                    doc.name,
                    budgeter.estimate_tokens(&text),
                    size,
                    chunks.len()
                );
                for chunk in &chunks {
                    println!(
                        "  #{:<4} [{}..{}) {:>5} tokens  {}",
                        chunk.metadata.index,
                        chunk.metadata.start_offset,
                        chunk.metadata.end_offset,
                        chunk.metadata.token_count,
                        preview(&chunk.text, 60)
                    );
                }
            }
        }

        Command::Truncate {
            path,
            reserved,
            json,
        } => {
            let documents = load_documents(&path, &registry)?;
            let truncation = budgeter.truncate(&combined_text(&documents), reserved);

            if json {
                println!("{}", serde_json::to_string_pretty(&truncation)?);
            } else {
                println!("{}", truncation.text);
            }
            if let Some(warning) = truncation.warning() {
                eprintln!("warning: {}", warning);
            }
        }

        Command::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(limit) = cli.token_limit {
        config.budget.token_limit = limit;
    }
    config.validate()?;
    Ok(config)
}

fn load_documents(path: &Path, registry: &ExtractorRegistry) -> Result<Vec<Document>> {
    let files = collect_files(path, registry)
        .with_context(|| format!("Failed to list files under {}", path.display()))?;
    if files.is_empty() {
        bail!("No supported files found under {}", path.display());
    }

    files
        .iter()
        .map(|file| {
            load_document(file, registry)
                .with_context(|| format!("Failed to load {}", file.display()))
        })
        .collect()
}

fn preview(text: &str, max_chars: usize) -> String {
    let mut out: String = text.chars().take(max_chars).collect();
    if text.chars().count() > max_chars {
        out.push('…');
    }
    out
}
