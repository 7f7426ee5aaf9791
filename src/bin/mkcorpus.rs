use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sievex::core::error::Result;
use sievex::core::types::Document;
use sievex::storage::doc_stream::write_doc_stream;

#[derive(Parser)]
#[command(name = "mkcorpus")]
#[command(about = "Convert JSONL documents into a framed document stream", long_about = None)]
struct Cli {
    /// JSONL input, one {"url": ..., "text": ...} object per line
    input: PathBuf,

    /// Output stream path; a .lz4 extension enables compression
    output: PathBuf,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let mut documents = Vec::new();
    for line in BufReader::new(File::open(&cli.input)?).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        documents.push(serde_json::from_str::<Document>(&line)?);
    }

    let written = write_doc_stream(&cli.output, &documents)?;
    tracing::info!(docs = written, output = %cli.output.display(), "corpus written");
    Ok(())
}
