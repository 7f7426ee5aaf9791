use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sievex::analysis::normalizer::CachedNormalizer;
use sievex::compression::codec::PostingCodec;
use sievex::core::config::IndexConfig;
use sievex::core::error::Result;
use sievex::index::builder::IndexBuilder;
use sievex::storage::doc_stream::DocStreamReader;
use sievex::storage::index_file::{write_doc_map, write_index};
use sievex::storage::layout::IndexLayout;

#[derive(Parser)]
#[command(name = "mkindex")]
#[command(about = "Build a compressed boolean search index from a document stream", long_about = None)]
struct Cli {
    /// Posting codec: varbyte | simple9
    pack_type: String,

    /// Input files (.lz4 or plain) of framed document records
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output directory for the index files
    #[arg(long, default_value = "./index")]
    output: PathBuf,

    /// Term normalizer: russian | english | identity
    #[arg(long, default_value = "russian")]
    language: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let config = IndexConfig {
        index_dir: cli.output,
        codec: cli.pack_type.parse::<PostingCodec>()?,
        language: cli.language,
    };

    let normalizer = Arc::new(CachedNormalizer::from_name(&config.language)?);
    let layout = IndexLayout::create(config.index_dir.clone())?;

    let documents = DocStreamReader::new(cli.paths);
    let (index, urls) = IndexBuilder::new(normalizer).build(documents)?;

    write_index(&layout, &index.compress(config.codec)?)?;
    write_doc_map(&layout, &urls)?;
    Ok(())
}
