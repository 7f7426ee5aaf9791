use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use sievex::analysis::normalizer::CachedNormalizer;
use sievex::core::error::Result;
use sievex::index::reader::SearchIndex;
use sievex::query::session::QuerySession;
use sievex::storage::index_file::{read_doc_map, read_index};
use sievex::storage::layout::IndexLayout;

#[derive(Parser)]
#[command(name = "search")]
#[command(about = "Evaluate boolean queries against a persisted index", long_about = None)]
struct Cli {
    /// Directory holding the index files
    #[arg(long, default_value = "./index")]
    index_dir: PathBuf,

    /// Term normalizer, must match the one the index was built with
    #[arg(long, default_value = "russian")]
    language: String,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let layout = IndexLayout::new(cli.index_dir);
    let codec = layout.detect_codec()?;
    let blobs = read_index(&layout, codec)?;
    let urls = read_doc_map(&layout)?;

    let normalizer = Arc::new(CachedNormalizer::from_name(&cli.language)?);
    let index = SearchIndex::new(blobs, codec, normalizer);

    let stdin = io::stdin();
    let stdout = io::stdout();
    QuerySession::new(&index, &urls).run(stdin.lock(), stdout.lock())
}
