use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use komik::assets::FsAssetLoader;
use komik::catalog::PageCatalog;
use komik::config::Config;
use komik::error::ReaderResult;
use komik::presenter::{PresenterKind, create_presenter};
use komik::reader::fullscreen::ChromeFullscreen;
use komik::reader::{Reader, ReaderParts};
use komik::session::FileKvStore;

/// Scroll-mode comic reader for the terminal.
#[derive(Debug, Parser)]
#[command(name = "komik", version, about)]
struct Cli {
    /// Book to read: a directory of page images or a book.toml manifest.
    book: PathBuf,

    /// Config file to use instead of the default discovery paths.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Draw bordered text cards instead of terminal graphics.
    #[arg(long)]
    no_graphics: bool,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> ReaderResult<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let catalog = PageCatalog::open(&cli.book)?;

    let presenter_kind = if cli.no_graphics {
        PresenterKind::Card
    } else {
        PresenterKind::Graphics
    };
    let presenter = create_presenter(presenter_kind, config.presenter.encoded_frame_cache_entries)?;

    let mut reader = Reader::prepare(ReaderParts {
        catalog,
        config,
        store: Box::new(FileKvStore::open_default()),
        fullscreen: Box::new(ChromeFullscreen::default()),
        presenter,
    });
    reader.run(Arc::new(FsAssetLoader)).await
}
