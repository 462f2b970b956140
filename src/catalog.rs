use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReaderError, ReaderResult};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const MANIFEST_FILE_NAME: &str = "book.toml";

/// One entry of the reading sequence. Immutable after catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDescriptor {
    pub label: String,
    pub src: PathBuf,
}

/// Ordered, immutable sequence of pages with a stable index mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCatalog {
    title: String,
    pages: Vec<PageDescriptor>,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    title: Option<String>,
    pages: Vec<ManifestPage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPage {
    label: String,
    src: PathBuf,
}

impl PageCatalog {
    /// Opens a book from either a `book.toml` manifest path, a directory
    /// containing one, or a plain directory of image files.
    pub fn open(book: impl AsRef<Path>) -> ReaderResult<Self> {
        let book = book.as_ref();
        if book.is_file() {
            return Self::from_manifest(book);
        }
        if book.is_dir() {
            let manifest = book.join(MANIFEST_FILE_NAME);
            if manifest.is_file() {
                return Self::from_manifest(&manifest);
            }
            return Self::from_directory(book);
        }
        Err(ReaderError::invalid_argument(format!(
            "book path does not exist: {}",
            book.display()
        )))
    }

    pub fn from_manifest(path: &Path) -> ReaderResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| {
            ReaderError::io_with_context(
                source,
                format!("failed to read manifest: {}", path.display()),
            )
        })?;
        let manifest = toml::from_str::<Manifest>(&raw).map_err(|source| {
            ReaderError::invalid_argument(format!(
                "failed to parse manifest {}: {source}",
                path.display()
            ))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let pages = manifest
            .pages
            .into_iter()
            .map(|page| PageDescriptor {
                label: page.label,
                src: resolve_relative(base, page.src),
            })
            .collect();
        let title = manifest.title.unwrap_or_else(|| default_title(base));
        Self::from_pages(title, pages)
    }

    pub fn from_directory(dir: &Path) -> ReaderResult<Self> {
        let mut sources: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| {
                ReaderError::io_with_context(
                    source,
                    format!("failed to scan book directory: {}", dir.display()),
                )
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_image_extension(path))
            .collect();
        sources.sort();

        let pages = sources
            .into_iter()
            .enumerate()
            .map(|(index, src)| PageDescriptor {
                label: default_page_label(index),
                src,
            })
            .collect();
        Self::from_pages(default_title(dir), pages)
    }

    pub fn from_pages(title: String, pages: Vec<PageDescriptor>) -> ReaderResult<Self> {
        if pages.is_empty() {
            return Err(ReaderError::invalid_argument("book has no pages"));
        }
        Ok(Self { title, pages })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&PageDescriptor> {
        self.pages.get(index)
    }

    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    pub fn last_index(&self) -> usize {
        self.pages.len() - 1
    }
}

/// First entry is the cover, the rest are numbered pages.
fn default_page_label(index: usize) -> String {
    if index == 0 {
        "Cover".to_string()
    } else {
        format!("Page {index}")
    }
}

fn default_title(base: &Path) -> String {
    base.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn resolve_relative(base: &Path, src: PathBuf) -> PathBuf {
    if src.is_absolute() {
        src
    } else {
        base.join(src)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}
