use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::join_all;
use image::DynamicImage;

use crate::catalog::PageCatalog;
use crate::error::{ReaderError, ReaderResult};

/// Portrait fallback used when a page asset cannot be decoded; the slot still
/// participates in layout and scrolling.
const PLACEHOLDER_SIZE_PX: (u32, u32) = (800, 1200);

/// Decoded (or placeholder) page image plus its pixel dimensions.
#[derive(Debug, Clone)]
pub struct PageAsset {
    pub width: u32,
    pub height: u32,
    pub image: Option<Arc<DynamicImage>>,
}

impl PageAsset {
    pub fn decoded(image: DynamicImage) -> Self {
        Self {
            width: image.width().max(1),
            height: image.height().max(1),
            image: Some(Arc::new(image)),
        }
    }

    pub fn placeholder(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            image: None,
        }
    }

    pub fn broken() -> Self {
        Self::placeholder(PLACEHOLDER_SIZE_PX.0, PLACEHOLDER_SIZE_PX.1)
    }

    pub fn is_broken(&self) -> bool {
        self.image.is_none()
    }

    /// Height over width; drives the slot height in the scroll column.
    pub fn aspect_ratio(&self) -> f32 {
        self.height as f32 / self.width as f32
    }
}

/// Decoding seam so bootstrap can be exercised without real files.
pub trait AssetLoader: Send + Sync {
    fn load(&self, path: &Path) -> ReaderResult<DynamicImage>;
}

/// Loads and decodes from the filesystem through the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsAssetLoader;

impl AssetLoader for FsAssetLoader {
    fn load(&self, path: &Path) -> ReaderResult<DynamicImage> {
        let reader = image::ImageReader::open(path).map_err(|source| {
            ReaderError::io_with_context(
                source,
                format!("failed to open page asset: {}", path.display()),
            )
        })?;
        let reader = reader
            .with_guessed_format()
            .map_err(|source| ReaderError::asset_decode(path, source))?;
        reader
            .decode()
            .map_err(|source| ReaderError::asset_decode(path, source))
    }
}

/// Outcome of the preload pass. `failed` counts assets that settled as
/// broken; the aggregate itself never fails.
#[derive(Debug, Clone, Default)]
pub struct PreloadReport {
    pub assets: Vec<PageAsset>,
    pub failed: usize,
}

/// Preloads every page concurrently and waits for all of them to settle.
/// A decode failure resolves as a placeholder asset; there is no retry, no
/// cancellation, and no timeout.
pub async fn preload_all(
    catalog: &PageCatalog,
    loader: Arc<dyn AssetLoader>,
) -> PreloadReport {
    let jobs = catalog.pages().iter().map(|page| {
        let loader = Arc::clone(&loader);
        let src: PathBuf = page.src.clone();
        tokio::task::spawn_blocking(move || loader.load(&src))
    });

    let settled = join_all(jobs).await;
    let mut assets = Vec::with_capacity(settled.len());
    let mut failed = 0;
    for outcome in settled {
        match outcome {
            Ok(Ok(image)) => assets.push(PageAsset::decoded(image)),
            // Decode failure or a panicked worker both settle as broken.
            Ok(Err(_)) | Err(_) => {
                failed += 1;
                assets.push(PageAsset::broken());
            }
        }
    }

    PreloadReport { assets, failed }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use image::DynamicImage;

    use crate::catalog::{PageCatalog, PageDescriptor};
    use crate::error::{ReaderError, ReaderResult};

    use super::{AssetLoader, PageAsset, preload_all};

    struct StubLoader {
        fail_all: bool,
    }

    impl AssetLoader for StubLoader {
        fn load(&self, path: &Path) -> ReaderResult<DynamicImage> {
            if self.fail_all {
                return Err(ReaderError::asset_decode(
                    path,
                    ReaderError::invalid_argument("stub failure"),
                ));
            }
            Ok(DynamicImage::new_rgba8(100, 150))
        }
    }

    fn three_page_catalog() -> PageCatalog {
        let pages = (0..3)
            .map(|i| PageDescriptor {
                label: format!("Page {i}"),
                src: PathBuf::from(format!("page{i}.jpg")),
            })
            .collect();
        PageCatalog::from_pages("Stub".to_string(), pages).expect("catalog should build")
    }

    #[tokio::test]
    async fn preload_decodes_every_page() {
        let report = preload_all(
            &three_page_catalog(),
            Arc::new(StubLoader { fail_all: false }),
        )
        .await;

        assert_eq!(report.assets.len(), 3);
        assert_eq!(report.failed, 0);
        assert!(report.assets.iter().all(|asset| !asset.is_broken()));
        assert_eq!(report.assets[0].aspect_ratio(), 1.5);
    }

    #[tokio::test]
    async fn preload_settles_even_when_every_load_fails() {
        let report = preload_all(
            &three_page_catalog(),
            Arc::new(StubLoader { fail_all: true }),
        )
        .await;

        assert_eq!(report.assets.len(), 3);
        assert_eq!(report.failed, 3);
        assert!(report.assets.iter().all(PageAsset::is_broken));
    }

    #[test]
    fn placeholder_keeps_a_sane_aspect_ratio() {
        let asset = PageAsset::broken();
        assert!(asset.is_broken());
        assert_eq!(asset.aspect_ratio(), 1.5);
    }
}
