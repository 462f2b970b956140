use std::sync::Arc;

use ratatui::layout::Rect;

use crate::assets::{AssetLoader, PreloadReport, preload_all};
use crate::catalog::PageCatalog;
use crate::config::Config;
use crate::presenter::PagePresenter;
use crate::session::{KvStore, SessionStore};
use crate::ui::ThumbCard;
use crate::viewport::{ColumnLayout, RevealState, ScrollState};

use super::core::Reader;
use super::fullscreen::FullscreenHost;
use super::state::{OverlayState, ReaderState, StatusState};

/// Everything the reader is wired with; tests swap in stubs at each seam.
pub struct ReaderParts {
    pub catalog: PageCatalog,
    pub config: Config,
    pub store: Box<dyn KvStore>,
    pub fullscreen: Box<dyn FullscreenHost>,
    pub presenter: Box<dyn PagePresenter>,
}

impl Reader {
    /// First half of startup: restore the persisted position (clamped against
    /// the catalog) and build the thumbnail list. Asset-dependent steps wait
    /// for [`Reader::finish_preload`].
    pub fn prepare(parts: ReaderParts) -> Self {
        let session = SessionStore::new(parts.store, parts.catalog.len());
        let state = ReaderState {
            current_index: session.load_index(),
            zoom: session.load_zoom(),
        };

        let thumbs = parts
            .catalog
            .pages()
            .iter()
            .map(|page| ThumbCard {
                label: page.label.clone(),
                note: "...".to_string(),
            })
            .collect();

        let page_count = parts.catalog.len();
        Self {
            state,
            overlay: OverlayState::default(),
            status: StatusState::default(),
            catalog: parts.catalog,
            assets: Vec::new(),
            thumbs,
            layout: ColumnLayout::default(),
            scroll: ScrollState::default(),
            reveals: RevealState::new(page_count),
            session,
            fullscreen: parts.fullscreen,
            presenter: parts.presenter,
            config: parts.config,
            loading: true,
            column: Rect::new(0, 0, 80, 24),
            needs_remeasure: false,
        }
    }

    /// Preloads every page concurrently; the aggregate settles regardless of
    /// per-asset failures.
    pub async fn preload(&self, loader: Arc<dyn AssetLoader>) -> PreloadReport {
        preload_all(&self.catalog, loader).await
    }

    /// Second half of startup, after assets settled: hide the loading state,
    /// apply the restored zoom by measuring the column (zoom mutates slot
    /// geometry, so it must follow construction), then jump to the restored
    /// index with no animation.
    pub fn finish_preload(&mut self, report: PreloadReport) {
        for (card, asset) in self.thumbs.iter_mut().zip(report.assets.iter()) {
            card.note = if asset.is_broken() {
                "missing".to_string()
            } else {
                format!("{}x{}", asset.width, asset.height)
            };
        }
        self.assets = report.assets;
        if report.failed > 0 {
            self.status.message = format!("{} page(s) failed to load", report.failed);
        }
        self.loading = false;

        self.remeasure();
        let offset = self.layout.offset_for_index(
            self.state.current_index,
            self.config.viewport.anchor_offset_rows,
            self.viewport_rows(),
        );
        self.scroll.jump_to(offset);
        self.sync_scroll_position();
    }
}
