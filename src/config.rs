use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ReaderError, ReaderResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub viewport: ViewportConfig,
    pub timing: TimingConfig,
    pub presenter: PresenterConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
    /// Reference offset below the top of the column, in rows. The page whose
    /// top edge sits closest to this line is the current page.
    pub anchor_offset_rows: f32,
    /// Fraction of a page that must be visible before its one-shot reveal
    /// state is applied.
    pub reveal_threshold: f32,
    /// Blank rows between consecutive pages.
    pub page_gap_rows: u16,
    /// Fraction of the frame width the page column occupies at zoom 1.0.
    pub column_width_fraction: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            anchor_offset_rows: 4.0,
            reveal_threshold: 0.12,
            page_gap_rows: 1,
            column_width_fraction: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimingConfig {
    pub scroll_tick_ms: u64,
    /// Fraction of the remaining distance covered per animation tick.
    pub scroll_ease_percent: u8,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            scroll_tick_ms: 16,
            scroll_ease_percent: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PresenterConfig {
    pub encoded_frame_cache_entries: usize,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            encoded_frame_cache_entries: 32,
        }
    }
}

impl Config {
    pub fn load() -> ReaderResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> ReaderResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(ReaderError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            ReaderError::io_with_context(
                source,
                format!("failed to read config: {}", path.display()),
            )
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            ReaderError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if !self.viewport.anchor_offset_rows.is_finite() || self.viewport.anchor_offset_rows < 0.0 {
            self.viewport.anchor_offset_rows = ViewportConfig::default().anchor_offset_rows;
        }
        if !self.viewport.reveal_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.viewport.reveal_threshold)
        {
            self.viewport.reveal_threshold = ViewportConfig::default().reveal_threshold;
        }
        if !self.viewport.column_width_fraction.is_finite()
            || !(0.1..=1.0).contains(&self.viewport.column_width_fraction)
        {
            self.viewport.column_width_fraction = ViewportConfig::default().column_width_fraction;
        }
        self.timing.scroll_tick_ms = self.timing.scroll_tick_ms.max(1);
        self.timing.scroll_ease_percent = self.timing.scroll_ease_percent.clamp(1, 100);
        self.presenter.encoded_frame_cache_entries =
            self.presenter.encoded_frame_cache_entries.max(1);
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("KOMIK_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("komik").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("komik")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("komik").join("config.toml"));
    }
    None
}
