use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::reader::state::{DEFAULT_ZOOM, ZOOM_MAX, ZOOM_MIN};

pub const LAST_INDEX_KEY: &str = "komik_reader_last_index_v1";
pub const ZOOM_KEY: &str = "komik_reader_zoom_v1";

/// String key-value persistence seam. Writes are best-effort: a store that
/// cannot persist simply degrades to in-session state.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// JSON-file-backed store. The whole map is rewritten on every `set`; the
/// payload is two short strings, so there is nothing worth batching.
pub struct FileKvStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileKvStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<BTreeMap<String, String>>(&raw).ok())
            .unwrap_or_default();
        Self { path, entries }
    }

    pub fn open_default() -> Self {
        let path = default_session_path().unwrap_or_else(|| PathBuf::from("komik_session.json"));
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let Ok(raw) = serde_json::to_string_pretty(&self.entries) else {
            return;
        };
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = fs::write(&self.path, raw);
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

/// Non-persistent store for tests and for hosts without a writable data dir.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: BTreeMap<String, String>,
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Reading-position persistence over a raw [`KvStore`]. All loads clamp, all
/// saves clamp; stale values from a shrunken catalog come back in range.
pub struct SessionStore {
    store: Box<dyn KvStore>,
    last_index: usize,
}

impl SessionStore {
    pub fn new(store: Box<dyn KvStore>, page_count: usize) -> Self {
        Self {
            store,
            last_index: page_count.saturating_sub(1),
        }
    }

    pub fn load_index(&self) -> usize {
        self.store
            .get(LAST_INDEX_KEY)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(0)
            .min(self.last_index)
    }

    pub fn load_zoom(&self) -> f32 {
        let zoom = self
            .store
            .get(ZOOM_KEY)
            .and_then(|raw| raw.trim().parse::<f32>().ok())
            .filter(|zoom| zoom.is_finite())
            .unwrap_or(DEFAULT_ZOOM);
        zoom.clamp(ZOOM_MIN, ZOOM_MAX)
    }

    pub fn save_index(&mut self, index: usize) {
        let clamped = index.min(self.last_index);
        self.store.set(LAST_INDEX_KEY, &clamped.to_string());
    }

    pub fn save_zoom(&mut self, zoom: f32) {
        let clamped = if zoom.is_finite() {
            zoom.clamp(ZOOM_MIN, ZOOM_MAX)
        } else {
            DEFAULT_ZOOM
        };
        self.store.set(ZOOM_KEY, &clamped.to_string());
    }
}

pub fn default_session_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("KOMIK_DATA_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("komik").join("session.json"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("komik")
                .join("session.json"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("komik").join("session.json"));
    }
    None
}
