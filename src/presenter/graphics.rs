use std::num::NonZeroUsize;

use fast_image_resize::images::Image as FirImage;
use fast_image_resize::{PixelType, Resizer};
use image::{DynamicImage, RgbaImage};
use lru::LruCache;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui_image::picker::Picker;
use ratatui_image::protocol::Protocol;
use ratatui_image::{Image, Resize};

use crate::error::{ReaderError, ReaderResult};

use super::card::CardPresenter;
use super::traits::{PagePresenter, PresentSpec};

/// Cache key: page index plus the cell footprint and quantized zoom it was
/// encoded for. Any of those changing means a re-encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FrameKey {
    index: usize,
    width: u16,
    height: u16,
    zoom_centi: u32,
}

/// Encodes decoded pages into the terminal's negotiated graphics protocol.
/// Encoded frames are kept in an LRU so steady scrolling over the same pages
/// does not re-encode every tick.
pub struct GraphicsPresenter {
    picker: Picker,
    resizer: Resizer,
    encoded: LruCache<FrameKey, Protocol>,
    fallback: CardPresenter,
}

impl GraphicsPresenter {
    pub fn new(cache_entries: usize) -> ReaderResult<Self> {
        let picker = Picker::from_query_stdio().map_err(|source| {
            ReaderError::unsupported(format!("terminal graphics query failed: {source}"))
        })?;
        let capacity = NonZeroUsize::new(cache_entries.max(1))
            .unwrap_or(NonZeroUsize::new(1).expect("1 is non-zero"));
        Ok(Self {
            picker,
            resizer: Resizer::new(),
            encoded: LruCache::new(capacity),
            fallback: CardPresenter,
        })
    }

    fn encode(&mut self, area: Rect, spec: &PresentSpec<'_>) -> ReaderResult<Protocol> {
        let Some(image) = spec.asset.image.as_deref() else {
            return Err(ReaderError::unsupported("page asset is a placeholder"));
        };

        let (cell_w, cell_h) = self.picker.font_size();
        let target_w = (area.width as u32 * cell_w as u32).max(1);
        let target_h = (area.height as u32 * cell_h as u32).max(1);
        let scaled = self.scale_to_fit(image, target_w, target_h)?;

        self.picker
            .new_protocol(scaled, area, Resize::Fit(None))
            .map_err(|source| {
                ReaderError::unsupported(format!(
                    "failed to encode page {}: {source}",
                    spec.index
                ))
            })
    }

    /// Pre-scales the source to the slot's pixel footprint so the protocol
    /// encoder never has to ship a full-resolution page.
    fn scale_to_fit(
        &mut self,
        image: &DynamicImage,
        target_w: u32,
        target_h: u32,
    ) -> ReaderResult<DynamicImage> {
        let (src_w, src_h) = (image.width().max(1), image.height().max(1));
        let fit = (target_w as f32 / src_w as f32).min(target_h as f32 / src_h as f32);
        if fit >= 1.0 {
            return Ok(image.clone());
        }
        let dst_w = ((src_w as f32 * fit) as u32).max(1);
        let dst_h = ((src_h as f32 * fit) as u32).max(1);

        let rgba = image.to_rgba8();
        let src = FirImage::from_vec_u8(src_w, src_h, rgba.into_raw(), PixelType::U8x4)
            .map_err(|source| ReaderError::unsupported(format!("resize source: {source}")))?;
        let mut dst = FirImage::new(dst_w, dst_h, PixelType::U8x4);
        self.resizer
            .resize(&src, &mut dst, None)
            .map_err(|source| ReaderError::unsupported(format!("resize failed: {source}")))?;

        let buffer = RgbaImage::from_raw(dst_w, dst_h, dst.into_vec())
            .ok_or_else(|| ReaderError::unsupported("resized buffer has wrong length"))?;
        Ok(DynamicImage::ImageRgba8(buffer))
    }
}

impl PagePresenter for GraphicsPresenter {
    fn name(&self) -> &'static str {
        "graphics"
    }

    fn cell_size_px(&self) -> Option<(u16, u16)> {
        let (width, height) = self.picker.font_size();
        (width > 0 && height > 0).then_some((width, height))
    }

    fn draw_page(&mut self, frame: &mut Frame<'_>, area: Rect, spec: &PresentSpec<'_>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if spec.asset.is_broken() {
            self.fallback.draw_page(frame, area, spec);
            return;
        }

        let key = FrameKey {
            index: spec.index,
            width: area.width,
            height: area.height,
            zoom_centi: (spec.zoom * 100.0).round() as u32,
        };
        if !self.encoded.contains(&key) {
            match self.encode(area, spec) {
                Ok(protocol) => {
                    self.encoded.put(key, protocol);
                }
                Err(_) => {
                    self.fallback.draw_page(frame, area, spec);
                    return;
                }
            }
        }

        if let Some(protocol) = self.encoded.get(&key) {
            frame.render_widget(Image::new(protocol), area);
        }
    }

    fn invalidate(&mut self) {
        self.encoded.clear();
    }
}
