//! Whole-reader scenarios: bootstrap, key handling, scroll resolution, and
//! persistence wired together over in-memory seams.

use std::io;
use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use image::DynamicImage;
use ratatui::Frame;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::assets::{PageAsset, PreloadReport};
use crate::catalog::{PageCatalog, PageDescriptor};
use crate::command::Effect;
use crate::config::Config;
use crate::presenter::CardPresenter;
use crate::reader::state::zoom_eq;
use crate::session::{KvStore, LAST_INDEX_KEY, MemoryKvStore, ZOOM_KEY};

use super::Reader;
use super::bootstrap::ReaderParts;
use super::event_loop::LoopControl;
use super::fullscreen::ChromeFullscreen;
use super::terminal::ReaderSurface;

/// In-memory drawing surface; what the live loop does against a tty, these
/// tests do against ratatui's `TestBackend`.
struct TestSurface {
    terminal: Terminal<TestBackend>,
}

impl TestSurface {
    fn new(width: u16, height: u16) -> Self {
        Self {
            terminal: Terminal::new(TestBackend::new(width, height))
                .expect("test terminal should initialize"),
        }
    }

    fn contents(&self) -> String {
        self.terminal.backend().to_string()
    }
}

impl ReaderSurface for TestSurface {
    fn viewport(&self) -> io::Result<Rect> {
        let size = self
            .terminal
            .size()
            .unwrap_or_else(|infallible| match infallible {});
        Ok(Rect::new(0, 0, size.width, size.height))
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut Frame<'_>),
    {
        self.terminal
            .draw(render)
            .map(|_| ())
            .unwrap_or_else(|infallible| match infallible {});
        Ok(())
    }
}

fn catalog_of(page_count: usize) -> PageCatalog {
    let pages = (0..page_count)
        .map(|i| PageDescriptor {
            label: if i == 0 {
                "Cover".to_string()
            } else {
                format!("Page {i}")
            },
            src: PathBuf::from(format!("page{i}.png")),
        })
        .collect();
    PageCatalog::from_pages("Test Book".to_string(), pages).expect("catalog should build")
}

/// Square pages keep the slot math round: at an 80x24 viewport with the
/// fallback cell size, every slot is 32 rows tall plus a 1-row gap.
fn square_report(page_count: usize) -> PreloadReport {
    let assets = (0..page_count)
        .map(|_| PageAsset::decoded(DynamicImage::new_rgba8(800, 800)))
        .collect();
    PreloadReport { assets, failed: 0 }
}

fn ready_reader(page_count: usize, entries: &[(&str, &str)]) -> Reader {
    let mut store = MemoryKvStore::default();
    for (key, value) in entries {
        store.set(key, value);
    }

    let mut reader = Reader::prepare(ReaderParts {
        catalog: catalog_of(page_count),
        config: Config::default(),
        store: Box::new(store),
        fullscreen: Box::new(ChromeFullscreen::default()),
        presenter: Box::new(CardPresenter),
    });
    reader.finish_preload(square_report(page_count));
    reader
}

fn press(reader: &mut Reader, code: KeyCode) -> LoopControl {
    let mut needs_redraw = false;
    reader.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE), &mut needs_redraw)
}

fn settle(reader: &mut Reader) {
    for _ in 0..500 {
        if !reader.tick_scroll_animation() {
            return;
        }
    }
    panic!("scroll animation should settle");
}

#[test]
fn bootstrap_restores_and_clamps_persisted_state() {
    let reader = ready_reader(6, &[(LAST_INDEX_KEY, "42"), (ZOOM_KEY, "9.0")]);

    assert!(!reader.loading);
    assert_eq!(reader.state.current_index, 5);
    assert!(zoom_eq(reader.state.zoom, 1.8));

    // The restored page sits at its anchor, not at the column top.
    let expected = reader
        .layout
        .offset_for_index(5, reader.config.viewport.anchor_offset_rows, 24.0);
    assert_eq!(reader.scroll.offset(), expected);
}

#[test]
fn bootstrap_settles_even_when_every_page_is_broken() {
    let mut reader = Reader::prepare(ReaderParts {
        catalog: catalog_of(3),
        config: Config::default(),
        store: Box::new(MemoryKvStore::default()),
        fullscreen: Box::new(ChromeFullscreen::default()),
        presenter: Box::new(CardPresenter),
    });
    reader.finish_preload(PreloadReport {
        assets: vec![PageAsset::broken(), PageAsset::broken(), PageAsset::broken()],
        failed: 3,
    });

    assert!(!reader.loading);
    assert_eq!(reader.status.message, "3 page(s) failed to load");
    assert!(reader.thumbs.iter().all(|card| card.note == "missing"));
    // Placeholder slots still carry layout, so scrolling works.
    assert!(reader.layout.total_height() > 0.0);
}

#[test]
fn zoom_keys_step_clamp_and_persist() {
    let mut reader = ready_reader(6, &[]);

    for _ in 0..3 {
        press(&mut reader, KeyCode::Char('+'));
    }
    assert!(zoom_eq(reader.state.zoom, 1.3));
    assert!(zoom_eq(reader.session.load_zoom(), 1.3));

    for _ in 0..20 {
        press(&mut reader, KeyCode::Char('+'));
    }
    assert!(zoom_eq(reader.state.zoom, 1.8));

    press(&mut reader, KeyCode::Char('0'));
    assert!(zoom_eq(reader.state.zoom, 1.0));
    assert!(zoom_eq(reader.session.load_zoom(), 1.0));
}

#[test]
fn zoom_change_rescales_the_column() {
    let mut reader = ready_reader(6, &[]);
    let baseline = reader.layout.total_height();

    press(&mut reader, KeyCode::Char('+'));
    // The remeasure is deferred to the next frame; force it the way
    // draw_frame would.
    reader.remeasure();

    assert!(reader.layout.total_height() > baseline);
    assert_eq!(reader.state.current_index, 0);
}

#[test]
fn jump_resolves_the_nearest_anchored_page() {
    let mut reader = ready_reader(6, &[]);

    reader.execute_effects(vec![Effect::ScrollToIndex {
        index: 3,
        smooth: false,
    }]);

    assert_eq!(reader.state.current_index, 3);
    let hud = reader.hud_view();
    assert_eq!(hud.counter, "4 / 6");
    assert_eq!(hud.progress_percent, 60.0);
}

#[test]
fn scroll_position_changes_persist_the_resolved_index() {
    let mut reader = ready_reader(6, &[]);

    reader.execute_effects(vec![Effect::ScrollToIndex {
        index: 4,
        smooth: false,
    }]);
    assert_eq!(reader.session.load_index(), 4);

    reader.execute_effects(vec![Effect::ScrollToIndex {
        index: 0,
        smooth: false,
    }]);
    assert_eq!(reader.session.load_index(), 0);
}

#[test]
fn smooth_scroll_glides_until_it_settles_on_the_target_page() {
    let mut reader = ready_reader(6, &[]);

    reader.execute_effects(vec![Effect::ScrollToIndex {
        index: 5,
        smooth: true,
    }]);
    // Gliding starts from the old offset; the index follows the animation.
    assert_eq!(reader.state.current_index, 0);

    settle(&mut reader);
    assert_eq!(reader.state.current_index, 5);
    assert!(reader.scroll.is_settled());
}

#[test]
fn drawer_selection_jumps_and_persists() {
    let mut reader = ready_reader(6, &[]);

    press(&mut reader, KeyCode::Char('t'));
    assert!(reader.overlay.drawer_open);
    assert_eq!(reader.overlay.drawer_selected, 0);

    press(&mut reader, KeyCode::Char('j'));
    press(&mut reader, KeyCode::Char('j'));
    press(&mut reader, KeyCode::Enter);

    assert!(!reader.overlay.drawer_open);
    assert_eq!(reader.state.current_index, 2);
    assert_eq!(reader.session.load_index(), 2);

    settle(&mut reader);
    assert_eq!(reader.state.current_index, 2);
}

#[test]
fn frames_render_through_the_surface_seam() {
    let mut reader = ready_reader(6, &[]);
    let mut surface = TestSurface::new(80, 24);

    // Same handshake as the live loop: viewport first, then draw.
    let viewport = surface.viewport().expect("viewport should be reported");
    assert_eq!(viewport, Rect::new(0, 0, 80, 24));
    reader.column = crate::ui::split_layout(viewport, false).column;

    surface
        .draw(|frame| reader.draw_frame(frame))
        .expect("draw should pass");

    let rendered = surface.contents();
    assert!(rendered.contains("SCROLL"));
    assert!(rendered.contains("Cover"));
}

#[test]
fn fullscreen_key_hides_the_chrome_and_shows_the_exit_hint() {
    let mut reader = ready_reader(6, &[]);
    let mut surface = TestSurface::new(80, 24);

    surface
        .draw(|frame| reader.draw_frame(frame))
        .expect("draw should pass");
    assert!(surface.contents().contains("SCROLL"));

    press(&mut reader, KeyCode::Char('f'));
    assert!(reader.fullscreen.is_active());
    surface
        .draw(|frame| reader.draw_frame(frame))
        .expect("draw should pass");
    let rendered = surface.contents();
    assert!(!rendered.contains("SCROLL"));
    assert!(rendered.contains("f exit fullscreen"));

    press(&mut reader, KeyCode::Char('f'));
    assert!(!reader.fullscreen.is_active());
}

#[test]
fn help_overlay_opens_and_escape_closes_it() {
    let mut reader = ready_reader(6, &[]);
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).expect("test terminal should initialize");

    press(&mut reader, KeyCode::Char('h'));
    assert!(reader.overlay.help_open);
    terminal
        .draw(|frame| reader.draw_frame(frame))
        .expect("draw should pass");

    press(&mut reader, KeyCode::Esc);
    assert!(!reader.overlay.help_open);
}

#[test]
fn quit_key_stops_the_loop() {
    let mut reader = ready_reader(6, &[]);
    assert_eq!(press(&mut reader, KeyCode::Char('q')), LoopControl::Quit);
}

#[test]
fn resize_event_requests_a_redraw_only() {
    let mut reader = ready_reader(6, &[]);
    let mut needs_redraw = false;

    let control = reader.handle_terminal_event(Event::Resize(100, 40), &mut needs_redraw);

    assert_eq!(control, LoopControl::Continue);
    assert!(needs_redraw);
    assert_eq!(reader.state.current_index, 0);
}
