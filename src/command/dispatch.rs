use crate::reader::fullscreen::FullscreenHost;
use crate::reader::state::{
    DEFAULT_ZOOM, OverlayState, ReaderState, StatusState, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP, zoom_eq,
};

use super::types::{Command, CommandOutcome, Effect};

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult {
    pub outcome: CommandOutcome,
    pub effects: Vec<Effect>,
}

impl DispatchResult {
    fn applied(effects: Vec<Effect>) -> Self {
        Self {
            outcome: CommandOutcome::Applied,
            effects,
        }
    }

    fn noop() -> Self {
        Self {
            outcome: CommandOutcome::Noop,
            effects: Vec::new(),
        }
    }
}

pub struct DispatchContext<'a> {
    pub state: &'a mut ReaderState,
    pub overlay: &'a mut OverlayState,
    pub status: &'a mut StatusState,
    pub fullscreen: &'a mut dyn FullscreenHost,
    pub page_count: usize,
}

/// Applies one command to the reader state and reports the side effects the
/// caller must execute. Handlers mutate only through this path; listeners
/// never touch state directly.
pub fn dispatch(ctx: &mut DispatchContext<'_>, cmd: Command) -> DispatchResult {
    match cmd {
        Command::ZoomIn => set_zoom(ctx, ctx.state.zoom + ZOOM_STEP),
        Command::ZoomOut => set_zoom(ctx, ctx.state.zoom - ZOOM_STEP),
        Command::ZoomReset => set_zoom(ctx, DEFAULT_ZOOM),
        Command::SetZoom { value } => set_zoom(ctx, value),

        Command::OpenDrawer => open_drawer(ctx),
        Command::CloseDrawer => close_drawer(ctx),
        Command::OpenHelp => {
            if ctx.overlay.help_open {
                return DispatchResult::noop();
            }
            ctx.overlay.help_open = true;
            DispatchResult::applied(Vec::new())
        }
        Command::CloseHelp => {
            if !ctx.overlay.help_open {
                return DispatchResult::noop();
            }
            ctx.overlay.help_open = false;
            DispatchResult::applied(Vec::new())
        }
        Command::CloseOverlays => {
            if !ctx.overlay.drawer_open && !ctx.overlay.help_open {
                return DispatchResult::noop();
            }
            ctx.overlay.drawer_open = false;
            ctx.overlay.help_open = false;
            DispatchResult::applied(Vec::new())
        }

        Command::ToggleFullscreen => toggle_fullscreen(ctx),
        Command::StartReading => start_reading(ctx),
        Command::ExitFullscreen => {
            ctx.fullscreen.exit();
            sync_fullscreen_status(ctx);
            DispatchResult::applied(Vec::new())
        }

        Command::Scroll { amount } => DispatchResult::applied(vec![Effect::ScrollBy(amount)]),
        Command::JumpToPage { index } => jump_to(ctx, index, true),
        Command::FirstPage => jump_to(ctx, 0, true),
        Command::LastPage => jump_to(ctx, ctx.page_count.saturating_sub(1), true),

        Command::DrawerNext => move_drawer_selection(ctx, 1),
        Command::DrawerPrev => move_drawer_selection(ctx, -1),
        Command::DrawerActivate => {
            if !ctx.overlay.drawer_open || ctx.page_count == 0 {
                return DispatchResult::noop();
            }
            // Mirrors a thumbnail click: close, save through the same path
            // as scroll-driven updates, then scroll the page into view.
            let target = ctx.overlay.drawer_selected.min(ctx.page_count - 1);
            ctx.overlay.drawer_open = false;
            ctx.state.current_index = target;
            DispatchResult::applied(vec![
                Effect::PersistIndex(target),
                Effect::ScrollToIndex {
                    index: target,
                    smooth: true,
                },
            ])
        }

        Command::Quit => DispatchResult {
            outcome: CommandOutcome::QuitRequested,
            effects: Vec::new(),
        },
    }
}

/// Clamps, persists, and re-measures. Repeated calls with the same input are
/// idempotent: the second call is a noop with the same persisted value.
fn set_zoom(ctx: &mut DispatchContext<'_>, value: f32) -> DispatchResult {
    let clamped = if value.is_finite() {
        value.clamp(ZOOM_MIN, ZOOM_MAX)
    } else {
        DEFAULT_ZOOM
    };

    if zoom_eq(ctx.state.zoom, clamped) {
        ctx.status.message = format!("zoom unchanged ({:.2}x)", ctx.state.zoom);
        return DispatchResult::noop();
    }

    ctx.state.zoom = clamped;
    ctx.status.message = format!("zoom {:.2}x", clamped);
    DispatchResult::applied(vec![Effect::PersistZoom(clamped), Effect::RemeasureLayout])
}

fn open_drawer(ctx: &mut DispatchContext<'_>) -> DispatchResult {
    if ctx.overlay.drawer_open {
        return DispatchResult::noop();
    }
    ctx.overlay.drawer_open = true;
    // The highlight starts on the page being read.
    ctx.overlay.drawer_selected = ctx.state.current_index;
    DispatchResult::applied(Vec::new())
}

fn close_drawer(ctx: &mut DispatchContext<'_>) -> DispatchResult {
    if !ctx.overlay.drawer_open {
        return DispatchResult::noop();
    }
    ctx.overlay.drawer_open = false;
    DispatchResult::applied(Vec::new())
}

fn toggle_fullscreen(ctx: &mut DispatchContext<'_>) -> DispatchResult {
    if ctx.fullscreen.is_active() {
        ctx.fullscreen.exit();
    } else {
        ctx.fullscreen.request();
    }
    sync_fullscreen_status(ctx);
    DispatchResult::applied(Vec::new())
}

fn start_reading(ctx: &mut DispatchContext<'_>) -> DispatchResult {
    if !ctx.fullscreen.is_active() {
        ctx.fullscreen.request();
    }
    sync_fullscreen_status(ctx);
    DispatchResult::applied(vec![Effect::ScrollToIndex {
        index: ctx.state.current_index,
        smooth: true,
    }])
}

/// The UI flag always mirrors what the host reports, including after a
/// denied request.
fn sync_fullscreen_status(ctx: &mut DispatchContext<'_>) {
    ctx.status.message = if ctx.fullscreen.is_active() {
        "fullscreen reading".to_string()
    } else {
        "windowed reading".to_string()
    };
}

fn jump_to(ctx: &mut DispatchContext<'_>, index: usize, smooth: bool) -> DispatchResult {
    if ctx.page_count == 0 {
        return DispatchResult::noop();
    }
    let target = index.min(ctx.page_count - 1);
    if target == ctx.state.current_index {
        return DispatchResult::noop();
    }

    ctx.state.current_index = target;
    DispatchResult::applied(vec![
        Effect::PersistIndex(target),
        Effect::ScrollToIndex {
            index: target,
            smooth,
        },
    ])
}

fn move_drawer_selection(ctx: &mut DispatchContext<'_>, step: i64) -> DispatchResult {
    if !ctx.overlay.drawer_open || ctx.page_count == 0 {
        return DispatchResult::noop();
    }
    let last = (ctx.page_count - 1) as i64;
    let next = (ctx.overlay.drawer_selected as i64 + step).clamp(0, last) as usize;
    if next == ctx.overlay.drawer_selected {
        return DispatchResult::noop();
    }
    ctx.overlay.drawer_selected = next;
    DispatchResult::applied(Vec::new())
}
