/// Scroll request units; screens are resolved against the live viewport
/// height at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAmount {
    Lines(i16),
    Screens(i16),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ZoomIn,
    ZoomOut,
    ZoomReset,
    SetZoom { value: f32 },
    OpenDrawer,
    CloseDrawer,
    OpenHelp,
    CloseHelp,
    /// Escape: closes drawer and help unconditionally; fullscreen is not
    /// touched.
    CloseOverlays,
    ToggleFullscreen,
    /// "Start reading": request fullscreen, then continue from the saved
    /// position with an animated jump.
    StartReading,
    ExitFullscreen,
    Scroll { amount: ScrollAmount },
    JumpToPage { index: usize },
    FirstPage,
    LastPage,
    DrawerNext,
    DrawerPrev,
    /// Activate the highlighted thumbnail card.
    DrawerActivate,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

/// Side effects a dispatch produces instead of performing; the event loop
/// executes them against the session store and the scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    PersistIndex(usize),
    PersistZoom(f32),
    ScrollToIndex { index: usize, smooth: bool },
    ScrollBy(ScrollAmount),
    /// Zoom changed: slot geometry must be re-measured before the next frame.
    RemeasureLayout,
}
