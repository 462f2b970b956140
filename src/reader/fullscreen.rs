/// Fullscreen capability seam. The reader never assumes a request succeeded:
/// after every attempt it re-queries `is_active`, and the UI draws from that
/// observed state only.
pub trait FullscreenHost {
    /// Best-effort request; the host may deny it.
    fn request(&mut self) -> bool;
    fn exit(&mut self);
    fn is_active(&self) -> bool;
}

/// Terminal realization of fullscreen: the chrome (header, HUD, progress)
/// is hidden and the page column takes the whole frame. Requests always
/// succeed here; the trait exists for hosts where they do not.
#[derive(Debug, Default)]
pub struct ChromeFullscreen {
    active: bool,
}

impl FullscreenHost for ChromeFullscreen {
    fn request(&mut self) -> bool {
        self.active = true;
        true
    }

    fn exit(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
pub(crate) struct DenyingFullscreen;

#[cfg(test)]
impl FullscreenHost for DenyingFullscreen {
    fn request(&mut self) -> bool {
        false
    }

    fn exit(&mut self) {}

    fn is_active(&self) -> bool {
        false
    }
}
