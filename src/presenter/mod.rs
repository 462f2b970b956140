mod card;
mod graphics;
mod traits;

pub use card::CardPresenter;
pub use graphics::GraphicsPresenter;
pub use traits::{PagePresenter, PresentSpec, PresenterKind};

use crate::error::ReaderResult;

/// Builds the richest presenter the terminal supports, falling back to
/// bordered text cards when no graphics protocol can be negotiated.
pub fn create_presenter(
    kind: PresenterKind,
    encoded_frame_cache_entries: usize,
) -> ReaderResult<Box<dyn PagePresenter>> {
    match kind {
        PresenterKind::Graphics => match GraphicsPresenter::new(encoded_frame_cache_entries) {
            Ok(presenter) => Ok(Box::new(presenter)),
            Err(_) => Ok(Box::new(CardPresenter::default())),
        },
        PresenterKind::Card => Ok(Box::new(CardPresenter::default())),
    }
}
