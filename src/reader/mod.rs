mod bootstrap;
mod core;
mod event_loop;
pub mod fullscreen;
pub mod hud;
pub mod state;
pub(crate) mod terminal;
mod view_ops;

#[cfg(test)]
mod tests;

pub use bootstrap::ReaderParts;
pub use self::core::Reader;
