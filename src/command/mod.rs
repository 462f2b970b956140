mod dispatch;
mod types;

pub use dispatch::{DispatchContext, DispatchResult, dispatch};
pub use types::{Command, CommandOutcome, Effect, ScrollAmount};
