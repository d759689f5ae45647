pub mod interface;
pub mod target;

#[cfg(test)]
pub mod fake;

pub use interface::{Multiplexer, Tmux, TmuxError};
pub use target::{DisplayId, StableId};
