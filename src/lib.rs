pub mod actions;
pub mod cli;
pub mod dir_source;
pub mod error;
pub mod farewell;
pub mod logging;
pub mod menu;
pub mod naming;
pub mod picker;
pub mod prompt;
pub mod resolver;
pub mod spawner;
pub mod terminal_utils;
pub mod tmux;
pub mod topology;
