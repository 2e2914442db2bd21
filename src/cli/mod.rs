mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{handle_count, handle_get, handle_list, handle_serve};
