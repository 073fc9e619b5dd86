//! CLI domain: parse, route, output, and presentation only.
//! No tracking logic; the route table dispatches to [`crate::tracker`].

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, OutputFormat};
pub use route::RunContext;
