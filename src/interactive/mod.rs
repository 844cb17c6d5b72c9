//! Interactive TUI front end

mod app;
mod rendering;
pub mod timers;
pub mod view;

pub use app::{App, run_tui};
