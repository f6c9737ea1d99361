pub mod cli;
pub mod config;
pub mod event;
pub mod logging;
pub mod render;
pub mod report;
pub mod state;

pub use event::{RunEvent, SpecResult, decode_line};
pub use report::{Reporter, SpecReporter, dispatch};
