// Report module - console output and reporting

pub mod spec;

use anyhow::Result;

use crate::event::{BrowserInfo, LogLevel, RunEvent, RunTotals, SpecResult};
pub use spec::SpecReporter;

/// Reporter trait
///
/// Handlers run serially in event order and take `&mut self`; the host
/// delivers one event at a time and waits for the handler to finish.
pub trait Reporter {
    /// Called when the launcher registers a browser
    fn on_browser_register(&mut self, browser: &BrowserInfo) -> Result<()>;

    /// Called when a spec finishes on a browser
    fn on_spec_complete(&mut self, browser: &BrowserInfo, result: &SpecResult) -> Result<()>;

    /// Called when a browser echoes a console message
    fn on_browser_log(&mut self, browser: &str, message: &str, level: LogLevel) -> Result<()>;

    /// Called when a browser finishes its run
    fn on_browser_complete(&mut self, browser: &BrowserInfo) -> Result<()>;

    /// Called when the entire run finishes
    fn on_run_complete(&mut self, browsers: &[BrowserInfo], results: &RunTotals) -> Result<()>;

    /// Called before the host shuts down
    fn on_exit(&mut self) -> Result<()>;
}

/// Route one decoded stream event to its handler.
pub fn dispatch<R: Reporter + ?Sized>(reporter: &mut R, event: &RunEvent) -> Result<()> {
    match event {
        RunEvent::BrowserRegister { browser } => reporter.on_browser_register(browser),
        RunEvent::SpecComplete { browser, result } => reporter.on_spec_complete(browser, result),
        RunEvent::BrowserLog {
            browser,
            message,
            level,
        } => reporter.on_browser_log(browser, message, *level),
        RunEvent::BrowserComplete { browser } => reporter.on_browser_complete(browser),
        RunEvent::RunComplete { browsers, results } => reporter.on_run_complete(browsers, results),
        RunEvent::Exit => reporter.on_exit(),
    }
}
