// Render module - suite path diffing, styles and line formatting

pub mod line;
pub mod path;
pub mod theme;

pub use path::{SuiteDiff, SuiteHeader, SuiteTracker, diff_suites, indent};
pub use theme::{Theme, TimeBucket};
