// CLI module - argument parsing and option merging

pub mod args;

pub use args::Cli;
