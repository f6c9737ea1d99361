// Main entry point for spectify

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use spectify::cli::Cli;
use spectify::config;
use spectify::event::{self, RunEvent};
use spectify::report::{self, Reporter, SpecReporter};

use std::io::Write;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from file (if exists)
    let file_config = config::Config::load();

    let cli = Cli::parse();

    // Setup tracing
    let filter = if cli.verbose {
        "spectify=debug,warn"
    } else {
        "spectify=warn,error"
    };

    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .event_format(spectify::logging::CustomFormatter)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose {
        info!("Starting spectify v{}", env!("CARGO_PKG_VERSION"));
    }

    // Handle config flag
    if cli.config {
        print_configuration(&cli, file_config.as_ref());
        return Ok(());
    }

    // Handle init_config flag
    if let Some(config_file) = &cli.init_config {
        let defaults = config::Config::default();
        std::fs::write(config_file, defaults.to_toml())
            .with_context(|| format!("cannot write {}", config_file.display()))?;
        println!("Configuration file created: {}", config_file.display());
        println!("\nYou can now edit the file to customize your settings.");
        return Ok(());
    }

    // Handle completion flag
    if let Some(shell_type) = &cli.completion {
        handle_completion(shell_type)?;
        return Ok(());
    }

    let options = cli.reporter_options(file_config.as_ref());
    let mut reporter = SpecReporter::new(std::io::stdout(), options);

    let run_failed = if cli.reads_stdin() {
        let reader = BufReader::new(tokio::io::stdin());
        drive(reader, &mut reporter).await?
    } else {
        let file = tokio::fs::File::open(&cli.events)
            .await
            .with_context(|| format!("cannot open event stream {}", cli.events.display()))?;
        let reader = BufReader::new(file);
        drive(reader, &mut reporter).await?
    };

    reporter.on_exit()?;

    if run_failed {
        std::process::exit(1);
    }

    Ok(())
}

/// Feed decoded stream lines to the reporter.
///
/// Malformed lines are skipped with a warning; the failure verdict is
/// tracked independently of suppression so `--suppress-failed` still
/// exits non-zero on a failing run.
async fn drive<R, W>(reader: BufReader<R>, reporter: &mut SpecReporter<W>) -> Result<bool>
where
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    let mut line_number = 0usize;
    let mut run_failed = false;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let event = match event::decode_line(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!("Skipping malformed event on line {}: {}", line_number, err);
                continue;
            }
        };

        run_failed |= event_failed(&event);
        report::dispatch(reporter, &event)?;
    }

    Ok(run_failed)
}

fn event_failed(event: &RunEvent) -> bool {
    match event {
        RunEvent::SpecComplete { result, .. } => !result.success && !result.skipped,
        RunEvent::BrowserComplete { browser } => browser
            .last_result
            .as_ref()
            .is_some_and(|r| r.failed > 0 || r.error),
        RunEvent::RunComplete { results, .. } => {
            results.failed > 0 || results.error || results.exit_code.is_some_and(|code| code != 0)
        }
        _ => false,
    }
}

fn print_configuration(cli: &Cli, file_config: Option<&config::Config>) {
    println!("Current configuration:");

    println!("\n  Command-line arguments:");
    println!(
        "    Events: {}",
        if cli.reads_stdin() {
            "stdin".to_string()
        } else {
            cli.events.display().to_string()
        }
    );
    println!("    No color: {}", cli.no_color);
    println!("    Immediate failures: {}", cli.immediate);
    println!(
        "    Suppress: success={}, skipped={}, failed={}",
        cli.suppress_success, cli.suppress_skipped, cli.suppress_failed
    );
    if let Some(max) = cli.max_log_lines {
        println!("    Max log lines: {}", max);
    }
    if let Some(fast) = cli.fast {
        println!("    Fast threshold: {}ms", fast);
    }
    if let Some(slow) = cli.slow {
        println!("    Slow threshold: {}ms", slow);
    }
    if let Some(ref level) = cli.log_level {
        println!("    Log level: {}", level);
    }

    if let Some(cfg) = file_config {
        println!("\n  Configuration file loaded:");
        println!(
            "    Colors: {}",
            if cfg.reporter.colors {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("    Late report: {}", cfg.reporter.late_report);
        println!(
            "    Suppress: success={}, skipped={}, failed={}",
            cfg.reporter.suppress_success, cfg.reporter.suppress_skipped, cfg.reporter.suppress_failed
        );
        if let Some(max) = cfg.reporter.max_log_lines {
            println!("    Max log lines: {}", max);
        }
        println!(
            "    Thresholds: fast={}ms, slow={}ms",
            cfg.reporter.fast, cfg.reporter.slow
        );
        println!("    Log level: {}", cfg.reporter.log_level);
        println!(
            "    Prefixes: success={:?}, failure={:?}, skipped={:?}",
            cfg.prefixes.success, cfg.prefixes.failure, cfg.prefixes.skipped
        );
    } else {
        println!("\n  No configuration file loaded");
        println!("  Create one with: spectify --init-config .spectifyrc.toml");
    }

    println!("\n  Environment variables:");
    if std::env::var_os(config::ENV_NO_COLOR).is_some() {
        println!("    {}: set (colors disabled)", config::ENV_NO_COLOR);
    } else {
        println!("    {}: not set", config::ENV_NO_COLOR);
    }

    println!("\nConfiguration precedence:");
    println!("  1. Command-line arguments (highest)");
    println!("  2. Configuration file");
    println!("  3. Environment variables");
    println!("  4. Built-in defaults (lowest)");
}

fn handle_completion(shell_type: &str) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{Shell, generate};

    let shell = match shell_type {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "elvish" => Shell::Elvish,
        "powershell" => Shell::PowerShell,
        _ => {
            eprintln!("Error: Unsupported shell type '{}'", shell_type);
            eprintln!("Supported shells: bash, zsh, fish, elvish, powershell");
            return Err(anyhow::anyhow!("Unsupported shell type"));
        }
    };

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, &bin_name, &mut std::io::stdout());

    Ok(())
}
