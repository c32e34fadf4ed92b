use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use padwatch::{app, config::OutputFormat, Config};

/// Polls a gamepad or joystick and reports every channel that changes.
#[derive(Parser, Debug)]
#[command(name = env!("CARGO_BIN_NAME"), version)]
struct Args {
    /// Print the first controller's name and stream its changes for a while.
    #[arg(long, conflicts_with = "list_all")]
    test: bool,
    /// List every connected controller and HID game device.
    #[arg(long)]
    list_all: bool,
    /// Path to the setting file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Prints the default setting as TOML.
    #[arg(long)]
    show_default_config: bool,
    /// Write JSON instead of log lines (same as `output = "json"`).
    #[arg(long)]
    json: bool,
    /// Raise log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    app::init_tracing(args.verbose);

    if args.show_default_config {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::new(path)?,
        None => Config::default(),
    };
    if args.json {
        config.output = OutputFormat::Json;
    }

    let stdout = io::stdout();
    if args.list_all {
        app::list_all(&mut stdout.lock(), config.output == OutputFormat::Json)?;
    } else if args.test {
        app::test_app(&config, &mut stdout.lock())?;
    } else {
        app::run_app(&config)?;
    }
    Ok(())
}
