// Chunk: docs/chunks/headless_host - Headless host loop driving the engine
//!
//! tinypad headless runner.
//!
//! Replays a key script (from a file or stdin) against a fresh editing session
//! and prints the final frame:
//!
//! 1. Resolve configuration (`--config`, else the platform config directory)
//! 2. Open a session and replay every directive
//! 3. Capture one frame and print it as text or JSON
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `warn`).

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tinypad::{
    parse_script, run_script, Config, EditSession, Frame, Keymap, MonospaceMeasure, Result,
};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "tinypad")]
#[command(about = "Replay a key script against a tinypad buffer and print the result")]
struct Args {
    /// Configuration file (defaults to <config dir>/tinypad/config.json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the final frame as JSON
    #[arg(short, long)]
    json: bool,

    /// Use the modal (vi-style) keymap regardless of configuration
    #[arg(short, long)]
    modal: bool,

    /// Width of one monospace cell in pixels
    #[arg(long, value_name = "PX", default_value_t = 8.0)]
    cell_width: f32,

    /// Key script to replay; reads stdin when omitted or `-`
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let mut config = Config::resolve(args.config.as_deref())?;
    if args.modal {
        config.editing.keymap = Keymap::Modal;
    }
    let source = read_script(args.script.as_ref())?;
    let directives = parse_script(&source)?;
    info!(directives = directives.len(), "script parsed");

    let mut session = EditSession::open(config);
    let unhandled = run_script(&mut session, &directives);
    if unhandled > 0 {
        warn!(unhandled, "some keys had no binding");
    }

    let measure = MonospaceMeasure::new(args.cell_width, session.config().editing.tab_width);
    let mode = session.mode();
    let frame = Frame::capture(session.buffer_mut(), &measure).with_mode(mode);
    session.close();

    if args.json {
        let mut json = frame.to_json()?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(frame.render_text())
    }
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
