#![forbid(unsafe_code)]

//! Command-line argument parsing.
//!
//! Parses args manually (no external dependencies) to keep the binary
//! lean. Supports environment variable overrides via the `TOKENLENS_*`
//! prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
tokenlens — terminal self-attention visualizer

USAGE:
    tokenlens [OPTIONS]

OPTIONS:
    --base-url=URL   Service base URL (default: http://localhost:8080)
    --offline        Skip the remote service; score with the built-in
                     reference scorer and disable saved texts
    --no-mouse       Disable mouse capture (keyboard navigation only)
    --help, -h       Show this help message
    --version, -V    Show version

KEYBINDINGS:
    Enter            Visualize the entered text
    Ctrl+S           Save the entered text
    Tab              Switch focus between input and saved list
    Up/Down, v/e/d   Navigate, view, edit, delete saved texts
    Esc              Close the visualization / cancel edit / quit

ENVIRONMENT VARIABLES:
    TOKENLENS_BASE_URL   Override --base-url
    TOKENLENS_OFFLINE    Set to any value to force --offline
    TOKENLENS_LOG        Tracing filter (e.g. debug, tokenlens_client=trace)
";

/// Parsed command-line options.
#[derive(Debug, Clone)]
pub struct Opts {
    /// Remote service base URL.
    pub base_url: String,
    /// Run without the remote service.
    pub offline: bool,
    /// Capture mouse events.
    pub mouse: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            offline: false,
            mouse: true,
        }
    }
}

impl Opts {
    /// Parse process arguments, exiting on `--help`, `--version`, or an
    /// unknown flag.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        if let Ok(url) = env::var("TOKENLENS_BASE_URL") {
            opts.base_url = url;
        }
        if env::var_os("TOKENLENS_OFFLINE").is_some() {
            opts.offline = true;
        }

        for arg in env::args().skip(1) {
            if let Some(url) = arg.strip_prefix("--base-url=") {
                opts.base_url = url.to_string();
            } else {
                match arg.as_str() {
                    "--offline" => opts.offline = true,
                    "--no-mouse" => opts.mouse = false,
                    "--help" | "-h" => {
                        print!("{HELP_TEXT}");
                        process::exit(0);
                    }
                    "--version" | "-V" => {
                        println!("tokenlens {VERSION}");
                        process::exit(0);
                    }
                    other => {
                        eprintln!("unknown argument: {other}");
                        eprintln!("run with --help for usage");
                        process::exit(2);
                    }
                }
            }
        }
        opts
    }
}
