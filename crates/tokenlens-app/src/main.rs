#![forbid(unsafe_code)]

//! tokenlens binary entry point.

mod app;
mod cli;
mod terminal;
mod theme;

use std::io;

use tokenlens_client::{ApiClient, RemoteScorer, Scorer, UniformScorer};
use tokenlens_render::{Buffer, Presenter};

use app::App;
use cli::Opts;
use terminal::TerminalSession;
use theme::Theme;

fn main() {
    let opts = Opts::parse();
    init_tracing();

    if let Err(e) = run(opts) {
        eprintln!("tokenlens error: {e}");
        std::process::exit(1);
    }
}

/// Install a tracing subscriber when `TOKENLENS_LOG` is set.
///
/// Logs go to stderr; in alternate-screen mode they are invisible until
/// exit, which keeps the UI intact while still capturing a trail.
fn init_tracing() {
    if std::env::var_os("TOKENLENS_LOG").is_none() {
        return;
    }
    let filter = tracing_subscriber::EnvFilter::try_from_env("TOKENLENS_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(opts: Opts) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::default();

    let client = (!opts.offline).then(|| ApiClient::new(&opts.base_url));
    let scorer: Box<dyn Scorer> = match &client {
        Some(client) => Box::new(RemoteScorer::new(client.clone())),
        None => Box::new(UniformScorer),
    };

    let presenter = Presenter::new(theme.background);
    let mut app = App::new(client, scorer, theme);
    app.refresh_saved();

    let session = TerminalSession::new(opts.mouse)?;
    let (width, height) = TerminalSession::size()?;
    app.resize(width, height);

    let mut out = io::stdout().lock();
    while app.running {
        let (width, height) = TerminalSession::size()?;
        app.resize(width, height);
        let mut buf = Buffer::new(width, height);
        app.render(&mut buf);
        presenter.present(&buf, &mut out)?;

        let event = session.next_event()?;
        app.update(event);
    }
    drop(session);
    Ok(())
}
