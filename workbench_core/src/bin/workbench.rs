//! Line-oriented alchemy worker
//!
//! Prints a `ready` message, then answers one JSON request per stdin line
//! with one JSON response per stdout line. Logs go to stderr, filtered by
//! `RUST_LOG` (default `info`).
//!
//! Usage: `workbench [config.toml]`

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use workbench_core::{encode, Response, Workbench, WorkbenchConfig};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => WorkbenchConfig::load_from_path(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => WorkbenchConfig::default(),
    };

    let workbench = tracing::dispatcher::with_default(&dispatch, || Workbench::from_config(&config))
        .context("failed to load alchemy data")?
        .with_dispatch(dispatch);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", encode(&Response::Ready))?;
    out.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read request")?;
        if line.trim().is_empty() {
            continue;
        }
        writeln!(out, "{}", workbench.handle_json(&line))?;
        out.flush()?;
    }

    Ok(())
}
