mod config;
mod csv_import;
mod directory;
mod ipc;
mod seed;

use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "SEKOLAHD_LOG";

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    // stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let (cfg, cfg_path) = config::Config::load()?;
    init_logging(&cfg.log_filter);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = cfg_path
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "<defaults>".to_string()),
        seed = cfg.seed_mock_data,
        "sekolahd starting"
    );

    let mut state = ipc::AppState::new(cfg);
    tracing::info!(
        students = state.students.len(),
        teachers = state.teachers.len(),
        "directories loaded"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let resp = match serde_json::from_str::<ipc::Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req),
            // Can't reply with an id we never parsed.
            Err(e) => ipc::bad_json(e.to_string()),
        };
        let _ = writeln!(
            stdout,
            "{}",
            serde_json::to_string(&resp).unwrap_or_else(|_| "{\"ok\":false}".to_string())
        );
        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, exiting");
    Ok(())
}
