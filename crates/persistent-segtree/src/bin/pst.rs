//! `pst` — run a persistent segment tree script.
//!
//! Usage:
//!   pst < script.txt
//!
//! The script is read from stdin, one command per line (see
//! `persistent_segtree::script`). Each result is printed on its own line.
//! An optional JSON tree configuration is read from the file named by
//! `PST_CONFIG`. Logging goes to stderr and is controlled by `RUST_LOG`.

use persistent_segtree::{Script, TreeConfig};
use std::io::{self, BufWriter};
use tracing_subscriber::EnvFilter;

fn load_config() -> Result<TreeConfig, String> {
    match std::env::var_os("PST_CONFIG") {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("{}: {e}", path.to_string_lossy()))?;
            TreeConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.to_string_lossy()))
        }
        None => Ok(TreeConfig::default()),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let script = Script::with_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = script.run(stdin.lock(), BufWriter::new(stdout.lock())) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
