//! ログ初期化
//!
//! 画面向けの進捗表示は println!、診断ログは tracing で stderr に出す。

use tracing_subscriber::EnvFilter;

/// RUST_LOG があればそれを優先し、なければ --verbose に応じて debug / warn
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!("logging initialized (verbose = {})", verbose);
}
