use std::sync::Once;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::Result;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIR_NAME: &str = ".gexpenses_core";

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("gexpenses_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application-specific data directory, defaulting to
/// `~/.gexpenses_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("GEXPENSES_CORE_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Creates the directory (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
