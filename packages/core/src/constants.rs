use std::env;
use std::path::PathBuf;

/// File name of the SQLite database inside the data directory
pub const DATABASE_FILE_NAME: &str = "knowledge-base.db";

/// Get the path to the data directory (~/.knowledge-base)
pub fn kb_dir() -> PathBuf {
    // HOME first so tests can redirect it
    if let Ok(home) = env::var("HOME") {
        return PathBuf::from(home).join(".knowledge-base");
    }

    dirs::home_dir()
        .unwrap_or_else(env::temp_dir)
        .join(".knowledge-base")
}

/// Get the default database path (~/.knowledge-base/knowledge-base.db)
pub fn database_file() -> PathBuf {
    kb_dir().join(DATABASE_FILE_NAME)
}
