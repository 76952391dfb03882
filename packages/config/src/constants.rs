// ABOUTME: Environment variable name constants and defaults
// ABOUTME: Centralized definitions of every environment variable the server reads

// Server
pub const KB_API_PORT: &str = "KB_API_PORT";
pub const PORT: &str = "PORT"; // Legacy
pub const KB_API_HOST: &str = "KB_API_HOST";

// CORS
pub const KB_CORS_ORIGIN: &str = "KB_CORS_ORIGIN";

// Database
pub const KB_DATABASE_PATH: &str = "KB_DATABASE_PATH";
pub const KB_DB_MAX_CONNECTIONS: &str = "KB_DB_MAX_CONNECTIONS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_API_PORT: u16 = 4001;
pub const DEFAULT_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_FILTER: &str =
    "knowledge_base=info,kb_cli=info,kb_api=info,kb_usecases=info,kb_storage=info,tower_http=info";
