use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for the Twin core.
///
/// The reply pipeline itself never fails: gating, generation and the safety
/// filter degrade to safe defaults. These errors surface only at the edges
/// (config files, the durable store, rejected user edits) where a caller can
/// decide whether to retry, report or ignore.
#[derive(Debug, Error)]
pub enum TwinError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Durable storage ─────────────────────────────────────────────────
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    // ── Rejected user edits ─────────────────────────────────────────────
    #[error("validation failed: {0}")]
    Validation(String),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("write {key} failed: {message}")]
    Write { key: String, message: String },

    #[error("encode {key} failed: {message}")]
    Encode { key: String, message: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, TwinError>;
