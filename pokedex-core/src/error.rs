//! Error types for the Pokedex.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Every variant is meant to be shown to the player as-is.

use thiserror::Error;

/// Result type alias using `PokedexError`.
pub type Result<T> = std::result::Result<T, PokedexError>;

/// Main error type for all Pokedex operations.
#[derive(Debug, Error)]
pub enum PokedexError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NAVIGATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Backward navigation before any forward navigation.
    #[error("No previous locations!")]
    NoPriorPage,

    /// Area is not in the cache (never listed, or already expired).
    #[error("Unknown area '{0}': list it with `map` first")]
    UnknownArea(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CREATURE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Creature has never been seen in an explored area.
    #[error("You haven't encountered a {0} yet")]
    UnknownCreature(String),

    /// Creature is known but has not been caught.
    #[error("You have not caught {0}")]
    NotCapturedYet(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // FETCH ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Remote fetch failed for a specific resource.
    #[error("Failed to fetch {target}: {reason}")]
    FetchFailed { target: String, reason: String },

    /// Resource does not exist upstream.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // COMMAND ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input did not match any command.
    #[error("Command not recognized: {0}")]
    UnknownCommand(String),

    /// Command requires an argument that was not given.
    #[error("Usage: {command} <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // INFRASTRUCTURE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PokedexError {
    /// Returns true if this error is recoverable (can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PokedexError::FetchFailed { .. } | PokedexError::HttpError(_)
        )
    }

    /// Returns true if this error was caused by player input rather than
    /// the network or the program itself.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PokedexError::NoPriorPage
                | PokedexError::UnknownArea(_)
                | PokedexError::UnknownCreature(_)
                | PokedexError::NotCapturedYet(_)
                | PokedexError::UnknownCommand(_)
                | PokedexError::MissingArgument { .. }
        )
    }
}
