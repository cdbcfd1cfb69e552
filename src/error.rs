// In: src/error.rs

//! This module defines the single, unified error type for the entire basepack library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BasepackError {
    // =========================================================================
    // === Codec Errors (contract violations by the caller, never retried)
    // =========================================================================
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(String),

    #[error("Invalid symbol in encoded input: {0}")]
    InvalidSymbol(String),

    #[error("Invalid length prefix: {0}")]
    InvalidLengthPrefix(String),

    #[error("Truncated payload: header declares {declared} bytes, only {available} present")]
    TruncatedPayload { declared: usize, available: usize },

    // =========================================================================
    // === Search Errors
    // =========================================================================
    /// The oracle rejected a (format, quality, dimension) combination. The
    /// search absorbs this as an infeasible trial; it only reaches a caller
    /// when raised outside of a search.
    #[error("Render oracle rejected parameters: {0}")]
    EncoderFailure(String),

    /// No parameter point within any search phase met the budget.
    #[error("Compression search exhausted after {trials} trials without meeting the budget of {budget} symbols")]
    CompressionExhausted { budget: usize, trials: usize },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically during config or
    /// parameter-report serialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
