// In: src/oracle.rs

//! The rendering capability consumed by the budget-fitting search.
//!
//! The raster re-encoder is deliberately expressed as a trait rather than a
//! concrete type: the search only needs "parameters in, bytes or failure
//! out", which lets it run against a deterministic stub in tests and against
//! a real encoder in the host application.

use serde::{Deserialize, Serialize};

use crate::error::BasepackError;

/// A raster image as the surrounding application hands it to the core:
/// pixel dimensions plus the originally encoded bytes. The core never
/// inspects the pixel data itself; `bytes` only feeds signature matching.
#[derive(Debug, Clone)]
pub struct ImageSource {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// One concrete re-encoding request: an opaque format token, a quality in
/// (0, 1], and absolute target dimensions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub format: String,
    pub quality: f64,
    pub width: u32,
    pub height: u32,
}

/// The only interface the core requires from the rendering subsystem.
///
/// Implementations must be deterministic for fixed inputs; the search relies
/// on that for reproducible behavior. A rejected (format, quality, dimension)
/// combination is reported as `EncoderFailure` and absorbed by the search as
/// an infeasible trial.
pub trait RenderOracle {
    fn render(&self, image: &ImageSource, request: &RenderRequest)
        -> Result<Vec<u8>, BasepackError>;
}
