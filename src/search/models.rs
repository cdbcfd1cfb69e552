// In: src/search/models.rs

//! Strongly-typed parameter, state, and result models for the budget search.
//! These replace ad-hoc tuples with serializable, self-describing types.

use serde::{Deserialize, Serialize};

use crate::config::BasepackConfig;
use crate::error::BasepackError;
use crate::oracle::{ImageSource, RenderRequest};

//==================================================================================
// 1. Parameters
//==================================================================================

/// The knobs the render oracle accepts: an opaque format token, an encode
/// quality in (0, 1], and per-axis spatial scale factors in (0, 1].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub format: String,
    pub quality: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl RenderParams {
    /// Resolves the relative scale factors against the source dimensions.
    /// Target dimensions are rounded, floored at one pixel.
    pub fn to_request(&self, image: &ImageSource) -> RenderRequest {
        RenderRequest {
            format: self.format.clone(),
            quality: self.quality,
            width: scaled_dimension(image.width, self.scale_x),
            height: scaled_dimension(image.height, self.scale_y),
        }
    }
}

fn scaled_dimension(source: u32, scale: f64) -> u32 {
    ((source as f64 * scale).round() as u32).max(1)
}

//==================================================================================
// 2. Results
//==================================================================================

/// A feasible search result: the winning parameters, the encoded string, and
/// the rendered byte size it was produced from.
#[derive(Debug, Clone)]
pub struct FitOutcome {
    pub params: RenderParams,
    pub encoded: String,
    pub rendered_len: usize,
}

impl FitOutcome {
    /// Length in alphabet symbols, the unit the budget is expressed in.
    pub fn encoded_len(&self) -> usize {
        self.encoded.chars().count()
    }

    /// The winning parameters as a JSON report for the host application.
    pub fn params_json(&self) -> Result<String, BasepackError> {
        Ok(serde_json::to_string(&self.params)?)
    }
}

//==================================================================================
// 3. Search State
//==================================================================================

/// A closed search interval over one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ParamRange {
    pub lo: f64,
    pub hi: f64,
}

impl ParamRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    pub fn mid(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

/// Mutable state owned by exactly one `plan_fit` invocation and discarded
/// when the search ends. No other component reads or writes it.
#[derive(Debug)]
pub(crate) struct SearchState {
    pub quality: ParamRange,
    pub scale: ParamRange,
    pub trials: usize,
    pub best: Option<FitOutcome>,
}

impl SearchState {
    pub fn new(config: &BasepackConfig) -> Self {
        Self {
            quality: ParamRange::new(config.min_quality, config.optimistic_quality),
            scale: ParamRange::new(config.min_scale, 1.0),
            trials: 0,
            best: None,
        }
    }
}

//==================================================================================
// 4. Unit Tests
//==================================================================================
