// In: src/config.rs

//! The single source of truth for all basepack search configuration.
//!
//! This module defines the unified `BasepackConfig` struct, which is designed to
//! be created once at the application boundary (e.g., from a user's JSON blob)
//! and then passed down through the system via a shared, read-only
//! `Arc<BasepackConfig>`.
//!
//! This approach centralizes all settings, eliminates "prop drilling," and
//! keeps the planner's tuning knobs in one serializable place.

use serde::{Deserialize, Serialize};

use crate::error::BasepackError;

//==================================================================================
// I. The Unified BasepackConfig
//==================================================================================

/// The single, unified configuration for the budget-fitting search.
/// This struct is created once and shared throughout the system via an `Arc`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct BasepackConfig {
    /// The quality used for the optimistic first attempt and as the upper
    /// quality cap everywhere else. Raising it past 0.95 buys almost no
    /// fidelity on typical raster encoders while inflating output size.
    #[serde(default = "default_optimistic_quality")]
    pub optimistic_quality: f64,

    /// The lower quality bound of the bisection phase.
    #[serde(default = "default_min_quality")]
    pub min_quality: f64,

    /// The lower scale bound of the bisection phase.
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    /// Hard ceiling on bisection rounds. Together with the capped hill-climb
    /// this is the only guard against unbounded search time.
    #[serde(default = "default_max_bisect_rounds")]
    pub max_bisect_rounds: u32,

    /// Bisection stops early once both parameter ranges are narrower than this.
    #[serde(default = "default_converge_epsilon")]
    pub converge_epsilon: f64,

    /// Step sizes for the upward refinement phase, smallest first.
    #[serde(default = "default_climb_steps")]
    pub climb_steps: Vec<f64>,
}

impl Default for BasepackConfig {
    fn default() -> Self {
        Self {
            optimistic_quality: default_optimistic_quality(),
            min_quality: default_min_quality(),
            min_scale: default_min_scale(),
            max_bisect_rounds: default_max_bisect_rounds(),
            converge_epsilon: default_converge_epsilon(),
            climb_steps: default_climb_steps(),
        }
    }
}

impl BasepackConfig {
    /// Builds a config from a user-supplied JSON blob, filling every omitted
    /// field with its default.
    pub fn from_json(json: &str) -> Result<Self, BasepackError> {
        Ok(serde_json::from_str(json)?)
    }
}

//==================================================================================
// II. Serde Default Helpers
//==================================================================================

fn default_optimistic_quality() -> f64 {
    0.95
}

fn default_min_quality() -> f64 {
    0.1
}

fn default_min_scale() -> f64 {
    0.1
}

fn default_max_bisect_rounds() -> u32 {
    8
}

fn default_converge_epsilon() -> f64 {
    0.05
}

fn default_climb_steps() -> Vec<f64> {
    vec![0.05, 0.10, 0.20]
}

//==================================================================================
// III. Unit Tests
//==================================================================================
