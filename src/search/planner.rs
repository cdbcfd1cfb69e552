// In: src/search/planner.rs

//! The adaptive budget search for basepack.
//!
//! This module is the "smart" engine responsible for finding a (quality,
//! scale) point whose rendered-then-encoded form fits the symbol budget while
//! giving up as little fidelity as possible. It operates in three phases:
//! 1. An optimistic full-fidelity attempt (the common case for small images).
//! 2. A bounded joint bisection of the quality and scale ranges.
//! 3. A local upward hill-climb from the bisection's best feasible point.
//!
//! Every trial is empirical: render through the oracle, encode through the
//! codec, compare symbol counts against the budget. Trials are strictly
//! sequential; each bound update depends on the previous outcome.

use std::sync::Arc;

use crate::codec::RadixCodec;
use crate::config::BasepackConfig;
use crate::error::BasepackError;
use crate::formats;
use crate::oracle::{ImageSource, RenderOracle, RenderRequest};
use crate::search::models::{FitOutcome, RenderParams, SearchState};

//==================================================================================
// 1. Trial Evaluation
//==================================================================================

/// Renders one parameter point and encodes the result. This is the search's
/// only suspension point.
fn evaluate_trial(
    oracle: &dyn RenderOracle,
    codec: &RadixCodec,
    image: &ImageSource,
    params: &RenderParams,
    state: &mut SearchState,
) -> Result<FitOutcome, BasepackError> {
    state.trials += 1;
    let request = params.to_request(image);
    let rendered = oracle.render(image, &request)?;
    let estimate = codec.estimate_encoded_len(rendered.len());
    let outcome = FitOutcome {
        params: params.clone(),
        rendered_len: rendered.len(),
        encoded: codec.encode(&rendered),
    };
    log::info!(
        "  - Trial q={:.3} s={:.3} | rendered {} bytes | Score (symbols): {} (estimate <= {})",
        params.quality,
        params.scale_x,
        outcome.rendered_len,
        outcome.encoded_len(),
        estimate,
    );
    Ok(outcome)
}

//==================================================================================
// 2. Format Selection
//==================================================================================

/// Renders the image once per structurally recompressible candidate at the
/// optimistic quality and picks the format producing the smallest output.
/// This is a static filter plus one comparison pass, not a search: rejected
/// renders are skipped, and if nothing renders the first candidate wins.
/// Returns `None` only for an empty candidate list.
pub fn detect_optimal_format(
    oracle: &dyn RenderOracle,
    image: &ImageSource,
    candidates: &[String],
    config: &BasepackConfig,
) -> Option<String> {
    let (first, rest) = candidates.split_first()?;
    if rest.is_empty() {
        return Some(first.clone());
    }

    log::debug!(
        "--- FORMAT SELECTION over {} candidates ---",
        candidates.len()
    );
    let mut best: Option<(usize, &String)> = None;
    for mime in candidates {
        if !formats::is_recompressible(mime) {
            log::debug!("  - Candidate: {:<20} | skipped (not recompressible)", mime);
            continue;
        }
        let request = RenderRequest {
            format: mime.clone(),
            quality: config.optimistic_quality,
            width: image.width,
            height: image.height,
        };
        match oracle.render(image, &request) {
            Ok(bytes) => {
                log::debug!("  - Candidate: {:<20} | {} bytes", mime, bytes.len());
                if best.map_or(true, |(len, _)| bytes.len() < len) {
                    best = Some((bytes.len(), mime));
                }
            }
            Err(err) => {
                log::debug!("  - Candidate: {:<20} | FAILED TO RENDER ({})", mime, err);
            }
        }
    }

    Some(best.map_or_else(|| first.clone(), |(_, mime)| mime.clone()))
}

//==================================================================================
// 3. Phase 2: Bounded Joint Bisection
//==================================================================================

/// Joint bisection over quality and scale: both knobs move to their range
/// midpoints together. Bounds only tighten, never widen: a feasible midpoint
/// raises the lower bounds, an infeasible one (including an oracle-rejected
/// render) lowers the upper bounds. Fails with `CompressionExhausted` when no
/// round finds a feasible point.
fn bisect_jointly(
    oracle: &dyn RenderOracle,
    codec: &RadixCodec,
    image: &ImageSource,
    budget: usize,
    format: &str,
    state: &mut SearchState,
    config: &BasepackConfig,
) -> Result<FitOutcome, BasepackError> {
    for round in 0..config.max_bisect_rounds {
        let mid_quality = state.quality.mid();
        let mid_scale = state.scale.mid();
        let params = RenderParams {
            format: format.to_string(),
            quality: mid_quality,
            scale_x: mid_scale,
            scale_y: mid_scale,
        };

        match evaluate_trial(oracle, codec, image, &params, state) {
            Ok(outcome) if outcome.encoded_len() <= budget => {
                log::debug!("round {}: feasible, raising lower bounds", round);
                state.quality.lo = mid_quality;
                state.scale.lo = mid_scale;
                state.best = Some(outcome);
            }
            Ok(_) => {
                log::debug!("round {}: oversize, lowering upper bounds", round);
                state.quality.hi = mid_quality;
                state.scale.hi = mid_scale;
            }
            Err(err) => {
                // A rejected render is an infeasible point, not an outage.
                log::debug!(
                    "round {}: render rejected ({}), lowering upper bounds",
                    round,
                    err
                );
                state.quality.hi = mid_quality;
                state.scale.hi = mid_scale;
            }
        }

        if state.quality.width() < config.converge_epsilon
            && state.scale.width() < config.converge_epsilon
        {
            log::debug!("bounds converged after {} round(s)", round + 1);
            break;
        }
    }

    state
        .best
        .take()
        .ok_or(BasepackError::CompressionExhausted {
            budget,
            trials: state.trials,
        })
}

//==================================================================================
// 4. Phase 3: Upward Refinement
//==================================================================================

/// Local hill-climb from a feasible point, step sizes smallest first. Per
/// step size: trial a quality-only raise and a scale-only raise (capped at
/// the optimistic quality and full scale), adopt whichever feasible
/// candidate encodes shorter (ties go to the quality raise), and repeat at
/// the same step size until neither raise stays within budget. The working
/// point is only ever replaced by a feasible candidate, and the refined best
/// is always handed back to the caller.
fn climb_upward(
    oracle: &dyn RenderOracle,
    codec: &RadixCodec,
    image: &ImageSource,
    budget: usize,
    mut best: FitOutcome,
    state: &mut SearchState,
    config: &BasepackConfig,
) -> FitOutcome {
    for &step in &config.climb_steps {
        loop {
            let mut candidates = Vec::new();

            let quality_up = (best.params.quality + step).min(config.optimistic_quality);
            if quality_up > best.params.quality {
                let params = RenderParams {
                    quality: quality_up,
                    ..best.params.clone()
                };
                match evaluate_trial(oracle, codec, image, &params, state) {
                    Ok(outcome) if outcome.encoded_len() <= budget => candidates.push(outcome),
                    Ok(_) => {}
                    Err(err) => log::debug!("step {:.2}: quality raise rejected ({})", step, err),
                }
            }

            let scale_up = (best.params.scale_x + step).min(1.0);
            if scale_up > best.params.scale_x {
                let params = RenderParams {
                    scale_x: scale_up,
                    scale_y: scale_up,
                    ..best.params.clone()
                };
                match evaluate_trial(oracle, codec, image, &params, state) {
                    Ok(outcome) if outcome.encoded_len() <= budget => candidates.push(outcome),
                    Ok(_) => {}
                    Err(err) => log::debug!("step {:.2}: scale raise rejected ({})", step, err),
                }
            }

            // min_by_key keeps the first of equals: the quality raise.
            let Some(winner) = candidates.into_iter().min_by_key(|o| o.encoded_len()) else {
                break;
            };
            log::debug!(
                "step {:.2}: climbed to q={:.3} s={:.3} ({} symbols)",
                step,
                winner.params.quality,
                winner.params.scale_x,
                winner.encoded_len()
            );
            best = winner;
        }
    }
    best
}

//==================================================================================
// 5. Top-Level Public API
//==================================================================================

/// Searches (quality, scale) for a re-encoding of `image` whose encoded form
/// fits within `budget` alphabet symbols, maximizing fidelity among feasible
/// points.
///
/// Oracle rejections along the way are absorbed as infeasible trials; the
/// only terminal failure is `CompressionExhausted`, raised when no phase
/// found a feasible point within its iteration ceiling.
pub fn plan_fit(
    oracle: &dyn RenderOracle,
    codec: &RadixCodec,
    image: &ImageSource,
    budget: usize,
    candidate_formats: &[String],
    config: &Arc<BasepackConfig>,
) -> Result<FitOutcome, BasepackError> {
    let Some(format) = detect_optimal_format(oracle, image, candidate_formats, config) else {
        return Err(BasepackError::CompressionExhausted { budget, trials: 0 });
    };

    let mut state = SearchState::new(config);
    log::debug!(
        "planning fit: {}x{} image into {} symbols as {}",
        image.width,
        image.height,
        budget,
        format
    );

    // --- Phase 1: optimistic full-fidelity attempt ---
    let optimistic = RenderParams {
        format: format.clone(),
        quality: config.optimistic_quality,
        scale_x: 1.0,
        scale_y: 1.0,
    };
    let phase1 = match evaluate_trial(oracle, codec, image, &optimistic, &mut state) {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            log::warn!("optimistic render rejected, continuing: {}", err);
            None
        }
    };
    if let Some(outcome) = phase1.as_ref().filter(|o| o.encoded_len() <= budget) {
        log::debug!(
            "phase 1 fits the budget, search complete after {} trial(s)",
            state.trials
        );
        return Ok(outcome.clone());
    }

    // --- Phase 2: narrow the upper bounds for bad overage, then bisect ---
    if let Some(outcome) = &phase1 {
        let overage = outcome.encoded_len() as f64 / (0.95 * budget as f64);
        // Steeper initial cuts for worse overage.
        if overage > 4.0 {
            state.quality.hi = 0.7;
            state.scale.hi = 0.7;
        } else if overage > 2.0 {
            state.quality.hi = 0.8;
            state.scale.hi = 0.8;
        }
        log::debug!(
            "phase 2: overage ratio {:.2}, quality <= {:.2}, scale <= {:.2}",
            overage,
            state.quality.hi,
            state.scale.hi
        );
    }
    let coarse = bisect_jointly(oracle, codec, image, budget, &format, &mut state, config)?;

    // --- Phase 3: refine upward from the coarse feasible point ---
    let refined = climb_upward(oracle, codec, image, budget, coarse, &mut state, config);
    log::debug!(
        "search complete after {} trials: q={:.3} s={:.3}, {} symbols",
        state.trials,
        refined.params.quality,
        refined.params.scale_x,
        refined.encoded_len()
    );
    Ok(refined)
}
