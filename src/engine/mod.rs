//! The three TFI certification engines (§4.5–4.7), each a pure function
//! from (observed supports, dataset statistics, confidence/threshold
//! parameters) to (certified TFIs, diagnostics).

pub mod binomial;
pub mod holdout;
pub mod vc;

pub use binomial::{binomial_tfi, BinomialDiagnostics, BinomialParams};
pub use holdout::{holdout_tfi, FilterParam, HoldoutDiagnostics, HoldoutParams};
pub use vc::{vc_tfi, VcDiagnostics, VcParams};

use crate::stats::{pvalue, PValueMode};

/// Dispatches to `pvalue`, but enforces the `s > n*p` precondition the
/// Chernoff bounds carry (§4.1): below that point the closed-form bound
/// doesn't apply, so this reports "definitely reject" rather than handing
/// the formula a support it isn't valid for. `Exact` has no such
/// precondition.
pub fn pvalue_guarded(mode: PValueMode, s: f64, n: u64, p: f64) -> f64 {
    match mode {
        PValueMode::Exact => pvalue(mode, s, n, p),
        PValueMode::Chernoff | PValueMode::WeakChernoff => {
            if s <= p * n as f64 {
                f64::INFINITY
            } else {
                pvalue(mode, s, n, p)
            }
        }
    }
}

/// Splits a top-level confidence budget across `k` independent phases:
/// `δᵢ = 1 − (1−δ)^(1/k)`.
pub fn split_confidence(delta: f64, k: u32) -> f64 {
    assert!(delta > 0.0 && delta < 1.0, "delta must be in (0,1), got {delta}");
    assert!(k >= 1, "split_confidence requires k >= 1");
    1.0 - (1.0 - delta).powf(1.0 / k as f64)
}

/// Bisects the frequency axis between `non_accepted` (known to fail the
/// `critical` threshold) and `accepted` (known to pass) down to a width of
/// `1e-5`, the resolution named in §4.5/§4.6. Returns the midpoint of the
/// final bracket minus `theta`, i.e. the reported `epsilon`.
pub fn binary_search_epsilon(
    mode: PValueMode,
    n: u64,
    p0: f64,
    theta: f64,
    critical: f64,
    mut non_accepted: f64,
    mut accepted: f64,
) -> f64 {
    const RESOLUTION: f64 = 1e-5;
    while accepted - non_accepted > RESOLUTION {
        let mid = non_accepted + (accepted - non_accepted) / 2.0;
        let test_support = mid * n as f64;
        if pvalue_guarded(mode, test_support, n, p0) <= critical {
            accepted = mid;
        } else {
            non_accepted = mid;
        }
    }
    non_accepted + (accepted - non_accepted) / 2.0 - theta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_confidence_two_phases_recombine_to_the_original_delta() {
        let delta = 0.05;
        let per_phase = split_confidence(delta, 2);
        let recombined = 1.0 - (1.0 - per_phase).powi(2);
        assert!((recombined - delta).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "delta must be in")]
    fn split_confidence_rejects_delta_out_of_range() {
        split_confidence(1.5, 2);
    }
}
