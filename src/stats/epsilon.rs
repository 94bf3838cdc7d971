/// Uniform-deviation bound for the VC-dimension method (Löffler & Phillips),
/// given a (bound on the) VC dimension `v` of the transaction/itemset range
/// space.
///
/// `n` is the sample size, `delta` the allowed failure probability.
///
/// # Contract
///
/// `n > 0`, `delta` in `(0, 1)`, `v >= 1`. Violations are programmer errors:
/// callers are expected to have validated the dataset and confidence budget
/// already.
pub fn eps_vc(delta: f64, n: u64, v: f64) -> f64 {
    assert!(n > 0, "eps_vc requires n > 0");
    assert!(delta > 0.0 && delta < 1.0, "eps_vc requires delta in (0,1), got {delta}");
    assert!(v >= 1.0, "eps_vc requires v >= 1, got {v}");
    ((0.5 / n as f64) * (v + (1.0 / delta).ln())).sqrt()
}

/// Uniform-deviation bound driven directly by a shatter-coefficient bound
/// `bound` (rather than a VC-dimension bound), following Riondato & Upfal's
/// empirical-VC-dimension sample complexity bound.
///
/// `max_freq` is the largest frequency among the itemsets under test: the
/// bound scales with it, since low-frequency itemsets contribute less
/// variance to the uniform deviation.
///
/// # Contract
///
/// `n > 0`, `delta` in `(0, 1)`, `bound >= 0`, `max_freq` in `[0, 1]`.
pub fn eps_shatter(delta: f64, n: u64, bound: f64, max_freq: f64) -> f64 {
    assert!(n > 0, "eps_shatter requires n > 0");
    assert!(delta > 0.0 && delta < 1.0, "eps_shatter requires delta in (0,1), got {delta}");
    assert!(bound >= 0.0, "eps_shatter requires bound >= 0, got {bound}");
    assert!((0.0..=1.0).contains(&max_freq), "eps_shatter requires max_freq in [0,1], got {max_freq}");
    2.0 * (max_freq * 2.0 * bound / n as f64).sqrt() + ((2.0 / delta).ln() * 2.0 / n as f64).sqrt()
}

/// `eps_shatter` specialized to an empirical VC-dimension estimate
/// `emp_vc_dim`, via the `d * ln(n+1)` shatter-coefficient bound that holds
/// for any range space of VC dimension `d`.
///
/// # Contract
///
/// Same as `eps_shatter`, plus `emp_vc_dim >= 1`.
pub fn eps_emp_vc(delta: f64, n: u64, emp_vc_dim: f64, max_freq: f64) -> f64 {
    assert!(emp_vc_dim >= 1.0, "eps_emp_vc requires emp_vc_dim >= 1, got {emp_vc_dim}");
    let bound = emp_vc_dim * ((n + 1) as f64).ln();
    eps_shatter(delta, n, bound, max_freq)
}
