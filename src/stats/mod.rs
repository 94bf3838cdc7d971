//! Log-space statistics: binomial p-values, the Bonferroni union-bound
//! factor, and the three uniform-deviation (epsilon) bounds.
//!
//! Every function here works in natural-log space to avoid under/overflow
//! on datasets with millions of transactions (§4.1). Exponentiation happens
//! only at the point a human-readable number is reported.

mod epsilon;
mod pvalue;

pub use epsilon::{eps_emp_vc, eps_shatter, eps_vc};
pub use pvalue::{log_binomial, pvalue, union_bound_factor, PValueMode};
