/// Constraint direction: greater-or-equal or less-or-equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Ge,
    Le,
}

/// A linear combination of problem variables, `Σ coef_i * x_i`.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    pub terms: Vec<(usize, f64)>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    pub fn term(mut self, var: usize, coef: f64) -> Self {
        self.terms.push((var, coef));
        self
    }
}

/// A single linear constraint, `expr sense rhs`.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub expr: LinearExpr,
    pub sense: Sense,
    pub rhs: f64,
}

/// A binary-variable MILP: maximise a linear objective subject to linear
/// constraints, all decision variables in `{0, 1}`.
///
/// Solver-agnostic: `tfi::milp::Solver` implementations translate this into
/// whatever representation their backend needs.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub num_variables: usize,
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new binary variable, returning its index for use in
    /// objective terms and constraints.
    pub fn add_variable(&mut self) -> usize {
        let idx = self.num_variables;
        self.num_variables += 1;
        idx
    }

    pub fn add_objective_term(&mut self, var: usize, coef: f64) {
        self.objective.terms.push((var, coef));
    }

    pub fn add_constraint(&mut self, expr: LinearExpr, sense: Sense, rhs: f64) {
        self.constraints.push(Constraint { expr, sense, rhs });
    }
}

/// What a solver reports back: the status it terminated in, the best
/// objective value found, and its relative optimality gap.
///
/// The driver never requires `status` to indicate proven optimality; it
/// always inflates `best_objective` by `1 + relative_gap` to get a sound
/// upper bound (§6).
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub status: String,
    pub best_objective: f64,
    pub relative_gap: f64,
}

impl Solution {
    /// `⌊best_objective * (1 + relative_gap)⌋`, the sound upper bound on
    /// the true optimum that the driver derives `vcdim` from.
    pub fn upper_bound(&self) -> u64 {
        (self.best_objective * (1.0 + self.relative_gap)).floor() as u64
    }
}
