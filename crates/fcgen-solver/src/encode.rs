//! One-hot CNF encoding primitives.
//!
//! Small bounded integers become one-hot variable groups with exactly-one
//! structural clauses (at-least-one plus pairwise at-most-one); booleans are
//! single variables. Everything the block-cover model needs fits in these
//! two shapes.

use varisat::{Lit, Var};

/// Hands out fresh SAT variable indices.
#[derive(Debug, Default)]
pub struct VarAlloc {
    next: usize,
}

impl VarAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> Var {
        let var = Var::from_index(self.next);
        self.next += 1;
        var
    }

    /// Number of variables allocated so far.
    pub fn var_count(&self) -> usize {
        self.next
    }
}

/// A bounded integer in `lo..=hi`, one-hot encoded.
#[derive(Debug, Clone)]
pub struct IntVar {
    lo: u64,
    vars: Vec<Var>,
}

impl IntVar {
    /// Allocate the variable group and push its exactly-one clauses.
    pub fn new(alloc: &mut VarAlloc, lo: u64, hi: u64, clauses: &mut Vec<Vec<Lit>>) -> Self {
        debug_assert!(lo <= hi);
        let vars: Vec<Var> = (lo..=hi).map(|_| alloc.fresh()).collect();

        // At-least-one.
        clauses.push(vars.iter().map(|v| v.positive()).collect());
        // Pairwise at-most-one.
        for i in 0..vars.len() {
            for j in (i + 1)..vars.len() {
                clauses.push(vec![vars[i].negative(), vars[j].negative()]);
            }
        }

        Self { lo, vars }
    }

    pub fn lo(&self) -> u64 {
        self.lo
    }

    pub fn hi(&self) -> u64 {
        self.lo + self.vars.len() as u64 - 1
    }

    /// All values in the range.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.lo()..=self.hi()
    }

    /// Literal asserting this integer equals `value`. Panics if `value`
    /// lies outside `lo..=hi`; callers only pass in-range values.
    pub fn lit_eq(&self, value: u64) -> Lit {
        self.vars[(value - self.lo) as usize].positive()
    }

    /// Literal asserting this integer differs from `value`.
    pub fn lit_neq(&self, value: u64) -> Lit {
        !self.lit_eq(value)
    }

    /// The underlying variable group, in value order.
    pub fn vars(&self) -> &[Var] {
        &self.vars
    }

    /// Read the value off a satisfying assignment. With intact exactly-one
    /// clauses exactly one variant is true; the low bound is a fallback.
    pub fn decode(&self, is_true: &dyn Fn(Var) -> bool) -> u64 {
        for (offset, var) in self.vars.iter().enumerate() {
            if is_true(*var) {
                return self.lo + offset as u64;
            }
        }
        self.lo
    }
}

/// Add clauses forcing `a <= b`, each weakened by the given guard literals
/// (any guard literal being true discharges the constraint).
pub fn le_under(clauses: &mut Vec<Vec<Lit>>, guard: &[Lit], a: &IntVar, b: &IntVar) {
    for va in a.values() {
        for vb in b.values() {
            if va > vb {
                let mut clause = guard.to_vec();
                clause.push(a.lit_neq(va));
                clause.push(b.lit_neq(vb));
                clauses.push(clause);
            }
        }
    }
}
