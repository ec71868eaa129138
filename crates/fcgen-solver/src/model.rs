//! CNF rendition of the block-cover model.
//!
//! A fixed parameterized model: up to [`MAX_BLOCKS`] block slots forming a
//! tree rooted at the anchor block, per-block epochs and justification
//! markers, the store's current and justified epochs, a target block, and
//! the target's voting-source epoch. The four predicate flags arrive as
//! Rust-side inputs and are switched directly into clauses rather than
//! encoded as SAT variables.
//!
//! Decode always fills all [`MAX_BLOCKS`] array slots; slots above
//! `max_block` hold canonical padding, and the caller truncates.

use fcgen_model::{PredicateTuple, RawSolution};
use varisat::{Lit, Var};

use crate::encode::{le_under, IntVar, VarAlloc};
use crate::SolverError;

/// Block slots in the fixed model. Solutions use between 2 and 4 of them.
pub const MAX_BLOCKS: usize = 4;

/// Highest epoch the model can represent.
pub const MAX_EPOCH: u64 = 6;

/// Highest caller anchor epoch for which every feasible tuple still has
/// solutions: `block_vse_plus_two_ge_curr_e = false` needs three epochs of
/// headroom above the voting source, and the voting source never precedes
/// the anchor. Higher anchors still encode (up to [`MAX_EPOCH`]) but some
/// tuples become unsatisfiable and legitimately yield zero solutions.
pub const MAX_ANCHOR_EPOCH: u64 = 3;

/// All SAT structure for one (tuple, anchor epoch) instantiation.
pub struct BlockCoverModel {
    epochs: Vec<IntVar>,
    /// Parent choice for blocks 1..MAX_BLOCKS; block i may pick any id < i.
    parents: Vec<IntVar>,
    prevs: Vec<Var>,
    currs: Vec<Var>,
    max_block: IntVar,
    target: IntVar,
    curr_e: IntVar,
    store_je: IntVar,
    clauses: Vec<Vec<Lit>>,
    var_count: usize,
}

impl BlockCoverModel {
    pub fn clauses(&self) -> &[Vec<Lit>] {
        &self.clauses
    }

    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Variables that distinguish one reported solution from another.
    ///
    /// Blocking clauses are restricted to these; auxiliary and derived
    /// variables (activity bits, witness and edge selectors, the voting
    /// source itself) do not appear in the decoded output and must not
    /// spawn duplicate raw solutions.
    pub fn solution_vars(&self) -> Vec<Var> {
        let mut vars = Vec::new();
        for e in &self.epochs {
            vars.extend_from_slice(e.vars());
        }
        for p in &self.parents {
            vars.extend_from_slice(p.vars());
        }
        vars.extend_from_slice(&self.prevs);
        vars.extend_from_slice(&self.currs);
        vars.extend_from_slice(self.max_block.vars());
        vars.extend_from_slice(self.target.vars());
        vars.extend_from_slice(self.curr_e.vars());
        vars.extend_from_slice(self.store_je.vars());
        vars
    }

    /// Read a raw solution off a satisfying assignment.
    pub fn decode(&self, model: &[Lit]) -> RawSolution {
        let truth: std::collections::HashSet<usize> = model
            .iter()
            .filter(|l| l.is_positive())
            .map(|l| l.var().index())
            .collect();
        let is_true = move |v: Var| truth.contains(&v.index());
        let is_true: &dyn Fn(Var) -> bool = &is_true;

        let mut parents = Vec::with_capacity(MAX_BLOCKS);
        parents.push(0); // block 0 has no parent
        for p in &self.parents {
            parents.push(p.decode(is_true) as usize);
        }

        RawSolution {
            max_block: self.max_block.decode(is_true) as usize,
            es: self.epochs.iter().map(|e| e.decode(is_true)).collect(),
            parents,
            prevs: self.prevs.iter().map(|&v| is_true(v)).collect(),
            currs: self.currs.iter().map(|&v| is_true(v)).collect(),
            curr_e: self.curr_e.decode(is_true),
            store_je: self.store_je.decode(is_true),
            target_block: self.target.decode(is_true) as usize,
        }
    }
}

/// Encode the fixed model for one predicate tuple and resolved anchor epoch.
pub fn encode(tuple: &PredicateTuple, anchor_epoch: u64) -> Result<BlockCoverModel, SolverError> {
    if anchor_epoch > MAX_EPOCH {
        return Err(SolverError::Communication(format!(
            "anchor epoch {anchor_epoch} outside model range 0..={MAX_EPOCH}"
        )));
    }

    let mut alloc = VarAlloc::new();
    let mut clauses: Vec<Vec<Lit>> = Vec::new();

    let epochs: Vec<IntVar> = (0..MAX_BLOCKS)
        .map(|_| IntVar::new(&mut alloc, 0, MAX_EPOCH, &mut clauses))
        .collect();
    let parents: Vec<IntVar> = (1..MAX_BLOCKS)
        .map(|i| IntVar::new(&mut alloc, 0, (i - 1) as u64, &mut clauses))
        .collect();
    let prevs: Vec<Var> = (0..MAX_BLOCKS).map(|_| alloc.fresh()).collect();
    let currs: Vec<Var> = (0..MAX_BLOCKS).map(|_| alloc.fresh()).collect();
    let active: Vec<Var> = (0..MAX_BLOCKS).map(|_| alloc.fresh()).collect();
    let max_block = IntVar::new(&mut alloc, 1, (MAX_BLOCKS - 1) as u64, &mut clauses);
    let target = IntVar::new(&mut alloc, 0, (MAX_BLOCKS - 1) as u64, &mut clauses);
    let curr_e = IntVar::new(&mut alloc, 0, MAX_EPOCH, &mut clauses);
    let store_je = IntVar::new(&mut alloc, 0, MAX_EPOCH, &mut clauses);
    let vse = IntVar::new(&mut alloc, 0, MAX_EPOCH, &mut clauses);

    let parent_of = |i: usize| &parents[i - 1];

    // Anchor block: pinned epoch, justified at the anchor.
    clauses.push(vec![epochs[0].lit_eq(anchor_epoch)]);
    clauses.push(vec![currs[0].positive()]);

    // Activity follows max_block. Blocks 0 and 1 always exist.
    clauses.push(vec![active[0].positive()]);
    clauses.push(vec![active[1].positive()]);
    for i in 2..MAX_BLOCKS {
        // active[i] <-> max_block >= i
        let mut at_least = vec![active[i].negative()];
        for k in i as u64..=max_block.hi() {
            at_least.push(max_block.lit_eq(k));
            clauses.push(vec![max_block.lit_neq(k), active[i].positive()]);
        }
        clauses.push(at_least);
    }

    // Slots above max_block hold canonical padding.
    for i in 2..MAX_BLOCKS {
        clauses.push(vec![active[i].positive(), parent_of(i).lit_eq((i - 1) as u64)]);
        clauses.push(vec![active[i].positive(), epochs[i].lit_eq(anchor_epoch)]);
        clauses.push(vec![active[i].positive(), currs[i].negative()]);
        clauses.push(vec![active[i].positive(), prevs[i].negative()]);
    }

    // Active blocks sit between the anchor epoch and the current epoch.
    for i in 0..MAX_BLOCKS {
        for v in 0..anchor_epoch {
            clauses.push(vec![active[i].negative(), epochs[i].lit_neq(v)]);
        }
        le_under(&mut clauses, &[active[i].negative()], &epochs[i], &curr_e);
    }

    // Epochs never decrease along a parent edge.
    for i in 1..MAX_BLOCKS {
        for j in 0..i {
            le_under(
                &mut clauses,
                &[active[i].negative(), parent_of(i).lit_neq(j as u64)],
                &epochs[j],
                &epochs[i],
            );
        }
    }

    // Store bounds: anchor <= store_je <= curr_e.
    for v in 0..anchor_epoch {
        clauses.push(vec![store_je.lit_neq(v)]);
    }
    le_under(&mut clauses, &[], &store_je, &curr_e);

    // Voting source bounds: anchor <= vse <= curr_e, and vse <= target's epoch.
    for v in 0..anchor_epoch {
        clauses.push(vec![vse.lit_neq(v)]);
    }
    le_under(&mut clauses, &[], &vse, &curr_e);
    for b in 0..MAX_BLOCKS {
        le_under(&mut clauses, &[target.lit_neq(b as u64)], &vse, &epochs[b]);
    }

    // The target is a populated block.
    for b in 0..MAX_BLOCKS {
        clauses.push(vec![target.lit_neq(b as u64), active[b].positive()]);
    }

    // The voting source is witnessed by an active block carrying a
    // current-epoch justification at that epoch (the anchor block always
    // qualifies at the anchor epoch).
    let mut witness_any: Vec<Lit> = Vec::new();
    for j in 0..MAX_BLOCKS {
        for v in 0..=MAX_EPOCH {
            let w = alloc.fresh();
            clauses.push(vec![w.negative(), active[j].positive()]);
            clauses.push(vec![w.negative(), currs[j].positive()]);
            clauses.push(vec![w.negative(), epochs[j].lit_eq(v)]);
            clauses.push(vec![w.negative(), vse.lit_eq(v)]);
            witness_any.push(w.positive());
        }
    }
    clauses.push(witness_any);

    // has_child[b] <-> some active block names b as its parent.
    let mut has_child: Vec<Var> = Vec::with_capacity(MAX_BLOCKS);
    for b in 0..MAX_BLOCKS {
        let h = alloc.fresh();
        let mut any: Vec<Lit> = vec![h.negative()];
        for i in (b + 1)..MAX_BLOCKS {
            let edge = alloc.fresh();
            clauses.push(vec![edge.negative(), active[i].positive()]);
            clauses.push(vec![edge.negative(), parent_of(i).lit_eq(b as u64)]);
            clauses.push(vec![
                active[i].negative(),
                parent_of(i).lit_neq(b as u64),
                edge.positive(),
            ]);
            clauses.push(vec![edge.negative(), h.positive()]);
            any.push(edge.positive());
        }
        clauses.push(any);
        has_child.push(h);
    }

    // The four predicate flags, switched directly into clauses.
    if tuple.store_je_eq_zero {
        clauses.push(vec![store_je.lit_eq(0)]);
    } else {
        clauses.push(vec![store_je.lit_neq(0)]);
    }

    if tuple.block_vse_eq_store_je {
        for v in 0..=MAX_EPOCH {
            clauses.push(vec![vse.lit_neq(v), store_je.lit_eq(v)]);
            clauses.push(vec![vse.lit_eq(v), store_je.lit_neq(v)]);
        }
    } else {
        for v in 0..=MAX_EPOCH {
            clauses.push(vec![vse.lit_neq(v), store_je.lit_neq(v)]);
        }
    }

    for v in 0..=MAX_EPOCH {
        for c in 0..=MAX_EPOCH {
            let within_two = c <= v + 2;
            if within_two != tuple.block_vse_plus_two_ge_curr_e {
                clauses.push(vec![vse.lit_neq(v), curr_e.lit_neq(c)]);
            }
        }
    }

    for b in 0..MAX_BLOCKS {
        let h = if tuple.block_is_leaf {
            has_child[b].negative()
        } else {
            has_child[b].positive()
        };
        clauses.push(vec![target.lit_neq(b as u64), h]);
    }

    Ok(BlockCoverModel {
        epochs,
        parents,
        prevs,
        currs,
        max_block,
        target,
        curr_e,
        store_je,
        clauses,
        var_count: alloc.var_count(),
    })
}
