use fcgen_solver::{
    lookup, BlockCoverSolver, SolverError, VarisatBlockCover, MAX_ANCHOR_EPOCH, MAX_BLOCKS,
    MAX_SOLUTIONS_PER_TUPLE,
};

use fcgen_model::{enumerate_predicates, ModelSolution, PredicateTuple};

fn tuple(sjz: bool, eq: bool, p2: bool, leaf: bool) -> PredicateTuple {
    PredicateTuple {
        store_je_eq_zero: sjz,
        block_vse_eq_store_je: eq,
        block_vse_plus_two_ge_curr_e: p2,
        block_is_leaf: leaf,
    }
}

/// Structural checks every returned solution must pass.
fn assert_well_formed(solution: &ModelSolution, tuple: &PredicateTuple, anchor_epoch: u64) {
    let n = solution.block_count();
    assert!(n >= 2 && n <= MAX_BLOCKS);
    assert_eq!(solution.block_epochs.len(), n);
    assert_eq!(solution.parents.len(), n);
    assert_eq!(solution.previous_justifications.len(), n);
    assert_eq!(solution.current_justifications.len(), n);

    // Tree shape: every non-root block points at an earlier block.
    for (i, &p) in solution.parents.iter().enumerate().skip(1) {
        assert!(p < i, "block {i} has parent {p}");
        assert!(
            solution.block_epochs[p] <= solution.block_epochs[i],
            "epoch decreases along edge {p} -> {i}"
        );
    }

    // Anchor block pinned; no block from the future.
    assert_eq!(solution.block_epochs[0], anchor_epoch);
    for &e in &solution.block_epochs {
        assert!(e <= solution.current_epoch);
    }
    assert!(solution.store_justified_epoch <= solution.current_epoch);
    assert!(solution.store_justified_epoch >= anchor_epoch);

    // Predicates verifiable from the output alone.
    assert!(solution.target_block < n);
    assert_eq!(solution.store_justified_epoch == 0, tuple.store_je_eq_zero);
    assert_eq!(solution.target_is_leaf(), tuple.block_is_leaf);
    assert_eq!(&solution.predicates, tuple);

    // The anchor always carries a current-epoch justification.
    assert!(solution.current_justifications[0]);
}

#[test]
fn test_every_feasible_tuple_has_solutions_at_anchor_zero() {
    let solver = VarisatBlockCover;
    for tuple in enumerate_predicates() {
        let anchor = tuple.resolved_anchor_epoch(0);
        let solutions = solver
            .solve(&tuple, anchor, MAX_SOLUTIONS_PER_TUPLE)
            .unwrap();
        assert!(
            !solutions.is_empty(),
            "expected solutions for {tuple:?} at anchor 0"
        );
        assert!(solutions.len() <= MAX_SOLUTIONS_PER_TUPLE);
        for s in &solutions {
            assert_well_formed(s, &tuple, anchor);
        }
    }
}

#[test]
fn test_solutions_at_nonzero_anchor() {
    let solver = VarisatBlockCover;
    for tuple in enumerate_predicates() {
        let anchor = tuple.resolved_anchor_epoch(MAX_ANCHOR_EPOCH);
        let solutions = solver
            .solve(&tuple, anchor, MAX_SOLUTIONS_PER_TUPLE)
            .unwrap();
        assert!(
            !solutions.is_empty(),
            "expected solutions for {tuple:?} at anchor {anchor}"
        );
        for s in &solutions {
            assert_well_formed(s, &tuple, anchor);
        }
    }
}

#[test]
fn test_solutions_are_pairwise_distinct() {
    let solver = VarisatBlockCover;
    let t = tuple(false, false, true, false);
    let solutions = solver.solve(&t, 0, MAX_SOLUTIONS_PER_TUPLE).unwrap();
    for i in 0..solutions.len() {
        for j in (i + 1)..solutions.len() {
            assert_ne!(solutions[i], solutions[j]);
        }
    }
}

#[test]
fn test_solving_is_deterministic() {
    let solver = VarisatBlockCover;
    let t = tuple(false, true, false, true);
    let first = solver.solve(&t, 1, MAX_SOLUTIONS_PER_TUPLE).unwrap();
    let second = solver.solve(&t, 1, MAX_SOLUTIONS_PER_TUPLE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_max_solutions_bound_respected() {
    let solver = VarisatBlockCover;
    let t = tuple(true, true, true, true);
    let solutions = solver.solve(&t, 0, 2).unwrap();
    assert!(solutions.len() <= 2);
    assert!(!solutions.is_empty());
}

#[test]
fn test_unsatisfiable_parameters_yield_empty_not_error() {
    // Above MAX_ANCHOR_EPOCH the voting source no longer has three epochs
    // of headroom, so a tuple demanding `curr_e > vse + 2` is UNSAT. That
    // is a legitimate zero-solution outcome, not an error.
    let solver = VarisatBlockCover;
    let t = tuple(false, true, false, true);
    let solutions = solver
        .solve(&t, MAX_ANCHOR_EPOCH + 1, MAX_SOLUTIONS_PER_TUPLE)
        .unwrap();
    assert!(solutions.is_empty());
}

#[test]
fn test_unrepresentable_anchor_epoch_is_an_error() {
    let solver = VarisatBlockCover;
    let t = tuple(false, true, true, true);
    let err = solver
        .solve(&t, fcgen_solver::MAX_EPOCH + 1, MAX_SOLUTIONS_PER_TUPLE)
        .unwrap_err();
    assert!(matches!(err, SolverError::Communication(_)));
}

#[test]
fn test_lookup_returns_working_backend() {
    let solver = lookup("varisat").unwrap();
    let t = tuple(true, true, false, false);
    let solutions = solver.solve(&t, 0, MAX_SOLUTIONS_PER_TUPLE).unwrap();
    assert!(!solutions.is_empty());
}

#[test]
fn test_lookup_unknown_backend() {
    match lookup("minizinc") {
        Err(SolverError::Unavailable(name)) => assert_eq!(name, "minizinc"),
        Err(other) => panic!("expected Unavailable, got {other:?}"),
        Ok(_) => panic!("minizinc should not resolve"),
    }
}

#[test]
fn test_nonzero_store_je_when_flag_false() {
    let solver = VarisatBlockCover;
    let t = tuple(false, false, true, true);
    for s in solver.solve(&t, 0, MAX_SOLUTIONS_PER_TUPLE).unwrap() {
        assert_ne!(s.store_justified_epoch, 0);
    }
}
