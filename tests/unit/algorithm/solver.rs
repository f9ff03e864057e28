//! Tests for the iterative backtracking solver and its frontier bookkeeping

#[cfg(test)]
mod tests {
    use sockettile::TilingError;
    use sockettile::algorithm::cancellation::Cancellation;
    use sockettile::algorithm::constraint::ConstraintEvaluator;
    use sockettile::algorithm::outcome::SolveOutcome;
    use sockettile::algorithm::selection::{RandomSource, SeededSelector};
    use sockettile::algorithm::solver::BacktrackingSolver;
    use sockettile::io::catalog::Preset;
    use sockettile::spatial::TileCatalog;

    /// Replays a fixed list of indices, then always picks the first member
    struct Scripted {
        picks: Vec<usize>,
    }

    impl RandomSource for Scripted {
        fn choose_index(&mut self, len: usize) -> usize {
            if self.picks.is_empty() {
                0
            } else {
                self.picks.remove(0) % len.max(1)
            }
        }
    }

    /// Tiles read as (left column, right column): aa|bb, bb|cc, aa|aa
    fn chain_catalog() -> TileCatalog {
        TileCatalog::from_literals(2, ["abab", "bcbc", "aaaa"]).unwrap()
    }

    // Tests construction validates grid size and catalog
    // Verified by skipping the catalog check
    #[test]
    fn test_new_validates_inputs() {
        let catalog = chain_catalog();
        assert!(BacktrackingSolver::new(&catalog, 0, 3, '3').is_err());
        assert!(BacktrackingSolver::new(&catalog, 3, 0, '3').is_err());

        let empty = TileCatalog::new(2).unwrap();
        assert!(matches!(
            BacktrackingSolver::new(&empty, 3, 3, '3'),
            Err(TilingError::EmptyCatalog)
        ));
    }

    // Tests the start cell must be inside the grid and chosen once
    // Verified by removing the bounds check in start_at
    #[test]
    fn test_start_at_validation() {
        let catalog = chain_catalog();
        let mut solver = BacktrackingSolver::new(&catalog, 3, 1, '3').unwrap();
        assert!(solver.start_at([1, 0]).is_err());
        solver.start_at([0, 2]).unwrap();
        assert_eq!(solver.active_cell(), Some([0, 2]));
        assert_eq!(solver.depth(), 1);
        assert!(solver.start_at([0, 0]).is_err());
    }

    // Tests a single cell is solved by its first assignment
    // Verified by requiring a neighbour before reporting completion
    #[test]
    fn test_single_cell_grid() {
        let catalog = Preset::Corners.catalog().unwrap();
        let mut solver = BacktrackingSolver::new(&catalog, 1, 1, '3').unwrap();
        let mut selector = SeededSelector::new(5);
        let outcome = solver.step(&mut selector).unwrap();
        let solution = outcome.as_ref().and_then(SolveOutcome::solution).unwrap();
        assert!(solution.tile_at([0, 0]).is_some_and(|id| id < catalog.len()));
        assert_eq!(solver.stats().assignments, 1);
    }

    // Tests a dead end two cells deep is undone and the root tries another tile
    // Verified by skipping the rollback of the exhausted frame
    #[test]
    fn test_backtracks_out_of_dead_end() {
        let catalog = chain_catalog();
        let mut solver = BacktrackingSolver::new(&catalog, 3, 1, '3').unwrap();
        solver.start_at([0, 0]).unwrap();
        let mut source = Scripted {
            picks: vec![0, 0, 1, 1, 1],
        };

        let mut outcome = None;
        while outcome.is_none() {
            outcome = solver.step(&mut source).unwrap();
            assert!(solver.check_invariants());
        }

        let solution = outcome.as_ref().and_then(SolveOutcome::solution).unwrap();
        let row: Vec<_> = (0..3).map(|col| solution.tile_at([0, col])).collect();
        assert_eq!(row, vec![Some(2), Some(2), Some(2)]);

        let stats = solver.stats();
        assert_eq!(stats.backtracks, 2);
        assert_eq!(stats.assignments, 5);
        assert_eq!(stats.max_depth, 3);
    }

    // Tests rollback returns a cell to the frontier only while a neighbour covers it
    // Verified by leaving the dead-end cell on the frontier after rollback
    #[test]
    fn test_rollback_restores_frontier() {
        let catalog = chain_catalog();
        let mut solver = BacktrackingSolver::new(&catalog, 3, 1, '3').unwrap();
        solver.start_at([0, 0]).unwrap();
        let mut source = Scripted { picks: vec![0, 0] };

        // A at the root, then B at [0, 1]
        solver.step(&mut source).unwrap();
        solver.step(&mut source).unwrap();
        assert_eq!(
            solver.frontier().get([0, 2]).map(|set| set.count()),
            None,
            "the dead-end cell is the active frame, not a frontier entry"
        );

        // The empty [0, 2] is popped, then [0, 1] runs out of tiles
        solver.step(&mut source).unwrap();
        solver.step(&mut source).unwrap();

        assert_eq!(solver.depth(), 1);
        assert_eq!(solver.grid().filled_count(), 1);
        assert!(solver.frontier().contains([0, 1]));
        assert!(!solver.frontier().contains([0, 2]));
        assert_eq!(
            solver.frontier().get([0, 1]).map(|set| set.to_vec()),
            Some(vec![1])
        );
        assert!(solver.check_invariants());
    }

    // Tests an exhausted root is reported as unsatisfiable with a clean grid
    // Verified by returning Incomplete when the stack empties
    #[test]
    fn test_unsatisfiable() {
        // Right column b,d never equals left column a,c
        let catalog = TileCatalog::from_literals(2, ["abcd"]).unwrap();
        let mut solver = BacktrackingSolver::new(&catalog, 2, 1, '3').unwrap();
        let mut selector = SeededSelector::new(11);
        let outcome = solver.solve(&mut selector, &Cancellation::new()).unwrap();

        assert_eq!(outcome, SolveOutcome::Unsatisfiable);
        assert_eq!(solver.grid().filled_count(), 0);
        assert!(solver.frontier().is_empty());
        assert_eq!(solver.depth(), 0);
        assert!(solver.check_invariants());
    }

    // Tests a cancelled signal stops the search before any work
    // Verified by checking the signal only after each step
    #[test]
    fn test_cancelled_before_start() {
        let catalog = Preset::Corners.catalog().unwrap();
        let mut solver = BacktrackingSolver::new(&catalog, 8, 8, '3').unwrap();
        let cancel = Cancellation::new();
        cancel.cancel();
        let outcome = solver.solve(&mut SeededSelector::new(1), &cancel).unwrap();
        assert_eq!(outcome, SolveOutcome::Cancelled);
        assert_eq!(solver.stats().steps, 0);
    }

    // Tests every step of a corner-set solve keeps the frontier exact
    // Verified by patching only the first neighbour after a fill
    #[test]
    fn test_invariants_hold_through_solve() {
        let catalog = Preset::Corners.catalog().unwrap();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut solver = BacktrackingSolver::new(&catalog, 6, 4, '3').unwrap();
        let mut selector = SeededSelector::new(2024);

        let outcome = loop {
            if let Some(outcome) = solver.step(&mut selector).unwrap() {
                break outcome;
            }
            assert!(solver.check_invariants());
        };

        let solution = outcome.solution().unwrap();
        assert_eq!(solution.rows(), 4);
        assert_eq!(solution.cols(), 6);
        assert!(evaluator.is_consistent(&solution.to_grid()));
    }
}
