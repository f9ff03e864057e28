//! Tests for block-deletion recovery

#[cfg(test)]
mod tests {
    use sockettile::algorithm::cancellation::Cancellation;
    use sockettile::algorithm::constraint::ConstraintEvaluator;
    use sockettile::algorithm::deadlock::BlockDeletion;
    use sockettile::algorithm::outcome::SolveOutcome;
    use sockettile::algorithm::selection::{RandomSource, SeededSelector};
    use sockettile::io::configuration::MAX_BLOCK_RADIUS;
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

    // Tests the radius must be positive and bounded
    // Verified by accepting a zero radius
    #[test]
    fn test_radius_validation() {
        let catalog = chain_catalog();
        assert!(BlockDeletion::new(&catalog, 3, 1, '3', 0, 10).is_err());
        assert!(BlockDeletion::new(&catalog, 3, 1, '3', MAX_BLOCK_RADIUS + 1, 10).is_err());
        assert!(BlockDeletion::new(&catalog, 3, 1, '3', MAX_BLOCK_RADIUS, 10).is_ok());
    }

    // Tests a contradiction clears only the block around it
    // Verified by clearing the whole grid on contradiction
    #[test]
    fn test_contradiction_clears_block() {
        let catalog = chain_catalog();
        let mut blocks = BlockDeletion::new(&catalog, 3, 1, '3', 1, 10).unwrap();
        blocks.start_at([0, 0]).unwrap();
        let mut source = Scripted { picks: vec![0, 0] };

        // A at [0, 0], B at [0, 1], nothing fits at [0, 2]
        for _ in 0..3 {
            assert_eq!(blocks.step(&mut source).unwrap(), None);
        }

        assert_eq!(blocks.stats().block_clears, 1);
        assert_eq!(blocks.grid().get([0, 0]), Some(0));
        assert_eq!(blocks.grid().get([0, 1]), None);
        assert_eq!(blocks.grid().get([0, 2]), None);
        assert_eq!(blocks.radius_at([0, 2]), 2);
        assert_eq!(blocks.radius_at([0, 1]), 1);
    }

    // Tests repeated clears at one cell widen the block up to the maximum
    // Verified by keeping the base radius on repeats
    #[test]
    fn test_clear_block_radius_grows() {
        let catalog = TileCatalog::from_literals(2, ["    "]).unwrap();
        let mut blocks = BlockDeletion::new(&catalog, 20, 20, '3', 2, 100).unwrap();

        let radii: Vec<_> = (0..6).map(|_| blocks.clear_block([10, 10]).radius).collect();
        assert_eq!(radii, vec![2, 3, 4, 5, 6, 6]);
        assert_eq!(blocks.stats().block_clears, 6);
    }

    // Tests the clear report lists exactly the cells that held tiles
    // Verified by reporting every cell of the block
    #[test]
    fn test_clear_block_reports_cleared_cells() {
        let catalog = TileCatalog::from_literals(2, ["    "]).unwrap();
        let mut blocks = BlockDeletion::new(&catalog, 4, 4, '3', 1, 100).unwrap();
        blocks.start_at([0, 0]).unwrap();
        let outcome = blocks
            .solve(&mut SeededSelector::new(4), &Cancellation::new())
            .unwrap();
        assert!(outcome.is_solved());

        let clear = blocks.clear_block([0, 0]);
        assert_eq!(clear.center, [0, 0]);
        assert_eq!(clear.radius, 1);
        assert_eq!(clear.cleared, vec![[0, 0], [0, 1], [1, 0], [1, 1]]);
        assert_eq!(blocks.grid().filled_count(), 12);
    }

    // Tests the run gives up with a partial grid once the clear budget is spent
    // Verified by clearing past the budget
    #[test]
    fn test_budget_exhaustion_is_incomplete() {
        let catalog = chain_catalog();
        let mut blocks = BlockDeletion::new(&catalog, 3, 1, '3', 1, 2).unwrap();
        blocks.start_at([0, 0]).unwrap();

        // Always picking the first tile repeats A, B and the dead end forever
        let mut source = Scripted { picks: Vec::new() };
        let outcome = blocks.solve(&mut source, &Cancellation::new()).unwrap();

        assert!(matches!(outcome, SolveOutcome::Incomplete(_)));
        assert_eq!(blocks.stats().block_clears, 2);
    }

    // Tests clearing lets a random run escape a dead end and finish consistently
    // Verified by never enqueueing the block boundary
    #[test]
    fn test_recovers_to_consistent_tiling() {
        let catalog = chain_catalog();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut blocks = BlockDeletion::new(&catalog, 3, 1, '3', 1, 1_000).unwrap();
        blocks.start_at([0, 0]).unwrap();

        let outcome = blocks
            .solve(&mut SeededSelector::new(17), &Cancellation::new())
            .unwrap();
        let solution = outcome.solution().unwrap();
        assert!(evaluator.is_consistent(&solution.to_grid()));
    }
}
