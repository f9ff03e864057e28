//! Tests for edge requirements, fit checks and grid consistency

#[cfg(test)]
mod tests {
    use sockettile::TilingError;
    use sockettile::algorithm::constraint::{ConstraintEvaluator, edges_match};
    use sockettile::io::catalog::Preset;
    use sockettile::spatial::{Direction, Grid, TileCatalog};

    fn lettered() -> TileCatalog {
        // Tile 1 has a left column c,f,i matching the right column of tile 0
        TileCatalog::from_literals(3, ["abcdefghi", "cxxfxxixx", "xxxxxxxxx"]).unwrap()
    }

    // Tests an isolated cell requires wildcards on every side
    // Verified by treating out-of-bounds neighbours as blank tiles
    #[test]
    fn test_unconstrained_requirement() {
        let catalog = lettered();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let grid = Grid::new(2, 2);
        let requirement = evaluator.required_sockets(&grid, [0, 0]);
        assert_eq!(requirement.sockets(), &['3'; 12]);
    }

    // Tests a filled neighbour contributes the reverse of its facing socket
    // Verified by copying the neighbour socket without reversing it
    #[test]
    fn test_requirement_reverses_neighbour_socket() {
        let catalog = lettered();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut grid = Grid::new(2, 2);
        grid.fill([0, 0], 0);

        let right = evaluator.required_sockets(&grid, [0, 1]);
        assert_eq!(right.side(Direction::Left), &['i', 'f', 'c']);
        assert_eq!(right.side(Direction::Up), &['3', '3', '3']);

        let below = evaluator.required_sockets(&grid, [1, 0]);
        // Bottom socket of tile 0 is "ihg", reversed on the shared edge
        assert_eq!(below.side(Direction::Up), &['g', 'h', 'i']);
    }

    // Tests fit accepts wildcards and rejects any mismatch
    // Verified by accepting tiles with a single matching position
    #[test]
    fn test_fits() {
        let catalog = lettered();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let tile = catalog.get(1).unwrap();
        let blank = catalog.get(2).unwrap();

        let mut grid = Grid::new(1, 2);
        let open = evaluator.required_sockets(&grid, [0, 1]);
        assert!(evaluator.fits(tile, &open));
        assert!(evaluator.fits(blank, &open));

        // Left side now requires i,f,c
        grid.fill([0, 0], 0);
        let constrained = evaluator.required_sockets(&grid, [0, 1]);
        assert!(evaluator.fits(tile, &constrained));
        assert!(!evaluator.fits(blank, &constrained));

        let small = TileCatalog::from_literals(2, ["abcd"]).unwrap();
        let small_evaluator = ConstraintEvaluator::new(&small, '3');
        let short = small_evaluator.required_sockets(&Grid::new(1, 1), [0, 0]);
        assert_eq!(short.sockets().len(), 8);
        assert!(!evaluator.fits(tile, &short));
    }

    // Tests possibilities contain exactly the tiles fitting the requirement
    // Verified by ignoring the left side of the requirement
    #[test]
    fn test_possibilities_at() {
        let catalog = lettered();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut grid = Grid::new(1, 2);
        assert_eq!(evaluator.possibilities_at(&grid, [0, 1]).count(), 3);

        grid.fill([0, 0], 0);
        assert_eq!(evaluator.possibilities_at(&grid, [0, 1]).to_vec(), vec![1]);
    }

    // Tests the corner preset admits left-filled tiles next to a full tile
    // Verified by comparing against the neighbour's left socket
    #[test]
    fn test_corner_neighbours() {
        let catalog = Preset::Corners.catalog().unwrap();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut grid = Grid::new(1, 2);
        grid.fill([0, 0], 15);
        assert_eq!(
            evaluator.possibilities_at(&grid, [0, 1]).to_vec(),
            vec![9, 11, 13, 15]
        );
    }

    // Tests the shared-edge check agrees with the requirement logic
    // Verified by comparing sockets on the same side
    #[test]
    fn test_edges_match() {
        let catalog = lettered();
        let a = catalog.get(0).unwrap();
        let b = catalog.get(1).unwrap();
        assert!(edges_match(a, Direction::Right, b));
        assert!(edges_match(b, Direction::Left, a));
        assert!(!edges_match(a, Direction::Down, b));
    }

    // Tests grid consistency over every adjacent filled pair
    // Verified by only checking horizontal neighbours
    #[test]
    fn test_is_consistent() {
        let catalog = lettered();
        let evaluator = ConstraintEvaluator::new(&catalog, '3');
        let mut grid = Grid::new(2, 2);
        grid.fill([0, 0], 0);
        grid.fill([0, 1], 1);
        assert!(evaluator.is_consistent(&grid));

        grid.fill([1, 0], 2);
        assert!(!evaluator.is_consistent(&grid));
    }

    // Tests checked construction rejects empty catalogs and wildcard sockets
    // Verified by skipping the socket scan
    #[test]
    fn test_checked() {
        let empty = TileCatalog::new(2).unwrap();
        assert!(matches!(
            ConstraintEvaluator::checked(&empty, '3'),
            Err(TilingError::EmptyCatalog)
        ));

        let clashing = TileCatalog::from_literals(2, ["    ", "3   "]).unwrap();
        let error = ConstraintEvaluator::checked(&clashing, '3').unwrap_err();
        assert!(error.is_configuration());
        assert!(error.to_string().contains("tile 1"));

        let evaluator = ConstraintEvaluator::checked(&clashing, '*').unwrap();
        assert_eq!(evaluator.wildcard(), '*');
        assert_eq!(evaluator.catalog().len(), 2);
    }
}
