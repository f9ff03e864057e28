/// Fixed-capacity bitset of admissible tile ids
pub mod bitset;
/// External stop signal with optional deadline
pub mod cancellation;
/// Edge requirements and tile fit tests
pub mod constraint;
/// Block-deletion recovery mode
pub mod deadlock;
/// Strategy dispatch, retries and progress observation
pub mod executor;
/// Frontier cells and their possibility sets
pub mod frontier;
/// Greedy priority collapse mode
pub mod greedy;
/// Solutions, outcomes and work counters
pub mod outcome;
/// Injected random source for start cells and tile draws
pub mod selection;
/// Iterative backtracking solver
pub mod solver;
