//! Tests for the shared cancellation flag and deadline

#[cfg(test)]
mod tests {
    use sockettile::algorithm::cancellation::Cancellation;
    use std::time::Duration;

    // Tests a fresh signal is not cancelled until requested
    // Verified by initializing the flag to true
    #[test]
    fn test_manual_cancel() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        cancel.cancel();
        assert!(cancel.is_cancelled());
    }

    // Tests clones observe the same flag
    // Verified by cloning the inner boolean instead of the Arc
    #[test]
    fn test_clones_share_flag() {
        let cancel = Cancellation::new();
        let handle = cancel.clone();
        handle.cancel();
        assert!(cancel.is_cancelled());
    }

    // Tests an elapsed deadline reports cancellation
    // Verified by ignoring the deadline in is_cancelled
    #[test]
    fn test_zero_timeout_fires() {
        let cancel = Cancellation::with_timeout(Duration::ZERO);
        assert!(cancel.is_cancelled());

        let distant = Cancellation::with_timeout(Duration::from_secs(3_600));
        assert!(!distant.is_cancelled());
    }
}
