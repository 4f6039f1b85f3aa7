//! Unit tests for review-core.

#[test]
fn test_crate_structure() {
    // Smoke test - the public surface is reachable from the crate root
    use crate::{ImageCard, SessionConfig, RESET_PROMPT, SCALE_MAX, SCALE_MIN};

    assert_eq!(SessionConfig::default().view.mount_id, "app");
    assert_eq!((ImageCard::WIDTH, ImageCard::HEIGHT), (2160, 3840));
    assert!(SCALE_MIN < SCALE_MAX);
    assert!(RESET_PROMPT.ends_with("This cannot be undone."));
}
