use super::*;

// =============================================================================
// env_parse
// =============================================================================

#[test]
fn env_parse_missing_returns_default() {
    let val: u64 = env_parse("__RECTBOARD_TEST_MISSING__", 42);
    assert_eq!(val, 42);
}

#[test]
fn env_parse_present_valid() {
    unsafe { std::env::set_var("__RECTBOARD_TEST_VALID__", "99") };
    let val: u64 = env_parse("__RECTBOARD_TEST_VALID__", 0);
    assert_eq!(val, 99);
    unsafe { std::env::remove_var("__RECTBOARD_TEST_VALID__") };
}

#[test]
fn env_parse_present_invalid_returns_default() {
    unsafe { std::env::set_var("__RECTBOARD_TEST_INVALID__", "notanumber") };
    let val: i64 = env_parse("__RECTBOARD_TEST_INVALID__", 7);
    assert_eq!(val, 7);
    unsafe { std::env::remove_var("__RECTBOARD_TEST_INVALID__") };
}

#[test]
fn env_parse_reads_bools() {
    unsafe { std::env::set_var("__RECTBOARD_TEST_BOOL__", "true") };
    assert!(env_parse("__RECTBOARD_TEST_BOOL__", false));
    unsafe { std::env::remove_var("__RECTBOARD_TEST_BOOL__") };
}

// =============================================================================
// ServerConfig
// =============================================================================

#[test]
fn defaults_serve_seeded_canvas() {
    let config = ServerConfig::default();
    assert_eq!(config.port, 3000);
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.update_delay, Duration::ZERO);
    assert_eq!(config.canvas, Bounds::new(600, 400));
    assert!(config.seed_on_start);
}

#[test]
fn constraints_follow_config() {
    let config = ServerConfig { min_size: 20, enforce_width_le_height: true, ..ServerConfig::default() };
    let constraints = config.constraints();
    assert_eq!(constraints.min_size, 20);
    assert!(constraints.width_not_exceeding_height);
}
