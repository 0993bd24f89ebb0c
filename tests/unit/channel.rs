use dochub_backend::db::repositories::channels::dm_key;
use dochub_backend::validation::channel::{validate_channel_name, validate_dm_pair};

#[test]
fn dm_key_is_order_independent() {
    assert_eq!(dm_key("alice", "bob"), dm_key("bob", "alice"));
    assert_eq!(dm_key("alice", "bob"), "alice:bob");
}

#[test]
fn dm_key_differs_per_pair() {
    assert_ne!(dm_key("alice", "bob"), dm_key("alice", "carol"));
}

#[test]
fn validate_dm_pair_rules() {
    assert!(validate_dm_pair("alice", "bob").is_ok());
    assert!(validate_dm_pair("", "bob").is_err());
    assert!(validate_dm_pair("alice", " ").is_err());
    assert!(validate_dm_pair("alice", "alice").is_err());
}

#[test]
fn validate_channel_name_rules() {
    assert!(validate_channel_name("general").is_ok());
    assert!(validate_channel_name("  ").is_err());
    assert!(validate_channel_name(&"x".repeat(256)).is_err());
}
