use dochub_backend::validation::message::validate_send;

#[test]
fn send_requires_channel_and_content() {
    assert!(validate_send("general-1", "hello").is_ok());
    assert!(validate_send("", "hello").is_err());
    assert!(validate_send("  ", "hello").is_err());
    assert!(validate_send("general-1", "").is_err());
}

#[test]
fn legacy_numeric_channel_ids_are_accepted() {
    // Channel references are opaque strings; old clients still send
    // numeric ids.
    assert!(validate_send("12345", "hello").is_ok());
}
