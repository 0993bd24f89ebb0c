use dochub_backend::validation::workspace::normalize_search_query;

#[test]
fn search_query_is_trimmed() {
    assert_eq!(normalize_search_query("  design  ").unwrap(), "design");
}

#[test]
fn search_query_rejects_empty_and_too_short() {
    assert!(normalize_search_query("").is_err());
    assert!(normalize_search_query("   ").is_err());
    assert!(normalize_search_query("a").is_err());
    assert!(normalize_search_query("ab").is_ok());
}

#[test]
fn search_query_minimum_counts_characters_not_bytes() {
    // "é" is two bytes but still a single character
    assert!(normalize_search_query("é").is_err());
    assert!(normalize_search_query("éé").is_ok());
}
