use dochub_backend::validation::document::validate_improve_content;

#[test]
fn improve_rejects_empty_content() {
    assert!(validate_improve_content("Some draft text").is_ok());
    assert!(validate_improve_content("").is_err());
    assert!(validate_improve_content(" \n\t ").is_err());
}
