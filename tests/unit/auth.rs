use dochub_backend::middleware::auth::AuthService;

#[test]
fn issued_tokens_verify_with_the_same_secret() {
    let service = AuthService::new("unit-test-secret");
    let token = service
        .issue_token("user-42", "Dana", Some("dana@example.com"), 3600)
        .unwrap();

    let claims = service.verify_token(&token).unwrap();
    assert_eq!(claims.sub, "user-42");
    assert_eq!(claims.name.as_deref(), Some("Dana"));
}

#[test]
fn tokens_do_not_verify_across_secrets() {
    let token = AuthService::new("secret-one")
        .issue_token("user-42", "Dana", None, 3600)
        .unwrap();
    assert!(AuthService::new("secret-two").verify_token(&token).is_err());
}

#[test]
fn expired_tokens_are_rejected() {
    // Built by hand because issue_token cannot back-date past the
    // default validation leeway.
    let long_dead = {
        use jsonwebtoken::{EncodingKey, Header, encode};
        #[derive(serde::Serialize)]
        struct Claims<'a> {
            sub: &'a str,
            exp: u64,
            iat: u64,
        }
        encode(
            &Header::default(),
            &Claims {
                sub: "user-42",
                exp: 1,
                iat: 0,
            },
            &EncodingKey::from_secret(b"unit-test-secret"),
        )
        .unwrap()
    };

    let service = AuthService::new("unit-test-secret");
    assert!(service.verify_token(&long_dead).is_err());
}
