//! Credential round trip at the pure seam: a password accepted by the
//! signup policy, hashed and persisted-shaped, verifies at login and yields
//! a token the guard would accept.

use cofre::auth::{name, password, policy, token};
use secrecy::SecretString;
use uuid::Uuid;

#[tokio::test]
async fn signup_then_login_round_trip() {
    let plaintext = "Abcdef1!";

    // Signup-side: the policy accepts the password, the name normalizes.
    assert!(policy::PasswordRequirements::evaluate(plaintext).all());
    assert!(policy::valid_email("maria@test.com"));
    assert_eq!(name::normalize("maria da silva"), "Maria da Silva");

    let stored_hash = password::hash(plaintext.to_string()).await.unwrap();
    assert_ne!(stored_hash, plaintext);

    // Login-side: the stored hash verifies and a session token is minted.
    assert!(password::verify(plaintext.to_string(), stored_hash.clone())
        .await
        .unwrap());

    let secret = SecretString::from("flow-test-secret");
    let user_id = Uuid::new_v4();
    let jwt = token::issue(&secret, user_id, 604_800).unwrap();

    let claims = token::verify(&secret, &jwt).unwrap();
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.exp - claims.iat, 604_800);
}

#[tokio::test]
async fn wrong_password_never_yields_a_token() {
    let stored_hash = password::hash("Abcdef1!".to_string()).await.unwrap();

    let verified = password::verify("Abcdef2!".to_string(), stored_hash)
        .await
        .unwrap();
    assert!(!verified);
}
