use axum::{body::to_bytes, http::StatusCode, response::Response};
use rstest::rstest;
use serde_json::Value;
use slotbook_api::middleware::{
    auth,
    error_handling::{map_error, AppError},
};
use slotbook_core::errors::SlotError;

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case::validation(SlotError::Validation("Missing date".to_string()), StatusCode::BAD_REQUEST, "validation_error")]
#[case::authentication(SlotError::Authentication("Invalid token".to_string()), StatusCode::UNAUTHORIZED, "authentication_error")]
#[case::storage(SlotError::Storage(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR, "storage_error")]
#[case::internal(SlotError::Internal(Box::new(std::io::Error::other("Internal error"))), StatusCode::INTERNAL_SERVER_ERROR, "internal_error")]
#[tokio::test]
async fn test_error_mapping(
    #[case] error: SlotError,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let message = error.to_string();

    let response = map_error(error);

    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["code"], code);
    assert_eq!(body["error"], message.as_str());
}

#[tokio::test]
async fn test_eyre_report_becomes_storage_error() {
    let error: AppError = eyre::eyre!("connection refused").into();

    assert!(matches!(error.0, SlotError::Storage(_)));
}

#[test]
fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[test]
fn test_verify_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    assert!(auth::verify_password(&hashed, "test_password"));
    assert!(!auth::verify_password(&hashed, "wrong_password"));
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password("test_password").unwrap();
    let second = auth::hash_password("test_password").unwrap();

    assert_ne!(first, second);
}
