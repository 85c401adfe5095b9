use clinica_storage::backend::Backend;
use clinica_storage::error::StorageError;
use clinica_storage::query::Query;
use clinica_storage::rest::RestBackend;

#[test]
fn anon_key_must_be_a_valid_header() {
    let err = RestBackend::new("https://abc.supabase.co", "bad\nkey").unwrap_err();
    assert!(matches!(err, StorageError::Config(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let backend = RestBackend::new("http://127.0.0.1:1/", "anon").unwrap();
    backend.authorize(Some("token"));

    let err = backend
        .select(&Query::table("pacientes"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Network(_)), "got {err:?}");
}
