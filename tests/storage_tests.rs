use brandpress::common::StorageError;
use brandpress::services::{LocalStorage, ObjectStorage, MAX_UPLOAD_BYTES};

#[tokio::test]
async fn stores_bytes_and_returns_a_public_url() {
    let dir = std::env::temp_dir().join(format!("brandpress-test-{}", uuid::Uuid::new_v4()));
    let storage = LocalStorage::new(&dir, "/static/uploads/");

    let url = storage.store("image/png", b"fake png bytes").await.unwrap();

    assert!(url.starts_with("/static/uploads/"));
    assert!(url.ends_with(".png"));

    let filename = url.rsplit('/').next().unwrap();
    let on_disk = tokio::fs::read(dir.join(filename)).await.unwrap();
    assert_eq!(on_disk, b"fake png bytes");

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn rejects_unsupported_media_types() {
    let storage = LocalStorage::new(std::env::temp_dir(), "/static/uploads");

    let err = storage.store("application/pdf", b"%PDF").await.unwrap_err();
    assert!(matches!(err, StorageError::UnsupportedMediaType(_)));
}

#[tokio::test]
async fn rejects_oversized_uploads() {
    let storage = LocalStorage::new(std::env::temp_dir(), "/static/uploads");

    let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
    let err = storage.store("image/jpeg", &big).await.unwrap_err();
    assert!(matches!(err, StorageError::TooLarge(_)));
}

#[test]
fn password_round_trip() {
    use brandpress::services::{hash_password, verify_password};

    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
    assert!(!verify_password("wrong password", &hash).unwrap());
    assert!(verify_password("anything", "not-a-phc-string").is_err());
}
