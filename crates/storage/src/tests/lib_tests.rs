use super::*;

#[tokio::test]
async fn reads_back_what_it_wrote() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    let store = LocalFileStore::new();

    store.write(&path, "hello world\n").await.expect("write");
    assert_eq!(store.read(&path).await.expect("read"), "hello world\n");
}

#[tokio::test]
async fn write_replaces_existing_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "a much longer original body").expect("seed");

    LocalFileStore::new()
        .write(&path, "short")
        .await
        .expect("write");

    assert_eq!(std::fs::read_to_string(&path).expect("read"), "short");
}

#[tokio::test]
async fn missing_file_is_a_read_error_naming_the_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent.txt");

    let err = LocalFileStore::new()
        .read(&path)
        .await
        .expect_err("missing file");

    assert!(err.to_string().contains("absent.txt"), "{err:#}");
}

#[tokio::test]
async fn rejects_non_utf8_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("binary.txt");
    std::fs::write(&path, [0xff, 0xfe, 0x00]).expect("seed");

    let err = LocalFileStore::new()
        .read(&path)
        .await
        .expect_err("invalid utf-8");

    assert!(format!("{err:#}").contains("not valid UTF-8"), "{err:#}");
}

#[tokio::test]
async fn write_into_missing_directory_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("no").join("such").join("dir.txt");

    assert!(LocalFileStore::new().write(&path, "x").await.is_err());
    assert!(!path.exists());
}
