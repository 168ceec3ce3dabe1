//! Integration tests for document downloads.
//!
//! These tests verify the full download flow with mock HTTP servers.

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use uspto_odp::mapping::sentinel_timestamp;
use uspto_odp::models::DirectionCategory;
use uspto_odp::{ClientConfig, DocumentDescriptor, DownloadError, DownloadOption, OdpClient};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn client_for(server: &MockServer) -> OdpClient {
    let config = ClientConfig::new(API_KEY).with_base_url(format!("{}/applications", server.uri()));
    OdpClient::from_config(config).expect("client should build")
}

fn document_with(options: Vec<DownloadOption>) -> DocumentDescriptor {
    DocumentDescriptor {
        application_number: "16123456".to_string(),
        official_date: sentinel_timestamp(),
        document_identifier: "KJ8ZP1XKXBLUEX5".to_string(),
        document_code: "CTNF".to_string(),
        document_description: "Non-Final Rejection".to_string(),
        direction_category: DirectionCategory::Outgoing,
        download_options: options,
    }
}

fn option(mime_type: &str, url: String) -> DownloadOption {
    DownloadOption {
        mime_type: mime_type.to_string(),
        download_url: url,
        page_count: None,
    }
}

/// Helper to create a mock server with a file endpoint.
async fn setup_mock_file(path_str: &str, content: &[u8]) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(path_str))
        .and(header("X-API-KEY", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    mock_server
}

#[tokio::test]
async fn test_download_writes_content_with_synthesized_name() {
    let content = b"%PDF-1.7 office action bytes";
    let mock_server = setup_mock_file("/download/doc.pdf", content).await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let document = document_with(vec![option(
        "PDF",
        format!("{}/download/doc.pdf", mock_server.uri()),
    )]);

    let result = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", None)
        .await;

    let file_path = result.expect("download should succeed");
    assert_eq!(
        file_path.file_name().unwrap().to_str().unwrap(),
        "16123456_CTNF_KJ8ZP1XKXBLUEX5.pdf"
    );
    assert_eq!(std::fs::read(&file_path).unwrap(), content);
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).unwrap().count(),
        1,
        "no partial file should remain"
    );
}

#[tokio::test]
async fn test_download_uses_caller_filename() {
    let mock_server = setup_mock_file("/download/doc.doc", b"word bytes").await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![option(
        "MS_WORD",
        format!("{}/download/doc.doc", mock_server.uri()),
    )]);

    let file_path = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "MS_WORD", Some("rejection.doc"))
        .await
        .unwrap();

    assert_eq!(file_path, temp_dir.path().join("rejection.doc"));
    assert!(file_path.exists());
}

#[tokio::test]
async fn test_download_large_body_streams_completely() {
    // Several chunks worth, not a multiple of the chunk size
    let content: Vec<u8> = (0..100_003u32).map(|i| (i % 251) as u8).collect();
    let mock_server = setup_mock_file("/download/big.xml", &content).await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![option(
        "XML",
        format!("{}/download/big.xml", mock_server.uri()),
    )]);

    let file_path = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "XML", None)
        .await
        .unwrap();

    assert!(file_path.to_string_lossy().ends_with(".xml"));
    assert_eq!(std::fs::read(&file_path).unwrap(), content);
}

#[tokio::test]
async fn test_download_unavailable_format_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![
        option("PDF", format!("{}/a.pdf", mock_server.uri())),
        option("MS_WORD", format!("{}/a.doc", mock_server.uri())),
    ]);

    let err = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "XML", None)
        .await
        .unwrap_err();

    match err {
        DownloadError::FormatUnavailable {
            requested,
            available,
        } => {
            assert_eq!(requested, "XML");
            assert_eq!(available, vec!["PDF".to_string(), "MS_WORD".to_string()]);
        }
        other => panic!("expected FormatUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn test_download_missing_directory_sends_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("does-not-exist");
    let document = document_with(vec![option(
        "PDF",
        format!("{}/a.pdf", mock_server.uri()),
    )]);

    let err = client_for(&mock_server)
        .download_document(&document, &missing, "PDF", None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, DownloadError::DirectoryMissing { ref path } if *path == missing),
        "got {err:?}"
    );
}

#[tokio::test]
async fn test_download_non_200_is_failed_and_leaves_no_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/gone.pdf"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![option(
        "PDF",
        format!("{}/download/gone.pdf", mock_server.uri()),
    )]);

    let err = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, DownloadError::Failed { status: 503, .. }),
        "got {err:?}"
    );
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_download_invalid_url_is_rejected() {
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![option("PDF", "not a url".to_string())]);

    let err = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::InvalidUrl { .. }), "got {err:?}");
}

/// Serves one response that promises more bytes than it sends, then hangs up.
async fn serve_truncated_body(declared_len: usize, sent: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {declared_len}\r\n\r\n"
        );
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(sent).await.unwrap();
        socket.flush().await.unwrap();
        // Dropping the socket closes the connection mid-body
    });
    format!("http://{addr}/download/doc.pdf")
}

#[tokio::test]
async fn test_download_interrupted_body_removes_partial_file() {
    let url = serve_truncated_body(1_000_000, b"%PDF-1.7 first chunk only").await;
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let document = document_with(vec![option("PDF", url)]);

    let err = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", None)
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::Network { .. }), "got {err:?}");
    assert_eq!(
        std::fs::read_dir(temp_dir.path()).unwrap().count(),
        0,
        "partial file should be removed"
    );
}

#[tokio::test]
async fn test_download_failure_keeps_existing_file() {
    let url = serve_truncated_body(4096, b"partial").await;
    let mock_server = MockServer::start().await;
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("office-action.pdf");
    std::fs::write(&existing, b"earlier copy").unwrap();
    let document = document_with(vec![option("PDF", url)]);

    let result = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", Some("office-action.pdf"))
        .await;

    assert!(result.is_err());
    assert_eq!(std::fs::read(&existing).unwrap(), b"earlier copy");
}

#[tokio::test]
async fn test_download_replaces_existing_file_on_success() {
    let mock_server = setup_mock_file("/download/doc.pdf", b"new copy").await;
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().join("office-action.pdf");
    std::fs::write(&existing, b"earlier copy").unwrap();
    let document = document_with(vec![option(
        "PDF",
        format!("{}/download/doc.pdf", mock_server.uri()),
    )]);

    let file_path = client_for(&mock_server)
        .download_document(&document, temp_dir.path(), "PDF", Some("office-action.pdf"))
        .await
        .unwrap();

    assert_eq!(file_path, existing);
    assert_eq!(std::fs::read(&existing).unwrap(), b"new copy");
}

#[cfg(unix)]
#[tokio::test]
async fn test_download_read_only_directory_sends_no_request() {
    use std::os::unix::fs::PermissionsExt;

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let locked = temp_dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();
    let document = document_with(vec![option(
        "PDF",
        format!("{}/a.pdf", mock_server.uri()),
    )]);

    let result = client_for(&mock_server)
        .download_document(&document, &locked, "PDF", None)
        .await;

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    let err = result.unwrap_err();
    assert!(
        matches!(err, DownloadError::DirectoryNotWritable { ref path } if *path == locked),
        "got {err:?}"
    );
}

/// A directory whose mode bits allow writing but whose owner is someone else.
#[cfg(unix)]
#[tokio::test]
async fn test_download_directory_owned_by_other_user_sends_no_request() {
    let root = Path::new("/");
    if std::fs::metadata(root).unwrap().permissions().readonly() {
        return;
    }
    // Privileged runs can write to `/`, so there is nothing to check
    let access_check = root.join(format!(".uspto-odp-access-{}", std::process::id()));
    if std::fs::File::create(&access_check).is_ok() {
        let _ = std::fs::remove_file(&access_check);
        return;
    }

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let document = document_with(vec![option(
        "PDF",
        format!("{}/a.pdf", mock_server.uri()),
    )]);

    let err = client_for(&mock_server)
        .download_document(&document, root, "PDF", None)
        .await
        .unwrap_err();

    assert!(
        matches!(err, DownloadError::DirectoryNotWritable { .. }),
        "got {err:?}"
    );
}
