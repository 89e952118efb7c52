use spritecue::{Loader, LoaderConfig, LoadError, PreviewTrack, Source};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const SHEET: &str = "WEBVTT\n\
    \n\
    00:00.000 --> 00:05.000\n\
    x:0,y:0,w:160,h:90\n\
    \n\
    00:05.000 --> 00:10.000\n\
    x:160,y:0,w:160,h:90\n";

fn loader() -> Loader {
    Loader::new(&LoaderConfig {
        timeout: Duration::from_secs(5),
        use_proxy: false,
    })
    .unwrap()
}

/// Answers a single request with a canned response.
async fn serve_once(status: &'static str, body: &'static str) -> Source {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/vtt\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });
    format!("http://{}/thumbs.vtt", addr).parse().unwrap()
}

#[tokio::test]
async fn loads_local_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thumbs.vtt");
    std::fs::write(&path, SHEET).unwrap();

    let index = loader().load(&Source::Local(path)).await.unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.lookup(7.0).map(|c| c.x), Some(160));
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let source = Source::Local(PathBuf::from("/nonexistent/thumbs.vtt"));
    let err = loader().load(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[tokio::test]
async fn loads_remote_sheet() {
    let source = serve_once("200 OK", SHEET).await;

    let index = loader().load(&source).await.unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.lookup(2.5).map(|c| c.w), Some(160));
}

#[tokio::test]
async fn http_error_status_is_a_failure() {
    let source = serve_once("404 Not Found", "missing").await;
    let err = loader().load(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Http { .. }));
}

#[tokio::test]
async fn track_publishes_after_load() {
    let source = serve_once("200 OK", SHEET).await;
    let track = Arc::new(PreviewTrack::new());
    assert_eq!(track.lookup(7.0), None);

    track.spawn_load(loader(), source).await.unwrap();

    assert!(track.is_ready());
    assert_eq!(track.lookup(7.0).map(|c| c.x), Some(160));
    assert_eq!(track.lookup(12.0), None);
}

#[tokio::test]
async fn failed_load_leaves_track_empty() {
    let track = PreviewTrack::new();
    let source = Source::Local(PathBuf::from("/nonexistent/thumbs.vtt"));

    assert!(!track.load_from(&loader(), &source).await);

    assert!(!track.is_ready());
    assert_eq!(track.lookup(1.0), None);
}

#[tokio::test]
async fn failed_fetch_leaves_track_empty() {
    let source = serve_once("500 Internal Server Error", "").await;
    let track = Arc::new(PreviewTrack::new());

    track.spawn_load(loader(), source).await.unwrap();

    assert!(!track.is_ready());
    assert_eq!(track.lookup(1.0), None);
}

#[tokio::test]
async fn second_load_keeps_first_index() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.vtt");
    let second = dir.path().join("second.vtt");
    std::fs::write(&first, SHEET).unwrap();
    std::fs::write(&second, "0 --> 100\nx:999\n").unwrap();
    let track = PreviewTrack::new();
    let loader = loader();

    assert!(track.load_from(&loader, &Source::Local(first)).await);
    assert!(!track.load_from(&loader, &Source::Local(second)).await);

    assert_eq!(track.lookup(7.0).map(|c| c.x), Some(160));
}
