//! reqwest 传输的端到端测试：本机一次性 HTTP 服务 + 真实工作器。

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::chunk::{
    ChunkDownloadWorker, ChunkError, FailureKind, NeverCancelled, RangeRequestSpec,
    StreamOutcome,
};
use crate::tests::{RecordingSink, TEST_USER_AGENT, http_response, init_logger, random_payload, serve_once};
use crate::transport::{HttpTransport, ReqwestTransport};

fn transport() -> Arc<dyn HttpTransport> {
    Arc::new(ReqwestTransport::new().unwrap())
}

#[tokio::test]
async fn downloads_whole_file() {
    init_logger();
    let payload = random_payload(300_000);
    let (base, server) = serve_once(http_response(
        "200 OK",
        &[("Content-Length", payload.len().to_string())],
        &payload,
    ))
    .await;
    let sink = RecordingSink::new();
    let spec = RangeRequestSpec::new(format!("{}/files/whole.bin", base), TEST_USER_AGENT)
        .expected_total_size(payload.len() as u64);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(report.outcome, StreamOutcome::Success);
    assert_eq!(sink.joined(), payload);
    assert!(sink.is_contiguous_from(0));

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.starts_with("get /files/whole.bin "));
    assert!(request.contains(&format!("user-agent: {}", TEST_USER_AGENT)));
    assert!(request.contains("cache-control: no-cache"));
    assert!(request.contains("pragma: no-cache"));
    assert!(!request.contains("range:"));
}

#[tokio::test]
async fn downloads_partial_content() {
    init_logger();
    let payload = random_payload(10_000);
    let (base, server) = serve_once(http_response(
        "206 Partial Content",
        &[
            ("Content-Length", "4000".to_string()),
            ("Content-Range", "bytes 2000-5999/10000".to_string()),
        ],
        &payload[2000..6000],
    ))
    .await;
    let sink = RecordingSink::new();
    let spec = RangeRequestSpec::new(format!("{}/part", base), TEST_USER_AGENT)
        .range(2000, Some(5999))
        .expected_total_size(10_000);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(report.outcome, StreamOutcome::Success);
    assert_eq!(report.next_offset(), 6000);
    assert!(sink.is_contiguous_from(2000));
    assert_eq!(sink.joined(), &payload[2000..6000]);

    let request = server.await.unwrap().to_ascii_lowercase();
    assert!(request.contains("range: bytes=2000-5999"));
}

#[tokio::test]
async fn server_ignoring_range_is_rejected() {
    let (base, _server) = serve_once(http_response(
        "200 OK",
        &[("Content-Length", "10".to_string())],
        b"0123456789",
    ))
    .await;
    let sink = RecordingSink::new();
    let spec = RangeRequestSpec::new(format!("{}/part", base), TEST_USER_AGENT).range(5, None);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(
        report.outcome,
        StreamOutcome::Failed {
            kind: FailureKind::UnexpectedStatus,
            http_status: Some(200)
        }
    );
    assert!(sink.writes().is_empty());
    assert_eq!(sink.done()[0].status_code, 200);
}

#[tokio::test]
async fn content_length_is_used_when_content_range_is_absent() {
    let (base, _server) = serve_once(http_response(
        "200 OK",
        &[("Content-Length", "10".to_string())],
        b"0123456789",
    ))
    .await;
    let sink = RecordingSink::new();
    let spec =
        RangeRequestSpec::new(format!("{}/f", base), TEST_USER_AGENT).expected_total_size(11);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(report.status_code, -5);
    assert!(matches!(
        report.error,
        Some(ChunkError::SizeMismatch {
            expected: 11,
            actual: Some(10)
        })
    ));
}

#[tokio::test]
async fn request_body_is_posted() {
    let (base, server) = serve_once(http_response(
        "200 OK",
        &[("Content-Length", "2".to_string())],
        b"ok",
    ))
    .await;
    let sink = RecordingSink::new();
    let spec = RangeRequestSpec::new(format!("{}/query", base), TEST_USER_AGENT)
        .body(b"name=region".to_vec());

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(report.outcome, StreamOutcome::Success);
    assert_eq!(sink.joined(), b"ok");

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /query "));
    assert!(request.to_ascii_lowercase().contains("content-length: 11"));
    assert!(request.ends_with("name=region"));
}

#[tokio::test]
async fn refused_connection_is_io_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let sink = RecordingSink::new();
    let spec = RangeRequestSpec::new(format!("http://{}/gone", addr), TEST_USER_AGENT);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(
        report.outcome,
        StreamOutcome::Failed {
            kind: FailureKind::Io,
            http_status: None
        }
    );
    assert_eq!(report.status_code, -2);
    assert_eq!(sink.done().len(), 1);
}

#[tokio::test]
async fn body_cut_short_is_io_error() {
    init_logger();
    let payload = random_payload(50);
    // 承诺 100 字节，只发 50 字节就关闭连接
    let (base, _server) = serve_once(http_response(
        "200 OK",
        &[("Content-Length", "100".to_string())],
        &payload,
    ))
    .await;
    let sink = RecordingSink::new();
    let spec =
        RangeRequestSpec::new(format!("{}/cut", base), TEST_USER_AGENT).expected_total_size(100);

    let report = ChunkDownloadWorker::new(spec, transport(), sink.clone(), Arc::new(NeverCancelled))
        .run()
        .await;

    assert_eq!(
        report.outcome,
        StreamOutcome::Failed {
            kind: FailureKind::Io,
            http_status: Some(200)
        }
    );
    assert_eq!(report.status_code, -2);
    assert!(matches!(
        report.error,
        Some(ChunkError::ReadLadderExhausted { attempts: 3, .. })
    ));
    assert!(report.bytes_delivered < 100);
    assert!(sink.is_contiguous_from(0));
    assert!(payload.starts_with(&sink.joined()));

    let done = sink.done();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].status_code, -2);
}
