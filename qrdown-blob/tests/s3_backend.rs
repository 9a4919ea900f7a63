use std::sync::{Arc, Mutex};

use qrdown_blob::{
    BlobAdapter, BlobConfig, BlobError, BlobStore, ContentRepository, DocumentId, ReadOutcome,
    S3CompatibleStore, S3Config,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BUCKET: &str = "qrdown-test";

/// Canned HTTP reply
struct Reply {
    status: u16,
    headers: Vec<(&'static str, &'static str)>,
    body: &'static str,
}

impl Reply {
    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: "",
        }
    }

    fn xml_error(status: u16, code: &'static str) -> Self {
        let body = match code {
            "NoSuchKey" => "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Error><Code>NoSuchKey</Code><Message>The specified key does not exist.</Message><RequestId>req-1</RequestId></Error>",
            _ => "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Error><Code>InternalError</Code><Message>We encountered an internal error.</Message><RequestId>req-1</RequestId></Error>",
        };
        Self {
            status,
            headers: vec![("content-type", "application/xml")],
            body,
        }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            404 => "Not Found",
            _ => "Internal Server Error",
        }
    }
}

/// Minimal S3 endpoint answering each request by HTTP method
struct FakeS3 {
    endpoint: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeS3 {
    async fn start(route: fn(&str) -> Reply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let seen = requests.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let seen = seen.clone();
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 4096];
                    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                    }

                    let head = String::from_utf8_lossy(&buf).into_owned();
                    let request_line = head.lines().next().unwrap_or_default().to_string();
                    let method = request_line.split(' ').next().unwrap_or_default().to_string();
                    seen.lock().unwrap().push(request_line);

                    let reply = route(&method);
                    let body = if method == "HEAD" { "" } else { reply.body };
                    let mut out = format!("HTTP/1.1 {} {}\r\n", reply.status, reply.reason());
                    for (name, value) in &reply.headers {
                        out.push_str(&format!("{name}: {value}\r\n"));
                    }
                    out.push_str(&format!(
                        "content-length: {}\r\nconnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    ));

                    let _ = socket.write_all(out.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { endpoint, requests }
    }

    async fn store(&self) -> S3CompatibleStore {
        S3CompatibleStore::new(
            S3Config::new(BUCKET, "us-east-1")
                .with_endpoint_url(self.endpoint.as_str())
                .with_credentials("test-access-key", "test-secret-key")
                .with_path_style(),
        )
        .await
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn missing(method: &str) -> Reply {
    match method {
        "GET" => Reply::xml_error(404, "NoSuchKey"),
        _ => Reply::empty(404),
    }
}

fn failing(_method: &str) -> Reply {
    Reply::xml_error(500, "InternalError")
}

fn stored_document(method: &str) -> Reply {
    let headers = vec![
        ("content-type", "text/markdown"),
        ("x-amz-meta-font", "mono"),
        ("etag", "\"abc123\""),
    ];
    match method {
        "HEAD" | "GET" => Reply {
            status: 200,
            headers,
            body: "# Stored",
        },
        _ => Reply::empty(404),
    }
}

fn assert_backend(err: BlobError) {
    match err {
        BlobError::Backend { .. } => {}
        BlobError::NotFound { key } => panic!("expected a backend error, got not found for {key}"),
    }
}

#[tokio::test]
async fn head_of_missing_object_is_not_found() {
    let s3 = FakeS3::start(missing).await;
    let store = s3.store().await;

    let err = store.head("48151623/content.md").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, BlobError::NotFound { ref key } if key == "48151623/content.md"));

    let requests = s3.requests();
    assert!(requests[0].starts_with(&format!("HEAD /{BUCKET}/48151623/content.md")));
}

#[tokio::test]
async fn get_of_missing_object_is_not_found() {
    let s3 = FakeS3::start(missing).await;
    let store = s3.store().await;

    let err = store.get("48151623/content.md").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn server_errors_are_backend_errors() {
    let s3 = FakeS3::start(failing).await;
    let store = s3.store().await;

    assert_backend(store.head("48151623/content.md").await.unwrap_err());
    assert_backend(store.get("48151623/content.md").await.unwrap_err());
}

#[tokio::test]
async fn missing_document_reads_as_not_found() {
    let s3 = FakeS3::start(missing).await;
    let documents = ContentRepository::new(BlobAdapter::new(s3.store().await), BlobConfig::default());
    let id = DocumentId::from("48151623");

    assert!(matches!(documents.read(&id).await, ReadOutcome::NotFound));
    assert!(documents.fetch(&id).await.is_empty());
}

#[tokio::test]
async fn backend_outage_reads_as_transient_error() {
    let s3 = FakeS3::start(failing).await;
    let documents = ContentRepository::new(BlobAdapter::new(s3.store().await), BlobConfig::default());
    let id = DocumentId::from("48151623");

    match documents.read(&id).await {
        ReadOutcome::TransientError(err) => assert_backend(err),
        other => panic!("expected a transient error, got {other:?}"),
    }
    assert!(documents.fetch(&id).await.is_empty());
}

#[tokio::test]
async fn stored_document_reads_body_and_font_metadata() {
    let s3 = FakeS3::start(stored_document).await;
    let documents = ContentRepository::new(BlobAdapter::new(s3.store().await), BlobConfig::default());

    let doc = documents.fetch(&DocumentId::from("48151623")).await;
    assert_eq!(doc.content, "# Stored");
    assert_eq!(doc.content_type.as_deref(), Some("text/markdown"));
    assert_eq!(doc.font.as_deref(), Some("mono"));

    let methods: Vec<String> = s3
        .requests()
        .iter()
        .filter_map(|line| line.split(' ').next().map(str::to_string))
        .collect();
    assert_eq!(methods, vec!["HEAD", "GET"]);
}
