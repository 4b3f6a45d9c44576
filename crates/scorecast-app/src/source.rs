// Where the analysis document comes from: a local JSON file or an HTTP GET
// against the analysis API.

use scorecast_core::document::{AnalysisDocument, DocumentError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("request to {url} failed: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Http(String),
}

impl DocumentSource {
    /// `http://` / `https://` locations are fetched; everything else is a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DocumentSource::Http(location.to_string())
        } else {
            DocumentSource::File(PathBuf::from(location))
        }
    }

    /// Load and parse the document.
    pub async fn load(&self, timeout: Duration) -> Result<AnalysisDocument, SourceError> {
        match self {
            DocumentSource::File(path) => read_file(path).await,
            DocumentSource::Http(url) => fetch(url, timeout).await,
        }
    }
}

impl std::fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Http(url) => write!(f, "{url}"),
        }
    }
}

/// Blocking load, for callers outside a runtime.
pub fn load_file(path: &Path) -> Result<AnalysisDocument, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    parse_file(path, &text)
}

async fn read_file(path: &Path) -> Result<AnalysisDocument, SourceError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| io_error(path, e))?;
    parse_file(path, &text)
}

fn io_error(path: &Path, source: std::io::Error) -> SourceError {
    SourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn parse_file(path: &Path, text: &str) -> Result<AnalysisDocument, SourceError> {
    debug!(path = %path.display(), bytes = text.len(), "read analysis document");
    Ok(AnalysisDocument::from_json(text)?)
}

async fn fetch(url: &str, timeout: Duration) -> Result<AnalysisDocument, SourceError> {
    let http_err = |e: reqwest::Error| SourceError::Http {
        url: url.to_string(),
        source: e,
    };

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(http_err)?;

    info!(url, "fetching analysis document");
    let response = client.get(url).send().await.map_err(http_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = response.text().await.map_err(http_err)?;
    debug!(url, bytes = body.len(), "received analysis document");
    Ok(AnalysisDocument::from_json(&body)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    const BODY: &str = r#"{"game": {"gameId": "g-http", "date": "2024-05-10",
        "homeTeam": "Home", "awayTeam": "Away"},
        "atBats": [{"batter": "Ruiz", "inning": 1, "outsBefore": 0, "result": "single"}]}"#;

    /// One-shot HTTP server answering with `status_line` and `body`.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0u8; 4096];
            let _ = tokio::io::AsyncReadExt::read(&mut socket, &mut buf).await;

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
        });

        format!("http://{addr}/analysis")
    }

    #[test]
    fn parse_detects_urls() {
        assert_eq!(
            DocumentSource::parse("https://api.example.test/game/1"),
            DocumentSource::Http("https://api.example.test/game/1".into())
        );
        assert_eq!(
            DocumentSource::parse("  HTTP://host/x "),
            DocumentSource::Http("HTTP://host/x".into())
        );
        assert_eq!(
            DocumentSource::parse("data/game.json"),
            DocumentSource::File(PathBuf::from("data/game.json"))
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }), "got: {err}");
    }

    #[test]
    fn malformed_file_is_document_error() {
        let path = std::env::temp_dir().join("scorecast_source_malformed.json");
        std::fs::write(&path, "{\"game\": 3}").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(matches!(err, SourceError::Document(_)), "got: {err}");
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn loads_file_source() {
        let path = std::env::temp_dir().join("scorecast_source_ok.json");
        std::fs::write(&path, BODY).unwrap();
        let doc = DocumentSource::File(path.clone())
            .load(Duration::from_secs(1))
            .await
            .expect("file should load");
        assert_eq!(doc.game.game_id, "g-http");
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn async_file_load_reports_io_and_document_errors() {
        let missing = DocumentSource::File(PathBuf::from("does/not/exist.json"))
            .load(Duration::from_secs(1))
            .await
            .unwrap_err();
        match &missing {
            SourceError::Io { path, .. } => assert!(path.ends_with("exist.json")),
            other => panic!("expected Io, got: {other}"),
        }

        let path = std::env::temp_dir().join("scorecast_source_async_malformed.json");
        tokio::fs::write(&path, "{\"game\": 3}").await.unwrap();
        let err = DocumentSource::File(path.clone())
            .load(Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Document(_)), "got: {err}");
        let _ = tokio::fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn fetches_over_http() {
        let url = serve_once("HTTP/1.1 200 OK", BODY).await;
        let doc = DocumentSource::parse(&url)
            .load(Duration::from_secs(5))
            .await
            .expect("fetch should succeed");
        assert_eq!(doc.game.game_id, "g-http");
        assert_eq!(doc.at_bats.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_rejected() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let err = DocumentSource::parse(&url)
            .load(Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            SourceError::Status { status, .. } => assert_eq!(status.as_u16(), 503),
            other => panic!("expected Status, got: {other}"),
        }
    }
}
