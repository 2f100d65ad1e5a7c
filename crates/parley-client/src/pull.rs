//! Streamed model pulls.
//!
//! `POST /api/pull` answers with newline-delimited JSON status objects. Each
//! line is decoded as it arrives and handed to the caller's callback; the
//! pull counts as successful only once a `"success"` status is seen.

use futures_util::StreamExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::ollama::OllamaClient;
use crate::PULL_SUCCESS_STATUS;

/// Request to Ollama pull API.
#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}


/// A progress notification from a running pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullProgress {
    /// Free-text status, e.g. `pulling manifest`.
    pub status: String,
    /// Layer digest being downloaded, if any.
    pub digest: Option<String>,
    /// Total bytes of the current layer.
    pub total: Option<u64>,
    /// Bytes downloaded so far for the current layer.
    pub completed: Option<u64>,
    /// Set on the final line of a successful pull.
    pub success: bool,
}

impl PullProgress {
    /// Completion of the current layer in percent, when the server sent sizes.
    pub fn percent(&self) -> Option<f64> {
        match (self.completed, self.total) {
            (Some(completed), Some(total)) if total > 0 => {
                Some(completed.min(total) as f64 * 100.0 / total as f64)
            }
            _ => None,
        }
    }
}

/// Read one decoded line. Only `status` decides whether it is reported;
/// the other fields are taken when they have the expected type.
fn progress_from_line(line: &Value) -> Option<PullProgress> {
    let status = match line.get("status")? {
        Value::Null => return None,
        Value::String(status) => status.clone(),
        other => other.to_string(),
    };

    Some(PullProgress {
        success: status == PULL_SUCCESS_STATUS,
        status,
        digest: line.get("digest").and_then(Value::as_str).map(str::to_string),
        total: line.get("total").and_then(Value::as_u64),
        completed: line.get("completed").and_then(Value::as_u64),
    })
}

/// Reassembles lines from arbitrarily split body chunks.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn extend(&mut self, chunk: &[u8]) {
        self.pending.extend_from_slice(chunk);
    }

    fn next_line(&mut self) -> Option<Vec<u8>> {
        let end = self.pending.iter().position(|b| *b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        Some(line)
    }

    /// Whatever is left once the body ends without a trailing newline.
    fn finish(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}

/// Decode one line and notify. Returns true on the success marker.
fn handle_line<F>(line: &[u8], on_progress: &mut F) -> bool
where
    F: FnMut(&PullProgress),
{
    let line = line.trim_ascii();
    if line.is_empty() {
        return false;
    }

    let parsed: Value = match serde_json::from_slice(line) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("Skipping malformed pull line: {}", e);
            return false;
        }
    };

    if let Some(error) = parsed.get("error") {
        warn!("Server reported pull error: {}", error);
    }

    match progress_from_line(&parsed) {
        Some(progress) => {
            on_progress(&progress);
            progress.success
        }
        None => false,
    }
}

impl OllamaClient {
    /// Pull a model, reporting each status line to `on_progress`.
    ///
    /// Returns once the success marker is seen; nothing after it is read.
    pub async fn try_pull_model<F>(&self, name: &str, mut on_progress: F) -> Result<(), ClientError>
    where
        F: FnMut(&PullProgress),
    {
        info!("Pulling model '{}'", name);

        let response = self
            .client
            .post(self.endpoint("/api/pull"))
            .json(&PullRequest { name, stream: true })
            .timeout(self.config.pull_timeout)
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        if response.status() != reqwest::StatusCode::OK {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ClientError::PullFailed(format!("HTTP {}: {}", status, text)));
        }

        let mut stream = response.bytes_stream();
        let mut lines = LineBuffer::default();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| ClientError::PullFailed(e.to_string()))?;
            lines.extend(&chunk);
            while let Some(line) = lines.next_line() {
                if handle_line(&line, &mut on_progress) {
                    info!("Model '{}' pulled successfully", name);
                    return Ok(());
                }
            }
        }

        if let Some(line) = lines.finish() {
            if handle_line(&line, &mut on_progress) {
                info!("Model '{}' pulled successfully", name);
                return Ok(());
            }
        }

        Err(ClientError::PullFailed(format!(
            "stream for '{}' ended without a {} status",
            name, PULL_SUCCESS_STATUS
        )))
    }

    /// Pull a model; false on any failure. Safe to retry.
    pub async fn pull_model<F>(&self, name: &str, on_progress: F) -> bool
    where
        F: FnMut(&PullProgress),
    {
        match self.try_pull_model(name, on_progress).await {
            Ok(()) => true,
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}
