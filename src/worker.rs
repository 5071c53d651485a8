//! Asynchronous analysis worker
//!
//! Runs palette extraction off the caller's task. Requests and responses are
//! the tagged JSON messages of the worker protocol:
//!
//! ```text
//! -> {"type":"analyze","pixelData":{...},"config":{...}}
//! -> {"type":"ping"}
//! <- {"type":"progress","progress":50,"message":"..."}
//! <- {"type":"result","data":[...],"success":true}
//! <- {"type":"error","error":"...","success":false}
//! <- {"type":"pong"}
//! ```
//!
//! Requests are served in arrival order, so the responses of two analyses
//! never interleave. Each analysis runs on the blocking pool with its own
//! configuration; nothing carries over between requests.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::color::PaletteExtractor;
use crate::config::{ConfigOverrides, ExtractionConfig};
use crate::{Palette, PaletteError, PixelBuffer, Result};

/// Message accepted by the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerRequest {
    Analyze {
        #[serde(rename = "pixelData")]
        pixel_data: PixelBuffer,
        /// Keys present here override the worker's configuration for this
        /// request only
        #[serde(default, skip_serializing_if = "Option::is_none")]
        config: Option<ConfigOverrides>,
    },
    Ping,
}

/// Message emitted by the worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WorkerResponse {
    /// Advisory, carries no correctness guarantee
    Progress { progress: u8, message: String },
    Result { data: Palette, success: bool },
    Error { error: String, success: bool },
    Pong,
}

impl WorkerResponse {
    fn error(err: impl ToString) -> Self {
        WorkerResponse::Error {
            error: err.to_string(),
            success: false,
        }
    }

    /// Whether this response ends the request that caused it
    pub fn is_terminal(&self) -> bool {
        !matches!(self, WorkerResponse::Progress { .. })
    }
}

enum Inbound {
    Request(WorkerRequest),
    Raw(String),
}

/// Handle to a running analysis worker
///
/// Responses arrive on a single queue in request order. Mixing [`send`] with
/// [`analyze`] or [`ping`] requires draining earlier responses first.
///
/// [`send`]: PaletteWorker::send
/// [`analyze`]: PaletteWorker::analyze
/// [`ping`]: PaletteWorker::ping
pub struct PaletteWorker {
    requests: mpsc::UnboundedSender<Inbound>,
    responses: mpsc::UnboundedReceiver<WorkerResponse>,
    handle: JoinHandle<()>,
}

impl PaletteWorker {
    /// Start a worker on the current tokio runtime
    ///
    /// `defaults` is the base every analyze request overlays its `config`
    /// keys onto.
    pub fn spawn(defaults: ExtractionConfig) -> Self {
        let (requests, inbox) = mpsc::unbounded_channel();
        let (outbox, responses) = mpsc::unbounded_channel();
        let handle = tokio::spawn(serve(defaults, inbox, outbox));
        info!("palette worker started");
        Self {
            requests,
            responses,
            handle,
        }
    }

    /// Queue a typed request
    pub fn send(&self, request: WorkerRequest) -> Result<()> {
        self.requests
            .send(Inbound::Request(request))
            .map_err(|_| PaletteError::transport("worker is not running"))
    }

    /// Queue a JSON-encoded request; decoding happens on the worker
    pub fn send_raw(&self, message: impl Into<String>) -> Result<()> {
        self.requests
            .send(Inbound::Raw(message.into()))
            .map_err(|_| PaletteError::transport("worker is not running"))
    }

    /// Next response, or `None` once the worker has stopped
    pub async fn recv(&mut self) -> Option<WorkerResponse> {
        self.responses.recv().await
    }

    /// Analyze a buffer and wait for the terminal response
    ///
    /// Progress responses are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ProcessingError`] when the worker reports an
    /// error, and [`PaletteError::Transport`] when it stops or answers out of
    /// protocol.
    pub async fn analyze(
        &mut self,
        pixel_data: PixelBuffer,
        config: Option<ExtractionConfig>,
    ) -> Result<Palette> {
        self.send(WorkerRequest::Analyze {
            pixel_data,
            config: config.map(ConfigOverrides::from),
        })?;
        loop {
            match self.recv().await {
                Some(WorkerResponse::Progress { progress, message }) => {
                    debug!(progress, %message, "analysis progress");
                }
                Some(WorkerResponse::Result { data, .. }) => return Ok(data),
                Some(WorkerResponse::Error { error, .. }) => {
                    return Err(PaletteError::ProcessingError { message: error })
                }
                Some(WorkerResponse::Pong) => {
                    return Err(PaletteError::transport("unexpected pong during analysis"))
                }
                None => return Err(PaletteError::transport("worker stopped during analysis")),
            }
        }
    }

    /// Round-trip a ping
    pub async fn ping(&mut self) -> Result<()> {
        self.send(WorkerRequest::Ping)?;
        match self.recv().await {
            Some(WorkerResponse::Pong) => Ok(()),
            Some(other) => Err(PaletteError::transport(format!(
                "expected pong, got {:?}",
                other
            ))),
            None => Err(PaletteError::transport("worker stopped before answering ping")),
        }
    }

    /// Stop the worker and wait for its task to exit
    ///
    /// Responses still queued are discarded.
    pub async fn shutdown(self) -> Result<()> {
        let Self {
            requests, handle, ..
        } = self;
        drop(requests);
        handle
            .await
            .map_err(|e| PaletteError::transport(format!("worker task failed: {}", e)))?;
        info!("palette worker stopped");
        Ok(())
    }
}

async fn serve(
    defaults: ExtractionConfig,
    mut inbox: mpsc::UnboundedReceiver<Inbound>,
    outbox: mpsc::UnboundedSender<WorkerResponse>,
) {
    while let Some(inbound) = inbox.recv().await {
        let request = match inbound {
            Inbound::Request(request) => request,
            Inbound::Raw(text) => match serde_json::from_str::<WorkerRequest>(&text) {
                Ok(request) => request,
                Err(err) => {
                    warn!(error = %err, "rejecting malformed worker message");
                    let reply = WorkerResponse::error(format!("Invalid message: {}", err));
                    if outbox.send(reply).is_err() {
                        break;
                    }
                    continue;
                }
            },
        };

        let reply = match request {
            WorkerRequest::Ping => WorkerResponse::Pong,
            WorkerRequest::Analyze { pixel_data, config } => {
                let config = match config {
                    Some(overrides) => overrides.apply_to(&defaults),
                    None => defaults.clone(),
                };
                let progress = outbox.clone();
                let job = tokio::task::spawn_blocking(move || {
                    run_analysis(&pixel_data, &config, &progress)
                });
                match job.await {
                    Ok(Ok(palette)) => WorkerResponse::Result {
                        data: palette,
                        success: true,
                    },
                    Ok(Err(err)) => {
                        warn!(error = %err, "analysis rejected");
                        WorkerResponse::error(err)
                    }
                    Err(err) => WorkerResponse::error(format!("analysis task failed: {}", err)),
                }
            }
        };

        if outbox.send(reply).is_err() {
            debug!("response receiver dropped");
            break;
        }
    }
}

fn run_analysis(
    buffer: &PixelBuffer,
    config: &ExtractionConfig,
    progress: &mpsc::UnboundedSender<WorkerResponse>,
) -> Result<Palette> {
    buffer.validate()?;
    let extractor = PaletteExtractor::new(config)?;
    Ok(extractor.extract_with_progress(buffer.as_bytes(), |p| {
        // A closed receiver surfaces when the terminal reply is sent
        let _ = progress.send(WorkerResponse::Progress {
            progress: p.percent,
            message: p.message,
        });
    }))
}
