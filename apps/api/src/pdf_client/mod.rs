//! PDF client: hands a finished HTML document to the headless-browser PDF
//! service and returns the PDF bytes.
//!
//! Rasterization happens entirely in that service. This module only owns the
//! HTTP contract: `POST {PDF_RENDERER_URL}` with `{"html": "..."}`, response
//! body is `application/pdf`.
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Renderer error (status {status}): {message}")]
    Renderer { status: u16, message: String },

    #[error("Renderer returned an empty document")]
    EmptyDocument,
}

impl From<PdfError> for AppError {
    fn from(e: PdfError) -> Self {
        AppError::Pdf(e.to_string())
    }
}

/// Turns a complete HTML document into PDF bytes.
///
/// Carried in `AppState` as `Arc<dyn PdfRenderer>`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Bytes, PdfError>;
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct RendererError {
    error: String,
}

/// HTTP client for the external PDF service, with retry on 429 and 5xx.
#[derive(Clone)]
pub struct HttpPdfRenderer {
    client: Client,
    endpoint: String,
}

impl HttpPdfRenderer {
    pub fn new(endpoint: String) -> Result<Self, PdfError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            endpoint,
        })
    }
}

impl PdfError {
    /// Transport failures, rate limiting and renderer 5xx are worth another try.
    fn is_retryable(&self) -> bool {
        match self {
            PdfError::Http(_) => true,
            PdfError::Renderer { status, .. } => *status == 429 || *status >= 500,
            PdfError::EmptyDocument => false,
        }
    }
}

impl HttpPdfRenderer {
    async fn send_once(&self, request_body: &RenderRequest<'_>) -> Result<Bytes, PdfError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RendererError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(PdfError::Renderer {
                status: status.as_u16(),
                message,
            });
        }

        let pdf = response.bytes().await?;
        if pdf.is_empty() {
            return Err(PdfError::EmptyDocument);
        }
        Ok(pdf)
    }
}

#[async_trait]
impl PdfRenderer for HttpPdfRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Bytes, PdfError> {
        let request_body = RenderRequest { html };
        let mut attempt = 0;

        loop {
            match self.send_once(&request_body).await {
                Ok(pdf) => {
                    debug!(html_bytes = html.len(), pdf_bytes = pdf.len(), "PDF rendered");
                    return Ok(pdf);
                }
                Err(e) if e.is_retryable() && attempt + 1 < MAX_RETRIES => {
                    attempt += 1;
                    // Exponential backoff: 500ms, 1s
                    let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                    warn!(
                        "PDF render attempt {} failed ({e}), retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
