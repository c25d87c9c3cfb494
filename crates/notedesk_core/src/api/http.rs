//! HTTP/JSON implementation of the notes resource client.
//!
//! # Responsibility
//! - Map `NotesApi` calls onto `GET|POST|PUT|DELETE {base}/notes[/{id}]`.
//! - Emit one metadata-only `api_request` log event per call.
//!
//! # Invariants
//! - Ids are appended as URL path segments (percent-encoded), never spliced
//!   into the URL string.
//! - Non-2xx responses are reported by status only; their bodies are dropped.

use super::{ApiError, ApiResult, NotesApi};
use crate::config::ClientConfig;
use crate::model::note::{Note, NoteId, NoteInput};
use log::{error, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Instant;

const NOTES_RESOURCE: &str = "notes";

/// Blocking HTTP client for the `notes` resource.
pub struct HttpNotesApi {
    base_url: Url,
    client: Client,
}

impl HttpNotesApi {
    /// Builds a client with timeout and proxy policy from `config`.
    ///
    /// # Errors
    /// - `InvalidBaseUrl` when the base URL cannot carry path segments.
    /// - `Transport` when the HTTP client backend cannot be initialized.
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = Client::builder().timeout(config.request_timeout);
        if config.bypass_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::Transport(format!("failed to build http client: {err}")))?;
        Self::with_client(config.base_url.as_str(), client)
    }

    /// Builds a client around a caller-provided `reqwest` client.
    pub fn with_client(base_url: &str, client: Client) -> ApiResult<Self> {
        let trimmed = base_url.trim();
        let parsed =
            Url::parse(trimmed).map_err(|_| ApiError::InvalidBaseUrl(trimmed.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(trimmed.to_string()));
        }
        Ok(Self {
            base_url: parsed,
            client,
        })
    }

    /// Returns the configured API base URL.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn notes_url(&self, id: Option<&NoteId>) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(NOTES_RESOURCE);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn send(&self, op: &'static str, request: RequestBuilder) -> ApiResult<Response> {
        let started_at = Instant::now();
        let response = match request.send() {
            Ok(response) => response,
            Err(err) => {
                error!(
                    "event=api_request module=api op={} status=error duration_ms={} error_code=transport_failed error={}",
                    op,
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(ApiError::Transport(err.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(
                "event=api_request module=api op={} status=error duration_ms={} error_code=http_status http_status={}",
                op,
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        info!(
            "event=api_request module=api op={} status=ok duration_ms={} http_status={}",
            op,
            started_at.elapsed().as_millis(),
            status.as_u16()
        );
        Ok(response)
    }
}

fn decode<T: DeserializeOwned>(op: &'static str, response: Response) -> ApiResult<T> {
    response.json::<T>().map_err(|err| {
        error!(
            "event=api_decode module=api op={} status=error error_code=decode_failed error={}",
            op, err
        );
        ApiError::Decode(err.to_string())
    })
}

impl NotesApi for HttpNotesApi {
    fn list(&self) -> ApiResult<Vec<Note>> {
        let url = self.notes_url(None)?;
        let response = self.send("list", self.client.get(url))?;
        decode("list", response)
    }

    fn get(&self, id: &NoteId) -> ApiResult<Note> {
        let url = self.notes_url(Some(id))?;
        let response = self.send("get", self.client.get(url))?;
        decode("get", response)
    }

    fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        let url = self.notes_url(None)?;
        let response = self.send("create", self.client.post(url).json(input))?;
        decode("create", response)
    }

    fn update(&self, id: &NoteId, input: &NoteInput) -> ApiResult<Note> {
        let url = self.notes_url(Some(id))?;
        let response = self.send("update", self.client.put(url).json(input))?;
        decode("update", response)
    }

    fn delete(&self, id: &NoteId) -> ApiResult<()> {
        let url = self.notes_url(Some(id))?;
        self.send("delete", self.client.delete(url))?;
        Ok(())
    }
}
