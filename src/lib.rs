//! Client SDK for the WDB HTTP API.
//!
//! A [`Client`] holds a base host and a shared secret. Each operation stamps
//! the request with a Unix timestamp, signs it (see [`auth`]), sends exactly
//! one HTTP request and adapts the `{code, msg, data}` envelope into one of
//! three result shapes:
//!
//! - [`ApiResponse`] for plain mutations and reads,
//! - [`ListResponse`] for category and index listings,
//! - [`RawResponse`] for binary (base64) payloads.
//!
//! Operations never return `Err`. Local failures (encoding, transport, empty
//! or malformed bodies) come back as failure envelopes and remote failures
//! are passed through untouched, so callers always branch on `code`.
//!
//! ```no_run
//! use wdb_client_sdk::{Client, Config};
//!
//! # async fn run() -> wdb_client_sdk::Result<()> {
//! let client = Client::new(Config::from_raw("http://127.0.0.1:8000/wdb", "secret")?);
//! let rsp = client.create_obj("doc1", "hello", &["notes"]).await;
//! assert!(rsp.is_success(), "{}", rsp.msg);
//!
//! let tx = client.begin_transaction(&["doc1"]).await.map_err(|rsp| {
//!     wdb_client_sdk::error::Error::validation(rsp.msg)
//! })?;
//! tx.update("doc1", "world").await;
//! tx.commit().await;
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod client;
pub mod config;
pub mod error;
pub mod policy;
mod transaction;
pub mod types;

use reqwest::{Client as ReqwestClient, Request};
use serde::de::DeserializeOwned;

pub use client::{Client, paths};
pub use config::Config;
pub use policy::TimePolicy;
pub use transaction::Transaction;
pub use types::{ApiResponse, ListResponse, Page, RawResponse, RemoteError};

use crate::error::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Unix seconds.
pub type Timestamp = u64;

/// Sends `request` once and decodes the generic envelope from its body.
///
/// The HTTP status is not inspected: the service reports failures in `code`.
pub(crate) async fn request(client: &ReqwestClient, request: Request) -> Result<ApiResponse> {
    #[cfg(feature = "tracing")]
    let (method, path) = (request.method().clone(), request.url().path().to_owned());
    #[cfg(feature = "tracing")]
    tracing::debug!(
        %method,
        path = %path,
        body_len = request.body().and_then(|b| b.as_bytes()).map_or(0, <[u8]>::len),
        "sending request"
    );

    let response = client.execute(request).await?;
    #[cfg(feature = "tracing")]
    let status = response.status();
    let body = response.bytes().await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(%method, path = %path, %status, body_len = body.len(), "received response");

    if body.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::warn!(%method, path = %path, %status, "response body is empty");
        return Err(Error::empty_body());
    }

    decode(&body)
}

/// Decodes a JSON document.
///
/// With the `tracing` feature the error names the offending field path and
/// unknown fields are traced.
pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    #[cfg(feature = "tracing")]
    {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        let mut unknown = Vec::new();
        let mut track = |path: serde_ignored::Path<'_>| unknown.push(path.to_string());
        let ignored = serde_ignored::Deserializer::new(&mut de, &mut track);
        let value: T = serde_path_to_error::deserialize(ignored).map_err(|e| {
            tracing::warn!(error = %e, "failed to decode response");
            Error::decode(e)
        })?;
        de.end().map_err(Error::decode)?;

        if !unknown.is_empty() {
            tracing::trace!(?unknown, "ignored unknown response fields");
        }

        Ok(value)
    }

    #[cfg(not(feature = "tracing"))]
    serde_json::from_slice(bytes).map_err(Error::decode)
}
