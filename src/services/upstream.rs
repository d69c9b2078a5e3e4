//! Forwarding of admitted requests to the protected backend.
//!
//! The request is passed on as received: method, headers (including `Authorization`)
//! and body are untouched; only the URI is re-pointed at the upstream origin.
use axum::{
    body::Body,
    extract::Request,
    http::{
        Uri, Version,
        uri::{InvalidUri, InvalidUriParts, PathAndQuery},
    },
    response::Response,
};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};
use thiserror::Error;

use crate::error::AppError;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("invalid upstream uri: {0}")]
    InvalidUri(#[from] InvalidUri),
    #[error("invalid upstream uri: {0}")]
    InvalidUriParts(#[from] InvalidUriParts),
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Request(err) => {
                tracing::warn!(error = %err, "upstream request failed");
                AppError::BadGateway
            }
            other => {
                tracing::error!(error = %other, "failed to build upstream uri");
                AppError::Internal
            }
        }
    }
}

pub struct Upstream {
    base: Uri,
    client: Client<HttpConnector, Body>,
}

impl std::fmt::Debug for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Upstream").field("base", &self.base).finish()
    }
}

impl Upstream {
    /// `base` must be an absolute `http://` URI; its path (if any) prefixes every forwarded path.
    pub fn new(base: Uri) -> Self {
        let client = Client::builder(TokioExecutor::new()).build_http();
        Self { base, client }
    }

    /// Map the inbound request URI onto the upstream origin.
    pub fn target(&self, original: &Uri) -> Result<Uri, UpstreamError> {
        let base_path = self.base.path().trim_end_matches('/');
        let path_and_query = original
            .path_and_query()
            .map(PathAndQuery::as_str)
            .unwrap_or("/");

        let mut parts = self.base.clone().into_parts();
        parts.path_and_query = Some(format!("{base_path}{path_and_query}").parse()?);

        Ok(Uri::from_parts(parts)?)
    }

    pub async fn forward(&self, mut req: Request) -> Result<Response, UpstreamError> {
        *req.uri_mut() = self.target(req.uri())?;
        // The upstream connection is HTTP/1.1 regardless of the inbound protocol.
        *req.version_mut() = Version::HTTP_11;
        tracing::debug!(method = %req.method(), uri = %req.uri(), "forwarding");

        let res = self.client.request(req).await?;

        Ok(res.map(Body::new))
    }
}
