//! Extractor configuration for inbound HTTP adapters.
//!
//! Malformed JSON bodies, query strings and path segments are rejected with an
//! `invalid_request` failure envelope whose message names the offending field,
//! instead of Actix's default plain-text responses.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::web;
use tracing::debug;

use crate::domain::Error;

/// Where a rejected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    Body,
    Query,
    Path,
}

impl Source {
    fn as_str(self) -> &'static str {
        match self {
            Self::Body => "request body",
            Self::Query => "query string",
            Self::Path => "path",
        }
    }
}

pub(crate) fn rejection(source: Source, detail: impl std::fmt::Display) -> Error {
    debug!(source = source.as_str(), %detail, "request rejected by extractor");
    Error::invalid_request(format!("invalid {}: {detail}", source.as_str()))
}

fn json_rejection(err: JsonPayloadError) -> Error {
    match err {
        JsonPayloadError::Deserialize(inner) => rejection(Source::Body, inner),
        JsonPayloadError::ContentType => {
            rejection(Source::Body, "content type must be application/json")
        }
        other => rejection(Source::Body, other),
    }
}

fn query_rejection(err: QueryPayloadError) -> Error {
    match err {
        QueryPayloadError::Deserialize(inner) => rejection(Source::Query, inner),
        other => rejection(Source::Query, other),
    }
}

fn path_rejection(err: PathError) -> Error {
    match err {
        PathError::Deserialize(inner) => rejection(Source::Path, inner),
        other => rejection(Source::Path, other),
    }
}

/// Extractor outcome held back until the caller has been authorised.
pub type Extracted<T> = Result<T, actix_web::Error>;

/// Unwrap an extractor outcome, recovering the `invalid_request` error built
/// by the configs in this module.
///
/// Rejections from extractors without those configs still map to
/// `invalid_request`.
pub fn accepted<T>(extracted: Extracted<T>) -> Result<T, Error> {
    extracted.map_err(|err| match err.as_error::<Error>() {
        Some(rejected) => rejected.clone(),
        None => Error::invalid_request(format!("invalid request: {err}")),
    })
}

/// JSON body extractor that answers with failure envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| json_rejection(err).into())
}

/// Query-string extractor that answers with failure envelopes.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| query_rejection(err).into())
}

/// Path extractor that answers with failure envelopes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| path_rejection(err).into())
}
