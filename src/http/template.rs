use std::path::{Path, PathBuf};

use bytes::Bytes;
use reqwest::{
    Body, Client, Method, Request, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};

use crate::error::{AppResult, ConfigError, HttpError};

const DEFAULT_SCHEME: &str = "http";
const SCHEME_SEPARATOR: &str = "://";

/// Where the request body comes from.
///
/// The bytes are immutable and reference counted, so every attempt gets its
/// own independent `Body` without re-reading the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
    Empty,
    Inline(Bytes),
    File { path: PathBuf, contents: Bytes },
}

impl BodySource {
    /// Interprets `@path` as a file body and anything else as literal content.
    ///
    /// # Errors
    ///
    /// Returns an error when the referenced file cannot be read.
    pub fn from_arg(arg: &str) -> Result<Self, HttpError> {
        if let Some(path) = arg.strip_prefix('@') {
            let path = PathBuf::from(path);
            let contents = std::fs::read(&path)
                .map_err(|source| HttpError::ReadBodyFile {
                    path: path.clone(),
                    source,
                })?;
            return Ok(BodySource::File {
                path,
                contents: Bytes::from(contents),
            });
        }
        if arg.is_empty() {
            return Ok(BodySource::Empty);
        }
        Ok(BodySource::Inline(Bytes::copy_from_slice(arg.as_bytes())))
    }

    /// The file the body was loaded from, if any.
    #[must_use]
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            BodySource::File { path, .. } => Some(path),
            BodySource::Empty | BodySource::Inline(_) => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes().map_or(0, Bytes::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh, unread body for one dispatch.
    #[must_use]
    pub fn fresh_body(&self) -> Option<Body> {
        self.bytes().cloned().map(Body::from)
    }

    const fn bytes(&self) -> Option<&Bytes> {
        match self {
            BodySource::Empty => None,
            BodySource::Inline(bytes) | BodySource::File { contents: bytes, .. } => Some(bytes),
        }
    }
}

/// The one logical request every worker replicates.
#[derive(Debug, Clone)]
pub struct RequestTemplate {
    method: Method,
    body: BodySource,
    headers: HeaderMap,
    target: Url,
}

impl RequestTemplate {
    /// Validates the user-supplied parts and assembles the template.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid method, a malformed header, an
    /// unreadable body file or an unparseable URL.
    pub fn build(method: &str, body: &str, headers: &[String], raw_url: &str) -> AppResult<Self> {
        let method = parse_method(method)?;

        let mut header_map = HeaderMap::with_capacity(headers.len());
        for entry in headers {
            let (name, value) = parse_header_entry(entry)?;
            header_map.append(name, value);
        }

        let target = normalize_url(raw_url)?;
        let body = BodySource::from_arg(body)?;

        Ok(Self {
            method,
            body,
            headers: header_map,
            target,
        })
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn body(&self) -> &BodySource {
        &self.body
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub const fn target(&self) -> &Url {
        &self.target
    }

    /// Mints an independent request for one attempt.
    ///
    /// # Errors
    ///
    /// Returns the client's error when the request cannot be assembled.
    pub fn to_request(&self, client: &Client) -> Result<Request, reqwest::Error> {
        let mut builder = client
            .request(self.method.clone(), self.target.clone())
            .headers(self.headers.clone());
        if let Some(body) = self.body.fresh_body() {
            builder = builder.body(body);
        }
        builder.build()
    }
}

/// Parses the target, treating input without `://` as schemeless and
/// defaulting the scheme to `http`.
///
/// # Errors
///
/// Returns an error when the URL cannot be parsed or uses a scheme other than
/// http/https.
pub fn normalize_url(raw: &str) -> Result<Url, HttpError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains(SCHEME_SEPARATOR) {
        trimmed.to_owned()
    } else {
        let authority = trimmed.strip_prefix("//").unwrap_or(trimmed);
        tracing::debug!("Adding {}{} to input url", DEFAULT_SCHEME, SCHEME_SEPARATOR);
        format!("{}{}{}", DEFAULT_SCHEME, SCHEME_SEPARATOR, authority)
    };

    let url = Url::parse(&candidate).map_err(|source| HttpError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HttpError::UnsupportedScheme {
            url: raw.to_owned(),
            scheme: other.to_owned(),
        }),
    }
}

/// Splits a `key:value` header entry. Exactly one `:` is allowed.
///
/// # Errors
///
/// Returns an error when the entry is not a single pair or is not a valid
/// header name/value.
pub fn parse_header_entry(entry: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let malformed = || ConfigError::MalformedHeader {
        value: entry.to_owned(),
    };

    let mut parts = entry.split(':');
    let (Some(key), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed());
    }

    let name =
        HeaderName::from_bytes(key.as_bytes()).map_err(|source| ConfigError::InvalidHeaderName {
            name: key.to_owned(),
            source,
        })?;
    let value =
        HeaderValue::from_str(value.trim()).map_err(|source| ConfigError::InvalidHeaderValue {
            name: key.to_owned(),
            source,
        })?;
    Ok((name, value))
}

/// Accepts any method token; input is upper-cased first so `post` means `POST`.
///
/// # Errors
///
/// Returns an error when the value is not a valid method token.
pub fn parse_method(value: &str) -> Result<Method, ConfigError> {
    let normalized = value.trim().to_ascii_uppercase();
    Method::from_bytes(normalized.as_bytes()).map_err(|source| ConfigError::InvalidMethod {
        value: value.to_owned(),
        source,
    })
}
