// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Errors reading and validating service account keys.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// The error type for [load_key] and the service account [Builder].
///
/// These errors are detected locally, before any request is made. The error
/// records the key file when it is known, and the offending field or
/// credentials type where that applies.
///
/// ```
/// # use drive_upload_auth::build_errors::Error;
/// fn explain(e: &Error) -> String {
///     let file = e
///         .path()
///         .map(|p| p.display().to_string())
///         .unwrap_or_else(|| "<inline>".to_string());
///     if let Some(field) = e.field() {
///         format!("{file}: fill in `{field}`")
///     } else if let Some(found) = e.key_type() {
///         format!("{file}: download a service account key, not `{found}` credentials")
///     } else {
///         format!("{file}: {e}")
///     }
/// }
/// ```
///
/// [load_key]: crate::credentials::service_account::load_key
/// [Builder]: crate::credentials::service_account::Builder
#[derive(Debug)]
pub struct Error {
    path: Option<PathBuf>,
    kind: ErrorKind,
}

impl Error {
    /// The key file could not be found or read.
    pub fn is_loading(&self) -> bool {
        matches!(self.kind, ErrorKind::Loading(_))
    }

    /// The key is not valid JSON, lacks a required field, or its private key
    /// cannot be parsed.
    pub fn is_parsing(&self) -> bool {
        matches!(self.kind, ErrorKind::Parsing(_))
    }

    /// The file holds some other type of credentials.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownType(_))
    }

    /// A required field is present but empty.
    pub fn is_missing_field(&self) -> bool {
        matches!(self.kind, ErrorKind::MissingField(_))
    }

    /// The key file, if the key was read from one.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The empty field, for [is_missing_field()][Error::is_missing_field] errors.
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::MissingField(f) => Some(*f),
            _ => None,
        }
    }

    /// The `type` found in the file, for
    /// [is_unknown_type()][Error::is_unknown_type] errors.
    pub fn key_type(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::UnknownType(t) => Some(t.as_str()),
            _ => None,
        }
    }

    pub(crate) fn loading(path: &Path, source: std::io::Error) -> Error {
        Error::new(ErrorKind::Loading(source)).with_path(path)
    }

    pub(crate) fn parsing<T: Into<BoxError>>(source: T) -> Error {
        Error::new(ErrorKind::Parsing(source.into()))
    }

    pub(crate) fn unknown_type<T: Into<String>>(found: T) -> Error {
        Error::new(ErrorKind::UnknownType(found.into()))
    }

    pub(crate) fn missing_field(field: &'static str) -> Error {
        Error::new(ErrorKind::MissingField(field))
    }

    pub(crate) fn with_path(mut self, path: &Path) -> Error {
        self.path = Some(path.to_path_buf());
        self
    }

    fn new(kind: ErrorKind) -> Error {
        Error { path: None, kind }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(p) => write!(f, "invalid service account key {}: {}", p.display(), self.kind),
            None => write!(f, "invalid service account key: {}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.kind.source()
    }
}

#[derive(thiserror::Error, Debug)]
enum ErrorKind {
    #[error("cannot read the file {0}")]
    Loading(#[source] std::io::Error),
    #[error("cannot parse the key {0}")]
    Parsing(#[source] BoxError),
    #[error("found credentials of type `{0}`, expected `service_account`")]
    UnknownType(String),
    #[error("the `{0}` field is empty")]
    MissingField(&'static str),
}

/// A `Result` alias where the `Err` case is `drive_upload_auth::build_errors::Error`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "test-only-missing");
        let error = Error::loading(Path::new("keys/sa.json"), source);
        assert!(error.is_loading(), "{error:?}");
        assert_eq!(error.path(), Some(Path::new("keys/sa.json")));
        assert!(error.field().is_none(), "{error:?}");
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<std::io::Error>());
        assert!(
            got.is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
            "{error:?}"
        );
        let fmt = error.to_string();
        assert!(fmt.contains("keys/sa.json"), "{fmt}");
        assert!(fmt.contains("test-only-missing"), "{fmt}");
    }

    #[test]
    fn parsing() {
        let error = Error::parsing("test-only-bad-json");
        assert!(error.is_parsing(), "{error:?}");
        assert!(error.path().is_none(), "{error:?}");
        assert!(error.source().is_some(), "{error:?}");
        assert!(error.to_string().contains("test-only-bad-json"), "{error}");

        let error = error.with_path(Path::new("sa.json"));
        assert!(error.is_parsing(), "{error:?}");
        assert_eq!(error.path(), Some(Path::new("sa.json")));
        assert!(error.to_string().contains("sa.json"), "{error}");
    }

    #[test]
    fn unknown_type() {
        let error = Error::unknown_type("authorized_user");
        assert!(error.is_unknown_type(), "{error:?}");
        assert_eq!(error.key_type(), Some("authorized_user"));
        assert!(error.source().is_none(), "{error:?}");
        let fmt = error.to_string();
        assert!(fmt.contains("`authorized_user`"), "{fmt}");
        assert!(fmt.contains("`service_account`"), "{fmt}");
    }

    #[test]
    fn missing_field() {
        let error = Error::missing_field("private_key");
        assert!(error.is_missing_field(), "{error:?}");
        assert_eq!(error.field(), Some("private_key"));
        assert!(error.key_type().is_none(), "{error:?}");
        assert!(error.source().is_none(), "{error:?}");
        assert!(error.to_string().contains("`private_key`"), "{error}");
    }
}
