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

//! Errors returned by the Drive client.

pub mod rpc;

use drive_upload_auth::errors::CredentialsError;
use http::HeaderMap;
use rpc::Status;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all client operations.
///
/// Applications rarely need to create instances of this type. Use the
/// predicates to decide how to handle the error:
///
/// ```
/// # use drive_upload_files::Error;
/// fn handle(e: &Error) {
///     if e.is_authentication() {
///         println!("check the service account key: {e}");
///     } else if let Some(code) = e.http_status_code() {
///         println!("the service rejected the request with {code}: {e}");
///     } else {
///         println!("the request did not complete: {e}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

impl Error {
    /// The request could not be built from the given parameters.
    ///
    /// No request was sent to the service.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, ErrorKind::Binding)
    }

    /// The request could not be serialized.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// The response could not be deserialized.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// The request was not authorized.
    ///
    /// Either the credentials failed to produce an access token, or the
    /// service rejected the token with `401 Unauthorized`.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication) || self.http_status_code() == Some(401)
    }

    /// The credentials were rejected and will not work if the request is repeated.
    ///
    /// Returns `true` when the service answered `401 Unauthorized`, or when
    /// the credentials failed with a permanent error, for example the token
    /// endpoint refused the signed assertion. Transient token errors, such as
    /// an unreachable or unavailable token endpoint, return `false`.
    pub fn is_credentials_rejected(&self) -> bool {
        if self.http_status_code() == Some(401) {
            return true;
        }
        if !matches!(self.kind, ErrorKind::Authentication) {
            return false;
        }
        self.source
            .as_ref()
            .and_then(|e| e.downcast_ref::<CredentialsError>())
            .is_some_and(|e| !e.is_retryable())
    }

    /// The request exceeded the client timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }

    /// The request failed before receiving an HTTP response.
    pub fn is_io(&self) -> bool {
        matches!(
            &self.kind,
            ErrorKind::Transport(d) if d.status_code.is_none() && d.payload.is_none()
        )
    }

    /// The service returned an error.
    ///
    /// Returns `Some` when the response carried the Google JSON error envelope.
    pub fn status(&self) -> Option<&Status> {
        match &self.kind {
            ErrorKind::Service(d) => Some(&d.status),
            _ => None,
        }
    }

    /// The HTTP status code of the failed response, if there was one.
    pub fn http_status_code(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport(d) => d.status_code,
            ErrorKind::Service(d) => d.status_code,
            _ => None,
        }
    }

    /// The HTTP headers of the failed response, if there was one.
    pub fn http_headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Transport(d) => d.headers.as_ref(),
            ErrorKind::Service(d) => d.headers.as_ref(),
            _ => None,
        }
    }

    /// The body of a failed response without a Google JSON error envelope.
    pub fn http_payload(&self) -> Option<&bytes::Bytes> {
        match &self.kind {
            ErrorKind::Transport(d) => d.payload.as_ref(),
            _ => None,
        }
    }

    pub(crate) fn binding<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Binding, source)
    }

    pub(crate) fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Serialization, source)
    }

    pub(crate) fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Deserialization, source)
    }

    pub(crate) fn authentication(source: CredentialsError) -> Self {
        Self::with_source(ErrorKind::Authentication, source)
    }

    pub(crate) fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self::with_source(ErrorKind::Timeout, source)
    }

    pub(crate) fn io<T: Into<BoxError>>(source: T) -> Self {
        let details = TransportDetails {
            status_code: None,
            headers: None,
            payload: None,
        };
        Self::with_source(ErrorKind::Transport(Box::new(details)), source)
    }

    pub(crate) fn http(status_code: u16, headers: HeaderMap, payload: bytes::Bytes) -> Self {
        let details = TransportDetails {
            status_code: Some(status_code),
            headers: Some(headers),
            payload: Some(payload),
        };
        Self {
            kind: ErrorKind::Transport(Box::new(details)),
            source: None,
        }
    }

    pub(crate) fn service_with_http_metadata(
        status: Status,
        status_code: Option<u16>,
        headers: Option<HeaderMap>,
    ) -> Self {
        let details = ServiceDetails {
            status_code,
            headers,
            status,
        };
        Self {
            kind: ErrorKind::Service(Box::new(details)),
            source: None,
        }
    }

    fn with_source<T: Into<BoxError>>(kind: ErrorKind, source: T) -> Self {
        Self {
            kind,
            source: Some(source.into()),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.source) {
            (ErrorKind::Binding, Some(e)) => {
                write!(f, "cannot build the request {e}")
            }
            (ErrorKind::Serialization, Some(e)) => write!(f, "cannot serialize the request {e}"),
            (ErrorKind::Deserialization, Some(e)) => {
                write!(f, "cannot deserialize the response {e}")
            }
            (ErrorKind::Authentication, Some(e)) => {
                write!(f, "cannot create the authentication headers {e}")
            }
            (ErrorKind::Timeout, Some(e)) => {
                write!(f, "the request exceeded the client timeout {e}")
            }
            (ErrorKind::Transport(details), _) => details.display(self.source(), f),
            (ErrorKind::Service(d), _) => {
                write!(f, "the service reports an error")?;
                if let Some(code) = d.status_code {
                    write!(f, " with HTTP status {code}")?;
                }
                if let Some(status) = &d.status.status {
                    write!(f, " ({status})")?;
                }
                write!(f, " described as: {}", d.status.message)
            }
            (_, None) => write!(f, "an unclassified problem making a request"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &dyn StdError)
    }
}

#[derive(Debug)]
enum ErrorKind {
    Binding,
    Serialization,
    Deserialization,
    Authentication,
    Timeout,
    Transport(Box<TransportDetails>),
    Service(Box<ServiceDetails>),
}

#[derive(Debug)]
struct TransportDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    payload: Option<bytes::Bytes>,
}

impl TransportDetails {
    fn display(
        &self,
        source: Option<&(dyn StdError + 'static)>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match (source, self) {
            (
                _,
                TransportDetails {
                    status_code: Some(code),
                    payload: Some(p),
                    ..
                },
            ) => {
                if let Ok(message) = std::str::from_utf8(p.as_ref()) {
                    write!(f, "the HTTP transport reports a [{code}] error: {message}")
                } else {
                    write!(f, "the HTTP transport reports a [{code}] error: {p:?}")
                }
            }
            (Some(source), _) => {
                write!(f, "the transport reports an error: {source}")
            }
            (None, _) => write!(f, "the transport reports an unknown error"),
        }
    }
}

#[derive(Debug)]
struct ServiceDetails {
    status_code: Option<u16>,
    headers: Option<HeaderMap>,
    status: Status,
}

/// Converts a failed HTTP response into an [Error].
///
/// Responses with a Google JSON error envelope become service errors, any
/// other payload is preserved verbatim.
pub(crate) async fn to_http_error<O>(response: reqwest::Response) -> crate::Result<O> {
    let status_code = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await.map_err(map_send_error)?;

    let error = match Status::try_from(&body) {
        Ok(status) => Error::service_with_http_metadata(status, Some(status_code), Some(headers)),
        Err(_) => Error::http(status_code, headers, body),
    };
    Err(error)
}

pub(crate) fn map_send_error(err: reqwest::Error) -> Error {
    match err {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use test_case::test_case;

    fn test_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-type",
            HeaderValue::from_static("application/json"),
        );
        headers
    }

    #[test]
    fn binding() {
        let error = Error::binding("the file name cannot be empty");
        assert!(error.is_binding(), "{error:?}");
        assert!(error.source().is_some(), "{error:?}");
        assert!(
            error.to_string().contains("the file name cannot be empty"),
            "{error}"
        );
        assert!(!error.is_authentication(), "{error:?}");
        assert!(error.http_status_code().is_none(), "{error:?}");
        assert!(error.status().is_none(), "{error:?}");
    }

    #[test]
    fn serialization() {
        let error = Error::ser("bad mime type");
        assert!(error.is_serialization(), "{error:?}");
        assert!(error.to_string().contains("bad mime type"), "{error}");

        let error = Error::deser("not json");
        assert!(error.is_deserialization(), "{error:?}");
        assert!(error.to_string().contains("not json"), "{error}");
    }

    #[test]
    fn authentication() {
        let source = CredentialsError::from_msg(false, "test-only-revoked");
        let error = Error::authentication(source);
        assert!(error.is_authentication(), "{error:?}");
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<CredentialsError>());
        assert!(got.is_some_and(|e| !e.is_retryable()), "{error:?}");
        assert!(error.to_string().contains("test-only-revoked"), "{error}");
        assert!(error.is_credentials_rejected(), "{error:?}");
    }

    #[test]
    fn authentication_transient() {
        let source = CredentialsError::from_msg(true, "test-only-unavailable");
        let error = Error::authentication(source);
        assert!(error.is_authentication(), "{error:?}");
        assert!(!error.is_credentials_rejected(), "{error:?}");
    }

    #[test]
    fn timeout() {
        let error = Error::timeout("test-only-deadline");
        assert!(error.is_timeout(), "{error:?}");
        assert!(!error.is_io(), "{error:?}");
        assert!(error.to_string().contains("test-only-deadline"), "{error}");
    }

    #[test]
    fn io() {
        let error = Error::io(std::io::Error::other("connection reset"));
        assert!(error.is_io(), "{error:?}");
        assert!(error.http_status_code().is_none(), "{error:?}");
        assert!(error.http_headers().is_none(), "{error:?}");
        assert!(error.http_payload().is_none(), "{error:?}");
        assert!(error.to_string().contains("connection reset"), "{error}");
    }

    #[test]
    fn http() {
        let error = Error::http(
            503,
            test_headers(),
            bytes::Bytes::from_static(b"try-again"),
        );
        assert!(!error.is_io(), "{error:?}");
        assert!(!error.is_authentication(), "{error:?}");
        assert_eq!(error.http_status_code(), Some(503));
        assert_eq!(error.http_headers(), Some(&test_headers()));
        assert_eq!(
            error.http_payload(),
            Some(&bytes::Bytes::from_static(b"try-again"))
        );
        assert!(error.to_string().contains("[503]"), "{error}");
        assert!(error.to_string().contains("try-again"), "{error}");
    }

    #[test_case(401, true)]
    #[test_case(403, false)]
    #[test_case(404, false)]
    #[test_case(500, false)]
    fn http_authentication(code: u16, want: bool) {
        let error = Error::http(code, HeaderMap::new(), bytes::Bytes::from_static(b"denied"));
        assert_eq!(error.is_authentication(), want, "{error:?}");
        assert_eq!(error.is_credentials_rejected(), want, "{error:?}");
        assert_eq!(error.http_status_code(), Some(code));
    }

    #[test]
    fn service() {
        let status = Status {
            code: 404,
            message: "File not found: test-only-folder.".to_string(),
            status: Some("NOT_FOUND".to_string()),
            errors: Vec::new(),
        };
        let error =
            Error::service_with_http_metadata(status.clone(), Some(404), Some(test_headers()));
        assert_eq!(error.status(), Some(&status));
        assert_eq!(error.http_status_code(), Some(404));
        assert_eq!(error.http_headers(), Some(&test_headers()));
        assert!(error.http_payload().is_none(), "{error:?}");
        assert!(error.source().is_none(), "{error:?}");
        let fmt = error.to_string();
        assert!(fmt.contains("404"), "{fmt}");
        assert!(fmt.contains("NOT_FOUND"), "{fmt}");
        assert!(fmt.contains("File not found: test-only-folder."), "{fmt}");
    }

    #[test]
    fn service_unauthorized() {
        let status = Status {
            code: 401,
            message: "Request had invalid authentication credentials.".to_string(),
            status: Some("UNAUTHENTICATED".to_string()),
            errors: Vec::new(),
        };
        let error = Error::service_with_http_metadata(status, Some(401), None);
        assert!(error.is_authentication(), "{error:?}");
    }
}
