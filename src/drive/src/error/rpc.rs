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

//! The error model used by Google JSON APIs.

use crate::error::Error;
use serde::{Deserialize, Serialize};

/// The error details reported by the service.
///
/// Drive returns errors wrapped in an envelope:
///
/// ```json
/// {
///   "error": {
///     "code": 404,
///     "message": "File not found: 1a2b3c.",
///     "errors": [
///       { "domain": "global", "reason": "notFound", "message": "File not found: 1a2b3c." }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct Status {
    /// The HTTP status code reported in the payload.
    pub code: i32,

    /// A developer-facing error message, in English.
    pub message: String,

    /// The canonical status name, such as `NOT_FOUND`, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The legacy list of error reasons.
    pub errors: Vec<ErrorDetail>,
}

/// One entry in the legacy `errors` list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
#[non_exhaustive]
pub struct ErrorDetail {
    /// The scope of the error, typically `global`.
    pub domain: String,

    /// A short machine readable reason, such as `notFound` or `storageQuotaExceeded`.
    pub reason: String,

    /// The message for this entry.
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ErrorWrapper {
    error: Status,
}

impl TryFrom<&bytes::Bytes> for Status {
    type Error = Error;

    fn try_from(value: &bytes::Bytes) -> Result<Self, Self::Error> {
        serde_json::from_slice::<ErrorWrapper>(value)
            .map(|w| w.error)
            .map_err(Error::deser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SAMPLE_PAYLOAD: &[u8] = b"{\n  \"error\": {\n    \"code\": 404,\n    \"message\": \"File not found: test-only-folder.\",\n    \"errors\": [\n      {\n        \"message\": \"File not found: test-only-folder.\",\n        \"domain\": \"global\",\n        \"reason\": \"notFound\",\n        \"location\": \"fileId\",\n        \"locationType\": \"parameter\"\n      }\n    ]\n  }\n}\n";

    #[test]
    fn try_from_bytes() -> anyhow::Result<()> {
        let got = Status::try_from(&bytes::Bytes::from_static(SAMPLE_PAYLOAD))?;
        let want = Status {
            code: 404,
            message: "File not found: test-only-folder.".to_string(),
            status: None,
            errors: vec![ErrorDetail {
                domain: "global".to_string(),
                reason: "notFound".to_string(),
                message: "File not found: test-only-folder.".to_string(),
            }],
        };
        assert_eq!(got, want);
        Ok(())
    }

    #[test]
    fn try_from_bytes_with_status() -> anyhow::Result<()> {
        let payload = json!({
            "error": {
                "code": 401,
                "message": "Request had invalid authentication credentials.",
                "status": "UNAUTHENTICATED",
            }
        });
        let got = Status::try_from(&bytes::Bytes::from(payload.to_string()))?;
        assert_eq!(got.code, 401);
        assert_eq!(got.status.as_deref(), Some("UNAUTHENTICATED"));
        assert!(got.errors.is_empty(), "{got:?}");
        Ok(())
    }

    #[test]
    fn try_from_bytes_errors() {
        let got = Status::try_from(&bytes::Bytes::from_static(b"\"error\": 1234"));
        let err = got.unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");

        let got = Status::try_from(&bytes::Bytes::from_static(b"{\"missing-error\": 1234}"));
        let err = got.unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");

        let got = Status::try_from(&bytes::Bytes::from_static(b"<html>Bad Gateway</html>"));
        let err = got.unwrap_err();
        assert!(err.is_deserialization(), "{err:?}");
    }
}
