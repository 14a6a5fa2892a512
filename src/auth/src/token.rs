// Copyright 2024 Google LLC
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

//! Access tokens issued by the OAuth2 token endpoint.

use crate::Result;
use crate::errors;
use http::HeaderMap;
use http::header::{AUTHORIZATION, HeaderValue};
use std::time::Duration;
use tokio::time::Instant;

/// An OAuth2 access token, obtained by exchanging a signed service account
/// assertion.
#[derive(Clone, PartialEq)]
pub struct Token {
    /// The access token sent in the `Authorization:` header.
    pub token: String,

    /// The type of the token, `"Bearer"` for service account exchanges.
    pub token_type: String,

    /// The instant at which the token expires.
    ///
    /// `None` if the token endpoint did not report a lifetime. The `Instant`
    /// is only meaningful in the current process.
    pub expires_at: Option<Instant>,
}

impl Token {
    /// Creates a token from the lifetime reported by the token endpoint.
    ///
    /// `expires_in` is in seconds, counted from now. A lifetime that cannot
    /// be represented as an `Instant` is a permanent error.
    pub(crate) fn with_lifetime(
        token: String,
        token_type: String,
        expires_in: Option<u64>,
    ) -> Result<Token> {
        let expires_at = match expires_in {
            None => None,
            Some(secs) => Some(
                Instant::now()
                    .checked_add(Duration::from_secs(secs))
                    .ok_or_else(|| {
                        errors::non_retryable_from_str(format!(
                            "the token endpoint returned an out of range lifetime: expires_in={secs}"
                        ))
                    })?,
            ),
        };
        Ok(Token {
            token,
            token_type,
            expires_at,
        })
    }

    /// Returns `true` if the token expires within `margin` from now.
    pub(crate) fn expires_within(&self, margin: Duration) -> bool {
        self.expires_at
            .is_some_and(|e| e.saturating_duration_since(Instant::now()) <= margin)
    }

    /// The `authorization` header for Drive requests, marked sensitive.
    pub(crate) fn headers(&self) -> Result<HeaderMap> {
        let mut value = HeaderValue::from_str(&format!("{} {}", self.token_type, self.token))
            .map_err(errors::non_retryable)?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::with_capacity(1);
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token", &"[censored]")
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
