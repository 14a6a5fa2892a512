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

pub mod service_account;

use crate::errors::CredentialsError;
use crate::token::Token;
use http::HeaderMap;
use std::sync::Arc;

/// A `Result` alias where the `Err` case is [CredentialsError].
pub type Result<T> = std::result::Result<T, CredentialsError>;

/// An implementation of [CredentialsProvider].
///
/// Represents a [Credentials] used to obtain the auth request headers.
///
/// In general, [Credentials][credentials-link] are "digital object that
/// provide proof of identity", the archetype may be a username and password
/// combination, but a private RSA key may be a better example.
///
/// Modern authentication protocols do not send the credentials to
/// authenticate with a service. Even when sent over a secure transport, the
/// credentials may be accidentally exposed. Instead, the credentials are used
/// to create a time-limited access token, which is sent with each request.
///
/// [credentials-link]: https://cloud.google.com/docs/authentication#credentials
#[derive(Clone, Debug)]
pub struct Credentials {
    // We use an `Arc` to hold the inner implementation.
    //
    // Credentials may be shared across clients and tasks, an `Arc` makes
    // the clones cheap while keeping a single token cache.
    inner: Arc<dyn CredentialsProvider>,
}

impl<T> From<T> for Credentials
where
    T: CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Returns the headers needed to authenticate a request.
    ///
    /// This may trigger a token exchange if there is no cached token, or the
    /// cached token is about to expire.
    pub async fn headers(&self) -> Result<HeaderMap> {
        self.inner.headers().await
    }

    /// Returns an access token, refreshing it if needed.
    pub async fn token(&self) -> Result<Token> {
        self.inner.token().await
    }
}

/// Produces the authentication material for each request.
///
/// Applications rarely implement this trait. It is useful to mock
/// credentials in tests, or to wrap credentials obtained by other means.
#[async_trait::async_trait]
pub trait CredentialsProvider: std::fmt::Debug + Send + Sync {
    /// Asynchronously retrieves an access token.
    async fn token(&self) -> Result<Token>;

    /// Asynchronously constructs the auth headers.
    async fn headers(&self) -> Result<HeaderMap>;
}

/// Fake credentials for tests of code that consumes [Credentials].
pub mod testing {
    use super::{Credentials, CredentialsProvider, Result};
    use crate::errors::CredentialsError;
    use crate::token::Token;
    use http::HeaderMap;
    use http::header::{AUTHORIZATION, HeaderValue};

    /// Returns credentials that always succeed with a fixed token.
    ///
    /// The headers contain `authorization: Bearer test-only-token`.
    pub fn test_credentials() -> Credentials {
        Credentials::from(TestCredentials)
    }

    /// Returns credentials that always fail to produce a token.
    pub fn error_credentials(retryable: bool) -> Credentials {
        Credentials::from(ErrorCredentials(retryable))
    }

    #[derive(Debug)]
    struct TestCredentials;

    #[async_trait::async_trait]
    impl CredentialsProvider for TestCredentials {
        async fn token(&self) -> Result<Token> {
            Ok(Token {
                token: "test-only-token".to_string(),
                token_type: "Bearer".to_string(),
                expires_at: None,
            })
        }

        async fn headers(&self) -> Result<HeaderMap> {
            let mut headers = HeaderMap::new();
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_static("Bearer test-only-token"),
            );
            Ok(headers)
        }
    }

    #[derive(Debug)]
    struct ErrorCredentials(bool);

    #[async_trait::async_trait]
    impl CredentialsProvider for ErrorCredentials {
        async fn token(&self) -> Result<Token> {
            Err(CredentialsError::from_msg(self.0, "test-only credentials error"))
        }

        async fn headers(&self) -> Result<HeaderMap> {
            Err(CredentialsError::from_msg(self.0, "test-only credentials error"))
        }
    }
}
