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

use crate::Result;
use crate::errors::CredentialsError;
use crate::token::Token;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};

const REFRESH_MARGIN: Duration = Duration::from_secs(10);

/// Fetches a fresh token, for example from the OAuth2 token endpoint.
#[async_trait::async_trait]
pub(crate) trait TokenProvider: std::fmt::Debug + Send + Sync {
    async fn token(&self) -> Result<Token>;
}

#[derive(Debug)]
pub(crate) struct TokenCache<T>
where
    T: TokenProvider,
{
    // The cached token, or the last seen error.
    token: Arc<Mutex<Result<Token>>>,

    // Tracks if a refresh is ongoing. If the lock is held, there is a refresh.
    refresh_in_progress: Arc<Mutex<()>>,
    // Allows us to await the result of a refresh in multiple tasks.
    refresh_notify: Arc<Notify>,

    // The token provider. This thing does the refreshing.
    inner: Arc<T>,
}

fn invalid(token: &Result<Token>) -> bool {
    match token {
        Ok(t) => t.expires_within(REFRESH_MARGIN),
        Err(_) => true,
    }
}

impl<T: TokenProvider> TokenCache<T> {
    pub(crate) fn new(inner: T) -> TokenCache<T> {
        TokenCache {
            token: Arc::new(Mutex::new(Err(CredentialsError::from_msg(
                true,
                "no token in the cache yet",
            )))),
            refresh_in_progress: Arc::new(Mutex::new(())),
            refresh_notify: Arc::new(Notify::new()),
            inner: Arc::new(inner),
        }
    }

    // Clones the current token, in a thread-safe manner. Releases the lock on return.
    async fn current_token(&self) -> Result<Token> {
        self.token.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl<T: TokenProvider + 'static> TokenProvider for TokenCache<T> {
    async fn token(&self) -> Result<Token> {
        let token = self.current_token().await;
        if !invalid(&token) {
            return token;
        }

        // Register interest before checking for an ongoing refresh, otherwise
        // a refresh completing in between would be missed.
        let notified = self.refresh_notify.notified();
        match self.refresh_in_progress.try_lock() {
            Ok(guard) => {
                let token = self.inner.token().await;
                *self.token.lock().await = token.clone();
                drop(guard);
                self.refresh_notify.notify_waiters();
                return token;
            }
            Err(_) => {
                notified.await;
            }
        }

        // The refresh operation has completed. We should have a new
        // error/token. Return it.
        self.current_token().await
    }
}
