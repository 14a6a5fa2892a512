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

//! Drive upload - Authentication Components
//!
//! This crate turns a [service account key] file into credentials that can
//! authenticate requests to Google APIs, in particular the Drive API.
//!
//! The credentials sign a JWT assertion with the service account private key
//! and exchange it for an OAuth2 access token, following the
//! [JWT bearer flow]. The resulting token is cached until it is about to
//! expire.
//!
//! ```no_run
//! # use drive_upload_auth::credentials::service_account;
//! # tokio_test::block_on(async {
//! let json = service_account::load_key("service_account.json").await?;
//! let credentials = service_account::Builder::new(json)
//!     .with_scopes(["https://www.googleapis.com/auth/drive"])
//!     .build()?;
//! let _headers = credentials.headers().await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```
//!
//! [service account key]: https://google.aip.dev/auth/4112
//! [JWT bearer flow]: https://developers.google.com/identity/protocols/oauth2/service-account#httprest

pub mod build_errors;
pub mod errors;

/// Types and functions to work with service account [Credentials].
///
/// [Credentials]: https://cloud.google.com/docs/authentication#credentials
pub mod credentials;

/// Types and functions to work with auth [Tokens].
///
/// [Tokens]: https://cloud.google.com/docs/authentication#token
pub mod token;

pub(crate) mod constants;
pub(crate) mod token_cache;

/// A `Result` alias where the `Err` case is
/// `drive_upload_auth::errors::CredentialsError`.
pub(crate) type Result<T> = std::result::Result<T, crate::errors::CredentialsError>;
