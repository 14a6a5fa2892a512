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

//! A client for the [Google Drive API] `files` resource.
//!
//! The client creates files with a single [multipart upload]: the file
//! metadata and its contents travel in one `multipart/related` request.
//! There are no resumable uploads and no automatic retries.
//!
//! # Example
//! ```no_run
//! # tokio_test::block_on(async {
//! use drive_upload_auth::credentials::service_account;
//! use drive_upload_files::client::Drive;
//!
//! let key = service_account::load_key("service_account.json").await?;
//! let credentials = service_account::Builder::new(key).build()?;
//! let client = Drive::builder().with_credentials(credentials).build()?;
//! let file = client
//!     .create_file("output.wav", std::fs::read("output.wav")?)
//!     .with_mime_type("audio/wav")
//!     .send()
//!     .await?;
//! println!("Uploaded to Drive, File ID: {:?}", file.id);
//! # Ok::<(), anyhow::Error>(())
//! # });
//! ```
//!
//! [Google Drive API]: https://developers.google.com/workspace/drive/api/reference/rest/v3
//! [multipart upload]: https://developers.google.com/workspace/drive/api/guides/manage-uploads#multipart

pub mod error;
pub mod model;

mod drive;

/// Clients to interact with Google Drive.
pub mod client {
    pub use crate::drive::client::Drive;
}
/// Request builders.
pub mod builder {
    pub mod drive {
        pub use crate::drive::client::ClientBuilder;
        pub use crate::drive::create_file::CreateFile;
    }
}

pub use error::Error;

/// A `Result` alias where the `Err` case is [Error].
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const X_GOOG_API_CLIENT_HEADER: &str =
    concat!("gl-rust gccl/", env!("CARGO_PKG_VERSION"));
