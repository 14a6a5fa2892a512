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

use drive_upload_auth::build_errors::Error as BuildError;
use std::path::{Path, PathBuf};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The ways an upload can fail.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The service account key file is missing, unreadable, or malformed.
    #[error("cannot load the service account credentials from {}", .path.display())]
    CredentialLoad {
        path: PathBuf,
        #[source]
        source: BuildError,
    },

    /// The credentials were rejected, either by the token endpoint or by Drive.
    #[error("the service account credentials were rejected")]
    Authentication(#[source] drive_upload_files::Error),

    /// The local file could not be read, or the service did not accept it.
    #[error("cannot upload {} to Google Drive", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// The result line could not be written.
    #[error("cannot write the upload result")]
    Output(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn upload<E: Into<BoxError>>(path: &Path, source: E) -> Self {
        Self::Upload {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn upload() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "test-only");
        let error = Error::upload(Path::new("output.wav"), source);
        assert!(matches!(error, Error::Upload { .. }), "{error:?}");
        assert!(error.to_string().contains("output.wav"), "{error}");
        let got = error
            .source()
            .and_then(|e| e.downcast_ref::<std::io::Error>());
        assert!(
            got.is_some_and(|e| e.kind() == std::io::ErrorKind::NotFound),
            "{error:?}"
        );
    }

    #[test]
    fn output() {
        let error = Error::Output(std::io::Error::other("broken pipe"));
        assert!(error.source().is_some(), "{error:?}");
        assert!(error.to_string().contains("upload result"), "{error}");
    }
}
