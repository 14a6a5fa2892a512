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

use super::client::DriveInner;
use crate::error::{map_send_error, to_http_error};
use crate::model::{CreateFileMetadata, File};
use crate::{Error, Result, X_GOOG_API_CLIENT_HEADER};
use reqwest::multipart::{Form, Part};
use std::sync::Arc;

/// A request builder for [Drive::create_file][crate::client::Drive::create_file].
///
/// The file metadata and contents are sent in a single `multipart/related`
/// request. The request is not retried.
///
/// # Example
/// ```
/// # use drive_upload_files::client::Drive;
/// # async fn sample(client: &Drive) -> anyhow::Result<()> {
/// let file = client
///     .create_file("output.wav", std::fs::read("output.wav")?)
///     .with_mime_type("audio/wav")
///     .with_parents(["my-folder-id"])
///     .with_fields("id,name,mimeType")
///     .send()
///     .await?;
/// println!("file={file:?}");
/// # Ok(()) }
/// ```
pub struct CreateFile {
    inner: Arc<DriveInner>,
    name: String,
    payload: bytes::Bytes,
    mime_type: String,
    parents: Vec<String>,
    fields: String,
}

impl CreateFile {
    pub(crate) fn new<N, P>(inner: Arc<DriveInner>, name: N, payload: P) -> Self
    where
        N: Into<String>,
        P: Into<bytes::Bytes>,
    {
        Self {
            inner,
            name: name.into(),
            payload: payload.into(),
            mime_type: DEFAULT_MIME_TYPE.to_string(),
            parents: Vec::new(),
            fields: DEFAULT_FIELDS.to_string(),
        }
    }

    /// Sets the MIME type of the file contents.
    ///
    /// The default is `application/octet-stream`.
    pub fn with_mime_type<V: Into<String>>(mut self, v: V) -> Self {
        self.mime_type = v.into();
        self
    }

    /// Sets the ids of the folders containing the new file.
    ///
    /// By default the file is created in the root folder of the caller, for
    /// service accounts that is a folder only the service account can see.
    pub fn with_parents<I, V>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.parents = v.into_iter().map(Into::into).collect();
        self
    }

    /// Selects the fields returned by the service.
    ///
    /// Uses the Drive [partial response] syntax. The default is `id`.
    ///
    /// [partial response]: https://developers.google.com/workspace/drive/api/guides/fields-parameter
    pub fn with_fields<V: Into<String>>(mut self, v: V) -> Self {
        self.fields = v.into();
        self
    }

    /// Sends the request.
    pub async fn send(self) -> Result<File> {
        let builder = self.http_request_builder().await?;
        tracing::debug!(
            name = %self.name,
            mime_type = %self.mime_type,
            size = self.payload.len(),
            "sending multipart upload"
        );
        let response = builder.send().await.map_err(map_send_error)?;
        let file = self::handle_file_response(response).await?;
        tracing::info!("created file {:?}", file.id);
        Ok(file)
    }

    async fn http_request_builder(&self) -> Result<reqwest::RequestBuilder> {
        if self.name.is_empty() {
            return Err(Error::binding("the file name cannot be empty"));
        }
        let builder = self
            .inner
            .client
            .request(
                reqwest::Method::POST,
                format!("{}/upload/drive/v3/files", &self.inner.endpoint),
            )
            .query(&[("uploadType", "multipart")])
            .query(&[("fields", &self.fields)])
            .header(
                "x-goog-api-client",
                reqwest::header::HeaderValue::from_static(X_GOOG_API_CLIENT_HEADER),
            );
        let builder = self.inner.apply_auth_headers(builder).await?;

        let metadata = CreateFileMetadata {
            name: &self.name,
            parents: &self.parents,
        };
        let metadata = serde_json::to_string(&metadata).map_err(Error::ser)?;
        let metadata = Part::text(metadata)
            .mime_str("application/json; charset=UTF-8")
            .map_err(Error::ser)?;
        let media = Part::stream_with_length(
            reqwest::Body::from(self.payload.clone()),
            self.payload.len() as u64,
        )
        .mime_str(&self.mime_type)
        .map_err(Error::ser)?;
        let form = Form::new().part("metadata", metadata).part("media", media);

        let builder = builder.header(
            "content-type",
            format!("multipart/related; boundary={}", form.boundary()),
        );
        Ok(builder.body(reqwest::Body::wrap_stream(form.into_stream())))
    }
}

async fn handle_file_response(response: reqwest::Response) -> Result<File> {
    if !response.status().is_success() {
        return to_http_error(response).await;
    }
    response.json::<File>().await.map_err(|e| match e {
        e if e.is_timeout() => Error::timeout(e),
        e => Error::deser(e),
    })
}

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";
const DEFAULT_FIELDS: &str = "id";
