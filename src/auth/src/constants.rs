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

use std::time::Duration;

/// Full access to the Drive files the service account can see.
pub(crate) const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";
pub(crate) const DEFAULT_UNIVERSE_DOMAIN: &str = "googleapis.com";
pub(crate) const SERVICE_ACCOUNT_TYPE: &str = "service_account";
/// JWT Bearer OAuth Grant Type
pub(crate) const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
pub(crate) const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
