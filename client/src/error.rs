// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors returned by the reservation API client.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection, TLS, timeout.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend rejected the bearer token. The session has already been
    /// told to discard it by the time this is returned.
    #[error("session expired, sign in again")]
    Unauthorized,

    /// The backend answered with a non-2xx status. `detail` is the message
    /// from the response body's `detail` field, or a generic fallback.
    #[error("{detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message for inline display.
        detail: String,
    },

    /// The response body did not match the expected shape.
    #[error("invalid server response: {0}")]
    Decode(String),

    /// Client-side configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
