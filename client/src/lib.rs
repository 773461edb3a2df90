// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! REST client for the campus space-reservation backend.
//!
//! Wire quirks (Spanish field names, the `"[CLASE] "` notes convention,
//! optional-vs-paginated list bodies) are resolved here, once, at the API
//! boundary; everything above this crate works with the typed model from
//! `sala-core`.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::similar_names
)]

mod client;
mod config;
mod error;
mod http;
mod schema;
mod session;

pub use crate::client::SpaceClient;
pub use crate::config::ApiConfig;
pub use crate::error::ApiError;
pub use crate::session::{Session, StaticSession};
