// SPDX-FileCopyrightText: 2026 Mariana Rey <sala@mrey.dev>
//
// SPDX-License-Identifier: Apache-2.0

//! Authentication session handling.

use std::fmt::Debug;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// Where the bearer token comes from and where 401s go.
///
/// The client holds a `Session` and asks it for a token on every request.
/// When the backend answers 401, the client calls [`on_unauthorized`] before
/// surfacing the error, so the owner can drop the stored credential and send
/// the user back to sign-in.
///
/// [`on_unauthorized`]: Session::on_unauthorized
pub trait Session: Send + Sync + Debug {
    /// Current bearer token, if signed in.
    fn token(&self) -> Option<String>;

    /// Invoked once per request that came back 401.
    fn on_unauthorized(&self);
}

/// A [`Session`] over a fixed token, for CLI and test use.
///
/// On 401 the token is dropped and the expired flag set; subsequent requests
/// go out unauthenticated rather than retrying a dead credential.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RwLock<Option<String>>,
    expired: AtomicBool,
}

impl StaticSession {
    /// A session holding the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            expired: AtomicBool::new(false),
        }
    }

    /// A session with no credential at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Whether the backend has rejected this session's token.
    pub fn is_expired(&self) -> bool {
        self.expired.load(Ordering::Relaxed)
    }
}

impl Session for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    fn on_unauthorized(&self) {
        self.expired.store(true, Ordering::Relaxed);
        if let Ok(mut token) = self.token.write() {
            *token = None;
        }
        tracing::warn!("bearer token rejected by the backend, session expired");
    }
}
