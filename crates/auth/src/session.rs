//! Server-side session registry.
//!
//! Sessions are in-process records keyed by an unguessable random id that
//! the API layer carries in a cookie. The record itself never leaves the
//! process, so no signing of session contents is needed. No implicit
//! expiry is modeled beyond process lifetime.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::principal::Principal;

/// Opaque session identifier (UUID v4, fully random).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session id from its cookie representation.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Debug, Default, Clone)]
struct SessionRecord {
    principal: Option<Principal>,
    /// OIDC `state` nonce for an in-flight login round trip (single use).
    login_state: Option<String>,
    /// User-facing notices drained on the next page view.
    notices: Vec<String>,
}

/// In-process registry of browser sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<SessionId, SessionRecord>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh anonymous session id.
    ///
    /// No record is stored yet: a session only materializes once it first
    /// carries state (login nonce, principal, notices), so cookieless
    /// traffic cannot grow the registry.
    pub fn mint(&self) -> SessionId {
        SessionId::generate()
    }

    /// True iff the id refers to a session holding state.
    pub fn exists(&self, id: &SessionId) -> bool {
        self.inner.read().map(|m| m.contains_key(id)).unwrap_or(false)
    }

    /// Number of materialized session records.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn principal(&self, id: &SessionId) -> Option<Principal> {
        let map = self.inner.read().ok()?;
        map.get(id)?.principal.clone()
    }

    /// Establish the authenticated principal for a session.
    ///
    /// Set exactly once after a successful provider handshake; cleared only
    /// by [`SessionStore::clear`].
    pub fn set_principal(&self, id: &SessionId, principal: Principal) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(*id).or_default().principal = Some(principal);
        }
    }

    /// Drop the whole session record (logout).
    pub fn clear(&self, id: &SessionId) {
        if let Ok(mut map) = self.inner.write() {
            map.remove(id);
        }
    }

    /// Remember the `state` nonce for an in-flight provider redirect.
    pub fn set_login_state(&self, id: &SessionId, state: String) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(*id).or_default().login_state = Some(state);
        }
    }

    /// Consume the stored `state` nonce (single use).
    pub fn take_login_state(&self, id: &SessionId) -> Option<String> {
        let mut map = self.inner.write().ok()?;
        map.get_mut(id)?.login_state.take()
    }

    pub fn push_notice(&self, id: &SessionId, notice: impl Into<String>) {
        if let Ok(mut map) = self.inner.write() {
            map.entry(*id).or_default().notices.push(notice.into());
        }
    }

    /// Drain pending notices for display.
    pub fn take_notices(&self, id: &SessionId) -> Vec<String> {
        let mut map = match self.inner.write() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.get_mut(id)
            .map(|rec| std::mem::take(&mut rec.notices))
            .unwrap_or_default()
    }
}
