//! In-memory login sessions keyed by a random cookie token.
//!
//! There is no password and no expiry: a session lives until logout or
//! process restart.

use crate::reports::Account;
use axum::http::{header, HeaderMap, HeaderValue};
use std::collections::HashMap;
use std::sync::Mutex;

pub const SESSION_COOKIE: &str = "streamdash_session";

#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<String, Account>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session for `account` and return its token.
    pub fn create(&self, account: Account) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.lock().insert(token.clone(), account);
        token
    }

    pub fn get(&self, token: &str) -> Option<Account> {
        self.lock().get(token).cloned()
    }

    pub fn remove(&self, token: &str) -> Option<Account> {
        self.lock().remove(token)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The account behind the request's session cookie, if any.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<Account> {
        session_token(headers).and_then(|t| self.get(&t))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Account>> {
        self.sessions.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// Pull the session token out of the `Cookie` header(s).
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
}

pub fn set_cookie(token: &str) -> HeaderValue {
    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    // Tokens are UUIDs: always a valid header value.
    HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
}

pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("streamdash_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: 7,
            username: "ana".into(),
            display_name: "Ana Lima".into(),
        }
    }

    #[test]
    fn create_get_remove() {
        let store = SessionStore::new();
        let token = store.create(account());
        assert_eq!(store.get(&token), Some(account()));
        assert_eq!(store.remove(&token), Some(account()));
        assert!(store.get(&token).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn token_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; streamdash_session=abc-123; lang=pt"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn missing_cookie_means_no_session() {
        let store = SessionStore::new();
        store.create(account());
        assert!(store.from_headers(&HeaderMap::new()).is_none());
    }
}
