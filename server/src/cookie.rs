//! The `lastSearch` cookie: the browser-side memory of the last search.

use axum::http::{header, HeaderMap};
use jobcore::SearchMemory;
use parking_lot::Mutex;
use std::sync::Arc;
use url::form_urlencoded;

pub const LAST_SEARCH: &str = "lastSearch";
const SECONDS_PER_DAY: u64 = 86_400;

/// Value of cookie `name` from the request, URL-decoded.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .filter(|pair| pair.split('=').next() == Some(name))
        .flat_map(|pair| form_urlencoded::parse(pair.as_bytes()))
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

pub fn set_cookie_value(name: &str, value: &str, retention_days: u32) -> String {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{}={}; Max-Age={}; Path=/", name, encoded, retention_days as u64 * SECONDS_PER_DAY)
}

/// Collects the `Set-Cookie` value a request should answer with.
#[derive(Clone, Default)]
pub struct PendingCookie {
    slot: Arc<Mutex<Option<String>>>,
}

impl PendingCookie {
    pub fn take(&self) -> Option<String> {
        self.slot.lock().take()
    }
}

impl SearchMemory for PendingCookie {
    fn remember(&mut self, raw_query: &str, retention_days: u32) {
        *self.slot.lock() = Some(set_cookie_value(LAST_SEARCH, raw_query, retention_days));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn encodes_and_reads_back() {
        let set = set_cookie_value(LAST_SEARCH, "bank po & clerk", 7);
        assert_eq!(set, "lastSearch=bank+po+%26+clerk; Max-Age=604800; Path=/");

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; lastSearch=bank+po+%26+clerk"));
        assert_eq!(read_cookie(&headers, LAST_SEARCH).as_deref(), Some("bank po & clerk"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn memory_keeps_latest_query() {
        let pending = PendingCookie::default();
        let mut memory = pending.clone();
        memory.remember("ssc", 1);
        memory.remember("upsc", 1);
        assert_eq!(pending.take().as_deref(), Some("lastSearch=upsc; Max-Age=86400; Path=/"));
        assert_eq!(pending.take(), None);
    }
}
