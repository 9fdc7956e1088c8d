//! Header mappings exchanged between hosting surfaces, the resolver and host logic.
//!
//! Keys are case-sensitive and unique; inserting an existing key replaces its
//! value (last write wins) while keeping its original position, so the order in
//! which headers were first set is stable. Hosting surfaces collapse case when
//! they translate into their native header type, so the resolver uses the
//! case-insensitive helpers below whenever it checks for or removes a header.

use indexmap::IndexMap;

/// Ordered, case-sensitive header mapping.
pub type HeaderMapping = IndexMap<String, String>;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const LOCATION: &str = "Location";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const ACCEPT_RANGES: &str = "Accept-Ranges";
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";

/// Returns true if `headers` has a key equal to `name`, ignoring ASCII case.
pub fn contains_ci(headers: &HeaderMapping, name: &str) -> bool {
    headers.keys().any(|k| k.eq_ignore_ascii_case(name))
}

/// Looks up the value of `name`, ignoring ASCII case.
///
/// When several keys differ only by case, the most recently inserted one wins.
pub fn get_ci<'a>(headers: &'a HeaderMapping, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .rev()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Removes every key equal to `name` ignoring ASCII case, returning how many were removed.
pub fn remove_ci(headers: &mut HeaderMapping, name: &str) -> usize {
    let before = headers.len();
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
    before - headers.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_keeps_position() {
        let mut headers = HeaderMapping::new();
        headers.insert("A".into(), "1".into());
        headers.insert("B".into(), "2".into());
        headers.insert("A".into(), "3".into());

        let entries: Vec<_> = headers.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(entries, vec![("A", "3"), ("B", "2")]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut headers = HeaderMapping::new();
        headers.insert("X-Token".into(), "a".into());
        headers.insert("x-token".into(), "b".into());
        assert_eq!(headers.len(), 2);

        // Case-insensitive lookup prefers the latest insertion
        assert_eq!(get_ci(&headers, "X-TOKEN"), Some("b"));
        assert!(contains_ci(&headers, "x-Token"));
    }

    #[test]
    fn test_remove_ci() {
        let mut headers = HeaderMapping::new();
        headers.insert("Access-Control-Allow-Origin".into(), "https://a".into());
        headers.insert("access-control-allow-origin".into(), "https://b".into());
        headers.insert("Other".into(), "x".into());

        assert_eq!(remove_ci(&mut headers, ACCESS_CONTROL_ALLOW_ORIGIN), 2);
        assert_eq!(headers.len(), 1);
        assert_eq!(remove_ci(&mut headers, ACCESS_CONTROL_ALLOW_ORIGIN), 0);
    }
}
