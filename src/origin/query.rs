//! Lexical query-string helpers.
//!
//! Both functions work on raw strings and never parse a URL, so they are total
//! over any input. Values are returned exactly as they appear in the URL;
//! percent-decoding is left to whoever consumes them.

use indexmap::IndexMap;

/// Query parameters parsed from a request URL. Keys are unique.
pub type QueryParams = IndexMap<String, String>;

/// Returns `url` with everything from the first `?` removed.
pub fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Splits the query component of `url` into key/value pairs.
///
/// The query ends at the first `#`. Pairs are separated by `&` and split on the
/// first `=`; a pair without `=` yields an empty value. Empty pairs are skipped
/// and later occurrences of a key overwrite earlier ones.
pub fn parse_query(url: &str) -> QueryParams {
    let mut params = QueryParams::new();

    let Some(idx) = url.find('?') else {
        return params;
    };
    let query = &url[idx + 1..];
    let query = match query.find('#') {
        Some(end) => &query[..end],
        None => query,
    };

    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(key.to_string(), value.to_string());
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("https://x/y?a=1"), "https://x/y");
        assert_eq!(strip_query("https://x/y"), "https://x/y");
        assert_eq!(strip_query("?"), "");
        assert_eq!(strip_query("a?b?c"), "a");
        // Not a URL at all
        assert_eq!(strip_query("%%not a url%%"), "%%not a url%%");
    }

    #[test]
    fn test_strip_is_idempotent() {
        for url in ["https://x/y?a=1&b=2", "https://x/", "", "??", "no-query"] {
            let once = strip_query(url);
            assert_eq!(strip_query(once), once);
        }
    }

    #[test]
    fn test_parse_query_last_write_wins() {
        let params = parse_query("https://x/y?a=1&b=2&a=3");
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("a").map(String::as_str), Some("3"));
        assert_eq!(params.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_parse_query_edge_cases() {
        assert!(parse_query("https://x/y").is_empty());
        assert!(parse_query("https://x/y?").is_empty());

        let params = parse_query("https://x/y?flag&&token=a=b#frag");
        assert_eq!(params.get("flag").map(String::as_str), Some(""));
        assert_eq!(params.get("token").map(String::as_str), Some("a=b"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_parse_query_keeps_raw_encoding() {
        let params = parse_query("https://x/y?q=hello%20world");
        assert_eq!(params.get("q").map(String::as_str), Some("hello%20world"));
    }
}
