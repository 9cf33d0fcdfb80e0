//! Request/response mapping helpers.

use std::collections::HashMap;

use axum::http::HeaderMap;

/// Collect request headers into the stored representation: header name to
/// ordered values, as received. Non-UTF-8 values are kept lossily.
pub fn headers_to_map(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        map.entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    map
}
