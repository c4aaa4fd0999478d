//! Request path decoding module

use percent_encoding::percent_decode_str;

/// Decode percent-escapes in a request path
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the resolver's
/// containment check guards against anything the decoding uncovers.
pub fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_unchanged() {
        assert_eq!(decode_path("/pages/about.html"), "/pages/about.html");
    }

    #[test]
    fn test_decodes_escapes() {
        assert_eq!(decode_path("/my%20works.html"), "/my works.html");
        assert_eq!(decode_path("/%2e%2e/secret"), "/../secret");
    }
}
