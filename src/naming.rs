//! Request path splitting and output file naming.
//!
//! Requests arrive as a path of processing tokens followed by the source URL:
//!
//! ```text
//! /300x200!/g_center/png/https://cdn.example.com/photos/dawn.jpg
//!  └──────── tokens ───┘ └──────────── source URL ──────────────┘
//! ```
//!
//! The source URL starts at the first segment containing `:` (its scheme) and
//! runs to the end of the path verbatim, so URLs keep their own slashes and
//! query strings. Empty segments in the token part are skipped.
//!
//! Output files are named by content: [`output_stem`] hashes the source URL
//! together with the tokens (each length-prefixed), so the same request always
//! maps to the same file and different requests for the same source never
//! collide.

use sha2::{Digest, Sha256};

/// A request path split into processing tokens and the source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub tokens: Vec<String>,
    pub source_url: String,
}

/// Split a request path into tokens and the trailing source URL.
///
/// - `"/300x/png/https://host/a.jpg"` → tokens=`["300x", "png"]`, url=`"https://host/a.jpg"`
/// - `"/g_center//x50/"` → tokens=`["g_center", "x50"]`, url=`""`
/// - `"https://host/a.jpg"` → tokens=`[]`, url=`"https://host/a.jpg"`
pub fn split_request(path: &str) -> Request {
    let trimmed = path.trim_start_matches('/');
    let mut tokens = Vec::new();
    let mut rest = trimmed;

    while !rest.is_empty() {
        let (segment, tail) = rest.split_once('/').unwrap_or((rest, ""));
        if segment.contains(':') {
            return Request {
                tokens,
                source_url: rest.to_string(),
            };
        }
        if !segment.is_empty() {
            tokens.push(segment.to_string());
        }
        rest = tail;
    }

    Request {
        tokens,
        source_url: String::new(),
    }
}

/// Deterministic, filesystem-safe base name for a request's output.
///
/// SHA-256 over the source URL and each token, each preceded by its byte
/// length, as lowercase hex. Length prefixes keep field boundaries
/// unambiguous even when a field contains NUL or any other byte.
pub fn output_stem<S: AsRef<str>>(source_url: &str, tokens: &[S]) -> String {
    let mut hasher = Sha256::new();
    hash_field(&mut hasher, source_url);
    for token in tokens {
        hash_field(&mut hasher, token.as_ref());
    }
    format!("{:x}", hasher.finalize())
}

fn hash_field(hasher: &mut Sha256, field: &str) {
    hasher.update((field.len() as u64).to_le_bytes());
    hasher.update(field.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_tokens_from_url() {
        let r = split_request("/300x200!/g_center/png/https://cdn.example.com/photos/dawn.jpg");
        assert_eq!(r.tokens, vec!["300x200!", "g_center", "png"]);
        assert_eq!(r.source_url, "https://cdn.example.com/photos/dawn.jpg");
    }

    #[test]
    fn url_keeps_query_and_double_slashes() {
        let r = split_request("/x50/http://host//a/b.gif?v=2");
        assert_eq!(r.tokens, vec!["x50"]);
        assert_eq!(r.source_url, "http://host//a/b.gif?v=2");
    }

    #[test]
    fn no_url_means_all_tokens() {
        let r = split_request("/g_center//x50/");
        assert_eq!(r.tokens, vec!["g_center", "x50"]);
        assert_eq!(r.source_url, "");
    }

    #[test]
    fn url_only() {
        let r = split_request("https://host/a.jpg");
        assert!(r.tokens.is_empty());
        assert_eq!(r.source_url, "https://host/a.jpg");
    }

    #[test]
    fn empty_path() {
        assert_eq!(
            split_request(""),
            Request {
                tokens: vec![],
                source_url: String::new()
            }
        );
        assert!(split_request("///").tokens.is_empty());
    }

    #[test]
    fn output_stem_is_stable_hex() {
        let a = output_stem("https://host/a.jpg", &["100x100", "png"]);
        let b = output_stem("https://host/a.jpg", &["100x100", "png"]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn output_stem_depends_on_tokens_and_url() {
        let base = output_stem("u", &["100x100"]);
        assert_ne!(base, output_stem("u", &["100x101"]));
        assert_ne!(base, output_stem("v", &["100x100"]));
        assert_ne!(output_stem("u", &["ab", "c"]), output_stem("u", &["a", "bc"]));
    }

    #[test]
    fn output_stem_token_boundaries_survive_nul_bytes() {
        assert_ne!(
            output_stem("u", &["a\0100x"]),
            output_stem("u", &["a", "100x"])
        );
        assert_ne!(output_stem("u\0a", &["b"]), output_stem("u", &["a", "b"]));
        assert_ne!(output_stem("u", &[""]), output_stem("u", &["", ""]));
    }

    #[test]
    fn output_stem_distinguishes_empty_url_from_empty_token() {
        let none: [&str; 0] = [];
        assert_ne!(output_stem("", &none), output_stem("", &[""]));
    }
}
