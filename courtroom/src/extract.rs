//! Recovery of structured JSON from free-form model text.
//!
//! Agents are asked to respond with JSON only, but real replies arrive
//! wrapped in prose, markdown, or partial sentences. The scanner pulls out
//! the first plausible object; typed deserialization decides whether it is
//! usable. Callers supply the fallback, so this path never errors.

use serde::de::DeserializeOwned;

/// Locate the first `{...}` block balanced to at most one nested level.
///
/// Candidate opening braces are tried left to right; a candidate is
/// abandoned as soon as a second nested level opens, so deeply nested
/// objects resolve to their first shallow sub-object instead. Braces
/// inside JSON strings are treated as structural. Both are accepted
/// limitations; verdict and audit payloads are at most one level deep.
pub fn first_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(open) = text[search_from..].find('{').map(|i| search_from + i) {
        let mut depth = 0usize;
        for (offset, byte) in text[open..].bytes().enumerate() {
            match byte {
                b'{' => {
                    depth += 1;
                    if depth > 2 {
                        break;
                    }
                }
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[open..=open + offset]);
                    }
                }
                _ => {}
            }
        }
        search_from = open + 1;
    }

    None
}

/// Recover a typed value from raw model text.
///
/// Only the first balanced block is tried; if it does not deserialize into
/// `T` (missing required fields included), the caller's fallback applies.
pub fn extract_struct<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let block = first_json_object(raw)?;
    serde_json::from_str(block).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Ruling {
        verdict: String,
        confidence: f64,
        #[serde(default)]
        notes: Vec<String>,
    }

    #[test]
    fn test_finds_object_inside_prose() {
        let raw = "After deliberation, my ruling is {\"verdict\": \"FAVOR_PLAINTIFF\", \"confidence\": 88} as stated.";
        assert_eq!(
            first_json_object(raw),
            Some("{\"verdict\": \"FAVOR_PLAINTIFF\", \"confidence\": 88}")
        );
    }

    #[test]
    fn test_finds_object_with_one_nested_level() {
        let raw = "{\"a\": {\"b\": 1}, \"c\": 2} trailing";
        assert_eq!(first_json_object(raw), Some("{\"a\": {\"b\": 1}, \"c\": 2}"));
    }

    #[test]
    fn test_deep_nesting_resolves_to_inner_block() {
        let raw = "{\"a\": {\"b\": {\"c\": 1}}}";
        assert_eq!(first_json_object(raw), Some("{\"b\": {\"c\": 1}}"));
    }

    #[test]
    fn test_unclosed_outer_falls_through_to_inner() {
        let raw = "{\"a\": {\"b\": 1} and it never closes";
        assert_eq!(first_json_object(raw), Some("{\"b\": 1}"));
    }

    #[test]
    fn test_no_braces_yields_none() {
        assert_eq!(first_json_object("no structure here"), None);
        assert_eq!(first_json_object(""), None);
    }

    #[test]
    fn test_extract_struct_from_wrapped_reply() {
        let raw = "Verdict follows.\n{\"verdict\": \"FAVOR_DEFENDANT\", \"confidence\": 72}\nThank you.";
        let ruling: Ruling = extract_struct(raw).unwrap();
        assert_eq!(ruling.verdict, "FAVOR_DEFENDANT");
        assert_eq!(ruling.confidence, 72.0);
        assert!(ruling.notes.is_empty());
    }

    #[test]
    fn test_extract_struct_requires_non_defaulted_fields() {
        let raw = "{\"verdict\": \"FAVOR_DEFENDANT\"}";
        assert!(extract_struct::<Ruling>(raw).is_none());
    }

    #[test]
    fn test_only_first_block_is_tried() {
        // A malformed first block is not rescued by a valid later one.
        let raw = "{not json} then {\"verdict\": \"FAVOR_PLAINTIFF\", \"confidence\": 60}";
        assert!(extract_struct::<Ruling>(raw).is_none());
    }

    #[test]
    fn test_fenced_reply_still_resolves() {
        let raw = "```json\n{\"verdict\": \"FAVOR_PLAINTIFF\", \"confidence\": 91}\n```";
        let ruling: Ruling = extract_struct(raw).unwrap();
        assert_eq!(ruling.confidence, 91.0);
    }
}
