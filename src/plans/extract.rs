// ABOUTME: Balanced-bracket JSON extraction from free-form model completions
// ABOUTME: Finds the first well-formed JSON object or array substring in prose-wrapped text

//! # JSON Block Extraction
//!
//! Text-generation models frequently wrap their JSON output in prose or
//! markdown fences despite instructions not to. This module scans a
//! completion for the first balanced JSON object or array substring,
//! tracking string literals and escapes so braces inside strings do not
//! confuse the bracket matching.
//!
//! Extraction failure is not an error type of its own: the caller treats
//! "no JSON in completion" as a primary-strategy failure and falls back.

/// Extract the first balanced JSON object or array substring
///
/// Returns the shortest prefix-balanced block starting at the first `{`
/// or `[` that closes correctly. If that candidate never closes (e.g. a
/// truncated completion), scanning resumes at the next opening bracket.
#[must_use]
pub fn extract_json_block(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut search_from = 0;

    while let Some(start) = find_opener(bytes, search_from) {
        if let Some(end) = find_balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
        search_from = start + 1;
    }

    None
}

/// Find the next `{` or `[` at or after `from`
fn find_opener(bytes: &[u8], from: usize) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == b'{' || b == b'[')
        .map(|pos| from + pos)
}

/// Walk forward from an opening bracket to its matching close
///
/// Returns the index of the closing bracket, or `None` when the block
/// never balances or a mismatched closer appears.
fn find_balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => stack.push(b'}'),
            b'[' => stack.push(b']'),
            b'}' | b']' => {
                if stack.pop() != Some(b) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        assert_eq!(extract_json_block(r#"{"a": 1}"#), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_object_wrapped_in_prose() {
        let text = r#"Here is your plan:

{"plan_name": "Test", "weeks": []}

Let me know if you want changes!"#;
        assert_eq!(
            extract_json_block(text),
            Some(r#"{"plan_name": "Test", "weeks": []}"#)
        );
    }

    #[test]
    fn test_array_in_markdown_fence() {
        let text = "```json\n[{\"day\": 1, \"meals\": []}]\n```";
        assert_eq!(extract_json_block(text), Some(r#"[{"day": 1, "meals": []}]"#));
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"note": "use {curly} and ]brackets[ freely"}"#;
        assert_eq!(extract_json_block(text), Some(text));
    }

    #[test]
    fn test_escaped_quotes_inside_strings() {
        let text = r#"{"note": "she said \"hi}\" loudly"}"#;
        assert_eq!(extract_json_block(text), Some(text));
    }

    #[test]
    fn test_nested_structures() {
        let text = r#"prefix {"a": [1, {"b": [2, 3]}]} suffix"#;
        assert_eq!(extract_json_block(text), Some(r#"{"a": [1, {"b": [2, 3]}]}"#));
    }

    #[test]
    fn test_truncated_block_skipped_for_later_complete_one() {
        let text = r#"broken {"a": [1, 2 ... then valid [{"b": 2}] after"#;
        assert_eq!(extract_json_block(text), Some(r#"[{"b": 2}]"#));
    }

    #[test]
    fn test_no_json_at_all() {
        assert_eq!(extract_json_block("I cannot create a plan right now."), None);
    }

    #[test]
    fn test_unbalanced_only() {
        assert_eq!(extract_json_block(r#"{"a": [1, 2"#), None);
    }
}
