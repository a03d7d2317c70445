//! JSON utility functions shared across crates.

use serde_json::Value;

/// Strip markdown code block wrappers from JSON content.
///
/// Handles `` ```json ... ``` ``, `` ``` ... ``` ``, and other language identifiers.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6 {
        let without_prefix = trimmed.strip_prefix("```").unwrap_or(trimmed);
        let without_suffix = without_prefix.strip_suffix("```").unwrap_or(without_prefix);
        return without_suffix
            .split_once('\n')
            .map_or_else(|| without_suffix.trim(), |(_, rest)| rest.trim());
    }
    trimmed
}

/// Returns message content as structured JSON when it is a JSON object or array,
/// otherwise as a plain string value.
///
/// Scalars such as `"42"` stay strings so numeric replies keep their text form.
#[must_use]
pub fn parse_json_content(content: &str) -> Value {
    let candidate = strip_markdown_json(content);
    if candidate.starts_with('{') || candidate.starts_with('[') {
        if let Ok(value @ (Value::Object(_) | Value::Array(_))) =
            serde_json::from_str::<Value>(candidate)
        {
            return value;
        }
    }
    Value::String(content.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_block() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_plain_block() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_no_block() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_json_object_content() {
        let value = parse_json_content("[{\"orderid\": 42, \"orderstatus\": \"shipped\"}]");
        assert_eq!(value[0]["orderstatus"], "shipped");
    }

    #[test]
    fn test_parse_fenced_json_content() {
        let value = parse_json_content("```json\n{\"a\": 1}\n```");
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_plain_text_stays_string() {
        assert_eq!(parse_json_content("hello"), Value::String("hello".to_owned()));
    }

    #[test]
    fn test_scalar_json_stays_string() {
        assert_eq!(parse_json_content("42"), Value::String("42".to_owned()));
    }

    #[test]
    fn test_broken_json_stays_string() {
        assert_eq!(parse_json_content("{not json"), Value::String("{not json".to_owned()));
    }
}
