//! Approximate JSON syntax highlighting.
//!
//! Works on the serialized text with a fixed sequence of regex
//! substitutions, not on a parsed value. String contents that look like
//! keys or numbers may pick up extra spans, but every substitution only
//! inserts complete `<span>` elements and keeps the matched text, so
//! removing the tags always gives back the escaped input.

use std::sync::LazyLock;

use regex::Regex;

static KEY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)":"#).unwrap());
// `<` only appears in inserted tags, so excluding it keeps matches outside them
static STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#":(\s*)"([^"<]*)""#).unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\s*)(\d+)").unwrap());
static BOOLEAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\s*)(true|false)").unwrap());
static NULL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":(\s*)null").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?span[^>]*>").unwrap());

/// Escape the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap keys, strings, numbers, booleans and null in `json-*` spans.
pub fn highlight_json(json: &str) -> String {
    let text = escape_html(json);
    let text = KEY.replace_all(&text, r#"<span class="json-key">"${1}"</span>:"#);
    let text = STRING.replace_all(&text, r#":${1}<span class="json-string">"${2}"</span>"#);
    let text = NUMBER.replace_all(&text, r#":${1}<span class="json-number">${2}</span>"#);
    let text = BOOLEAN.replace_all(&text, r#":${1}<span class="json-boolean">${2}</span>"#);
    let text = NULL.replace_all(&text, r#":${1}<span class="json-null">null</span>"#);
    text.into_owned()
}

/// Remove the spans added by [`highlight_json`].
pub fn strip_tags(highlighted: &str) -> String {
    TAG.replace_all(highlighted, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_highlights_each_kind() {
        let json = "{\n  \"a\": \"x\",\n  \"b\": 42,\n  \"c\": true,\n  \"d\": null\n}";
        let out = highlight_json(json);

        assert!(out.contains(r#"<span class="json-key">"a"</span>:"#));
        assert!(out.contains(r#"<span class="json-string">"x"</span>"#));
        assert!(out.contains(r#"<span class="json-number">42</span>"#));
        assert!(out.contains(r#"<span class="json-boolean">true</span>"#));
        assert!(out.contains(r#"<span class="json-null">null</span>"#));
        assert_eq!(strip_tags(&out), json);
    }

    #[test]
    fn test_colon_inside_string_value() {
        let json = "{\n  \"activeWidgetTitle\": \"time: 10:30\"\n}";
        let out = highlight_json(json);

        assert_eq!(strip_tags(&out), json);
        assert_eq!(out.matches("<span").count(), out.matches("</span>").count());
        assert!(out.starts_with('{'));
        assert!(out.ends_with('}'));
    }

    #[test]
    fn test_markup_in_values_is_escaped() {
        let json = "{\n  \"title\": \"<b>&</b>\"\n}";
        let out = highlight_json(json);
        assert!(!out.contains("<b>"));
        assert!(out.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert_eq!(strip_tags(&out), escape_html(json));
    }

    fn balanced(out: &str) -> bool {
        let mut depth: i64 = 0;
        for tag in TAG.find_iter(out) {
            if tag.as_str().starts_with("</") {
                depth -= 1;
            } else {
                depth += 1;
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    proptest! {
        #[test]
        fn prop_highlight_preserves_text(title in ".*", name in "[a-z0-9:\" ]{0,24}") {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "timestamp": "2026-10-18T09:41:07.123Z",
                "kernelName": name,
                "activeWidgetTitle": title,
            }))
            .unwrap();

            let out = highlight_json(&json);
            prop_assert_eq!(strip_tags(&out), escape_html(&json));
            prop_assert!(balanced(&out));
        }
    }
}
