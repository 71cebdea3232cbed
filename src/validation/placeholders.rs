use serde::Serialize;
use serde_json::{Map, Value};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderToken {
    pub path: String,
    /// Byte range of the whole `{{...}}` token in the scanned text.
    pub start: usize,
    pub end: usize,
}

fn is_valid_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        })
}

/// Finds `{{path.to.field}}` tokens. Malformed fragments are skipped, never rejected.
pub fn scan_placeholders(text: &str) -> Vec<PlaceholderToken> {
    let mut tokens = Vec::new();
    let mut offset = 0;

    while let Some(found) = text[offset..].find(OPEN) {
        let start = offset + found;
        let inner_start = start + OPEN.len();
        let Some(close) = text[inner_start..].find(CLOSE) else {
            break;
        };
        let inner = &text[inner_start..inner_start + close];
        if let Some(reopen) = inner.rfind(OPEN) {
            offset = inner_start + reopen;
            continue;
        }
        let end = inner_start + close + CLOSE.len();
        let path = inner.trim();
        if is_valid_path(path) {
            tokens.push(PlaceholderToken {
                path: path.to_string(),
                start,
                end,
            });
        }
        offset = end;
    }

    tokens
}

pub fn contains_placeholder(text: &str) -> bool {
    !scan_placeholders(text).is_empty()
}

fn resolve_json_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

fn rendered_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Substitutes tokens found in `sample`; unresolved tokens stay verbatim.
pub fn render_preview(text: &str, sample: &Value) -> String {
    let mut rendered = String::with_capacity(text.len());
    let mut cursor = 0;
    for token in scan_placeholders(text) {
        rendered.push_str(&text[cursor..token.start]);
        match resolve_json_path(sample, &token.path) {
            Some(value) if !value.is_object() => rendered.push_str(&rendered_text(value)),
            _ => rendered.push_str(&text[token.start..token.end]),
        }
        cursor = token.end;
    }
    rendered.push_str(&text[cursor..]);
    rendered
}

/// Example event payload in which each documented path renders as `<path>`.
pub fn sample_payload(documented: &[&str]) -> Value {
    let mut root = Value::Object(Map::new());
    for path in documented {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };
        let mut current = &mut root;
        for segment in parents {
            current = match current {
                Value::Object(map) => map
                    .entry((*segment).to_string())
                    .or_insert_with(|| Value::Object(Map::new())),
                other => other,
            };
        }
        if let Value::Object(map) = current {
            map.insert((*leaf).to_string(), Value::String(format!("<{path}>")));
        }
    }
    root
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderPreview {
    pub tokens: Vec<String>,
    /// Tokens the selected action does not document.
    pub undocumented: Vec<String>,
    pub rendered: String,
}

pub fn preview(text: &str, documented: &[&str]) -> PlaceholderPreview {
    let tokens: Vec<String> = scan_placeholders(text)
        .into_iter()
        .map(|token| token.path)
        .collect();
    let mut undocumented = Vec::new();
    for token in &tokens {
        if !documented.contains(&token.as_str()) && !undocumented.contains(token) {
            undocumented.push(token.clone());
        }
    }
    PlaceholderPreview {
        rendered: render_preview(text, &sample_payload(documented)),
        tokens,
        undocumented,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scans_tokens_in_order_with_byte_ranges() {
        let text = "New issue: {{issue.title}} by {{ issue.author }}";
        let tokens = scan_placeholders(text);
        let paths: Vec<&str> = tokens.iter().map(|t| t.path.as_str()).collect();
        assert_eq!(paths, vec!["issue.title", "issue.author"]);
        assert_eq!(&text[tokens[0].start..tokens[0].end], "{{issue.title}}");
    }

    #[test]
    fn malformed_tokens_do_not_panic() {
        for text in [
            "{{",
            "}}",
            "{{}}",
            "{{ }}",
            "{{a..b}}",
            "{{unclosed",
            "{{{{x}}",
            "{{a b}}",
            "héllo {{ümlaut}} {{ok}}",
            "{{{{{{",
        ] {
            let _ = scan_placeholders(text);
            let _ = render_preview(text, &Value::Null);
        }
        assert_eq!(scan_placeholders("{{{{x}}")[0].path, "x");
        assert_eq!(scan_placeholders("héllo {{ümlaut}} {{ok}}")[0].path, "ok");
    }

    #[test]
    fn preview_reports_undocumented_tokens_and_keeps_them_verbatim() {
        let result = preview(
            "{{message.author}} said {{message.content}} in {{guild.name}}",
            &["message.content", "message.author"],
        );
        assert_eq!(result.undocumented, vec!["guild.name".to_string()]);
        assert_eq!(
            result.rendered,
            "<message.author> said <message.content> in {{guild.name}}"
        );
    }

    #[test]
    fn sample_payload_nests_paths() {
        let sample = sample_payload(&["issue.title", "branch"]);
        assert_eq!(sample["issue"]["title"], "<issue.title>");
        assert_eq!(sample["branch"], "<branch>");
    }
}
