use serde_json::Value;

/// Parse a free-form list field (tags, agenda) into trimmed, non-empty
/// strings.
///
/// The submission endpoint accepts the same field as a JSON-encoded array
/// (what the bundled form sends), comma-separated text, newline-separated
/// text, or a single bare value. Rule order matters and is part of the API
/// contract: JSON wins over both delimiters, and comma wins over newline, so
/// an item containing a literal comma only survives when JSON-encoded.
pub fn parse_list_field(raw: Option<&str>) -> Vec<String> {
    let Some(s) = raw else {
        return Vec::new();
    };
    if s.is_empty() {
        return Vec::new();
    }

    // Malformed JSON and non-array JSON fall through silently.
    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(s) {
        return items
            .iter()
            .map(element_to_string)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
    }

    if s.contains(',') {
        return split_clean(s, ',');
    }

    if s.contains('\n') {
        return split_clean(s, '\n');
    }

    let trimmed = s.trim();
    if trimmed.is_empty() {
        Vec::new()
    } else {
        vec![trimmed.to_string()]
    }
}

fn split_clean(s: &str, separator: char) -> Vec<String> {
    s.split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn element_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
