use serde_json::{Map, Value};

const PRIORITY_KEYS: [&str; 4] = [
    "credit_score",
    "monthly_installment",
    "due_date",
    "total_borrowed",
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, first on the
/// result object and then one level down in its nested objects, then falls
/// back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", render_minimal(value));
}

fn render_minimal(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result_obj {
        Value::Object(map) => {
            if let Some(val) = find_priority(map) {
                return format_minimal(val);
            }
            if let Some((key, val)) = map.iter().next() {
                return format!("{}: {}", key, format_minimal(val));
            }
        }
        // Lender lists print one name per line.
        Value::Array(items) => {
            return items
                .iter()
                .map(|item| format_minimal(item.get("name").unwrap_or(item)))
                .collect::<Vec<_>>()
                .join("\n");
        }
        _ => {}
    }

    format_minimal(result_obj)
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn find_priority(map: &Map<String, Value>) -> Option<&Value> {
    if let Some(val) = PRIORITY_KEYS.iter().find_map(|key| present(map, key)) {
        return Some(val);
    }
    // Dashboard-style output keeps its answers in sub-objects.
    PRIORITY_KEYS.iter().find_map(|key| {
        map.values()
            .filter_map(Value::as_object)
            .find_map(|inner| present(inner, key))
    })
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
