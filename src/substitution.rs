use serde_json::Value;
use std::collections::HashMap;

/// Resolves `${name}` placeholders in fixture text before it is parsed as JSON.
///
/// Three passes, in order:
/// 1. string-valued variables replace bare `${name}` occurrences verbatim,
///    for placeholders sitting inside existing JSON string literals;
/// 2. any variable replaces a quoted `"${name}"` placeholder (quotes included)
///    with its JSON serialization, so numbers, booleans and objects land as
///    proper JSON types;
/// 3. any remaining `${name}` gets the value's plain textual form.
///
/// Placeholders naming absent variables are left unchanged.
pub fn apply_variables(template: &str, variables: &HashMap<String, Value>) -> String {
    let mut text = template.to_string();

    for (name, value) in variables {
        if let Value::String(s) = value {
            text = text.replace(&format!("${{{}}}", name), s);
        }
    }

    for (name, value) in variables {
        text = text.replace(&format!("\"${{{}}}\"", name), &value.to_string());
    }

    for (name, value) in variables {
        text = text.replace(&format!("${{{}}}", name), &plain_text(value));
    }

    text
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
