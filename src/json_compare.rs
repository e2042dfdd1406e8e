use serde_json::Value;

/// Two independent strictness toggles. `strict_order` makes arrays compare
/// element-by-element instead of as multisets; `extensible` lets objects in
/// the actual value carry fields the expected value doesn't mention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareMode {
    pub strict_order: bool,
    pub extensible: bool,
}

impl CompareMode {
    pub fn lenient() -> Self {
        Self {
            strict_order: false,
            extensible: true,
        }
    }

    pub fn strict() -> Self {
        Self {
            strict_order: true,
            extensible: false,
        }
    }
}

impl Default for CompareMode {
    fn default() -> Self {
        Self::lenient()
    }
}

#[derive(Debug)]
pub struct CompareResult {
    differences: Vec<String>,
}

impl CompareResult {
    pub fn passed(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn failed(&self) -> bool {
        !self.differences.is_empty()
    }

    pub fn message(&self) -> String {
        self.differences.join("\n")
    }
}

pub fn compare_json(expected: &Value, actual: &Value, mode: CompareMode) -> CompareResult {
    let mut differences = Vec::new();
    compare_values("$", expected, actual, mode, &mut differences);
    CompareResult { differences }
}

fn compare_values(
    path: &str,
    expected: &Value,
    actual: &Value,
    mode: CompareMode,
    differences: &mut Vec<String>,
) {
    match (expected, actual) {
        (Value::Object(expected_fields), Value::Object(actual_fields)) => {
            for (key, expected_value) in expected_fields {
                let child = format!("{}.{}", path, key);
                match actual_fields.get(key) {
                    Some(actual_value) => {
                        compare_values(&child, expected_value, actual_value, mode, differences)
                    }
                    None => differences.push(format!(
                        "{}: expected {} but the field is missing",
                        child,
                        display(expected_value)
                    )),
                }
            }
            if !mode.extensible {
                for (key, actual_value) in actual_fields {
                    if !expected_fields.contains_key(key) {
                        differences.push(format!(
                            "{}.{}: unexpected field {}",
                            path,
                            key,
                            display(actual_value)
                        ));
                    }
                }
            }
        }
        (Value::Array(expected_items), Value::Array(actual_items)) => {
            if expected_items.len() != actual_items.len() {
                differences.push(format!(
                    "{}: expected {} elements but was {}",
                    path,
                    expected_items.len(),
                    actual_items.len()
                ));
            }
            if mode.strict_order {
                compare_arrays_ordered(path, expected_items, actual_items, mode, differences);
            } else {
                compare_arrays_unordered(path, expected_items, actual_items, mode, differences);
            }
        }
        _ => {
            if expected != actual {
                differences.push(format!(
                    "{}: expected {} but was {}",
                    path,
                    display(expected),
                    display(actual)
                ));
            }
        }
    }
}

fn compare_arrays_ordered(
    path: &str,
    expected: &[Value],
    actual: &[Value],
    mode: CompareMode,
    differences: &mut Vec<String>,
) {
    for (index, (expected_item, actual_item)) in expected.iter().zip(actual.iter()).enumerate() {
        let child = format!("{}[{}]", path, index);
        compare_values(&child, expected_item, actual_item, mode, differences);
    }
}

fn compare_arrays_unordered(
    path: &str,
    expected: &[Value],
    actual: &[Value],
    mode: CompareMode,
    differences: &mut Vec<String>,
) {
    // Multiset matching: every expected element consumes one structurally
    // equal actual element.
    let mut consumed = vec![false; actual.len()];

    for (index, expected_item) in expected.iter().enumerate() {
        let matched = actual.iter().enumerate().find(|&(i, actual_item)| {
            !consumed[i] && values_match(expected_item, actual_item, mode)
        });
        match matched {
            Some((i, _)) => consumed[i] = true,
            None => differences.push(format!(
                "{}[{}]: no element matching {}",
                path,
                index,
                display(expected_item)
            )),
        }
    }
}

fn values_match(expected: &Value, actual: &Value, mode: CompareMode) -> bool {
    let mut differences = Vec::new();
    compare_values("$", expected, actual, mode, &mut differences);
    differences.is_empty()
}

fn display(value: &Value) -> String {
    const LIMIT: usize = 120;
    let text = value.to_string();
    if text.chars().count() > LIMIT {
        let truncated: String = text.chars().take(LIMIT).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}
