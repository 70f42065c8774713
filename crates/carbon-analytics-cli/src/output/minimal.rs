use serde_json::Value;

use super::format_value;

/// Print just the headline figure from the output.
///
/// Heuristic: look for well-known result fields in order of priority, then
/// fall back to the first scalar field.
pub fn print_minimal(value: &Value) {
    // One headline per command, most load-bearing first.
    let priority_keys = [
        "net_exposure",
        "total_carbon_cost",
        "achievement_probability",
        "effective_price",
        "subject_intensity",
        "npv",
    ];

    if let Value::Object(map) = value {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_value(val));
                    return;
                }
            }
        }

        // Fall back to the first scalar field.
        for (key, val) in map {
            if !val.is_array() && !val.is_object() {
                println!("{}: {}", key, format_value(val));
                return;
            }
        }
    }

    println!("{}", format_value(value));
}
