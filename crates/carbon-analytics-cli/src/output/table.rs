use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_value;

/// Format a result as tables: scalar fields first, then one sub-table per
/// array field (strategies, trajectory, ranking, break-even curve).
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let mut builder = Builder::default();
            builder.push_record(["Field", "Value"]);
            let mut arrays: Vec<(&String, &Vec<Value>)> = Vec::new();
            for (key, val) in map {
                match val {
                    Value::Array(arr) => arrays.push((key, arr)),
                    // Nested objects (e.g. the regression fit) flatten into
                    // dotted rows.
                    Value::Object(inner) => {
                        for (ikey, ival) in inner {
                            builder.push_record([format!("{key}.{ikey}"), format_value(ival)]);
                        }
                    }
                    _ => builder.push_record([key.to_string(), format_value(val)]),
                }
            }
            println!("{}", Table::from(builder));

            for (key, arr) in arrays {
                println!("\n{}:", key);
                print_array_table(arr);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}
