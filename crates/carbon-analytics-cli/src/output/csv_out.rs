use serde_json::Value;
use std::io;

use super::format_value;

/// Write output as CSV to stdout: scalar fields as field,value rows, then
/// each array field as its own record block.
pub fn print_csv(value: &Value) {
    match value {
        Value::Object(map) => {
            {
                let stdout = io::stdout();
                let mut wtr = csv::Writer::from_writer(stdout.lock());
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    match val {
                        Value::Array(_) => {}
                        Value::Object(inner) => {
                            for (ikey, ival) in inner {
                                let _ = wtr
                                    .write_record([format!("{key}.{ikey}"), format_value(ival)]);
                            }
                        }
                        _ => {
                            let _ = wtr.write_record([key.as_str(), &format_value(val)]);
                        }
                    }
                }
                let _ = wtr.flush();
            }

            for (key, val) in map {
                if let Value::Array(arr) = val {
                    println!("\n# {}", key);
                    let stdout = io::stdout();
                    let mut wtr = csv::Writer::from_writer(stdout.lock());
                    write_array_csv(&mut wtr, arr);
                    let _ = wtr.flush();
                }
            }
        }
        Value::Array(arr) => {
            let stdout = io::stdout();
            let mut wtr = csv::Writer::from_writer(stdout.lock());
            write_array_csv(&mut wtr, arr);
            let _ = wtr.flush();
        }
        _ => {
            let stdout = io::stdout();
            let mut wtr = csv::Writer::from_writer(stdout.lock());
            let _ = wtr.write_record([&format_value(value)]);
            let _ = wtr.flush();
        }
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);
        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_value(item)]);
        }
    }
}
