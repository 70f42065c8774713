pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve the command's input: a JSON file when `--input` is given,
/// otherwise piped stdin.
pub fn read<T: DeserializeOwned>(path: Option<&str>) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path);
    }
    if let Some(data) = stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    Err("--input <file.json> or stdin required".into())
}
