use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

/// Parse `KEY=value` lines. Blank lines and `#` comments are ignored, values
/// may be wrapped in single or double quotes.
pub fn parse_env_str(content: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (idx, line) in content.lines().enumerate() {
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let Some((key, val)) = s.split_once('=') else {
            log::warn!("ignoring .env line {} without '=': {}", idx + 1, line);
            continue;
        };
        let val = val.trim();
        let val = if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            &val[1..val.len() - 1]
        } else {
            val
        };
        map.insert(key.trim().to_string(), val.to_string());
    }
    map
}

/// Load a `.env` file into the process environment without overriding
/// variables that are already set. A missing file is not an error.
pub fn load_env_file_from(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let map = parse_env_str(&std::fs::read_to_string(path)?);
    for (k, v) in &map {
        if std::env::var_os(k).is_none() {
            // SAFETY: called from `main` before any other thread is spawned.
            unsafe {
                std::env::set_var(k, v);
            }
        }
    }
    Ok(map)
}

/// Load `.env` from the current working directory, if present.
pub fn load_dotenv_if_present() -> Result<HashMap<String, String>> {
    load_env_file_from(Path::new(".env"))
}
