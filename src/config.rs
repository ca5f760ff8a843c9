use std::env;
use std::fs;
use std::path::PathBuf;

/// Secret lookup: process environment first, then `KEY=value` lines in a
/// dotenv file.
#[derive(Debug, Clone)]
pub struct Credentials {
    dotenv_path: PathBuf,
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new(".env")
    }
}

impl Credentials {
    pub fn new(dotenv_path: impl Into<PathBuf>) -> Self {
        Self {
            dotenv_path: dotenv_path.into(),
        }
    }

    pub fn lookup(&self, key: &str) -> Option<String> {
        if let Ok(value) = env::var(key) {
            return Some(value);
        }
        let raw = fs::read_to_string(&self.dotenv_path).ok()?;
        dotenv_value(&raw, key)
    }
}

fn dotenv_value(raw: &str, key: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| {
            let (name, value) = line.split_once('=')?;
            (name.trim() == key).then(|| unquote(value.trim()).to_string())
        })
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
