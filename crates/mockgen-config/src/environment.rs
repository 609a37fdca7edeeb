use std::collections::HashMap;
use std::path::PathBuf;

/// Read-only snapshot of environment variables.
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Snapshot the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Value of `key`, or `None` when it is unset or empty.
    ///
    /// Build tools export settings like `TARGET_NAME=` with no value; reading
    /// those as present would resolve to a list holding one empty name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Conversion of a raw environment value into a setting's value type.
pub trait FromEnv: Sized {
    fn from_env(value: &str) -> Self;
}

impl FromEnv for String {
    fn from_env(value: &str) -> Self {
        value.to_string()
    }
}

impl FromEnv for PathBuf {
    fn from_env(value: &str) -> Self {
        PathBuf::from(value)
    }
}

// An environment variable names exactly one list element.
impl FromEnv for Vec<String> {
    fn from_env(value: &str) -> Self {
        vec![value.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_read_as_unset() {
        let env: Environment = [("SRCROOT", ""), ("TARGET_NAME", "App")]
            .into_iter()
            .collect();
        assert_eq!(env.get("SRCROOT"), None);
        assert_eq!(env.get("TARGET_NAME"), Some("App"));
        assert_eq!(env.get("PROJECT_FILE_PATH"), None);
    }

    #[test]
    fn list_values_hold_a_single_element() {
        assert_eq!(Vec::<String>::from_env("App,Core"), vec!["App,Core".to_string()]);
    }
}
