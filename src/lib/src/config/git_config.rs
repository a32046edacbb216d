use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PruneError;
use crate::util;

/// Git settings applied to the working copy before pruning, ex:
///
/// ```json
/// {"commit": {"gpgsign": true}, "user": {"signingKey": "...", "email": "..."}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GitConfig(BTreeMap<String, BTreeMap<String, Value>>);

impl GitConfig {
    pub fn from_json(contents: &str) -> Result<GitConfig, PruneError> {
        serde_json::from_str(contents)
            .map_err(|err| PruneError::config(format!("invalid git configuration: {err}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<GitConfig, PruneError> {
        GitConfig::from_json(&util::fs::read_from_path(path)?)
    }

    /// `(section.key, value)` pairs ready for `git config`
    pub fn entries(&self) -> Result<Vec<(String, String)>, PruneError> {
        let mut entries = vec![];
        for (section, values) in &self.0 {
            for (key, value) in values {
                let value = match value {
                    Value::String(s) => s.to_owned(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    _ => {
                        return Err(PruneError::config(format!(
                            "git configuration {section}.{key} must be a string, number or boolean"
                        )))
                    }
                };
                entries.push((format!("{section}.{key}"), value));
            }
        }
        Ok(entries)
    }
}
