use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::PruneError;
use crate::model::PruneRequest;
use crate::util;

/// Evidence to prune, a JSON object of evidence path -> removal reason:
///
/// ```json
/// {"raw/foo/bar.json": "bar.json is abandoned"}
/// ```
///
/// Requests keep the order the caller wrote them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneConfig {
    pub requests: Vec<PruneRequest>,
}

impl PruneConfig {
    pub fn from_json(contents: &str) -> Result<PruneConfig, PruneError> {
        serde_json::from_str(contents)
            .map_err(|err| PruneError::config(format!("invalid evidence configuration: {err}")))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<PruneConfig, PruneError> {
        PruneConfig::from_json(&util::fs::read_from_path(path)?)
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl<'de> Deserialize<'de> for PruneConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RequestsVisitor;

        impl<'de> Visitor<'de> for RequestsVisitor {
            type Value = PruneConfig;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of evidence path to removal reason")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut requests = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((path, reason)) = map.next_entry::<String, String>()? {
                    // A repeated path keeps its first position and its last reason
                    match requests.iter_mut().find(|r: &&mut PruneRequest| r.path == path) {
                        Some(existing) => existing.reason = reason,
                        None => requests.push(PruneRequest { path, reason }),
                    }
                }
                Ok(PruneConfig { requests })
            }
        }

        deserializer.deserialize_map(RequestsVisitor)
    }
}
