use serde::Serialize;

use crate::error::PruneError;

/// Canonical JSON for files written to the locker.
///
/// Keys are sorted, indentation is two spaces, and there is no trailing
/// newline.
pub fn format_json<T: Serialize>(data: &T) -> Result<String, PruneError> {
    // Going through `Value` sorts every object's keys
    let value = serde_json::to_value(data)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::error::PruneError;
    use crate::util;

    #[test]
    fn test_format_json_sorts_keys() -> Result<(), PruneError> {
        let data = json!({"zeta": 1, "alpha": {"b": [1, 2], "a": null}});
        let formatted = util::json::format_json(&data)?;
        assert_eq!(
            formatted,
            "{\n  \"alpha\": {\n    \"a\": null,\n    \"b\": [\n      1,\n      2\n    ]\n  },\n  \"zeta\": 1\n}"
        );
        Ok(())
    }
}
