//! JSON document writing with a configurable indent width.
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::Result;

/// Write `value` to `path`, pretty-printed with `indent` spaces per level.
pub fn write_pretty(value: &Value, path: &Path, indent: usize) -> Result<()> {
    let indent_bytes = vec![b' '; indent];
    let formatter = PrettyFormatter::with_indent(&indent_bytes);
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    std::fs::write(path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn indent_width_is_respected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_pretty(&json!({"a": 1}), &path, 4).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("    \"a\": 1"));
    }
}
