use anyhow::Context;
use std::path::Path;
use valu3::value::Value;

/// Reads a JSON document into a dynamic value. Used for both the
/// configuration hive and the workflow definitions file.
pub fn load_json_file(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let value = Value::json_to_value(&content)
        .map_err(|err| anyhow::anyhow!("parsing {}: {:?}", path.display(), err))?;

    Ok(value)
}

#[cfg(test)]
mod test {
    use super::*;
    use valu3::prelude::*;

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("rigging-loader-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_file() {
        let path = scratch_file("config.json", r#"{"system.debugMode": "true"}"#);

        let value = load_json_file(&path).unwrap();
        assert_eq!(
            value.get("system.debugMode"),
            Some(&Value::from("true"))
        );

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_json_file(Path::new("/does/not/exist.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("exist.json"));
    }

    #[test]
    fn test_malformed_json_fails() {
        let path = scratch_file("broken.json", "{not json");
        assert!(load_json_file(&path).is_err());
        std::fs::remove_file(path).ok();
    }
}
