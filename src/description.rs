use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::ResolveError;

/// A parsed description file (`package.json`-shaped). Comments and trailing
/// commas are tolerated the way the teacher crate tolerates them, since
/// hand-maintained `package.json` files in the wild are not always strict
/// JSON.
#[derive(Debug, Clone)]
pub struct PackageJson {
    /// Path to the description file itself.
    pub path: PathBuf,
    /// The file's parent directory (`descriptionFileRoot`).
    pub directory: PathBuf,
    pub name: Option<String>,
    pub raw: Value,
}

impl PackageJson {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Walks a dotted/array field path, e.g. `["exports"]` or
    /// `["browser"]`, returning the value found at the end of it.
    pub fn field_path(&self, path: &[String]) -> Option<&Value> {
        let mut cursor = &self.raw;
        for segment in path {
            cursor = cursor.get(segment)?;
        }
        Some(cursor)
    }

    pub fn parse(path: PathBuf, contents: &str) -> Result<Self, ResolveError> {
        let raw = parse_jsonc(&path, contents)?;
        let name = raw
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string);
        let directory = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        Ok(Self {
            path,
            directory,
            name,
            raw,
        })
    }
}

fn parse_jsonc(path: &Path, contents: &str) -> Result<Value, ResolveError> {
    jsonc_parser::parse_to_serde_value(contents, &jsonc_parser::ParseOptions::default())
        .map_err(|err| ResolveError::DescriptionFile {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
        .ok_or_else(|| ResolveError::DescriptionFile {
            path: path.to_path_buf(),
            message: "empty description file".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_name_and_nested_fields() {
        let pkg = PackageJson::parse(
            PathBuf::from("/pkg/package.json"),
            r#"{
                "name": "demo",
                "main": "./lib/index.js",
                "browser": { "./server.js": "./client.js" },
                "exports": { ".": "./lib/index.js" }
            }"#,
        )
        .unwrap();
        assert_eq!(pkg.name.as_deref(), Some("demo"));
        assert_eq!(pkg.directory, PathBuf::from("/pkg"));
        assert_eq!(
            pkg.field_path(&["main".to_string()]).and_then(Value::as_str),
            Some("./lib/index.js")
        );
        assert!(pkg.field("browser").is_some());
    }

    #[test]
    fn tolerates_comments() {
        let pkg = PackageJson::parse(
            PathBuf::from("/pkg/package.json"),
            "{\n  // a comment\n  \"name\": \"demo\",\n}",
        )
        .unwrap();
        assert_eq!(pkg.name.as_deref(), Some("demo"));
    }
}
