use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::graph::BraidGraph;

/// One selectable braid file in the braids directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BraidEntry {
    pub name: String,
    pub filename: String,
    pub path: PathBuf,
}

/// Lists every `*.json` braid under `dir`, sorted by name so the catalog
/// (and the auto-selected first entry) is stable across runs.
pub fn list_braids(dir: &Path) -> Result<Vec<BraidEntry>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read braids directory {}", dir.display()))?;

    let mut braids = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        braids.push(BraidEntry {
            name: stem.to_owned(),
            filename: filename.to_owned(),
            path: path.clone(),
        });
    }

    if braids.is_empty() {
        return Err(anyhow!(
            "no braid JSON files found in {}",
            dir.display()
        ));
    }

    braids.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(braids)
}

pub fn load_braid(path: &Path) -> Result<BraidGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read braid file {}", path.display()))?;
    BraidGraph::from_json(&raw)
        .with_context(|| format!("failed to parse braid file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_braid(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn lists_json_files_sorted_by_name() {
        let dir = std::env::temp_dir().join("braidview-catalog-test");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        write_braid(&dir, "zeta.json", r#"{"parents": {"0": []}}"#);
        write_braid(&dir, "alpha.json", r#"{"parents": {"0": []}}"#);
        write_braid(&dir, "notes.txt", "not a braid");

        let braids = list_braids(&dir).unwrap();
        assert_eq!(
            braids.iter().map(|entry| entry.name.as_str()).collect::<Vec<_>>(),
            ["alpha", "zeta"]
        );
        assert_eq!(braids[0].filename, "alpha.json");

        let graph = load_braid(&braids[0].path).unwrap();
        assert_eq!(graph.node_count(), 1);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_and_empty_catalog_are_errors() {
        let missing = Path::new("/does/not/exist/braids");
        assert!(list_braids(missing).is_err());

        let dir = std::env::temp_dir().join("braidview-catalog-empty");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        assert!(list_braids(&dir).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
