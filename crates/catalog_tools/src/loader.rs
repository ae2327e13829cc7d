//! Loading raw unit data and icon directories from disk.
//!
//! Unit files are `id -> record` mappings in JSON (`.json`) or RON (`.ron`).
//! Both decode into the same [`serde_json::Value`] shape so classification
//! never sees the file format.

use std::path::{Path, PathBuf};

use catalog_core::catalog::UnitCatalog;
use catalog_core::classify::Classifier;
use catalog_core::error::{json_kind, CatalogError, Result};
use catalog_core::facets::IconLibrary;
use serde_json::Value;

/// Data file formats understood by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// JSON document.
    Json,
    /// RON document.
    Ron,
}

impl DataFormat {
    /// Format for a path, by extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_error(path: &Path, message: impl ToString) -> CatalogError {
    CatalogError::DataParseError {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Parse unit data text in the given format.
///
/// # Errors
///
/// Returns [`CatalogError::DataParseError`] if the text does not parse.
pub fn parse_units(text: &str, format: DataFormat, path: &Path) -> Result<Value> {
    match format {
        DataFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(path, e)),
        DataFormat::Ron => ron::from_str::<Value>(text).map_err(|e| parse_error(path, e)),
    }
}

/// Load a unit data file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension or
/// does not parse.
pub fn load_units_file(path: &Path) -> Result<Value> {
    let format = DataFormat::from_path(path)
        .ok_or_else(|| parse_error(path, "unsupported file extension"))?;
    let text = read(path)?;
    let value = parse_units(&text, format, path)?;
    tracing::debug!(path = %path.display(), ?format, "loaded unit data");
    Ok(value)
}

/// Unit data files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file() && DataFormat::from_path(p).is_some())
        .collect();
    files.sort();
    Ok(files)
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| CatalogError::Io {
        path: dir.display().to_string(),
        source,
    };
    std::fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_error))
        .collect()
}

/// Classify every unit found in `paths` into one catalog.
///
/// `paths` may mix files and directories; directories contribute their
/// data files.
///
/// # Errors
///
/// Returns the first load, classification or duplicate-id error.
pub fn load_catalog(classifier: &Classifier, paths: &[PathBuf]) -> Result<UnitCatalog> {
    let mut catalog = UnitCatalog::new();
    for path in paths {
        let files = if path.is_dir() {
            data_files(path)?
        } else {
            vec![path.clone()]
        };
        for file in files {
            let raw = load_units_file(&file)?;
            let Value::Object(records) = &raw else {
                return Err(CatalogError::InvalidInput {
                    id: file.display().to_string(),
                    found: json_kind(&raw),
                });
            };
            catalog.extend_from(classifier, records.iter().map(|(id, v)| (id.as_str(), v)))?;
        }
    }
    tracing::info!(units = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Scan an icon directory into a library served under `served_dir`.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed.
pub fn scan_icons(dir: &Path, served_dir: &str) -> Result<IconLibrary> {
    let mut names: Vec<String> = list_dir(dir)?
        .into_iter()
        .filter(|p| p.is_file())
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
        .collect();
    names.sort();
    let library = IconLibrary::new(served_dir, names);
    tracing::debug!(icons = library.len(), dir = %dir.display(), "scanned icons");
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DataFormat::from_path(Path::new("a/units.json")), Some(DataFormat::Json));
        assert_eq!(DataFormat::from_path(Path::new("units.RON")), Some(DataFormat::Ron));
        assert_eq!(DataFormat::from_path(Path::new("units.yaml")), None);
        assert_eq!(DataFormat::from_path(Path::new("units")), None);
    }

    #[test]
    fn test_json_and_ron_agree() {
        let json = parse_units(
            r#"{"armpw": {"icon": "icons/bot.png", "customparams": {"unitgroup": "weapon"}}}"#,
            DataFormat::Json,
            Path::new("units.json"),
        )
        .unwrap();
        let ron = parse_units(
            r#"{"armpw": {"icon": "icons/bot.png", "customparams": {"unitgroup": "weapon"}}}"#,
            DataFormat::Ron,
            Path::new("units.ron"),
        )
        .unwrap();
        assert_eq!(json, ron);
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_units("{", DataFormat::Json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, CatalogError::DataParseError { ref path, .. } if path == "bad.json"));
    }

    #[test]
    fn test_load_directory_catalog() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("armada.json"),
            r#"{"armck": {"icon": "icons/bot.png", "buildoptions": ["armsolar"]}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("cortex.ron"),
            r#"{"corak": {"icon": "icons/bot.png", "metalcost": 50}}"#,
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = data_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);

        let catalog = load_catalog(&Classifier::default(), &[dir.path().to_path_buf()]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("armck").unwrap().constructor);
        assert_eq!(catalog.get("corak").unwrap().metal_cost, Some(50.0));
    }

    #[test]
    fn test_duplicate_across_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"armpw": {}}"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{"armpw": {}}"#).unwrap();
        let err = load_catalog(&Classifier::default(), &[dir.path().to_path_buf()]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateUnit(ref id) if id == "armpw"));
    }

    #[test]
    fn test_scan_icons() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Commander.png"), b"").unwrap();
        fs::write(dir.path().join("t2.svg"), b"").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let icons = scan_icons(dir.path(), "images/icons").unwrap();
        assert_eq!(icons.len(), 2);
        assert_eq!(icons.lookup("commander").as_deref(), Some("images/icons/Commander.png"));
        assert_eq!(icons.lookup("T2").as_deref(), Some("images/icons/t2.svg"));
        assert_eq!(icons.lookup("nested"), None);
    }
}
