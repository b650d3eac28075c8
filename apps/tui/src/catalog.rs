use std::path::Path;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde_json::{Map, Value};

use crate::error::CatalogError;

/// Read-only registry of friendly dataset names to LaTiS path segments,
/// in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetCatalog {
    entries: Vec<(String, String)>,
}

impl DatasetCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        tracing::info!(datasets = catalog.len(), path = %path.display(), "loaded dataset catalog");
        Ok(catalog)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let object: Map<String, Value> = serde_json::from_str(text)?;
        let entries = object
            .into_iter()
            .map(|(name, value)| match value {
                Value::String(path) => Ok((name, path)),
                _ => Err(CatalogError::InvalidPath { name }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn from_entries<I, N, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, path) in entries {
            let name = name.into();
            let path = path.into();
            if let Some(existing) = catalog.entries.iter_mut().find(|(n, _)| *n == name) {
                existing.1 = path;
            } else {
                catalog.entries.push((name, path));
            }
        }
        catalog
    }

    pub fn path(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, path)| path.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names matching `query`, best match first. An empty query returns
    /// every name in catalog order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let query = query.trim();
        if query.is_empty() {
            return self.names().collect();
        }

        let matcher = SkimMatcherV2::default().ignore_case();
        let mut scored: Vec<(i64, usize, &str)> = self
            .names()
            .enumerate()
            .filter_map(|(index, name)| {
                matcher
                    .fuzzy_match(name, query)
                    .map(|score| (score, index, name))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, name)| name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "Kp Index (GFZ Potsdam)": "kp_gfz",
        "Dst Index (Kyoto)": "dst_kyoto",
        "F10.7 Solar Flux (Penticton)": "penticton_radio_flux"
    }"#;

    #[test]
    fn from_json_keeps_file_order() -> Result<(), CatalogError> {
        let catalog = DatasetCatalog::from_json(SAMPLE)?;
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                "Kp Index (GFZ Potsdam)",
                "Dst Index (Kyoto)",
                "F10.7 Solar Flux (Penticton)"
            ]
        );
        assert_eq!(catalog.path("Dst Index (Kyoto)"), Some("dst_kyoto"));
        assert_eq!(catalog.path("AE Index"), None);
        Ok(())
    }

    #[test]
    fn non_string_path_is_rejected() {
        let result = DatasetCatalog::from_json(r#"{"Kp": 3}"#);
        assert!(matches!(result, Err(CatalogError::InvalidPath { name }) if name == "Kp"));
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(matches!(
            DatasetCatalog::from_json(r#"["kp_gfz"]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn load_reads_file_and_reports_missing_file() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SAMPLE.as_bytes())?;

        let catalog = DatasetCatalog::load(file.path())?;
        assert_eq!(catalog.len(), 3);

        let missing = DatasetCatalog::load("definitely/not/here/datasets.json");
        assert!(matches!(missing, Err(CatalogError::Io { .. })));
        Ok(())
    }

    #[test]
    fn search_ranks_fuzzy_matches() -> Result<(), CatalogError> {
        let catalog = DatasetCatalog::from_json(SAMPLE)?;

        assert_eq!(catalog.search("").len(), 3);
        assert_eq!(catalog.search("kyoto"), vec!["Dst Index (Kyoto)"]);
        assert!(catalog.search("zzzz").is_empty());
        Ok(())
    }

    #[test]
    fn from_entries_overwrites_duplicate_names() {
        let catalog = DatasetCatalog::from_entries([("a", "x"), ("b", "y"), ("a", "z")]);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.path("a"), Some("z"));
    }
}
