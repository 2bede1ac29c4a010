use crate::error::ParseError;
use crate::load::clean::clean_country;
use serde::Deserialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

pub const DEFAULT_INPUT: &str = "data.csv";
pub const DEFAULT_OUTPUT: &str = "d3-world-map.html";
pub const DEFAULT_YEAR_COLUMN: &str = "2016";

/// Source name → catalog name, for countries the catalog cannot match as written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct NameFixups(pub BTreeMap<String, String>);

impl Default for NameFixups {
    fn default() -> Self {
        let pairs = [
            (
                "Democratic Republic of the Congo",
                "Congo, The Democratic Republic of the",
            ),
            // South Korea; the DPRK appears in the source under its own name.
            ("Republic of Korea", "Korea, Republic of"),
        ];
        NameFixups(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl NameFixups {
    /// Defaults with the entries of a YAML mapping file merged over them.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extra: NameFixups =
            serde_yaml::from_str(&text).map_err(|source| ParseError::Fixups {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), entries = extra.0.len(), "loaded name fixups");

        let mut merged = NameFixups::default();
        merged.0.extend(extra.0);
        merged.normalized()
    }

    /// Clean keys and targets the way row names are cleaned and collapse
    /// chains (`A → B`, `B → C` becomes `A → C`), so a row that has been
    /// fixed up is left alone by another cleaning pass.
    pub fn normalized(self) -> Result<Self, ParseError> {
        let cleaned: BTreeMap<String, String> = self
            .0
            .into_iter()
            .map(|(k, v)| (clean_country(&k), clean_country(&v)))
            .collect();

        let mut resolved = BTreeMap::new();
        for (key, target) in &cleaned {
            let mut seen = BTreeSet::from([key.as_str()]);
            let mut current = target.as_str();
            while let Some(next) = cleaned.get(current) {
                if next == current {
                    break;
                }
                if !seen.insert(current) {
                    return Err(ParseError::FixupCycle { name: key.clone() });
                }
                current = next;
            }
            resolved.insert(key.clone(), current.to_string());
        }
        Ok(NameFixups(resolved))
    }

    pub fn apply<'a>(&'a self, name: &'a str) -> &'a str {
        self.0.get(name).map(String::as_str).unwrap_or(name)
    }
}

/// Everything the pipeline needs to know; `Default` reproduces the stock run.
#[derive(Debug, Clone)]
pub struct MapConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Header label of the estimate column in the source file.
    pub year_column: String,
    /// Estimate values meaning "no data"; compared ignoring case and whitespace.
    pub placeholders: Vec<String>,
    pub fixups: NameFixups,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            year_column: DEFAULT_YEAR_COLUMN.to_string(),
            placeholders: vec!["No data".to_string()],
            fixups: NameFixups::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_fixups_target_south_korea() {
        let fixups = NameFixups::default();
        assert_eq!(fixups.apply("Republic of Korea"), "Korea, Republic of");
        assert_eq!(
            fixups.apply("Democratic Republic of the Congo"),
            "Congo, The Democratic Republic of the"
        );
        assert_eq!(fixups.apply("France"), "France");
    }

    #[test]
    fn yaml_entries_merge_over_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "\"Republic of Korea\": \"Korea, Democratic People's Republic of\"")?;
        writeln!(tmp, "\"Swaziland\": \"Eswatini\"")?;

        let fixups = NameFixups::from_yaml_file(tmp.path())?;
        assert_eq!(
            fixups.apply("Republic of Korea"),
            "Korea, Democratic People's Republic of"
        );
        assert_eq!(fixups.apply("Swaziland"), "Eswatini");
        assert!(fixups.0.contains_key("Democratic Republic of the Congo"));
        Ok(())
    }

    #[test]
    fn yaml_chains_collapse_and_targets_are_cleaned() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "\"Swaziland\": \"Eswatini (Kingdom of)\"")?;
        writeln!(tmp, "\"A\": \"B\"")?;
        writeln!(tmp, "\"B\": \"C\"")?;

        let fixups = NameFixups::from_yaml_file(tmp.path())?;
        assert_eq!(fixups.apply("Swaziland"), "Eswatini, Kingdom of");
        assert_eq!(fixups.apply("A"), "C");
        assert_eq!(fixups.apply("B"), "C");
        Ok(())
    }

    #[test]
    fn yaml_cycle_is_rejected() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "\"A\": \"B\"")?;
        writeln!(tmp, "\"B\": \"A\"")?;

        let err = NameFixups::from_yaml_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ParseError::FixupCycle { .. }));
        Ok(())
    }

    #[test]
    fn bad_yaml_is_a_fixups_error() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "- just\n- a list")?;
        let err = NameFixups::from_yaml_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ParseError::Fixups { .. }));
        Ok(())
    }
}
