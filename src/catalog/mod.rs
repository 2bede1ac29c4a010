//! ISO 3166-1 country catalog, embedded at build time.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

static COUNTRIES_JSON: &str = include_str!("countries.json");

static CATALOG: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(COUNTRIES_JSON).expect("embedded countries.json must parse")
});

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub alpha_2: String,
    pub alpha_3: String,
    pub name: String,
    #[serde(default)]
    pub official_name: Option<String>,
    #[serde(default)]
    pub common_name: Option<String>,
    /// Former or widely used alternative names.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Country {
    fn keys(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.alpha_2.as_str()),
            Some(self.alpha_3.as_str()),
            Some(self.name.as_str()),
            self.official_name.as_deref(),
            self.common_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .chain(self.aliases.iter().map(String::as_str))
    }
}

/// Name → country index with an exact (case-folded) and a loose key per entry.
pub struct Catalog {
    countries: Vec<Country>,
    exact: HashMap<String, usize>,
    loose: HashMap<String, usize>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self> {
        let countries: Vec<Country> =
            serde_json::from_str(text).context("parsing country catalog JSON")?;

        let mut exact = HashMap::new();
        let mut loose = HashMap::new();
        for (i, country) in countries.iter().enumerate() {
            for key in country.keys() {
                exact.entry(key.to_lowercase()).or_insert(i);
                loose.entry(loose_key(key)).or_insert(i);
            }
        }
        debug!(countries = countries.len(), keys = exact.len(), "catalog indexed");

        Ok(Catalog {
            countries,
            exact,
            loose,
        })
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> &'static Catalog {
        &CATALOG
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Match by code, name, official name, common name or alias, ignoring
    /// case; failing that, ignoring punctuation and spacing too.
    pub fn lookup(&self, query: &str) -> Option<&Country> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        self.exact
            .get(&query.to_lowercase())
            .or_else(|| self.loose.get(&loose_key(query)))
            .map(|&i| &self.countries[i])
    }
}

/// lowercase, alphanumerics only, single spaces
fn loose_key(s: &str) -> String {
    s.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::embedded();
        assert_eq!(catalog.len(), 249);
    }

    #[test]
    fn lookup_by_every_key_kind() {
        let catalog = Catalog::embedded();
        let code = |q: &str| catalog.lookup(q).map(|c| c.alpha_3.as_str());

        assert_eq!(code("France"), Some("FRA"));
        assert_eq!(code("french republic"), Some("FRA"));
        assert_eq!(code("FR"), Some("FRA"));
        assert_eq!(code("fra"), Some("FRA"));
        assert_eq!(code("South Korea"), Some("KOR"));
        assert_eq!(code("Korea, Republic of"), Some("KOR"));
        assert_eq!(code("Democratic People's Republic of Korea"), Some("PRK"));
        assert_eq!(code("Swaziland"), Some("SWZ"));
        assert_eq!(code("United Republic of Tanzania"), Some("TZA"));
    }

    #[test]
    fn loose_match_ignores_punctuation_and_spacing() {
        let catalog = Catalog::embedded();
        let code = |q: &str| catalog.lookup(q).map(|c| c.alpha_3.as_str());

        assert_eq!(code("Bolivia Plurinational State of"), Some("BOL"));
        assert_eq!(code("  guinea-bissau "), Some("GNB"));
        assert_eq!(code("Guinea  Bissau"), Some("GNB"));
    }

    #[test]
    fn unknown_names_do_not_match() {
        let catalog = Catalog::embedded();
        assert!(catalog.lookup("Atlantis").is_none());
        assert!(catalog.lookup("Frnace").is_none());
        assert!(catalog.lookup("").is_none());
        // no prefix matching
        assert!(catalog.lookup("Congo, Kinshasa").is_none());
    }

    #[test]
    fn custom_catalog_from_json() -> Result<()> {
        let catalog = Catalog::from_json(
            r#"[{"alpha_2": "XK", "alpha_3": "XKX", "name": "Kosovo", "aliases": ["Kosova"]}]"#,
        )?;
        assert_eq!(catalog.lookup("kosova").map(|c| c.alpha_3.as_str()), Some("XKX"));
        assert!(catalog.lookup("France").is_none());
        Ok(())
    }
}
