//! Named deck layouts shared by the deck test suites. Layouts live under the
//! workspace `fixtures/` directory and are listed in `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

/// Fixture name -> layout file, relative to `fixtures/`.
#[derive(Debug, Deserialize)]
struct Manifest {
    decks: BTreeMap<String, String>,
}

impl Manifest {
    fn deck_file(&self, name: &str) -> Result<PathBuf> {
        let rel = self
            .decks
            .get(name)
            .with_context(|| format!("unknown deck fixture '{name}'"))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }
}

/// Page layout used to drive a deck in tests: slide count, viewport and the
/// decorative layers with their raw speed attribute and measured midpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct DeckLayout {
    pub name: String,
    pub slides: usize,
    pub viewport_height: f64,
    #[serde(default)]
    pub parallax: Vec<ParallaxElement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParallaxElement {
    #[serde(default)]
    pub speed: Option<String>,
    #[serde(default)]
    pub midpoint: Option<f64>,
}

pub mod decks {
    use super::*;

    /// Fixture names, sorted.
    pub fn keys() -> Vec<String> {
        MANIFEST.decks.keys().cloned().collect()
    }

    pub fn layout(name: &str) -> Result<DeckLayout> {
        let file = MANIFEST.deck_file(name)?;
        let text = fs::read_to_string(&file)
            .with_context(|| format!("reading deck fixture {}", file.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing deck fixture '{name}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_loads_under_its_own_name() {
        let keys = decks::keys();
        assert!(!keys.is_empty());
        for key in keys {
            let layout = decks::layout(&key).unwrap();
            assert_eq!(layout.name, key);
            assert!(layout.slides > 0);
            assert!(layout.viewport_height > 0.0);
        }
    }

    #[test]
    fn unknown_deck_is_an_error() {
        let err = decks::layout("missing").unwrap_err();
        assert!(err.to_string().contains("unknown deck fixture 'missing'"));
    }
}
