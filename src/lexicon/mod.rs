// Phrase and term lists — the configuration data the rule cascade runs on.
//
// Lists are data, not code. They can be loaded from a directory of JSON
// files and edited without touching classifier logic; the compiled-in
// defaults mirror the curated multilingual lists the cascade was tuned
// against. Everything here is immutable after load.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod builtin;

/// One script/language group within a list file.
///
/// List files are ordered arrays of groups. Order is meaningful: the
/// matcher returns the first phrase over threshold, not the best-scoring
/// one, so earlier groups take priority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseGroup {
    /// Script or language label ("english", "hindi", "bengali", ...)
    pub script: String,
    pub phrases: Vec<String>,
}

/// An ordered phrase list, Unicode-lowercased at load time.
#[derive(Debug, Clone)]
pub struct PhraseList {
    entries: Vec<String>,
}

impl PhraseList {
    /// Flatten script groups into one ordered list, normalizing each
    /// phrase the same way input text is normalized (trim + lowercase).
    pub fn from_groups(groups: &[PhraseGroup]) -> Self {
        let entries = groups
            .iter()
            .flat_map(|g| g.phrases.iter())
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self { entries }
    }

    /// Phrases in authoring order. The matcher iterates this directly.
    pub fn phrases(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered set of single terms for the co-occurrence stage.
///
/// Iteration order is fixed (authoring order) because the heuristic
/// reports the first matching term, not all of them.
#[derive(Debug, Clone)]
pub struct TermSet {
    terms: Vec<String>,
}

impl TermSet {
    pub fn from_groups(groups: &[PhraseGroup]) -> Self {
        let terms = groups
            .iter()
            .flat_map(|g| g.phrases.iter())
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// The four lists the cascade needs: allow/deny phrases for the fuzzy
/// stages, anchor/negative terms for the co-occurrence stage.
#[derive(Debug, Clone)]
pub struct Lexicon {
    allow_groups: Vec<PhraseGroup>,
    deny_groups: Vec<PhraseGroup>,
    anchor_groups: Vec<PhraseGroup>,
    negative_groups: Vec<PhraseGroup>,
    pub allow: PhraseList,
    pub deny: PhraseList,
    pub anchors: TermSet,
    pub negatives: TermSet,
}

impl Lexicon {
    fn build(
        allow_groups: Vec<PhraseGroup>,
        deny_groups: Vec<PhraseGroup>,
        anchor_groups: Vec<PhraseGroup>,
        negative_groups: Vec<PhraseGroup>,
    ) -> Self {
        let allow = PhraseList::from_groups(&allow_groups);
        let deny = PhraseList::from_groups(&deny_groups);
        let anchors = TermSet::from_groups(&anchor_groups);
        let negatives = TermSet::from_groups(&negative_groups);
        Self {
            allow_groups,
            deny_groups,
            anchor_groups,
            negative_groups,
            allow,
            deny,
            anchors,
            negatives,
        }
    }

    /// The compiled-in default lists.
    pub fn builtin() -> Self {
        Self::build(
            builtin::allow_groups(),
            builtin::deny_groups(),
            builtin::anchor_groups(),
            builtin::negative_groups(),
        )
    }

    /// Load all four lists from a directory of JSON files.
    ///
    /// Expects `allow.json`, `deny.json`, `anchors.json`, `negatives.json`,
    /// each an ordered array of `{script, phrases}` groups. Any missing or
    /// malformed file is a fatal error — the cascade's correctness depends
    /// on these lists existing, so there is no per-request recovery.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let lexicon = Self::build(
            load_groups(&dir.join("allow.json"))?,
            load_groups(&dir.join("deny.json"))?,
            load_groups(&dir.join("anchors.json"))?,
            load_groups(&dir.join("negatives.json"))?,
        );
        if lexicon.allow.is_empty() || lexicon.deny.is_empty() {
            anyhow::bail!(
                "Lexicon at {} has an empty allow or deny list. \
                 Both phrase lists must contain at least one phrase.",
                dir.display()
            );
        }
        Ok(lexicon)
    }

    /// Script groups per list, for display (`ember lists`).
    pub fn groups(&self) -> [(&'static str, &[PhraseGroup]); 4] {
        [
            ("allow", &self.allow_groups),
            ("deny", &self.deny_groups),
            ("anchors", &self.anchor_groups),
            ("negatives", &self.negative_groups),
        ]
    }
}

fn load_groups(path: &Path) -> Result<Vec<PhraseGroup>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
    let groups: Vec<PhraseGroup> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse lexicon file {}", path.display()))?;
    Ok(groups)
}
