// lang/thesaurus.rs
use std::{
    collections::{BTreeSet, HashMap},
    fs,
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EditError, Result};

const EMBEDDED_LEXICON: &str = include_str!("../../resources/lexicon.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartOfSpeech {
    #[serde(rename = "n")]
    Noun,
    #[serde(rename = "v")]
    Verb,
    #[serde(rename = "a")]
    Adjective,
    #[serde(rename = "s")]
    AdjectiveSatellite,
    #[serde(rename = "r")]
    Adverb,
}

impl PartOfSpeech {
    /// Whether a sense of this part of speech passes a lookup filter.
    /// Satellites count as adjectives.
    pub fn matches(self, filter: PartOfSpeech) -> bool {
        match filter {
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => matches!(
                self,
                PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite
            ),
            other => self == other,
        }
    }

    // Suffix detachment rules for inflected forms.
    fn detachments(self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartOfSpeech::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            PartOfSpeech::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            PartOfSpeech::Adjective | PartOfSpeech::AdjectiveSatellite => {
                &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")]
            }
            PartOfSpeech::Adverb => &[],
        }
    }
}

/// One sense entry: a part of speech and its lemma names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Synset {
    pub pos: PartOfSpeech,
    pub lemmas: Vec<String>,
}

#[derive(Deserialize)]
struct LexiconFile {
    synsets: Vec<Synset>,
}

/// A synonym source.
pub trait Thesaurus: Send + Sync {
    /// Every lemma of every sense of `word`, optionally restricted to one
    /// part of speech. Unknown words give an empty set.
    fn synonyms(&self, word: &str, pos: Option<PartOfSpeech>) -> BTreeSet<String>;
}

/// In-memory synset database indexed by lowercased lemma.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    synsets: Vec<Synset>,
    index: HashMap<String, Vec<usize>>,
}

impl Lexicon {
    pub fn new(synsets: Vec<Synset>) -> Self {
        let mut index: HashMap<String, Vec<usize>> = HashMap::new();
        for (id, synset) in synsets.iter().enumerate() {
            for lemma in &synset.lemmas {
                let ids = index.entry(lemma.to_lowercase()).or_default();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        Self { synsets, index }
    }

    pub fn from_json(source: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(source)?;
        if file.synsets.is_empty() {
            return Err(EditError::resource("lexicon has no synsets"));
        }
        Ok(Self::new(file.synsets))
    }

    /// The lexicon bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_LEXICON)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let lexicon = Self::from_json(&source)?;
        info!("Loaded {} synsets from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.synsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synsets.is_empty()
    }

    /// Senses of `word`, trying the word itself and then its base forms.
    pub fn synsets(&self, word: &str, pos: Option<PartOfSpeech>) -> Vec<&Synset> {
        let word = word.trim().to_lowercase();
        let mut ids = BTreeSet::new();

        self.collect(&word, None, pos, &mut ids);

        let rule_sets = [
            PartOfSpeech::Noun,
            PartOfSpeech::Verb,
            PartOfSpeech::Adjective,
            PartOfSpeech::Adverb,
        ];
        for rule_pos in rule_sets {
            if pos.is_some_and(|filter| !rule_pos.matches(filter)) {
                continue;
            }
            for &(suffix, ending) in rule_pos.detachments() {
                let Some(stem) = word.strip_suffix(suffix) else {
                    continue;
                };
                if stem.is_empty() {
                    continue;
                }
                let base = format!("{}{}", stem, ending);
                self.collect(&base, Some(rule_pos), pos, &mut ids);
            }
        }

        ids.into_iter().map(|id| &self.synsets[id]).collect()
    }

    /// Whether `word` has at least one sense of the given part of speech.
    pub fn has_sense(&self, word: &str, pos: PartOfSpeech) -> bool {
        !self.synsets(word, Some(pos)).is_empty()
    }

    fn collect(
        &self,
        form: &str,
        form_pos: Option<PartOfSpeech>,
        filter: Option<PartOfSpeech>,
        ids: &mut BTreeSet<usize>,
    ) {
        let Some(found) = self.index.get(form) else {
            return;
        };
        for &id in found {
            let sense_pos = self.synsets[id].pos;
            if form_pos.is_some_and(|p| !sense_pos.matches(p)) {
                continue;
            }
            if filter.is_some_and(|p| !sense_pos.matches(p)) {
                continue;
            }
            ids.insert(id);
        }
    }
}

impl Thesaurus for Lexicon {
    fn synonyms(&self, word: &str, pos: Option<PartOfSpeech>) -> BTreeSet<String> {
        self.synsets(word, pos)
            .into_iter()
            .flat_map(|synset| synset.lemmas.iter().cloned())
            .collect()
    }
}
