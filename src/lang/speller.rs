// lang/speller.rs
use std::{
    cmp::Reverse,
    collections::{BTreeSet, HashMap, HashSet},
    fs,
    path::Path,
};

use harper_core::{
    spell::{Dictionary, FstDictionary},
    Lrc,
};
use tracing::info;

use super::tokenize::{join, preserve_capitalization, tokenize};
use crate::error::{EditError, Result};

const EMBEDDED_WORDS: &str = include_str!("../../resources/words.txt");
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// A spelling-correction engine.
pub trait SpellEngine: Send + Sync {
    /// Most likely correction, `None` when nothing close is known.
    fn correction(&self, word: &str) -> Option<String>;

    /// Alternative spellings, empty when nothing close is known.
    fn candidates(&self, word: &str) -> BTreeSet<String>;
}

/// Best correction for `word`, or `word` itself when the engine has none.
pub fn correct<E: SpellEngine + ?Sized>(engine: &E, word: &str) -> String {
    engine
        .correction(word)
        .unwrap_or_else(|| word.to_string())
}

/// Correct every word of `text`, keeping the punctuation around each word and
/// the case of its first letter.
pub fn correct_text<E: SpellEngine + ?Sized>(engine: &E, text: &str) -> String {
    let corrected = tokenize(text).into_iter().map(|token| {
        let word = preserve_capitalization(token.word, &correct(engine, token.word));
        token.render_with(&word)
    });
    join(corrected)
}

/// Frequency-ranked edit-distance corrector.
///
/// Candidates are the word itself if known, else known words one edit away,
/// else known words two edits away. The correction is the most frequent
/// candidate.
pub struct FrequencySpeller {
    frequencies: HashMap<String, u64>,
    longest_word: usize,
    dictionary: Option<Lrc<FstDictionary>>,
}

impl FrequencySpeller {
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut frequencies = HashMap::new();
        for (word, count) in counts {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            *frequencies.entry(word).or_insert(0) += count;
        }
        let longest_word = frequencies
            .keys()
            .map(|w| w.chars().count())
            .max()
            .unwrap_or(0);

        Self {
            frequencies,
            longest_word,
            dictionary: None,
        }
    }

    /// Parse a `word [count]` table, one entry per line. `#` starts a comment.
    pub fn parse(source: &str) -> Result<Self> {
        let mut counts = Vec::new();
        for (lineno, line) in source.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let count = match fields.next() {
                Some(raw) => raw.parse::<u64>().map_err(|e| {
                    EditError::resource(format!(
                        "word list line {}: bad count {:?}: {}",
                        lineno + 1,
                        raw,
                        e
                    ))
                })?,
                None => 1,
            };
            counts.push((word.to_string(), count));
        }

        if counts.is_empty() {
            return Err(EditError::resource("word list is empty"));
        }
        Ok(Self::from_counts(counts))
    }

    /// The word frequency table bundled with the crate.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_WORDS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        let speller = Self::parse(&source)?;
        info!("Loaded {} words from {}", speller.len(), path.display());
        Ok(speller)
    }

    /// Also accept words from a harper dictionary. They rank below every
    /// word of the frequency table.
    pub fn with_dictionary(mut self, dictionary: Lrc<FstDictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequency(&self, word: &str) -> u64 {
        self.frequencies.get(word).copied().unwrap_or(0)
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.frequencies.contains_key(word)
            || self
                .dictionary
                .as_ref()
                .is_some_and(|dict| dict.contains_word_str(word))
    }

    // Numbers and very long tokens are passed through.
    fn should_check(&self, word: &str) -> bool {
        if word.chars().count() > self.longest_word + 3 {
            return false;
        }
        word.parse::<f64>().is_err()
    }

    fn known_edits1(&self, word: &str) -> BTreeSet<String> {
        edits1(word)
            .into_iter()
            .filter(|w| self.is_known(w))
            .collect()
    }

    fn known_edits2(&self, word: &str) -> BTreeSet<String> {
        let mut known = BTreeSet::new();
        for first in edits1(word) {
            for second in edits1(&first) {
                if !known.contains(&second) && self.is_known(&second) {
                    known.insert(second);
                }
            }
        }
        known
    }
}

impl SpellEngine for FrequencySpeller {
    fn correction(&self, word: &str) -> Option<String> {
        let best = self
            .candidates(word)
            .into_iter()
            .max_by_key(|c| (self.frequency(c), Reverse(c.clone())))?;

        if best.to_lowercase() == word.to_lowercase() {
            Some(word.to_string())
        } else {
            Some(best)
        }
    }

    fn candidates(&self, word: &str) -> BTreeSet<String> {
        if !self.should_check(word) {
            return BTreeSet::from([word.to_string()]);
        }

        let lower = word.to_lowercase();
        if self.is_known(&lower) {
            return BTreeSet::from([lower]);
        }

        let one = self.known_edits1(&lower);
        if !one.is_empty() {
            return one;
        }
        self.known_edits2(&lower)
    }
}

impl std::fmt::Debug for FrequencySpeller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrequencySpeller")
            .field("words", &self.frequencies.len())
            .field("dictionary", &self.dictionary.is_some())
            .finish()
    }
}

/// All strings one delete, transpose, replace or insert away from `word`.
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut edits = HashSet::new();

    for i in 0..=chars.len() {
        let (left, right) = chars.split_at(i);

        if !right.is_empty() {
            edits.insert(left.iter().chain(&right[1..]).collect());
        }
        if right.len() > 1 {
            edits.insert(
                left.iter()
                    .chain([&right[1], &right[0]])
                    .chain(&right[2..])
                    .collect(),
            );
        }
        for c in ALPHABET.chars() {
            if !right.is_empty() {
                edits.insert(
                    left.iter()
                        .chain(std::iter::once(&c))
                        .chain(&right[1..])
                        .collect(),
                );
            }
            edits.insert(
                left.iter()
                    .chain(std::iter::once(&c))
                    .chain(right)
                    .collect(),
            );
        }
    }

    edits
}
