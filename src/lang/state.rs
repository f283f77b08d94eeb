// lang/state.rs
use std::{collections::BTreeSet, path::PathBuf, sync::Arc};

use harper_core::spell::FstDictionary;
use rand::Rng;
use tracing::info;

use super::{
    paraphrase::Paraphraser,
    speller::{correct_text, FrequencySpeller, SpellEngine},
    tagger::{HarperTagger, LexiconTagger, PosTagger},
    thesaurus::{Lexicon, Thesaurus},
};
use crate::error::Result;

/// Where the language resources come from.
#[derive(Debug, Clone)]
pub struct ResourceOptions {
    /// Word frequency table; the bundled table when `None`.
    pub words: Option<PathBuf>,
    /// Lexicon JSON; the bundled lexicon when `None`.
    pub lexicon: Option<PathBuf>,
    /// Use harper's curated dictionary for extra known words and tagging.
    pub harper_dictionary: bool,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self {
            words: None,
            lexicon: None,
            harper_dictionary: true,
        }
    }
}

/// The spelling engine, thesaurus and tagger shared by every handler.
#[derive(Clone)]
pub struct LanguageServices {
    pub speller: Arc<dyn SpellEngine>,
    pub thesaurus: Arc<dyn Thesaurus>,
    pub tagger: Arc<dyn PosTagger>,
}

impl LanguageServices {
    pub fn new(
        speller: Arc<dyn SpellEngine>,
        thesaurus: Arc<dyn Thesaurus>,
        tagger: Arc<dyn PosTagger>,
    ) -> Self {
        Self {
            speller,
            thesaurus,
            tagger,
        }
    }

    /// Load the resources named by `options`, once, at startup.
    pub fn load(options: &ResourceOptions) -> Result<Self> {
        let mut speller = match &options.words {
            Some(path) => FrequencySpeller::from_file(path)?,
            None => FrequencySpeller::embedded()?,
        };
        let lexicon = Arc::new(match &options.lexicon {
            Some(path) => Lexicon::from_file(path)?,
            None => Lexicon::embedded()?,
        });
        info!(
            "Language resources: {} words, {} synsets",
            speller.len(),
            lexicon.len()
        );

        let tagger: Arc<dyn PosTagger> = if options.harper_dictionary {
            let dictionary = FstDictionary::curated();
            speller = speller.with_dictionary(dictionary.clone());
            info!("Using harper curated dictionary");
            Arc::new(HarperTagger::new(dictionary))
        } else {
            Arc::new(LexiconTagger::new(lexicon.clone()))
        };

        Ok(Self::new(Arc::new(speller), lexicon, tagger))
    }

    /// Spell-correct a whole text.
    pub fn correct_text(&self, text: &str) -> String {
        correct_text(self.speller.as_ref(), text)
    }

    pub fn paraphrase<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
        Paraphraser::new(self.thesaurus.as_ref(), self.tagger.as_ref()).paraphrase(sentence, rng)
    }

    /// Synonyms across all parts of speech and alternative spellings of `word`.
    pub fn lookup(&self, word: &str) -> (BTreeSet<String>, BTreeSet<String>) {
        (
            self.thesaurus.synonyms(word, None),
            self.speller.candidates(word),
        )
    }
}

impl std::fmt::Debug for LanguageServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageServices").finish()
    }
}
