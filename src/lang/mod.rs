// lang/mod.rs
pub mod paraphrase;
pub mod speller;
pub mod state;
pub mod tagger;
pub mod thesaurus;
pub mod tokenize;

pub use paraphrase::Paraphraser;
pub use speller::{correct, correct_text, FrequencySpeller, SpellEngine};
pub use state::{LanguageServices, ResourceOptions};
pub use tagger::{HarperTagger, LexiconTagger, PosTag, PosTagger};
pub use thesaurus::{Lexicon, PartOfSpeech, Synset, Thesaurus};
