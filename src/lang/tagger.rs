// lang/tagger.rs
use std::sync::Arc;

use harper_brill::UPOS;
use harper_core::{spell::FstDictionary, Document, Lrc, TokenKind};
use serde::Serialize;

use super::thesaurus::{Lexicon, PartOfSpeech};

/// Coarse part-of-speech tags. Only `Adjective` drives paraphrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PosTag {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Punctuation,
    Other,
}

/// Assigns one tag per token.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag>;
}

fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}

/// Tags tokens in sentence context with harper's Brill tagger.
///
/// The tokens are joined into one sentence and parsed as a single
/// `Document`, so a word like "kind" is tagged by how it is used rather
/// than by every sense the dictionary lists for it.
#[derive(Clone)]
pub struct HarperTagger {
    dictionary: Lrc<FstDictionary>,
}

impl HarperTagger {
    pub fn new(dictionary: Lrc<FstDictionary>) -> Self {
        Self { dictionary }
    }
}

fn from_upos(upos: UPOS) -> PosTag {
    match upos {
        UPOS::ADJ => PosTag::Adjective,
        UPOS::NOUN | UPOS::PROPN => PosTag::Noun,
        UPOS::VERB | UPOS::AUX => PosTag::Verb,
        UPOS::ADV => PosTag::Adverb,
        UPOS::PUNCT => PosTag::Punctuation,
        _ => PosTag::Other,
    }
}

impl PosTagger for HarperTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        // Char offset where each token starts in the joined sentence.
        let mut starts = Vec::with_capacity(tokens.len());
        let mut sentence = String::new();
        let mut offset = 0;
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                sentence.push(' ');
                offset += 1;
            }
            starts.push(offset);
            sentence.push_str(token);
            offset += token.chars().count();
        }

        let mut tags: Vec<PosTag> = tokens
            .iter()
            .map(|t| {
                if is_punctuation(t) {
                    PosTag::Punctuation
                } else {
                    PosTag::Other
                }
            })
            .collect();
        let mut tagged = vec![false; tokens.len()];

        let doc = Document::new_plain_english(&sentence, self.dictionary.as_ref());
        for token in doc.tokens() {
            let TokenKind::Word(meta) = &token.kind else {
                continue;
            };
            // Last token starting at or before this word.
            let index = starts.partition_point(|&s| s <= token.span.start);
            let Some(index) = index.checked_sub(1) else {
                continue;
            };
            // A token harper split in pieces takes the tag of its first piece.
            if tagged[index] || is_punctuation(tokens[index]) {
                continue;
            }
            tagged[index] = true;
            if let Some(upos) = meta.as_ref().and_then(|m| m.pos_tag) {
                tags[index] = from_upos(upos);
            }
        }

        tags
    }
}

impl std::fmt::Debug for HarperTagger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HarperTagger").finish()
    }
}

/// Tags tokens from the senses a lexicon knows for them. Used when the
/// harper dictionary is turned off.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Arc<Lexicon>,
}

impl LexiconTagger {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
        tokens
            .iter()
            .map(|token| {
                if is_punctuation(token) {
                    PosTag::Punctuation
                } else if self.lexicon.has_sense(token, PartOfSpeech::Adjective) {
                    PosTag::Adjective
                } else if self.lexicon.has_sense(token, PartOfSpeech::Noun) {
                    PosTag::Noun
                } else if self.lexicon.has_sense(token, PartOfSpeech::Verb) {
                    PosTag::Verb
                } else if self.lexicon.has_sense(token, PartOfSpeech::Adverb) {
                    PosTag::Adverb
                } else {
                    PosTag::Other
                }
            })
            .collect()
    }
}
