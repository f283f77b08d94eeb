// lang/paraphrase.rs
use rand::{seq::IndexedRandom, Rng};

use super::{
    tagger::{PosTag, PosTagger},
    thesaurus::{PartOfSpeech, Thesaurus},
    tokenize::{remove_space_before_punctuation, word_tokens},
};

/// Replaces adjectives with randomly chosen adjective synonyms.
pub struct Paraphraser<'a> {
    thesaurus: &'a dyn Thesaurus,
    tagger: &'a dyn PosTagger,
}

impl<'a> Paraphraser<'a> {
    pub fn new(thesaurus: &'a dyn Thesaurus, tagger: &'a dyn PosTagger) -> Self {
        Self { thesaurus, tagger }
    }

    pub fn paraphrase<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
        let tokens = word_tokens(sentence);
        let tags = self.tagger.tag(&tokens);

        let words: Vec<String> = tokens
            .iter()
            .enumerate()
            .map(|(i, token)| match tags.get(i) {
                Some(PosTag::Adjective) => self.substitute(token, rng),
                _ => token.to_string(),
            })
            .collect();

        remove_space_before_punctuation(&words.join(" "))
    }

    /// A random adjective synonym of `word` other than `word` itself, or
    /// `word` when the lexicon offers no alternative.
    pub fn substitute<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        let synonyms = self.thesaurus.synonyms(word, Some(PartOfSpeech::Adjective));
        if synonyms.len() <= 1 {
            return word.to_string();
        }

        let original = word.to_lowercase();
        let choices: Vec<&String> = synonyms
            .iter()
            .filter(|s| s.to_lowercase() != original)
            .collect();

        choices
            .choose(rng)
            .map(|s| s.to_string())
            .unwrap_or_else(|| word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::lang::thesaurus::{Lexicon, Synset};

    struct FixedTagger(HashSet<&'static str>);

    impl PosTagger for FixedTagger {
        fn tag(&self, tokens: &[&str]) -> Vec<PosTag> {
            tokens
                .iter()
                .map(|t| {
                    if self.0.contains(t) {
                        PosTag::Adjective
                    } else {
                        PosTag::Other
                    }
                })
                .collect()
        }
    }

    fn lexicon() -> Lexicon {
        Lexicon::new(vec![
            Synset {
                pos: PartOfSpeech::Adjective,
                lemmas: vec!["big".into(), "large".into(), "huge".into()],
            },
            Synset {
                pos: PartOfSpeech::AdjectiveSatellite,
                lemmas: vec!["red".into(), "crimson".into(), "scarlet".into()],
            },
            Synset {
                pos: PartOfSpeech::Adjective,
                lemmas: vec!["lonely".into()],
            },
            Synset {
                pos: PartOfSpeech::Noun,
                lemmas: vec!["dog".into(), "hound".into()],
            },
        ])
    }

    #[test]
    fn replaces_adjectives_with_members_of_synonym_set() {
        let lex = lexicon();
        let tagger = FixedTagger(HashSet::from(["big", "red"]));
        let p = Paraphraser::new(&lex, &tagger);
        let big: BTreeSet<String> = lex.synonyms("big", Some(PartOfSpeech::Adjective));
        let red: BTreeSet<String> = lex.synonyms("red", Some(PartOfSpeech::Adjective));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let out = p.paraphrase("The big red dog barked.", &mut rng);
            let words: Vec<&str> = out.split_whitespace().collect();

            assert_eq!(words.len(), 5);
            assert_eq!(words[0], "The");
            assert!(big.contains(words[1]) && words[1] != "big");
            assert!(red.contains(words[2]) && words[2] != "red");
            assert_eq!(words[3], "dog");
            assert_eq!(words[4], "barked.");
        }
    }

    #[test]
    fn never_touches_non_adjectives() {
        let lex = lexicon();
        let tagger = FixedTagger(HashSet::new());
        let p = Paraphraser::new(&lex, &tagger);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(p.paraphrase("big red dog, hound!", &mut rng), "big red dog, hound!");
    }

    #[test]
    fn keeps_adjective_without_alternatives() {
        let lex = lexicon();
        let tagger = FixedTagger(HashSet::from(["lonely", "strange"]));
        let p = Paraphraser::new(&lex, &tagger);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(p.paraphrase("a lonely, strange night", &mut rng), "a lonely, strange night");
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let lex = lexicon();
        let tagger = FixedTagger(HashSet::from(["big"]));
        let p = Paraphraser::new(&lex, &tagger);

        let first = p.paraphrase("big", &mut StdRng::seed_from_u64(42));
        let second = p.paraphrase("big", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn capitalized_adjective_is_not_replaced_by_itself() {
        let lex = lexicon();
        let tagger = FixedTagger(HashSet::from(["Big"]));
        let p = Paraphraser::new(&lex, &tagger);

        for seed in 0..10 {
            let out = p.substitute("Big", &mut StdRng::seed_from_u64(seed));
            assert!(out == "large" || out == "huge", "got {out}");
        }
    }
}
