// lang/tokenize.rs
use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    // One punctuation run on each side of a word body.
    static ref WORD_WITH_PUNCT: Regex =
        Regex::new(r"([!.,;?]*)(\w+)([!.,;?]*)").expect("word pattern compiles");
    static ref SPACE_BEFORE_PUNCT: Regex =
        Regex::new(r#"\s([?.!,:;"](?:\s|$))"#).expect("punctuation pattern compiles");
}

/// A whitespace segment split into leading punctuation, word body and
/// trailing punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub prefix: &'a str,
    pub word: &'a str,
    pub suffix: &'a str,
}

impl<'a> Token<'a> {
    /// Render the token with `word` standing in for the original body.
    pub fn render_with(&self, word: &str) -> String {
        format!("{}{}{}", self.prefix, word, self.suffix)
    }

    pub fn render(&self) -> String {
        self.render_with(self.word)
    }
}

/// Split one whitespace-free segment into tokens.
///
/// Characters outside the `! . , ; ?` set and the word body (quotes,
/// apostrophes, brackets) are not captured, so `don't` yields `don` and `t`.
pub fn split_punctuation(segment: &str) -> Vec<Token<'_>> {
    WORD_WITH_PUNCT
        .captures_iter(segment)
        .filter_map(|caps| {
            Some(Token {
                prefix: caps.get(1)?.as_str(),
                word: caps.get(2)?.as_str(),
                suffix: caps.get(3)?.as_str(),
            })
        })
        .collect()
}

/// Tokenize free text: whitespace segments, then punctuation splitting.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    text.split_whitespace().flat_map(split_punctuation).collect()
}

/// Join rendered tokens with single spaces and tidy the spacing in front of
/// punctuation marks.
pub fn join<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for part in parts {
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(part.as_ref());
    }
    remove_space_before_punctuation(&joined)
}

/// Drop the space in front of a punctuation mark that closes a word.
pub fn remove_space_before_punctuation(text: &str) -> String {
    SPACE_BEFORE_PUNCT.replace_all(text, "$1").into_owned()
}

/// Word and punctuation tokens on Unicode word boundaries, whitespace removed.
pub fn word_tokens(sentence: &str) -> Vec<&str> {
    sentence
        .split_word_bounds()
        .filter(|piece| !piece.trim().is_empty())
        .collect()
}

/// Force the first letter of `corrected` to uppercase when `original` starts
/// with an uppercase letter. Nothing else changes case.
pub fn preserve_capitalization(original: &str, corrected: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return corrected.to_string();
    }

    let mut chars = corrected.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
