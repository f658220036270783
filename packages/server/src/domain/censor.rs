//! Whole-word, case-insensitive word masking.

use std::{borrow::Cow, collections::BTreeSet};

use regex::{Captures, Regex, RegexBuilder};

use super::CensorError;

const MASK: char = '*';

/// Masks banned words with an equal-length run of `*`.
///
/// Matching is whole-word (`\b` on both sides) and case-insensitive, so a
/// banned word embedded in a longer word is left alone. An empty word list
/// yields a censor that returns every text unchanged.
#[derive(Debug, Clone, Default)]
pub struct Censor {
    pattern: Option<Regex>,
}

impl Censor {
    /// Build a censor over `words`. Terms are trimmed and lowercased; blank
    /// terms are ignored.
    pub fn new<I, S>(words: I) -> Result<Self, CensorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: BTreeSet<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self::disabled());
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// A censor that never masks anything.
    pub fn disabled() -> Self {
        Self { pattern: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.pattern.is_some()
    }

    /// Mask every whole-word match. The character count of the text is
    /// preserved.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, |caps: &Captures| {
                MASK.to_string().repeat(caps[0].chars().count())
            }),
            None => Cow::Borrowed(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn censor(words: &[&str]) -> Censor {
        Censor::new(words).expect("word list should compile")
    }

    #[test]
    fn test_apply_masks_standalone_word() {
        // テスト項目: 単語として現れる禁止語がマスクされる
        // given (前提条件):
        let censor = censor(&["spam"]);

        // when (操作):
        let result = censor.apply("this is spam");

        // then (期待する結果):
        assert_eq!(result, "this is ****");
    }

    #[test]
    fn test_apply_does_not_mask_embedded_substring() {
        // テスト項目: 長い単語の一部として現れる禁止語はマスクされない
        // given (前提条件):
        let censor = censor(&["spam"]);

        // when (操作):
        let result = censor.apply("this is not spamalot");

        // then (期待する結果):
        assert_eq!(result, "this is not spamalot");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_apply_is_case_insensitive_and_keeps_punctuation() {
        // テスト項目: 大文字小文字を区別せずマスクし、周囲の句読点や大文字は保持する
        // given (前提条件):
        let censor = censor(&["SPAM", "eggs"]);

        // when (操作):
        let result = censor.apply("Hello, SpAm! Eggs? Ham.");

        // then (期待する結果):
        assert_eq!(result, "Hello, ****! ****? Ham.");
    }

    #[test]
    fn test_apply_preserves_length() {
        // テスト項目: マスク後も文字数が変わらない
        // given (前提条件):
        let censor = censor(&["spam", "ham", "naïve"]);
        let inputs = [
            "spam spam spam",
            "ham-and-spam",
            "Naïve idea",
            "nothing to see here",
            "",
        ];

        // when (操作) / then (期待する結果):
        for input in inputs {
            let output = censor.apply(input);
            assert_eq!(
                output.chars().count(),
                input.chars().count(),
                "input: {input:?}"
            );
        }
        assert_eq!(censor.apply("ham-and-spam"), "***-and-****");
        assert_eq!(censor.apply("Naïve idea"), "***** idea");
    }

    #[test]
    fn test_regex_metacharacters_are_escaped() {
        // テスト項目: 正規表現のメタ文字を含む語もリテラルとして扱われる
        // given (前提条件):
        let censor = censor(&["a.b"]);

        // when (操作) / then (期待する結果):
        assert_eq!(censor.apply("axb a.b"), "axb ***");
    }

    #[test]
    fn test_empty_word_list_is_noop() {
        // テスト項目: 空の単語リストではマスクされない
        // given (前提条件):
        let censor = censor(&["", "   "]);

        // when (操作):
        let result = censor.apply("spam and eggs");

        // then (期待する結果):
        assert!(!censor.is_enabled());
        assert_eq!(result, "spam and eggs");
    }

    #[test]
    fn test_overlapping_terms_mask_longest_whole_word() {
        // テスト項目: 前方一致する語が複数あっても単語全体がマスクされる
        // given (前提条件):
        let censor = censor(&["ass", "assassin"]);

        // when (操作):
        let result = censor.apply("the assassin and the ass");

        // then (期待する結果):
        assert_eq!(result, "the ******** and the ***");
    }
}
