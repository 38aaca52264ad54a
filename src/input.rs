use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const DEFAULT_MIN_CHARS: usize = 10;

static ARABIC_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Arabic}").expect("valid Arabic script pattern"));

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum InputError {
    #[error("no text to analyze")]
    Empty,
    #[error(
        "input too short | النص قصير جداً: {chars} characters, at least {min} needed for a meaningful analysis"
    )]
    TooShort { chars: usize, min: usize },
}

/// News text that passed validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsText<'a> {
    text: &'a str,
    chars: usize,
}

impl<'a> NewsText<'a> {
    pub fn parse(raw: &'a str, min_chars: usize) -> Result<Self, InputError> {
        let text = raw.trim();
        let chars = text.chars().count();
        if chars == 0 {
            return Err(InputError::Empty);
        }
        if chars < min_chars {
            return Err(InputError::TooShort {
                chars,
                min: min_chars,
            });
        }

        if !has_arabic(text) {
            tracing::warn!(
                chars,
                "input contains no Arabic letters; the model expects Arabic news text"
            );
        }

        Ok(Self { text, chars })
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    /// Character count of the trimmed text.
    pub fn chars(&self) -> usize {
        self.chars
    }
}

pub fn has_arabic(text: &str) -> bool {
    ARABIC_LETTER.is_match(text)
}
