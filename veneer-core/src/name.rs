//! Case-independent identifier names.

use std::fmt;

use crate::utils::split_words;

/// An identifier held as a list of lowercase words.
///
/// Names are built from any casing and rendered into whichever casing the
/// target needs, so `Name::from("next_page_token")` and `Name::from("nextPageToken")`
/// are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    /// Build a name from words that are already split.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.into().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The words making up this name.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Append another name's words.
    pub fn join(&self, other: impl Into<Name>) -> Name {
        let mut words = self.words.clone();
        words.extend(other.into().words);
        Name { words }
    }

    /// Append a raw suffix to the last word (used for symbol disambiguation).
    pub fn with_suffix(&self, suffix: &str) -> Name {
        let mut words = self.words.clone();
        match words.last_mut() {
            Some(last) => last.push_str(suffix),
            None => words.push(suffix.to_string()),
        }
        Name { words }
    }

    pub fn to_lower_underscore(&self) -> String {
        self.words.join("_")
    }

    pub fn to_upper_underscore(&self) -> String {
        self.words.join("_").to_uppercase()
    }

    pub fn to_lower_camel(&self) -> String {
        let mut out = String::new();
        for (i, word) in self.words.iter().enumerate() {
            if i == 0 {
                out.push_str(word);
            } else {
                push_capitalized(&mut out, word);
            }
        }
        out
    }

    pub fn to_upper_camel(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            push_capitalized(&mut out, word);
        }
        out
    }
}

fn push_capitalized(out: &mut String, word: &str) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}

impl From<&str> for Name {
    fn from(s: &str) -> Self {
        Name {
            words: split_words(s),
        }
    }
}

impl From<&String> for Name {
    fn from(s: &String) -> Self {
        Name::from(s.as_str())
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::from(s.as_str())
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_lower_underscore())
    }
}
