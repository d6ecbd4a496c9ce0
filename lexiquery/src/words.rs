use crate::errors::{Error, Result};
use indexmap::IndexSet;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{self, BufRead};
use std::path::Path;
use std::time::Instant;
use unicode_normalization::{is_nfc, UnicodeNormalization};
use unicode_segmentation::UnicodeSegmentation;

#[cfg(feature = "serialize")]
use serde::Serialize;

/// Dense index of a word inside its `Lexicon`, in sorted order
pub type WordId = usize;

/// Bring `text` into NFC form, so that "é" and "e\u{301}" are the same
/// one-character string. Query fragments go through this as-is.
pub fn nfc(text: &str) -> Cow<'_, str> {
    if is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}

/// `nfc`, after trimming surrounding whitespace; used for whole words
pub fn normalize(text: &str) -> Cow<'_, str> {
    nfc(text.trim())
}

/// Length of an already-normalized string in user-perceived characters
/// (extended grapheme clusters), so "q\u{303}" is one character even though
/// it has no precomposed form.
pub fn char_len(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Does byte offset `idx` fall between two grapheme clusters of `text`
pub(crate) fn on_grapheme_boundary(text: &str, idx: usize) -> bool {
    if idx == 0 || idx == text.len() {
        return true;
    }
    text.is_char_boundary(idx)
        && text
            .grapheme_indices(true)
            .map(|(i, _)| i)
            .take_while(|&i| i <= idx)
            .any(|i| i == idx)
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(Serialize))]
pub struct Word {
    pub text: String,
    #[cfg_attr(feature = "serialize", serde(skip))]
    pub length: usize,
}

impl Word {
    /// Build a word from a raw line; `None` if nothing is left after trimming
    pub fn new(text: &str) -> Option<Self> {
        let text = normalize(text);
        if text.is_empty() {
            return None;
        }
        Some(Word {
            length: char_len(&text),
            text: text.into_owned(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Prefix test on whole characters: "q" is not a prefix of "q\u{303}at"
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix) && on_grapheme_boundary(&self.text, prefix.len())
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.ends_with(suffix)
            && on_grapheme_boundary(&self.text, self.text.len() - suffix.len())
    }
}

// Hash must agree with `Borrow<str>`, so only the text takes part.
impl Hash for Word {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Borrow<str> for Word {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// The deduplicated, immutable set of words every query runs against.
///
/// Words are sorted once at construction; a word's position is its `WordId`,
/// which the indices and result sets refer to.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: IndexSet<Word>,
}

impl Lexicon {
    /// Build a lexicon from raw lines. Lines are trimmed and NFC-normalized;
    /// blank lines and duplicates are dropped. An input with no words at all
    /// is rejected with `Error::EmptyCorpus`.
    pub fn build<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let start = Instant::now();
        let mut words: IndexSet<Word> = lines
            .into_iter()
            .filter_map(|line| Word::new(line.as_ref()))
            .collect();
        if words.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        words.sort();

        log::info!(
            "built lexicon of {} words in {:?}",
            words.len(),
            start.elapsed()
        );
        Ok(Lexicon { words })
    }

    /// Build a lexicon from a reader yielding one word per line
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        Self::build(lines)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.id_of(word).is_some()
    }

    pub fn size(&self) -> usize {
        self.words.len()
    }

    pub fn id_of(&self, word: &str) -> Option<WordId> {
        let word = normalize(word);
        self.words.get_index_of(&*word)
    }

    pub fn get(&self, id: WordId) -> Option<&Word> {
        self.words.get_index(id)
    }

    pub(crate) fn word(&self, id: WordId) -> &Word {
        &self.words[id]
    }

    /// All words, in sorted order
    pub fn words(&self) -> impl Iterator<Item = &Word> + '_ {
        self.words.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordId, &Word)> + '_ {
        self.words.iter().enumerate()
    }
}

/// Read a wordlist file, one word per line, into a `Lexicon`
pub fn load_wordlist<P>(filename: P) -> Result<Lexicon>
where
    P: AsRef<Path>,
{
    let path = filename.as_ref();
    let corpus_load = |source| Error::CorpusLoad {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(corpus_load)?;
    let lines = io::BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .map_err(corpus_load)?;
    Lexicon::build(lines)
}
