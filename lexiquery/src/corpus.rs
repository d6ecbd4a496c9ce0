use crate::errors::Result;
use crate::length::LengthIndex;
use crate::matcher::PatternMatcher;
use crate::matches::Matches;
use crate::query::MultiPatternQuery;
use crate::substring::{SubstringIndex, DEFAULT_NGRAM_SIZE};
use crate::words::{load_wordlist, Lexicon};
use std::path::Path;

/// Settings for building the indices of a `Corpus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusOptions {
    /// Key size of the substring index, in characters
    pub ngram_size: usize,
}

impl Default for CorpusOptions {
    fn default() -> Self {
        CorpusOptions {
            ngram_size: DEFAULT_NGRAM_SIZE,
        }
    }
}

/// A lexicon together with its length and substring indices.
///
/// Built once, then only read: every query takes `&self`, so a `Corpus` can
/// be shared between threads (e.g. behind an `Arc`) without locking.
#[derive(Debug, Clone)]
pub struct Corpus {
    lexicon: Lexicon,
    length_index: LengthIndex,
    substring_index: SubstringIndex,
}

impl Corpus {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_options(lexicon, CorpusOptions::default())
    }

    pub fn with_options(lexicon: Lexicon, options: CorpusOptions) -> Self {
        let length_index = LengthIndex::build(&lexicon);
        let substring_index = SubstringIndex::build(&lexicon, options.ngram_size);
        Corpus {
            lexicon,
            length_index,
            substring_index,
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::new(Lexicon::build(lines)?))
    }

    /// Load a wordlist file and index it
    pub fn load<P>(filename: P, options: CorpusOptions) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Ok(Self::with_options(load_wordlist(filename)?, options))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn length_index(&self) -> &LengthIndex {
        &self.length_index
    }

    pub fn substring_index(&self) -> &SubstringIndex {
        &self.substring_index
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lexicon.contains(word)
    }

    pub fn size(&self) -> usize {
        self.lexicon.size()
    }

    /// Every word of the corpus
    pub fn all(&self) -> Matches<'_> {
        Matches::all(&self.lexicon)
    }

    pub fn words_of_length(&self, n: i64) -> Matches<'_> {
        self.length_index.lookup(&self.lexicon, n)
    }

    pub fn words_containing(&self, fragment: &str) -> Matches<'_> {
        self.substring_index.find_containing(&self.lexicon, fragment)
    }

    /// See `PatternMatcher`
    pub fn find(&self, start: &str, stop: &str, n: i64) -> Matches<'_> {
        PatternMatcher::new(start, stop, n).find(self)
    }

    /// See `MultiPatternQuery`
    pub fn find_multi<A, B, C>(
        &self,
        starts: A,
        mids: B,
        stops: C,
        min_length: i64,
        max_length: i64,
    ) -> Matches<'_>
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        MultiPatternQuery::new(starts, mids, stops, min_length, max_length).find(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn corpus_is_shareable() {
        let corpus = Arc::new(
            Corpus::from_lines(vec!["hello", "world", "python", "test", "help", "programming"])
                .unwrap(),
        );
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let corpus = Arc::clone(&corpus);
                thread::spawn(move || {
                    let n = 4 + (i % 2);
                    corpus.words_of_length(n).len()
                })
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![2, 2, 2, 2]);
    }

    #[test]
    fn corpus_options() {
        let lexicon = Lexicon::build(vec!["hello", "help"]).unwrap();
        let corpus = Corpus::with_options(lexicon, CorpusOptions { ngram_size: 2 });
        assert_eq!(corpus.substring_index().ngram_size(), 2);
        assert_eq!(corpus.words_containing("el").texts(), vec!["hello", "help"]);
        assert_eq!(CorpusOptions::default().ngram_size, 3);
    }

    #[test]
    fn corpus_load_errors() {
        assert!(Corpus::load("/nonexistent/corpus.txt", CorpusOptions::default()).is_err());
        assert!(Corpus::from_lines(vec!["", " "]).is_err());
    }
}
