use crate::bitset::BitSet;
use crate::words::{Lexicon, Word, WordId};
use std::fmt;

/// The result of a query: a set of words from one `Lexicon`.
///
/// Internally a bitset over word ids, so combining results from several
/// queries (`intersection`, `union`, `difference`) is cheap. Iteration
/// yields words in the lexicon's sorted order.
#[derive(Clone)]
pub struct Matches<'lex> {
    lexicon: &'lex Lexicon,
    ids: BitSet,
}

impl<'lex> Matches<'lex> {
    pub(crate) fn new(lexicon: &'lex Lexicon, ids: BitSet) -> Self {
        debug_assert_eq!(ids.capacity(), lexicon.size());
        Matches { lexicon, ids }
    }

    pub fn empty(lexicon: &'lex Lexicon) -> Self {
        Self::new(lexicon, BitSet::new(lexicon.size()))
    }

    pub fn all(lexicon: &'lex Lexicon) -> Self {
        Self::new(lexicon, BitSet::full(lexicon.size()))
    }

    pub fn lexicon(&self) -> &'lex Lexicon {
        self.lexicon
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.lexicon
            .id_of(word)
            .map_or(false, |id| self.ids.contains(id))
    }

    pub fn contains_id(&self, id: WordId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'lex Word> + '_ {
        let lexicon = self.lexicon;
        self.ids.ones().map(move |id| lexicon.word(id))
    }

    /// The matching words as plain strings, sorted
    pub fn texts(&self) -> Vec<&'lex str> {
        self.iter().map(|w| w.as_str()).collect()
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.assert_same_lexicon(other);
        self.ids.is_subset(&other.ids)
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.assert_same_lexicon(other);
        let mut ids = self.ids.clone();
        ids.intersect_with(&other.ids);
        Self::new(self.lexicon, ids)
    }

    pub fn union(&self, other: &Self) -> Self {
        self.assert_same_lexicon(other);
        let mut ids = self.ids.clone();
        ids.union_with(&other.ids);
        Self::new(self.lexicon, ids)
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.assert_same_lexicon(other);
        let mut ids = self.ids.clone();
        ids.difference_with(&other.ids);
        Self::new(self.lexicon, ids)
    }

    /// Keep only the first `limit` words (in sorted order)
    pub fn truncate(&mut self, limit: usize) {
        let dropped: Vec<WordId> = self.ids.ones().skip(limit).collect();
        for id in dropped {
            self.ids.remove(id);
        }
    }

    fn assert_same_lexicon(&self, other: &Self) {
        assert!(
            std::ptr::eq(self.lexicon, other.lexicon),
            "cannot combine matches from different lexicons"
        );
    }
}

impl PartialEq for Matches<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.lexicon, other.lexicon) && self.ids == other.ids
    }
}

impl Eq for Matches<'_> {}

impl fmt::Debug for Matches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(|w| w.as_str())).finish()
    }
}

impl<'a, 'lex> IntoIterator for &'a Matches<'lex> {
    type Item = &'lex Word;
    type IntoIter = Box<dyn Iterator<Item = &'lex Word> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
