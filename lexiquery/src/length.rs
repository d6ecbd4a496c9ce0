use crate::bitset::BitSet;
use crate::matches::Matches;
use crate::words::Lexicon;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::time::Instant;

/// Partition of a lexicon by word length (in characters).
///
/// Each bucket is a bitset over the whole lexicon, so a bucket can be handed
/// out as a `Matches` and combined with other results without conversion.
#[derive(Debug, Clone)]
pub struct LengthIndex {
    buckets: BTreeMap<usize, BitSet>,
    lexicon_size: usize,
}

/// Clamp a signed length range to the lengths a word can have.
/// `None` if the range is empty.
pub(crate) fn length_range(min: i64, max: i64) -> Option<(usize, usize)> {
    if min > max || max < 1 {
        return None;
    }
    let min = usize::try_from(min.max(1)).ok()?;
    let max = usize::try_from(max).unwrap_or(usize::MAX);
    Some((min, max))
}

impl LengthIndex {
    pub fn build(lexicon: &Lexicon) -> Self {
        let start = Instant::now();
        let lexicon_size = lexicon.size();
        let mut buckets = BTreeMap::new();
        for (id, word) in lexicon.iter() {
            buckets
                .entry(word.length)
                .or_insert_with(|| BitSet::new(lexicon_size))
                .insert(id);
        }

        log::info!(
            "built length index: {} buckets, longest word {} chars, in {:?}",
            buckets.len(),
            buckets.keys().next_back().copied().unwrap_or(0),
            start.elapsed()
        );
        LengthIndex {
            buckets,
            lexicon_size,
        }
    }

    /// Ids of all words of exactly `n` characters. Lengths with no words,
    /// including zero and negative lengths, give an empty set.
    pub(crate) fn bucket(&self, n: i64) -> BitSet {
        usize::try_from(n)
            .ok()
            .and_then(|n| self.buckets.get(&n))
            .cloned()
            .unwrap_or_else(|| BitSet::new(self.lexicon_size))
    }

    /// Ids of all words whose length lies in `[min, max]`
    pub(crate) fn bucket_range(&self, min: i64, max: i64) -> BitSet {
        let mut ids = BitSet::new(self.lexicon_size);
        if let Some((min, max)) = length_range(min, max) {
            for bucket in self.buckets.range(min..=max).map(|(_, b)| b) {
                ids.union_with(bucket);
            }
        }
        ids
    }

    pub fn lookup<'lex>(&self, lexicon: &'lex Lexicon, n: i64) -> Matches<'lex> {
        Matches::new(lexicon, self.bucket(n))
    }

    pub fn lookup_range<'lex>(&self, lexicon: &'lex Lexicon, min: i64, max: i64) -> Matches<'lex> {
        Matches::new(lexicon, self.bucket_range(min, max))
    }

    /// `(length, number of words)` for every non-empty bucket, shortest first
    pub fn bucket_sizes(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.buckets.iter().map(|(&n, ids)| (n, ids.len()))
    }

    pub fn max_length(&self) -> usize {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }
}
