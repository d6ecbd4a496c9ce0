use crate::bitset::BitSet;
use crate::matches::Matches;
use crate::words::{char_len, nfc, on_grapheme_boundary, Lexicon, Word, WordId};
use indexmap::IndexMap;
use std::time::Instant;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_NGRAM_SIZE: usize = 3;

/// Inverted index from character n-grams to the words containing them.
///
/// Looking up a fragment is a two-step filter-then-verify search: the posting
/// lists of the fragment's n-grams are intersected to get a candidate set,
/// and each candidate is then checked with a real substring search. Sharing
/// every n-gram with the fragment doesn't mean containing it ("abcxbcd" has
/// both n-grams of "abcd"), so the second step is required.
///
/// Words shorter than `ngram_size` are indexed under their whole text.
#[derive(Debug, Clone)]
pub struct SubstringIndex {
    ngram_size: usize,
    lexicon_size: usize,

    /// Sorted, deduplicated word ids for every n-gram
    postings: IndexMap<String, Vec<WordId>>,
}

/// The contiguous windows of `size` characters (grapheme clusters) in
/// `text`, or `text` itself if it is shorter than that.
pub fn ngrams(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let boundaries: Vec<usize> = text
        .grapheme_indices(true)
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = boundaries.len() - 1;
    if char_count < size {
        return vec![text];
    }
    boundaries
        .windows(size + 1)
        .map(|w| &text[w[0]..w[size]])
        .collect()
}

/// Intersection of two sorted id lists
fn intersect_sorted(a: &[WordId], b: &[WordId]) -> Vec<WordId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

impl SubstringIndex {
    pub fn build(lexicon: &Lexicon, ngram_size: usize) -> Self {
        let start = Instant::now();
        let ngram_size = ngram_size.max(1);
        let mut postings: IndexMap<String, Vec<WordId>> = IndexMap::new();
        for (id, word) in lexicon.iter() {
            for gram in ngrams(word.as_str(), ngram_size) {
                let posting = postings.entry(gram.to_owned()).or_default();
                // Ids arrive in increasing order; only a repeated n-gram
                // within the same word can produce a duplicate.
                if posting.last() != Some(&id) {
                    posting.push(id);
                }
            }
        }

        let index = SubstringIndex {
            ngram_size,
            lexicon_size: lexicon.size(),
            postings,
        };
        log::info!(
            "built {}-gram index: {} keys, {} postings, in {:?}",
            ngram_size,
            index.ngram_count(),
            index.posting_count(),
            start.elapsed()
        );
        index
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    /// Number of distinct n-gram keys
    pub fn ngram_count(&self) -> usize {
        self.postings.len()
    }

    /// Total number of (n-gram, word) entries
    pub fn posting_count(&self) -> usize {
        self.postings.values().map(|p| p.len()).sum()
    }

    /// Superset of the words containing `fragment`.
    ///
    /// Fragments shorter than the n-gram size can't be looked up, so every
    /// word is a candidate.
    pub fn candidates(&self, fragment: &str) -> BitSet {
        let fragment = nfc(fragment);
        if char_len(&fragment) < self.ngram_size {
            log::trace!("fragment {:?} shorter than n-gram, full scan", fragment);
            return BitSet::full(self.lexicon_size);
        }
        let mut grams = ngrams(&fragment, self.ngram_size);
        grams.sort_unstable();
        grams.dedup();

        let mut posting_lists = Vec::with_capacity(grams.len());
        for gram in grams {
            match self.postings.get(gram) {
                Some(posting) => posting_lists.push(posting.as_slice()),
                None => return BitSet::new(self.lexicon_size),
            }
        }
        // Start from the most selective list so the running intersection
        // stays small.
        posting_lists.sort_by_key(|p| p.len());

        let mut ids = posting_lists[0].to_vec();
        for posting in &posting_lists[1..] {
            if ids.is_empty() {
                break;
            }
            ids = intersect_sorted(&ids, posting);
        }
        BitSet::from_ids(self.lexicon_size, ids)
    }

    /// Definitive check: does `word` contain `fragment` contiguously, as a
    /// run of whole characters
    pub fn contains_exact(word: &Word, fragment: &str) -> bool {
        if fragment.is_empty() {
            return true;
        }
        let text = word.as_str();
        text.grapheme_indices(true).any(|(i, _)| {
            text[i..].starts_with(fragment) && on_grapheme_boundary(text, i + fragment.len())
        })
    }

    /// Ids of the words containing `fragment`, restricted to `pool` if given
    pub(crate) fn containing(
        &self,
        lexicon: &Lexicon,
        fragment: &str,
        pool: Option<&BitSet>,
    ) -> BitSet {
        if fragment.is_empty() {
            return match pool {
                Some(pool) => pool.clone(),
                None => BitSet::full(self.lexicon_size),
            };
        }

        let fragment = nfc(fragment);
        let mut ids = self.candidates(&fragment);
        if let Some(pool) = pool {
            ids.intersect_with(pool);
        }
        let candidate_count = ids.len();
        ids.retain(|id| Self::contains_exact(lexicon.word(id), &fragment));

        log::debug!(
            "fragment {:?}: {} candidates, {} verified",
            fragment,
            candidate_count,
            ids.len()
        );
        ids
    }

    /// Every word of `lexicon` that contains `fragment`. The empty fragment
    /// matches every word.
    pub fn find_containing<'lex>(&self, lexicon: &'lex Lexicon, fragment: &str) -> Matches<'lex> {
        Matches::new(lexicon, self.containing(lexicon, fragment, None))
    }
}
