use crate::bitset::BitSet;
use crate::corpus::Corpus;
use crate::matches::Matches;
use crate::parser;
use crate::words::nfc;
use indexmap::IndexSet;
use std::time::Instant;

/// Evaluate a multi-pattern query on a corpus.
///
/// A word matches if its length lies in `[min_length, max_length]`, it
/// begins with *one of* `starts`, contains *one of* `mids` and ends with
/// *one of* `stops`.
///
/// An empty set of alternatives can never be satisfied, so the query has no
/// results; a set holding only `""` accepts everything at that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiPatternQuery {
    pub starts: IndexSet<String>,
    pub mids: IndexSet<String>,
    pub stops: IndexSet<String>,
    pub min_length: i64,
    pub max_length: i64,

    /// Maximum number of results to return, in sorted order
    pub results_limit: Option<usize>,
}

fn alternatives<I>(values: I) -> IndexSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| nfc(v.as_ref()).into_owned())
        .collect()
}

impl MultiPatternQuery {
    pub fn new<A, B, C>(starts: A, mids: B, stops: C, min_length: i64, max_length: i64) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        B: IntoIterator,
        B::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        MultiPatternQuery {
            starts: alternatives(starts),
            mids: alternatives(mids),
            stops: alternatives(stops),
            min_length,
            max_length,
            results_limit: None,
        }
    }

    pub fn from_ast(query_ast: &parser::QueryAst) -> Self {
        // Positions the query doesn't mention are unconstrained
        fn or_unconstrained(values: &Option<Vec<String>>) -> IndexSet<String> {
            match values {
                Some(values) => alternatives(values),
                None => alternatives(&[""]),
            }
        }

        let (min_length, max_length) = query_ast.length.unwrap_or((1, i64::MAX));
        MultiPatternQuery {
            starts: or_unconstrained(&query_ast.starts),
            mids: or_unconstrained(&query_ast.mids),
            stops: or_unconstrained(&query_ast.stops),
            min_length,
            max_length,
            results_limit: query_ast.options.results_limit,
        }
    }

    pub fn set_results_limit(&mut self, results_limit: Option<usize>) {
        self.results_limit = results_limit;
    }

    fn is_unsatisfiable(&self) -> bool {
        self.starts.is_empty()
            || self.mids.is_empty()
            || self.stops.is_empty()
            || self.min_length > self.max_length
    }

    /// Words of the pool containing at least one of the `mids`
    fn filter_mids(&self, corpus: &Corpus, pool: &BitSet) -> BitSet {
        if self.mids.contains("") {
            return pool.clone();
        }
        let substring_index = corpus.substring_index();
        let mut ids = BitSet::new(pool.capacity());
        for mid in &self.mids {
            let found = substring_index.containing(corpus.lexicon(), mid, Some(pool));
            ids.union_with(&found);
        }
        ids
    }

    pub fn find<'lex>(&self, corpus: &'lex Corpus) -> Matches<'lex> {
        let lexicon = corpus.lexicon();
        if self.is_unsatisfiable() {
            log::debug!("unsatisfiable query {:?}", self);
            return Matches::empty(lexicon);
        }
        let start = Instant::now();

        // Most selective constraints first: length buckets, then fragments
        // through the n-gram index, then prefix/suffix on what's left.
        let pool = corpus
            .length_index()
            .bucket_range(self.min_length, self.max_length);
        let pool_size = pool.len();

        let mut ids = self.filter_mids(corpus, &pool);
        let mids_size = ids.len();

        let any_start = self.starts.contains("");
        let any_stop = self.stops.contains("");
        if !(any_start && any_stop) {
            ids.retain(|id| {
                let word = lexicon.word(id);
                (any_start || self.starts.iter().any(|s| word.starts_with(s)))
                    && (any_stop || self.stops.iter().any(|s| word.ends_with(s)))
            });
        }

        log::debug!(
            "query matched {} words ({} by length, {} by fragment) in {:?}",
            ids.len(),
            pool_size,
            mids_size,
            start.elapsed()
        );

        let mut matches = Matches::new(lexicon, ids);
        if let Some(limit) = self.results_limit {
            matches.truncate(limit);
        }
        matches
    }
}
