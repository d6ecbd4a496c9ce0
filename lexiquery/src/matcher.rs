use crate::corpus::Corpus;
use crate::matches::Matches;
use crate::words::{char_len, nfc};

/// Single-pattern query: words of exactly `length` characters, beginning
/// with `start` and ending with `stop`. An empty `start` or `stop` imposes
/// no constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatcher {
    start: String,
    stop: String,
    length: i64,
}

impl PatternMatcher {
    pub fn new(start: &str, stop: &str, length: i64) -> Self {
        PatternMatcher {
            start: nfc(start).into_owned(),
            stop: nfc(stop).into_owned(),
            length,
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn stop(&self) -> &str {
        &self.stop
    }

    pub fn length(&self) -> i64 {
        self.length
    }

    /// Prefix and suffix can't fit in a word of `length` characters
    fn is_unsatisfiable(&self) -> bool {
        self.length <= 0
            || char_len(&self.start) as i64 > self.length
            || char_len(&self.stop) as i64 > self.length
    }

    pub fn find<'lex>(&self, corpus: &'lex Corpus) -> Matches<'lex> {
        let lexicon = corpus.lexicon();
        if self.is_unsatisfiable() {
            return Matches::empty(lexicon);
        }

        // The length bucket is already small, so prefix and suffix are
        // checked directly on each candidate.
        let mut ids = corpus.length_index().bucket(self.length);
        let candidate_count = ids.len();
        ids.retain(|id| {
            let word = lexicon.word(id);
            word.starts_with(&self.start) && word.ends_with(&self.stop)
        });

        log::debug!(
            "{:?}...{:?} ({} chars): {} candidates, {} matches",
            self.start,
            self.stop,
            self.length,
            candidate_count,
            ids.len()
        );
        Matches::new(lexicon, ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_lines(vec![
            "hello",
            "world",
            "python",
            "test",
            "help",
            "programming",
            "zinguez",
            "zippiez",
            "zonerez",
            "zézayez",
            "zen",
            "zozotez",
        ])
        .unwrap()
    }

    #[test]
    fn prefix_suffix_length() {
        let corpus = corpus();
        assert_eq!(
            PatternMatcher::new("h", "o", 5).find(&corpus).texts(),
            vec!["hello"]
        );
        assert_eq!(
            PatternMatcher::new("he", "", 4).find(&corpus).texts(),
            vec!["help"]
        );
        assert_eq!(
            PatternMatcher::new("", "ing", 11).find(&corpus).texts(),
            vec!["programming"]
        );
        assert_eq!(
            PatternMatcher::new("z", "z", 7).find(&corpus).texts(),
            vec!["zinguez", "zippiez", "zonerez", "zozotez", "zézayez"]
        );
        assert_eq!(
            PatternMatcher::new("hello", "hello", 5).find(&corpus).texts(),
            vec!["hello"]
        );
    }

    #[test]
    fn unconstrained_is_length_lookup() {
        let corpus = corpus();
        for n in -2..15 {
            assert_eq!(
                PatternMatcher::new("", "", n).find(&corpus),
                corpus.words_of_length(n),
                "n={}",
                n
            );
        }
    }

    #[test]
    fn no_matches_is_empty() {
        let corpus = corpus();
        assert!(PatternMatcher::new("", "", 0).find(&corpus).is_empty());
        assert!(PatternMatcher::new("h", "o", 0).find(&corpus).is_empty());
        assert!(PatternMatcher::new("h", "o", -5).find(&corpus).is_empty());
        assert!(PatternMatcher::new("hello", "", 3).find(&corpus).is_empty());
        assert!(PatternMatcher::new("", "programming", 4).find(&corpus).is_empty());
        assert!(PatternMatcher::new("q", "", 5).find(&corpus).is_empty());
        assert!(PatternMatcher::new("h", "o", 50).find(&corpus).is_empty());
    }

    #[test]
    fn decomposed_pattern() {
        let corpus = corpus();
        assert_eq!(
            PatternMatcher::new("ze\u{301}", "ez", 7).find(&corpus).texts(),
            vec!["zézayez"]
        );
    }

    #[test]
    fn combining_sequence_is_one_character() {
        let corpus = Corpus::from_lines(vec!["q\u{303}at", "qat", "q\u{303}"]).unwrap();
        assert_eq!(
            PatternMatcher::new("q\u{303}", "t", 3).find(&corpus).texts(),
            vec!["q\u{303}at"]
        );
        assert_eq!(PatternMatcher::new("q", "t", 3).find(&corpus).texts(), vec!["qat"]);
        assert_eq!(
            PatternMatcher::new("q\u{303}", "q\u{303}", 1).find(&corpus).texts(),
            vec!["q\u{303}"]
        );
        assert_eq!(
            PatternMatcher::new("", "q\u{303}at", 3).find(&corpus).texts(),
            vec!["q\u{303}at"]
        );
    }
}
