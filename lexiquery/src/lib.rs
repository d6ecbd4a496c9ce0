extern crate pest;
#[macro_use]
extern crate pest_derive;

mod bitset;
pub mod corpus;
pub mod errors;
pub mod length;
pub mod matcher;
pub mod matches;
pub mod parser;
pub mod query;
pub mod substring;
pub mod words;

pub use bitset::BitSet;
pub use corpus::{Corpus, CorpusOptions};
pub use errors::{Error, Result};
pub use length::LengthIndex;
pub use matcher::PatternMatcher;
pub use matches::Matches;
pub use query::MultiPatternQuery;
pub use substring::SubstringIndex;
pub use words::{load_wordlist, Lexicon, Word};

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
        ])
        .unwrap()
    }

    #[test]
    fn small_vocabulary_scenarios() {
        let corpus = corpus();
        assert_eq!(
            corpus.words_containing("o").texts(),
            vec!["hello", "programming", "python", "world"]
        );
        assert_eq!(corpus.find("h", "o", 5).texts(), vec!["hello"]);
        assert_eq!(
            corpus.find_multi(&["p"], &["o"], &["g"], 8, 12).texts(),
            vec!["programming"]
        );
        assert!(corpus
            .find_multi(Vec::<&str>::new(), &["a"], &["e"], 3, 10)
            .is_empty());
        assert!(corpus.find("h", "o", 0).is_empty());
        assert!(corpus.find_multi(&[""], &[""], &[""], 10, 5).is_empty());
    }

    #[test]
    fn results_are_subsets_of_lexicon() {
        let corpus = corpus();
        let all = corpus.all();
        for n in -1..15 {
            let bucket = corpus.words_of_length(n);
            assert!(bucket.is_subset(&all));
            assert!(bucket.iter().all(|w| words::char_len(w.as_str()) as i64 == n));
        }
        for fragment in &["", "o", "l", "ll", "hel", "ming", "x", "programmings"] {
            let found = corpus.words_containing(fragment);
            assert!(found.is_subset(&all));
            assert!(found.iter().all(|w| w.as_str().contains(fragment)));
            let missed = all.difference(&found);
            assert!(missed.iter().all(|w| !w.as_str().contains(fragment)));
        }
        assert_eq!(corpus.words_containing(""), all);
    }

    // Accented words, hyphenated words and long length buckets
    #[test]
    fn french_vocabulary() {
        let corpus = Corpus::from_lines(vec![
            "a",
            "à",
            "alphabétisassiez",
            "alphabétisassions",
            "anticonstitutionnellement",
            "oto-rhino-laryngologistes",
            "constitutionnalisassions",
            "hospitalo-universitaires",
            "zinguez",
            "zippiez",
            "zonerez",
            "surchargeons",
            "surexcitions",
            "surtaxerions",
            "week-end",
            "képi",
        ])
        .unwrap();

        assert_eq!(
            corpus.find_multi(&["a"], &["b"], &["z"], 16, 16).texts(),
            vec!["alphabétisassiez"]
        );
        assert_eq!(
            corpus.words_of_length(25).texts(),
            vec!["anticonstitutionnellement", "oto-rhino-laryngologistes"]
        );
        assert_eq!(
            corpus.find("z", "z", 7).texts(),
            vec!["zinguez", "zippiez", "zonerez"]
        );
        assert_eq!(
            corpus
                .find("sur", "ons", 12)
                .intersection(&corpus.words_containing("x"))
                .texts(),
            vec!["surexcitions", "surtaxerions"]
        );
        let k = corpus.words_containing("k");
        let w = corpus.words_containing("w");
        assert_eq!(k.intersection(&w).texts(), vec!["week-end"]);
        assert_eq!(corpus.words_of_length(1).texts(), vec!["a", "à"]);
    }
}
