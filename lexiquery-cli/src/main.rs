use anyhow::{Context, Result};
use lexiquery::{parser, Corpus, CorpusOptions, MultiPatternQuery};
use std::path::PathBuf;
use structopt::StructOpt;

const DEFAULT_WORDLIST_FILE: &str = "corpus.txt";

#[derive(Debug, StructOpt)]
#[structopt(name = "lexiquery")]
struct Opt {
    /// Input wordlist file, one word per line
    #[structopt(short, long, parse(from_os_str), default_value = DEFAULT_WORDLIST_FILE)]
    input: PathBuf,

    /// Number of results to return
    #[structopt(short = "n", long)]
    count: Option<usize>,

    /// Size of the n-grams used to index substrings
    #[structopt(long, default_value = "3")]
    ngram_size: usize,

    /// Only print the number of matching words
    #[structopt(short, long)]
    total: bool,

    /// Query, e.g. "#start a; #mid b; #end z; #length 16"
    #[structopt(name = "query")]
    query: String,
}

/// Build the query from the command line. `--total` counts every match, so
/// it drops any result limit.
fn build_query(opt: &Opt) -> Result<MultiPatternQuery> {
    let query_ast = parser::QueryAst::new_from_str(&opt.query).context("invalid query")?;
    log::debug!("query:\n{}", query_ast);

    let mut query = MultiPatternQuery::from_ast(&query_ast);
    if opt.total {
        query.set_results_limit(None);
    } else if opt.count.is_some() {
        query.set_results_limit(opt.count);
    }
    Ok(query)
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let opt = Opt::from_args();

    let query = build_query(&opt)?;

    let options = CorpusOptions {
        ngram_size: opt.ngram_size,
    };
    let corpus = Corpus::load(&opt.input, options)
        .with_context(|| format!("unable to load {}", opt.input.display()))?;

    let matches = query.find(&corpus);
    if opt.total {
        println!("{}", matches.len());
    } else {
        for word in matches.iter() {
            println!("{}", word);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opt(args: &[&str]) -> Opt {
        Opt::from_iter(std::iter::once("lexiquery").chain(args.iter().copied()))
    }

    #[test]
    fn count_limits_results() {
        let query = build_query(&opt(&["-n", "2", "#mid o"])).unwrap();
        assert_eq!(query.results_limit, Some(2));

        let query = build_query(&opt(&["#mid o; #limit 5"])).unwrap();
        assert_eq!(query.results_limit, Some(5));
    }

    #[test]
    fn total_ignores_limits() {
        let corpus = Corpus::from_lines(vec!["hello", "world", "python", "programming"]).unwrap();

        let query = build_query(&opt(&["-n", "1", "-t", "#mid o"])).unwrap();
        assert_eq!(query.results_limit, None);
        assert_eq!(query.find(&corpus).len(), 4);

        let query = build_query(&opt(&["-t", "#mid o; #limit 2"])).unwrap();
        assert_eq!(query.find(&corpus).len(), 4);
    }

    #[test]
    fn invalid_query() {
        assert!(build_query(&opt(&["#start a #end z"])).is_err());
    }
}
