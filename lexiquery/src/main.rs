use anyhow::{Context, Result};
use lexiquery::{parser, Corpus, CorpusOptions, MultiPatternQuery};
use std::time;

const DEFAULT_WORDLIST_FILE: &str = "corpus.txt";

fn main() -> Result<()> {
    pretty_env_logger::init();

    let filename = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_WORDLIST_FILE.to_string());

    let start = time::Instant::now();
    let corpus = Corpus::load(&filename, CorpusOptions::default())
        .with_context(|| format!("loading {}", filename))?;
    println!(
        " === Time to load & index {} words: {:?} ===",
        corpus.size(),
        start.elapsed()
    );

    let queries = vec![
        ("#length 15", 1..=usize::MAX),
        ("#mid k", 1..=usize::MAX),
        ("#mid oo", 1..=usize::MAX),
        ("#start z; #end z; #length 7", 1..=100),
        ("#start z; #length 14", 1..=usize::MAX),
        ("#end z; #length 18", 1..=usize::MAX),
        ("#start sur; #mid x; #end ons; #length 17", 0..=100),
        ("#start a; #mid b; #end z; #length 16", 1..=10),
        ("#start anti in; #mid tion; #end ment ments; #length 10 30", 1..=usize::MAX),
    ];

    let mut times = vec![];
    for (query_str, expected_range) in queries.iter() {
        println!();
        println!(">>> Query: {} <<<", query_str);

        let start = time::Instant::now();
        let query_ast = parser::QueryAst::new_from_str(query_str)
            .with_context(|| format!("parsing {:?}", query_str))?;
        let query = MultiPatternQuery::from_ast(&query_ast);
        let matches = query.find(&corpus);
        let duration = start.elapsed();

        println!("# matches: {}", matches.len());
        for word in matches.iter().take(5) {
            println!("    {}", word);
        }
        println!(" === Time to evaluate matches: {:?} === ", duration);

        if !expected_range.contains(&matches.len()) {
            println!(
                "error: query {:?} expected {:?} matches, got {}",
                query_str,
                expected_range,
                matches.len()
            );
        }
        times.push(duration);
    }

    println!();
    for ((query_str, _), duration) in queries.iter().zip(times.iter()) {
        println!("{:64} -> {:?}", query_str, duration);
    }
    Ok(())
}
