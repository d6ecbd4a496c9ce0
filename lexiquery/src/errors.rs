use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures while building a `Lexicon`.
///
/// Queries themselves never fail: a query with no matches, a negative length
/// or an unsatisfiable set of alternatives all evaluate to an empty result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to read wordlist {}: {source}", .path.display())]
    CorpusLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unable to read wordlist: {0}")]
    Io(#[from] io::Error),

    #[error("wordlist contains no words")]
    EmptyCorpus,
}
