#[cfg(test)]
use pest::error::LineColLocation;
use pest::error::{Error as PestError, ErrorVariant};
use pest::iterators::Pair;
use pest::Parser;
use std::fmt;
use std::str::FromStr;

pub type Result<T> = std::result::Result<T, PestError<Rule>>;

#[derive(Parser)]
#[grammar = "lexiquery_grammar.pest"]
struct QueryParser;

/// A query is a representation of the whole text input sent to lexiquery,
/// one clause per line or `;`. This is used to build a
/// `query::MultiPatternQuery`.
///
/// `None` means the query never mentioned that position; `Some(vec![])`
/// means it was mentioned with no alternatives, which matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryAst {
    pub starts: Option<Vec<String>>,
    pub mids: Option<Vec<String>>,
    pub stops: Option<Vec<String>>,
    /// Inclusive `(min, max)` length range
    pub length: Option<(i64, i64)>,
    pub options: QueryOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub results_limit: Option<usize>,
}

fn parse_number<T: FromStr>(pair: Pair<'_, Rule>, what: &str) -> Result<T> {
    pair.as_str().parse().map_err(|_| {
        PestError::new_from_span(
            ErrorVariant::CustomError {
                message: format!("invalid {}: {}", what, pair.as_str()),
            },
            pair.as_span(),
        )
    })
}

fn parse_values(pair: Pair<'_, Rule>) -> Vec<String> {
    pair.into_inner()
        .filter_map(|p| match p.as_rule() {
            Rule::bare => Some(p.as_str().to_owned()),
            Rule::quoted => Some(
                p.into_inner()
                    .next()
                    .map_or_else(String::new, |inner| inner.as_str().to_owned()),
            ),
            _ => None,
        })
        .collect()
}

impl QueryAst {
    pub fn new_from_str(input_str: &str) -> Result<Self> {
        let mut ast = QueryAst::default();

        let pairs = QueryParser::parse(Rule::query, input_str)?
            .flat_map(|query| query.into_inner());
        for pair in pairs {
            ast.parse_clause(pair)?;
        }

        Ok(ast)
    }

    fn parse_clause(&mut self, pair: Pair<'_, Rule>) -> Result<()> {
        match pair.as_rule() {
            Rule::start_option => self
                .starts
                .get_or_insert_with(Vec::new)
                .extend(parse_values(pair)),
            Rule::mid_option => self
                .mids
                .get_or_insert_with(Vec::new)
                .extend(parse_values(pair)),
            Rule::end_option => self
                .stops
                .get_or_insert_with(Vec::new)
                .extend(parse_values(pair)),
            Rule::length_option => {
                let mut bounds = vec![];
                for p in pair.into_inner().filter(|p| p.as_rule() == Rule::number) {
                    bounds.push(parse_number::<i64>(p, "length")?);
                }
                self.length = match bounds.as_slice() {
                    [n] => Some((*n, *n)),
                    [min, max] => Some((*min, *max)),
                    _ => unreachable!("grammar allows one or two lengths"),
                };
            }
            Rule::limit_option => {
                for p in pair.into_inner().filter(|p| p.as_rule() == Rule::number) {
                    self.options.results_limit = Some(parse_number::<usize>(p, "limit")?);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn fmt_values(f: &mut fmt::Formatter<'_>, keyword: &str, values: &[String]) -> fmt::Result {
    write!(f, "{}", keyword)?;
    for value in values {
        if value.is_empty()
            || value.starts_with('#')
            || value.contains(|c: char| c.is_whitespace() || c == ';')
        {
            write!(f, " \"{}\"", value)?;
        } else {
            write!(f, " {}", value)?;
        }
    }
    writeln!(f)
}

impl fmt::Display for QueryAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((min, max)) = self.length {
            if min == max {
                writeln!(f, "#length {}", min)?;
            } else {
                writeln!(f, "#length {} {}", min, max)?;
            }
        }
        if let Some(starts) = &self.starts {
            fmt_values(f, "#start", starts)?;
        }
        if let Some(mids) = &self.mids {
            fmt_values(f, "#mid", mids)?;
        }
        if let Some(stops) = &self.stops {
            fmt_values(f, "#end", stops)?;
        }
        if let Some(limit) = self.options.results_limit {
            writeln!(f, "#limit {}", limit)?;
        }
        Ok(())
    }
}

#[test]
fn test_query_ast() {
    let ast = QueryAst::new_from_str("#length 16\n#start a\n#mid b\n#end z").unwrap();
    assert_eq!(
        ast,
        QueryAst {
            starts: Some(vec!["a".into()]),
            mids: Some(vec!["b".into()]),
            stops: Some(vec!["z".into()]),
            length: Some((16, 16)),
            options: QueryOptions::default(),
        }
    );

    // Clauses separated by `;`, quoted values, `#contains` alias
    let ast = QueryAst::new_from_str(r#"#start sur "" ; #contains x "a b"; #length 8 12"#).unwrap();
    assert_eq!(ast.starts, Some(vec!["sur".into(), "".into()]));
    assert_eq!(ast.mids, Some(vec!["x".into(), "a b".into()]));
    assert_eq!(ast.stops, None);
    assert_eq!(ast.length, Some((8, 12)));

    // Repeated clauses add alternatives, a repeated length replaces it
    let ast = QueryAst::new_from_str("#end ons\n#end ez\n#length 5\n#length 17").unwrap();
    assert_eq!(ast.stops, Some(vec!["ons".into(), "ez".into()]));
    assert_eq!(ast.length, Some((17, 17)));

    // A clause with no values is an empty (unsatisfiable) set
    let ast = QueryAst::new_from_str("#start").unwrap();
    assert_eq!(ast.starts, Some(vec![]));

    // Blank lines are ignored, as is surrounding whitespace
    let ast = QueryAst::new_from_str("\n   \n  #limit 20  \n").unwrap();
    assert_eq!(ast.options.results_limit, Some(20));
    assert_eq!(ast.length, None);

    // Non-ASCII values
    let ast = QueryAst::new_from_str("#mid péril à").unwrap();
    assert_eq!(ast.mids, Some(vec!["péril".into(), "à".into()]));

    // Negative lengths parse; they just never match
    let ast = QueryAst::new_from_str("#length -3 5").unwrap();
    assert_eq!(ast.length, Some((-3, 5)));
}

#[test]
fn test_query_ast_separators_in_values() {
    let ast = QueryAst::new_from_str(r##"#start "a;b" c; #end "#z""##).unwrap();
    assert_eq!(ast.starts, Some(vec!["a;b".into(), "c".into()]));
    assert_eq!(ast.stops, Some(vec!["#z".into()]));

    let ast = QueryAst::new_from_str("#mid \"x\ny\"\n#length 3").unwrap();
    assert_eq!(ast.mids, Some(vec!["x\ny".into()]));
    assert_eq!(ast.length, Some((3, 3)));

    // Every clause must begin on its own line or after `;`
    assert!(QueryAst::new_from_str("#start a #end z").is_err());
    assert!(QueryAst::new_from_str("#start a#b").is_ok());
    assert!(QueryAst::new_from_str("#length 5 #limit 2").is_err());
    let ast = QueryAst::new_from_str("#start a; #end z").unwrap();
    assert_eq!(ast.starts, Some(vec!["a".into()]));
    assert_eq!(ast.stops, Some(vec!["z".into()]));
}

#[test]
fn test_query_ast_errors() {
    assert!(QueryAst::new_from_str("hello").is_err());
    assert!(QueryAst::new_from_str("#length").is_err());
    assert!(QueryAst::new_from_str("#length 1 2 3").is_err());
    assert!(QueryAst::new_from_str("#length x").is_err());
    assert!(QueryAst::new_from_str("#limit -1").is_err());
    assert!(QueryAst::new_from_str("#starts a").is_err());
    assert!(QueryAst::new_from_str("#start \"a").is_err());
    assert!(QueryAst::new_from_str("#length 99999999999999999999").is_err());

    let err = QueryAst::new_from_str("#start a\n#mid b\n#bogus").unwrap_err();
    match err.line_col {
        LineColLocation::Pos((line, _)) => assert_eq!(line, 3),
        LineColLocation::Span((line, _), _) => assert_eq!(line, 3),
    }

    let err = QueryAst::new_from_str("#start a\n#length 3\n\n#limit -1").unwrap_err();
    match err.line_col {
        LineColLocation::Pos((line, col)) => assert_eq!((line, col), (4, 8)),
        LineColLocation::Span((line, col), _) => assert_eq!((line, col), (4, 8)),
    }
}

#[test]
fn test_query_ast_display() {
    let input = "#length 8 12\n#start p \"\"\n#mid o\n#end g\n#limit 3\n";
    let ast = QueryAst::new_from_str(input).unwrap();
    assert_eq!(ast.to_string(), input);
    assert_eq!(QueryAst::new_from_str(&ast.to_string()).unwrap(), ast);

    let ast = QueryAst {
        starts: Some(vec!["a;b".into(), "#x".into(), "".into()]),
        mids: Some(vec!["x y".into(), "l'o".into()]),
        stops: Some(vec![]),
        length: Some((-2, 9)),
        options: QueryOptions {
            results_limit: Some(0),
        },
    };
    assert_eq!(
        ast.to_string(),
        "#length -2 9\n#start \"a;b\" \"#x\" \"\"\n#mid \"x y\" l'o\n#end\n#limit 0\n"
    );
    assert_eq!(QueryAst::new_from_str(&ast.to_string()).unwrap(), ast);
}
