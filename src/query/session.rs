use std::io::{BufRead, Write};

use tracing::debug;

use crate::core::error::{Error, ErrorKind, Result};
use crate::index::inverted::DocUrlMap;
use crate::index::reader::SearchIndex;
use crate::query::parser::{Parser, QueryError};

/// Line-oriented query loop.
///
/// Reads queries until the first blank line. For each query it prints the
/// query line, the match count, then every matching url on its own line, in
/// ascending doc-id order. A malformed query or unknown term is reported
/// for that line and the loop continues; an index-integrity error ends the
/// session.
pub struct QuerySession<'a> {
    index: &'a SearchIndex,
    urls: &'a DocUrlMap,
}

impl<'a> QuerySession<'a> {
    pub fn new(index: &'a SearchIndex, urls: &'a DocUrlMap) -> Self {
        QuerySession { index, urls }
    }

    pub fn run<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }

            match Parser::new(&line, self.index).evaluate() {
                Ok(result) => {
                    writeln!(output, "{}", line)?;
                    writeln!(output, "{}", result.len())?;
                    for doc_id in result {
                        let url = self.urls.url(doc_id).ok_or_else(|| {
                            Error::new(
                                ErrorKind::NotFound,
                                format!("doc id {} missing from the url map", doc_id),
                            )
                        })?;
                        writeln!(output, "{}", url)?;
                    }
                }
                Err(QueryError::Index(err)) => return Err(err),
                Err(query_err) => {
                    debug!(query = %line, error = %query_err, "query rejected");
                    writeln!(output, "{}", line)?;
                    writeln!(output, "query error: {}", query_err)?;
                }
            }
        }

        Ok(())
    }
}
