use std::fmt;

use crate::core::error::Error;
use crate::index::posting::PostingList;
use crate::index::reader::SearchIndex;

/// Per-line query failures.
///
/// Everything except `Index` is a problem with the query text itself and is
/// reported for that line only; `Index` wraps a persisted-data error
/// surfaced during lookup and ends the session.
#[derive(Debug)]
pub enum QueryError {
    MissingClosingParen { at: usize },
    UnexpectedToken { at: usize, found: Option<char> },
    UnknownTerm { term: String },
    Index(Error),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::MissingClosingParen { at } => {
                write!(f, "no closing parenthesis found at character {}", at)
            }
            QueryError::UnexpectedToken { at, found: Some(c) } => {
                write!(f, "unexpected character '{}' at character {}", c, at)
            }
            QueryError::UnexpectedToken { at, found: None } => {
                write!(f, "unexpected end of query at character {}", at)
            }
            QueryError::UnknownTerm { term } => {
                write!(f, "term '{}' is not in the index", term)
            }
            QueryError::Index(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for QueryError {}

/// Recursive-descent boolean query evaluator.
///
/// Grammar, lowest precedence first:
/// ```text
/// expr  := or
/// or    := and ( '|' and )*
/// and   := not ( '&' not )*
/// not   := '!' group | group
/// group := '(' expr ')' | value
/// value := run of Cyrillic letters, ASCII letters and digits
/// ```
/// There is no AST; each rule evaluates straight to a posting list, with
/// `|` as sorted union and `&` as sorted intersection.
pub struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    index: &'a SearchIndex,
}

impl<'a> Parser<'a> {
    pub fn new(query: &str, index: &'a SearchIndex) -> Self {
        Parser {
            chars: query.chars().collect(),
            pos: 0,
            index,
        }
    }

    /// Evaluate the whole query; trailing non-whitespace is an error.
    pub fn evaluate(mut self) -> Result<PostingList, QueryError> {
        let value = self.parse_expression()?;
        self.skip_whitespace();

        if let Some(c) = self.peek() {
            return Err(QueryError::UnexpectedToken {
                at: self.pos,
                found: Some(c),
            });
        }

        Ok(value)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.pos += 1;
        }
    }

    fn parse_expression(&mut self) -> Result<PostingList, QueryError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<PostingList, QueryError> {
        let mut value = self.parse_and()?;

        loop {
            self.skip_whitespace();
            if self.peek() == Some('|') {
                self.pos += 1;
                value = value.union(&self.parse_and()?);
            } else {
                return Ok(value);
            }
        }
    }

    fn parse_and(&mut self) -> Result<PostingList, QueryError> {
        let mut value = self.parse_not()?;

        loop {
            self.skip_whitespace();
            if self.peek() == Some('&') {
                self.pos += 1;
                value = value.intersect(&self.parse_not()?);
            } else {
                return Ok(value);
            }
        }
    }

    /// `!` parses but evaluates as a pass-through: the operand's posting
    /// list is returned unchanged, NOT complemented against the document
    /// universe. Long-standing behavior, kept on purpose.
    fn parse_not(&mut self) -> Result<PostingList, QueryError> {
        self.skip_whitespace();
        if self.peek() == Some('!') {
            self.pos += 1;
        }
        self.parse_group()
    }

    fn parse_group(&mut self) -> Result<PostingList, QueryError> {
        self.skip_whitespace();
        if self.peek() != Some('(') {
            return self.parse_value();
        }

        self.pos += 1;
        let value = self.parse_expression()?;
        self.skip_whitespace();

        if self.peek() != Some(')') {
            return Err(QueryError::MissingClosingParen { at: self.pos });
        }
        self.pos += 1;
        Ok(value)
    }

    fn parse_value(&mut self) -> Result<PostingList, QueryError> {
        self.skip_whitespace();
        let start = self.pos;
        let mut token = String::new();

        while let Some(c) = self.peek() {
            if is_term_char(c) {
                token.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }

        if token.is_empty() {
            return Err(QueryError::UnexpectedToken {
                at: start,
                found: self.peek(),
            });
        }

        match self.index.postings(&token) {
            Ok(Some(posting_list)) => Ok(posting_list),
            Ok(None) => Err(QueryError::UnknownTerm { term: token }),
            Err(err) => Err(QueryError::Index(err)),
        }
    }
}

/// Term characters: Cyrillic letters, ASCII letters, digits, either case.
fn is_term_char(c: char) -> bool {
    c.to_lowercase()
        .all(|l| matches!(l, 'a'..='z' | '0'..='9' | 'а'..='я' | 'ё'))
}
