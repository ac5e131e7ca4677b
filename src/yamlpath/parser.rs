//! Query expression parser.

use super::ast::{PathSegment, QueryPath};
use super::error::QueryError;

/// Parser for query expressions such as `.spec.containers[0].image`.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given expression.
    pub fn new(expression: &'a str) -> Self {
        Self {
            input: expression,
            position: 0,
        }
    }

    /// Parses the expression into a QueryPath.
    pub fn parse(expression: &str) -> Result<QueryPath, QueryError> {
        let mut parser = Parser::new(expression);
        parser.parse_path()
    }

    fn parse_path(&mut self) -> Result<QueryPath, QueryError> {
        let mut segments = Vec::new();

        self.expect('.', "'.'")?;
        if self.is_eof() {
            return Ok(QueryPath::new(segments));
        }

        loop {
            segments.push(PathSegment::Child(self.parse_identifier()?));

            while self.peek() == Some('[') {
                segments.push(self.parse_index()?);
            }

            match self.peek() {
                None => break,
                Some('.') => {
                    self.next();
                }
                Some(found) => {
                    return Err(QueryError::UnexpectedChar {
                        position: self.position,
                        found,
                        expected: "'.', '[' or end of input".to_string(),
                    })
                }
            }
        }

        Ok(QueryPath::new(segments))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    /// Checks if we've reached the end of input.
    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Expects a specific character and advances, or returns an error.
    fn expect(&mut self, expected: char, description: &str) -> Result<(), QueryError> {
        let pos = self.position;
        match self.next() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(QueryError::UnexpectedChar {
                position: pos,
                found: ch,
                expected: description.to_string(),
            }),
            None => Err(QueryError::UnexpectedEnd {
                expected: description.to_string(),
            }),
        }
    }

    /// Parses a key name: `[A-Za-z_][A-Za-z0-9_-]*`.
    fn parse_identifier(&mut self) -> Result<String, QueryError> {
        const EXPECTED: &str = "a key name";

        let start = self.position;
        match self.peek() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                self.next();
            }
            Some(found) => {
                return Err(QueryError::UnexpectedChar {
                    position: start,
                    found,
                    expected: EXPECTED.to_string(),
                })
            }
            None => {
                return Err(QueryError::UnexpectedEnd {
                    expected: EXPECTED.to_string(),
                })
            }
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                self.next();
            } else {
                break;
            }
        }

        Ok(self.input[start..self.position].to_string())
    }

    /// Parses a bracketed sequence index: `[0]`.
    fn parse_index(&mut self) -> Result<PathSegment, QueryError> {
        self.expect('[', "'['")?;

        let start = self.position;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                self.next();
            } else {
                break;
            }
        }

        let digits = &self.input[start..self.position];
        if digits.is_empty() {
            return match self.peek() {
                Some(found) => Err(QueryError::UnexpectedChar {
                    position: start,
                    found,
                    expected: "a sequence index".to_string(),
                }),
                None => Err(QueryError::UnexpectedEnd {
                    expected: "a sequence index".to_string(),
                }),
            };
        }

        let index = digits
            .parse::<usize>()
            .map_err(|_| QueryError::InvalidIndex {
                position: start,
                text: digits.to_string(),
            })?;

        self.expect(']', "']'")?;
        Ok(PathSegment::Index(index))
    }
}
