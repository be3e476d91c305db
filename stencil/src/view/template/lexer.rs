//! Splits template text into literal text and tags.
use super::Error;
use crate::view::{Delimiters, Options};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Text(String),
    Interpolate(String),
    Escape(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithContext {
    token: Token,
    line: usize,
    column: usize,
}

impl TokenWithContext {
    pub fn new(token: Token, line: usize, column: usize) -> Self {
        Self {
            token,
            line,
            column,
        }
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tag {
    Interpolate,
    Escape,
    Evaluate,
}

pub struct Lexer<'a> {
    source: &'a str,
    options: &'a Options,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, options: &'a Options) -> Self {
        Self { source, options }
    }

    pub fn tokens(self) -> Result<Vec<TokenWithContext>, Error> {
        let tags = [
            (&self.options.escape, Tag::Escape),
            (&self.options.interpolate, Tag::Interpolate),
            (&self.options.evaluate, Tag::Evaluate),
        ];

        let mut tokens = vec![];
        let mut pos = 0;

        while pos < self.source.len() {
            let next = self.next_tag(pos, &tags);

            let (start, delimiters, tag) = match next {
                Some(next) => next,
                None => {
                    let (line, column) = self.position(pos);
                    tokens.push(TokenWithContext::new(
                        Token::Text(self.source[pos..].to_string()),
                        line,
                        column,
                    ));
                    break;
                }
            };

            if start > pos {
                let (line, column) = self.position(pos);
                tokens.push(TokenWithContext::new(
                    Token::Text(self.source[pos..start].to_string()),
                    line,
                    column,
                ));
            }

            let (line, column) = self.position(start);

            if tag == Tag::Evaluate {
                return Err(Error::Syntax {
                    line,
                    column,
                    message: "evaluate blocks are not supported",
                });
            }

            let body = start + delimiters.open.len();
            let end = match self.source[body..].find(&delimiters.close) {
                Some(end) => body + end,
                None => {
                    return Err(Error::Eof {
                        close: delimiters.close.clone(),
                        line,
                        column,
                    })
                }
            };

            let expression = self.source[body..end].trim().to_string();
            let token = match tag {
                Tag::Escape => Token::Escape(expression),
                _ => Token::Interpolate(expression),
            };

            tokens.push(TokenWithContext::new(token, line, column));
            pos = end + delimiters.close.len();
        }

        Ok(tokens)
    }

    /// Find the closest opening tag. The longest opener wins when two start
    /// at the same place, e.g. `<%=` over `<%`.
    fn next_tag(
        &self,
        pos: usize,
        tags: &[(&'a Delimiters, Tag)],
    ) -> Option<(usize, &'a Delimiters, Tag)> {
        tags.iter()
            .filter(|(delimiters, _)| !delimiters.open.is_empty())
            .filter_map(|(delimiters, tag)| {
                self.source[pos..]
                    .find(&delimiters.open)
                    .map(|offset| (pos + offset, *delimiters, *tag))
            })
            .min_by(|a, b| {
                a.0.cmp(&b.0)
                    .then_with(|| b.1.open.len().cmp(&a.1.open.len()))
            })
    }

    /// Line and column (both starting at 1) of a byte offset.
    fn position(&self, offset: usize) -> (usize, usize) {
        let before = &self.source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;

        (line, column)
    }
}
