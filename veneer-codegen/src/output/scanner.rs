//! Tokenizer for accessor expressions such as `$resp.books[0].title`.

use std::{iter::Peekable, str::CharIndices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Eof,
    /// Identifier, including the `$resp` placeholder.
    Ident,
    Int,
    /// Double-quoted string; the token text has the quotes removed.
    Str,
    Char(char),
}

pub struct Scanner<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    token: String,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            token: String::new(),
        }
    }

    /// The whole expression being scanned.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Text of the last token returned by [`scan`](Self::scan).
    pub fn token_str(&self) -> &str {
        &self.token
    }

    pub fn scan(&mut self) -> Token {
        self.token.clear();
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}

        let Some((_, c)) = self.chars.next() else {
            return Token::Eof;
        };

        if c == '$' || c == '_' || c.is_ascii_alphabetic() {
            self.token.push(c);
            self.take_while(|c| c == '_' || c.is_ascii_alphanumeric());
            Token::Ident
        } else if c.is_ascii_digit() || (c == '-' && self.peek_is(|c| c.is_ascii_digit())) {
            self.token.push(c);
            self.take_while(|c| c.is_ascii_digit());
            Token::Int
        } else if c == '"' {
            while let Some((_, c)) = self.chars.next() {
                match c {
                    '"' => return Token::Str,
                    '\\' => {
                        if let Some((_, escaped)) = self.chars.next() {
                            self.token.push(escaped);
                        }
                    }
                    _ => self.token.push(c),
                }
            }
            // Unterminated string
            Token::Char('"')
        } else {
            self.token.push(c);
            Token::Char(c)
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some((_, c)) = self.chars.next_if(|(_, c)| pred(*c)) {
            self.token.push(c);
        }
    }

    fn peek_is(&mut self, pred: impl Fn(char) -> bool) -> bool {
        self.chars.peek().is_some_and(|(_, c)| pred(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<(Token, String)> {
        let mut scanner = Scanner::new(input);
        let mut out = Vec::new();
        loop {
            let token = scanner.scan();
            if token == Token::Eof {
                break;
            }
            out.push((token, scanner.token_str().to_string()));
        }
        out
    }

    #[test]
    fn test_accessor_tokens() {
        let toks = tokens(r#"$resp.labels{"main shelf"}[12]"#);
        assert_eq!(
            toks,
            vec![
                (Token::Ident, "$resp".into()),
                (Token::Char('.'), ".".into()),
                (Token::Ident, "labels".into()),
                (Token::Char('{'), "{".into()),
                (Token::Str, "main shelf".into()),
                (Token::Char('}'), "}".into()),
                (Token::Char('['), "[".into()),
                (Token::Int, "12".into()),
                (Token::Char(']'), "]".into()),
            ]
        );
    }

    #[test]
    fn test_definition_tokens() {
        let toks = tokens("title = book.title");
        assert_eq!(toks[0], (Token::Ident, "title".into()));
        assert_eq!(toks[1], (Token::Char('='), "=".into()));
        assert_eq!(toks.len(), 5);
    }

    #[test]
    fn test_negative_int() {
        assert_eq!(tokens("{-3}")[1], (Token::Int, "-3".into()));
    }
}
