//! Brisk lexer: converts source text into tokens.
use brisk_syntax::token::{Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
///
/// The scanner is infallible: anything it does not recognize becomes an
/// `Invalid` token, which the parser reports when it reaches for it. Once
/// the input is exhausted every further call yields `Eof`.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    /// Skip spaces, tabs, carriage returns, and `#`/`//` comments.
    /// Newlines are significant and are left for `next_token`.
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' => self.skip_line_comment(),
                '/' if self.peek_next() == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// Produce the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let col = self.col;

        let c = match self.peek() {
            None => {
                return Token {
                    kind: TokenKind::Eof,
                    line,
                    col,
                }
            }
            Some(c) => c,
        };

        // Newline terminates a statement.
        if c == '\n' {
            self.advance();
            return Token {
                kind: TokenKind::Newline,
                line,
                col,
            };
        }

        if c == '"' {
            self.advance();
            return self.read_string(line, col);
        }
        if c.is_ascii_digit() {
            return self.read_number(line, col);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            return self.read_ident_or_keyword(line, col);
        }

        // Two-character operators win over their single-character prefixes.
        if let Some(next) = self.peek_next() {
            let double = match (c, next) {
                ('=', '=') => Some(TokenKind::EqEq),
                ('!', '=') => Some(TokenKind::NotEq),
                ('<', '=') => Some(TokenKind::LessEq),
                ('>', '=') => Some(TokenKind::GreaterEq),
                ('&', '&') => Some(TokenKind::AndAnd),
                ('|', '|') => Some(TokenKind::OrOr),
                _ => None,
            };
            if let Some(kind) = double {
                self.advance();
                self.advance();
                return Token { kind, line, col };
            }
        }

        self.advance();
        let kind = match c {
            '=' => TokenKind::Equal,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            other => TokenKind::Invalid(other),
        };
        Token { kind, line, col }
    }

    /// Integer or float literal. The dot is consumed only when a digit
    /// follows it.
    fn read_number(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            s.push('.');
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    s.push(c);
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let kind = if is_float {
            TokenKind::Float(s.parse().unwrap_or(0.0))
        } else {
            match s.parse::<i64>() {
                Ok(n) => TokenKind::Number(n),
                // overflow saturates through a double
                Err(_) => TokenKind::Number(s.parse::<f64>().unwrap_or(0.0) as i64),
            }
        };
        Token { kind, line, col }
    }

    fn read_ident_or_keyword(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let kind = match s.as_str() {
            "let" => TokenKind::Let,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "func" => TokenKind::Func,
            "return" => TokenKind::Return,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "print" => TokenKind::Print,
            "input" => TokenKind::Input,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            _ => TokenKind::Ident(s),
        };
        Token { kind, line, col }
    }

    /// String literal. A backslash is consumed and the character after it
    /// is taken verbatim; no escape decoding happens. An unterminated
    /// string at end of input yields whatever accumulated.
    fn read_string(&mut self, line: usize, col: usize) -> Token {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\\' {
                self.advance();
                if let Some(verbatim) = self.advance() {
                    s.push(verbatim);
                }
            } else {
                self.advance();
                s.push(c);
            }
        }
        if self.peek() == Some('"') {
            self.advance();
        }
        Token {
            kind: TokenKind::Str(s),
            line,
            col,
        }
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let tk = self.next_token();
            let done = tk.kind == TokenKind::Eof;
            tokens.push(tk);
            if done {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn eof_is_idempotent() {
        let mut lexer = Lexer::new("x");
        assert!(matches!(lexer.next_token().kind, TokenKind::Ident(_)));
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn newlines_are_tokens() {
        assert_eq!(
            kinds("1\n2"),
            vec![
                TokenKind::Number(1),
                TokenKind::Newline,
                TokenKind::Number(2),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(
            kinds("1 # ignored\n2 // also ignored\n"),
            vec![
                TokenKind::Number(1),
                TokenKind::Newline,
                TokenKind::Number(2),
                TokenKind::Newline,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn slash_alone_is_division() {
        assert_eq!(
            kinds("4 / 2"),
            vec![
                TokenKind::Number(4),
                TokenKind::Slash,
                TokenKind::Number(2),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn integer_and_float_literals() {
        assert_eq!(kinds("42"), vec![TokenKind::Number(42), TokenKind::Eof]);
        assert_eq!(kinds("3.25"), vec![TokenKind::Float(3.25), TokenKind::Eof]);
        // the dot only belongs to the number when a digit follows
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Number(1),
                TokenKind::Invalid('.'),
                TokenKind::Ident("x".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn string_backslash_takes_next_char_verbatim() {
        assert_eq!(
            kinds(r#""a\"b""#),
            vec![TokenKind::Str("a\"b".to_string()), TokenKind::Eof]
        );
        // no escape decoding: \n stays the letter n
        assert_eq!(
            kinds(r#""a\nb""#),
            vec![TokenKind::Str("anb".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn unterminated_string_is_accepted() {
        assert_eq!(
            kinds("\"dangling"),
            vec![TokenKind::Str("dangling".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("let letter switch switchy"),
            vec![
                TokenKind::Let,
                TokenKind::Ident("letter".to_string()),
                TokenKind::Switch,
                TokenKind::Ident("switchy".to_string()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn double_operators_win_over_prefixes() {
        assert_eq!(
            kinds("= == < <= > >= != && ||"),
            vec![
                TokenKind::Equal,
                TokenKind::EqEq,
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
                TokenKind::NotEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn unknown_characters_become_invalid_tokens() {
        assert_eq!(
            kinds("@ !"),
            vec![
                TokenKind::Invalid('@'),
                TokenKind::Invalid('!'),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn token_lines_start_at_one() {
        let tokens = Lexer::new("a\nb\nc").tokenize();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert!(lines.iter().all(|&l| l >= 1));
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[2].line, 2); // ident b
        assert_eq!(tokens[4].line, 3); // ident c
    }
}
