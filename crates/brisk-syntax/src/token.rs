//! Token definitions for the brisk lexer.

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(i64),
    Float(f64),
    Str(String),
    // keywords
    Let,
    If,
    Else,
    Func,
    Return,
    True,
    False,
    Print,
    Input,
    While,
    Break,
    Continue,
    Switch,
    Case,
    Default,
    // punctuation
    Comma,
    Colon,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Newline,
    // operators
    Equal,     // =
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %
    EqEq,      // ==
    NotEq,     // !=
    Less,      // <
    LessEq,    // <=
    Greater,   // >
    GreaterEq, // >=
    AndAnd,    // &&
    OrOr,      // ||
    Invalid(char),
    Eof,
}

impl TokenKind {
    /// The raw source text this kind stands for, used in diagnostics.
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Ident(s) => s.clone(),
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Float(f) => f.to_string(),
            TokenKind::Str(s) => s.clone(),
            TokenKind::Let => "let".into(),
            TokenKind::If => "if".into(),
            TokenKind::Else => "else".into(),
            TokenKind::Func => "func".into(),
            TokenKind::Return => "return".into(),
            TokenKind::True => "true".into(),
            TokenKind::False => "false".into(),
            TokenKind::Print => "print".into(),
            TokenKind::Input => "input".into(),
            TokenKind::While => "while".into(),
            TokenKind::Break => "break".into(),
            TokenKind::Continue => "continue".into(),
            TokenKind::Switch => "switch".into(),
            TokenKind::Case => "case".into(),
            TokenKind::Default => "default".into(),
            TokenKind::Comma => ",".into(),
            TokenKind::Colon => ":".into(),
            TokenKind::LParen => "(".into(),
            TokenKind::RParen => ")".into(),
            TokenKind::LBrace => "{".into(),
            TokenKind::RBrace => "}".into(),
            TokenKind::LBracket => "[".into(),
            TokenKind::RBracket => "]".into(),
            TokenKind::Newline => "\\n".into(),
            TokenKind::Equal => "=".into(),
            TokenKind::Plus => "+".into(),
            TokenKind::Minus => "-".into(),
            TokenKind::Star => "*".into(),
            TokenKind::Slash => "/".into(),
            TokenKind::Percent => "%".into(),
            TokenKind::EqEq => "==".into(),
            TokenKind::NotEq => "!=".into(),
            TokenKind::Less => "<".into(),
            TokenKind::LessEq => "<=".into(),
            TokenKind::Greater => ">".into(),
            TokenKind::GreaterEq => ">=".into(),
            TokenKind::AndAnd => "&&".into(),
            TokenKind::OrOr => "||".into(),
            TokenKind::Invalid(c) => c.to_string(),
            TokenKind::Eof => "<eof>".into(),
        }
    }
}

/// A token with its source position (line, col).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
}
