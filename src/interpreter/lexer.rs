use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Float literal tokens, such as `3.14`, `.5` or `2.`.
    #[regex(r"[0-9]+\.[0-9]*", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    Float(f32),
    /// Integer literal tokens, such as `42`. Must fit in 32 bits.
    #[regex(r"[0-9]+", parse_int)]
    Int(i32),
    /// `func`
    #[token("func")]
    Func,
    /// `ret`
    #[token("ret")]
    Ret,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `in`. Spelled as a word, but behaves as an infix operator.
    #[token("in")]
    In,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// Identifier tokens; variable or function names such as `x` or `vec3`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip)]
    Comment,
    /// `*=`
    #[token("*=")]
    StarEqual,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `%=`
    #[token("%=")]
    PercentEqual,
    /// `+=`
    #[token("+=")]
    PlusEqual,
    /// `-=`
    #[token("-=")]
    MinusEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `=`
    #[token("=")]
    Equals,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,

    /// Statement terminator.
    #[token("\n", |lex| { lex.extras.line += 1; })]
    NewLine,
    /// Spaces, tabs and carriage returns.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns `true` for tokens that close an open construct: `)`, `}`,
    /// `]` and `,`.
    #[must_use]
    pub const fn is_closing_separator(&self) -> bool {
        matches!(self,
                 Self::RParen | Self::RBrace | Self::RBracket | Self::Comma)
    }

    /// Renders the token the way it is spelled in source, for error
    /// messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Float(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Identifier(name) => name.clone(),
            Self::Func => "func".to_string(),
            Self::Ret => "ret".to_string(),
            Self::If => "if".to_string(),
            Self::Else => "else".to_string(),
            Self::For => "for".to_string(),
            Self::Break => "break".to_string(),
            Self::Continue => "continue".to_string(),
            Self::In => "in".to_string(),
            Self::And => "and".to_string(),
            Self::Or => "or".to_string(),
            Self::StarEqual => "*=".to_string(),
            Self::SlashEqual => "/=".to_string(),
            Self::PercentEqual => "%=".to_string(),
            Self::PlusEqual => "+=".to_string(),
            Self::MinusEqual => "-=".to_string(),
            Self::LessEqual => "<=".to_string(),
            Self::GreaterEqual => ">=".to_string(),
            Self::EqualEqual => "==".to_string(),
            Self::BangEqual => "!=".to_string(),
            Self::Star => "*".to_string(),
            Self::Slash => "/".to_string(),
            Self::Percent => "%".to_string(),
            Self::Plus => "+".to_string(),
            Self::Minus => "-".to_string(),
            Self::Less => "<".to_string(),
            Self::Greater => ">".to_string(),
            Self::Equals => "=".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::LBrace => "{".to_string(),
            Self::RBrace => "}".to_string(),
            Self::LBracket => "[".to_string(),
            Self::RBracket => "]".to_string(),
            Self::Comma => ",".to_string(),
            Self::NewLine => "end of line".to_string(),
            Self::Comment | Self::Ignored => String::new(),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current 1-based line number in the source being tokenized.
    pub line: u32,
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f32> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice. Fails (and the
/// token becomes an error) when the literal does not fit in an `i32`.
fn parse_int(lex: &logos::Lexer<Token>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Tokenizes a source string.
///
/// Produces `(token, line)` pairs. Newlines are significant statement
/// terminators, but runs of them are collapsed into a single token, the
/// stream never starts with one, and a non-empty stream always ends with
/// one. Comments and other whitespace are discarded.
///
/// # Errors
/// Returns [`ParseError::InvalidToken`] for any character sequence that is
/// not part of the language, including integer literals that overflow.
///
/// # Example
/// ```
/// use propscript::interpreter::lexer::{Token, lex};
///
/// let tokens = lex("x = 1 + 2 # set up x").unwrap();
///
/// assert_eq!(tokens.len(), 6); // x, =, 1, +, 2 and the trailing newline
/// assert_eq!(tokens[0].0, Token::Identifier("x".to_string()));
/// assert_eq!(tokens[5].0, Token::NewLine);
/// ```
pub fn lex(source: &str) -> Result<Vec<(Token, u32)>, ParseError> {
    let mut tokens: Vec<(Token, u32)> = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            // The newline callback has already advanced the counter, so the
            // token itself belongs to the line before it.
            Ok(Token::NewLine) => {
                if matches!(tokens.last(), Some((last, _)) if *last != Token::NewLine) {
                    tokens.push((Token::NewLine, lexer.extras.line - 1));
                }
            },
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                return Err(ParseError::InvalidToken { token: lexer.slice().to_string(),
                                                      line:  lexer.extras.line, });
            },
        }
    }

    if matches!(tokens.last(), Some((last, _)) if *last != Token::NewLine) {
        tokens.push((Token::NewLine, lexer.extras.line));
    }

    Ok(tokens)
}
