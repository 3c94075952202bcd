//! Tokens and the per-token descriptor produced by the scanner.

use jsxt_core::text::Location;
use jsxt_diagnostics::DiagnosticMessage;
use std::fmt;

/// Token kinds.
///
/// Variant order matters: the operator groups are contiguous so that
/// `is_assignment_operator`, `is_binary_operator` and the
/// literal-position test can use range checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Token {
    /// Nothing has been scanned yet.
    Bos,
    Eos,
    ShellHeader,
    At,

    // Dialect tokens
    XmlElementTag,
    XmlElementTagEnd,
    XmlNoIgnoreSpace,
    XmlComment,
    Command,
    CommandDataBind,
    CommandDataBindOnce,
    CommandEnd,

    // Punctuation
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    Colon,
    Semicolon,
    Period,
    Ellipsis,
    OptionalChain,
    Conditional,
    Inc,
    Dec,
    Arrow,

    // Assignment operators
    Assign,
    AssignBitOr,
    AssignBitXor,
    AssignBitAnd,
    AssignShl,
    AssignSar,
    AssignShr,
    AssignAdd,
    AssignSub,
    AssignMul,
    AssignPow,
    AssignDiv,
    AssignMod,
    AssignAnd,
    AssignOr,
    AssignNullish,

    // Binary operators
    Comma,
    Or,
    And,
    Nullish,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Sar,
    Shr,
    Add,
    Sub,
    Mul,
    Pow,
    Div,
    Mod,

    // Compare operators
    Eq,
    Ne,
    EqStrict,
    NeStrict,
    Lt,
    Gt,
    Lte,
    Gte,
    Instanceof,
    In,

    // Unary operators
    Not,
    BitNot,
    Typeof,

    // Literals
    Number,
    String,
    RegExp,
    Identifier,

    // Keywords
    As,
    Async,
    Await,
    Case,
    Class,
    Const,
    Default,
    Delete,
    Do,
    Else,
    Event,
    Export,
    Extends,
    From,
    Function,
    Get,
    If,
    Import,
    Let,
    New,
    Of,
    Return,
    Set,
    Static,
    Throw,
    Var,
    Void,
    Yield,

    Illegal,
}

impl Token {
    /// Look up a keyword by its exact text.
    pub fn from_keyword(text: &str) -> Option<Token> {
        if !(2..=10).contains(&text.len()) {
            return None;
        }
        match text {
            "as" => Some(Token::As),
            "async" => Some(Token::Async),
            "await" => Some(Token::Await),
            "case" => Some(Token::Case),
            "class" => Some(Token::Class),
            "const" => Some(Token::Const),
            "default" => Some(Token::Default),
            "delete" => Some(Token::Delete),
            "do" => Some(Token::Do),
            "else" => Some(Token::Else),
            "event" => Some(Token::Event),
            "export" => Some(Token::Export),
            "extends" => Some(Token::Extends),
            "from" => Some(Token::From),
            "function" => Some(Token::Function),
            "get" => Some(Token::Get),
            "if" => Some(Token::If),
            "import" => Some(Token::Import),
            "in" => Some(Token::In),
            "instanceof" => Some(Token::Instanceof),
            "let" => Some(Token::Let),
            "new" => Some(Token::New),
            "of" => Some(Token::Of),
            "return" => Some(Token::Return),
            "set" => Some(Token::Set),
            "static" => Some(Token::Static),
            "throw" => Some(Token::Throw),
            "typeof" => Some(Token::Typeof),
            "var" => Some(Token::Var),
            "void" => Some(Token::Void),
            "yield" => Some(Token::Yield),
            _ => None,
        }
    }

    /// The fixed source text of a punctuator or operator.
    pub fn punctuation_text(self) -> Option<&'static str> {
        let text = match self {
            Token::At => "@",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrack => "[",
            Token::RBrack => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Colon => ":",
            Token::Semicolon => ";",
            Token::Period => ".",
            Token::Ellipsis => "...",
            Token::OptionalChain => "?.",
            Token::Conditional => "?",
            Token::Inc => "++",
            Token::Dec => "--",
            Token::Arrow => "=>",
            Token::Assign => "=",
            Token::AssignBitOr => "|=",
            Token::AssignBitXor => "^=",
            Token::AssignBitAnd => "&=",
            Token::AssignShl => "<<=",
            Token::AssignSar => ">>=",
            Token::AssignShr => ">>>=",
            Token::AssignAdd => "+=",
            Token::AssignSub => "-=",
            Token::AssignMul => "*=",
            Token::AssignPow => "**=",
            Token::AssignDiv => "/=",
            Token::AssignMod => "%=",
            Token::AssignAnd => "&&=",
            Token::AssignOr => "||=",
            Token::AssignNullish => "??=",
            Token::Comma => ",",
            Token::Or => "||",
            Token::And => "&&",
            Token::Nullish => "??",
            Token::BitOr => "|",
            Token::BitXor => "^",
            Token::BitAnd => "&",
            Token::Shl => "<<",
            Token::Sar => ">>",
            Token::Shr => ">>>",
            Token::Add => "+",
            Token::Sub => "-",
            Token::Mul => "*",
            Token::Pow => "**",
            Token::Div => "/",
            Token::Mod => "%",
            Token::Eq => "==",
            Token::Ne => "!=",
            Token::EqStrict => "===",
            Token::NeStrict => "!==",
            Token::Lt => "<",
            Token::Gt => ">",
            Token::Lte => "<=",
            Token::Gte => ">=",
            Token::Not => "!",
            Token::BitNot => "~",
            _ => return None,
        };
        Some(text)
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (Token::As..=Token::Yield).contains(&self)
            || matches!(self, Token::Typeof | Token::Instanceof | Token::In)
    }

    #[inline]
    pub fn is_assignment_operator(self) -> bool {
        (Token::Assign..=Token::AssignNullish).contains(&self)
    }

    /// Binary and comparison operators, including `,`.
    #[inline]
    pub fn is_binary_operator(self) -> bool {
        (Token::Comma..=Token::In).contains(&self)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.punctuation_text() {
            Some(text) => f.write_str(text),
            None => write!(f, "{:?}", self),
        }
    }
}

/// Everything the scanner knows about one token.
#[derive(Debug, Clone)]
pub struct TokenDescriptor {
    pub token: Token,
    pub location: Location,
    /// Whitespace and comments preceding the token.
    pub trivia: String,
    /// Source text of literals, identifiers, keywords, tag names and
    /// template pieces. Empty for punctuators.
    pub literal: String,
    /// Whether a line terminator occurs in the trivia.
    pub before_line_feed: bool,
    /// Set together with `Token::Illegal`.
    pub error: Option<DiagnosticMessage>,
}

impl TokenDescriptor {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            location: Location::default(),
            trivia: String::new(),
            literal: String::new(),
            before_line_feed: false,
            error: None,
        }
    }

    pub(crate) fn reset(&mut self, begin: usize, line: u32) {
        self.token = Token::Illegal;
        self.location = Location::empty(begin, line);
        self.trivia.clear();
        self.literal.clear();
        self.before_line_feed = false;
        self.error = None;
    }

    /// The token's source text: its literal when it has one, otherwise
    /// the punctuator spelling.
    pub fn text(&self) -> &str {
        if self.literal.is_empty() {
            self.token.punctuation_text().unwrap_or("")
        } else {
            &self.literal
        }
    }
}
