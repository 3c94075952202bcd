//! The dialect scanner.
//!
//! Converts source text into tokens on demand. The scanner keeps two
//! descriptors, `current` and `next`, so the parser always has one token of
//! lookahead. Rescans (`scan_xml_content`, `scan_regexp`,
//! `scan_command_string`) reposition the cursor and overwrite `next`.

use crate::char_codes::*;
use crate::token::{Token, TokenDescriptor};
use jsxt_core::text::Location;
use jsxt_diagnostics::{messages, DiagnosticMessage};

/// The four ways the scanner can read text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Ordinary script tokens.
    Script,
    /// Text and markup between an element's open and close tags.
    XmlContent { ignore_space: bool },
    /// A regular expression literal starting at its `/`.
    RegExp,
    /// Template text following an interpolation's closing brace.
    TemplateResume,
}

/// The scanner converts dialect source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Cursor into `text`.
    pos: usize,
    /// Zero-based line of `pos`.
    line: u32,
    current: TokenDescriptor,
    next: TokenDescriptor,
    prev: Token,
    /// Drop comment text from trivia, keeping only its line feeds.
    clean_comment: bool,
    /// Recognise `%{` and `%%{` in script mode.
    dialect: bool,
}

impl Scanner {
    /// Create a scanner and buffer the first token as lookahead.
    pub fn new(text: &str, dialect: bool, clean_comment: bool) -> Self {
        let mut scanner = Self {
            text: text.chars().collect(),
            pos: 0,
            line: 0,
            current: TokenDescriptor::new(Token::Bos),
            next: TokenDescriptor::new(Token::Bos),
            prev: Token::Bos,
            clean_comment,
            dialect,
        };
        scanner.skip_byte_order_mark();
        if !scanner.scan_shell_header() {
            scanner.scan();
        }
        scanner
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Advance to the next token and return it.
    pub fn next(&mut self) -> Token {
        self.prev = self.current.token;
        std::mem::swap(&mut self.current, &mut self.next);
        self.scan();
        self.current.token
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.current.token
    }

    /// The token after `token()`, without consuming it.
    #[inline]
    pub fn peek(&self) -> Token {
        self.next.token
    }

    /// The token consumed before `token()`.
    #[inline]
    pub fn prev(&self) -> Token {
        self.prev
    }

    #[inline]
    pub fn current(&self) -> &TokenDescriptor {
        &self.current
    }

    #[inline]
    pub fn lookahead(&self) -> &TokenDescriptor {
        &self.next
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.current.location
    }

    #[inline]
    pub fn next_location(&self) -> Location {
        self.next.location
    }

    #[inline]
    pub fn literal(&self) -> &str {
        &self.current.literal
    }

    #[inline]
    pub fn trivia(&self) -> &str {
        &self.current.trivia
    }

    /// Move the current token's trivia out, leaving it empty.
    pub fn take_trivia(&mut self) -> String {
        std::mem::take(&mut self.current.trivia)
    }

    /// Move the lookahead token's trivia out, leaving it empty.
    pub fn take_next_trivia(&mut self) -> String {
        std::mem::take(&mut self.next.trivia)
    }

    #[inline]
    pub fn before_line_feed(&self) -> bool {
        self.current.before_line_feed
    }

    #[inline]
    pub fn error(&self) -> Option<DiagnosticMessage> {
        self.current.error
    }

    // ========================================================================
    // Cursor
    // ========================================================================

    #[inline]
    fn c0(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn c0_is(&self, ch: char) -> bool {
        self.c0() == Some(ch)
    }

    fn advance(&mut self) {
        if let Some(&ch) = self.text.get(self.pos) {
            if ch == LINE_FEED {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_by(&mut self, count: usize) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn back(&mut self) {
        if self.pos > 0 {
            self.pos -= 1;
            if self.text[self.pos] == LINE_FEED {
                self.line -= 1;
            }
        }
    }

    /// Move the cursor to `pos`, adjusting the line counter by the line
    /// feeds crossed. Returns `false` when `pos` lies beyond the text.
    pub fn set_pos(&mut self, pos: usize) -> bool {
        if pos > self.text.len() {
            return false;
        }
        while self.pos < pos {
            self.advance();
        }
        while self.pos > pos {
            self.back();
        }
        true
    }

    fn restore(&mut self, pos: usize, line: u32) {
        self.pos = pos;
        self.line = line;
    }

    fn push_char(&mut self) {
        if let Some(ch) = self.c0() {
            self.next.literal.push(ch);
            self.advance();
        }
    }

    fn illegal(&mut self, message: DiagnosticMessage) -> Token {
        self.next.error = Some(message);
        Token::Illegal
    }

    // ========================================================================
    // Mode entry points
    // ========================================================================

    /// Rescan the lookahead slot from `pos` in the given mode.
    pub fn rescan(&mut self, mode: ScanMode, pos: usize) -> Token {
        match mode {
            ScanMode::Script => {
                if !self.begin_rescan(pos) {
                    return Token::Illegal;
                }
                self.scan();
                self.next.token
            }
            ScanMode::XmlContent { ignore_space } => self.scan_xml_content(ignore_space, pos),
            ScanMode::RegExp => self.scan_regexp(pos),
            ScanMode::TemplateResume => self.scan_command_string(pos),
        }
    }

    fn begin_rescan(&mut self, pos: usize) -> bool {
        if !self.set_pos(pos) {
            self.next.reset(self.pos, self.line);
            self.next.token = self.illegal(messages::UNEXPECTED_END_OF_SOURCE);
            return false;
        }
        self.next.reset(self.pos, self.line);
        true
    }

    fn finish_rescan(&mut self, token: Token) -> Token {
        self.next.location.end = self.pos;
        self.next.token = token;
        token
    }

    /// Scan element content starting at `pos`.
    pub fn scan_xml_content(&mut self, ignore_space: bool, pos: usize) -> Token {
        if !self.begin_rescan(pos) {
            return Token::Illegal;
        }
        let token = match self.c0() {
            None => Token::Eos,
            Some('<') => {
                let (start, line) = (self.pos, self.line);
                match self.scan_less_than() {
                    token @ (Token::XmlComment
                    | Token::XmlElementTag
                    | Token::XmlElementTagEnd
                    | Token::Illegal) => token,
                    _ => {
                        // A `<` that opens nothing is text.
                        self.restore(start, line);
                        self.next.literal.clear();
                        self.push_char();
                        Token::String
                    }
                }
            }
            Some('$') => {
                self.advance();
                if self.c0_is('{') {
                    Token::Command
                } else {
                    self.next.literal.push('$');
                    Token::String
                }
            }
            Some('%') => {
                self.advance();
                if self.c0_is('{') {
                    Token::CommandDataBindOnce
                } else if self.c0_is('%') && self.char_at(1) == Some('{') {
                    self.advance();
                    Token::CommandDataBind
                } else {
                    self.next.literal.push('%');
                    Token::String
                }
            }
            Some('@') => {
                self.advance();
                if self.c0_is('@') {
                    self.advance();
                    Token::XmlNoIgnoreSpace
                } else {
                    self.next.literal.push('@');
                    Token::String
                }
            }
            Some(_) => self.scan_xml_text(ignore_space),
        };
        self.finish_rescan(token)
    }

    /// Scan a regular expression literal whose `/` is at `pos`.
    pub fn scan_regexp(&mut self, pos: usize) -> Token {
        if !self.begin_rescan(pos) {
            return Token::Illegal;
        }
        let token = self.scan_regexp_body();
        self.finish_rescan(token)
    }

    /// Resume template text at `pos`, just after an interpolation's `}`.
    ///
    /// Returns `Command` at the next `${` (the `{` is left for the script
    /// scanner) or `CommandEnd` after the closing backtick.
    pub fn scan_command_string(&mut self, pos: usize) -> Token {
        if !self.begin_rescan(pos) {
            return Token::Illegal;
        }
        let token = self.scan_template_span();
        self.finish_rescan(token)
    }

    // ========================================================================
    // Script mode
    // ========================================================================

    fn skip_byte_order_mark(&mut self) {
        if matches!(self.c0(), Some(BYTE_ORDER_MARK | REVERSED_BYTE_ORDER_MARK)) {
            self.advance();
        }
    }

    /// A leading `#!` line becomes the one-time shell header token.
    fn scan_shell_header(&mut self) -> bool {
        if !(self.c0_is('#') && self.char_at(1) == Some('!')) {
            return false;
        }
        self.next.reset(self.pos, self.line);
        while let Some(ch) = self.c0() {
            if is_line_break(ch) {
                break;
            }
            self.push_char();
        }
        self.next.location.end = self.pos;
        self.next.token = Token::ShellHeader;
        true
    }

    /// Scan the next significant token into the lookahead slot.
    fn scan(&mut self) {
        self.next.reset(self.pos, self.line);
        let token = loop {
            self.next.location = Location::empty(self.pos, self.line);
            let Some(ch) = self.c0() else {
                break Token::Eos;
            };
            match ch {
                '/' if self.char_at(1) == Some('/') => self.skip_single_line_comment(),
                '/' if self.char_at(1) == Some('*') => {
                    if let Err(message) = self.skip_multi_line_comment() {
                        break self.illegal(message);
                    }
                }
                ch if is_line_break(ch) => {
                    self.next.trivia.push(ch);
                    self.next.before_line_feed = true;
                    self.advance();
                }
                ch if is_white_space_single_line(ch) => {
                    self.next.trivia.push(ch);
                    self.advance();
                }
                ch => break self.scan_token(ch),
            }
        };
        self.next.location.end = self.pos;
        self.next.token = token;
    }

    fn skip_single_line_comment(&mut self) {
        while let Some(ch) = self.c0() {
            if is_line_break(ch) {
                break;
            }
            if !self.clean_comment {
                self.next.trivia.push(ch);
            }
            self.advance();
        }
    }

    fn skip_multi_line_comment(&mut self) -> Result<(), DiagnosticMessage> {
        if !self.clean_comment {
            self.next.trivia.push_str("/*");
        }
        self.advance_by(2);
        loop {
            match self.c0() {
                None => return Err(messages::UNTERMINATED_COMMENT),
                Some('*') if self.char_at(1) == Some('/') => {
                    if !self.clean_comment {
                        self.next.trivia.push_str("*/");
                    }
                    self.advance_by(2);
                    return Ok(());
                }
                Some(ch) => {
                    if is_line_break(ch) {
                        self.next.before_line_feed = true;
                    }
                    if !self.clean_comment || ch == LINE_FEED {
                        self.next.trivia.push(ch);
                    }
                    self.advance();
                }
            }
        }
    }

    /// Consume one character and return `token`.
    fn select(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    /// Consume one character, then `then` if the following one is `ch`.
    fn select_if(&mut self, ch: char, then: Token, otherwise: Token) -> Token {
        self.advance();
        if self.c0_is(ch) {
            self.advance();
            then
        } else {
            otherwise
        }
    }

    fn scan_token(&mut self, ch: char) -> Token {
        match ch {
            '(' => self.select(Token::LParen),
            ')' => self.select(Token::RParen),
            '[' => self.select(Token::LBrack),
            ']' => self.select(Token::RBrack),
            '{' => self.select(Token::LBrace),
            '}' => self.select(Token::RBrace),
            ':' => self.select(Token::Colon),
            ';' => self.select(Token::Semicolon),
            ',' => self.select(Token::Comma),
            '~' => self.select(Token::BitNot),
            '@' => self.select(Token::At),
            '"' | '\'' => self.scan_string(ch),
            '`' => {
                self.push_char();
                match self.scan_template_span() {
                    Token::CommandEnd => Token::String,
                    token => token,
                }
            }
            '%' => self.scan_percent(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => {
                self.advance();
                match self.c0() {
                    Some('>') => self.select(Token::Arrow),
                    Some('=') => self.select_if('=', Token::EqStrict, Token::Eq),
                    _ => Token::Assign,
                }
            }
            '!' => {
                self.advance();
                if self.c0_is('=') {
                    self.select_if('=', Token::NeStrict, Token::Ne)
                } else {
                    Token::Not
                }
            }
            '+' => {
                self.advance();
                match self.c0() {
                    Some('+') => self.select(Token::Inc),
                    Some('=') => self.select(Token::AssignAdd),
                    _ => Token::Add,
                }
            }
            '-' => {
                self.advance();
                match self.c0() {
                    Some('-') => self.select(Token::Dec),
                    Some('=') => self.select(Token::AssignSub),
                    _ => Token::Sub,
                }
            }
            '*' => {
                self.advance();
                match self.c0() {
                    Some('*') => self.select_if('=', Token::AssignPow, Token::Pow),
                    Some('=') => self.select(Token::AssignMul),
                    _ => Token::Mul,
                }
            }
            '/' => self.select_if('=', Token::AssignDiv, Token::Div),
            '&' => {
                self.advance();
                match self.c0() {
                    Some('&') => self.select_if('=', Token::AssignAnd, Token::And),
                    Some('=') => self.select(Token::AssignBitAnd),
                    _ => Token::BitAnd,
                }
            }
            '|' => {
                self.advance();
                match self.c0() {
                    Some('|') => self.select_if('=', Token::AssignOr, Token::Or),
                    Some('=') => self.select(Token::AssignBitOr),
                    _ => Token::BitOr,
                }
            }
            '^' => self.select_if('=', Token::AssignBitXor, Token::BitXor),
            '.' => {
                if self.char_at(1).is_some_and(is_digit) {
                    self.scan_number()
                } else if self.char_at(1) == Some('.') && self.char_at(2) == Some('.') {
                    self.advance_by(3);
                    Token::Ellipsis
                } else {
                    self.select(Token::Period)
                }
            }
            '?' => {
                self.advance();
                match self.c0() {
                    Some('?') => self.select_if('=', Token::AssignNullish, Token::Nullish),
                    Some('.') if !self.char_at(1).is_some_and(is_digit) => {
                        self.select(Token::OptionalChain)
                    }
                    _ => Token::Conditional,
                }
            }
            '#' if self.char_at(1).is_some_and(is_identifier_start) => {
                self.push_char();
                self.scan_identifier()
            }
            ch if is_digit(ch) => self.scan_number(),
            ch if is_identifier_start(ch) => self.scan_identifier(),
            _ => {
                self.advance();
                self.illegal(messages::INVALID_CHARACTER)
            }
        }
    }

    /// `%`, `%=`, and with the dialect enabled `%{` and `%%{`.
    ///
    /// The opening brace is not consumed; it is scanned as its own token.
    fn scan_percent(&mut self) -> Token {
        if self.dialect {
            if self.char_at(1) == Some('{') {
                return self.select(Token::CommandDataBindOnce);
            }
            if self.char_at(1) == Some('%') && self.char_at(2) == Some('{') {
                self.advance_by(2);
                return Token::CommandDataBind;
            }
        }
        self.select_if('=', Token::AssignMod, Token::Mod)
    }

    /// `<` may open a comparison, a shift, an XML comment, or a tag.
    fn scan_less_than(&mut self) -> Token {
        self.advance();
        match self.c0() {
            Some('!') if self.char_at(1) == Some('-') && self.char_at(2) == Some('-') => {
                self.advance_by(3);
                self.scan_xml_comment()
            }
            Some(ch) if is_identifier_start(ch) => {
                self.scan_xml_tag_name();
                Token::XmlElementTag
            }
            Some('/') if self.char_at(1).is_some_and(is_identifier_start) => {
                let (start, line) = (self.pos, self.line);
                self.advance();
                self.scan_xml_tag_name();
                if self.c0_is('>') {
                    self.select(Token::XmlElementTagEnd)
                } else {
                    self.restore(start, line);
                    self.next.literal.clear();
                    Token::Lt
                }
            }
            Some('=') => self.select(Token::Lte),
            Some('<') => self.select_if('=', Token::AssignShl, Token::Shl),
            _ => Token::Lt,
        }
    }

    fn scan_greater_than(&mut self) -> Token {
        self.advance();
        match self.c0() {
            Some('=') => self.select(Token::Gte),
            Some('>') => {
                self.advance();
                match self.c0() {
                    Some('=') => self.select(Token::AssignSar),
                    Some('>') => self.select_if('=', Token::AssignShr, Token::Shr),
                    _ => Token::Sar,
                }
            }
            _ => Token::Gt,
        }
    }

    /// The body of `<!-- ... -->`, after the opener.
    fn scan_xml_comment(&mut self) -> Token {
        loop {
            match self.c0() {
                None => return self.illegal(messages::UNTERMINATED_XML_COMMENT),
                Some('-') if self.char_at(1) == Some('-') && self.char_at(2) == Some('>') => {
                    self.advance_by(3);
                    return Token::XmlComment;
                }
                Some(ch) => {
                    if !self.clean_comment {
                        // Keeps `*/` out of the emitted block comment.
                        self.next.literal.push(if ch == '*' { 'x' } else { ch });
                    } else if ch == LINE_FEED {
                        self.next.literal.push(ch);
                    }
                    self.advance();
                }
            }
        }
    }

    /// `name(.name)*(:name(.name)*)?`, first character already checked.
    fn scan_xml_tag_name(&mut self) {
        self.scan_xml_dotted_name();
        if self.c0_is(':') && self.char_at(1).is_some_and(is_identifier_start) {
            self.push_char();
            self.scan_xml_dotted_name();
        }
    }

    fn scan_xml_dotted_name(&mut self) {
        loop {
            self.scan_identifier_chars();
            if self.c0_is('.') && self.char_at(1).is_some_and(is_identifier_start) {
                self.push_char();
            } else {
                break;
            }
        }
    }

    fn scan_identifier_chars(&mut self) {
        while self.c0().is_some_and(is_identifier_part) {
            self.push_char();
        }
    }

    fn scan_identifier(&mut self) -> Token {
        self.scan_identifier_chars();
        // After `.` every word is a property name.
        if matches!(self.current.token, Token::Period | Token::OptionalChain) {
            return Token::Identifier;
        }
        Token::from_keyword(&self.next.literal).unwrap_or(Token::Identifier)
    }

    fn scan_string(&mut self, quote: char) -> Token {
        self.push_char();
        loop {
            match self.c0() {
                None => return self.illegal(messages::UNTERMINATED_STRING_LITERAL),
                Some(ch) if ch == quote => {
                    self.push_char();
                    return Token::String;
                }
                Some(ch) if is_line_break(ch) => {
                    return self.illegal(messages::UNTERMINATED_STRING_LITERAL);
                }
                Some('\\') => {
                    self.advance();
                    if self.c0().is_none() {
                        return self.illegal(messages::UNTERMINATED_STRING_LITERAL);
                    }
                    if let Err(message) = self.scan_escape() {
                        return self.illegal(message);
                    }
                }
                Some(_) => self.push_char(),
            }
        }
    }

    /// One escape sequence after its backslash. `\u` takes exactly four
    /// hex digits.
    fn scan_escape(&mut self) -> Result<(), DiagnosticMessage> {
        self.next.literal.push('\\');
        match self.c0() {
            Some('u') => {
                if !(1..=4).all(|i| self.char_at(i).is_some_and(is_hex_digit)) {
                    return Err(messages::INVALID_UNICODE_ESCAPE);
                }
                for _ in 0..5 {
                    self.push_char();
                }
            }
            Some(CARRIAGE_RETURN) if self.char_at(1) == Some(LINE_FEED) => {
                self.push_char();
                self.push_char();
            }
            _ => self.push_char(),
        }
        Ok(())
    }

    /// Template text up to `${` or the closing backtick.
    fn scan_template_span(&mut self) -> Token {
        loop {
            match self.c0() {
                None => return self.illegal(messages::UNTERMINATED_TEMPLATE_LITERAL),
                Some('`') => {
                    self.push_char();
                    return Token::CommandEnd;
                }
                Some('\\') => {
                    self.advance();
                    if self.c0().is_none() {
                        return self.illegal(messages::UNTERMINATED_TEMPLATE_LITERAL);
                    }
                    if let Err(message) = self.scan_escape() {
                        return self.illegal(message);
                    }
                }
                Some('$') if self.char_at(1) == Some('{') => {
                    self.advance();
                    return Token::Command;
                }
                Some(_) => self.push_char(),
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let scanned = if self.c0_is('.') {
            self.scan_fraction_and_exponent()
        } else if self.c0_is('0') {
            self.push_char();
            match self.c0() {
                Some('x' | 'X') => self.scan_radix_digits(is_hex_digit),
                Some('b' | 'B') => self.scan_radix_digits(is_binary_digit),
                Some(ch) if is_octal_digit(ch) => {
                    while self.c0().is_some_and(is_octal_digit) {
                        self.push_char();
                    }
                    Ok(())
                }
                _ => self.scan_fraction_and_exponent(),
            }
        } else {
            self.scan_decimal_digits();
            self.scan_fraction_and_exponent()
        };
        match scanned {
            Err(message) => self.illegal(message),
            // `3abc` and `3.4.5` are single malformed numbers.
            Ok(()) if self.c0().is_some_and(|ch| ch == '.' || is_identifier_part(ch)) => {
                self.illegal(messages::MALFORMED_NUMBER)
            }
            Ok(()) => Token::Number,
        }
    }

    fn scan_decimal_digits(&mut self) {
        while self.c0().is_some_and(is_digit) {
            self.push_char();
        }
    }

    /// Digits after a `0x` or `0b` prefix, prefix letter included.
    fn scan_radix_digits(&mut self, is_radix_digit: fn(char) -> bool) -> Result<(), DiagnosticMessage> {
        self.push_char();
        if !self.c0().is_some_and(is_radix_digit) {
            return Err(messages::DIGIT_EXPECTED);
        }
        while self.c0().is_some_and(is_radix_digit) {
            self.push_char();
        }
        Ok(())
    }

    fn scan_fraction_and_exponent(&mut self) -> Result<(), DiagnosticMessage> {
        if self.c0_is('.') {
            self.push_char();
            self.scan_decimal_digits();
        }
        if matches!(self.c0(), Some('e' | 'E')) {
            self.push_char();
            if matches!(self.c0(), Some('+' | '-')) {
                self.push_char();
            }
            if !self.c0().is_some_and(is_digit) {
                return Err(messages::DIGIT_EXPECTED);
            }
            self.scan_decimal_digits();
        }
        Ok(())
    }

    // ========================================================================
    // Regular expression mode
    // ========================================================================

    fn scan_regexp_body(&mut self) -> Token {
        if !self.c0_is('/') || matches!(self.char_at(1), Some('/' | '*')) {
            return self.illegal(messages::UNTERMINATED_REGEXP_LITERAL);
        }
        self.push_char();
        let mut in_class = false;
        loop {
            match self.c0() {
                None => return self.illegal(messages::UNTERMINATED_REGEXP_LITERAL),
                Some(ch) if is_line_break(ch) => {
                    return self.illegal(messages::UNTERMINATED_REGEXP_LITERAL);
                }
                Some('\\') => {
                    self.push_char();
                    match self.c0() {
                        Some(ch) if !is_line_break(ch) => self.push_char(),
                        _ => return self.illegal(messages::UNTERMINATED_REGEXP_LITERAL),
                    }
                }
                Some('[') => {
                    in_class = true;
                    self.push_char();
                }
                Some(']') => {
                    in_class = false;
                    self.push_char();
                }
                Some('/') if !in_class => {
                    self.push_char();
                    break;
                }
                Some(_) => self.push_char(),
            }
        }
        let mut seen = [false; REGEXP_FLAGS.len()];
        while let Some(ch) = self.c0() {
            match REGEXP_FLAGS.find(ch) {
                Some(index) if !seen[index] => {
                    seen[index] = true;
                    self.push_char();
                }
                Some(_) => return self.illegal(messages::INVALID_REGEXP_FLAGS),
                None if is_identifier_part(ch) => {
                    return self.illegal(messages::INVALID_REGEXP_FLAGS);
                }
                None => break,
            }
        }
        Token::RegExp
    }

    // ========================================================================
    // XML content mode
    // ========================================================================

    /// A run of element text up to the next `<`, `$`, `%` or `@`.
    ///
    /// The literal is ready to sit inside a double-quoted string. Every line
    /// feed consumed is copied to the trivia so the caller can keep lines.
    fn scan_xml_text(&mut self, ignore_space: bool) -> Token {
        while let Some(ch) = self.c0() {
            match ch {
                '<' | '$' | '%' | '@' => break,
                ch if ignore_space && is_xml_space(ch) => {
                    while let Some(ch) = self.c0() {
                        if !is_xml_space(ch) {
                            break;
                        }
                        if ch == LINE_FEED {
                            self.next.trivia.push(LINE_FEED);
                        }
                        self.advance();
                    }
                    self.next.literal.push(' ');
                }
                '\\' => {
                    self.advance();
                    match self.c0() {
                        None => self.next.literal.push_str("\\\\"),
                        Some(ch) if is_line_break(ch) => {
                            // Line continuation.
                            if ch == CARRIAGE_RETURN && self.char_at(1) == Some(LINE_FEED) {
                                self.advance();
                            }
                            if self.c0_is(LINE_FEED) {
                                self.next.trivia.push(LINE_FEED);
                            }
                            self.advance();
                        }
                        Some(_) => {
                            if let Err(message) = self.scan_escape() {
                                return self.illegal(message);
                            }
                        }
                    }
                }
                '"' => {
                    self.next.literal.push_str("\\\"");
                    self.advance();
                }
                ch if is_line_break(ch) => {
                    if ch == CARRIAGE_RETURN && self.char_at(1) == Some(LINE_FEED) {
                        self.advance();
                    }
                    if self.c0_is(LINE_FEED) {
                        self.next.trivia.push(LINE_FEED);
                    }
                    self.next.literal.push_str("\\n");
                    self.advance();
                }
                _ => self.push_char(),
            }
        }
        Token::String
    }
}

/// Check if a character can start an identifier.
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_ascii_alphanumeric() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}
