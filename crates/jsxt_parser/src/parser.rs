//! The transformer.
//!
//! A recursive descent pass over the token stream that copies source text
//! through to the output and rewrites the dialect constructs on the way.
//! There is no syntax tree: every production either passes tokens through
//! (with their leading trivia, so lines and comments survive) or emits
//! replacement text. Class fields and exports are collected along the way
//! and written once the token stream is exhausted.

use std::borrow::Cow;

use jsxt_core::text::Location;
use jsxt_diagnostics::{messages, DiagnosticMessage, Result, TranspileError};
use jsxt_options::TransformOptions;
use jsxt_scanner::{ScanMode, Scanner, Token};
use tracing::trace;

use crate::class::{group_member_records, MemberRecord};
use crate::fragments;
use crate::output::Output;
use crate::utilities::{is_legal_literal_begin, LiteralContext};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 512;

/// One transform of one source text.
pub struct Parser<'p> {
    pub(crate) scanner: Scanner,
    path: &'p str,
    pub(crate) jsx: bool,
    pub(crate) clean_comment: bool,
    pub(crate) out: Output,
    /// Bracket nesting of the current position.
    pub(crate) level: u32,
    /// Recursion depth across groups, elements and templates.
    depth: u32,
    /// Inside an attribute value; XML elements are refused here.
    pub(crate) in_xml_attribute: bool,
    /// The next `parse_advance` starts the body of a brace-less `if`.
    single_if_body: bool,
    pub(crate) member_records: Vec<MemberRecord>,
    pub(crate) exports: Vec<String>,
    pub(crate) export_default: Option<String>,
    pub(crate) has_export_default: bool,
}

impl<'p> Parser<'p> {
    pub fn new(source: &str, path: &'p str, options: &TransformOptions) -> Self {
        Self {
            scanner: Scanner::new(source, options.jsx, options.remove_comments),
            path,
            jsx: options.jsx,
            clean_comment: options.remove_comments,
            out: Output::new(),
            level: 0,
            depth: 0,
            in_xml_attribute: false,
            single_if_body: false,
            member_records: Vec::new(),
            exports: Vec::new(),
            export_default: None,
            has_export_default: false,
        }
    }

    /// Run the transform to completion.
    pub fn transform(mut self) -> Result<String> {
        self.parse_document()?;
        self.finish_document();
        Ok(self.out.finish())
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    pub(crate) fn token(&self) -> Token {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn peek(&self) -> Token {
        self.scanner.peek()
    }

    /// Advance and emit the new token's trivia.
    pub(crate) fn next(&mut self) -> Token {
        let token = self.scanner.next();
        self.collapse_trivia();
        token
    }

    /// Advance, leaving the trivia on the token.
    #[inline]
    pub(crate) fn next_raw(&mut self) -> Token {
        self.scanner.next()
    }

    /// Advance and emit only the line feeds of the new token's trivia.
    pub(crate) fn next_in_tag(&mut self) -> Token {
        let token = self.scanner.next();
        self.collapse_line_feeds();
        token
    }

    pub(crate) fn collapse_trivia(&mut self) {
        let trivia = self.scanner.take_trivia();
        self.out.push(trivia);
    }

    pub(crate) fn collapse_line_feeds(&mut self) {
        let trivia = self.scanner.take_trivia();
        self.out.push_line_feeds_of(&trivia);
    }

    /// Emit the current token as written.
    pub(crate) fn fetch(&mut self) {
        self.collapse_trivia();
        let text = self.current_text();
        self.out.push(text);
    }

    pub(crate) fn current_text(&self) -> Cow<'static, str> {
        let current = self.scanner.current();
        match current.token.punctuation_text() {
            Some(text) if current.literal.is_empty() => Cow::Borrowed(text),
            _ => Cow::Owned(current.literal.clone()),
        }
    }

    /// Advance and require `token`.
    pub(crate) fn expect_next(&mut self, token: Token) -> Result<()> {
        if self.next() != token {
            return self.expected(token);
        }
        Ok(())
    }

    pub(crate) fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            return self.error(&messages::NESTING_TOO_DEEP, &[]);
        }
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }

    // ========================================================================
    // Errors
    // ========================================================================

    pub(crate) fn error_at<T>(
        &self,
        message: &DiagnosticMessage,
        args: &[&str],
        location: Location,
    ) -> Result<T> {
        Err(TranspileError::new(message, args, location, self.path))
    }

    pub(crate) fn error<T>(&self, message: &DiagnosticMessage, args: &[&str]) -> Result<T> {
        self.error_at(message, args, self.scanner.location())
    }

    /// Fail on the current token. An illegal token reports its scan error.
    pub(crate) fn unexpected<T>(&self) -> Result<T> {
        match self.token() {
            Token::Illegal => {
                let message = self.scanner.error().unwrap_or(messages::INVALID_CHARACTER);
                self.error(&message, &[])
            }
            Token::Eos => self.error(&messages::UNEXPECTED_END_OF_SOURCE, &[]),
            Token::XmlElementTagEnd => {
                let text = format!("</{}>", self.scanner.current().text());
                self.error(&messages::UNEXPECTED_TOKEN_0, &[&text])
            }
            _ => {
                let text = self.scanner.current().text().to_string();
                self.error(&messages::UNEXPECTED_TOKEN_0, &[&text])
            }
        }
    }

    pub(crate) fn expected<T>(&self, token: Token) -> Result<T> {
        match self.token() {
            Token::Illegal | Token::Eos => self.unexpected(),
            _ => self.error(&messages::_0_EXPECTED, &[&token.to_string()]),
        }
    }

    /// Fail with `message` unless the current token carries a scan error.
    pub(crate) fn malformed<T>(&self, message: &DiagnosticMessage) -> Result<T> {
        match self.token() {
            Token::Illegal | Token::Eos => self.unexpected(),
            _ => self.error(message, &[]),
        }
    }

    // ========================================================================
    // Document
    // ========================================================================

    fn parse_document(&mut self) -> Result<()> {
        if self.peek() == Token::ShellHeader {
            self.next_raw();
            self.fetch();
        }
        while self.next() != Token::Eos {
            if self.token() == Token::Export {
                self.parse_export()?;
            } else {
                self.parse_advance()?;
            }
        }
        Ok(())
    }

    /// Emit the deferred class members, then the export assignments.
    fn finish_document(&mut self) {
        let records = std::mem::take(&mut self.member_records);
        for class in group_member_records(records) {
            trace!(class = %class.class_name, members = class.members.len(), "attaching deferred class members");
            self.out.push("\n");
            self.out.push(fragments::ATTACH_MEMBERS_OPEN);
            self.out.push(class.class_name);
            self.out.push(fragments::PROTOTYPE_OPEN);
            for (identifier, expression) in class.members {
                self.out.push(fragments::MEMBER_INDENT);
                self.out.push(identifier);
                self.out.push(": ");
                self.out.push(expression);
                self.out.push(",\n");
            }
            self.out.push(fragments::ATTACH_MEMBERS_CLOSE);
        }

        let exports = std::mem::take(&mut self.exports);
        for name in exports {
            trace!(export = %name, "exporting binding");
            self.out.push("\n");
            self.out.push(fragments::EXPORTS_PREFIX);
            self.out.push(name.clone());
            self.out.push(fragments::BIND_EQ);
            self.out.push(name);
            self.out.push(";");
        }
        if let Some(name) = self.export_default.take() {
            trace!(export = %name, "exporting default binding");
            self.out.push("\n");
            self.out.push(fragments::EXPORTS_DEFAULT);
            self.out.push(fragments::BIND_EQ);
            self.out.push(name);
            self.out.push(";");
        }
    }

    // ========================================================================
    // Statements and expressions
    // ========================================================================

    /// Transform the construct starting at the current token.
    pub(crate) fn parse_advance(&mut self) -> Result<()> {
        self.collapse_trivia();
        let after_single_if = std::mem::take(&mut self.single_if_body);
        match self.token() {
            // Keywords used as object keys.
            Token::Class | Token::If | Token::Import | Token::Export
                if self.peek() == Token::Colon =>
            {
                self.fetch();
                Ok(())
            }
            Token::Class => self.parse_class(),
            Token::If => self.parse_if(),
            Token::Import => self.parse_import(),
            Token::LParen => self.parse_group(Token::RParen),
            Token::LBrack => self.parse_group(Token::RBrack),
            Token::LBrace => self.parse_group(Token::RBrace),
            Token::Command => self.parse_command_string(),
            Token::Div | Token::AssignDiv => {
                let context = LiteralContext {
                    after_single_if,
                    before_line_feed: self.scanner.before_line_feed(),
                };
                if is_legal_literal_begin(self.scanner.prev(), context) {
                    self.parse_regexp()
                } else {
                    self.fetch();
                    Ok(())
                }
            }
            Token::XmlElementTag => self.parse_xml_element(false, after_single_if),
            Token::XmlComment if self.jsx && !self.in_xml_attribute => {
                let comment = self.xml_comment_text(self.scanner.literal());
                self.out.push(comment);
                Ok(())
            }
            Token::Bos
            | Token::Eos
            | Token::ShellHeader
            | Token::Export
            | Token::RParen
            | Token::RBrack
            | Token::RBrace
            | Token::XmlComment
            | Token::XmlElementTagEnd
            | Token::XmlNoIgnoreSpace
            | Token::CommandEnd
            | Token::CommandDataBind
            | Token::CommandDataBindOnce
            | Token::Illegal => self.unexpected(),
            _ => {
                self.fetch();
                Ok(())
            }
        }
    }

    fn parse_if(&mut self) -> Result<()> {
        self.fetch();
        self.expect_next(Token::LParen)?;
        self.parse_group(Token::RParen)?;
        if self.peek() != Token::LBrace {
            self.next();
            self.single_if_body = true;
            self.enter()?;
            self.parse_advance()?;
            self.leave();
        }
        Ok(())
    }

    /// Emit an opener, its balanced interior, and its closer.
    pub(crate) fn parse_group(&mut self, close: Token) -> Result<()> {
        self.fetch();
        self.parse_brace_expression(close)?;
        self.fetch();
        Ok(())
    }

    /// Transform tokens up to the matching `close`, which becomes current.
    pub(crate) fn parse_brace_expression(&mut self, close: Token) -> Result<()> {
        let level = self.level;
        self.enter()?;
        self.level += 1;
        loop {
            let token = self.next();
            if token == close {
                break;
            }
            if token == Token::Eos {
                return self.expected(close);
            }
            self.parse_advance()?;
        }
        self.level -= 1;
        self.leave();
        if self.level != level {
            return self.error(&messages::BRACE_LEVEL_MISMATCH, &[]);
        }
        Ok(())
    }

    /// Re-read the current `/` as a regular expression literal.
    pub(crate) fn parse_regexp(&mut self) -> Result<()> {
        let begin = self.scanner.location().begin;
        if self.scanner.rescan(ScanMode::RegExp, begin) != Token::RegExp {
            let message = self
                .scanner
                .lookahead()
                .error
                .unwrap_or(messages::UNTERMINATED_REGEXP_LITERAL);
            return self.error_at(&message, &[], self.scanner.next_location());
        }
        self.next_raw();
        self.fetch();
        Ok(())
    }

    /// A template with interpolations; the current token is its first
    /// text span, ending at `${`.
    pub(crate) fn parse_command_string(&mut self) -> Result<()> {
        self.enter()?;
        loop {
            self.fetch();
            self.out.push("${");
            if self.next_raw() != Token::LBrace {
                return self.unexpected();
            }
            loop {
                match self.peek() {
                    Token::RBrace => break,
                    Token::Eos => {
                        self.next_raw();
                        return self.error(&messages::UNTERMINATED_TEMPLATE_LITERAL, &[]);
                    }
                    _ => {
                        self.next();
                        self.parse_advance()?;
                    }
                }
            }
            let trivia = self.scanner.take_next_trivia();
            self.out.push(trivia);
            self.out.push("}");
            let resume = self.scanner.next_location().end;
            self.scanner.rescan(ScanMode::TemplateResume, resume);
            match self.next_raw() {
                Token::Command => continue,
                Token::CommandEnd => {
                    self.fetch();
                    break;
                }
                _ => return self.unexpected(),
            }
        }
        self.leave();
        Ok(())
    }

    /// An XML comment as an output comment, or only its line feeds when
    /// comments are stripped.
    pub(crate) fn xml_comment_text(&self, literal: &str) -> String {
        if self.clean_comment {
            return literal.to_string();
        }
        let mut text = String::with_capacity(literal.len() + 7);
        text.push_str(fragments::XML_COMMENT_OPEN);
        text.push_str(literal);
        text.push_str(fragments::XML_COMMENT_CLOSE);
        text
    }
}
