//! Class declarations: deferred fields and `event` members.

use indexmap::IndexMap;
use jsxt_diagnostics::{messages, Result};
use jsxt_scanner::{is_identifier_start, Token};

use crate::fragments;
use crate::parser::Parser;
use crate::utilities::{is_binding_identifier, is_class_member_name, is_legal_literal_begin, LiteralContext};

/// One `name = expression;` field set aside while its class is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    pub class_name: String,
    pub identifier: String,
    pub expression: String,
}

/// The deferred fields of one class, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDataExpression {
    pub class_name: String,
    pub members: IndexMap<String, String>,
}

/// Group records by class, keeping the order classes and fields first
/// appear. A field declared twice keeps its last expression.
pub fn group_member_records(records: Vec<MemberRecord>) -> Vec<MemberDataExpression> {
    let mut classes: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    for record in records {
        classes
            .entry(record.class_name)
            .or_default()
            .insert(record.identifier, record.expression);
    }
    classes
        .into_iter()
        .map(|(class_name, members)| MemberDataExpression { class_name, members })
        .collect()
}

impl<'p> Parser<'p> {
    /// `class [Name] [extends ...] { members }` with `class` current.
    pub(crate) fn parse_class(&mut self) -> Result<()> {
        let statement = self.is_statement_position();
        self.fetch();

        let mut class_name = None;
        let mut token = self.next();
        if is_binding_identifier(token) {
            self.fetch();
            class_name = Some(self.scanner.literal().to_string());
            token = self.next();
        }
        if token == Token::Extends {
            self.fetch();
            loop {
                match self.next() {
                    Token::LBrace => break,
                    Token::Eos => return self.expected(Token::LBrace),
                    _ => self.parse_advance()?,
                }
            }
        } else if token != Token::LBrace {
            return self.expected(Token::LBrace);
        }

        // Fields go on the prototype only for a named top-level declaration.
        let deferred = class_name.filter(|_| statement && self.level == 0 && self.out.capture_depth() == 0);

        self.fetch();
        self.enter()?;
        loop {
            match self.next() {
                Token::RBrace => break,
                Token::Semicolon => self.fetch(),
                Token::Eos => return self.expected(Token::RBrace),
                _ => self.parse_class_member(deferred.as_deref())?,
            }
        }
        self.leave();
        self.fetch();
        Ok(())
    }

    /// A class can only be a declaration where a statement begins.
    fn is_statement_position(&self) -> bool {
        let prev = self.scanner.prev();
        match prev {
            Token::Bos
            | Token::ShellHeader
            | Token::Semicolon
            | Token::LBrace
            | Token::RBrace
            | Token::Export
            | Token::Default => true,
            _ => self.scanner.before_line_feed() && !is_legal_literal_begin(prev, LiteralContext::default()),
        }
    }

    fn parse_class_member(&mut self, deferred: Option<&str>) -> Result<()> {
        // `get() {}`, `static = 1` and the like are plain names.
        let plain_name = matches!(
            self.peek(),
            Token::LParen | Token::Assign | Token::Semicolon | Token::RBrace
        );
        match self.token() {
            Token::Static if !plain_name => {
                self.fetch();
                if self.next() == Token::LBrace {
                    return self.parse_group(Token::RBrace);
                }
                self.parse_class_member(None)
            }
            Token::Get | Token::Set if !plain_name => self.parse_accessor(),
            Token::Async if !plain_name => {
                self.fetch();
                if self.next() == Token::Mul {
                    self.fetch();
                    self.next();
                }
                self.parse_method()
            }
            Token::Event if !plain_name => self.parse_event(),
            Token::Mul => {
                self.fetch();
                self.next();
                self.parse_method()
            }
            Token::LBrack => {
                self.parse_group(Token::RBrack)?;
                match self.peek() {
                    Token::LParen => self.parse_method_rest(),
                    Token::Assign => self.parse_class_field(None),
                    _ => {
                        self.next();
                        self.unexpected()
                    }
                }
            }
            token if is_class_member_name(token) => match self.peek() {
                Token::LParen => {
                    self.fetch();
                    self.parse_method_rest()
                }
                Token::Assign => self.parse_class_field(deferred),
                _ => {
                    self.fetch();
                    Ok(())
                }
            },
            _ => self.unexpected(),
        }
    }

    /// `name(params) { body }` with the name current.
    fn parse_method(&mut self) -> Result<()> {
        match self.token() {
            Token::LBrack => self.parse_group(Token::RBrack)?,
            token if is_class_member_name(token) => self.fetch(),
            _ => return self.unexpected(),
        }
        self.parse_method_rest()
    }

    fn parse_method_rest(&mut self) -> Result<()> {
        self.expect_next(Token::LParen)?;
        self.parse_group(Token::RParen)?;
        self.expect_next(Token::LBrace)?;
        self.parse_group(Token::RBrace)
    }

    /// `get name() {}` or `set name(value) {}`.
    fn parse_accessor(&mut self) -> Result<()> {
        let setter = self.token() == Token::Set;
        self.fetch();
        match self.next() {
            Token::LBrack => self.parse_group(Token::RBrack)?,
            token if is_class_member_name(token) => self.fetch(),
            _ => return self.error(&messages::INVALID_ACCESSOR_DEFINITION, &[]),
        }
        if self.next() != Token::LParen {
            return self.error(&messages::INVALID_ACCESSOR_DEFINITION, &[]);
        }
        if setter == (self.peek() == Token::RParen) {
            return self.error(&messages::INVALID_ACCESSOR_DEFINITION, &[]);
        }
        self.parse_group(Token::RParen)?;
        self.expect_next(Token::LBrace)?;
        self.parse_group(Token::RBrace)
    }

    /// `name = expression;` with the name current.
    ///
    /// A deferred field leaves only its line feeds in place and records the
    /// initializer for the prototype attachment after the document.
    fn parse_class_field(&mut self, deferred: Option<&str>) -> Result<()> {
        let identifier = self.scanner.current().text().to_string();
        let Some(class_name) = deferred else {
            if self.token() != Token::RBrack {
                self.fetch();
            }
            self.next();
            self.fetch();
            return self.parse_field_initializer(&identifier, false);
        };

        self.next_raw();
        let lead = self.scanner.take_trivia();
        self.out.push_line_feeds_of(&lead);
        self.out.begin_capture();
        let initializer = self.parse_field_initializer(&identifier, true);
        let expression = self.out.end_capture();
        initializer?;
        self.out.push_line_feeds_of(&expression);

        let expression = expression.trim_end_matches(';').trim().to_string();
        self.member_records.push(MemberRecord {
            class_name: class_name.to_string(),
            identifier,
            expression,
        });
        Ok(())
    }

    /// Everything after `=` up to and including the terminating `;`.
    /// A deferred initializer keeps only the line feeds of the trivia
    /// before `;`, so a trailing comment cannot swallow the member separator.
    fn parse_field_initializer(&mut self, identifier: &str, deferred: bool) -> Result<()> {
        loop {
            let token = self.next_raw();
            if token == Token::Semicolon && deferred {
                self.collapse_line_feeds();
            } else {
                self.collapse_trivia();
            }
            match token {
                Token::Semicolon => {
                    self.fetch();
                    return Ok(());
                }
                Token::RBrace | Token::Eos => {
                    return self.error(&messages::MISSING_SEMICOLON_AFTER_CLASS_FIELD, &[identifier]);
                }
                _ => self.parse_advance()?,
            }
        }
    }

    /// `event onName[, onOther];` expands to a getter, a setter and a
    /// trigger method per event.
    fn parse_event(&mut self) -> Result<()> {
        loop {
            let token = self.next();
            let name = self.scanner.literal().to_string();
            let valid = token == Token::Identifier
                && name.strip_prefix(fragments::EVENT_PREFIX).is_some_and(|rest| {
                    rest.chars().next().is_some_and(is_identifier_start)
                });
            if !valid {
                if token == Token::Identifier || token.is_keyword() {
                    return self.error(&messages::INVALID_EVENT_NAME_0, &[&name]);
                }
                return self.unexpected();
            }
            let event = &name[fragments::EVENT_PREFIX.len()..];
            for fragment in [
                fragments::EVENT_GETTER_OPEN,
                event,
                fragments::EVENT_GETTER_BODY,
                event,
                fragments::EVENT_SETTER_OPEN,
                event,
                fragments::EVENT_SETTER_BODY,
                event,
                fragments::EVENT_TRIGGER_OPEN,
                event,
                fragments::EVENT_TRIGGER_BODY,
                event,
                fragments::EVENT_TRIGGER_CLOSE,
            ] {
                self.out.push(fragment.to_string());
            }
            match self.next() {
                Token::Comma => continue,
                Token::Semicolon => return Ok(()),
                _ => return self.expected(Token::Semicolon),
            }
        }
    }
}
