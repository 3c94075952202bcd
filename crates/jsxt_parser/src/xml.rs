//! XML element compilation.
//!
//! An element in expression position compiles to a descriptor literal:
//!
//! ```text
//! <a b=1>text</a>      {t:0,v:["a",[[["b"],0,1]],[{t:2,v:"text"}]]}
//! <ns:b/>              {t:1,v:["ns","b",[],[]]}
//! <vx:Button x=1/>     __vx(Button,[[["x"],0,1]])
//! ```

use jsxt_core::collections::FxHashSet;
use jsxt_diagnostics::{messages, Result};
use jsxt_scanner::{ScanMode, Token};

use crate::fragments;
use crate::parser::Parser;
use crate::utilities::{is_binding_identifier, is_legal_literal_begin, is_property_name, is_unary_prefix, LiteralContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagForm {
    /// `<name>`
    Element,
    /// `<prefix:name>`
    Namespaced,
    /// `<vx:Name>`, a direct component call.
    Component,
}

/// Children collected between the open and close tags.
struct Children {
    /// Coalesced text not yet emitted.
    text: String,
    /// Line feeds and comments waiting to follow the next separator.
    gap: String,
    first: bool,
    ignore_space: bool,
}

impl Children {
    fn new() -> Self {
        Self {
            text: String::new(),
            gap: String::new(),
            first: true,
            ignore_space: true,
        }
    }
}

/// The whitespace policy for text children.
///
/// With `ignore_space` every run of blank characters becomes one space and
/// text made only of blanks is dropped. Otherwise text is kept verbatim
/// unless it is empty.
pub fn normalize_xml_text(text: &str, ignore_space: bool) -> Option<String> {
    if !ignore_space {
        return (!text.is_empty()).then(|| text.to_string());
    }
    if text.chars().all(|ch| ch == ' ') {
        return None;
    }
    let mut normalized = String::with_capacity(text.len());
    let mut last_space = false;
    for ch in text.chars() {
        if ch == ' ' {
            if !last_space {
                normalized.push(' ');
            }
            last_space = true;
        } else {
            normalized.push(ch);
            last_space = false;
        }
    }
    Some(normalized)
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text)
}

impl<'p> Parser<'p> {
    /// Compile the element whose start tag is the current token, or pass
    /// `<name` through as a comparison when no literal can start here.
    pub(crate) fn parse_xml_element(&mut self, inline: bool, after_single_if: bool) -> Result<()> {
        let literal_position = inline
            || is_legal_literal_begin(
                self.scanner.prev(),
                LiteralContext {
                    after_single_if,
                    before_line_feed: self.scanner.before_line_feed(),
                },
            );
        if !self.jsx || !literal_position || (!inline && matches!(self.peek(), Token::Period | Token::Colon)) {
            self.out.push("<");
            self.fetch();
            return Ok(());
        }
        if self.in_xml_attribute {
            return self.error(&messages::XML_NOT_ALLOWED_IN_ATTRIBUTE, &[]);
        }

        self.enter()?;
        self.collapse_line_feeds();
        let tag_name = self.scanner.literal().to_string();
        let form = match tag_name.split_once(':') {
            Some((prefix, suffix)) if prefix == fragments::COMPONENT_MARKER => {
                self.out.push(fragments::COMPONENT_CALL_OPEN);
                self.out.push(suffix.to_string());
                self.out.push(",");
                TagForm::Component
            }
            Some((prefix, suffix)) => {
                self.out.push(fragments::NAMESPACED_ELEMENT_OPEN);
                self.out.push(quoted(prefix));
                self.out.push(",");
                self.out.push(quoted(suffix));
                self.out.push(",");
                TagForm::Namespaced
            }
            None => {
                self.out.push(fragments::ELEMENT_OPEN);
                self.out.push(quoted(&tag_name));
                self.out.push(",");
                TagForm::Element
            }
        };

        let vdata = self.parse_xml_attributes()?;

        match self.token() {
            Token::Div => {
                if form != TagForm::Component {
                    self.out.push(fragments::EMPTY_CHILDREN);
                }
                self.next_in_tag();
                if !self.close_tag_bracket() {
                    return self.expected(Token::Gt);
                }
            }
            _ if self.close_tag_bracket() => {
                if form == TagForm::Component {
                    let name = tag_name.split_once(':').map_or(tag_name.as_str(), |(_, suffix)| suffix);
                    return self.error(&messages::COMPONENT_0_CANNOT_HAVE_CHILDREN, &[name]);
                }
                let begin = self.scanner.location().begin + 1;
                self.parse_xml_children(&tag_name, begin)?;
            }
            _ => return self.unexpected(),
        }

        if let Some(vdata) = vdata {
            self.out.push(",");
            self.out.push(vdata);
        }
        self.out.push(match form {
            TagForm::Component => ")",
            TagForm::Element | TagForm::Namespaced => fragments::ELEMENT_CLOSE,
        });
        self.leave();
        Ok(())
    }

    /// Accept a `>` ending a tag. A longer token such as `>>` is split and
    /// scanning resumes after its first character.
    fn close_tag_bracket(&mut self) -> bool {
        match self.token() {
            Token::Gt => true,
            Token::Gte | Token::Sar | Token::Shr | Token::AssignSar | Token::AssignShr => {
                let resume = self.scanner.location().begin + 1;
                self.scanner.rescan(ScanMode::Script, resume);
                true
            }
            _ => false,
        }
    }

    /// Offset just past the `>` that ended the element just compiled.
    fn element_end(&self) -> usize {
        let location = self.scanner.location();
        match self.token() {
            Token::XmlElementTagEnd => location.end,
            _ => location.begin + 1,
        }
    }

    /// The attribute list up to the token that ends the start tag, which is
    /// left current. Returns the captured `vdata` entry.
    fn parse_xml_attributes(&mut self) -> Result<Option<String>> {
        let mut names = FxHashSet::default();
        let mut vdata = None;
        let mut first = true;
        self.out.push("[");
        let mut token = self.next_raw();
        while is_property_name(token) {
            if self.scanner.trivia().is_empty() {
                return self.error(&messages::ATTRIBUTES_MUST_BE_SEPARATED, &[]);
            }
            self.collapse_line_feeds();

            let is_vdata = self.scanner.literal() == fragments::VDATA && self.peek() != Token::Period;
            if is_vdata {
                self.out.begin_capture();
            } else if !std::mem::replace(&mut first, false) {
                self.out.push(",");
            }

            let mut path = vec![self.scanner.literal().to_string()];
            while self.peek() == Token::Period {
                self.next_in_tag();
                if !is_property_name(self.next_in_tag()) {
                    return self.unexpected();
                }
                path.push(self.scanner.literal().to_string());
            }
            let name = path.join(".");
            if !names.insert(name.clone()) {
                return self.error(&messages::DUPLICATE_ATTRIBUTE_0, &[&name]);
            }

            self.out.push("[[");
            let segments: Vec<String> = path.iter().map(|segment| quoted(segment)).collect();
            self.out.push(segments.join(","));
            self.out.push("],");
            token = self.next_raw();
            if token == Token::Assign {
                self.collapse_line_feeds();
                self.in_xml_attribute = true;
                let value = self.parse_xml_attribute_value();
                self.in_xml_attribute = false;
                value?;
                token = self.next_raw();
            } else {
                self.out.push(fragments::BINDING_PLAIN);
                self.out.push(fragments::EMPTY_STRING);
            }
            self.out.push("]");

            if is_vdata {
                vdata = Some(self.out.end_capture());
            }
        }
        self.collapse_line_feeds();
        self.out.push("]");
        Ok(vdata)
    }

    /// `binding,value` for the attribute whose `=` is current.
    fn parse_xml_attribute_value(&mut self) -> Result<()> {
        match self.peek() {
            Token::CommandDataBindOnce => {
                self.next_in_tag();
                self.out.push(fragments::BINDING_ONCE);
                self.parse_bind_function()
            }
            Token::CommandDataBind => {
                self.next_in_tag();
                self.out.push(fragments::BINDING_CONTINUOUS);
                self.out.push(fragments::CONTINUOUS_VALUE_OPEN);
                self.parse_bind_function()?;
                self.out.push(fragments::MULTIPLE_MARKER);
                self.out.push("}");
                Ok(())
            }
            _ => {
                self.out.push(fragments::BINDING_PLAIN);
                self.next_in_tag();
                self.parse_attribute_expression()
            }
        }
    }

    /// `(ctx)=>{ return (expr) }` for the data-bind opener that is current.
    fn parse_bind_function(&mut self) -> Result<()> {
        if self.next_raw() != Token::LBrace {
            return self.expected(Token::LBrace);
        }
        self.out.push(fragments::BIND_FUNCTION_OPEN);
        self.parse_brace_expression(Token::RBrace)?;
        self.collapse_trivia();
        self.out.push(fragments::BIND_FUNCTION_CLOSE);
        Ok(())
    }

    /// One operand with an optional `? :`. Binary operators need parentheses.
    fn parse_attribute_expression(&mut self) -> Result<()> {
        self.parse_attribute_operand()?;
        if self.peek() == Token::Conditional {
            self.next();
            self.fetch();
            self.next();
            self.parse_attribute_expression()?;
            self.expect_next(Token::Colon)?;
            self.fetch();
            self.next();
            self.parse_attribute_expression()?;
        }
        Ok(())
    }

    fn parse_attribute_operand(&mut self) -> Result<()> {
        self.enter()?;
        match self.token() {
            token if is_unary_prefix(token) => {
                self.fetch();
                self.next();
                self.parse_attribute_operand()?;
                self.leave();
                return Ok(());
            }
            Token::Async => {
                self.fetch();
                if self.peek() == Token::Function {
                    self.next();
                    self.parse_function_expression()?;
                } else {
                    self.next();
                    self.parse_attribute_operand()?;
                    self.leave();
                    return Ok(());
                }
            }
            Token::Function => self.parse_function_expression()?,
            Token::LParen => {
                self.parse_group(Token::RParen)?;
                if self.peek() == Token::Arrow {
                    self.parse_arrow_body()?;
                    self.leave();
                    return Ok(());
                }
            }
            Token::LBrack => self.parse_group(Token::RBrack)?,
            Token::LBrace => self.parse_group(Token::RBrace)?,
            Token::Command => self.parse_command_string()?,
            Token::Div | Token::AssignDiv => self.parse_regexp()?,
            Token::Number | Token::String => self.fetch(),
            Token::XmlElementTag => return self.error(&messages::XML_NOT_ALLOWED_IN_ATTRIBUTE, &[]),
            token if is_binding_identifier(token) => {
                self.fetch();
                if self.peek() == Token::Arrow {
                    self.parse_arrow_body()?;
                    self.leave();
                    return Ok(());
                }
            }
            _ => return self.unexpected(),
        }
        self.parse_member_chain()?;
        self.leave();
        Ok(())
    }

    /// Property accesses, calls, indexing, tagged templates and postfix
    /// updates following an operand.
    fn parse_member_chain(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Token::Period | Token::OptionalChain => {
                    self.next();
                    self.fetch();
                    match self.next() {
                        Token::LParen if self.scanner.prev() == Token::OptionalChain => {
                            self.parse_group(Token::RParen)?
                        }
                        Token::LBrack if self.scanner.prev() == Token::OptionalChain => {
                            self.parse_group(Token::RBrack)?
                        }
                        token if is_property_name(token) => self.fetch(),
                        _ => return self.unexpected(),
                    }
                }
                Token::LParen => {
                    self.next();
                    self.parse_group(Token::RParen)?;
                }
                Token::LBrack => {
                    self.next();
                    self.parse_group(Token::RBrack)?;
                }
                Token::Command => {
                    self.next();
                    self.parse_command_string()?;
                }
                Token::String if self.scanner.lookahead().literal.starts_with('`') => {
                    self.next();
                    self.fetch();
                }
                Token::Inc | Token::Dec if !self.scanner.lookahead().before_line_feed => {
                    self.next();
                    self.fetch();
                }
                _ => return Ok(()),
            }
        }
    }

    /// `=> body` after arrow parameters.
    fn parse_arrow_body(&mut self) -> Result<()> {
        self.next();
        self.fetch();
        if self.next() == Token::LBrace {
            self.parse_group(Token::RBrace)
        } else {
            self.parse_attribute_expression()
        }
    }

    /// `function [*] [name] (params) { body }` with `function` current.
    fn parse_function_expression(&mut self) -> Result<()> {
        self.fetch();
        if self.peek() == Token::Mul {
            self.next();
            self.fetch();
        }
        if is_binding_identifier(self.peek()) {
            self.next();
            self.fetch();
        }
        self.expect_next(Token::LParen)?;
        self.parse_group(Token::RParen)?;
        self.expect_next(Token::LBrace)?;
        self.parse_group(Token::RBrace)
    }

    /// Content between the start and end tags, from `pos` up to and
    /// including the matching end tag.
    fn parse_xml_children(&mut self, tag_name: &str, mut pos: usize) -> Result<()> {
        self.out.push(",[");
        let mut children = Children::new();
        loop {
            let token = self.scanner.scan_xml_content(children.ignore_space, pos);
            pos = self.scanner.next_location().end;
            match token {
                Token::String => {
                    let feeds = self.scanner.take_next_trivia();
                    children.gap.push_str(&feeds);
                    children.text.push_str(&self.scanner.lookahead().literal);
                }
                Token::XmlComment => {
                    let comment = self.xml_comment_text(&self.scanner.lookahead().literal);
                    children.gap.push_str(&comment);
                }
                Token::XmlNoIgnoreSpace => {
                    self.flush_xml_text(&mut children, false);
                    children.ignore_space = !children.ignore_space;
                }
                Token::XmlElementTag => {
                    self.flush_xml_text(&mut children, true);
                    self.next_raw();
                    self.parse_xml_element(true, false)?;
                    pos = self.element_end();
                }
                Token::Command => {
                    self.flush_xml_text(&mut children, true);
                    self.next_raw();
                    if self.next_raw() != Token::LBrace {
                        return self.expected(Token::LBrace);
                    }
                    self.out.push("(");
                    self.parse_brace_expression(Token::RBrace)?;
                    self.collapse_trivia();
                    self.out.push(")");
                    pos = self.scanner.location().end;
                }
                Token::CommandDataBind | Token::CommandDataBindOnce => {
                    self.flush_xml_text(&mut children, true);
                    self.next_raw();
                    self.out.push(fragments::BOUND_NODE_OPEN);
                    self.parse_bind_function()?;
                    if token == Token::CommandDataBind {
                        self.out.push(fragments::MULTIPLE_MARKER);
                    }
                    self.out.push("}");
                    pos = self.scanner.location().end;
                }
                Token::XmlElementTagEnd => {
                    self.flush_xml_text(&mut children, false);
                    self.next_raw();
                    if self.scanner.literal() != tag_name {
                        let closing = self.scanner.literal().to_string();
                        return self.error(&messages::CLOSING_TAG_0_DOES_NOT_MATCH_1, &[&closing, tag_name]);
                    }
                    self.out.push("]");
                    return Ok(());
                }
                Token::Eos => {
                    return self.error_at(
                        &messages::MISSING_CLOSING_TAG_0,
                        &[tag_name],
                        self.scanner.next_location(),
                    );
                }
                _ => {
                    self.next_raw();
                    return self.unexpected();
                }
            }
        }
    }

    /// Emit pending text as a text node, then a separator when a child
    /// follows, then the pending gap.
    fn flush_xml_text(&mut self, children: &mut Children, before_child: bool) {
        let text = std::mem::take(&mut children.text);
        if let Some(text) = normalize_xml_text(&text, children.ignore_space) {
            self.push_child_separator(children);
            self.out.push(fragments::TEXT_NODE_OPEN);
            self.out.push(text);
            self.out.push(fragments::TEXT_NODE_CLOSE);
        }
        if before_child {
            self.push_child_separator(children);
        }
        let gap = std::mem::take(&mut children.gap);
        self.out.push(gap);
    }

    fn push_child_separator(&mut self, children: &mut Children) {
        if !std::mem::replace(&mut children.first, false) {
            self.out.push(",");
        }
    }
}
