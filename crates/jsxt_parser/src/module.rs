//! `import` and `export` rewriting.
//!
//! Imports become `require` bindings in place. Exported declarations keep
//! their text behind an `/*export*/` marker and are assigned onto `exports`
//! once the document ends.

use jsxt_diagnostics::{messages, Result};
use jsxt_scanner::Token;

use crate::fragments;
use crate::parser::Parser;
use crate::utilities::{is_binding_identifier, is_expression_start, is_property_name, module_binding_name};

/// A rewritten import statement and the trivia its tokens carried.
#[derive(Default)]
struct ImportStatement {
    text: String,
    skipped: String,
}

impl ImportStatement {
    fn binding(&mut self, pattern: &str, path: &str) {
        self.text.push_str(fragments::CONST_DECL);
        self.text.push_str(pattern);
        self.text.push_str(fragments::BIND_EQ);
        self.require(path);
    }

    fn require(&mut self, path: &str) {
        self.text.push_str(fragments::REQUIRE_OPEN);
        self.text.push_str(path);
        self.text.push(')');
    }
}

impl<'p> Parser<'p> {
    /// Advance inside an import, keeping the skipped trivia.
    fn next_in_import(&mut self, statement: &mut ImportStatement) -> Token {
        let token = self.next_raw();
        statement.skipped.push_str(&self.scanner.take_trivia());
        token
    }

    /// The module path string that must follow `from`.
    fn expect_module_path(&mut self, statement: &mut ImportStatement) -> Result<String> {
        if self.next_in_import(statement) != Token::From || self.next_in_import(statement) != Token::String {
            return self.malformed(&messages::MALFORMED_IMPORT);
        }
        Ok(self.scanner.literal().to_string())
    }

    fn expect_binding_name(&mut self, statement: &mut ImportStatement) -> Result<String> {
        if !is_binding_identifier(self.next_in_import(statement)) {
            return self.malformed(&messages::MALFORMED_IMPORT);
        }
        Ok(self.scanner.literal().to_string())
    }

    /// `import ...` with `import` current.
    pub(crate) fn parse_import(&mut self) -> Result<()> {
        // `import(...)` and `import.meta`
        if matches!(self.peek(), Token::LParen | Token::Period) {
            self.fetch();
            return Ok(());
        }

        let mut statement = ImportStatement::default();
        match self.next_in_import(&mut statement) {
            Token::String => {
                let path = self.scanner.literal().to_string();
                if self.peek() == Token::As {
                    self.next_in_import(&mut statement);
                    let alias = self.expect_binding_name(&mut statement)?;
                    statement.binding(&alias, &path);
                } else {
                    let unquoted = path.get(1..path.len().saturating_sub(1)).unwrap_or_default();
                    match module_binding_name(unquoted) {
                        Some(name) => statement.binding(&name, &path),
                        None => statement.require(&path),
                    }
                }
            }
            Token::Mul => {
                if self.next_in_import(&mut statement) != Token::As {
                    return self.malformed(&messages::MALFORMED_IMPORT);
                }
                let name = self.expect_binding_name(&mut statement)?;
                let path = self.expect_module_path(&mut statement)?;
                statement.binding(&name, &path);
            }
            Token::LBrace => {
                let names = self.parse_import_names(&mut statement)?;
                let path = self.expect_module_path(&mut statement)?;
                statement.binding(&format!("{{ {} }}", names.join(", ")), &path);
            }
            token if is_binding_identifier(token) => {
                let name = self.scanner.literal().to_string();
                match self.next_in_import(&mut statement) {
                    Token::From => {
                        if self.next_in_import(&mut statement) != Token::String {
                            return self.malformed(&messages::MALFORMED_IMPORT);
                        }
                        let path = self.scanner.literal().to_string();
                        statement.binding(&name, &path);
                        statement.text.push_str(fragments::DEFAULT_MEMBER);
                    }
                    Token::Comma => {
                        if self.next_in_import(&mut statement) != Token::LBrace {
                            return self.malformed(&messages::MALFORMED_IMPORT);
                        }
                        let mut names = vec![format!("default: {}", name)];
                        names.extend(self.parse_import_names(&mut statement)?);
                        let path = self.expect_module_path(&mut statement)?;
                        statement.binding(&format!("{{ {} }}", names.join(", ")), &path);
                    }
                    _ => return self.malformed(&messages::MALFORMED_IMPORT),
                }
            }
            _ => return self.malformed(&messages::MALFORMED_IMPORT),
        }

        self.out.push(statement.text);
        self.out.push_line_feeds_of(&statement.skipped);
        Ok(())
    }

    /// `{ a, b as c }` after its `{`, as destructuring entries.
    fn parse_import_names(&mut self, statement: &mut ImportStatement) -> Result<Vec<String>> {
        let mut names = Vec::new();
        loop {
            let token = self.next_in_import(statement);
            if token == Token::RBrace {
                return Ok(names);
            }
            if !is_property_name(token) {
                return self.malformed(&messages::MALFORMED_IMPORT);
            }
            let imported = self.scanner.literal().to_string();
            if self.peek() == Token::As {
                self.next_in_import(statement);
                let local = self.expect_binding_name(statement)?;
                names.push(format!("{}: {}", imported, local));
            } else if is_binding_identifier(token) {
                names.push(imported);
            } else {
                return self.malformed(&messages::MALFORMED_IMPORT);
            }
            match self.next_in_import(statement) {
                Token::Comma => continue,
                Token::RBrace => return Ok(names),
                _ => return self.malformed(&messages::MALFORMED_IMPORT),
            }
        }
    }

    /// `export ...` with `export` current.
    pub(crate) fn parse_export(&mut self) -> Result<()> {
        let mut is_default = false;
        let mut token = self.next_raw();
        if token == Token::Default {
            if self.has_export_default {
                return self.error(&messages::DUPLICATE_DEFAULT_EXPORT, &[]);
            }
            self.has_export_default = true;
            is_default = true;
            self.collapse_line_feeds();
            token = self.next_raw();
        }

        match token {
            Token::Var | Token::Let | Token::Const => {
                if !is_binding_identifier(self.peek()) {
                    self.next();
                    return self.malformed(&messages::MALFORMED_EXPORT);
                }
                let name = self.scanner.lookahead().literal.clone();
                self.export_declaration(name, is_default);
                self.fetch();
                Ok(())
            }
            Token::Class => {
                if is_binding_identifier(self.peek()) {
                    let name = self.scanner.lookahead().literal.clone();
                    self.export_declaration(name, is_default);
                    return self.parse_class();
                }
                if !is_default {
                    return self.malformed(&messages::MALFORMED_EXPORT);
                }
                self.export_default_value();
                self.parse_class()
            }
            Token::Function => self.parse_export_function(is_default),
            Token::Async if self.peek() == Token::Function => self.parse_export_function(is_default),
            Token::Mul if !is_default => {
                let mut skipped = self.scanner.take_trivia();
                if self.next_raw() != Token::From {
                    return self.malformed(&messages::MALFORMED_EXPORT);
                }
                skipped.push_str(&self.scanner.take_trivia());
                if self.next_raw() != Token::String {
                    return self.malformed(&messages::MALFORMED_EXPORT);
                }
                skipped.push_str(&self.scanner.take_trivia());
                let path = self.scanner.literal().to_string();
                self.out.push_line_feeds_of(&skipped);
                self.out.push(fragments::REEXPORT_ALL_OPEN);
                self.out.push(fragments::REQUIRE_OPEN);
                self.out.push(path);
                self.out.push("))");
                Ok(())
            }
            token if is_expression_start(token) => {
                if is_default {
                    self.export_default_value();
                } else {
                    self.collapse_line_feeds();
                    self.out.push(fragments::MODULE_EXPORT);
                    self.out.push(fragments::BIND_EQ);
                }
                self.parse_advance()
            }
            _ => self.malformed(&messages::MALFORMED_EXPORT),
        }
    }

    /// Mark the current declaration and remember its name for the end of
    /// the document.
    fn export_declaration(&mut self, name: String, is_default: bool) {
        self.out.push(fragments::EXPORT_MARKER);
        self.collapse_trivia();
        if is_default {
            self.export_default = Some(name);
        } else {
            self.exports.push(name);
        }
    }

    fn export_default_value(&mut self) {
        self.collapse_line_feeds();
        self.out.push(fragments::EXPORTS_DEFAULT);
        self.out.push(fragments::BIND_EQ);
    }

    /// `[async] function [*] name` after `export`. The head is set aside
    /// until the name shows whether the function is anonymous.
    fn parse_export_function(&mut self, is_default: bool) -> Result<()> {
        self.out.begin_capture();
        self.fetch();
        if self.token() == Token::Async {
            self.next();
            self.fetch();
        }
        if self.peek() == Token::Mul {
            self.next();
            self.fetch();
        }
        let head = self.out.end_capture();

        if is_binding_identifier(self.peek()) {
            let name = self.scanner.lookahead().literal.clone();
            self.out.push(fragments::EXPORT_MARKER);
            self.out.push(head);
            if is_default {
                self.export_default = Some(name);
            } else {
                self.exports.push(name);
            }
            return Ok(());
        }
        if !is_default {
            self.next();
            return self.malformed(&messages::MALFORMED_EXPORT);
        }
        self.out.push(fragments::EXPORTS_DEFAULT);
        self.out.push(fragments::BIND_EQ);
        self.out.push(head.trim_start().to_string());
        Ok(())
    }
}
