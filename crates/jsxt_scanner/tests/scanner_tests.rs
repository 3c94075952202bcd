//! Scanner integration tests.
//!
//! Verifies that the scanner tokenizes script and dialect constructs in each
//! of its modes.

use jsxt_diagnostics::ErrorKind;
use jsxt_scanner::{ScanMode, Scanner, Token};

/// Helper: scan all tokens from source and return as (token, text) pairs.
fn scan_all(source: &str) -> Vec<(Token, String)> {
    let mut scanner = Scanner::new(source, true, false);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next();
        if token == Token::Eos {
            break;
        }
        tokens.push((token, scanner.current().text().to_string()));
        if token == Token::Illegal {
            break;
        }
    }
    tokens
}

/// Helper: scan all token kinds.
fn scan_kinds(source: &str) -> Vec<Token> {
    scan_all(source).into_iter().map(|(k, _)| k).collect()
}

/// Helper: the error kind of the first illegal token.
fn scan_error(source: &str) -> Option<ErrorKind> {
    let mut scanner = Scanner::new(source, true, false);
    loop {
        match scanner.next() {
            Token::Illegal => return scanner.error().map(|message| message.kind),
            Token::Eos => return None,
            _ => {}
        }
    }
}

#[test]
fn test_empty_source() {
    let tokens = scan_all("");
    assert!(tokens.is_empty());
}

#[test]
fn test_whitespace_only() {
    let tokens = scan_all("   \n\t  ");
    assert!(tokens.is_empty());
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_numeric_literals() {
    for source in ["42", "3.14", "0xFF", "0b1010", "017", ".5", "1e10", "2.5E-3"] {
        let tokens = scan_all(source);
        assert_eq!(tokens, vec![(Token::Number, source.to_string())], "source: {}", source);
    }
}

#[test]
fn test_malformed_numbers() {
    assert_eq!(scan_error("3abc"), Some(ErrorKind::MalformedNumber));
    assert_eq!(scan_error("3.4.5"), Some(ErrorKind::MalformedNumber));
    assert_eq!(scan_error("0x"), Some(ErrorKind::MalformedNumber));
    assert_eq!(scan_error("1e+"), Some(ErrorKind::MalformedNumber));
}

#[test]
fn test_missing_digits_after_prefix_or_exponent() {
    for source in ["0x;", "0b;", "1e;", "2.5E-;"] {
        let mut scanner = Scanner::new(source, true, false);
        assert_eq!(scanner.next(), Token::Illegal, "source: {}", source);
        let message = scanner.error().unwrap();
        assert_eq!(message.kind, ErrorKind::MalformedNumber);
        assert_eq!(message.message, "Digit expected.");
    }

    let mut scanner = Scanner::new("3abc", true, false);
    assert_eq!(scanner.next(), Token::Illegal);
    assert_eq!(scanner.error().unwrap().code, 1351);
}

#[test]
fn test_string_literals_keep_quotes() {
    let tokens = scan_all(r#""hello" 'world' "a\"b""#);
    assert_eq!(
        tokens,
        vec![
            (Token::String, r#""hello""#.to_string()),
            (Token::String, "'world'".to_string()),
            (Token::String, r#""a\"b""#.to_string()),
        ]
    );
}

#[test]
fn test_unicode_escape_needs_four_hex_digits() {
    assert_eq!(scan_kinds(r#""\u00e9""#), vec![Token::String]);
    assert_eq!(scan_error(r#""\u00g1""#), Some(ErrorKind::InvalidUnicodeEscape));
    assert_eq!(scan_error(r#""\u{1F600}""#), Some(ErrorKind::InvalidUnicodeEscape));
}

#[test]
fn test_unterminated_strings() {
    assert_eq!(scan_error("\"abc"), Some(ErrorKind::UnterminatedString));
    assert_eq!(scan_error("'abc\ndef'"), Some(ErrorKind::UnterminatedString));
}

#[test]
fn test_template_without_interpolation_is_a_string() {
    let tokens = scan_all("`a b`");
    assert_eq!(tokens, vec![(Token::String, "`a b`".to_string())]);
}

#[test]
fn test_unterminated_template() {
    assert_eq!(scan_error("`abc"), Some(ErrorKind::UnterminatedTemplate));
}

// ============================================================================
// Identifiers and keywords
// ============================================================================

#[test]
fn test_keywords() {
    assert_eq!(
        scan_kinds("class extends static get set async event import export from as"),
        vec![
            Token::Class,
            Token::Extends,
            Token::Static,
            Token::Get,
            Token::Set,
            Token::Async,
            Token::Event,
            Token::Import,
            Token::Export,
            Token::From,
            Token::As,
        ]
    );
}

#[test]
fn test_keyword_after_member_access_is_identifier() {
    assert_eq!(
        scan_kinds("a.class b?.import"),
        vec![
            Token::Identifier,
            Token::Period,
            Token::Identifier,
            Token::Identifier,
            Token::OptionalChain,
            Token::Identifier,
        ]
    );
}

#[test]
fn test_identifiers() {
    let tokens = scan_all("foo _bar $baz #priv caf\u{e9}");
    assert!(tokens.iter().all(|(token, _)| *token == Token::Identifier));
    assert_eq!(tokens[3].1, "#priv");
    assert_eq!(tokens[4].1, "caf\u{e9}");
}

// ============================================================================
// Operators and punctuation
// ============================================================================

#[test]
fn test_operators() {
    assert_eq!(
        scan_kinds("a === b !== c == d != e"),
        vec![
            Token::Identifier,
            Token::EqStrict,
            Token::Identifier,
            Token::NeStrict,
            Token::Identifier,
            Token::Eq,
            Token::Identifier,
            Token::Ne,
            Token::Identifier,
        ]
    );
    assert_eq!(
        scan_kinds("< <= << >> >>> >= ** ?? ?"),
        vec![
            Token::Lt,
            Token::Lte,
            Token::Shl,
            Token::Sar,
            Token::Shr,
            Token::Gte,
            Token::Pow,
            Token::Nullish,
            Token::Conditional,
        ]
    );
}

#[test]
fn test_modern_punctuation() {
    assert_eq!(
        scan_kinds("=> ... ?. ++ --"),
        vec![Token::Arrow, Token::Ellipsis, Token::OptionalChain, Token::Inc, Token::Dec]
    );
}

#[test]
fn test_assignment_operators() {
    assert_eq!(
        scan_kinds("= += -= *= /= %= **= <<= >>= >>>= &= |= ^= &&= ||= ??="),
        vec![
            Token::Assign,
            Token::AssignAdd,
            Token::AssignSub,
            Token::AssignMul,
            Token::AssignDiv,
            Token::AssignMod,
            Token::AssignPow,
            Token::AssignShl,
            Token::AssignSar,
            Token::AssignShr,
            Token::AssignBitAnd,
            Token::AssignBitOr,
            Token::AssignBitXor,
            Token::AssignAnd,
            Token::AssignOr,
            Token::AssignNullish,
        ]
    );
}

#[test]
fn test_invalid_character() {
    assert_eq!(scan_error("a \u{1}"), Some(ErrorKind::InvalidCharacter));
}

// ============================================================================
// Trivia, shell header, byte order mark
// ============================================================================

#[test]
fn test_shell_header() {
    let mut scanner = Scanner::new("#!/usr/bin/env node\nx", true, false);
    assert_eq!(scanner.next(), Token::ShellHeader);
    assert_eq!(scanner.literal(), "#!/usr/bin/env node");
    assert_eq!(scanner.next(), Token::Identifier);
    assert!(scanner.before_line_feed());
    assert_eq!(scanner.location().line, 1);
}

#[test]
fn test_byte_order_mark_is_skipped() {
    let mut scanner = Scanner::new("\u{FEFF}a", true, false);
    assert_eq!(scanner.next(), Token::Identifier);
    assert_eq!(scanner.trivia(), "");
    assert_eq!(scanner.location().begin, 1);
}

#[test]
fn test_comments_are_trivia() {
    let mut scanner = Scanner::new("a // c\nb /* d */ c", true, false);
    scanner.next();
    assert_eq!(scanner.next(), Token::Identifier);
    assert_eq!(scanner.trivia(), " // c\n");
    assert_eq!(scanner.next(), Token::Identifier);
    assert_eq!(scanner.trivia(), " /* d */ ");
}

#[test]
fn test_unterminated_comment() {
    assert_eq!(scan_error("a /* b"), Some(ErrorKind::UnterminatedComment));
}

#[test]
fn test_lines_count_line_feeds_only() {
    let mut scanner = Scanner::new("a\r\nb\rc", true, false);
    scanner.next();
    scanner.next();
    assert_eq!(scanner.location().line, 1);
    scanner.next();
    assert_eq!(scanner.location().line, 1);
}

// ============================================================================
// Dialect tokens
// ============================================================================

#[test]
fn test_xml_tags() {
    assert_eq!(
        scan_all("<div </div> <ns:tag <a.b"),
        vec![
            (Token::XmlElementTag, "div".to_string()),
            (Token::XmlElementTagEnd, "div".to_string()),
            (Token::XmlElementTag, "ns:tag".to_string()),
            (Token::XmlElementTag, "a.b".to_string()),
        ]
    );
}

#[test]
fn test_closing_tag_without_bracket_is_less_than() {
    assert_eq!(scan_kinds("a </b"), vec![Token::Identifier, Token::Lt, Token::Div, Token::Identifier]);
}

#[test]
fn test_xml_comment_masks_stars() {
    let tokens = scan_all("<!-- a*/b -->");
    assert_eq!(tokens, vec![(Token::XmlComment, " ax/b ".to_string())]);
}

#[test]
fn test_xml_comment_with_comments_removed() {
    let mut scanner = Scanner::new("<!-- a\nb -->", true, true);
    assert_eq!(scanner.next(), Token::XmlComment);
    assert_eq!(scanner.literal(), "\n");
}

#[test]
fn test_unterminated_xml_comment() {
    assert_eq!(scan_error("<!-- a"), Some(ErrorKind::UnterminatedComment));
}

#[test]
fn test_data_bind_openers_need_dialect() {
    assert_eq!(
        scan_kinds("%{a} %%{b}"),
        vec![
            Token::CommandDataBindOnce,
            Token::LBrace,
            Token::Identifier,
            Token::RBrace,
            Token::CommandDataBind,
            Token::LBrace,
            Token::Identifier,
            Token::RBrace,
        ]
    );
    let mut scanner = Scanner::new("%%{", false, false);
    assert_eq!(scanner.next(), Token::Mod);
    assert_eq!(scanner.next(), Token::Mod);
    assert_eq!(scanner.next(), Token::LBrace);
}

// ============================================================================
// Rescan modes
// ============================================================================

#[test]
fn test_template_resume() {
    let source = "`a${b}c${d}e`";
    let mut scanner = Scanner::new(source, true, false);
    assert_eq!(scanner.next(), Token::Command);
    assert_eq!(scanner.literal(), "`a");
    assert_eq!(scanner.next(), Token::LBrace);
    assert_eq!(scanner.next(), Token::Identifier);
    assert_eq!(scanner.peek(), Token::RBrace);

    let resume = scanner.next_location().end;
    assert_eq!(scanner.scan_command_string(resume), Token::Command);
    assert_eq!(scanner.next(), Token::Command);
    assert_eq!(scanner.literal(), "c");
    assert_eq!(scanner.next(), Token::LBrace);
    assert_eq!(scanner.next(), Token::Identifier);

    let resume = scanner.next_location().end;
    assert_eq!(scanner.rescan(ScanMode::TemplateResume, resume), Token::CommandEnd);
    assert_eq!(scanner.next(), Token::CommandEnd);
    assert_eq!(scanner.literal(), "e`");
    assert_eq!(scanner.next(), Token::Eos);
}

#[test]
fn test_regexp_rescan() {
    let mut scanner = Scanner::new("x = /[/]\\//gi;", true, false);
    scanner.next();
    scanner.next();
    assert_eq!(scanner.peek(), Token::Div);
    let begin = scanner.next_location().begin;
    assert_eq!(scanner.rescan(ScanMode::RegExp, begin), Token::RegExp);
    assert_eq!(scanner.next(), Token::RegExp);
    assert_eq!(scanner.literal(), "/[/]\\//gi");
    assert_eq!(scanner.next(), Token::Semicolon);
}

#[test]
fn test_regexp_flag_errors() {
    for source in ["/a/gg", "/a/q", "/a"] {
        let mut scanner = Scanner::new(source, true, false);
        assert_eq!(scanner.peek(), Token::Div);
        assert_eq!(scanner.scan_regexp(0), Token::Illegal, "source: {}", source);
    }
    let mut scanner = Scanner::new("/a/gg", true, false);
    scanner.scan_regexp(0);
    assert_eq!(scanner.lookahead().error.map(|m| m.kind), Some(ErrorKind::InvalidRegExpFlags));
    let mut scanner = Scanner::new("/a\n/", true, false);
    scanner.scan_regexp(0);
    assert_eq!(scanner.lookahead().error.map(|m| m.kind), Some(ErrorKind::UnterminatedRegExp));
}

#[test]
fn test_xml_content_modes() {
    let source = "<a>x  ${y}%{z}%%{w}@@ 50% </a>";
    let mut scanner = Scanner::new(source, true, false);
    let mut pos = 3;
    let mut seen = Vec::new();
    loop {
        let token = scanner.scan_xml_content(true, pos);
        seen.push((token, scanner.lookahead().literal.clone()));
        pos = scanner.next_location().end;
        match token {
            // Skip the braced expression as the transformer would.
            Token::Command | Token::CommandDataBind | Token::CommandDataBindOnce => {
                pos = source[pos..].find('}').map(|i| pos + i + 1).unwrap_or(pos);
            }
            Token::XmlElementTagEnd | Token::Eos | Token::Illegal => break,
            _ => {}
        }
    }
    assert_eq!(
        seen,
        vec![
            (Token::String, "x ".to_string()),
            (Token::Command, String::new()),
            (Token::CommandDataBindOnce, String::new()),
            (Token::CommandDataBind, String::new()),
            (Token::XmlNoIgnoreSpace, String::new()),
            (Token::String, " 50".to_string()),
            (Token::String, "%".to_string()),
            (Token::String, " ".to_string()),
            (Token::XmlElementTagEnd, "a".to_string()),
        ]
    );
}

#[test]
fn test_xml_content_verbatim_keeps_line_feeds() {
    let mut scanner = Scanner::new("a\n  \"b\"", true, false);
    assert_eq!(scanner.scan_xml_content(false, 0), Token::String);
    assert_eq!(scanner.lookahead().literal, "a\\n  \\\"b\\\"");
    assert_eq!(scanner.lookahead().trivia, "\n");
}

#[test]
fn test_xml_content_collapsed_text_records_line_feeds() {
    let mut scanner = Scanner::new("a \n\n b", true, false);
    assert_eq!(scanner.scan_xml_content(true, 0), Token::String);
    assert_eq!(scanner.lookahead().literal, "a b");
    assert_eq!(scanner.lookahead().trivia, "\n\n");
}

#[test]
fn test_set_pos_beyond_text() {
    let mut scanner = Scanner::new("ab", true, false);
    assert!(scanner.set_pos(2));
    assert!(!scanner.set_pos(3));
    assert_eq!(scanner.rescan(ScanMode::Script, 10), Token::Illegal);
}
