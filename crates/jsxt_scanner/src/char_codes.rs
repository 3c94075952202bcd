//! Character classes used by the scanner.

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';
pub const BYTE_ORDER_MARK: char = '\u{FEFF}';
pub const REVERSED_BYTE_ORDER_MARK: char = '\u{FFFE}';

/// Regular expression flag letters, each allowed at most once.
pub const REGEXP_FLAGS: &str = "dgimsuy";

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    ch == LINE_FEED
        || ch == CARRIAGE_RETURN
        || ch == LINE_SEPARATOR
        || ch == PARAGRAPH_SEPARATOR
}

/// Check if a character is whitespace (not line break).
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200A}' // various spaces
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | '\u{FEFF}' // BOM / zero-width no-break space
    )
}

/// Blank characters that XML text collapses when spaces are ignored.
#[inline]
pub fn is_xml_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{000B}' | '\u{000C}')
}

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character is an octal digit (0-7).
#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Check if a character is a hex digit.
#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks() {
        assert!(is_line_break('\n'));
        assert!(is_line_break('\u{2028}'));
        assert!(!is_line_break(' '));
        assert!(!is_white_space_single_line('\r'));
    }

    #[test]
    fn test_xml_space_excludes_unicode_blanks() {
        assert!(is_xml_space('\t'));
        assert!(!is_xml_space('\u{00A0}'));
    }

    #[test]
    fn test_digit_classes() {
        assert!(is_octal_digit('7'));
        assert!(!is_octal_digit('8'));
        assert!(is_binary_digit('1'));
        assert!(!is_binary_digit('2'));
        assert!(is_hex_digit('F'));
    }
}
