//! Character classes shared by the local-part and domain scanners.
//!
//! ASCII roles come from a table built at compile time; non-ASCII scalars are
//! only ever accepted in "international" mode and go through
//! [`is_international_text`].

use unicode_normalization::char::is_combining_mark;

const ATEXT: u8 = 1 << 0;
const QTEXT: u8 = 1 << 1;
const ESCAPABLE: u8 = 1 << 2;
const LABEL: u8 = 1 << 3;
const LABEL_EDGE: u8 = 1 << 4;

static ASCII_CLASSES: [u8; 128] = {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let b = i as u8;
        let mut class = 0;
        let alnum = b.is_ascii_alphanumeric();
        if alnum
            || matches!(
                b,
                b'!' | b'#'
                    | b'$'
                    | b'%'
                    | b'&'
                    | b'\''
                    | b'*'
                    | b'+'
                    | b'-'
                    | b'/'
                    | b'='
                    | b'?'
                    | b'^'
                    | b'_'
                    | b'`'
                    | b'{'
                    | b'|'
                    | b'}'
                    | b'~'
            )
        {
            class |= ATEXT;
        }
        // qtext RFC 5322 (%d33 / %d35-91 / %d93-126) + espace/tab tolérés
        if matches!(b, 33 | 35..=91 | 93..=126 | b' ' | b'\t') {
            class |= QTEXT;
        }
        // l'antislash échappe n'importe quel caractère ASCII
        class |= ESCAPABLE;
        if alnum {
            class |= LABEL | LABEL_EDGE;
        } else if b == b'-' {
            class |= LABEL;
        }
        table[i] = class;
        i += 1;
    }
    table
};

#[inline(always)]
fn ascii_has(c: char, class: u8) -> bool {
    c.is_ascii() && ASCII_CLASSES[c as usize] & class != 0
}

/// Non-ASCII scalar acceptable in an international local part.
#[inline]
pub(crate) fn is_international_text(c: char) -> bool {
    !c.is_ascii()
        && !c.is_control()
        && !c.is_whitespace()
        && !matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}

/// Character allowed inside an unquoted dot-atom segment.
#[inline]
pub fn is_atext(c: char, international: bool) -> bool {
    if c.is_ascii() {
        ascii_has(c, ATEXT)
    } else {
        international && is_international_text(c)
    }
}

/// Character allowed verbatim between double quotes.
#[inline]
pub fn is_qtext(c: char, international: bool) -> bool {
    if c.is_ascii() {
        ascii_has(c, QTEXT)
    } else {
        international && is_international_text(c)
    }
}

/// Character allowed right after a backslash inside a quoted string.
#[inline]
pub fn is_quoted_pair_escapable(c: char, international: bool) -> bool {
    if c.is_ascii() {
        ascii_has(c, ESCAPABLE)
    } else {
        international && is_international_text(c)
    }
}

/// Letter, digit or hyphen (checked on the ASCII-compatible label).
#[inline]
pub fn is_domain_label_char(c: char) -> bool {
    ascii_has(c, LABEL)
}

/// First/last character of a label: letter or digit.
#[inline]
pub fn is_domain_label_edge_char(c: char) -> bool {
    ascii_has(c, LABEL_EDGE)
}

/// A local part may not open on a combining mark.
#[inline]
pub(crate) fn is_forbidden_leading(c: char) -> bool {
    !c.is_ascii() && is_combining_mark(c)
}
