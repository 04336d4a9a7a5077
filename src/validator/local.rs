use unicode_normalization::UnicodeNormalization;

use super::chars::{is_atext, is_forbidden_leading, is_qtext, is_quoted_pair_escapable};
use super::error::{ErrorKind, Feature, ValidationError};
use super::types::{DotAtom, LocalPart, QuotedString, ValidationOptions};

/// Analyse la partie locale (tout ce qui précède le '@').
/// Les offsets d'erreur sont relatifs au début de `local`, qui est aussi le
/// début de l'adresse.
pub(crate) fn scan_local<'a>(
    local: &'a str,
    options: &ValidationOptions,
) -> Result<LocalPart<'a>, ValidationError> {
    if local.is_empty() {
        return Err(ValidationError::new(ErrorKind::LocalPartEmpty, 0));
    }
    if local.len() > options.local_part_max_len {
        return Err(ValidationError::new(
            ErrorKind::LocalPartTooLong,
            options.local_part_max_len,
        ));
    }
    // la forme NFC peut être plus longue que l'entrée
    if normalized_len(local, options) > options.local_part_max_len {
        return Err(ValidationError::new(
            ErrorKind::LocalPartTooLong,
            local.len(),
        ));
    }

    if local.starts_with('"') {
        if !options.allow_quoted_local_part {
            return Err(ValidationError::new(
                ErrorKind::UnsupportedFeatureDisabled(Feature::QuotedLocalPart),
                0,
            ));
        }
        scan_quoted(local, options).map(LocalPart::QuotedString)
    } else {
        scan_dot_atom(local, options).map(LocalPart::DotAtom)
    }
}

/// Longueur en octets de la partie locale telle que `normalize` l'écrira
/// (borne haute: la simplification des guillemets ne fait que raccourcir).
pub(crate) fn normalized_len(local: &str, options: &ValidationOptions) -> usize {
    if options.nfc_local_part && !local.is_ascii() {
        local.nfc().map(char::len_utf8).sum()
    } else {
        local.len()
    }
}

/// Vrai si `text` passerait tel quel comme dot-atom.
pub(crate) fn is_dot_atom(text: &str, options: &ValidationOptions) -> bool {
    !text.is_empty() && scan_dot_atom(text, options).is_ok()
}

fn scan_dot_atom<'a>(
    local: &'a str,
    options: &ValidationOptions,
) -> Result<DotAtom<'a>, ValidationError> {
    let international = options.allow_international_local_part;
    let mut prev_dot = false;

    for (i, c) in local.char_indices() {
        if c == '.' {
            if i == 0 {
                return Err(ValidationError::new(
                    ErrorKind::LocalPartLeadingOrTrailingDot,
                    0,
                ));
            }
            if prev_dot {
                return Err(ValidationError::new(ErrorKind::LocalPartConsecutiveDots, i));
            }
            prev_dot = true;
            continue;
        }
        prev_dot = false;

        if is_atext(c, international) {
            if i == 0 && is_forbidden_leading(c) {
                return Err(ValidationError::new(ErrorKind::LocalPartInvalidChar, 0));
            }
            continue;
        }
        let kind = if !c.is_ascii() && !international && is_atext(c, true) {
            ErrorKind::UnsupportedFeatureDisabled(Feature::InternationalLocalPart)
        } else {
            ErrorKind::LocalPartInvalidChar
        };
        return Err(ValidationError::new(kind, i));
    }

    if prev_dot {
        return Err(ValidationError::new(
            ErrorKind::LocalPartLeadingOrTrailingDot,
            local.len() - 1,
        ));
    }
    Ok(DotAtom::new(local))
}

fn scan_quoted<'a>(
    local: &'a str,
    options: &ValidationOptions,
) -> Result<QuotedString<'a>, ValidationError> {
    let international = options.allow_international_local_part;
    let mut chars = local.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) if is_quoted_pair_escapable(escaped, international) => {}
                Some((j, escaped)) => return Err(invalid_quoted_char(escaped, j, international)),
                None => {
                    return Err(ValidationError::new(
                        ErrorKind::LocalPartUnterminatedQuote,
                        local.len(),
                    ));
                }
            },
            '"' => {
                // le guillemet fermant doit terminer la partie locale
                if i + 1 != local.len() {
                    return Err(ValidationError::new(ErrorKind::LocalPartInvalidChar, i));
                }
                return Ok(QuotedString::new(local));
            }
            c if is_qtext(c, international) => {}
            c => return Err(invalid_quoted_char(c, i, international)),
        }
    }

    Err(ValidationError::new(
        ErrorKind::LocalPartUnterminatedQuote,
        local.len(),
    ))
}

fn invalid_quoted_char(c: char, offset: usize, international: bool) -> ValidationError {
    let kind = if !c.is_ascii() && !international && is_qtext(c, true) {
        ErrorKind::UnsupportedFeatureDisabled(Feature::InternationalLocalPart)
    } else {
        ErrorKind::LocalPartInvalidChar
    };
    ValidationError::new(kind, offset)
}
