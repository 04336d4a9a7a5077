use super::chars::{is_domain_label_char, is_domain_label_edge_char};
use super::error::{ErrorKind, Feature, ValidationError};
use super::literal::scan_literal;
use super::types::{Domain, DomainLabel, NamedDomain, ValidationOptions};

const LABEL_MAX_LEN: usize = 63;

/// Valide le domaine (nom ou littéral IP). Offsets relatifs au début de `domain`.
pub(crate) fn scan_domain<'a>(
    domain: &'a str,
    options: &ValidationOptions,
) -> Result<Domain<'a>, ValidationError> {
    if domain.starts_with('[') {
        if !options.allow_ip_literal_domain {
            return Err(ValidationError::new(
                ErrorKind::UnsupportedFeatureDisabled(Feature::IpLiteralDomain),
                0,
            ));
        }
        return scan_literal(domain);
    }
    scan_named(domain, options).map(Domain::Named)
}

fn scan_named<'a>(
    domain: &'a str,
    options: &ValidationOptions,
) -> Result<NamedDomain<'a>, ValidationError> {
    if domain.is_empty() {
        return Err(ValidationError::new(ErrorKind::DomainLabelEmpty, 0));
    }

    let mut encoded = if domain.is_ascii() {
        None
    } else {
        if !options.allow_international_domain {
            let offset = domain
                .char_indices()
                .find(|(_, c)| !c.is_ascii())
                .map_or(0, |(i, _)| i);
            return Err(ValidationError::new(
                ErrorKind::UnsupportedFeatureDisabled(Feature::InternationalDomain),
                offset,
            ));
        }
        Some(String::with_capacity(domain.len() * 2))
    };

    let mut count = 0;
    let mut start = 0;
    let mut last_start = 0;
    let mut last_numeric = false;

    for label in domain.split('.') {
        if let Some(buf) = encoded.as_mut() {
            if count > 0 {
                buf.push('.');
            }
        }

        if label.is_ascii() {
            check_label(label).map_err(|err| err.shifted(start))?;
            if is_ace_label(label) && !is_valid_punycode(label) {
                return Err(ValidationError::new(
                    ErrorKind::DomainLabelInvalidChar,
                    start,
                ));
            }
            if let Some(buf) = encoded.as_mut() {
                buf.push_str(label);
            }
            last_numeric = DomainLabel(label).is_numeric();
        } else {
            // IDNA: case-folding + punycode, puis les mêmes règles que l'ASCII
            let ascii = encode_label(label)
                .ok_or_else(|| ValidationError::new(ErrorKind::DomainLabelInvalidChar, start))?;
            check_label(&ascii).map_err(|err| ValidationError::new(err.kind(), start))?;
            if let Some(buf) = encoded.as_mut() {
                buf.push_str(&ascii);
            }
            last_numeric = DomainLabel(&ascii).is_numeric();
        }

        count += 1;
        last_start = start;
        start += label.len() + 1;
    }

    if count < 2 {
        return Err(ValidationError::new(
            ErrorKind::DomainTooFewLabels,
            domain.len(),
        ));
    }
    if last_numeric {
        return Err(ValidationError::new(ErrorKind::DomainNumericTld, last_start));
    }

    let ascii_len = encoded.as_ref().map_or(domain.len(), String::len);
    if ascii_len > options.domain_max_len {
        let offset = if encoded.is_some() {
            0
        } else {
            options.domain_max_len
        };
        return Err(ValidationError::new(ErrorKind::DomainTooLong, offset));
    }

    Ok(NamedDomain::new(domain, encoded, count))
}

/// Encodes one non-ASCII label. `None` when IDNA refuses it or when the
/// mapping produced a label separator.
fn encode_label(label: &str) -> Option<String> {
    let ascii = idna::domain_to_ascii(label).ok()?;
    if ascii.contains('.') {
        return None;
    }
    Some(ascii)
}

fn is_ace_label(label: &str) -> bool {
    label
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("xn--"))
}

/// Un label `xn--` doit se décoder sans erreur IDNA.
fn is_valid_punycode(label: &str) -> bool {
    idna::domain_to_unicode(label).1.is_ok()
}

/// LDH rules on one ASCII label. Offsets relative to the label.
fn check_label(label: &str) -> Result<(), ValidationError> {
    let bytes = label.as_bytes();
    let Some(&last) = bytes.last() else {
        return Err(ValidationError::new(ErrorKind::DomainLabelEmpty, 0));
    };

    for (i, &b) in bytes.iter().enumerate() {
        if i == LABEL_MAX_LEN {
            return Err(ValidationError::new(ErrorKind::DomainLabelTooLong, i));
        }
        let c = char::from(b);
        if !is_domain_label_char(c) {
            return Err(ValidationError::new(ErrorKind::DomainLabelInvalidChar, i));
        }
        if i == 0 && !is_domain_label_edge_char(c) {
            return Err(ValidationError::new(ErrorKind::DomainLabelEdgeHyphen, 0));
        }
    }
    if !is_domain_label_edge_char(char::from(last)) {
        return Err(ValidationError::new(
            ErrorKind::DomainLabelEdgeHyphen,
            bytes.len() - 1,
        ));
    }
    Ok(())
}
