use super::domain::scan_domain;
use super::error::{ErrorKind, Feature, ValidationError};
use super::local::{normalized_len, scan_local};
use super::types::{Domain, ParsedAddress, ValidationOptions};

/// Découpe l'adresse autour du '@' puis délègue aux deux scanners.
/// Les erreurs de la partie locale passent avant celles du domaine.
pub fn parse<'a>(
    email: &'a str,
    options: &ValidationOptions,
) -> Result<ParsedAddress<'a>, ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new(ErrorKind::EmptyAddress, 0));
    }

    let at = find_separator(email, options)?;
    let (local_text, domain_text) = (&email[..at], &email[at + 1..]);

    let local = scan_local(local_text, options)?;
    let domain = scan_domain(domain_text, options).map_err(|err| err.shifted(at + 1))?;

    let domain_len = match &domain {
        Domain::Named(named) => named.ascii().len(),
        _ => domain_text.len(),
    };
    let total = normalized_len(local_text, options) + 1 + domain_len;
    if total > options.address_max_len {
        return Err(ValidationError::new(
            ErrorKind::AddressTooLong,
            options.address_max_len.min(email.len()),
        ));
    }

    Ok(ParsedAddress {
        local,
        domain,
        original: email,
    })
}

/// Position of the single '@' outside a leading quoted string.
fn find_separator(email: &str, options: &ValidationOptions) -> Result<usize, ValidationError> {
    let bytes = email.as_bytes();
    let mut i = 0;

    if bytes.first() == Some(&b'"') {
        i = 1;
        loop {
            match bytes.get(i) {
                Some(b'\\') => i += 2,
                Some(b'"') => {
                    i += 1;
                    break;
                }
                Some(_) => i += 1,
                None if options.allow_quoted_local_part => {
                    return Err(ValidationError::new(
                        ErrorKind::LocalPartUnterminatedQuote,
                        email.len(),
                    ));
                }
                None => {
                    return Err(ValidationError::new(
                        ErrorKind::UnsupportedFeatureDisabled(Feature::QuotedLocalPart),
                        0,
                    ));
                }
            }
        }
    }

    let mut found = None;
    for (k, &b) in bytes[i..].iter().enumerate() {
        if b == b'@' {
            if found.is_some() {
                return Err(ValidationError::new(ErrorKind::MultipleAtSigns, i + k));
            }
            found = Some(i + k);
        }
    }
    found.ok_or_else(|| ValidationError::new(ErrorKind::MissingAtSign, email.len()))
}
