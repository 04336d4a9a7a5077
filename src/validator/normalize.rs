use std::fmt::Write;

use unicode_normalization::UnicodeNormalization;

use super::local::is_dot_atom;
use super::types::{Domain, LocalPart, NormalizedAddress, ParsedAddress, ValidationOptions};

/// Forme canonique d'une adresse déjà analysée. Fonction pure.
///
/// - partie locale conservée telle quelle (la casse compte);
/// - domaine nommé en minuscules, labels IDN sous forme `xn--`;
/// - littéraux IP réécrits (`[IPv6:...]` compressé selon RFC 5952).
pub fn normalize(parsed: &ParsedAddress<'_>, options: &ValidationOptions) -> NormalizedAddress {
    let mut address = String::with_capacity(parsed.original.len() + 16);

    push_local(&mut address, &parsed.local, options);
    let local_end = address.len();
    address.push('@');
    let domain_start = address.len();
    push_domain(&mut address, &parsed.domain);
    let domain_end = address.len();

    NormalizedAddress {
        address,
        local: 0..local_end,
        domain: domain_start..domain_end,
        domain_kind: parsed.domain.kind(),
    }
}

fn push_local(out: &mut String, local: &LocalPart<'_>, options: &ValidationOptions) {
    match local {
        LocalPart::DotAtom(atom) => push_text(out, atom.as_str(), options.nfc_local_part),
        LocalPart::QuotedString(quoted) => {
            if options.simplify_quoted_local_part {
                let plain = quoted.unescaped();
                if is_dot_atom(&plain, options) {
                    push_text(out, &plain, options.nfc_local_part);
                    return;
                }
            }
            push_text(out, quoted.raw(), options.nfc_local_part);
        }
    }
}

fn push_text(out: &mut String, text: &str, nfc: bool) {
    if nfc && !text.is_ascii() {
        out.extend(text.nfc());
    } else {
        out.push_str(text);
    }
}

fn push_domain(out: &mut String, domain: &Domain<'_>) {
    // l'écriture dans une String ne peut pas échouer
    match domain {
        Domain::Named(named) => {
            let start = out.len();
            out.push_str(named.ascii());
            out[start..].make_ascii_lowercase();
        }
        Domain::Ipv4Literal(addr) => {
            let _ = write!(out, "[{addr}]");
        }
        Domain::Ipv6Literal(addr) => {
            let _ = write!(out, "[IPv6:{addr}]");
        }
    }
}
