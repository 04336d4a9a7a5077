mod address;
mod chars;
mod domain;
mod error;
mod literal;
mod local;
mod normalize;
mod types;

pub use address::parse;
pub use chars::{
    is_atext, is_domain_label_char, is_domain_label_edge_char, is_qtext, is_quoted_pair_escapable,
};
pub use error::{ErrorKind, Feature, Ipv4Reason, Ipv6Reason, LiteralReason, ValidationError};
pub use normalize::normalize;
pub use types::{
    Domain, DomainKind, DomainLabel, DotAtom, LocalPart, NamedDomain, NormalizedAddress,
    ParsedAddress, QuotedChars, QuotedString, ValidationOptions,
};

static DEFAULT_OPTIONS: ValidationOptions = ValidationOptions::new();

/// Chemin rapide: grammaire par défaut, aucune chaîne normalisée construite.
pub fn is_valid(email: &str) -> bool {
    is_valid_with(email, &DEFAULT_OPTIONS)
}

pub fn is_valid_with(email: &str, options: &ValidationOptions) -> bool {
    parse(email, options).is_ok()
}

/// Valide `email` et renvoie sa forme normalisée, ou la première règle violée.
pub fn validate(
    email: &str,
    options: &ValidationOptions,
) -> Result<NormalizedAddress, ValidationError> {
    match parse(email, options) {
        Ok(parsed) => Ok(normalize(&parsed, options)),
        Err(err) => {
            #[cfg(feature = "with-tracing")]
            tracing::debug!(kind = ?err.kind(), offset = err.offset(), "address rejected");
            Err(err)
        }
    }
}
