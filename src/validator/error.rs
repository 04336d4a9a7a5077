use std::fmt;

use thiserror::Error;

/// Grammar features that can be switched off through
/// [`ValidationOptions`](super::ValidationOptions).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    QuotedLocalPart,
    InternationalLocalPart,
    InternationalDomain,
    IpLiteralDomain,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuotedLocalPart => f.write_str("quoted local part"),
            Self::InternationalLocalPart => f.write_str("international local part"),
            Self::InternationalDomain => f.write_str("international domain"),
            Self::IpLiteralDomain => f.write_str("IP literal domain"),
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv4Reason {
    #[error("expected four octets")]
    OctetCount,
    #[error("empty octet")]
    EmptyOctet,
    #[error("octet has a leading zero")]
    LeadingZero,
    #[error("octet exceeds 255")]
    OctetOutOfRange,
    #[error("invalid character")]
    InvalidChar,
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv6Reason {
    #[error("wrong number of groups")]
    GroupCount,
    #[error("empty group")]
    EmptyGroup,
    #[error("group longer than four hex digits")]
    GroupTooLong,
    #[error("more than one '::'")]
    MultipleCompressions,
    #[error("invalid character")]
    InvalidChar,
    #[error("malformed embedded IPv4 tail")]
    Ipv4Tail,
}

/// Why a bracketed domain literal was refused.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralReason {
    #[error("missing closing ']'")]
    Unbracketed,
    #[error("IPv4: {0}")]
    Ipv4(Ipv4Reason),
    #[error("IPv6: {0}")]
    Ipv6(Ipv6Reason),
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("the address is empty")]
    EmptyAddress,
    #[error("the address is missing an '@' sign")]
    MissingAtSign,
    #[error("the address has more than one '@' sign")]
    MultipleAtSigns,
    #[error("the local part is empty")]
    LocalPartEmpty,
    #[error("invalid character in the local part")]
    LocalPartInvalidChar,
    #[error("the local part cannot start or end with a period")]
    LocalPartLeadingOrTrailingDot,
    #[error("the local part cannot have two periods in a row")]
    LocalPartConsecutiveDots,
    #[error("unterminated quoted local part")]
    LocalPartUnterminatedQuote,
    #[error("the local part is too long")]
    LocalPartTooLong,
    #[error("empty domain label")]
    DomainLabelEmpty,
    #[error("invalid character in a domain label")]
    DomainLabelInvalidChar,
    #[error("domain label longer than 63 characters")]
    DomainLabelTooLong,
    #[error("domain label cannot start or end with '-'")]
    DomainLabelEdgeHyphen,
    #[error("the domain needs at least two labels")]
    DomainTooFewLabels,
    #[error("the top-level domain cannot be numeric")]
    DomainNumericTld,
    #[error("the domain is too long")]
    DomainTooLong,
    #[error("malformed domain literal ({0})")]
    DomainLiteralMalformed(LiteralReason),
    #[error("the address is too long")]
    AddressTooLong,
    #[error("{0} is disabled")]
    UnsupportedFeatureDisabled(Feature),
}

/// A grammar violation, with the byte offset in the input where it was
/// detected.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{kind} (at byte {offset})")]
pub struct ValidationError {
    kind: ErrorKind,
    offset: usize,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn shifted(self, base: usize) -> Self {
        Self {
            kind: self.kind,
            offset: self.offset + base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_offset() {
        let err = ValidationError::new(ErrorKind::LocalPartConsecutiveDots, 4);
        insta::assert_snapshot!(
            err.to_string(),
            @"the local part cannot have two periods in a row (at byte 4)"
        );
    }

    #[test]
    fn literal_reason_display() {
        let err = ValidationError::new(
            ErrorKind::DomainLiteralMalformed(LiteralReason::Ipv4(Ipv4Reason::OctetOutOfRange)),
            12,
        );
        insta::assert_snapshot!(
            err.to_string(),
            @"malformed domain literal (IPv4: octet exceeds 255) (at byte 12)"
        );
    }

    #[test]
    fn disabled_feature_display() {
        let kind = ErrorKind::UnsupportedFeatureDisabled(Feature::QuotedLocalPart);
        assert_eq!(kind.to_string(), "quoted local part is disabled");
    }

    #[test]
    fn shifted_moves_offset() {
        let err = ValidationError::new(ErrorKind::DomainLabelEmpty, 3).shifted(10);
        assert_eq!(err.offset(), 13);
        assert_eq!(err.kind(), ErrorKind::DomainLabelEmpty);
    }
}
