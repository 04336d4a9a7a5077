use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::Range;

/// Réglages de la grammaire. `Default` correspond à [`ValidationOptions::new`].
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    pub allow_quoted_local_part: bool,
    pub allow_international_local_part: bool,
    pub allow_international_domain: bool,
    pub allow_ip_literal_domain: bool,
    /// Rewrite `"abc"` as `abc` when the unquoted form is a valid dot-atom.
    pub simplify_quoted_local_part: bool,
    /// Apply Unicode NFC to non-ASCII local parts when normalizing.
    pub nfc_local_part: bool,
    pub local_part_max_len: usize,
    pub domain_max_len: usize,
    pub address_max_len: usize,
    /// Ask the [`DeliverabilityResolver`](crate::DeliverabilityResolver) once the
    /// grammar check has passed.
    pub check_deliverability: bool,
}

impl ValidationOptions {
    pub const DEFAULT_LOCAL_PART_MAX_LEN: usize = 64;
    pub const DEFAULT_DOMAIN_MAX_LEN: usize = 255;
    pub const DEFAULT_ADDRESS_MAX_LEN: usize = 254;

    /// Extended grammar: quoted strings, Unicode and IP literals accepted.
    pub const fn new() -> Self {
        Self {
            allow_quoted_local_part: true,
            allow_international_local_part: true,
            allow_international_domain: true,
            allow_ip_literal_domain: true,
            simplify_quoted_local_part: false,
            nfc_local_part: false,
            local_part_max_len: Self::DEFAULT_LOCAL_PART_MAX_LEN,
            domain_max_len: Self::DEFAULT_DOMAIN_MAX_LEN,
            address_max_len: Self::DEFAULT_ADDRESS_MAX_LEN,
            check_deliverability: false,
        }
    }

    /// ASCII dot-atom at named domains only.
    pub const fn strict() -> Self {
        Self {
            allow_quoted_local_part: false,
            allow_international_local_part: false,
            allow_international_domain: false,
            allow_ip_literal_domain: false,
            ..Self::new()
        }
    }

    /// Everything on, plus the quoted-string simplification and NFC.
    pub const fn permissive() -> Self {
        Self {
            simplify_quoted_local_part: true,
            nfc_local_part: true,
            ..Self::new()
        }
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Dot-atom local part, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotAtom<'a> {
    text: &'a str,
}

impl<'a> DotAtom<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn atoms(&self) -> impl Iterator<Item = &'a str> + 'a {
        self.text.split('.')
    }
}

/// Quoted-string local part. `raw` keeps the surrounding quotes and the
/// backslashes exactly as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotedString<'a> {
    raw: &'a str,
}

impl<'a> QuotedString<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// Text between the quotes, escapes still in place.
    pub fn content(&self) -> &'a str {
        &self.raw[1..self.raw.len() - 1]
    }

    /// Characters of the content with their escape flag.
    pub fn chars(&self) -> QuotedChars<'a> {
        QuotedChars {
            inner: self.content().chars(),
        }
    }

    pub fn unescaped(&self) -> String {
        self.chars().map(|(c, _)| c).collect()
    }
}

pub struct QuotedChars<'a> {
    inner: std::str::Chars<'a>,
}

impl Iterator for QuotedChars<'_> {
    type Item = (char, bool);

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            '\\' => self.inner.next().map(|c| (c, true)),
            c => Some((c, false)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalPart<'a> {
    DotAtom(DotAtom<'a>),
    QuotedString(QuotedString<'a>),
}

impl<'a> LocalPart<'a> {
    /// Source text of the local part (quotes included).
    pub fn as_str(&self) -> &'a str {
        match self {
            Self::DotAtom(atom) => atom.as_str(),
            Self::QuotedString(quoted) => quoted.raw(),
        }
    }

    pub fn is_quoted(&self) -> bool {
        matches!(self, Self::QuotedString(_))
    }
}

/// One dot-separated component of a named domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomainLabel<'a>(pub(crate) &'a str);

impl<'a> DomainLabel<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_numeric(&self) -> bool {
        !self.0.is_empty() && self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Named domain. `encoded` is only filled when at least one label was
/// internationalized; otherwise the ASCII form is the input itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedDomain<'a> {
    text: &'a str,
    encoded: Option<String>,
    label_count: usize,
}

impl<'a> NamedDomain<'a> {
    pub(crate) fn new(text: &'a str, encoded: Option<String>, label_count: usize) -> Self {
        Self {
            text,
            encoded,
            label_count,
        }
    }

    /// Domain as written in the input.
    pub fn original(&self) -> &'a str {
        self.text
    }

    /// ASCII-compatible form (not yet lowercased for plain ASCII input).
    pub fn ascii(&self) -> &str {
        self.encoded.as_deref().unwrap_or(self.text)
    }

    pub fn is_international(&self) -> bool {
        self.encoded.is_some()
    }

    pub fn label_count(&self) -> usize {
        self.label_count
    }

    /// Labels of the ASCII-compatible form.
    pub fn labels(&self) -> impl Iterator<Item = DomainLabel<'_>> + '_ {
        self.ascii().split('.').map(DomainLabel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Domain<'a> {
    Named(NamedDomain<'a>),
    Ipv4Literal(Ipv4Addr),
    Ipv6Literal(Ipv6Addr),
}

impl Domain<'_> {
    pub fn kind(&self) -> DomainKind {
        match self {
            Self::Named(_) => DomainKind::Named,
            Self::Ipv4Literal(_) => DomainKind::Ipv4Literal,
            Self::Ipv6Literal(_) => DomainKind::Ipv6Literal,
        }
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    Named,
    Ipv4Literal,
    Ipv6Literal,
}

impl DomainKind {
    pub fn is_literal(&self) -> bool {
        !matches!(self, Self::Named)
    }
}

/// Result of a successful parse. Borrows the caller's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress<'a> {
    pub local: LocalPart<'a>,
    pub domain: Domain<'a>,
    pub original: &'a str,
}

/// Canonical, owned form of a valid address.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedAddress {
    pub(crate) address: String,
    pub(crate) local: Range<usize>,
    pub(crate) domain: Range<usize>,
    pub(crate) domain_kind: DomainKind,
}

impl NormalizedAddress {
    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn into_string(self) -> String {
        self.address
    }

    pub fn local_part(&self) -> &str {
        &self.address[self.local.clone()]
    }

    /// Canonical domain: lowercase ASCII for named domains, bracketed for literals.
    pub fn domain(&self) -> &str {
        &self.address[self.domain.clone()]
    }

    /// Domain usable for DNS queries, `None` for IP literals.
    pub fn ascii_domain(&self) -> Option<&str> {
        match self.domain_kind {
            DomainKind::Named => Some(self.domain()),
            _ => None,
        }
    }

    pub fn local_span(&self) -> Range<usize> {
        self.local.clone()
    }

    pub fn domain_span(&self) -> Range<usize> {
        self.domain.clone()
    }

    pub fn domain_kind(&self) -> DomainKind {
        self.domain_kind
    }

    /// Vrai si la partie locale n'est pas ASCII (transport SMTPUTF8 requis).
    pub fn requires_smtputf8(&self) -> bool {
        !self.local_part().is_ascii()
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl AsRef<str> for NormalizedAddress {
    fn as_ref(&self) -> &str {
        &self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_chars_flag_escapes() {
        let q = QuotedString::new(r#""a\"b\\""#);
        let chars: Vec<_> = q.chars().collect();
        assert_eq!(
            chars,
            vec![('a', false), ('"', true), ('b', false), ('\\', true)]
        );
        assert_eq!(q.unescaped(), "a\"b\\");
        assert_eq!(q.content(), r#"a\"b\\"#);
    }

    #[test]
    fn dot_atom_atoms() {
        let atom = DotAtom::new("first.last+tag");
        assert_eq!(atom.atoms().collect::<Vec<_>>(), vec!["first", "last+tag"]);
    }

    #[test]
    fn strict_profile_disables_extensions() {
        let opts = ValidationOptions::strict();
        assert!(!opts.allow_quoted_local_part);
        assert!(!opts.allow_ip_literal_domain);
        assert_eq!(opts.local_part_max_len, 64);
        assert_eq!(ValidationOptions::default(), ValidationOptions::new());
    }

    #[test]
    fn numeric_label() {
        assert!(DomainLabel("123").is_numeric());
        assert!(!DomainLabel("12a").is_numeric());
    }
}
