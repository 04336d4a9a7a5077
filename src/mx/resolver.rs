use trust_dns_resolver::{
    Resolver,
    error::{ResolveError, ResolveErrorKind},
};

use super::{Error, MxRecord, MxStatus};
use crate::deliverability::{DeliverabilityResolver, Reachability};
use crate::validator::NormalizedAddress;

/// Lookup MX records for `domain` using the system resolver.
///
/// The domain goes through IDNA before querying DNS. Records come back sorted
/// by ascending preference, duplicates removed.
pub fn check_mx(domain: &str) -> Result<MxStatus, Error> {
    let ascii = normalize_domain(domain)?;
    let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
    resolve_with(&resolver, &ascii)
}

/// [`DeliverabilityResolver`] backed by MX lookups.
///
/// IP literals have nothing to look up and answer `Unknown`, as do lookup
/// failures other than "no records".
pub struct MxResolver {
    resolver: Resolver,
}

impl MxResolver {
    pub fn from_system_conf() -> Result<Self, Error> {
        let resolver = Resolver::from_system_conf().map_err(Error::resolver_init)?;
        Ok(Self { resolver })
    }

    pub fn with_resolver(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

impl DeliverabilityResolver for MxResolver {
    fn reachability(&self, address: &NormalizedAddress) -> Reachability {
        reachability_with(&self.resolver, address)
    }
}

pub(crate) fn reachability_with<R>(resolver: &R, address: &NormalizedAddress) -> Reachability
where
    R: LookupMx,
{
    let Some(domain) = address.ascii_domain() else {
        return Reachability::Unknown;
    };
    match resolve_with(resolver, domain) {
        Ok(status) => status.reachability(),
        Err(_err) => {
            #[cfg(feature = "with-tracing")]
            tracing::debug!(domain, error = %_err, "MX lookup failed");
            Reachability::Unknown
        }
    }
}

pub(crate) fn resolve_with<R>(resolver: &R, ascii_domain: &str) -> Result<MxStatus, Error>
where
    R: LookupMx,
{
    let mut records = resolver.lookup_mx(ascii_domain)?;

    records.sort();
    records.dedup();

    #[cfg(feature = "with-tracing")]
    tracing::debug!(domain = ascii_domain, count = records.len(), "MX lookup");

    if records.is_empty() {
        Ok(MxStatus::NoRecords)
    } else {
        Ok(MxStatus::Records(records))
    }
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, Error> {
    let trimmed = domain.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        return Err(Error::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(|err| Error::idna(trimmed, err))
}

pub(crate) fn normalize_exchange(exchange: String) -> String {
    let trimmed = exchange.trim_end_matches('.');
    trimmed.to_ascii_lowercase()
}

pub(crate) trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error>;
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        let lookup = match Resolver::mx_lookup(self, domain) {
            Ok(lookup) => lookup,
            Err(err) if should_treat_as_empty(&err) => return Ok(Vec::new()),
            Err(err) => return Err(Error::lookup(domain, err)),
        };
        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), normalize_exchange(mx.exchange().to_utf8())))
            .collect())
    }
}

// NXDOMAIN arrives as NoRecordsFound with the matching response code.
fn should_treat_as_empty(err: &ResolveError) -> bool {
    matches!(err.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, Error> {
        (self.on_lookup)(domain)
    }
}
