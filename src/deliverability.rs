//! Point d'extension pour la délivrabilité: la grammaire est validée d'abord,
//! la réponse du résolveur est rangée à côté, jamais mélangée au résultat.

use crate::validator::{self, NormalizedAddress, ValidationError, ValidationOptions};

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reachability {
    Reachable,
    Unreachable,
    Unknown,
}

/// Collaborateur externe (DNS, cache, service maison...).
pub trait DeliverabilityResolver {
    fn reachability(&self, address: &NormalizedAddress) -> Reachability;
}

impl<F> DeliverabilityResolver for F
where
    F: Fn(&NormalizedAddress) -> Reachability,
{
    fn reachability(&self, address: &NormalizedAddress) -> Reachability {
        self(address)
    }
}

#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedAddress {
    pub address: NormalizedAddress,
    /// `None` quand `check_deliverability` est désactivé.
    pub deliverability: Option<Reachability>,
}

pub fn validate_with_resolver<R>(
    email: &str,
    options: &ValidationOptions,
    resolver: &R,
) -> Result<CheckedAddress, ValidationError>
where
    R: DeliverabilityResolver + ?Sized,
{
    let address = validator::validate(email, options)?;
    let deliverability = if options.check_deliverability {
        let answer = resolver.reachability(&address);
        #[cfg(feature = "with-tracing")]
        tracing::debug!(address = address.as_str(), ?answer, "deliverability checked");
        Some(answer)
    } else {
        None
    };
    Ok(CheckedAddress {
        address,
        deliverability,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::validator::{DomainKind, ErrorKind};

    struct Counting {
        calls: Cell<usize>,
        answer: Reachability,
    }

    impl DeliverabilityResolver for Counting {
        fn reachability(&self, _address: &NormalizedAddress) -> Reachability {
            self.calls.set(self.calls.get() + 1);
            self.answer
        }
    }

    fn counting(answer: Reachability) -> Counting {
        Counting {
            calls: Cell::new(0),
            answer,
        }
    }

    fn checking() -> ValidationOptions {
        ValidationOptions {
            check_deliverability: true,
            ..ValidationOptions::new()
        }
    }

    #[test]
    fn resolver_skipped_when_disabled() {
        let resolver = counting(Reachability::Reachable);
        let checked =
            validate_with_resolver("alice@example.com", &ValidationOptions::new(), &resolver)
                .unwrap();
        assert_eq!(checked.deliverability, None);
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn resolver_answer_attached() {
        let resolver = counting(Reachability::Unreachable);
        let checked = validate_with_resolver("alice@Example.com", &checking(), &resolver).unwrap();
        assert_eq!(checked.address.as_str(), "alice@example.com");
        assert_eq!(checked.deliverability, Some(Reachability::Unreachable));
        assert_eq!(resolver.calls.get(), 1);
    }

    #[test]
    fn resolver_not_called_on_grammar_error() {
        let resolver = counting(Reachability::Reachable);
        let err = validate_with_resolver("two@@ats.com", &checking(), &resolver).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MultipleAtSigns);
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn closures_are_resolvers() {
        let by_kind = |address: &NormalizedAddress| {
            if address.domain_kind() == DomainKind::Named {
                Reachability::Reachable
            } else {
                Reachability::Unknown
            }
        };
        let named = validate_with_resolver("a@example.com", &checking(), &by_kind).unwrap();
        assert_eq!(named.deliverability, Some(Reachability::Reachable));
        let literal = validate_with_resolver("a@[10.0.0.1]", &checking(), &by_kind).unwrap();
        assert_eq!(literal.deliverability, Some(Reachability::Unknown));
    }
}
