#![forbid(unsafe_code)]
//! mailsyntax_lib — validation et normalisation d'adresses e-mail
//! (dot-atom, quoted-string, IDN, littéraux IP).

pub mod batch;
pub mod deliverability;
pub mod validator;

pub use batch::{PARALLEL_THRESHOLD, batch_is_valid, batch_is_valid_with, batch_validate};
pub use deliverability::{
    CheckedAddress, DeliverabilityResolver, Reachability, validate_with_resolver,
};
pub use validator::{
    Domain, DomainKind, ErrorKind, Feature, LiteralReason, LocalPart, NormalizedAddress,
    ParsedAddress, ValidationError, ValidationOptions, is_valid, is_valid_with, normalize, parse,
    validate,
};

#[cfg(feature = "with-mx")]
pub mod mx;
#[cfg(feature = "with-mx")]
pub use mx::{Error as MxError, MxRecord, MxResolver, MxStatus, check_mx};
