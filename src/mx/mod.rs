//! DNS MX resolution (optional `with-mx` feature).
//!
//! [`check_mx`] performs a synchronous lookup through the system resolver.
//! [`MxResolver`] plugs the same lookup into
//! [`validate_with_resolver`](crate::deliverability::validate_with_resolver).

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{MxResolver, check_mx};
pub use types::{MxRecord, MxStatus};
