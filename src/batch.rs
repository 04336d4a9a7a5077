//! Validation par lots: même longueur, même ordre que l'entrée.
//!
//! Avec la feature `with-rayon`, les lots d'au moins [`PARALLEL_THRESHOLD`]
//! éléments sont répartis sur le pool global de rayon. Le résultat est
//! identique à un passage séquentiel.

#[cfg(feature = "with-rayon")]
use rayon::prelude::*;

use crate::validator::{self, NormalizedAddress, ValidationError, ValidationOptions};

/// En dessous, le coût du fan-out dépasse le gain.
pub const PARALLEL_THRESHOLD: usize = 1024;

pub fn batch_is_valid<S>(texts: &[S]) -> Vec<bool>
where
    S: AsRef<str> + Sync,
{
    batch_is_valid_with(texts, &ValidationOptions::new())
}

pub fn batch_is_valid_with<S>(texts: &[S], options: &ValidationOptions) -> Vec<bool>
where
    S: AsRef<str> + Sync,
{
    run(texts, |text| validator::is_valid_with(text, options))
}

pub fn batch_validate<S>(
    texts: &[S],
    options: &ValidationOptions,
) -> Vec<Result<NormalizedAddress, ValidationError>>
where
    S: AsRef<str> + Sync,
{
    run(texts, |text| validator::validate(text, options))
}

#[cfg(feature = "with-rayon")]
fn run<S, T, F>(texts: &[S], check: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    T: Send,
    F: Fn(&str) -> T + Sync,
{
    if texts.len() < PARALLEL_THRESHOLD {
        return sequential(texts, check);
    }

    #[cfg(feature = "with-tracing")]
    tracing::trace!(len = texts.len(), "parallel batch");

    let mut out = Vec::with_capacity(texts.len());
    texts
        .par_iter()
        .map(|text| check(text.as_ref()))
        .collect_into_vec(&mut out);
    out
}

#[cfg(not(feature = "with-rayon"))]
fn run<S, T, F>(texts: &[S], check: F) -> Vec<T>
where
    S: AsRef<str> + Sync,
    F: Fn(&str) -> T,
{
    sequential(texts, check)
}

fn sequential<S, T, F>(texts: &[S], check: F) -> Vec<T>
where
    S: AsRef<str>,
    F: Fn(&str) -> T,
{
    #[cfg(feature = "with-tracing")]
    tracing::trace!(len = texts.len(), "sequential batch");

    texts.iter().map(|text| check(text.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_batch() {
        let texts: [&str; 0] = [];
        assert!(batch_is_valid(&texts).is_empty());
        assert!(batch_validate(&texts, &ValidationOptions::new()).is_empty());
    }

    #[test]
    fn keeps_order() {
        let texts = ["alice@example.com", "plainaddress", "bob@Example.org"];
        assert_eq!(batch_is_valid(&texts), vec![true, false, true]);

        let results = batch_validate(&texts, &ValidationOptions::new());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().as_str(), "alice@example.com");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().as_str(), "bob@example.org");
    }

    #[test]
    fn accepts_owned_strings() {
        let texts = vec![String::from("x@example.com"), String::from("@example.com")];
        assert_eq!(batch_is_valid(&texts), vec![true, false]);
    }

    #[test]
    fn large_batch_matches_single_calls() {
        let texts: Vec<String> = (0..PARALLEL_THRESHOLD * 2 + 7)
            .map(|i| match i % 3 {
                0 => format!("user{i}@example.com"),
                1 => format!("user{i}@@example.com"),
                _ => format!("\"user {i}\"@Example.NET"),
            })
            .collect();
        let options = ValidationOptions::new();
        let batch = batch_validate(&texts, &options);
        assert_eq!(batch.len(), texts.len());
        for (text, result) in texts.iter().zip(&batch) {
            assert_eq!(result, &validator::validate(text, &options));
        }
        let flags = batch_is_valid_with(&texts, &options);
        assert_eq!(flags.iter().filter(|ok| **ok).count(), texts.len() - texts.len() / 3);
    }

    proptest! {
        #[test]
        fn batch_agrees_with_validate(texts in prop::collection::vec("[a-z@.\"-]{0,16}", 0..40)) {
            let options = ValidationOptions::new();
            let batch = batch_validate(&texts, &options);
            let flags = batch_is_valid_with(&texts, &options);
            prop_assert_eq!(batch.len(), texts.len());
            for ((text, result), ok) in texts.iter().zip(&batch).zip(&flags) {
                prop_assert_eq!(result, &validator::validate(text, &options));
                prop_assert_eq!(*ok, result.is_ok());
            }
        }
    }
}
