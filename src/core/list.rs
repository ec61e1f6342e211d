use std::sync::Arc;

use rand::Rng;

use crate::error::{Error, Result};
use crate::utils::validation;

pub trait SliceExt<T> {
    /// Read-only snapshot of the items.
    fn to_immutable(&self) -> Arc<[T]>
    where
        T: Clone;

    /// Uniformly random item; fails on an empty slice.
    fn pick_random(&self) -> Result<&T>;
    fn pick_random_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T>;
}

impl<T> SliceExt<T> for [T] {
    fn to_immutable(&self) -> Arc<[T]>
    where
        T: Clone,
    {
        Arc::from(self)
    }

    fn pick_random(&self) -> Result<&T> {
        self.pick_random_with_rng(&mut rand::rng())
    }

    fn pick_random_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&T> {
        validation::require_non_empty_slice(self, "items", "Cannot pick from an empty list")?;
        self.get(rng.random_range(0..self.len()))
            .ok_or_else(|| Error::internal_unexpected("random index out of range"))
    }
}

pub trait VecExt<T> {
    /// Clear the vector and refill it from `items`.
    fn replace_with<I: IntoIterator<Item = T>>(&mut self, items: I) -> &mut Self;
}

impl<T> VecExt<T> for Vec<T> {
    fn replace_with<I: IntoIterator<Item = T>>(&mut self, items: I) -> &mut Self {
        self.clear();
        self.extend(items);
        self
    }
}

pub trait JoinExt {
    /// Concatenate every item followed by `delimiter`, trailing one included:
    /// `["a", "b"]` with `","` gives `"a,b,"`.
    fn join_each(&self, delimiter: &str) -> String;
}

impl<S: AsRef<str>> JoinExt for [S] {
    fn join_each(&self, delimiter: &str) -> String {
        self.iter().fold(String::new(), |mut out, item| {
            out.push_str(item.as_ref());
            out.push_str(delimiter);
            out
        })
    }
}
