//! Randomness capability handed to the roster, the bracket and the minigame.
//!
//! Anything that implements [`rand::Rng`] is a [`RandomSource`], so sessions use
//! `StdRng::from_entropy()` and tests use `StdRng::seed_from_u64`.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

pub trait RandomSource {
    /// Fair coin flip.
    fn uniform_bool(&mut self) -> bool;

    /// Uniform integer in `range`. Panics on an empty range.
    fn uniform_int(&mut self, range: RangeInclusive<i32>) -> i32;

    /// Uniform (Fisher-Yates) shuffle in place.
    fn shuffle<T>(&mut self, items: &mut [T]);

    /// `count` distinct elements chosen uniformly, in random order.
    /// Returns every element when `count` exceeds `items.len()`.
    fn sample_without_replacement<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T>;

    /// One element chosen uniformly, or None for an empty slice.
    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_bool(&mut self) -> bool {
        self.gen_bool(0.5)
    }

    fn uniform_int(&mut self, range: RangeInclusive<i32>) -> i32 {
        self.gen_range(range)
    }

    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(self);
    }

    fn sample_without_replacement<T: Clone>(&mut self, items: &[T], count: usize) -> Vec<T> {
        let mut picked: Vec<T> = items.choose_multiple(self, count).cloned().collect();
        picked.shuffle(self);
        picked
    }

    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(self)
    }
}
