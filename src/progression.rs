//! Increment/decrement algorithms for range preferences.

use core::ops::{Add, Sub};
use std::rc::Rc;

/// Pure stepping function pair used by range preferences.
///
/// Results are not clamped here; the owning range preference clamps on set.
pub trait ProgressionStrategy<V> {
    /// Next value after `value`.
    fn increment(&self, value: V) -> V;

    /// Previous value before `value`.
    fn decrement(&self, value: V) -> V;
}

/// Type-erased progression strategy.
pub type AnyProgressionStrategy<V> = Rc<dyn ProgressionStrategy<V>>;

impl<V, S: ProgressionStrategy<V> + ?Sized> ProgressionStrategy<V> for Rc<S> {
    fn increment(&self, value: V) -> V {
        (**self).increment(value)
    }

    fn decrement(&self, value: V) -> V {
        (**self).decrement(value)
    }
}

/// Moves between entries of an ascending table of preferred stops.
///
/// `increment` picks the stop after the last stop `<= value`, `decrement` the
/// stop before the first stop `>= value`. Both saturate at the table ends,
/// returning `value` unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct StepsProgressionStrategy<V> {
    steps: Vec<V>,
}

impl<V: PartialOrd> StepsProgressionStrategy<V> {
    /// Create a strategy over `steps`, which must be sorted ascending.
    pub fn new(steps: Vec<V>) -> Self {
        debug_assert!(
            steps.windows(2).all(|w| w[0] <= w[1]),
            "progression steps must be sorted ascending"
        );
        Self { steps }
    }

    /// The stop table.
    pub fn steps(&self) -> &[V] {
        &self.steps
    }
}

impl<V: PartialOrd + Clone> ProgressionStrategy<V> for StepsProgressionStrategy<V> {
    fn increment(&self, value: V) -> V {
        let next = self
            .steps
            .iter()
            .rposition(|step| *step <= value)
            .and_then(|index| self.steps.get(index + 1));
        match next {
            Some(step) => step.clone(),
            None => value,
        }
    }

    fn decrement(&self, value: V) -> V {
        let previous = self
            .steps
            .iter()
            .position(|step| *step >= value)
            .and_then(|index| index.checked_sub(1))
            .and_then(|index| self.steps.get(index));
        match previous {
            Some(step) => step.clone(),
            None => value,
        }
    }
}

/// Adds or subtracts a fixed delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IncrementProgressionStrategy<V> {
    delta: V,
}

impl<V> IncrementProgressionStrategy<V> {
    /// Create a strategy stepping by `delta`.
    pub fn new(delta: V) -> Self {
        Self { delta }
    }
}

impl<V> ProgressionStrategy<V> for IncrementProgressionStrategy<V>
where
    V: Add<Output = V> + Sub<Output = V> + Copy,
{
    fn increment(&self, value: V) -> V {
        value + self.delta
    }

    fn decrement(&self, value: V) -> V {
        value - self.delta
    }
}
