//! Preference adapters converting values between representations.
//!
//! Adapters wrap any preference and keep its contract: an enum adapter still
//! rejects unsupported values, a range adapter still clamps. Adapters nest
//! without unwrapping, so a mapped preference can be mapped again.

use core::fmt::Debug;
use core::ops::RangeInclusive;
use std::rc::Rc;

use crate::preference::{clamp_to_range, EnumPreference, Preference, RangePreference};
use crate::progression::{AnyProgressionStrategy, ProgressionStrategy};

type Conversion<A, B> = Rc<dyn Fn(A) -> B>;

/// A preference presented through a pair of conversion functions.
pub struct MappedPreference<P, O, N> {
    inner: P,
    from: Conversion<O, N>,
    to: Conversion<N, O>,
}

impl<P, O, N> MappedPreference<P, O, N> {
    /// Wrap `inner`, reading through `from` and writing through `to`.
    pub fn new<F, T>(inner: P, from: F, to: T) -> Self
    where
        F: Fn(O) -> N + 'static,
        T: Fn(N) -> O + 'static,
    {
        Self {
            inner,
            from: Rc::new(from),
            to: Rc::new(to),
        }
    }

    /// The wrapped preference.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P, O, N> Preference<N> for MappedPreference<P, O, N>
where
    P: Preference<O>,
{
    fn value(&self) -> Option<N> {
        self.inner.value().map(|v| (self.from)(v))
    }

    fn effective_value(&self) -> N {
        (self.from)(self.inner.effective_value())
    }

    fn is_effective(&self) -> bool {
        self.inner.is_effective()
    }

    fn set(&self, value: Option<N>) {
        self.inner.set(value.map(|v| (self.to)(v)));
    }
}

/// An enum preference presented through a pair of conversion functions.
pub struct MappedEnumPreference<P, O, N> {
    base: MappedPreference<P, O, N>,
    supported_values: Rc<dyn Fn(Vec<O>) -> Vec<N>>,
}

impl<P, O, N> MappedEnumPreference<P, O, N>
where
    O: 'static,
    N: 'static,
{
    /// Wrap `inner`, mapping its supported values element-wise with `from`.
    pub fn new<F, T>(inner: P, from: F, to: T) -> Self
    where
        F: Fn(O) -> N + 'static,
        T: Fn(N) -> O + 'static,
    {
        let base = MappedPreference::new(inner, from, to);
        let from = Rc::clone(&base.from);
        Self {
            base,
            supported_values: Rc::new(move |values: Vec<O>| {
                values.into_iter().map(|v| from(v)).collect()
            }),
        }
    }

    /// Replace how the wrapped supported values are transformed.
    pub fn with_supported_values_transform<S>(mut self, transform: S) -> Self
    where
        S: Fn(Vec<O>) -> Vec<N> + 'static,
    {
        self.supported_values = Rc::new(transform);
        self
    }

    /// The wrapped preference.
    pub fn inner(&self) -> &P {
        self.base.inner()
    }
}

impl<P, O, N> Preference<N> for MappedEnumPreference<P, O, N>
where
    P: EnumPreference<O>,
    N: PartialEq + Debug,
{
    fn value(&self) -> Option<N> {
        self.base.value()
    }

    fn effective_value(&self) -> N {
        self.base.effective_value()
    }

    fn is_effective(&self) -> bool {
        self.base.is_effective()
    }

    fn set(&self, value: Option<N>) {
        if let Some(v) = &value {
            let supported = self.supported_values();
            assert!(
                supported.contains(v),
                "{:?} is not in the supported values {:?}",
                v,
                supported
            );
        }
        self.base.set(value);
    }
}

impl<P, O, N> EnumPreference<N> for MappedEnumPreference<P, O, N>
where
    P: EnumPreference<O>,
    N: PartialEq + Debug,
{
    fn supported_values(&self) -> Vec<N> {
        (self.supported_values)(self.base.inner.supported_values())
    }
}

/// A range preference presented through a pair of conversion functions.
pub struct MappedRangePreference<P, O, N> {
    base: MappedPreference<P, O, N>,
    supported_range: Rc<dyn Fn(RangeInclusive<O>) -> RangeInclusive<N>>,
    format: Option<Rc<dyn Fn(N) -> String>>,
    progression: Option<AnyProgressionStrategy<N>>,
}

impl<P, O, N> MappedRangePreference<P, O, N>
where
    O: Clone + 'static,
    N: 'static,
{
    /// Wrap `inner`, mapping both bounds of its range with `from`.
    pub fn new<F, T>(inner: P, from: F, to: T) -> Self
    where
        F: Fn(O) -> N + 'static,
        T: Fn(N) -> O + 'static,
    {
        let base = MappedPreference::new(inner, from, to);
        let from = Rc::clone(&base.from);
        Self {
            base,
            supported_range: Rc::new(move |range: RangeInclusive<O>| {
                let (start, end) = range.into_inner();
                from(start)..=from(end)
            }),
            format: None,
            progression: None,
        }
    }

    /// Replace how the wrapped supported range is transformed.
    pub fn with_supported_range<S>(mut self, transform: S) -> Self
    where
        S: Fn(RangeInclusive<O>) -> RangeInclusive<N> + 'static,
    {
        self.supported_range = Rc::new(transform);
        self
    }

    /// Format values with `format` instead of the wrapped preference.
    pub fn with_format<F>(mut self, format: F) -> Self
    where
        F: Fn(N) -> String + 'static,
    {
        self.format = Some(Rc::new(format));
        self
    }

    /// Step values with `strategy` instead of the wrapped preference.
    pub fn with_progression<S>(mut self, strategy: S) -> Self
    where
        S: ProgressionStrategy<N> + 'static,
    {
        self.progression = Some(Rc::new(strategy));
        self
    }

    /// The wrapped preference.
    pub fn inner(&self) -> &P {
        self.base.inner()
    }
}

impl<P, O, N> Preference<N> for MappedRangePreference<P, O, N>
where
    P: RangePreference<O>,
    N: Clone + PartialOrd + Debug,
{
    fn value(&self) -> Option<N> {
        self.base.value()
    }

    fn effective_value(&self) -> N {
        self.base.effective_value()
    }

    fn is_effective(&self) -> bool {
        self.base.is_effective()
    }

    fn set(&self, value: Option<N>) {
        let range = self.supported_range();
        let value = value.map(|v| {
            let clamped = clamp_to_range(v.clone(), &range);
            if clamped != v {
                log::debug!("clamped {:?} into {:?}", v, range);
            }
            clamped
        });
        self.base.set(value);
    }
}

impl<P, O, N> RangePreference<N> for MappedRangePreference<P, O, N>
where
    P: RangePreference<O>,
    N: Clone + PartialOrd + Debug,
{
    fn supported_range(&self) -> RangeInclusive<N> {
        let (start, end) = (self.supported_range)(self.base.inner.supported_range()).into_inner();
        // A decreasing conversion flips the bounds.
        if start > end {
            end..=start
        } else {
            start..=end
        }
    }

    fn increment(&self) {
        match &self.progression {
            Some(strategy) => {
                let current = self.value().unwrap_or_else(|| self.effective_value());
                self.set(Some(strategy.increment(current)));
            }
            None => self.base.inner.increment(),
        }
    }

    fn decrement(&self) {
        match &self.progression {
            Some(strategy) => {
                let current = self.value().unwrap_or_else(|| self.effective_value());
                self.set(Some(strategy.decrement(current)));
            }
            None => self.base.inner.decrement(),
        }
    }

    fn format(&self, value: N) -> String {
        match &self.format {
            Some(format) => format(value),
            None => self.base.inner.format((self.base.to)(value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::{EnumPreferenceExt, PreferenceExt, RangePreferenceExt};
    use crate::progression::IncrementProgressionStrategy;
    use core::cell::Cell;

    struct Stored<V: Copy> {
        value: Cell<Option<V>>,
        default: V,
    }

    impl<V: Copy> Stored<V> {
        fn new(default: V) -> Self {
            Self {
                value: Cell::new(None),
                default,
            }
        }
    }

    impl<V: Copy> Preference<V> for Stored<V> {
        fn value(&self) -> Option<V> {
            self.value.get()
        }
        fn effective_value(&self) -> V {
            self.value.get().unwrap_or(self.default)
        }
        fn is_effective(&self) -> bool {
            true
        }
        fn set(&self, value: Option<V>) {
            self.value.set(value);
        }
    }

    struct Choice(Stored<u8>);

    impl Preference<u8> for Choice {
        fn value(&self) -> Option<u8> {
            self.0.value()
        }
        fn effective_value(&self) -> u8 {
            self.0.effective_value()
        }
        fn is_effective(&self) -> bool {
            true
        }
        fn set(&self, value: Option<u8>) {
            if let Some(v) = value {
                assert!(self.supported_values().contains(&v), "unsupported {}", v);
            }
            self.0.set(value);
        }
    }

    impl EnumPreference<u8> for Choice {
        fn supported_values(&self) -> Vec<u8> {
            vec![1, 2, 3]
        }
    }

    struct Level(Stored<f64>);

    impl Preference<f64> for Level {
        fn value(&self) -> Option<f64> {
            self.0.value()
        }
        fn effective_value(&self) -> f64 {
            self.0.effective_value()
        }
        fn is_effective(&self) -> bool {
            true
        }
        fn set(&self, value: Option<f64>) {
            self.0
                .set(value.map(|v| clamp_to_range(v, &self.supported_range())));
        }
    }

    impl RangePreference<f64> for Level {
        fn supported_range(&self) -> RangeInclusive<f64> {
            0.0..=1.0
        }
        fn increment(&self) {
            self.set(Some(self.effective_value() + 0.25));
        }
        fn decrement(&self) {
            self.set(Some(self.effective_value() - 0.25));
        }
        fn format(&self, value: f64) -> String {
            format!("{:.2}", value)
        }
    }

    #[test]
    fn mapped_preference_converts_both_directions() {
        let mapped = Stored::new(10i32).map(|v| v * 2, |v| v / 2);
        assert_eq!(mapped.value(), None);
        assert_eq!(mapped.effective_value(), 20);
        mapped.set(Some(8));
        assert_eq!(mapped.inner().value(), Some(4));
        assert_eq!(mapped.value(), Some(8));
    }

    #[test]
    fn mapped_preferences_compose() {
        let twice = Stored::new(1i32)
            .map(|v| v + 1, |v| v - 1)
            .map(|v| v.to_string(), |s: String| s.parse().unwrap_or_default());
        assert_eq!(twice.effective_value(), "2");
        twice.set(Some("5".to_string()));
        assert_eq!(twice.inner().inner().value(), Some(4));
    }

    #[test]
    fn mapped_enum_transforms_supported_values() {
        let mapped = Choice(Stored::new(1)).map_enum(|v| char::from(b'a' + v), |c| c as u8 - b'a');
        assert_eq!(mapped.supported_values(), vec!['b', 'c', 'd']);
        mapped.set(Some('c'));
        assert_eq!(mapped.inner().value(), Some(2));
    }

    #[test]
    #[should_panic(expected = "is not in the supported values")]
    fn mapped_enum_rejects_values_outside_transformed_set() {
        let restricted = Choice(Stored::new(1)).with_supported_values(vec![1, 2]);
        assert_eq!(restricted.supported_values(), vec![1, 2]);
        restricted.set(Some(3));
    }

    #[test]
    fn mapped_enum_with_custom_supported_values() {
        let mapped = Choice(Stored::new(1)).map_enum_with(
            |v| v as u32 * 10,
            |v| (v / 10) as u8,
            |values| values.into_iter().rev().map(|v| v as u32 * 10).collect(),
        );
        assert_eq!(mapped.supported_values(), vec![30, 20, 10]);
    }

    #[test]
    fn mapped_range_clamps_to_transformed_range() {
        let percent = Level(Stored::new(0.5)).map_range(|v| v * 100.0, |v| v / 100.0);
        assert_eq!(percent.supported_range(), 0.0..=100.0);
        percent.set(Some(250.0));
        assert_eq!(percent.inner().value(), Some(1.0));
        assert_eq!(percent.value(), Some(100.0));
    }

    #[test]
    fn mapped_range_clamps_nan_to_lower_bound() {
        let percent = Level(Stored::new(0.5)).map_range(|v| v * 100.0, |v| v / 100.0);
        percent.set(Some(f64::NAN));
        assert_eq!(percent.inner().value(), Some(0.0));
        assert!(percent
            .supported_range()
            .contains(&percent.value().unwrap_or(f64::NAN)));
    }

    #[test]
    fn mapped_range_clamps_to_narrowed_range() {
        let narrowed = Level(Stored::new(0.5))
            .map_range(|v| v, |v| v)
            .with_supported_range(|_| 0.2..=0.8);
        narrowed.set(Some(0.9));
        assert_eq!(narrowed.value(), Some(0.8));
        narrowed.set(Some(0.0));
        assert_eq!(narrowed.value(), Some(0.2));
    }

    #[test]
    fn mapped_range_reversed_conversion_keeps_range_well_formed() {
        let inverted = Level(Stored::new(0.5)).map_range(|v| 1.0 - v, |v| 1.0 - v);
        assert_eq!(inverted.supported_range(), 0.0..=1.0);
    }

    #[test]
    fn mapped_range_delegates_progression_and_format_by_default() {
        let percent = Level(Stored::new(0.5)).map_range(|v| v * 100.0, |v| v / 100.0);
        percent.increment();
        assert_eq!(percent.value(), Some(75.0));
        assert_eq!(percent.format(50.0), "0.50");
    }

    #[test]
    fn mapped_range_overrides_progression_and_format() {
        let percent = Level(Stored::new(0.5))
            .map_range(|v| v * 100.0, |v| v / 100.0)
            .with_progression(IncrementProgressionStrategy::new(10.0))
            .with_format(|v| format!("{}%", v));
        percent.decrement();
        assert_eq!(percent.value(), Some(40.0));
        assert_eq!(percent.format(40.0), "40%");
        for _ in 0..10 {
            percent.decrement();
        }
        assert_eq!(percent.value(), Some(0.0));
    }
}
