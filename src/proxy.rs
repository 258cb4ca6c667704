//! Closure-backed preference handles.
//!
//! Editors build these to bind a handle to one field of the state they own
//! without the handle knowing how that state is stored.

use core::fmt::Debug;
use core::ops::RangeInclusive;
use std::rc::Rc;

use crate::preference::{clamp_to_range, EnumPreference, Preference, RangePreference};
use crate::progression::{AnyProgressionStrategy, ProgressionStrategy};

/// A preference delegating every operation to closures.
pub struct ProxyPreference<V> {
    value: Box<dyn Fn() -> Option<V>>,
    effective_value: Box<dyn Fn() -> V>,
    is_effective: Box<dyn Fn() -> bool>,
    set: Box<dyn Fn(Option<V>)>,
}

impl<V> ProxyPreference<V> {
    pub fn new<A, B, C, D>(value: A, effective_value: B, is_effective: C, set: D) -> Self
    where
        A: Fn() -> Option<V> + 'static,
        B: Fn() -> V + 'static,
        C: Fn() -> bool + 'static,
        D: Fn(Option<V>) + 'static,
    {
        Self {
            value: Box::new(value),
            effective_value: Box::new(effective_value),
            is_effective: Box::new(is_effective),
            set: Box::new(set),
        }
    }
}

impl<V> Preference<V> for ProxyPreference<V> {
    fn value(&self) -> Option<V> {
        (self.value)()
    }

    fn effective_value(&self) -> V {
        (self.effective_value)()
    }

    fn is_effective(&self) -> bool {
        (self.is_effective)()
    }

    fn set(&self, value: Option<V>) {
        (self.set)(value)
    }
}

/// A proxy preference restricted to a closed set of values.
pub struct ProxyEnumPreference<V> {
    base: ProxyPreference<V>,
    supported_values: Vec<V>,
}

impl<V> ProxyEnumPreference<V> {
    pub fn new(base: ProxyPreference<V>, supported_values: Vec<V>) -> Self {
        Self {
            base,
            supported_values,
        }
    }
}

impl<V: PartialEq + Debug> Preference<V> for ProxyEnumPreference<V> {
    fn value(&self) -> Option<V> {
        self.base.value()
    }

    fn effective_value(&self) -> V {
        self.base.effective_value()
    }

    fn is_effective(&self) -> bool {
        self.base.is_effective()
    }

    fn set(&self, value: Option<V>) {
        if let Some(v) = &value {
            assert!(
                self.supported_values.contains(v),
                "{:?} is not in the supported values {:?}",
                v,
                self.supported_values
            );
        }
        self.base.set(value);
    }
}

impl<V: PartialEq + Debug + Clone> EnumPreference<V> for ProxyEnumPreference<V> {
    fn supported_values(&self) -> Vec<V> {
        self.supported_values.clone()
    }
}

/// A proxy preference clamped into a range and stepped by a strategy.
pub struct ProxyRangePreference<V> {
    base: ProxyPreference<V>,
    supported_range: RangeInclusive<V>,
    progression: AnyProgressionStrategy<V>,
    format: Rc<dyn Fn(V) -> String>,
}

impl<V> ProxyRangePreference<V> {
    pub fn new<S, F>(
        base: ProxyPreference<V>,
        supported_range: RangeInclusive<V>,
        progression: S,
        format: F,
    ) -> Self
    where
        S: ProgressionStrategy<V> + 'static,
        F: Fn(V) -> String + 'static,
    {
        Self {
            base,
            supported_range,
            progression: Rc::new(progression),
            format: Rc::new(format),
        }
    }
}

impl<V: Clone + PartialOrd + Debug> Preference<V> for ProxyRangePreference<V> {
    fn value(&self) -> Option<V> {
        self.base.value()
    }

    fn effective_value(&self) -> V {
        self.base.effective_value()
    }

    fn is_effective(&self) -> bool {
        self.base.is_effective()
    }

    fn set(&self, value: Option<V>) {
        let value = value.map(|v| {
            let clamped = clamp_to_range(v.clone(), &self.supported_range);
            if clamped != v {
                log::debug!("clamped {:?} into {:?}", v, self.supported_range);
            }
            clamped
        });
        self.base.set(value);
    }
}

impl<V: Clone + PartialOrd + Debug> RangePreference<V> for ProxyRangePreference<V> {
    fn supported_range(&self) -> RangeInclusive<V> {
        self.supported_range.clone()
    }

    fn increment(&self) {
        let current = self.value().unwrap_or_else(|| self.effective_value());
        self.set(Some(self.progression.increment(current)));
    }

    fn decrement(&self) {
        let current = self.value().unwrap_or_else(|| self.effective_value());
        self.set(Some(self.progression.decrement(current)));
    }

    fn format(&self, value: V) -> String {
        (self.format)(value)
    }
}
