//! Preference handles and their composable extensions.
//!
//! A [`Preference`] is a live view over one configurable dimension. It is not
//! data: the owner (usually a
//! [`StatefulPreferencesEditor`](crate::StatefulPreferencesEditor)) holds the
//! preferences and settings, and the handle reads and writes through it.

use core::cmp::Ordering;
use core::ops::RangeInclusive;
use std::rc::Rc;

use crate::mapped::{MappedEnumPreference, MappedPreference, MappedRangePreference};

/// A user-settable, optionally-unset handle over one configurable dimension.
pub trait Preference<V> {
    /// The raw value stored in the preferences, `None` when unset.
    fn value(&self) -> Option<V>;

    /// The value that applies if the current preferences were submitted as-is.
    ///
    /// Only meaningful when [`is_effective`](Self::is_effective) is true.
    fn effective_value(&self) -> V;

    /// Whether this preference currently has any effect.
    fn is_effective(&self) -> bool;

    /// Store a new raw value, or unset it with `None`.
    fn set(&self, value: Option<V>);

    /// Unset the preference.
    fn clear(&self) {
        self.set(None);
    }
}

/// A preference restricted to a closed set of discrete values.
///
/// Setting a value outside [`supported_values`](Self::supported_values) is a
/// caller bug and panics.
pub trait EnumPreference<V>: Preference<V> {
    /// Values accepted by [`set`](Preference::set).
    fn supported_values(&self) -> Vec<V>;
}

/// A preference over a continuous range.
///
/// Values outside [`supported_range`](Self::supported_range) are clamped on
/// [`set`](Preference::set), never rejected.
pub trait RangePreference<V>: Preference<V> {
    /// Bounds every stored value is clamped into.
    fn supported_range(&self) -> RangeInclusive<V>;

    /// Step the value up using the preference's progression strategy.
    fn increment(&self);

    /// Step the value down using the preference's progression strategy.
    fn decrement(&self);

    /// Human-readable rendering of `value`, e.g. for a slider label.
    fn format(&self, value: V) -> String;
}

/// Type-erased preference handle.
pub type AnyPreference<V> = Rc<dyn Preference<V>>;
/// Type-erased enum preference handle.
pub type AnyEnumPreference<V> = Rc<dyn EnumPreference<V>>;
/// Type-erased range preference handle.
pub type AnyRangePreference<V> = Rc<dyn RangePreference<V>>;

impl<V, P: Preference<V> + ?Sized> Preference<V> for Rc<P> {
    fn value(&self) -> Option<V> {
        (**self).value()
    }

    fn effective_value(&self) -> V {
        (**self).effective_value()
    }

    fn is_effective(&self) -> bool {
        (**self).is_effective()
    }

    fn set(&self, value: Option<V>) {
        (**self).set(value)
    }
}

impl<V, P: EnumPreference<V> + ?Sized> EnumPreference<V> for Rc<P> {
    fn supported_values(&self) -> Vec<V> {
        (**self).supported_values()
    }
}

impl<V, P: RangePreference<V> + ?Sized> RangePreference<V> for Rc<P> {
    fn supported_range(&self) -> RangeInclusive<V> {
        (**self).supported_range()
    }

    fn increment(&self) {
        (**self).increment()
    }

    fn decrement(&self) {
        (**self).decrement()
    }

    fn format(&self, value: V) -> String {
        (**self).format(value)
    }
}

impl<V, P: Preference<V> + ?Sized> Preference<V> for Box<P> {
    fn value(&self) -> Option<V> {
        (**self).value()
    }

    fn effective_value(&self) -> V {
        (**self).effective_value()
    }

    fn is_effective(&self) -> bool {
        (**self).is_effective()
    }

    fn set(&self, value: Option<V>) {
        (**self).set(value)
    }
}

impl<V, P: EnumPreference<V> + ?Sized> EnumPreference<V> for Box<P> {
    fn supported_values(&self) -> Vec<V> {
        (**self).supported_values()
    }
}

impl<V, P: RangePreference<V> + ?Sized> RangePreference<V> for Box<P> {
    fn supported_range(&self) -> RangeInclusive<V> {
        (**self).supported_range()
    }

    fn increment(&self) {
        (**self).increment()
    }

    fn decrement(&self) {
        (**self).decrement()
    }

    fn format(&self, value: V) -> String {
        (**self).format(value)
    }
}

/// Adapters available on every preference.
pub trait PreferenceExt<V>: Preference<V> + Sized {
    /// Present this preference through a pair of conversion functions.
    ///
    /// `from` converts stored values for reading and `to` converts incoming
    /// values before they are delegated.
    fn map<N, F, T>(self, from: F, to: T) -> MappedPreference<Self, V, N>
    where
        F: Fn(V) -> N + 'static,
        T: Fn(N) -> V + 'static,
    {
        MappedPreference::new(self, from, to)
    }

    /// Erase the concrete adapter chain.
    fn erased(self) -> AnyPreference<V>
    where
        Self: 'static,
    {
        Rc::new(self)
    }
}

impl<V, P: Preference<V>> PreferenceExt<V> for P {}

/// Extensions for boolean preferences.
pub trait BoolPreferenceExt: Preference<bool> {
    /// Flip the value, starting from the effective value when unset.
    fn toggle(&self) {
        let current = self.value().unwrap_or_else(|| self.effective_value());
        self.set(Some(!current));
    }

    /// A view presenting the logical negation of this preference.
    fn flipped(self) -> MappedPreference<Self, bool, bool>
    where
        Self: Sized,
    {
        MappedPreference::new(self, |v: bool| !v, |v: bool| !v)
    }
}

impl<P: Preference<bool>> BoolPreferenceExt for P {}

/// Adapters available on enum preferences.
pub trait EnumPreferenceExt<V>: EnumPreference<V> + Sized
where
    V: Clone + PartialEq + core::fmt::Debug + 'static,
{
    /// Map values element-wise, including the supported values.
    fn map_enum<N, F, T>(self, from: F, to: T) -> MappedEnumPreference<Self, V, N>
    where
        N: Clone + PartialEq + core::fmt::Debug + 'static,
        F: Fn(V) -> N + 'static,
        T: Fn(N) -> V + 'static,
    {
        MappedEnumPreference::new(self, from, to)
    }

    /// Map values with a custom transform of the supported values.
    fn map_enum_with<N, F, T, S>(
        self,
        from: F,
        to: T,
        supported_values: S,
    ) -> MappedEnumPreference<Self, V, N>
    where
        N: Clone + PartialEq + core::fmt::Debug + 'static,
        F: Fn(V) -> N + 'static,
        T: Fn(N) -> V + 'static,
        S: Fn(Vec<V>) -> Vec<N> + 'static,
    {
        MappedEnumPreference::new(self, from, to).with_supported_values_transform(supported_values)
    }

    /// Restrict the supported values to `values`.
    ///
    /// `values` should be a subset of the wrapped preference's supported
    /// values; anything else is rejected by the wrapped preference on `set`.
    fn with_supported_values(self, values: Vec<V>) -> MappedEnumPreference<Self, V, V> {
        MappedEnumPreference::new(self, |v: V| v, |v: V| v)
            .with_supported_values_transform(move |_| values.clone())
    }

    /// Erase the concrete adapter chain.
    fn erased_enum(self) -> AnyEnumPreference<V>
    where
        Self: 'static,
    {
        Rc::new(self)
    }
}

impl<V, P> EnumPreferenceExt<V> for P
where
    V: Clone + PartialEq + core::fmt::Debug + 'static,
    P: EnumPreference<V>,
{
}

/// Adapters available on range preferences.
pub trait RangePreferenceExt<V>: RangePreference<V> + Sized
where
    V: Clone + PartialOrd + 'static,
{
    /// Map values through a pair of conversion functions.
    ///
    /// By default the supported range maps both bounds through `from`, the
    /// progression delegates to the wrapped preference, and `format` formats
    /// the converted-back value with the wrapped preference.
    fn map_range<N, F, T>(self, from: F, to: T) -> MappedRangePreference<Self, V, N>
    where
        N: Clone + PartialOrd + 'static,
        F: Fn(V) -> N + 'static,
        T: Fn(N) -> V + 'static,
    {
        MappedRangePreference::new(self, from, to)
    }

    /// Erase the concrete adapter chain.
    fn erased_range(self) -> AnyRangePreference<V>
    where
        Self: 'static,
    {
        Rc::new(self)
    }
}

impl<V, P> RangePreferenceExt<V> for P
where
    V: Clone + PartialOrd + 'static,
    P: RangePreference<V>,
{
}

/// Clamp `value` into `range`.
/// Values that do not compare with the bounds (NaN) land on the lower bound.
pub(crate) fn clamp_to_range<V: PartialOrd + Clone>(value: V, range: &RangeInclusive<V>) -> V {
    match (
        value.partial_cmp(range.start()),
        value.partial_cmp(range.end()),
    ) {
        (Some(Ordering::Less), _) | (None, _) | (_, None) => range.start().clone(),
        (_, Some(Ordering::Greater)) => range.end().clone(),
        _ => value,
    }
}
