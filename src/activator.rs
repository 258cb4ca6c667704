//! Cross-preference dependency rules.
//!
//! A setting can depend on another preference having a given value: word
//! spacing, for instance, only applies once publisher styles are disabled. An
//! activator expresses such a rule as a predicate over the preferences plus a
//! mutation forcing the preferences into a state where the predicate holds.

use std::rc::Rc;

/// Predicate and mutator expressing when a setting is active.
pub trait SettingActivator<P> {
    /// Whether the setting is active with the given preferences.
    fn is_active(&self, preferences: &P) -> bool;

    /// Mutate `preferences` so that [`is_active`](Self::is_active) holds.
    fn activate(&self, preferences: &mut P);

    /// Copy of `preferences` with this activator applied.
    ///
    /// The input is left untouched.
    fn activated(&self, preferences: &P) -> P
    where
        P: Clone,
    {
        let mut copy = preferences.clone();
        self.activate(&mut copy);
        copy
    }

    /// Conjunction of `self` (inner) and `outer`.
    fn combine<O>(self, outer: O) -> CombinedSettingActivator<Self, O>
    where
        Self: Sized,
        O: SettingActivator<P>,
    {
        CombinedSettingActivator::new(self, outer)
    }
}

impl<P, A: SettingActivator<P> + ?Sized> SettingActivator<P> for Rc<A> {
    fn is_active(&self, preferences: &P) -> bool {
        (**self).is_active(preferences)
    }

    fn activate(&self, preferences: &mut P) {
        (**self).activate(preferences)
    }
}

/// Always active; activation does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSettingActivator;

impl<P> SettingActivator<P> for NullSettingActivator {
    fn is_active(&self, _preferences: &P) -> bool {
        true
    }

    fn activate(&self, _preferences: &mut P) {}
}

/// Requires another preference to resolve to a given value.
///
/// The dependency is read with a resolver rather than the raw field so that
/// defaults count: an unset `publisher_styles` that defaults to `true` still
/// blocks a setting requiring `false`.
pub struct RequirePreferenceSettingActivator<P, V> {
    required: V,
    resolve: Box<dyn Fn(&P) -> V>,
    assign: Box<dyn Fn(&mut P, V)>,
}

impl<P, V> RequirePreferenceSettingActivator<P, V> {
    /// `resolve` reads the dependency's effective value, `assign` stores it.
    pub fn new<R, A>(required: V, resolve: R, assign: A) -> Self
    where
        R: Fn(&P) -> V + 'static,
        A: Fn(&mut P, V) + 'static,
    {
        Self {
            required,
            resolve: Box::new(resolve),
            assign: Box::new(assign),
        }
    }
}

impl<P, V: PartialEq + Clone> SettingActivator<P> for RequirePreferenceSettingActivator<P, V> {
    fn is_active(&self, preferences: &P) -> bool {
        (self.resolve)(preferences) == self.required
    }

    fn activate(&self, preferences: &mut P) {
        if !self.is_active(preferences) {
            (self.assign)(preferences, self.required.clone());
        }
    }
}

/// Conjunction of two activators.
///
/// Activation applies `inner` first, then `outer`.
#[derive(Clone, Debug, Default)]
pub struct CombinedSettingActivator<I, O> {
    inner: I,
    outer: O,
}

impl<I, O> CombinedSettingActivator<I, O> {
    pub fn new(inner: I, outer: O) -> Self {
        Self { inner, outer }
    }
}

impl<P, I, O> SettingActivator<P> for CombinedSettingActivator<I, O>
where
    I: SettingActivator<P>,
    O: SettingActivator<P>,
{
    fn is_active(&self, preferences: &P) -> bool {
        self.inner.is_active(preferences) && self.outer.is_active(preferences)
    }

    fn activate(&self, preferences: &mut P) {
        self.inner.activate(preferences);
        self.outer.activate(preferences);
    }
}
