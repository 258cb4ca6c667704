//! Stateful preferences editing.
//!
//! [`StatefulPreferencesEditor`] owns a `(preferences, settings)` pair and
//! hands out [`Preference`](crate::Preference) handles bound to individual
//! fields. Every edit recomputes the settings from the edited preferences and
//! commits both together, so a handle's effective value is always read from
//! settings resolved by the same function the navigator uses.
//!
//! The editor is deliberately `!Send` and `!Sync`: edits must be serialized
//! on the context that owns it. Handles keep only a weak reference and
//! degrade to their fallback once the editor is dropped.

use core::cell::{Cell, RefCell};
use core::fmt::Debug;
use core::ops::RangeInclusive;
use std::rc::{Rc, Weak};

use crate::activator::{NullSettingActivator, SettingActivator};
use crate::configurable::{ConfigurablePreferences, PreferencesEditor};
use crate::progression::ProgressionStrategy;
use crate::proxy::{ProxyEnumPreference, ProxyPreference, ProxyRangePreference};

/// Preferences together with the settings they resolve to.
#[derive(Clone, Debug, PartialEq)]
pub struct PreferencesState<P, S> {
    /// User-editable preferences.
    pub preferences: P,
    /// Settings resolved from `preferences`.
    pub settings: S,
}

/// Getter/setter pair addressing one optional field of a preferences tree.
pub struct PreferenceAccessor<P, V> {
    get: Rc<dyn Fn(&P) -> Option<V>>,
    set: Rc<dyn Fn(&mut P, Option<V>)>,
}

impl<P, V> PreferenceAccessor<P, V> {
    pub fn new<G, W>(get: G, set: W) -> Self
    where
        G: Fn(&P) -> Option<V> + 'static,
        W: Fn(&mut P, Option<V>) + 'static,
    {
        Self {
            get: Rc::new(get),
            set: Rc::new(set),
        }
    }

    /// Read the field from `preferences`.
    pub fn get(&self, preferences: &P) -> Option<V> {
        (self.get)(preferences)
    }

    /// Write the field into `preferences`.
    pub fn set(&self, preferences: &mut P, value: Option<V>) {
        (self.set)(preferences, value)
    }
}

impl<P, V> Clone for PreferenceAccessor<P, V> {
    fn clone(&self) -> Self {
        Self {
            get: Rc::clone(&self.get),
            set: Rc::clone(&self.set),
        }
    }
}

type StateFn<P, S, T> = Rc<dyn Fn(&PreferencesState<P, S>) -> T>;

/// Everything an editor needs to bind a handle to one field.
pub struct PreferenceBinding<P, S, V> {
    accessor: PreferenceAccessor<P, V>,
    effective_value: StateFn<P, S, V>,
    fallback: V,
    is_effective: StateFn<P, S, bool>,
    activator: Rc<dyn SettingActivator<P>>,
}

impl<P: 'static, S: 'static, V> PreferenceBinding<P, S, V> {
    /// Bind `accessor`, reading the effective value from the state's settings.
    ///
    /// `fallback` is reported as the effective value once the editor is gone.
    pub fn new<E>(accessor: PreferenceAccessor<P, V>, effective_value: E, fallback: V) -> Self
    where
        E: Fn(&PreferencesState<P, S>) -> V + 'static,
    {
        Self {
            accessor,
            effective_value: Rc::new(effective_value),
            fallback,
            is_effective: Rc::new(|_| true),
            activator: Rc::new(NullSettingActivator),
        }
    }

    /// Restrict when the preference has an effect.
    pub fn with_is_effective<F>(mut self, is_effective: F) -> Self
    where
        F: Fn(&PreferencesState<P, S>) -> bool + 'static,
    {
        self.is_effective = Rc::new(is_effective);
        self
    }

    /// Make the preference depend on `activator`.
    ///
    /// The handle is effective only while the activator is active, and
    /// setting a value applies the activator to the edited preferences.
    pub fn with_activator<A>(mut self, activator: A) -> Self
    where
        A: SettingActivator<P> + 'static,
    {
        self.activator = Rc::new(activator);
        self
    }
}

struct EditorCore<P, S> {
    state: PreferencesState<P, S>,
    resolve: Box<dyn Fn(&P) -> S>,
    editing: Cell<bool>,
}

impl<P: Clone, S> EditorCore<P, S> {
    /// Apply `changes` to a copy of the preferences and commit the result.
    ///
    /// The transform runs without a borrow held, so it may read the editor.
    /// Edits it makes through the editor or its handles are committed and
    /// then overwritten when the enclosing edit commits.
    fn commit<F: FnOnce(&mut P)>(core: &RefCell<Self>, changes: F) {
        let nested = core.borrow().editing.replace(true);
        if nested {
            log::warn!("nested preferences edit will be overwritten by the enclosing edit");
        }
        let _guard = EditingGuard { core, nested };

        let mut preferences = core.borrow().state.preferences.clone();
        changes(&mut preferences);
        let settings = (core.borrow().resolve)(&preferences);
        core.borrow_mut().state = PreferencesState {
            preferences,
            settings,
        };
        log::debug!("committed preferences edit");
    }
}

/// Clears the editing flag when the outermost edit ends, even on unwind.
struct EditingGuard<'a, P, S> {
    core: &'a RefCell<EditorCore<P, S>>,
    nested: bool,
}

impl<P, S> Drop for EditingGuard<'_, P, S> {
    fn drop(&mut self) {
        if !self.nested {
            if let Ok(core) = self.core.try_borrow() {
                core.editing.set(false);
            }
        }
    }
}

/// Non-owning view of an editor's state held by handles.
struct EditorHandle<P, S> {
    core: Weak<RefCell<EditorCore<P, S>>>,
}

impl<P, S> Clone for EditorHandle<P, S> {
    fn clone(&self) -> Self {
        Self {
            core: Weak::clone(&self.core),
        }
    }
}

impl<P: Clone, S> EditorHandle<P, S> {
    fn read<T, F: FnOnce(&PreferencesState<P, S>) -> T>(&self, f: F) -> Option<T> {
        let core = self.core.upgrade()?;
        let core = core.borrow();
        Some(f(&core.state))
    }

    fn edit<F: FnOnce(&mut P)>(&self, changes: F) -> bool {
        match self.core.upgrade() {
            Some(core) => {
                EditorCore::commit(&core, changes);
                true
            }
            None => false,
        }
    }
}

/// Editor owning preferences and the settings derived from them.
pub struct StatefulPreferencesEditor<P, S> {
    core: Rc<RefCell<EditorCore<P, S>>>,
}

impl<P, S> StatefulPreferencesEditor<P, S>
where
    P: Clone + 'static,
    S: Clone + 'static,
{
    /// Create an editor resolving settings with `resolve`.
    pub fn new<R>(initial_preferences: P, resolve: R) -> Self
    where
        R: Fn(&P) -> S + 'static,
    {
        let settings = resolve(&initial_preferences);
        Self {
            core: Rc::new(RefCell::new(EditorCore {
                state: PreferencesState {
                    preferences: initial_preferences,
                    settings,
                },
                resolve: Box::new(resolve),
                editing: Cell::new(false),
            })),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PreferencesState<P, S> {
        self.core.borrow().state.clone()
    }

    /// Snapshot of the current preferences.
    pub fn preferences(&self) -> P {
        self.core.borrow().state.preferences.clone()
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> S {
        self.core.borrow().state.settings.clone()
    }

    /// Apply `changes` to a copy of the preferences, recompute the settings
    /// and commit both.
    pub fn edit<F: FnOnce(&mut P)>(&self, changes: F) {
        EditorCore::commit(&self.core, changes);
    }

    /// Handle over a plain field.
    pub fn preference<V: Clone + 'static>(
        &self,
        binding: PreferenceBinding<P, S, V>,
    ) -> ProxyPreference<V> {
        let handle = EditorHandle {
            core: Rc::downgrade(&self.core),
        };
        let PreferenceBinding {
            accessor,
            effective_value,
            fallback,
            is_effective,
            activator,
        } = binding;

        let value = {
            let handle = handle.clone();
            let accessor = accessor.clone();
            move || {
                handle
                    .read(|state| accessor.get(&state.preferences))
                    .flatten()
            }
        };
        let effective = {
            let handle = handle.clone();
            move || {
                handle
                    .read(|state| effective_value(state))
                    .unwrap_or_else(|| fallback.clone())
            }
        };
        let effective_now = {
            let handle = handle.clone();
            let activator = Rc::clone(&activator);
            move || {
                handle
                    .read(|state| is_effective(state) && activator.is_active(&state.preferences))
                    .unwrap_or(false)
            }
        };
        let set = move |value: Option<V>| {
            let activate = value.is_some();
            let committed = handle.edit(|preferences| {
                accessor.set(preferences, value);
                if activate {
                    activator.activate(preferences);
                }
            });
            if !committed {
                log::warn!("ignoring preference update: the editor has been dropped");
            }
        };

        ProxyPreference::new(value, effective, effective_now, set)
    }

    /// Handle over a field restricted to `supported_values`.
    pub fn enum_preference<V: Clone + PartialEq + Debug + 'static>(
        &self,
        binding: PreferenceBinding<P, S, V>,
        supported_values: Vec<V>,
    ) -> ProxyEnumPreference<V> {
        ProxyEnumPreference::new(self.preference(binding), supported_values)
    }

    /// Handle over a field clamped into `supported_range`.
    pub fn range_preference<V, G, F>(
        &self,
        binding: PreferenceBinding<P, S, V>,
        supported_range: RangeInclusive<V>,
        progression: G,
        format: F,
    ) -> ProxyRangePreference<V>
    where
        V: Clone + PartialOrd + Debug + 'static,
        G: ProgressionStrategy<V> + 'static,
        F: Fn(V) -> String + 'static,
    {
        ProxyRangePreference::new(
            self.preference(binding),
            supported_range,
            progression,
            format,
        )
    }
}

impl<P, S> PreferencesEditor for StatefulPreferencesEditor<P, S>
where
    P: ConfigurablePreferences + 'static,
    S: Clone + 'static,
{
    type Preferences = P;

    fn preferences(&self) -> P {
        StatefulPreferencesEditor::preferences(self)
    }

    fn clear(&self) {
        self.edit(|preferences| *preferences = P::empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activator::RequirePreferenceSettingActivator;
    use crate::preference::{EnumPreference, Preference, RangePreference};
    use crate::progression::IncrementProgressionStrategy;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Prefs {
        size: Option<f64>,
        mode: Option<char>,
        locked: Option<bool>,
    }

    impl ConfigurablePreferences for Prefs {
        fn merging(&self, other: &Self) -> Self {
            Self {
                size: other.size.or(self.size),
                mode: other.mode.or(self.mode),
                locked: other.locked.or(self.locked),
            }
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Resolved {
        size: f64,
        mode: char,
        locked: bool,
    }

    fn resolve(p: &Prefs) -> Resolved {
        Resolved {
            size: p.size.unwrap_or(1.0),
            mode: p.mode.unwrap_or('a'),
            locked: p.locked.unwrap_or(true),
        }
    }

    fn editor() -> StatefulPreferencesEditor<Prefs, Resolved> {
        StatefulPreferencesEditor::new(Prefs::default(), resolve)
    }

    fn size_binding() -> PreferenceBinding<Prefs, Resolved, f64> {
        PreferenceBinding::new(
            PreferenceAccessor::new(|p: &Prefs| p.size, |p: &mut Prefs, v| p.size = v),
            |state: &PreferencesState<Prefs, Resolved>| state.settings.size,
            1.0,
        )
    }

    fn unlocked() -> RequirePreferenceSettingActivator<Prefs, bool> {
        RequirePreferenceSettingActivator::new(
            false,
            |p: &Prefs| p.locked.unwrap_or(true),
            |p: &mut Prefs, v| p.locked = Some(v),
        )
    }

    #[test]
    fn edit_recomputes_settings_atomically() {
        let editor = editor();
        editor.edit(|p| p.size = Some(2.5));
        let state = editor.state();
        assert_eq!(state.preferences.size, Some(2.5));
        assert_eq!(state.settings.size, 2.5);
    }

    #[test]
    fn nested_edit_is_overwritten_by_enclosing_edit() {
        let editor = editor();
        editor.edit(|p| {
            editor.edit(|inner| inner.mode = Some('z'));
            assert_eq!(editor.preferences().mode, Some('z'));
            p.size = Some(3.0);
        });
        let state = editor.state();
        assert_eq!(state.preferences.mode, None);
        assert_eq!(state.preferences.size, Some(3.0));
        assert_eq!(state.settings.mode, 'a');

        assert!(!editor.core.borrow().editing.get());
        editor.edit(|p| p.mode = Some('b'));
        assert_eq!(editor.settings().mode, 'b');
    }

    #[test]
    fn resolver_runs_once_per_edit() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let editor = StatefulPreferencesEditor::new(Prefs::default(), move |p: &Prefs| {
            counter.set(counter.get() + 1);
            resolve(p)
        });
        assert_eq!(calls.get(), 1);
        editor.edit(|p| p.mode = Some('b'));
        editor.edit(|p| p.mode = None);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn handle_reads_effective_value_from_settings() {
        let editor = editor();
        let size = editor.preference(size_binding());
        assert_eq!(size.value(), None);
        assert_eq!(size.effective_value(), 1.0);
        size.set(Some(3.0));
        assert_eq!(editor.preferences().size, Some(3.0));
        assert_eq!(size.effective_value(), 3.0);
        size.clear();
        assert_eq!(size.effective_value(), 1.0);
    }

    #[test]
    fn handles_observe_edits_made_elsewhere() {
        let editor = editor();
        let size = editor.preference(size_binding());
        editor.edit(|p| p.size = Some(4.0));
        assert_eq!(size.value(), Some(4.0));
    }

    #[test]
    fn stale_handle_degrades_to_fallback() {
        let editor = editor();
        let size = editor.range_preference(
            size_binding(),
            0.5..=5.0,
            IncrementProgressionStrategy::new(0.5),
            |v| format!("{v}"),
        );
        size.set(Some(2.0));
        drop(editor);
        assert_eq!(size.value(), None);
        assert_eq!(size.effective_value(), 1.0);
        assert!(!size.is_effective());
        size.set(Some(3.0));
        size.increment();
        assert_eq!(size.value(), None);
    }

    #[test]
    fn activator_gates_effectiveness_and_is_applied_on_set() {
        let editor = editor();
        let size = editor.preference(size_binding().with_activator(unlocked()));
        assert!(!size.is_effective());
        size.set(Some(2.0));
        assert_eq!(editor.preferences().locked, Some(false));
        assert!(size.is_effective());
    }

    #[test]
    fn clearing_does_not_run_activator() {
        let editor = editor();
        editor.edit(|p| p.locked = Some(true));
        let size = editor.preference(size_binding().with_activator(unlocked()));
        size.clear();
        assert_eq!(editor.preferences().locked, Some(true));
    }

    #[test]
    fn is_effective_predicate_reads_state() {
        let editor = editor();
        let size = editor.preference(
            size_binding().with_is_effective(|state| state.settings.mode == 'b'),
        );
        assert!(!size.is_effective());
        editor.edit(|p| p.mode = Some('b'));
        assert!(size.is_effective());
    }

    #[test]
    fn enum_handle_validates_supported_values() {
        let editor = editor();
        let mode = editor.enum_preference(
            PreferenceBinding::new(
                PreferenceAccessor::new(|p: &Prefs| p.mode, |p: &mut Prefs, v| p.mode = v),
                |state: &PreferencesState<Prefs, Resolved>| state.settings.mode,
                'a',
            ),
            vec!['a', 'b'],
        );
        mode.set(Some('b'));
        assert_eq!(editor.settings().mode, 'b');
        assert_eq!(mode.supported_values(), vec!['a', 'b']);
    }

    #[test]
    #[should_panic(expected = "is not in the supported values")]
    fn enum_handle_rejects_unsupported_value() {
        let editor = editor();
        let mode = editor.enum_preference(
            PreferenceBinding::new(
                PreferenceAccessor::new(|p: &Prefs| p.mode, |p: &mut Prefs, v| p.mode = v),
                |state: &PreferencesState<Prefs, Resolved>| state.settings.mode,
                'a',
            ),
            vec!['a', 'b'],
        );
        mode.set(Some('q'));
    }

    #[test]
    fn range_handle_clamps_into_settings() {
        let editor = editor();
        let size = editor.range_preference(
            size_binding(),
            0.5..=5.0,
            IncrementProgressionStrategy::new(0.5),
            |v| format!("{v}"),
        );
        size.set(Some(9.0));
        assert_eq!(editor.settings().size, 5.0);
        size.decrement();
        assert_eq!(size.value(), Some(4.5));
    }

    #[test]
    fn clear_resets_every_preference() {
        let editor = editor();
        editor.edit(|p| {
            p.size = Some(2.0);
            p.mode = Some('b');
        });
        PreferencesEditor::clear(&editor);
        assert_eq!(editor.preferences(), Prefs::default());
        assert_eq!(editor.settings(), resolve(&Prefs::default()));
    }

    #[test]
    fn merging_prefers_other_set_fields() {
        let base = Prefs {
            size: Some(1.5),
            mode: Some('a'),
            locked: None,
        };
        let overlay = Prefs {
            size: None,
            mode: Some('b'),
            locked: Some(false),
        };
        let merged = base.merging(&overlay);
        assert_eq!(merged.size, Some(1.5));
        assert_eq!(merged.mode, Some('b'));
        assert_eq!(merged.locked, Some(false));
        assert_eq!(base.merging(&Prefs::empty()), base);
    }
}
