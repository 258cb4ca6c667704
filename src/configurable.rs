//! Contracts binding a settings consumer to its preferences and editor.

/// A user-editable, mergeable preferences tree.
///
/// Every field is optional: unset means "no opinion".
pub trait ConfigurablePreferences: Clone + PartialEq + Default {
    /// Preferences with every field unset.
    fn empty() -> Self {
        Self::default()
    }

    /// Field-wise merge where `other`'s set fields win.
    fn merging(&self, other: &Self) -> Self;
}

/// Orchestrates edits of a preferences tree for a settings UI.
pub trait PreferencesEditor {
    type Preferences: ConfigurablePreferences;

    /// Snapshot of the preferences being edited.
    fn preferences(&self) -> Self::Preferences;

    /// Unset every preference.
    fn clear(&self);
}

/// A component whose behavior is driven by resolved settings.
///
/// The renderer submits preferences and reads the settings they resolve to.
pub trait Configurable {
    type Settings: Clone;
    type Preferences: ConfigurablePreferences;
    type Editor: PreferencesEditor<Preferences = Self::Preferences>;

    /// Settings currently in effect.
    fn settings(&self) -> &Self::Settings;

    /// Resolve and apply new preferences.
    fn submit_preferences(&mut self, preferences: Self::Preferences);

    /// Editor seeded with `preferences`, resolving settings the same way this
    /// component does.
    fn editor(&self, preferences: Self::Preferences) -> Self::Editor;
}
