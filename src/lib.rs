//! Typed reading preferences for Readium navigators.
//!
//! A navigator exposes its rendering knobs as a [`Configurable`]: callers
//! submit a user-editable preferences tree and the navigator resolves it into
//! a fully-populated settings tree. UI code drives edits through a
//! [`PreferencesEditor`], whose [`Preference`] handles are bound to one field
//! each and always report the effective value read back from freshly
//! recomputed settings.
//!
//! # Usage
//!
//! ```rust
//! use readium_preferences::epub::{
//!     EpubDefaults, EpubLayout, EpubPreferences, EpubPreferencesEditor, EpubPublicationContext,
//!     Theme,
//! };
//! use readium_preferences::{Preference, RangePreference};
//!
//! let editor = EpubPreferencesEditor::new(
//!     EpubPreferences::default(),
//!     EpubPublicationContext::default(),
//!     EpubLayout::Reflowable,
//!     EpubDefaults::default(),
//! );
//!
//! let font_size = editor.font_size();
//! font_size.increment();
//! assert!(font_size.effective_value() > 1.0);
//!
//! editor.theme().set(Some(Theme::Dark));
//! assert_eq!(editor.settings().theme, Theme::Dark);
//! ```
//!
//! The engine is single-threaded: editors and their handles are neither
//! `Send` nor `Sync`, so every edit happens on the context that owns the
//! editor.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod activator;
pub mod configurable;
pub mod editor;
pub mod epub;
pub mod error;
pub mod mapped;
pub mod preference;
pub mod progression;
pub mod proxy;

pub use activator::{
    CombinedSettingActivator, NullSettingActivator, RequirePreferenceSettingActivator,
    SettingActivator,
};
pub use configurable::{Configurable, ConfigurablePreferences, PreferencesEditor};
pub use editor::{PreferenceAccessor, PreferenceBinding, PreferencesState, StatefulPreferencesEditor};
pub use error::PreferencesError;
pub use mapped::{MappedEnumPreference, MappedPreference, MappedRangePreference};
pub use preference::{
    AnyEnumPreference, AnyPreference, AnyRangePreference, BoolPreferenceExt, EnumPreference,
    EnumPreferenceExt, Preference, PreferenceExt, RangePreference, RangePreferenceExt,
};
pub use progression::{
    AnyProgressionStrategy, IncrementProgressionStrategy, ProgressionStrategy,
    StepsProgressionStrategy,
};
pub use proxy::{ProxyEnumPreference, ProxyPreference, ProxyRangePreference};
