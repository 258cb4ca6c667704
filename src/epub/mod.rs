//! Preferences, settings and editor of EPUB navigators.

mod editor;
mod preferences;
mod settings;
mod types;

pub use editor::{format_decimal, format_percentage, EpubPreferencesEditor};
pub use preferences::EpubPreferences;
pub use settings::{EpubDefaults, EpubPublicationContext, EpubSettings};
pub use types::{
    Color, ColumnCount, EpubLayout, FontFamily, ImageFilter, Language, ReadingProgression, Spread,
    TextAlign, Theme,
};
