#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

use readium_preferences::epub::{
    EpubDefaults, EpubLayout, EpubPreferences, EpubPreferencesEditor, EpubPublicationContext,
    Language, ReadingProgression,
};
use readium_preferences::{ProxyPreference, ProxyRangePreference, StepsProgressionStrategy};

pub const NIGHT_READER_FIXTURE: &str = "tests/fixtures/night_reader.json";

pub fn load_preferences(path: &str) -> EpubPreferences {
    let json = std::fs::read_to_string(Path::new(path))
        .unwrap_or_else(|e| panic!("read {}: {}", path, e));
    EpubPreferences::from_json(&json).unwrap_or_else(|e| panic!("decode {}: {}", path, e))
}

pub fn english_publication() -> EpubPublicationContext {
    EpubPublicationContext::new(Some(Language::from("en")), None)
}

pub fn vertical_japanese_publication() -> EpubPublicationContext {
    EpubPublicationContext::new(Some(Language::from("ja")), Some(ReadingProgression::Rtl))
}

pub fn reflowable_editor(preferences: EpubPreferences) -> EpubPreferencesEditor {
    EpubPreferencesEditor::new(
        preferences,
        english_publication(),
        EpubLayout::Reflowable,
        EpubDefaults::default(),
    )
}

/// Preference stored in a shared cell, effective value defaulting to
/// `default`.
pub fn cell_preference<V: Copy + 'static>(
    cell: &Rc<Cell<Option<V>>>,
    default: V,
) -> ProxyPreference<V> {
    let (read, effective, write) = (Rc::clone(cell), Rc::clone(cell), Rc::clone(cell));
    ProxyPreference::new(
        move || read.get(),
        move || effective.get().unwrap_or(default),
        || true,
        move |value| write.set(value),
    )
}

/// Range preference over `0.5..=3.0` stepping through a small table.
pub fn cell_range_preference(cell: &Rc<Cell<Option<f64>>>) -> ProxyRangePreference<f64> {
    ProxyRangePreference::new(
        cell_preference(cell, 1.0),
        0.5..=3.0,
        StepsProgressionStrategy::new(vec![0.5, 1.0, 1.5, 2.0, 3.0]),
        |value| format!("{:.1}x", value),
    )
}
