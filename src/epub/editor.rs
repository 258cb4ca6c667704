//! Preferences editor for EPUB navigators.

use super::preferences::EpubPreferences;
use super::settings::{EpubDefaults, EpubPublicationContext, EpubSettings};
use super::types::{
    Color, ColumnCount, EpubLayout, FontFamily, ImageFilter, Language, ReadingProgression, Spread,
    TextAlign, Theme,
};
use crate::activator::{CombinedSettingActivator, RequirePreferenceSettingActivator};
use crate::configurable::PreferencesEditor;
use crate::editor::{
    PreferenceAccessor, PreferenceBinding, PreferencesState, StatefulPreferencesEditor,
};
use crate::progression::{IncrementProgressionStrategy, StepsProgressionStrategy};
use crate::proxy::{ProxyEnumPreference, ProxyPreference, ProxyRangePreference};

type EpubState = PreferencesState<EpubPreferences, EpubSettings>;
type EpubBinding<V> = PreferenceBinding<EpubPreferences, EpubSettings, V>;
type EpubActivator<V> = RequirePreferenceSettingActivator<EpubPreferences, V>;

const FONT_SIZE_STEPS: [f64; 16] = [
    0.1, 0.5, 0.75, 0.9, 1.0, 1.1, 1.25, 1.5, 1.75, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0,
];

/// Modular scale ratios, from minor second to golden ratio.
const TYPE_SCALE_STEPS: [f64; 9] = [1.0, 1.067, 1.125, 1.2, 1.25, 1.333, 1.414, 1.5, 1.618];

/// Editor for [`EpubPreferences`], exposing one handle per preference.
///
/// Handles are recreated on each call and all read from the same state, so
/// UI code can grab them whenever it needs to.
pub struct EpubPreferencesEditor {
    editor: StatefulPreferencesEditor<EpubPreferences, EpubSettings>,
    layout: EpubLayout,
    defaults: EpubDefaults,
}

impl EpubPreferencesEditor {
    pub fn new(
        initial_preferences: EpubPreferences,
        publication: EpubPublicationContext,
        layout: EpubLayout,
        defaults: EpubDefaults,
    ) -> Self {
        let resolve_defaults = defaults.clone();
        let editor = StatefulPreferencesEditor::new(initial_preferences, move |preferences| {
            EpubSettings::resolve(preferences, &resolve_defaults, &publication)
        });
        Self {
            editor,
            layout,
            defaults,
        }
    }

    pub fn layout(&self) -> EpubLayout {
        self.layout
    }

    /// Snapshot of the preferences and the settings they resolve to.
    pub fn state(&self) -> EpubState {
        self.editor.state()
    }

    /// Settings the current preferences resolve to.
    pub fn settings(&self) -> EpubSettings {
        self.editor.settings()
    }

    /// Apply several changes as a single edit.
    pub fn edit<F: FnOnce(&mut EpubPreferences)>(&self, changes: F) {
        self.editor.edit(changes);
    }

    /// Page background color. Effective once set, in reflowable layouts.
    pub fn background_color(&self) -> ProxyPreference<Color> {
        let reflowable = self.is_reflowable();
        self.editor.preference(
            binding(
                |p| p.background_color,
                |p, v| p.background_color = v,
                |s| {
                    s.background_color
                        .unwrap_or_else(|| s.theme.background_color())
                },
                Theme::Light.background_color(),
            )
            .with_is_effective(move |state| {
                reflowable && state.preferences.background_color.is_some()
            }),
        )
    }

    /// Columns per page. Setting a value turns scrolling off.
    pub fn column_count(&self) -> ProxyEnumPreference<ColumnCount> {
        let reflowable = self.is_reflowable();
        self.editor.enum_preference(
            binding(
                |p| p.column_count,
                |p, v| p.column_count = v,
                |s| s.column_count,
                ColumnCount::Auto,
            )
            .with_is_effective(move |_| reflowable)
            .with_activator(self.scroll_disabled()),
            ColumnCount::ALL.to_vec(),
        )
    }

    /// Body typeface; `None` keeps the publisher's font.
    pub fn font_family(&self) -> ProxyPreference<Option<FontFamily>> {
        let reflowable = self.is_reflowable();
        self.editor.preference(
            binding(
                |p| p.font_family.clone().map(Some),
                |p, v| p.font_family = v.flatten(),
                |s| s.font_family.clone(),
                None,
            )
            .with_is_effective(move |_| reflowable),
        )
    }

    pub fn font_size(&self) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding(|p| p.font_size, |p, v| p.font_size = v, |s| s.font_size, 1.0)
                .with_is_effective(move |_| reflowable),
            0.1..=5.0,
            StepsProgressionStrategy::new(FONT_SIZE_STEPS.to_vec()),
            format_percentage,
        )
    }

    /// Boldness multiplier. Effective once set, in reflowable layouts.
    pub fn font_weight(&self) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding(
                |p| p.font_weight,
                |p, v| p.font_weight = v,
                |s| s.font_weight.unwrap_or(1.0),
                1.0,
            )
            .with_is_effective(move |state| reflowable && state.preferences.font_weight.is_some()),
            0.0..=2.5,
            IncrementProgressionStrategy::new(0.25),
            format_percentage,
        )
    }

    /// Hyphenation of justified text, unavailable with vertical text.
    pub fn hyphens(&self) -> ProxyPreference<bool> {
        let reflowable = self.is_reflowable();
        let text_align = self.defaults.text_align;
        let justified: EpubActivator<TextAlign> = RequirePreferenceSettingActivator::new(
            TextAlign::Justify,
            move |p: &EpubPreferences| p.text_align.or(text_align).unwrap_or_default(),
            |p: &mut EpubPreferences, v| p.text_align = Some(v),
        );
        self.editor.preference(
            binding(
                |p| p.hyphens,
                |p, v| p.hyphens = v,
                |s| s.hyphens.unwrap_or(false),
                false,
            )
            .with_is_effective(move |state| reflowable && !state.settings.vertical_text)
            .with_activator(CombinedSettingActivator::new(
                self.publisher_styles_disabled(),
                justified,
            )),
        )
    }

    /// Image filter, only applied with the dark theme.
    pub fn image_filter(&self) -> ProxyEnumPreference<Option<ImageFilter>> {
        self.editor.enum_preference(
            binding(
                |p| p.image_filter.map(Some),
                |p, v| p.image_filter = v.flatten(),
                |s| s.image_filter,
                None,
            )
            .with_is_effective(|state| state.settings.theme == Theme::Dark),
            vec![None, Some(ImageFilter::Darken), Some(ImageFilter::Invert)],
        )
    }

    /// Content language; `None` falls back to the publication's.
    pub fn language(&self) -> ProxyPreference<Option<Language>> {
        self.editor.preference(binding(
            |p| p.language.clone().map(Some),
            |p, v| p.language = v.flatten(),
            |s| s.language.clone(),
            None,
        ))
    }

    pub fn letter_spacing(&self) -> ProxyRangePreference<f64> {
        self.spacing(
            binding(
                |p| p.letter_spacing,
                |p, v| p.letter_spacing = v,
                |s| s.letter_spacing.unwrap_or(0.0),
                0.0,
            ),
            0.0..=1.0,
            0.1,
            format_percentage,
        )
    }

    pub fn ligatures(&self) -> ProxyPreference<bool> {
        let reflowable = self.is_reflowable();
        self.editor.preference(
            binding(
                |p| p.ligatures,
                |p, v| p.ligatures = v,
                |s| s.ligatures.unwrap_or(false),
                false,
            )
            .with_is_effective(move |_| reflowable)
            .with_activator(self.publisher_styles_disabled()),
        )
    }

    pub fn line_height(&self) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding(
                |p| p.line_height,
                |p, v| p.line_height = v,
                |s| s.line_height.unwrap_or(1.2),
                1.2,
            )
            .with_is_effective(move |_| reflowable)
            .with_activator(self.publisher_styles_disabled()),
            1.0..=2.0,
            IncrementProgressionStrategy::new(0.1),
            format_decimal,
        )
    }

    /// Single first page in fixed-layout spreads.
    pub fn offset_first_page(&self) -> ProxyPreference<bool> {
        let fixed = self.layout == EpubLayout::Fixed;
        self.editor.preference(
            binding(
                |p| p.offset_first_page,
                |p, v| p.offset_first_page = v,
                |s| s.offset_first_page.unwrap_or(false),
                false,
            )
            .with_is_effective(move |state| fixed && !state.settings.scroll),
        )
    }

    pub fn page_margins(&self) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding(
                |p| p.page_margins,
                |p, v| p.page_margins = v,
                |s| s.page_margins,
                1.0,
            )
            .with_is_effective(move |_| reflowable),
            0.0..=4.0,
            IncrementProgressionStrategy::new(0.3),
            format_decimal,
        )
    }

    pub fn paragraph_indent(&self) -> ProxyRangePreference<f64> {
        self.spacing(
            binding(
                |p| p.paragraph_indent,
                |p, v| p.paragraph_indent = v,
                |s| s.paragraph_indent.unwrap_or(0.0),
                0.0,
            ),
            0.0..=3.0,
            0.2,
            format_decimal,
        )
    }

    pub fn paragraph_spacing(&self) -> ProxyRangePreference<f64> {
        self.spacing(
            binding(
                |p| p.paragraph_spacing,
                |p, v| p.paragraph_spacing = v,
                |s| s.paragraph_spacing.unwrap_or(0.0),
                0.0,
            ),
            0.0..=2.0,
            0.1,
            format_decimal,
        )
    }

    /// Keep the publisher's styles. Turning this off unlocks the advanced
    /// typography settings.
    pub fn publisher_styles(&self) -> ProxyPreference<bool> {
        self.reflowable_flag(
            |p| p.publisher_styles,
            |p, v| p.publisher_styles = v,
            |s| s.publisher_styles,
            true,
        )
    }

    pub fn reading_progression(&self) -> ProxyEnumPreference<ReadingProgression> {
        self.editor.enum_preference(
            binding(
                |p| p.reading_progression,
                |p, v| p.reading_progression = v,
                |s| s.reading_progression,
                ReadingProgression::Ltr,
            ),
            vec![ReadingProgression::Ltr, ReadingProgression::Rtl],
        )
    }

    pub fn scroll(&self) -> ProxyPreference<bool> {
        self.reflowable_flag(|p| p.scroll, |p, v| p.scroll = v, |s| s.scroll, false)
    }

    /// Spread policy of fixed layouts.
    pub fn spread(&self) -> ProxyEnumPreference<Spread> {
        let fixed = self.layout == EpubLayout::Fixed;
        self.editor.enum_preference(
            binding(|p| p.spread, |p, v| p.spread = v, |s| s.spread, Spread::Auto)
                .with_is_effective(move |_| fixed),
            vec![Spread::Auto, Spread::Never, Spread::Always],
        )
    }

    pub fn text_align(&self) -> ProxyEnumPreference<TextAlign> {
        let reflowable = self.is_reflowable();
        self.editor.enum_preference(
            binding(
                |p| p.text_align,
                |p, v| p.text_align = v,
                |s| s.text_align.unwrap_or_default(),
                TextAlign::Start,
            )
            .with_is_effective(move |_| reflowable)
            .with_activator(self.publisher_styles_disabled()),
            vec![
                TextAlign::Start,
                TextAlign::Left,
                TextAlign::Right,
                TextAlign::Justify,
            ],
        )
    }

    /// Text color. Effective once set, in reflowable layouts.
    pub fn text_color(&self) -> ProxyPreference<Color> {
        let reflowable = self.is_reflowable();
        self.editor.preference(
            binding(
                |p| p.text_color,
                |p, v| p.text_color = v,
                |s| s.text_color.unwrap_or_else(|| s.theme.content_color()),
                Theme::Light.content_color(),
            )
            .with_is_effective(move |state| reflowable && state.preferences.text_color.is_some()),
        )
    }

    pub fn text_normalization(&self) -> ProxyPreference<bool> {
        self.reflowable_flag(
            |p| p.text_normalization,
            |p, v| p.text_normalization = v,
            |s| s.text_normalization,
            false,
        )
    }

    pub fn theme(&self) -> ProxyEnumPreference<Theme> {
        let reflowable = self.is_reflowable();
        self.editor.enum_preference(
            binding(|p| p.theme, |p, v| p.theme = v, |s| s.theme, Theme::Light)
                .with_is_effective(move |_| reflowable),
            Theme::ALL.to_vec(),
        )
    }

    /// Heading size ratio, stepping through common modular scales.
    pub fn type_scale(&self) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding(
                |p| p.type_scale,
                |p, v| p.type_scale = v,
                |s| s.type_scale.unwrap_or(1.2),
                1.2,
            )
            .with_is_effective(move |_| reflowable)
            .with_activator(self.publisher_styles_disabled()),
            1.0..=2.0,
            StepsProgressionStrategy::new(TYPE_SCALE_STEPS.to_vec()),
            format_decimal,
        )
    }

    pub fn vertical_text(&self) -> ProxyPreference<bool> {
        self.reflowable_flag(
            |p| p.vertical_text,
            |p, v| p.vertical_text = v,
            |s| s.vertical_text,
            false,
        )
    }

    pub fn word_spacing(&self) -> ProxyRangePreference<f64> {
        self.spacing(
            binding(
                |p| p.word_spacing,
                |p, v| p.word_spacing = v,
                |s| s.word_spacing.unwrap_or(0.0),
                0.0,
            ),
            0.0..=1.0,
            0.1,
            format_percentage,
        )
    }

    fn is_reflowable(&self) -> bool {
        self.layout == EpubLayout::Reflowable
    }

    fn publisher_styles_disabled(&self) -> EpubActivator<bool> {
        let fallback = self.defaults.publisher_styles;
        RequirePreferenceSettingActivator::new(
            false,
            move |p: &EpubPreferences| p.publisher_styles.or(fallback).unwrap_or(true),
            |p: &mut EpubPreferences, v| p.publisher_styles = Some(v),
        )
    }

    fn scroll_disabled(&self) -> EpubActivator<bool> {
        let fallback = self.defaults.scroll;
        RequirePreferenceSettingActivator::new(
            false,
            move |p: &EpubPreferences| p.scroll.or(fallback).unwrap_or(false),
            |p: &mut EpubPreferences, v| p.scroll = Some(v),
        )
    }

    fn reflowable_flag(
        &self,
        get: fn(&EpubPreferences) -> Option<bool>,
        set: fn(&mut EpubPreferences, Option<bool>),
        effective: fn(&EpubSettings) -> bool,
        fallback: bool,
    ) -> ProxyPreference<bool> {
        let reflowable = self.is_reflowable();
        self.editor.preference(
            binding(get, set, effective, fallback).with_is_effective(move |_| reflowable),
        )
    }

    /// Advanced spacing setting: reflowable, horizontal text, publisher
    /// styles off.
    fn spacing(
        &self,
        binding: EpubBinding<f64>,
        range: core::ops::RangeInclusive<f64>,
        delta: f64,
        format: fn(f64) -> String,
    ) -> ProxyRangePreference<f64> {
        let reflowable = self.is_reflowable();
        self.editor.range_preference(
            binding
                .with_is_effective(move |state| reflowable && !state.settings.vertical_text)
                .with_activator(self.publisher_styles_disabled()),
            range,
            IncrementProgressionStrategy::new(delta),
            format,
        )
    }
}

impl PreferencesEditor for EpubPreferencesEditor {
    type Preferences = EpubPreferences;

    fn preferences(&self) -> EpubPreferences {
        self.editor.preferences()
    }

    fn clear(&self) {
        PreferencesEditor::clear(&self.editor);
    }
}

fn binding<V: Clone + 'static>(
    get: fn(&EpubPreferences) -> Option<V>,
    set: fn(&mut EpubPreferences, Option<V>),
    effective: fn(&EpubSettings) -> V,
    fallback: V,
) -> EpubBinding<V> {
    PreferenceBinding::new(
        PreferenceAccessor::new(get, set),
        move |state: &EpubState| effective(&state.settings),
        fallback,
    )
}

/// `1.5` as `"150%"`.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", (value * 100.0).round() as i64)
}

/// `1.20` as `"1.2"`, `2.0` as `"2"`.
pub fn format_decimal(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
