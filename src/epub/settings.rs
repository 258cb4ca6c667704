//! Settings resolution for EPUB navigators.

use serde::{Deserialize, Serialize};

use super::preferences::EpubPreferences;
use super::types::{
    Color, ColumnCount, FontFamily, ImageFilter, Language, ReadingProgression, Spread, TextAlign,
    Theme,
};

/// Navigator-provided defaults, consulted when a preference is unset.
///
/// `Default` has no opinion on anything, leaving the hard fallbacks of
/// [`EpubSettings::resolve`] in charge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpubDefaults {
    pub column_count: Option<ColumnCount>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub hyphens: Option<bool>,
    pub image_filter: Option<ImageFilter>,
    pub letter_spacing: Option<f64>,
    pub ligatures: Option<bool>,
    pub line_height: Option<f64>,
    pub offset_first_page: Option<bool>,
    pub page_margins: Option<f64>,
    pub paragraph_indent: Option<f64>,
    pub paragraph_spacing: Option<f64>,
    pub publisher_styles: Option<bool>,
    pub reading_progression: Option<ReadingProgression>,
    pub scroll: Option<bool>,
    pub spread: Option<Spread>,
    pub text_align: Option<TextAlign>,
    pub text_normalization: Option<bool>,
    pub type_scale: Option<f64>,
    pub word_spacing: Option<f64>,
}

impl EpubDefaults {
    /// Defaults for readers favoring a paginated, publisher-styled layout
    /// with a slightly larger text size.
    pub fn comfortable() -> Self {
        Self {
            font_size: Some(1.1),
            line_height: Some(1.4),
            page_margins: Some(1.2),
            scroll: Some(false),
            ..Self::default()
        }
    }

    /// Effective `publisher_styles` for `preferences`, counting defaults.
    pub fn resolve_publisher_styles(&self, preferences: &EpubPreferences) -> bool {
        preferences
            .publisher_styles
            .or(self.publisher_styles)
            .unwrap_or(true)
    }

    /// Effective `scroll` for `preferences`, counting defaults.
    pub fn resolve_scroll(&self, preferences: &EpubPreferences) -> bool {
        preferences.scroll.or(self.scroll).unwrap_or(false)
    }

    /// Effective `text_align` for `preferences`, counting defaults.
    pub fn resolve_text_align(&self, preferences: &EpubPreferences) -> TextAlign {
        preferences
            .text_align
            .or(self.text_align)
            .unwrap_or_default()
    }
}

/// Publication metadata relevant to settings resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpubPublicationContext {
    /// Primary language declared by the publication.
    pub language: Option<Language>,
    /// Page progression declared by the publication.
    pub reading_progression: Option<ReadingProgression>,
}

impl EpubPublicationContext {
    pub fn new(language: Option<Language>, reading_progression: Option<ReadingProgression>) -> Self {
        Self {
            language,
            reading_progression,
        }
    }
}

/// Fully resolved settings of an EPUB navigator.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpubSettings {
    pub background_color: Option<Color>,
    pub column_count: ColumnCount,
    pub font_family: Option<FontFamily>,
    pub font_size: f64,
    pub font_weight: Option<f64>,
    pub hyphens: Option<bool>,
    pub image_filter: Option<ImageFilter>,
    pub language: Option<Language>,
    pub letter_spacing: Option<f64>,
    pub ligatures: Option<bool>,
    pub line_height: Option<f64>,
    pub offset_first_page: Option<bool>,
    pub page_margins: f64,
    pub paragraph_indent: Option<f64>,
    pub paragraph_spacing: Option<f64>,
    pub publisher_styles: bool,
    pub reading_progression: ReadingProgression,
    pub scroll: bool,
    pub spread: Spread,
    pub text_align: Option<TextAlign>,
    pub text_color: Option<Color>,
    pub text_normalization: bool,
    pub theme: Theme,
    pub type_scale: Option<f64>,
    pub vertical_text: bool,
    pub word_spacing: Option<f64>,
}

impl EpubSettings {
    /// Resolve `preferences` against navigator `defaults` and `publication`
    /// metadata.
    pub fn resolve(
        preferences: &EpubPreferences,
        defaults: &EpubDefaults,
        publication: &EpubPublicationContext,
    ) -> Self {
        let language = preferences
            .language
            .clone()
            .or_else(|| publication.language.clone());

        let reading_progression = preferences
            .reading_progression
            .or(publication.reading_progression)
            .or(defaults.reading_progression)
            .unwrap_or_else(|| match &language {
                Some(language) if language.is_rtl() => ReadingProgression::Rtl,
                _ => ReadingProgression::Ltr,
            });

        let vertical_text = preferences.vertical_text.unwrap_or_else(|| {
            language.as_ref().is_some_and(Language::is_cjk)
                && reading_progression == ReadingProgression::Rtl
        });

        Self {
            background_color: preferences.background_color,
            column_count: preferences
                .column_count
                .or(defaults.column_count)
                .unwrap_or_default(),
            font_family: preferences.font_family.clone(),
            font_size: preferences.font_size.or(defaults.font_size).unwrap_or(1.0),
            font_weight: preferences.font_weight.or(defaults.font_weight),
            hyphens: preferences.hyphens.or(defaults.hyphens),
            image_filter: preferences.image_filter.or(defaults.image_filter),
            language,
            letter_spacing: preferences.letter_spacing.or(defaults.letter_spacing),
            ligatures: preferences.ligatures.or(defaults.ligatures),
            line_height: preferences.line_height.or(defaults.line_height),
            offset_first_page: preferences.offset_first_page.or(defaults.offset_first_page),
            page_margins: preferences
                .page_margins
                .or(defaults.page_margins)
                .unwrap_or(1.0),
            paragraph_indent: preferences.paragraph_indent.or(defaults.paragraph_indent),
            paragraph_spacing: preferences.paragraph_spacing.or(defaults.paragraph_spacing),
            publisher_styles: defaults.resolve_publisher_styles(preferences),
            reading_progression,
            scroll: defaults.resolve_scroll(preferences),
            spread: preferences.spread.or(defaults.spread).unwrap_or_default(),
            text_align: preferences.text_align.or(defaults.text_align),
            text_color: preferences.text_color,
            text_normalization: preferences
                .text_normalization
                .or(defaults.text_normalization)
                .unwrap_or(false),
            theme: preferences.theme.unwrap_or_default(),
            type_scale: preferences.type_scale.or(defaults.type_scale),
            vertical_text,
            word_spacing: preferences.word_spacing.or(defaults.word_spacing),
        }
    }

    /// Whether the content is laid out right to left.
    pub fn is_rtl(&self) -> bool {
        self.reading_progression == ReadingProgression::Rtl
    }
}

impl Default for EpubSettings {
    fn default() -> Self {
        Self::resolve(
            &EpubPreferences::default(),
            &EpubDefaults::default(),
            &EpubPublicationContext::default(),
        )
    }
}
