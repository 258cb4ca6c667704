//! User preferences for EPUB navigators.

use serde::{Deserialize, Serialize};

use super::types::{
    Color, ColumnCount, FontFamily, ImageFilter, Language, ReadingProgression, Spread, TextAlign,
    Theme,
};
use crate::configurable::ConfigurablePreferences;
use crate::error::PreferencesError;

/// Preferences tree for an EPUB navigator.
///
/// Every field is optional; unset fields fall back to the navigator defaults,
/// then to the publication metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EpubPreferences {
    /// Page background color, overriding the theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    /// Columns per page in paginated mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<ColumnCount>,
    /// Typeface for the body text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
    /// Base text size, where `1.0` is the publisher size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Boldness multiplier, where `1.0` is regular weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<f64>,
    /// Hyphenate justified text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyphens: Option<bool>,
    /// Filter applied to images in the dark theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_filter: Option<ImageFilter>,
    /// Content language, overriding the publication metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Extra space between letters, as a fraction of the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
    /// Use typographic ligatures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ligatures: Option<bool>,
    /// Leading multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    /// Show the first page of a fixed-layout spread alone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_first_page: Option<bool>,
    /// Horizontal page margin multiplier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<f64>,
    /// First-line paragraph indent, in rem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_indent: Option<f64>,
    /// Vertical space between paragraphs, in rem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_spacing: Option<f64>,
    /// Keep the publisher's own styles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_styles: Option<bool>,
    /// Page turn direction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_progression: Option<ReadingProgression>,
    /// Scroll continuously instead of paginating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<bool>,
    /// Fixed-layout spread policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<Spread>,
    /// Body text alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Text color, overriding the theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// Normalize text for accessibility (no italics, bold or small caps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_normalization: Option<bool>,
    /// Reading theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Modular scale ratio applied to headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_scale: Option<f64>,
    /// Lay out CJK text vertically.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_text: Option<bool>,
    /// Extra space between words, in rem.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_spacing: Option<f64>,
}

impl EpubPreferences {
    /// Decode preferences from JSON. Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, PreferencesError> {
        serde_json::from_str(json).map_err(PreferencesError::json_decode)
    }

    /// Encode preferences as JSON, omitting unset fields.
    pub fn to_json(&self) -> Result<String, PreferencesError> {
        serde_json::to_string(self).map_err(PreferencesError::json_encode)
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ConfigurablePreferences for EpubPreferences {
    fn merging(&self, other: &Self) -> Self {
        Self {
            background_color: other.background_color.or(self.background_color),
            column_count: other.column_count.or(self.column_count),
            font_family: other
                .font_family
                .clone()
                .or_else(|| self.font_family.clone()),
            font_size: other.font_size.or(self.font_size),
            font_weight: other.font_weight.or(self.font_weight),
            hyphens: other.hyphens.or(self.hyphens),
            image_filter: other.image_filter.or(self.image_filter),
            language: other.language.clone().or_else(|| self.language.clone()),
            letter_spacing: other.letter_spacing.or(self.letter_spacing),
            ligatures: other.ligatures.or(self.ligatures),
            line_height: other.line_height.or(self.line_height),
            offset_first_page: other.offset_first_page.or(self.offset_first_page),
            page_margins: other.page_margins.or(self.page_margins),
            paragraph_indent: other.paragraph_indent.or(self.paragraph_indent),
            paragraph_spacing: other.paragraph_spacing.or(self.paragraph_spacing),
            publisher_styles: other.publisher_styles.or(self.publisher_styles),
            reading_progression: other.reading_progression.or(self.reading_progression),
            scroll: other.scroll.or(self.scroll),
            spread: other.spread.or(self.spread),
            text_align: other.text_align.or(self.text_align),
            text_color: other.text_color.or(self.text_color),
            text_normalization: other.text_normalization.or(self.text_normalization),
            theme: other.theme.or(self.theme),
            type_scale: other.type_scale.or(self.type_scale),
            vertical_text: other.vertical_text.or(self.vertical_text),
            word_spacing: other.word_spacing.or(self.word_spacing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_camel_case_and_omits_unset_fields() {
        let prefs = EpubPreferences {
            font_size: Some(1.5),
            publisher_styles: Some(false),
            theme: Some(Theme::Dark),
            ..EpubPreferences::default()
        };
        let json = prefs.to_json().unwrap();
        assert_eq!(
            json,
            r#"{"fontSize":1.5,"publisherStyles":false,"theme":"dark"}"#
        );
        assert_eq!(EpubPreferences::from_json(&json).unwrap(), prefs);
    }

    #[test]
    fn decode_ignores_unknown_keys_and_reports_bad_values() {
        let prefs = EpubPreferences::from_json(r#"{"columnCount":"2","someFutureKey":3}"#).unwrap();
        assert_eq!(prefs.column_count, Some(ColumnCount::Two));

        let err = EpubPreferences::from_json(r#"{"theme":"neon"}"#).unwrap_err();
        assert_eq!(err.code, "PREFERENCES_JSON_DECODE");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn merging_overrides_only_set_fields() {
        let base = EpubPreferences {
            font_size: Some(1.2),
            theme: Some(Theme::Sepia),
            language: Some(Language::from("fr")),
            ..EpubPreferences::default()
        };
        let overlay = EpubPreferences {
            theme: Some(Theme::Dark),
            scroll: Some(true),
            ..EpubPreferences::default()
        };
        let merged = base.merging(&overlay);
        assert_eq!(merged.font_size, Some(1.2));
        assert_eq!(merged.theme, Some(Theme::Dark));
        assert_eq!(merged.scroll, Some(true));
        assert_eq!(merged.language, Some(Language::from("fr")));
        assert_eq!(base.merging(&EpubPreferences::empty()), base);
        assert_eq!(EpubPreferences::empty().merging(&overlay), overlay);
    }

    #[test]
    fn empty_preferences_serialize_to_empty_object() {
        assert!(EpubPreferences::empty().is_empty());
        assert_eq!(EpubPreferences::empty().to_json().unwrap(), "{}");
    }
}
