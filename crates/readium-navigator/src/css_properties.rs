//! ReadiumCSS custom property records.
//!
//! Two records feed the ReadiumCSS stylesheets: [`CssUserProperties`]
//! (`--USER__*`, driven by user settings) and [`CssRsProperties`]
//! (`--RS__*`, the reading system's baseline). Both are rebuilt from scratch
//! whenever settings change.

use std::collections::BTreeMap;

use crate::css_values::{
    css_flag, CssAppearance, CssBoxSizing, CssColCount, CssColor, CssHyphens, CssLength,
    CssLigatures, CssLineHeight, CssTextAlign, CssValue, CssView,
};

/// Property name to rendered value. `None` entries are omitted from CSS.
pub type CssPropertyMap = BTreeMap<String, Option<String>>;

/// A set of CSS custom properties.
pub trait CssProperties {
    /// Rendered property values, keyed by property name.
    fn css_properties(&self) -> CssPropertyMap;

    /// Declarations for an inline `style` attribute.
    ///
    /// Keys are sorted, each property is written as
    /// `key: value !important;\n`, unset values are skipped, and `None` is
    /// returned when nothing is set.
    fn css(&self) -> Option<String> {
        let mut css = String::new();
        for (key, value) in self.css_properties() {
            if let Some(value) = value {
                css.push_str(&key);
                css.push_str(": ");
                css.push_str(&value);
                css.push_str(" !important;\n");
            }
        }
        if css.is_empty() {
            None
        } else {
            Some(css)
        }
    }
}

fn insert(props: &mut CssPropertyMap, key: &str, value: Option<String>) {
    props.insert(key.to_string(), value);
}

/// Extra properties are applied last: they can add, replace or remove
/// (`None`) any generated property.
fn apply_overrides(props: &mut CssPropertyMap, overrides: &CssPropertyMap) {
    for (key, value) in overrides {
        props.insert(key.clone(), value.clone());
    }
}

/// User settings variables (`--USER__*`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssUserProperties {
    /// Paginated or scrolled view.
    pub view: Option<CssView>,
    /// Columns per page.
    pub col_count: Option<CssColCount>,
    /// Page margin multiplier.
    pub page_margins: Option<f64>,
    /// Non-default theme.
    pub appearance: Option<CssAppearance>,
    /// Dim images in night mode.
    pub darken_images: bool,
    /// Invert images in night mode.
    pub invert_images: bool,
    pub text_color: Option<CssColor>,
    pub background_color: Option<CssColor>,
    /// Required for `font_family` and `a11y_normalize` to apply.
    pub font_override: bool,
    /// Font stack, most preferred first.
    pub font_family: Option<Vec<String>>,
    /// Base font size, usually a percent length.
    pub font_size: Option<CssLength>,
    /// Required for the typography variables below to apply.
    pub advanced_settings: bool,
    pub type_scale: Option<f64>,
    pub text_align: Option<CssTextAlign>,
    pub line_height: Option<CssLineHeight>,
    pub para_spacing: Option<CssLength>,
    pub para_indent: Option<CssLength>,
    pub word_spacing: Option<CssLength>,
    pub letter_spacing: Option<CssLength>,
    pub body_hyphens: Option<CssHyphens>,
    pub ligatures: Option<CssLigatures>,
    /// Normalize text for accessibility.
    pub a11y_normalize: bool,
    /// Extra properties, applied last.
    pub overrides: CssPropertyMap,
}

impl CssProperties for CssUserProperties {
    fn css_properties(&self) -> CssPropertyMap {
        let mut props = CssPropertyMap::new();
        insert(&mut props, "--USER__view", self.view.css());
        insert(&mut props, "--USER__colCount", self.col_count.css());
        insert(&mut props, "--USER__pageMargins", self.page_margins.css());
        insert(&mut props, "--USER__appearance", self.appearance.css());
        insert(
            &mut props,
            "--USER__darkenImages",
            css_flag(self.darken_images, "readium-darken-on"),
        );
        insert(
            &mut props,
            "--USER__invertImages",
            css_flag(self.invert_images, "readium-invert-on"),
        );
        insert(&mut props, "--USER__textColor", self.text_color.css());
        insert(
            &mut props,
            "--USER__backgroundColor",
            self.background_color.css(),
        );
        insert(
            &mut props,
            "--USER__fontOverride",
            css_flag(self.font_override, "readium-font-on"),
        );
        insert(&mut props, "--USER__fontFamily", self.font_family.css());
        insert(&mut props, "--USER__fontSize", self.font_size.css());
        insert(
            &mut props,
            "--USER__advancedSettings",
            css_flag(self.advanced_settings, "readium-advanced-on"),
        );
        insert(&mut props, "--USER__typeScale", self.type_scale.css());
        insert(&mut props, "--USER__textAlign", self.text_align.css());
        insert(&mut props, "--USER__lineHeight", self.line_height.css());
        insert(&mut props, "--USER__paraSpacing", self.para_spacing.css());
        insert(&mut props, "--USER__paraIndent", self.para_indent.css());
        insert(&mut props, "--USER__wordSpacing", self.word_spacing.css());
        insert(&mut props, "--USER__letterSpacing", self.letter_spacing.css());
        insert(&mut props, "--USER__bodyHyphens", self.body_hyphens.css());
        insert(&mut props, "--USER__ligatures", self.ligatures.css());
        insert(
            &mut props,
            "--USER__a11yNormalize",
            css_flag(self.a11y_normalize, "readium-a11y-on"),
        );
        apply_overrides(&mut props, &self.overrides);
        props
    }
}

/// Reading system baseline variables (`--RS__*`).
///
/// `Default` leaves everything to the ReadiumCSS stylesheets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CssRsProperties {
    /// Optimal column width.
    pub col_width: Option<CssLength>,
    pub col_count: Option<CssColCount>,
    pub col_gap: Option<CssLength>,
    /// Horizontal page margins.
    pub page_gutter: Option<CssLength>,
    /// Vertical rhythm unit.
    pub flow_spacing: Option<CssLength>,
    pub para_spacing: Option<CssLength>,
    pub para_indent: Option<CssLength>,
    /// Maximum line length, capping the column width.
    pub max_line_length: Option<CssLength>,
    pub max_media_width: Option<CssLength>,
    pub max_media_height: Option<CssLength>,
    pub box_sizing_media: Option<CssBoxSizing>,
    pub box_sizing_table: Option<CssBoxSizing>,
    pub text_color: Option<CssColor>,
    pub background_color: Option<CssColor>,
    pub selection_text_color: Option<CssColor>,
    pub selection_background_color: Option<CssColor>,
    pub link_color: Option<CssColor>,
    pub visited_color: Option<CssColor>,
    pub primary_color: Option<CssColor>,
    pub secondary_color: Option<CssColor>,
    pub type_scale: Option<f64>,
    pub base_font_family: Option<Vec<String>>,
    pub base_line_height: Option<CssLineHeight>,
    /// Old-style typeface stack.
    pub old_style_tf: Option<Vec<String>>,
    /// Modern typeface stack.
    pub modern_tf: Option<Vec<String>>,
    /// Neutral sans-serif stack.
    pub sans_tf: Option<Vec<String>>,
    /// Humanist sans-serif stack.
    pub humanist_tf: Option<Vec<String>>,
    pub mono_tf: Option<Vec<String>>,
    pub serif_ja: Option<Vec<String>>,
    pub sans_serif_ja: Option<Vec<String>>,
    pub serif_ja_v: Option<Vec<String>>,
    pub sans_serif_ja_v: Option<Vec<String>>,
    pub comp_font_family: Option<Vec<String>>,
    pub code_font_family: Option<Vec<String>>,
    /// Extra properties, applied last.
    pub overrides: CssPropertyMap,
}

impl CssRsProperties {
    /// Generous line length and gutter, for large screens.
    pub fn wide_screen() -> Self {
        Self {
            col_width: Some(CssLength::em(45.0)),
            col_gap: Some(CssLength::px(48.0)),
            page_gutter: Some(CssLength::px(40.0)),
            max_line_length: Some(CssLength::rem(45.0)),
            ..Self::default()
        }
    }
}

impl CssProperties for CssRsProperties {
    fn css_properties(&self) -> CssPropertyMap {
        let mut props = CssPropertyMap::new();
        insert(&mut props, "--RS__colWidth", self.col_width.css());
        insert(&mut props, "--RS__colCount", self.col_count.css());
        insert(&mut props, "--RS__colGap", self.col_gap.css());
        insert(&mut props, "--RS__pageGutter", self.page_gutter.css());
        insert(&mut props, "--RS__flowSpacing", self.flow_spacing.css());
        insert(&mut props, "--RS__paraSpacing", self.para_spacing.css());
        insert(&mut props, "--RS__paraIndent", self.para_indent.css());
        insert(&mut props, "--RS__maxLineLength", self.max_line_length.css());
        insert(&mut props, "--RS__maxMediaWidth", self.max_media_width.css());
        insert(&mut props, "--RS__maxMediaHeight", self.max_media_height.css());
        insert(&mut props, "--RS__boxSizingMedia", self.box_sizing_media.css());
        insert(&mut props, "--RS__boxSizingTable", self.box_sizing_table.css());
        insert(&mut props, "--RS__textColor", self.text_color.css());
        insert(&mut props, "--RS__backgroundColor", self.background_color.css());
        insert(
            &mut props,
            "--RS__selectionTextColor",
            self.selection_text_color.css(),
        );
        insert(
            &mut props,
            "--RS__selectionBackgroundColor",
            self.selection_background_color.css(),
        );
        insert(&mut props, "--RS__linkColor", self.link_color.css());
        insert(&mut props, "--RS__visitedColor", self.visited_color.css());
        insert(&mut props, "--RS__primaryColor", self.primary_color.css());
        insert(&mut props, "--RS__secondaryColor", self.secondary_color.css());
        insert(&mut props, "--RS__typeScale", self.type_scale.css());
        insert(&mut props, "--RS__baseFontFamily", self.base_font_family.css());
        insert(&mut props, "--RS__baseLineHeight", self.base_line_height.css());
        insert(&mut props, "--RS__oldStyleTf", self.old_style_tf.css());
        insert(&mut props, "--RS__modernTf", self.modern_tf.css());
        insert(&mut props, "--RS__sansTf", self.sans_tf.css());
        insert(&mut props, "--RS__humanistTf", self.humanist_tf.css());
        insert(&mut props, "--RS__monospaceTf", self.mono_tf.css());
        insert(&mut props, "--RS__serif-ja", self.serif_ja.css());
        insert(&mut props, "--RS__sans-serif-ja", self.sans_serif_ja.css());
        insert(&mut props, "--RS__serif-ja-v", self.serif_ja_v.css());
        insert(&mut props, "--RS__sans-serif-ja-v", self.sans_serif_ja_v.css());
        insert(&mut props, "--RS__compFontFamily", self.comp_font_family.css());
        insert(&mut props, "--RS__codeFontFamily", self.code_font_family.css());
        apply_overrides(&mut props, &self.overrides);
        props
    }
}
