//! Translation of EPUB settings into ReadiumCSS properties.

use readium_preferences::epub::{
    ColumnCount, EpubSettings, ImageFilter, Language, ReadingProgression, TextAlign, Theme,
};

use crate::css_properties::{CssProperties, CssRsProperties, CssUserProperties};
use crate::css_values::{
    CssAppearance, CssColCount, CssColor, CssHyphens, CssLength, CssLigatures, CssLineHeight,
    CssTextAlign, CssView,
};
use crate::fonts::{font_stack_names, FontDeclarations};

/// ReadiumCSS stylesheet variant to inject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CssStylesheets {
    #[default]
    Default,
    Rtl,
    CjkHorizontal,
    CjkVertical,
}

impl CssStylesheets {
    /// Sub-folder of the ReadiumCSS distribution holding the variant, `None`
    /// for the root folder.
    pub const fn folder(self) -> Option<&'static str> {
        match self {
            CssStylesheets::Default => None,
            CssStylesheets::Rtl => Some("rtl"),
            CssStylesheets::CjkHorizontal => Some("cjk-horizontal"),
            CssStylesheets::CjkVertical => Some("cjk-vertical"),
        }
    }
}

/// `dir` attribute of the root element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HtmlDir {
    #[default]
    Unspecified,
    Ltr,
    Rtl,
}

impl HtmlDir {
    pub const fn attribute(self) -> Option<&'static str> {
        match self {
            HtmlDir::Unspecified => None,
            HtmlDir::Ltr => Some("ltr"),
            HtmlDir::Rtl => Some("rtl"),
        }
    }
}

/// Document layout implied by language and direction settings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CssLayout {
    pub stylesheets: CssStylesheets,
    pub html_dir: HtmlDir,
    /// Value of the root `lang` attribute.
    pub language: Option<Language>,
}

impl CssLayout {
    pub fn new(
        vertical_text: bool,
        language: Option<Language>,
        reading_progression: ReadingProgression,
    ) -> Self {
        let stylesheets = if vertical_text {
            CssStylesheets::CjkVertical
        } else if language.as_ref().is_some_and(Language::is_cjk) {
            CssStylesheets::CjkHorizontal
        } else if reading_progression == ReadingProgression::Rtl {
            CssStylesheets::Rtl
        } else {
            CssStylesheets::Default
        };
        let html_dir = match stylesheets {
            CssStylesheets::Rtl => HtmlDir::Rtl,
            CssStylesheets::Default | CssStylesheets::CjkHorizontal => HtmlDir::Ltr,
            CssStylesheets::CjkVertical => HtmlDir::Unspecified,
        };
        Self {
            stylesheets,
            html_dir,
            language,
        }
    }

    pub fn from_settings(settings: &EpubSettings) -> Self {
        Self::new(
            settings.vertical_text,
            settings.language.clone(),
            settings.reading_progression,
        )
    }
}

/// ReadiumCSS configuration of one document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadiumCss {
    pub layout: CssLayout,
    /// Reading system baseline, owned by the navigator.
    pub rs_properties: CssRsProperties,
    /// User settings, rebuilt on every update.
    pub user_properties: CssUserProperties,
    /// Font-stack resolution table.
    pub font_declarations: FontDeclarations,
}

impl ReadiumCss {
    pub fn new(rs_properties: CssRsProperties, font_declarations: FontDeclarations) -> Self {
        Self {
            layout: CssLayout::default(),
            rs_properties,
            user_properties: CssUserProperties::default(),
            font_declarations,
        }
    }

    /// Copy of `self` with layout and user properties derived from
    /// `settings`.
    ///
    /// The result depends only on `settings`, the reading system properties
    /// and the font declarations; previous user properties are discarded.
    pub fn update(&self, settings: &EpubSettings) -> Self {
        Self {
            layout: CssLayout::from_settings(settings),
            rs_properties: self.rs_properties.clone(),
            user_properties: self.user_properties_for(settings),
            font_declarations: self.font_declarations.clone(),
        }
    }

    /// Style attribute value for the root element: reading system
    /// properties, then user properties.
    pub fn inline_style(&self) -> Option<String> {
        match (self.rs_properties.css(), self.user_properties.css()) {
            (None, None) => None,
            (rs, user) => Some(rs.unwrap_or_default() + &user.unwrap_or_default()),
        }
    }

    fn user_properties_for(&self, settings: &EpubSettings) -> CssUserProperties {
        let font_family = settings.font_family.as_ref().map(|family| {
            font_stack_names(&self.font_declarations.resolve_font_stack(family))
        });

        let mut user = CssUserProperties {
            view: Some(if settings.scroll {
                CssView::Scroll
            } else {
                CssView::Paged
            }),
            col_count: Some(match settings.column_count {
                ColumnCount::Auto => CssColCount::Auto,
                ColumnCount::One => CssColCount::One,
                ColumnCount::Two => CssColCount::Two,
            }),
            page_margins: Some(settings.page_margins),
            appearance: match settings.theme {
                Theme::Light => None,
                Theme::Dark => Some(CssAppearance::Night),
                Theme::Sepia => Some(CssAppearance::Sepia),
            },
            darken_images: settings.image_filter == Some(ImageFilter::Darken),
            invert_images: settings.image_filter == Some(ImageFilter::Invert),
            text_color: settings.text_color.map(CssColor::from),
            background_color: settings.background_color.map(CssColor::from),
            font_override: font_family.is_some() || settings.text_normalization,
            font_family,
            font_size: Some(CssLength::percent(settings.font_size)),
            advanced_settings: !settings.publisher_styles,
            type_scale: settings.type_scale,
            text_align: settings.text_align.map(|align| match align {
                TextAlign::Start => CssTextAlign::Start,
                TextAlign::Left => CssTextAlign::Left,
                TextAlign::Right => CssTextAlign::Right,
                TextAlign::Justify => CssTextAlign::Justify,
            }),
            line_height: settings.line_height.map(CssLineHeight::Unitless),
            para_spacing: settings.paragraph_spacing.map(CssLength::rem),
            para_indent: settings.paragraph_indent.map(CssLength::rem),
            word_spacing: settings.word_spacing.map(CssLength::rem),
            letter_spacing: settings
                .letter_spacing
                .map(|spacing| CssLength::rem(spacing / 2.0)),
            body_hyphens: settings.hyphens.map(|hyphens| {
                if hyphens {
                    CssHyphens::Auto
                } else {
                    CssHyphens::None
                }
            }),
            ligatures: settings.ligatures.map(|ligatures| {
                if ligatures {
                    CssLigatures::Common
                } else {
                    CssLigatures::None
                }
            }),
            a11y_normalize: settings.text_normalization,
            ..CssUserProperties::default()
        };

        if let Some(weight) = settings.font_weight {
            user.overrides.insert(
                "font-weight".to_string(),
                Some(css_font_weight(weight).to_string()),
            );
        }
        user
    }
}

/// CSS `font-weight` for a boldness multiplier, where `1.0` is 400.
pub fn css_font_weight(multiplier: f64) -> i32 {
    ((400.0 * multiplier).round() as i32).clamp(1, 1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use readium_preferences::epub::{
        EpubDefaults, EpubPreferences, EpubPublicationContext, FontFamily,
    };

    fn settings(preferences: EpubPreferences) -> EpubSettings {
        EpubSettings::resolve(
            &preferences,
            &EpubDefaults::default(),
            &EpubPublicationContext::default(),
        )
    }

    #[test]
    fn default_settings_emit_layout_variables_only() {
        let css = ReadiumCss::default().update(&EpubSettings::default());
        assert_eq!(
            css.inline_style().as_deref(),
            Some(
                "--USER__colCount: auto !important;\n\
                 --USER__fontSize: 100.00000% !important;\n\
                 --USER__pageMargins: 1.00000 !important;\n\
                 --USER__view: readium-paged-on !important;\n"
            )
        );
        assert_eq!(css.layout.stylesheets, CssStylesheets::Default);
        assert_eq!(css.layout.html_dir.attribute(), Some("ltr"));
    }

    #[test]
    fn spacing_uses_rem_and_halves_letter_spacing() {
        let css = ReadiumCss::default().update(&settings(EpubPreferences {
            publisher_styles: Some(false),
            letter_spacing: Some(0.5),
            word_spacing: Some(0.4),
            paragraph_indent: Some(1.0),
            line_height: Some(1.5),
            ..EpubPreferences::default()
        }));
        let props = css.user_properties.css_properties();
        assert_eq!(props["--USER__letterSpacing"].as_deref(), Some("0.25000rem"));
        assert_eq!(props["--USER__wordSpacing"].as_deref(), Some("0.40000rem"));
        assert_eq!(props["--USER__paraIndent"].as_deref(), Some("1.00000rem"));
        assert_eq!(props["--USER__lineHeight"].as_deref(), Some("1.50000"));
        assert_eq!(
            props["--USER__advancedSettings"].as_deref(),
            Some("readium-advanced-on")
        );
    }

    #[test]
    fn font_family_resolves_stack_and_enables_override() {
        let css = ReadiumCss::new(CssRsProperties::default(), FontDeclarations::readium_defaults())
            .update(&settings(EpubPreferences {
                font_family: Some(FontFamily::ia_writer_duospace()),
                ..EpubPreferences::default()
            }));
        let props = css.user_properties.css_properties();
        assert_eq!(
            props["--USER__fontFamily"].as_deref(),
            Some("\"IA Writer Duospace\", monospace")
        );
        assert_eq!(props["--USER__fontOverride"].as_deref(), Some("readium-font-on"));
    }

    #[test]
    fn font_weight_becomes_override() {
        assert_eq!(css_font_weight(1.0), 400);
        assert_eq!(css_font_weight(1.25), 500);
        assert_eq!(css_font_weight(0.0), 1);
        assert_eq!(css_font_weight(2.6), 1000);

        let css = ReadiumCss::default().update(&settings(EpubPreferences {
            font_weight: Some(1.5),
            ..EpubPreferences::default()
        }));
        let style = css.inline_style().unwrap_or_default();
        assert!(style.contains("font-weight: 600 !important;\n"));
    }

    #[test]
    fn image_filters_and_theme_flags() {
        let css = ReadiumCss::default().update(&settings(EpubPreferences {
            theme: Some(Theme::Dark),
            image_filter: Some(ImageFilter::Invert),
            ..EpubPreferences::default()
        }));
        let props = css.user_properties.css_properties();
        assert_eq!(props["--USER__appearance"].as_deref(), Some("readium-night-on"));
        assert_eq!(props["--USER__invertImages"].as_deref(), Some("readium-invert-on"));
        assert_eq!(props["--USER__darkenImages"], None);
        // Theme colors come from the stylesheets, not from the variables.
        assert_eq!(props["--USER__textColor"], None);
    }

    #[test]
    fn update_discards_previous_user_properties() {
        let base = ReadiumCss::default();
        let dark = base.update(&settings(EpubPreferences {
            theme: Some(Theme::Dark),
            ..EpubPreferences::default()
        }));
        let light = dark.update(&EpubSettings::default());
        assert_eq!(light, base.update(&EpubSettings::default()));
    }

    #[test]
    fn layout_follows_language_and_direction() {
        let rtl = CssLayout::new(false, Some(Language::from("he")), ReadingProgression::Rtl);
        assert_eq!(rtl.stylesheets, CssStylesheets::Rtl);
        assert_eq!(rtl.html_dir, HtmlDir::Rtl);

        let horizontal = CssLayout::new(false, Some(Language::from("zh")), ReadingProgression::Rtl);
        assert_eq!(horizontal.stylesheets.folder(), Some("cjk-horizontal"));

        let vertical = CssLayout::new(true, Some(Language::from("ja")), ReadingProgression::Rtl);
        assert_eq!(vertical.stylesheets, CssStylesheets::CjkVertical);
        assert_eq!(vertical.html_dir.attribute(), None);
    }

    #[test]
    fn inline_style_puts_reading_system_first() {
        let css = ReadiumCss::new(CssRsProperties::wide_screen(), FontDeclarations::new())
            .update(&EpubSettings::default());
        let style = css.inline_style().unwrap_or_default();
        let rs = style.find("--RS__").unwrap_or(usize::MAX);
        let user = style.find("--USER__").unwrap_or(0);
        assert!(rs < user);
    }
}
