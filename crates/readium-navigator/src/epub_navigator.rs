//! Settings side of an EPUB navigator.

use readium_preferences::epub::{
    EpubDefaults, EpubLayout, EpubPreferences, EpubPreferencesEditor, EpubPublicationContext,
    EpubSettings,
};
use readium_preferences::Configurable;

use crate::css_properties::CssRsProperties;
use crate::fonts::FontDeclarations;
use crate::readium_css::ReadiumCss;

/// Navigator options fixed for the lifetime of a navigator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EpubNavigatorConfig {
    /// Fallbacks for unset preferences.
    pub defaults: EpubDefaults,
    /// Reading system CSS baseline.
    pub rs_properties: CssRsProperties,
    /// Font-stack resolution table.
    pub font_declarations: FontDeclarations,
}

/// Resolves submitted preferences into settings and ReadiumCSS properties.
#[derive(Clone, Debug)]
pub struct EpubNavigator {
    publication: EpubPublicationContext,
    layout: EpubLayout,
    defaults: EpubDefaults,
    preferences: EpubPreferences,
    settings: EpubSettings,
    css: ReadiumCss,
}

impl EpubNavigator {
    /// Navigator over `publication`, starting from empty preferences.
    pub fn new(
        publication: EpubPublicationContext,
        layout: EpubLayout,
        config: EpubNavigatorConfig,
    ) -> Self {
        let preferences = EpubPreferences::default();
        let settings = EpubSettings::resolve(&preferences, &config.defaults, &publication);
        let css = ReadiumCss::new(config.rs_properties, config.font_declarations).update(&settings);
        Self {
            publication,
            layout,
            defaults: config.defaults,
            preferences,
            settings,
            css,
        }
    }

    pub fn layout(&self) -> EpubLayout {
        self.layout
    }

    pub fn publication(&self) -> &EpubPublicationContext {
        &self.publication
    }

    /// Last submitted preferences.
    pub fn preferences(&self) -> &EpubPreferences {
        &self.preferences
    }

    pub fn css(&self) -> &ReadiumCss {
        &self.css
    }

    /// Style attribute for the root element of reflowable resources.
    ///
    /// Fixed layouts keep their authored styles, so this is `None` for them.
    pub fn inline_style(&self) -> Option<String> {
        match self.layout {
            EpubLayout::Reflowable => self.css.inline_style(),
            EpubLayout::Fixed => None,
        }
    }
}

impl Configurable for EpubNavigator {
    type Settings = EpubSettings;
    type Preferences = EpubPreferences;
    type Editor = EpubPreferencesEditor;

    fn settings(&self) -> &EpubSettings {
        &self.settings
    }

    fn submit_preferences(&mut self, preferences: EpubPreferences) {
        let settings = EpubSettings::resolve(&preferences, &self.defaults, &self.publication);
        if settings == self.settings {
            log::debug!("submitted preferences leave settings unchanged");
        } else {
            log::debug!(
                "settings updated: theme={:?} font_size={} scroll={}",
                settings.theme,
                settings.font_size,
                settings.scroll
            );
            self.css = self.css.update(&settings);
            self.settings = settings;
        }
        self.preferences = preferences;
    }

    fn editor(&self, preferences: EpubPreferences) -> EpubPreferencesEditor {
        EpubPreferencesEditor::new(
            preferences,
            self.publication.clone(),
            self.layout,
            self.defaults.clone(),
        )
    }
}
