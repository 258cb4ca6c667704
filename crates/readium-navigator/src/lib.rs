//! ReadiumCSS property model and the settings side of an EPUB navigator.
//!
//! [`EpubNavigator`] implements [`readium_preferences::Configurable`]:
//! submitted preferences resolve into `EpubSettings`, which [`ReadiumCss`]
//! turns into the CSS custom properties injected into each resource.

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

pub mod css_properties;
pub mod css_values;
pub mod epub_navigator;
pub mod fonts;
pub mod readium_css;

pub use css_properties::{CssProperties, CssPropertyMap, CssRsProperties, CssUserProperties};
pub use css_values::{
    css_flag, CssAppearance, CssBoxSizing, CssColCount, CssColor, CssHexColor, CssHyphens,
    CssIntColor, CssLength, CssLigatures, CssLineHeight, CssRgbColor, CssTextAlign, CssUnit,
    CssValue, CssValueError, CssView,
};
pub use epub_navigator::{EpubNavigator, EpubNavigatorConfig};
pub use fonts::{font_stack_names, FontDeclarations, FontFamilyDeclaration, FontStack};
pub use readium_css::{css_font_weight, CssLayout, CssStylesheets, HtmlDir, ReadiumCss};
