//! Typed CSS values and their serialization.
//!
//! Every value renders through [`CssValue::css`]. Numbers use a fixed
//! 5-decimal precision so that generated stylesheets are stable across runs.

use core::fmt;

use readium_preferences::epub::Color;

/// A value that can be written as a CSS property value.
///
/// `None` means the value contributes nothing and the property is omitted.
pub trait CssValue {
    fn css(&self) -> Option<String>;
}

impl<T: CssValue + ?Sized> CssValue for &T {
    fn css(&self) -> Option<String> {
        (**self).css()
    }
}

impl<T: CssValue> CssValue for Option<T> {
    fn css(&self) -> Option<String> {
        self.as_ref().and_then(CssValue::css)
    }
}

impl CssValue for f64 {
    fn css(&self) -> Option<String> {
        Some(format!("{:.5}", self))
    }
}

impl CssValue for i32 {
    fn css(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Identifiers are written bare; anything with a space or a double quote is
/// quoted, with inner quotes escaped.
impl CssValue for str {
    fn css(&self) -> Option<String> {
        if self.contains(' ') || self.contains('"') {
            Some(format!("\"{}\"", self.replace('"', "\\\"")))
        } else {
            Some(self.to_string())
        }
    }
}

impl CssValue for String {
    fn css(&self) -> Option<String> {
        self.as_str().css()
    }
}

/// Lists are joined with `", "`, skipping entries that render to nothing.
impl<T: CssValue> CssValue for [T] {
    fn css(&self) -> Option<String> {
        let items: Vec<String> = self.iter().filter_map(CssValue::css).collect();
        if items.is_empty() {
            None
        } else {
            Some(items.join(", "))
        }
    }
}

impl<T: CssValue> CssValue for Vec<T> {
    fn css(&self) -> Option<String> {
        self.as_slice().css()
    }
}

/// Marker written for an enabled presence flag, nothing otherwise.
pub fn css_flag(enabled: bool, marker: &'static str) -> Option<String> {
    enabled.then(|| marker.to_string())
}

/// Structured error for checked CSS value construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CssValueError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
}

impl CssValueError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
        }
    }
}

impl fmt::Display for CssValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for CssValueError {}

/// CSS length units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssUnit {
    Cm,
    Mm,
    In,
    Px,
    Pt,
    Pc,
    Em,
    Ch,
    Rem,
    Vw,
    Vh,
    Vmin,
    Vmax,
    Percent,
}

impl CssUnit {
    pub const fn suffix(self) -> &'static str {
        match self {
            CssUnit::Cm => "cm",
            CssUnit::Mm => "mm",
            CssUnit::In => "in",
            CssUnit::Px => "px",
            CssUnit::Pt => "pt",
            CssUnit::Pc => "pc",
            CssUnit::Em => "em",
            CssUnit::Ch => "ch",
            CssUnit::Rem => "rem",
            CssUnit::Vw => "vw",
            CssUnit::Vh => "vh",
            CssUnit::Vmin => "vmin",
            CssUnit::Vmax => "vmax",
            CssUnit::Percent => "%",
        }
    }
}

/// A number with a unit.
///
/// Percent lengths hold a ratio: `CssLength::percent(1.5)` renders as
/// `150.00000%`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssLength {
    pub value: f64,
    pub unit: CssUnit,
}

impl CssLength {
    pub const fn new(value: f64, unit: CssUnit) -> Self {
        Self { value, unit }
    }

    pub const fn percent(ratio: f64) -> Self {
        Self::new(ratio, CssUnit::Percent)
    }

    pub const fn rem(value: f64) -> Self {
        Self::new(value, CssUnit::Rem)
    }

    pub const fn em(value: f64) -> Self {
        Self::new(value, CssUnit::Em)
    }

    pub const fn px(value: f64) -> Self {
        Self::new(value, CssUnit::Px)
    }
}

impl CssValue for CssLength {
    fn css(&self) -> Option<String> {
        let value = match self.unit {
            CssUnit::Percent => self.value * 100.0,
            _ => self.value,
        };
        Some(format!("{:.5}{}", value, self.unit.suffix()))
    }
}

/// `rgb(r, g, b)` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CssRgbColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl CssRgbColor {
    /// Build a color from channels in `0..=255`.
    ///
    /// # Panics
    ///
    /// Panics when a channel is out of range. Use [`try_new`](Self::try_new)
    /// for untrusted input.
    pub fn new(red: i32, green: i32, blue: i32) -> Self {
        for (name, value) in [("red", red), ("green", green), ("blue", blue)] {
            assert!(
                (0..=255).contains(&value),
                "CSS_COLOR_CHANNEL_RANGE: {} channel {} is outside 0..=255",
                name,
                value
            );
        }
        Self {
            red: red as u8,
            green: green as u8,
            blue: blue as u8,
        }
    }

    /// Checked constructor.
    pub fn try_new(red: i32, green: i32, blue: i32) -> Result<Self, CssValueError> {
        Ok(Self {
            red: channel("red", red)?,
            green: channel("green", green)?,
            blue: channel("blue", blue)?,
        })
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }
}

fn channel(name: &str, value: i32) -> Result<u8, CssValueError> {
    u8::try_from(value).map_err(|_| {
        CssValueError::new(
            "CSS_COLOR_CHANNEL_RANGE",
            format!("{} channel {} is outside 0..=255", name, value),
        )
    })
}

impl CssValue for CssRgbColor {
    fn css(&self) -> Option<String> {
        Some(format!("rgb({}, {}, {})", self.red, self.green, self.blue))
    }
}

/// Free-form hex color, written as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CssHexColor(pub String);

impl CssValue for CssHexColor {
    fn css(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Packed `0xRRGGBB` color, written as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CssIntColor(pub u32);

impl CssValue for CssIntColor {
    fn css(&self) -> Option<String> {
        Some(format!("#{:06X}", self.0 & 0x00FF_FFFF))
    }
}

impl From<Color> for CssIntColor {
    fn from(color: Color) -> Self {
        Self(color.value())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CssColor {
    Rgb(CssRgbColor),
    Hex(CssHexColor),
    Int(CssIntColor),
}

impl CssValue for CssColor {
    fn css(&self) -> Option<String> {
        match self {
            CssColor::Rgb(color) => color.css(),
            CssColor::Hex(color) => color.css(),
            CssColor::Int(color) => color.css(),
        }
    }
}

impl From<Color> for CssColor {
    fn from(color: Color) -> Self {
        CssColor::Int(color.into())
    }
}

/// `line-height` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssLineHeight {
    Length(CssLength),
    /// Multiplier of the element font size.
    Unitless(f64),
}

impl CssValue for CssLineHeight {
    fn css(&self) -> Option<String> {
        match self {
            CssLineHeight::Length(length) => length.css(),
            CssLineHeight::Unitless(value) => value.css(),
        }
    }
}

/// Reading mode of reflowable content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssView {
    Paged,
    Scroll,
}

impl CssView {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssView::Paged => "readium-paged-on",
            CssView::Scroll => "readium-scroll-on",
        }
    }
}

impl CssValue for CssView {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssColCount {
    Auto,
    One,
    Two,
}

impl CssColCount {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssColCount::Auto => "auto",
            CssColCount::One => "1",
            CssColCount::Two => "2",
        }
    }
}

impl CssValue for CssColCount {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

/// Non-default reading themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssAppearance {
    Night,
    Sepia,
}

impl CssAppearance {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssAppearance::Night => "readium-night-on",
            CssAppearance::Sepia => "readium-sepia-on",
        }
    }
}

impl CssValue for CssAppearance {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssTextAlign {
    Start,
    Left,
    Right,
    Justify,
}

impl CssTextAlign {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssTextAlign::Start => "start",
            CssTextAlign::Left => "left",
            CssTextAlign::Right => "right",
            CssTextAlign::Justify => "justify",
        }
    }
}

impl CssValue for CssTextAlign {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssHyphens {
    None,
    Auto,
}

impl CssHyphens {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssHyphens::None => "none",
            CssHyphens::Auto => "auto",
        }
    }
}

impl CssValue for CssHyphens {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssLigatures {
    None,
    Common,
}

impl CssLigatures {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssLigatures::None => "none",
            CssLigatures::Common => "common-ligatures",
        }
    }
}

impl CssValue for CssLigatures {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CssBoxSizing {
    ContentBox,
    BorderBox,
}

impl CssBoxSizing {
    pub const fn keyword(self) -> &'static str {
        match self {
            CssBoxSizing::ContentBox => "content-box",
            CssBoxSizing::BorderBox => "border-box",
        }
    }
}

impl CssValue for CssBoxSizing {
    fn css(&self) -> Option<String> {
        Some(self.keyword().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_use_five_decimals() {
        assert_eq!(1.5_f64.css().as_deref(), Some("1.50000"));
        assert_eq!(CssLength::em(1.5).css().as_deref(), Some("1.50000em"));
        assert_eq!(CssLength::rem(0.0).css().as_deref(), Some("0.00000rem"));
    }

    #[test]
    fn percent_lengths_are_scaled() {
        assert_eq!(CssLength::percent(1.5).css().as_deref(), Some("150.00000%"));
        assert_eq!(CssLength::percent(0.25).css().as_deref(), Some("25.00000%"));
    }

    #[test]
    fn strings_are_quoted_only_when_needed() {
        assert_eq!("Iowan Old Style".css().as_deref(), Some("\"Iowan Old Style\""));
        assert_eq!("Georgia".css().as_deref(), Some("Georgia"));
        assert_eq!(
            "say\"cheese\"".css().as_deref(),
            Some("\"say\\\"cheese\\\"\"")
        );
    }

    #[test]
    fn lists_join_with_comma() {
        let stack = vec!["Iowan Old Style".to_string(), "serif".to_string()];
        assert_eq!(stack.css().as_deref(), Some("\"Iowan Old Style\", serif"));
        let empty: Vec<String> = Vec::new();
        assert_eq!(empty.css(), None);
    }

    #[test]
    fn colors() {
        assert_eq!(CssIntColor(0xFF00FF).css().as_deref(), Some("#FF00FF"));
        assert_eq!(CssIntColor(0xAB_0000_0F).css().as_deref(), Some("#00000F"));
        assert_eq!(
            CssRgbColor::new(255, 0, 255).css().as_deref(),
            Some("rgb(255, 0, 255)")
        );
        assert_eq!(
            CssColor::Hex(CssHexColor("#abc".to_string())).css().as_deref(),
            Some("#abc")
        );
        assert_eq!(
            CssColor::from(Color(0x121212)).css().as_deref(),
            Some("#121212")
        );
    }

    #[test]
    #[should_panic(expected = "CSS_COLOR_CHANNEL_RANGE")]
    fn rgb_channel_out_of_range_panics() {
        let _ = CssRgbColor::new(256, 0, 0);
    }

    #[test]
    fn checked_rgb_reports_channel() {
        let err = CssRgbColor::try_new(0, -1, 0).unwrap_err();
        assert_eq!(err.code, "CSS_COLOR_CHANNEL_RANGE");
        assert!(err.to_string().contains("green channel -1"));
        assert!(CssRgbColor::try_new(0, 128, 255).is_ok());
    }

    #[test]
    fn flags_are_presence_based() {
        assert_eq!(css_flag(true, "readium-font-on").as_deref(), Some("readium-font-on"));
        assert_eq!(css_flag(false, "readium-font-on"), None);
    }

    #[test]
    fn keywords_and_line_heights() {
        assert_eq!(CssView::Scroll.css().as_deref(), Some("readium-scroll-on"));
        assert_eq!(CssLigatures::Common.css().as_deref(), Some("common-ligatures"));
        assert_eq!(CssColCount::Two.css().as_deref(), Some("2"));
        assert_eq!(CssLineHeight::Unitless(1.2).css().as_deref(), Some("1.20000"));
        assert_eq!(
            CssLineHeight::Length(CssLength::px(20.0)).css().as_deref(),
            Some("20.00000px")
        );
        let unset: Option<CssHyphens> = None;
        assert_eq!(unset.css(), None);
    }
}
