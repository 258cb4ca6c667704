//! Value types used by EPUB preferences and settings.

use core::fmt;
use core::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Publication layout, deciding which settings apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EpubLayout {
    /// Reflowable content laid out by the reading system.
    #[default]
    Reflowable,
    /// Pre-paginated content with authored page geometry.
    Fixed,
}

/// Packed `0xRRGGBB` color.
///
/// The high byte is ignored: comparison and hashing use [`Color::value`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl Color {
    /// Build a color from its channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Parse `#RRGGBB` or `RRGGBB`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self)
    }

    /// Packed value masked to 24 bits.
    pub const fn value(self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.value())
    }
}

/// Reading theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
}

impl Theme {
    /// Every theme, in presentation order.
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Sepia];

    /// Default text color for this theme.
    pub const fn content_color(self) -> Color {
        match self {
            Theme::Light => Color(0x121212),
            Theme::Dark => Color(0xFEFEFE),
            Theme::Sepia => Color(0x121212),
        }
    }

    /// Default page color for this theme.
    pub const fn background_color(self) -> Color {
        match self {
            Theme::Light => Color(0xFFFFFF),
            Theme::Dark => Color(0x000000),
            Theme::Sepia => Color(0xFAF4E8),
        }
    }
}

/// Number of columns in paginated reflowable mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnCount {
    /// Let the reading system pick from the viewport width.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl ColumnCount {
    pub const ALL: [ColumnCount; 3] = [ColumnCount::Auto, ColumnCount::One, ColumnCount::Two];
}

/// Font family name as exposed to the reading system stylesheets.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontFamily(String);

impl FontFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// CSS generic `serif`.
    pub fn serif() -> Self {
        Self::new("serif")
    }

    /// CSS generic `sans-serif`.
    pub fn sans_serif() -> Self {
        Self::new("sans-serif")
    }

    /// CSS generic `cursive`.
    pub fn cursive() -> Self {
        Self::new("cursive")
    }

    /// CSS generic `monospace`.
    pub fn monospace() -> Self {
        Self::new("monospace")
    }

    /// Reading-friendly font for dyslexic readers.
    pub fn open_dyslexic() -> Self {
        Self::new("OpenDyslexic")
    }

    /// Typeface designed for readers with low vision.
    pub fn accessible_dfa() -> Self {
        Self::new("AccessibleDfA")
    }

    /// Duospaced font from iA Writer.
    pub fn ia_writer_duospace() -> Self {
        Self::new("IA Writer Duospace")
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FontFamily {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Filter applied to images, only in the dark theme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    /// Dim images so they do not glare against a dark page.
    Darken,
    /// Invert image colors.
    Invert,
}

/// Horizontal text alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Align to the start edge of the reading progression.
    #[default]
    Start,
    Left,
    Right,
    Justify,
}

/// Direction pages are turned in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingProgression {
    #[default]
    Ltr,
    Rtl,
}

/// Synthetic spread policy for fixed layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spread {
    /// Spread in landscape orientation only.
    #[default]
    Auto,
    Never,
    Always,
}

/// BCP 47 language tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

const RTL_LANGUAGES: &[&str] = &["ar", "fa", "he", "ps", "ur", "yi"];
const CJK_LANGUAGES: &[&str] = &["ja", "ko", "zh"];

impl Language {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The full tag, as given.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Lowercased primary subtag, e.g. `zh` for `zh-Hant-TW`.
    pub fn primary_subtag(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Chinese, Japanese or Korean.
    pub fn is_cjk(&self) -> bool {
        CJK_LANGUAGES.contains(&self.primary_subtag().as_str())
    }

    /// Written right to left.
    pub fn is_rtl(&self) -> bool {
        RTL_LANGUAGES.contains(&self.primary_subtag().as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#FAF4E8"), Some(Color(0xFAF4E8)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#12345G"), None);
        assert_eq!(Color(0x0A0B0C).to_string(), "#0A0B0C");
    }

    #[test]
    fn color_channels_ignore_high_byte() {
        let color = Color(0xFF_12_34_56);
        assert_eq!(color.value(), 0x123456);
        assert_eq!((color.red(), color.green(), color.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn colors_rendering_alike_are_equal() {
        use std::collections::hash_map::DefaultHasher;

        let packed = Color(0xFF_12_34_56);
        let plain = Color(0x12_34_56);
        assert_eq!(packed, plain);
        assert_eq!(packed.to_string(), plain.to_string());
        assert_ne!(packed, Color(0x12_34_57));

        let hash = |color: Color| {
            let mut hasher = DefaultHasher::new();
            color.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(packed), hash(plain));

        let decoded: Color = serde_json::from_str("4279383126").unwrap();
        assert_eq!(decoded, plain);
    }

    #[test]
    fn theme_colors() {
        assert_eq!(Theme::Dark.background_color(), Color(0x000000));
        assert_eq!(Theme::Dark.content_color(), Color(0xFEFEFE));
        assert_eq!(Theme::Sepia.background_color(), Color(0xFAF4E8));
    }

    #[test]
    fn language_scripts_follow_primary_subtag() {
        assert!(Language::from("zh-Hant-TW").is_cjk());
        assert!(Language::from("JA").is_cjk());
        assert!(!Language::from("en-US").is_cjk());
        assert!(Language::from("ar_EG").is_rtl());
        assert!(Language::from("he").is_rtl());
        assert!(!Language::from("fr").is_rtl());
    }

    #[test]
    fn enum_wire_names() {
        assert_eq!(serde_json::to_string(&ColumnCount::Two).unwrap(), "\"2\"");
        assert_eq!(serde_json::to_string(&Theme::Sepia).unwrap(), "\"sepia\"");
        assert_eq!(
            serde_json::from_str::<ReadingProgression>("\"rtl\"").unwrap(),
            ReadingProgression::Rtl
        );
        assert_eq!(
            serde_json::from_str::<FontFamily>("\"Iowan Old Style\"").unwrap(),
            FontFamily::new("Iowan Old Style")
        );
    }
}
