use crate::error::StyleError;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;
use std::str::FromStr;

/// The body typeface family selected by the export configuration.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontChoice {
    #[default]
    Serif,
    Sans,
    Monospace,
}

impl FontChoice {
    pub const ALL: [FontChoice; 3] = [FontChoice::Serif, FontChoice::Sans, FontChoice::Monospace];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontChoice::Serif => "serif",
            FontChoice::Sans => "sans",
            FontChoice::Monospace => "monospace",
        }
    }
}

impl fmt::Display for FontChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontChoice {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "serif" | "times" | "times new roman" => Ok(FontChoice::Serif),
            "sans" | "sans-serif" | "helvetica" | "arial" => Ok(FontChoice::Sans),
            "monospace" | "mono" | "courier" => Ok(FontChoice::Monospace),
            _ => Err(StyleError::UnknownFont(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for FontChoice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// One of the twelve standard PDF text faces the exporter draws with.
///
/// Standard faces need no embedding, so the PDF backend only has to reference
/// them by PostScript name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontFace {
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl FontFace {
    pub fn select(choice: FontChoice, weight: FontWeight, style: FontStyle) -> Self {
        let bold = weight == FontWeight::Bold;
        let italic = style == FontStyle::Italic;
        match (choice, bold, italic) {
            (FontChoice::Serif, false, false) => FontFace::TimesRoman,
            (FontChoice::Serif, true, false) => FontFace::TimesBold,
            (FontChoice::Serif, false, true) => FontFace::TimesItalic,
            (FontChoice::Serif, true, true) => FontFace::TimesBoldItalic,
            (FontChoice::Sans, false, false) => FontFace::Helvetica,
            (FontChoice::Sans, true, false) => FontFace::HelveticaBold,
            (FontChoice::Sans, false, true) => FontFace::HelveticaOblique,
            (FontChoice::Sans, true, true) => FontFace::HelveticaBoldOblique,
            (FontChoice::Monospace, false, false) => FontFace::Courier,
            (FontChoice::Monospace, true, false) => FontFace::CourierBold,
            (FontChoice::Monospace, false, true) => FontFace::CourierOblique,
            (FontChoice::Monospace, true, true) => FontFace::CourierBoldOblique,
        }
    }

    pub fn postscript_name(&self) -> &'static str {
        match self {
            FontFace::TimesRoman => "Times-Roman",
            FontFace::TimesBold => "Times-Bold",
            FontFace::TimesItalic => "Times-Italic",
            FontFace::TimesBoldItalic => "Times-BoldItalic",
            FontFace::Helvetica => "Helvetica",
            FontFace::HelveticaBold => "Helvetica-Bold",
            FontFace::HelveticaOblique => "Helvetica-Oblique",
            FontFace::HelveticaBoldOblique => "Helvetica-BoldOblique",
            FontFace::Courier => "Courier",
            FontFace::CourierBold => "Courier-Bold",
            FontFace::CourierOblique => "Courier-Oblique",
            FontFace::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    pub fn family(&self) -> FontChoice {
        match self {
            FontFace::TimesRoman
            | FontFace::TimesBold
            | FontFace::TimesItalic
            | FontFace::TimesBoldItalic => FontChoice::Serif,
            FontFace::Helvetica
            | FontFace::HelveticaBold
            | FontFace::HelveticaOblique
            | FontFace::HelveticaBoldOblique => FontChoice::Sans,
            FontFace::Courier
            | FontFace::CourierBold
            | FontFace::CourierOblique
            | FontFace::CourierBoldOblique => FontChoice::Monospace,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(
            self,
            FontFace::TimesBold
                | FontFace::TimesBoldItalic
                | FontFace::HelveticaBold
                | FontFace::HelveticaBoldOblique
                | FontFace::CourierBold
                | FontFace::CourierBoldOblique
        )
    }

    pub fn is_italic(&self) -> bool {
        matches!(
            self,
            FontFace::TimesItalic
                | FontFace::TimesBoldItalic
                | FontFace::HelveticaOblique
                | FontFace::HelveticaBoldOblique
                | FontFace::CourierOblique
                | FontFace::CourierBoldOblique
        )
    }
}
