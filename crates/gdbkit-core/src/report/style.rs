use rust_xlsxwriter::TableStyle;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Style family of a built-in spreadsheet table style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleFamily {
    Light,
    Medium,
    Dark,
}

/// A built-in table style such as `TableStyleMedium2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStyleName {
    pub family: StyleFamily,
    pub index: u8,
}

impl Default for TableStyleName {
    fn default() -> Self {
        Self {
            family: StyleFamily::Medium,
            index: 2,
        }
    }
}

impl TableStyleName {
    const PREFIX: &'static str = "TableStyle";

    /// Number of built-in styles in a family
    fn family_size(family: StyleFamily) -> u8 {
        match family {
            StyleFamily::Light => 21,
            StyleFamily::Medium => 28,
            StyleFamily::Dark => 11,
        }
    }

    /// The writer's style value
    pub fn to_table_style(self) -> TableStyle {
        use TableStyle::*;
        match (self.family, self.index) {
            (StyleFamily::Light, 1) => Light1,
            (StyleFamily::Light, 2) => Light2,
            (StyleFamily::Light, 3) => Light3,
            (StyleFamily::Light, 4) => Light4,
            (StyleFamily::Light, 5) => Light5,
            (StyleFamily::Light, 6) => Light6,
            (StyleFamily::Light, 7) => Light7,
            (StyleFamily::Light, 8) => Light8,
            (StyleFamily::Light, 9) => Light9,
            (StyleFamily::Light, 10) => Light10,
            (StyleFamily::Light, 11) => Light11,
            (StyleFamily::Light, 12) => Light12,
            (StyleFamily::Light, 13) => Light13,
            (StyleFamily::Light, 14) => Light14,
            (StyleFamily::Light, 15) => Light15,
            (StyleFamily::Light, 16) => Light16,
            (StyleFamily::Light, 17) => Light17,
            (StyleFamily::Light, 18) => Light18,
            (StyleFamily::Light, 19) => Light19,
            (StyleFamily::Light, 20) => Light20,
            (StyleFamily::Light, 21) => Light21,
            (StyleFamily::Medium, 1) => Medium1,
            (StyleFamily::Medium, 2) => Medium2,
            (StyleFamily::Medium, 3) => Medium3,
            (StyleFamily::Medium, 4) => Medium4,
            (StyleFamily::Medium, 5) => Medium5,
            (StyleFamily::Medium, 6) => Medium6,
            (StyleFamily::Medium, 7) => Medium7,
            (StyleFamily::Medium, 8) => Medium8,
            (StyleFamily::Medium, 9) => Medium9,
            (StyleFamily::Medium, 10) => Medium10,
            (StyleFamily::Medium, 11) => Medium11,
            (StyleFamily::Medium, 12) => Medium12,
            (StyleFamily::Medium, 13) => Medium13,
            (StyleFamily::Medium, 14) => Medium14,
            (StyleFamily::Medium, 15) => Medium15,
            (StyleFamily::Medium, 16) => Medium16,
            (StyleFamily::Medium, 17) => Medium17,
            (StyleFamily::Medium, 18) => Medium18,
            (StyleFamily::Medium, 19) => Medium19,
            (StyleFamily::Medium, 20) => Medium20,
            (StyleFamily::Medium, 21) => Medium21,
            (StyleFamily::Medium, 22) => Medium22,
            (StyleFamily::Medium, 23) => Medium23,
            (StyleFamily::Medium, 24) => Medium24,
            (StyleFamily::Medium, 25) => Medium25,
            (StyleFamily::Medium, 26) => Medium26,
            (StyleFamily::Medium, 27) => Medium27,
            (StyleFamily::Medium, 28) => Medium28,
            (StyleFamily::Dark, 1) => Dark1,
            (StyleFamily::Dark, 2) => Dark2,
            (StyleFamily::Dark, 3) => Dark3,
            (StyleFamily::Dark, 4) => Dark4,
            (StyleFamily::Dark, 5) => Dark5,
            (StyleFamily::Dark, 6) => Dark6,
            (StyleFamily::Dark, 7) => Dark7,
            (StyleFamily::Dark, 8) => Dark8,
            (StyleFamily::Dark, 9) => Dark9,
            (StyleFamily::Dark, 10) => Dark10,
            (StyleFamily::Dark, 11) => Dark11,
            // Indices are range-checked on construction
            _ => Medium2,
        }
    }
}

impl fmt::Display for TableStyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family {
            StyleFamily::Light => "Light",
            StyleFamily::Medium => "Medium",
            StyleFamily::Dark => "Dark",
        };
        write!(f, "{}{}{}", Self::PREFIX, family, self.index)
    }
}

impl FromStr for TableStyleName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid table style: {}. Use e.g. TableStyleMedium2", s);

        let rest = s.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        let (family, digits) = if let Some(d) = rest.strip_prefix("Light") {
            (StyleFamily::Light, d)
        } else if let Some(d) = rest.strip_prefix("Medium") {
            (StyleFamily::Medium, d)
        } else if let Some(d) = rest.strip_prefix("Dark") {
            (StyleFamily::Dark, d)
        } else {
            return Err(invalid());
        };

        let index: u8 = digits.parse().map_err(|_| invalid())?;
        if index == 0 || index > Self::family_size(family) {
            return Err(invalid());
        }
        Ok(Self { family, index })
    }
}

impl Serialize for TableStyleName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TableStyleName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
