use serde::{Deserialize, Serialize};

/// The three DONKI notification types plotted on the globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "GST")]
    GeomagneticStorm,
    #[serde(rename = "FLR")]
    SolarFlare,
    #[serde(rename = "CME")]
    CoronalMassEjection,
}

impl EventCategory {
    /// Fetch and display order.
    pub const ALL: [Self; 3] = [
        Self::GeomagneticStorm,
        Self::SolarFlare,
        Self::CoronalMassEjection,
    ];

    /// Three-letter DONKI endpoint code.
    pub const fn code(self) -> &'static str {
        match self {
            Self::GeomagneticStorm => "GST",
            Self::SolarFlare => "FLR",
            Self::CoronalMassEjection => "CME",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::GeomagneticStorm),
            1 => Some(Self::SolarFlare),
            2 => Some(Self::CoronalMassEjection),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "GST" => Some(Self::GeomagneticStorm),
            "FLR" => Some(Self::SolarFlare),
            "CME" => Some(Self::CoronalMassEjection),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GeomagneticStorm => "Geomagnetic Storms",
            Self::SolarFlare => "Solar Flares",
            Self::CoronalMassEjection => "Coronal Mass Ejections",
        }
    }

    pub const fn marker_color(self) -> MarkerColor {
        match self {
            Self::GeomagneticStorm => MarkerColor::Red,
            Self::SolarFlare => MarkerColor::Yellow,
            Self::CoronalMassEjection => MarkerColor::Blue,
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Colour key attached to a globe layer; the UI maps it to a terminal colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Yellow,
    Blue,
}

impl MarkerColor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        }
    }
}

/// Response format appended to a dataset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub const ALL: [Self; 2] = [Self::Csv, Self::Json];

    /// Suffix including the leading dot, e.g. `.csv`.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Json => ".json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Csv => Self::Json,
            Self::Json => Self::Csv,
        }
    }
}

/// Server-side transform appended to a dataset query as `name(value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "rename")]
    Rename,
    #[serde(rename = "formatTime")]
    FormatTime,
    #[serde(rename = "max")]
    Max,
    #[serde(rename = "min")]
    Min,
    #[serde(rename = "limit")]
    Limit,
}

impl Operation {
    /// Order in which the operations are offered to the user.
    pub const ALL: [Self; 5] = [
        Self::Rename,
        Self::FormatTime,
        Self::Max,
        Self::Min,
        Self::Limit,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::FormatTime => "formatTime",
            Self::Max => "max",
            Self::Min => "min",
            Self::Limit => "limit",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Rename),
            1 => Some(Self::FormatTime),
            2 => Some(Self::Max),
            3 => Some(Self::Min),
            4 => Some(Self::Limit),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "rename" => Some(Self::Rename),
            "formatTime" | "formattime" | "format_time" => Some(Self::FormatTime),
            "max" => Some(Self::Max),
            "min" => Some(Self::Min),
            "limit" => Some(Self::Limit),
            _ => None,
        }
    }

    /// Hint shown next to the value input.
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Rename => "old_name,new_name",
            Self::FormatTime => "time format, e.g. yyyy-MM-dd",
            Self::Max | Self::Min => "variable name",
            Self::Limit => "uses the Limit field",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip_through_parse() {
        for category in EventCategory::ALL {
            assert_eq!(EventCategory::parse(category.code()), Some(category));
        }
        assert_eq!(EventCategory::parse("ips"), None);
    }

    #[test]
    fn category_colours_follow_display_order() {
        let colours: Vec<_> = EventCategory::ALL
            .iter()
            .map(|c| c.marker_color())
            .collect();
        assert_eq!(
            colours,
            vec![MarkerColor::Red, MarkerColor::Yellow, MarkerColor::Blue]
        );
    }

    #[test]
    fn format_parse_accepts_leading_dot() {
        assert_eq!(OutputFormat::parse(".json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(OutputFormat::Csv.toggled(), OutputFormat::Json);
    }

    #[test]
    fn operation_names_match_query_syntax() {
        assert_eq!(Operation::FormatTime.as_str(), "formatTime");
        assert_eq!(Operation::parse("formatTime"), Some(Operation::FormatTime));
        assert_eq!(Operation::from_index(4), Some(Operation::Limit));
        assert_eq!(Operation::from_index(5), None);
    }
}
