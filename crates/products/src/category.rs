use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalog_core::DomainError;

/// Product category.
///
/// The wire form is the upper-case variant name (`"FOOD"`); the web page shows
/// the [`Category::label`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }

    /// Human-readable name used as dropdown text.
    pub fn label(self) -> &'static str {
        match self {
            Category::Unknown => "Unknown",
            Category::Cloths => "Cloths",
            Category::Food => "Food",
            Category::Housewares => "Housewares",
            Category::Automotive => "Automotive",
            Category::Tools => "Tools",
        }
    }

    /// Case-insensitive lookup, used by list filters.
    pub fn parse_ignore_case(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact lookup by variant name; product documents must spell categories
/// the way they are serialized.
impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("Invalid attribute: {s}")))
    }
}
