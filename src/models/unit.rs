//! Units of measure
//!
//! The fixed set of units an ingredient can be priced in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Weight,
    Volume,
    Count,
}

/// Unit an ingredient's cost is quoted per
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Lb,
    Oz,
    Kg,
    G,
    Each,
    Cup,
    Tbsp,
    Tsp,
    Ml,
    L,
    Gal,
}

impl Unit {
    /// Every unit, in the order the ingredient form offers them
    pub const ALL: [Unit; 11] = [
        Unit::Lb,
        Unit::Oz,
        Unit::Kg,
        Unit::G,
        Unit::Each,
        Unit::Cup,
        Unit::Tbsp,
        Unit::Tsp,
        Unit::Ml,
        Unit::L,
        Unit::Gal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Lb => "lb",
            Unit::Oz => "oz",
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::Each => "each",
            Unit::Cup => "cup",
            Unit::Tbsp => "tbsp",
            Unit::Tsp => "tsp",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Gal => "gal",
        }
    }

    /// Parse a unit token, accepting common spellings
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();

        match lower.as_str() {
            "lb" | "lbs" | "pound" | "pounds" => Some(Unit::Lb),
            "oz" | "ounce" | "ounces" => Some(Unit::Oz),
            "kg" | "kilogram" | "kilograms" => Some(Unit::Kg),
            "g" | "gram" | "grams" => Some(Unit::G),
            "each" | "ea" | "count" => Some(Unit::Each),
            "cup" | "cups" => Some(Unit::Cup),
            "tbsp" | "tablespoon" | "tablespoons" => Some(Unit::Tbsp),
            "tsp" | "teaspoon" | "teaspoons" => Some(Unit::Tsp),
            "ml" | "milliliter" | "milliliters" => Some(Unit::Ml),
            "l" | "liter" | "liters" | "litre" | "litres" => Some(Unit::L),
            "gal" | "gallon" | "gallons" => Some(Unit::Gal),
            _ => None,
        }
    }

    pub fn category(&self) -> UnitCategory {
        match self {
            Unit::Lb | Unit::Oz | Unit::Kg | Unit::G => UnitCategory::Weight,
            Unit::Cup | Unit::Tbsp | Unit::Tsp | Unit::Ml | Unit::L | Unit::Gal => {
                UnitCategory::Volume
            }
            Unit::Each => UnitCategory::Count,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_tokens() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Unit::parse("Pounds"), Some(Unit::Lb));
        assert_eq!(Unit::parse(" tablespoon "), Some(Unit::Tbsp));
        assert_eq!(Unit::parse("litre"), Some(Unit::L));
        assert_eq!(Unit::parse("scoop"), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(Unit::Oz.category(), UnitCategory::Weight);
        assert_eq!(Unit::Gal.category(), UnitCategory::Volume);
        assert_eq!(Unit::Each.category(), UnitCategory::Count);
    }

    #[test]
    fn test_serde_uses_lowercase_tokens() {
        assert_eq!(serde_json::to_string(&Unit::Tbsp).unwrap(), "\"tbsp\"");
        let unit: Unit = serde_json::from_str("\"gal\"").unwrap();
        assert_eq!(unit, Unit::Gal);
    }

    #[test]
    fn test_default_is_pound() {
        assert_eq!(Unit::default(), Unit::Lb);
    }
}
