//! Rendering of the catalog's `{type, value, unit}` dimension entries

use semantyfish_api::Dimension;

pub const MAX_LENGTH: &str = "max length";
pub const MOST_SHALLOW: &str = "most shallow waters";
pub const MOST_DEEP: &str = "most deep waters";
pub const COMMON_SHALLOW: &str = "common shallow waters";
pub const COMMON_DEEP: &str = "common deep waters";
pub const MAX_WEIGHT: &str = "max weight";
pub const LONGEVITY_WILD: &str = "longevity wild";

/// Rendered when a dimension is missing or zero
pub const NOT_AVAILABLE: &str = "N/A";

/// Render the first dimension of `kind` as `"<value> <unit>"`.
///
/// Weights above 1000 in `kilograms` are scaled down and rendered with one
/// decimal, e.g. `1500 kilograms` -> `"1.5 kg"`.
pub fn dimension_value(dimensions: &[Dimension], kind: &str) -> String {
    let Some(dim) = dimensions.iter().find(|d| d.kind.as_deref() == Some(kind)) else {
        return NOT_AVAILABLE.to_string();
    };

    let value = match dim.value {
        Some(v) if v != 0.0 && !v.is_nan() => v,
        _ => return NOT_AVAILABLE.to_string(),
    };
    let unit = dim.unit.as_deref().unwrap_or("");

    if kind == MAX_WEIGHT && value > 1000.0 && unit == "kilograms" {
        return format!("{:.1} kg", value / 1000.0);
    }
    format!("{} {}", value, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dim(kind: &str, value: f64, unit: &str) -> Dimension {
        Dimension {
            kind: Some(kind.to_string()),
            value: Some(value),
            unit: Some(unit.to_string()),
        }
    }

    #[test]
    fn test_heavy_weight_is_scaled() {
        let dims = vec![dim(MAX_WEIGHT, 1500.0, "kilograms")];
        assert_eq!(dimension_value(&dims, MAX_WEIGHT), "1.5 kg");

        let dims = vec![dim(MAX_WEIGHT, 200000.0, "kilograms")];
        assert_eq!(dimension_value(&dims, MAX_WEIGHT), "200.0 kg");
    }

    #[test]
    fn test_plain_value_and_unit() {
        let dims = vec![dim(MAX_LENGTH, 239.0, "cm"), dim(MOST_DEEP, 1602.0, "meters")];
        assert_eq!(dimension_value(&dims, MAX_LENGTH), "239 cm");
        assert_eq!(dimension_value(&dims, MOST_DEEP), "1602 meters");
    }

    #[test]
    fn test_light_weight_and_other_units_are_verbatim() {
        let dims = vec![dim(MAX_WEIGHT, 999.5, "kilograms")];
        assert_eq!(dimension_value(&dims, MAX_WEIGHT), "999.5 kilograms");

        let dims = vec![dim(MAX_WEIGHT, 1500.0, "grams")];
        assert_eq!(dimension_value(&dims, MAX_WEIGHT), "1500 grams");
    }

    #[test]
    fn test_missing_kind_is_not_available() {
        let dims = vec![dim(MAX_LENGTH, 239.0, "cm")];
        assert_eq!(dimension_value(&dims, LONGEVITY_WILD), "N/A");
        assert_eq!(dimension_value(&[], MAX_LENGTH), "N/A");
    }

    #[test]
    fn test_zero_or_missing_value_is_not_available() {
        let dims = vec![dim(MAX_LENGTH, 0.0, "cm")];
        assert_eq!(dimension_value(&dims, MAX_LENGTH), "N/A");

        let dims = vec![Dimension {
            kind: Some(MAX_LENGTH.to_string()),
            value: None,
            unit: Some("cm".to_string()),
        }];
        assert_eq!(dimension_value(&dims, MAX_LENGTH), "N/A");
    }

    #[test]
    fn test_first_matching_entry_wins() {
        let dims = vec![dim(LONGEVITY_WILD, 9.0, "years"), dim(LONGEVITY_WILD, 12.0, "years")];
        assert_eq!(dimension_value(&dims, LONGEVITY_WILD), "9 years");
    }
}
