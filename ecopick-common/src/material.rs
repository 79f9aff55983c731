//! Material catalogue and pricing table
//!
//! Single source of truth for the price per kilogram of each material.
//! Used by both the waste submission and the price query endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of material categories the classifier is asked to choose from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialCategory {
    Plastic,
    Metal,
    Glass,
    PaperCardboard,
    OrganicWaste,
    ElectronicWaste,
    FabricCloth,
    Wood,
    Iron,
    Other,
}

impl MaterialCategory {
    /// All categories in prompt order
    pub const ALL: [MaterialCategory; 10] = [
        MaterialCategory::Plastic,
        MaterialCategory::Metal,
        MaterialCategory::Glass,
        MaterialCategory::PaperCardboard,
        MaterialCategory::OrganicWaste,
        MaterialCategory::ElectronicWaste,
        MaterialCategory::FabricCloth,
        MaterialCategory::Wood,
        MaterialCategory::Iron,
        MaterialCategory::Other,
    ];

    /// Canonical display label, also the pricing key
    pub fn label(&self) -> &'static str {
        match self {
            MaterialCategory::Plastic => "Plastic",
            MaterialCategory::Metal => "Metal",
            MaterialCategory::Glass => "Glass",
            MaterialCategory::PaperCardboard => "Paper / Cardboard",
            MaterialCategory::OrganicWaste => "Organic Waste",
            MaterialCategory::ElectronicWaste => "Electronic Waste",
            MaterialCategory::FabricCloth => "Fabric / Cloth",
            MaterialCategory::Wood => "Wood",
            MaterialCategory::Iron => "Iron",
            MaterialCategory::Other => "Other",
        }
    }

    /// Exact, case-sensitive match against the canonical labels
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Price per kilogram in rupees
    pub fn price_per_kg(&self) -> f64 {
        match self {
            MaterialCategory::Plastic => 10.0,
            MaterialCategory::Glass => 5.0,
            MaterialCategory::Metal => 45.0,
            MaterialCategory::PaperCardboard => 8.0,
            MaterialCategory::Wood => 3.0,
            MaterialCategory::Iron => 50.0,
            MaterialCategory::OrganicWaste
            | MaterialCategory::ElectronicWaste
            | MaterialCategory::FabricCloth
            | MaterialCategory::Other => 0.0,
        }
    }
}

impl fmt::Display for MaterialCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price per kilogram for a raw material label
///
/// Total over all inputs: anything that is not an exact catalogue label
/// (including the empty string and free-text classifier output) prices at 0.
pub fn price_for(material: &str) -> f64 {
    MaterialCategory::from_label(material)
        .map(|c| c.price_per_kg())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_table() {
        assert_eq!(price_for("Plastic"), 10.0);
        assert_eq!(price_for("Glass"), 5.0);
        assert_eq!(price_for("Metal"), 45.0);
        assert_eq!(price_for("Paper / Cardboard"), 8.0);
        assert_eq!(price_for("Wood"), 3.0);
        assert_eq!(price_for("Iron"), 50.0);
    }

    #[test]
    fn test_unknown_materials_price_zero() {
        assert_eq!(price_for(""), 0.0);
        assert_eq!(price_for("Unknown Material"), 0.0);
        assert_eq!(price_for("Organic Waste"), 0.0);
        assert_eq!(price_for("material: Metal\nconfidence: 90%"), 0.0);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(price_for("metal"), 0.0);
        assert_eq!(price_for("Paper/Cardboard"), 0.0);
    }

    #[test]
    fn test_labels_round_trip_through_lookup() {
        for category in MaterialCategory::ALL {
            assert_eq!(MaterialCategory::from_label(category.label()), Some(category));
            assert!(category.price_per_kg() >= 0.0);
        }
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(MaterialCategory::FabricCloth.to_string(), "Fabric / Cloth");
    }
}
