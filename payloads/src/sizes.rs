//! Product types and their fixed size catalogs.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProductType {
    #[default]
    Clothing,
    Shoes,
}

impl ProductType {
    /// The ordered catalog of sizes valid for this product type.
    pub fn sizes(self) -> &'static [ProductSize] {
        match self {
            Self::Clothing => &CLOTHING_SIZES,
            Self::Shoes => &SHOE_SIZES,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Clothing => "Clothing",
            Self::Shoes => "Shoes",
        }
    }
}

/// Every size label across both catalogs.
///
/// Declaration order is catalog order (clothing first, then shoes), which
/// is also the `Ord` used for size maps.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum ProductSize {
    S,
    M,
    L,
    XL,
    XXL,
    XXXL,
    #[serde(rename = "4XL")]
    #[strum(serialize = "4XL")]
    XL4,
    #[serde(rename = "5XL")]
    #[strum(serialize = "5XL")]
    XL5,
    #[serde(rename = "6XL")]
    #[strum(serialize = "6XL")]
    XL6,
    #[serde(rename = "36")]
    #[strum(serialize = "36")]
    Eu36,
    #[serde(rename = "37")]
    #[strum(serialize = "37")]
    Eu37,
    #[serde(rename = "38")]
    #[strum(serialize = "38")]
    Eu38,
    #[serde(rename = "39")]
    #[strum(serialize = "39")]
    Eu39,
    #[serde(rename = "40")]
    #[strum(serialize = "40")]
    Eu40,
    #[serde(rename = "41")]
    #[strum(serialize = "41")]
    Eu41,
    #[serde(rename = "42")]
    #[strum(serialize = "42")]
    Eu42,
    #[serde(rename = "43")]
    #[strum(serialize = "43")]
    Eu43,
    #[serde(rename = "44")]
    #[strum(serialize = "44")]
    Eu44,
    #[serde(rename = "45")]
    #[strum(serialize = "45")]
    Eu45,
}

pub const CLOTHING_SIZES: [ProductSize; 9] = [
    ProductSize::S,
    ProductSize::M,
    ProductSize::L,
    ProductSize::XL,
    ProductSize::XXL,
    ProductSize::XXXL,
    ProductSize::XL4,
    ProductSize::XL5,
    ProductSize::XL6,
];

pub const SHOE_SIZES: [ProductSize; 10] = [
    ProductSize::Eu36,
    ProductSize::Eu37,
    ProductSize::Eu38,
    ProductSize::Eu39,
    ProductSize::Eu40,
    ProductSize::Eu41,
    ProductSize::Eu42,
    ProductSize::Eu43,
    ProductSize::Eu44,
    ProductSize::Eu45,
];

impl ProductSize {
    /// The product type whose catalog contains this size.
    pub fn product_type(self) -> ProductType {
        if SHOE_SIZES.contains(&self) {
            ProductType::Shoes
        } else {
            ProductType::Clothing
        }
    }

    pub fn fits(self, product_type: ProductType) -> bool {
        self.product_type() == product_type
    }

    /// The full size-label space, in catalog order.
    pub fn all() -> impl Iterator<Item = ProductSize> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_catalogs_partition_label_space() {
        let all: Vec<_> = ProductSize::all().collect();
        assert_eq!(all.len(), CLOTHING_SIZES.len() + SHOE_SIZES.len());

        let chained: Vec<_> =
            CLOTHING_SIZES.iter().chain(SHOE_SIZES.iter()).copied().collect();
        assert_eq!(all, chained);

        for size in CLOTHING_SIZES {
            assert_eq!(size.product_type(), ProductType::Clothing);
        }
        for size in SHOE_SIZES {
            assert_eq!(size.product_type(), ProductType::Shoes);
        }
    }

    #[test]
    fn test_size_labels() {
        assert_eq!(ProductSize::XXXL.to_string(), "XXXL");
        assert_eq!(ProductSize::XL4.to_string(), "4XL");
        assert_eq!(ProductSize::Eu36.to_string(), "36");
        assert_eq!(ProductSize::from_str("6XL"), Ok(ProductSize::XL6));
        assert_eq!(ProductSize::from_str("45"), Ok(ProductSize::Eu45));
        assert!(ProductSize::from_str("46").is_err());
    }

    #[test]
    fn test_product_type_values() {
        assert_eq!(ProductType::Clothing.to_string(), "clothing");
        assert_eq!(ProductType::from_str("shoes"), Ok(ProductType::Shoes));
        assert_eq!(ProductType::Shoes.sizes(), &SHOE_SIZES[..]);
        assert!(ProductSize::M.fits(ProductType::Clothing));
        assert!(!ProductSize::M.fits(ProductType::Shoes));
    }
}
