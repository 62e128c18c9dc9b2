use std::collections::BTreeMap;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ProductSize, ProductType};

/// A validated request to add a product to the catalog.
///
/// `sizes` always carries the full size-label space; sizes that were not
/// stocked map to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: Decimal,
    /// Image payload as a data URI.
    pub image: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub sizes: BTreeMap<ProductSize, u32>,
    pub created_at: Timestamp,
}

impl CreateProduct {
    pub fn total_stock(&self) -> u64 {
        self.sizes.values().map(|&qty| u64::from(qty)).sum()
    }

    /// Sizes with a non-zero quantity, in catalog order.
    pub fn stocked_sizes(&self) -> impl Iterator<Item = (ProductSize, u32)> {
        self.sizes
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(size, qty)| (*size, *qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    fn sample() -> CreateProduct {
        let mut sizes: BTreeMap<ProductSize, u32> =
            ProductSize::all().map(|size| (size, 0)).collect();
        sizes.insert(ProductSize::M, 5);
        sizes.insert(ProductSize::L, 3);

        CreateProduct {
            name: "Red Hoodie".to_string(),
            price: dec!(249.90),
            image: "data:image/png;base64,AAAA".to_string(),
            product_type: ProductType::Clothing,
            sizes,
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_stock_helpers() {
        let product = sample();
        assert_eq!(product.total_stock(), 8);
        let stocked: Vec<_> = product.stocked_sizes().collect();
        assert_eq!(stocked, vec![(ProductSize::M, 5), (ProductSize::L, 3)]);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["type"], "clothing");
        assert_eq!(value["name"], "Red Hoodie");

        let sizes = value["sizes"].as_object().unwrap();
        assert_eq!(sizes.len(), ProductSize::all().count());
        assert_eq!(sizes["M"], 5);
        assert_eq!(sizes["4XL"], 0);
        assert_eq!(sizes["36"], 0);
    }
}
