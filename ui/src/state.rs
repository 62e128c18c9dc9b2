use payloads::{ProductId, requests::CreateProduct};
use yewdux::prelude::*;

#[derive(Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub product: CreateProduct,
}

/// In-memory product catalog. Products only arrive through the creation
/// modal and are not persisted.
#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // Newest first
    pub products: Vec<CatalogEntry>,
}

impl State {
    pub fn add_product(&mut self, product: CreateProduct) -> ProductId {
        let id = ProductId::new();
        self.products.insert(0, CatalogEntry { id, product });
        id
    }

    pub fn total_units(&self) -> u64 {
        self.products
            .iter()
            .map(|entry| entry.product.total_stock())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use payloads::{ProductSize, ProductType};
    use rust_decimal::dec;

    fn product(name: &str, qty: u32) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: dec!(10),
            image: "data:image/png;base64,AA==".to_string(),
            product_type: ProductType::Shoes,
            sizes: ProductSize::all()
                .map(|size| {
                    (size, if size == ProductSize::Eu41 { qty } else { 0 })
                })
                .collect(),
            created_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_add_product_newest_first() {
        let mut state = State::default();
        let first = state.add_product(product("Loafers", 2));
        let second = state.add_product(product("Sneakers", 3));

        assert_ne!(first, second);
        assert_eq!(state.products[0].id, second);
        assert_eq!(state.products[1].product.name, "Loafers");
        assert_eq!(state.total_units(), 5);
    }
}
