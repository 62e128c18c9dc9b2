//! Form state for the "new product" modal.
//!
//! `ProductDraft` holds the raw field values while the modal is open and
//! turns them into a [`CreateProduct`] request on submit. Selected sizes and
//! stock quantities are tracked separately: the stock map always covers the
//! full size-label space, while the selection decides which entries are
//! shown and emitted.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::str::FromStr;

use jiff::Timestamp;
use payloads::{ProductSize, ProductType, requests::CreateProduct};
use rust_decimal::Decimal;
use yew::{Callback, Reducible};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all required fields: the product name is missing.")]
    MissingName,
    #[error("Please fill in all required fields: the price is missing.")]
    MissingPrice,
    #[error("Please enter a valid price.")]
    InvalidPrice,
    #[error("Please enter a valid price greater than 0.")]
    NonPositivePrice,
    #[error("The price is outside the supported range.")]
    PriceOutOfRange,
    #[error(
        "Please fill in all required fields: add a photo or upload an image."
    )]
    MissingImage,
}

impl ValidationError {
    /// The form field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingName => "name",
            Self::MissingPrice
            | Self::InvalidPrice
            | Self::NonPositivePrice
            | Self::PriceOutOfRange => "price",
            Self::MissingImage => "image",
        }
    }
}

/// Parse a stock quantity as typed by the user.
///
/// Anything that is not an integer, or is negative, becomes 0. Values past
/// `u32::MAX` saturate.
pub fn parse_stock(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(qty) if qty > 0 => u32::try_from(qty).unwrap_or(u32::MAX),
        _ => 0,
    }
}

/// Parse a price, accepting plain decimals and scientific notation.
///
/// `Decimal` holds magnitudes up to about 7.9e28 with at most 28 fractional
/// digits. Numbers it cannot represent are `PriceOutOfRange`, or
/// `NonPositivePrice` when they are not above zero.
pub fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingPrice);
    }

    let price = match Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
    {
        Ok(price) => price,
        Err(_) => {
            return Err(match raw.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => {
                    ValidationError::PriceOutOfRange
                }
                Ok(value) if value.is_finite() => {
                    ValidationError::NonPositivePrice
                }
                _ => ValidationError::InvalidPrice,
            });
        }
    };

    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice);
    }
    Ok(price)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    name: String,
    price: String,
    /// Data URI of the chosen image, empty when none.
    image: String,
    product_type: ProductType,
    selected_sizes: Vec<ProductSize>,
    stock: BTreeMap<ProductSize, u32>,
    /// Why the last submit was refused. Editing a validated field clears it.
    rejection: Option<ValidationError>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            image: String::new(),
            product_type: ProductType::default(),
            selected_sizes: Vec::new(),
            stock: ProductSize::all().map(|size| (size, 0)).collect(),
            rejection: None,
        }
    }
}

impl ProductDraft {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn product_type(&self) -> ProductType {
        self.product_type
    }

    /// Selected sizes in the order they were toggled on.
    pub fn selected_sizes(&self) -> &[ProductSize] {
        &self.selected_sizes
    }

    pub fn is_selected(&self, size: ProductSize) -> bool {
        self.selected_sizes.contains(&size)
    }

    pub fn stock(&self, size: ProductSize) -> u32 {
        self.stock.get(&size).copied().unwrap_or(0)
    }

    pub fn rejection(&self) -> Option<ValidationError> {
        self.rejection
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    /// Changing the type always drops the current size selection. Stock
    /// values are kept and reappear if a size is selected again.
    pub fn set_type(&mut self, product_type: ProductType) {
        self.product_type = product_type;
        self.selected_sizes.clear();
    }

    /// Toggle a size in or out of the selection. Re-selected sizes move to
    /// the end. Sizes outside the current type's catalog are ignored.
    pub fn toggle_size(&mut self, size: ProductSize) {
        if !size.fits(self.product_type) {
            tracing::warn!(
                "Ignoring size {} for product type {}",
                size,
                self.product_type
            );
            return;
        }

        if let Some(pos) = self.selected_sizes.iter().position(|s| *s == size)
        {
            self.selected_sizes.remove(pos);
        } else {
            self.selected_sizes.push(size);
        }
    }

    pub fn set_stock(&mut self, size: ProductSize, raw: &str) {
        self.stock.insert(size, parse_stock(raw));
    }

    pub fn set_image(&mut self, image: impl Into<String>) {
        self.image = image.into();
    }

    pub fn clear_image(&mut self) {
        self.image.clear();
    }

    pub fn apply(&mut self, action: DraftAction) {
        match action {
            DraftAction::SetName(name) => {
                self.rejection = None;
                self.set_name(name);
            }
            DraftAction::SetPrice(price) => {
                self.rejection = None;
                self.set_price(price);
            }
            DraftAction::SetType(product_type) => {
                self.rejection = None;
                self.set_type(product_type);
            }
            DraftAction::ToggleSize(size) => self.toggle_size(size),
            DraftAction::SetStock(size, raw) => self.set_stock(size, &raw),
            DraftAction::SetImage(image) => {
                self.rejection = None;
                self.set_image(image);
            }
            DraftAction::ClearImage => self.clear_image(),
            DraftAction::Reject(err) => self.rejection = Some(err),
        }
    }

    /// Validate the draft and build the creation request.
    ///
    /// Checks run in order: name, price, image. The first failure is
    /// returned and no request is built.
    pub fn validate_and_build(
        &self,
        created_at: Timestamp,
    ) -> Result<CreateProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let price = parse_price(&self.price)?;

        if self.image.is_empty() {
            return Err(ValidationError::MissingImage);
        }

        let sizes = ProductSize::all()
            .map(|size| {
                let qty = if self.is_selected(size) {
                    self.stock(size)
                } else {
                    0
                };
                (size, qty)
            })
            .collect();

        Ok(CreateProduct {
            name: name.to_string(),
            price,
            image: self.image.clone(),
            product_type: self.product_type,
            sizes,
            created_at,
        })
    }

    /// Submit the draft: on success `on_create` gets the request and then
    /// `on_close` fires. On failure neither callback is called and the draft
    /// is left untouched.
    pub fn submit(
        &self,
        now: Timestamp,
        on_create: &Callback<CreateProduct>,
        on_close: &Callback<()>,
    ) -> Result<(), ValidationError> {
        let product = self.validate_and_build(now).inspect_err(|err| {
            tracing::debug!("Product form rejected: invalid {}", err.field());
        })?;

        tracing::info!(
            "Creating {} product {:?} with {} units in stock",
            product.product_type,
            product.name,
            product.total_stock()
        );
        on_create.emit(product);
        on_close.emit(());
        Ok(())
    }
}

pub enum DraftAction {
    SetName(String),
    SetPrice(String),
    SetType(ProductType),
    ToggleSize(ProductSize),
    SetStock(ProductSize, String),
    SetImage(String),
    ClearImage,
    /// Record a refused submit so the form can show it.
    Reject(ValidationError),
}

impl Reducible for ProductDraft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut draft = (*self).clone();
        draft.apply(action);
        Rc::new(draft)
    }
}
