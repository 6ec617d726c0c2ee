use rom_money::Money;
use rom_schemas::{NewProduct, ProductPatch};

pub const MAX_PRODUCT_NAME_LEN: usize = 50;

/// Product form input rejected before reaching the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NameRequired,
    NameTooLong { len: usize },
    InvalidPrice(String),
    NothingToUpdate,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NameRequired => write!(f, "product name is required"),
            ValidationError::NameTooLong { len } => write!(
                f,
                "product name is {len} characters; at most {MAX_PRODUCT_NAME_LEN} allowed"
            ),
            ValidationError::InvalidPrice(raw) => write!(
                f,
                "price must be a valid value greater than zero (got '{raw}')"
            ),
            ValidationError::NothingToUpdate => write!(f, "nothing to update"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed product name, 1..=50 characters.
pub fn validate_product_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    let len = name.chars().count();
    if len > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::NameTooLong { len });
    }
    Ok(name.to_string())
}

/// Keystroke filter for the price field: digits, `.` and `,` only.
pub fn sanitize_price_input(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Parse a price typed by staff. `"12,50"` and `"12.50"` both read as 12.50.
/// Zero, negative and unparsable values are rejected.
pub fn parse_price(raw: &str) -> Result<Money, ValidationError> {
    let invalid = || ValidationError::InvalidPrice(raw.to_string());
    let price = Money::parse_decimal(raw).map_err(|_| invalid())?;
    if !price.is_positive() {
        return Err(invalid());
    }
    Ok(price)
}

/// Validated body for product creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput(NewProduct);

impl ProductInput {
    pub fn new(name: &str, price_text: &str) -> Result<Self, ValidationError> {
        Ok(Self(NewProduct {
            name: validate_product_name(name)?,
            price: parse_price(price_text)?,
        }))
    }

    pub fn as_request(&self) -> &NewProduct {
        &self.0
    }

    pub fn into_request(self) -> NewProduct {
        self.0
    }
}

/// Validated body for a partial product update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEdit(ProductPatch);

impl ProductEdit {
    pub fn new(name: Option<&str>, price_text: Option<&str>) -> Result<Self, ValidationError> {
        let patch = ProductPatch {
            name: name.map(validate_product_name).transpose()?,
            price: price_text.map(parse_price).transpose()?,
        };
        if patch.is_empty() {
            return Err(ValidationError::NothingToUpdate);
        }
        Ok(Self(patch))
    }

    pub fn as_patch(&self) -> &ProductPatch {
        &self.0
    }
}
