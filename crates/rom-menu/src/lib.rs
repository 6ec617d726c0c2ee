//! rom-menu
//!
//! Menu (product) management: input validation that runs before any network
//! call, and the cached product catalog.

mod catalog;
mod input;

pub use catalog::{ProductCatalog, ProductStore};
pub use input::{
    parse_price, sanitize_price_input, validate_product_name, ProductEdit, ProductInput,
    ValidationError, MAX_PRODUCT_NAME_LEN,
};

pub use rom_schemas::{NewProduct, Product, ProductId, ProductPatch};
