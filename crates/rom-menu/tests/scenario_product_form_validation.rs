//! Scenario: product form validation happens before any store call.
//!
//! # Invariants under test
//! - `"12,50"` parses to 12.50; `"-5"` is rejected.
//! - Invalid input never reaches the store: the catalog is only called with
//!   an already-validated `ProductInput`.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rom_menu::{
    NewProduct, Product, ProductCatalog, ProductId, ProductInput, ProductPatch, ProductStore,
    ValidationError,
};
use rom_money::Money;

#[derive(Debug)]
struct Never;

impl std::fmt::Display for Never {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("never")
    }
}

impl std::error::Error for Never {}

#[derive(Default)]
struct CountingStore {
    creates: AtomicUsize,
}

#[async_trait]
impl ProductStore for CountingStore {
    type Error = Never;

    async fn list_products(&self) -> Result<Vec<Product>, Never> {
        Ok(vec![])
    }

    async fn create_product(&self, p: &NewProduct) -> Result<Product, Never> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(Product {
            id: ProductId::Text("p-1".into()),
            name: p.name.clone(),
            price: p.price,
            created_at: None,
            updated_at: None,
        })
    }

    async fn update_product(&self, _: &ProductId, _: &ProductPatch) -> Result<(), Never> {
        Ok(())
    }

    async fn delete_product(&self, _: &ProductId) -> Result<(), Never> {
        Ok(())
    }
}

#[tokio::test]
async fn comma_price_creates_product_at_twelve_fifty() {
    let mut catalog = ProductCatalog::new(CountingStore::default());
    let input = ProductInput::new(" Batata Frita ", "12,50").unwrap();
    let created = catalog.create(input.as_request()).await.unwrap();

    assert_eq!(created.name, "Batata Frita");
    assert_eq!(created.price, Money::from_cents(1_250));
}

#[tokio::test]
async fn negative_price_never_reaches_store() {
    let catalog = ProductCatalog::new(CountingStore::default());

    let err = ProductInput::new("Refrigerante", "-5").unwrap_err();
    assert_eq!(err, ValidationError::InvalidPrice("-5".to_string()));
    assert!(err.to_string().contains("greater than zero"));

    let err = ProductInput::new("", "8,00").unwrap_err();
    assert_eq!(err, ValidationError::NameRequired);

    // Validation failed, so nothing was sent.
    assert_eq!(catalog.store().creates.load(Ordering::SeqCst), 0);
    assert!(catalog.products().is_empty());
}
