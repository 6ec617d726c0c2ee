use async_trait::async_trait;
use chrono::Utc;
use rom_schemas::{NewProduct, Product, ProductId, ProductPatch};
use tracing::{debug, info};

/// Remote product store (the backend's `/api/products` endpoints).
#[async_trait]
pub trait ProductStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn list_products(&self) -> Result<Vec<Product>, Self::Error>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product, Self::Error>;

    async fn update_product(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
    ) -> Result<(), Self::Error>;

    async fn delete_product(&self, id: &ProductId) -> Result<(), Self::Error>;
}

/// Cached product list. The cache changes only after the store confirms.
pub struct ProductCatalog<S> {
    store: S,
    products: Vec<Product>,
}

impl<S: ProductStore> ProductCatalog<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            products: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive exact name match.
    pub fn find_by_name(&self, name: &str) -> Option<&Product> {
        let wanted = name.trim().to_lowercase();
        self.products
            .iter()
            .find(|p| p.name.trim().to_lowercase() == wanted)
    }

    pub fn seed(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub async fn refresh(&mut self) -> Result<usize, S::Error> {
        self.products = self.store.list_products().await?;
        debug!(count = self.products.len(), "product cache refreshed");
        Ok(self.products.len())
    }

    pub async fn create(&mut self, product: &NewProduct) -> Result<&Product, S::Error> {
        let created = self.store.create_product(product).await?;
        info!(id = %created.id, name = %created.name, "product created");
        self.products.push(created);
        let last = self.products.len() - 1;
        Ok(&self.products[last])
    }

    /// Apply `patch` remotely, then merge it into the cached entry.
    pub async fn update(&mut self, id: &ProductId, patch: &ProductPatch) -> Result<(), S::Error> {
        self.store.update_product(id, patch).await?;
        if let Some(p) = self.products.iter_mut().find(|p| &p.id == id) {
            if let Some(name) = &patch.name {
                p.name = name.clone();
            }
            if let Some(price) = patch.price {
                p.price = price;
            }
            p.updated_at = Some(Utc::now());
        }
        info!(%id, "product updated");
        Ok(())
    }

    pub async fn delete(&mut self, id: &ProductId) -> Result<(), S::Error> {
        self.store.delete_product(id).await?;
        self.products.retain(|p| &p.id != id);
        info!(%id, "product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rom_money::Money;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Rejected;

    impl std::fmt::Display for Rejected {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("rejected")
        }
    }

    impl std::error::Error for Rejected {}

    #[derive(Default)]
    struct FakeStore {
        next_id: Mutex<i64>,
        reject: bool,
    }

    #[async_trait]
    impl ProductStore for FakeStore {
        type Error = Rejected;

        async fn list_products(&self) -> Result<Vec<Product>, Rejected> {
            Ok(vec![product(1, "Pizza Margherita", 3_500)])
        }

        async fn create_product(&self, p: &NewProduct) -> Result<Product, Rejected> {
            if self.reject {
                return Err(Rejected);
            }
            let mut id = self.next_id.lock().unwrap();
            *id += 10;
            Ok(Product {
                id: ProductId::Num(*id),
                name: p.name.clone(),
                price: p.price,
                created_at: None,
                updated_at: None,
            })
        }

        async fn update_product(&self, _: &ProductId, _: &ProductPatch) -> Result<(), Rejected> {
            if self.reject {
                return Err(Rejected);
            }
            Ok(())
        }

        async fn delete_product(&self, _: &ProductId) -> Result<(), Rejected> {
            if self.reject {
                return Err(Rejected);
            }
            Ok(())
        }
    }

    fn product(id: i64, name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::Num(id),
            name: name.to_string(),
            price: Money::from_cents(cents),
            created_at: None,
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn create_appends_returned_product() {
        let mut cat = ProductCatalog::new(FakeStore::default());
        cat.refresh().await.unwrap();
        let created = cat
            .create(&NewProduct {
                name: "Batata Frita".into(),
                price: Money::from_cents(1_250),
            })
            .await
            .unwrap();
        assert_eq!(created.id, ProductId::Num(10));
        assert_eq!(cat.products().len(), 2);
    }

    #[tokio::test]
    async fn update_merges_patch_into_cache() {
        let mut cat = ProductCatalog::new(FakeStore::default());
        cat.refresh().await.unwrap();
        let id = ProductId::Num(1);
        let patch = ProductPatch {
            name: None,
            price: Some(Money::from_cents(3_900)),
        };
        cat.update(&id, &patch).await.unwrap();
        let p = cat.get(&id).unwrap();
        assert_eq!(p.name, "Pizza Margherita");
        assert_eq!(p.price, Money::from_cents(3_900));
        assert!(p.updated_at.is_some());
    }

    #[tokio::test]
    async fn rejected_mutations_leave_cache_alone() {
        let mut cat = ProductCatalog::new(FakeStore {
            reject: true,
            ..Default::default()
        });
        cat.refresh().await.unwrap();
        let before = cat.products().to_vec();

        let id = ProductId::Num(1);
        assert!(cat.delete(&id).await.is_err());
        assert!(cat
            .update(
                &id,
                &ProductPatch {
                    name: Some("Pizza".into()),
                    price: None
                }
            )
            .await
            .is_err());
        assert_eq!(cat.products(), before.as_slice());
    }

    #[tokio::test]
    async fn delete_removes_from_cache() {
        let mut cat = ProductCatalog::new(FakeStore::default());
        cat.refresh().await.unwrap();
        cat.delete(&ProductId::Num(1)).await.unwrap();
        assert!(cat.products().is_empty());
    }

    #[test]
    fn find_by_name_ignores_case() {
        let mut cat = ProductCatalog::new(FakeStore::default());
        cat.seed(vec![product(1, "Pizza Margherita", 3_500)]);
        assert!(cat.find_by_name("pizza margherita").is_some());
        assert!(cat.find_by_name("pizza").is_none());
    }
}
