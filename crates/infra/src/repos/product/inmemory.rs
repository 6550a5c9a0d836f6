use super::IProductRepo;
use crate::repos::shared::inmemory_repo::*;
use pantry_reminder_domain::{NewProduct, Product, UserId, ID};
use std::sync::atomic::{AtomicI64, Ordering};

pub struct InMemoryProductRepo {
    products: std::sync::Mutex<Vec<Product>>,
    last_id: AtomicI64,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self {
            products: std::sync::Mutex::new(vec![]),
            last_id: AtomicI64::new(0),
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for InMemoryProductRepo {
    async fn insert(&self, product: &NewProduct) -> anyhow::Result<Product> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id: ID::new(id),
            owner: product.owner,
            name: product.name.clone(),
            expiration: product.expiration,
            notify_day_before: product.notify_day_before,
            notify_week_before: product.notify_week_before,
            custom_time: None,
        };
        insert(&product, &self.products);
        Ok(product)
    }

    async fn attach_custom_time(
        &self,
        product_id: ID,
        owner: UserId,
        custom_time: i64,
    ) -> anyhow::Result<Option<Product>> {
        Ok(update_one(
            &self.products,
            |p| p.id == product_id && p.owner == owner && p.custom_time.is_none(),
            |p| p.custom_time = Some(custom_time),
        ))
    }

    async fn find_by_owner(&self, owner: UserId) -> anyhow::Result<Vec<Product>> {
        let mut products = find_by(&self.products, |p| p.owner == owner);
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Product>> {
        let mut products = find_by(&self.products, |_| true);
        products.sort_by_key(|p| p.id);
        Ok(products)
    }
}
