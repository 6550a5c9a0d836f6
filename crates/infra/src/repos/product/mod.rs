mod inmemory;
mod sqlite;

pub use inmemory::InMemoryProductRepo;
use pantry_reminder_domain::{NewProduct, Product, UserId, ID};
pub use sqlite::SqliteProductRepo;

#[async_trait::async_trait]
pub trait IProductRepo: Send + Sync {
    /// Atomically stores the `Product` and returns it with its assigned id
    async fn insert(&self, product: &NewProduct) -> anyhow::Result<Product>;
    /// Sets the custom reminder time of a `Product` owned by `owner`. A custom
    /// time is set at most once, returns `None` when `owner` has no such
    /// `Product` or it already has one.
    async fn attach_custom_time(
        &self,
        product_id: ID,
        owner: UserId,
        custom_time: i64,
    ) -> anyhow::Result<Option<Product>>;
    /// All products of `owner` in creation order
    async fn find_by_owner(&self, owner: UserId) -> anyhow::Result<Vec<Product>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Product>>;
}

#[cfg(test)]
mod tests {
    use crate::repos::create_test_repos;
    use pantry_reminder_domain::{NewProduct, UserId, ID};

    fn new_product(owner: i64, name: &str) -> NewProduct {
        NewProduct {
            owner: UserId::new(owner),
            name: name.into(),
            expiration: 1_748_757_600_000,
            notify_day_before: true,
            notify_week_before: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        for repos in create_test_repos().await {
            let milk = repos
                .products
                .insert(&new_product(1, "Milk"))
                .await
                .expect("To insert product");
            let eggs = repos
                .products
                .insert(&new_product(1, "Eggs"))
                .await
                .expect("To insert product");

            assert!(eggs.id > milk.id);
            assert_eq!(milk.name, "Milk");
            assert_eq!(milk.owner, UserId::new(1));
            assert!(milk.notify_day_before);
            assert!(!milk.notify_week_before);
            assert_eq!(milk.custom_time, None);
        }
    }

    #[tokio::test]
    async fn find_by_owner_returns_products_in_creation_order() {
        for repos in create_test_repos().await {
            for (owner, name) in vec![(1, "Milk"), (2, "Bread"), (1, "Eggs"), (1, "Cheese")] {
                repos
                    .products
                    .insert(&new_product(owner, name))
                    .await
                    .unwrap();
            }

            let names = repos
                .products
                .find_by_owner(UserId::new(1))
                .await
                .unwrap()
                .into_iter()
                .map(|p| p.name)
                .collect::<Vec<_>>();
            assert_eq!(names, vec!["Milk", "Eggs", "Cheese"]);
            assert_eq!(repos.products.find_all().await.unwrap().len(), 4);
            assert!(repos
                .products
                .find_by_owner(UserId::new(3))
                .await
                .unwrap()
                .is_empty());
        }
    }

    #[tokio::test]
    async fn attaches_custom_time_to_the_given_product_only() {
        for repos in create_test_repos().await {
            let milk = repos.products.insert(&new_product(1, "Milk")).await.unwrap();
            let eggs = repos.products.insert(&new_product(1, "Eggs")).await.unwrap();

            let updated = repos
                .products
                .attach_custom_time(milk.id, milk.owner, 42)
                .await
                .unwrap()
                .expect("To find product");
            assert_eq!(updated.id, milk.id);
            assert_eq!(updated.custom_time, Some(42));

            let products = repos.products.find_by_owner(UserId::new(1)).await.unwrap();
            assert_eq!(products[0].custom_time, Some(42));
            assert_eq!(products[1].id, eggs.id);
            assert_eq!(products[1].custom_time, None);
        }
    }

    #[tokio::test]
    async fn attach_custom_time_requires_owner() {
        for repos in create_test_repos().await {
            let milk = repos.products.insert(&new_product(1, "Milk")).await.unwrap();

            let res = repos
                .products
                .attach_custom_time(milk.id, UserId::new(2), 42)
                .await
                .unwrap();
            assert!(res.is_none());

            let res = repos
                .products
                .attach_custom_time(ID::new(9999), milk.owner, 42)
                .await
                .unwrap();
            assert!(res.is_none());

            let stored = repos.products.find_all().await.unwrap();
            assert_eq!(stored[0].custom_time, None);
        }
    }
    #[tokio::test]
    async fn custom_time_is_set_only_once() {
        for repos in create_test_repos().await {
            let milk = repos.products.insert(&new_product(1, "Milk")).await.unwrap();
            repos
                .products
                .attach_custom_time(milk.id, milk.owner, 42)
                .await
                .unwrap()
                .expect("To find product");

            let res = repos
                .products
                .attach_custom_time(milk.id, milk.owner, 43)
                .await
                .unwrap();
            assert!(res.is_none());

            let stored = repos.products.find_all().await.unwrap();
            assert_eq!(stored[0].custom_time, Some(42));
        }
    }
}
