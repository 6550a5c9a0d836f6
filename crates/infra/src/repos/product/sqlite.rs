use super::IProductRepo;
use pantry_reminder_domain::{NewProduct, Product, UserId, ID};
use sqlx::{FromRow, SqlitePool};

pub struct SqliteProductRepo {
    pool: SqlitePool,
}

impl SqliteProductRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRaw {
    id: i64,
    user_id: i64,
    name: String,
    expiration: i64,
    notify_day_before: bool,
    notify_week_before: bool,
    custom_time: Option<i64>,
}

impl From<ProductRaw> for Product {
    fn from(raw: ProductRaw) -> Self {
        Product {
            id: ID::new(raw.id),
            owner: UserId::new(raw.user_id),
            name: raw.name,
            expiration: raw.expiration,
            notify_day_before: raw.notify_day_before,
            notify_week_before: raw.notify_week_before,
            custom_time: raw.custom_time,
        }
    }
}

#[async_trait::async_trait]
impl IProductRepo for SqliteProductRepo {
    async fn insert(&self, product: &NewProduct) -> anyhow::Result<Product> {
        let product = sqlx::query_as::<_, ProductRaw>(
            r#"
            INSERT INTO products
            (user_id, name, expiration, notify_day_before, notify_week_before, custom_time)
            VALUES(?, ?, ?, ?, ?, NULL)
            RETURNING *
            "#,
        )
        .bind(product.owner.inner())
        .bind(product.name.as_str())
        .bind(product.expiration)
        .bind(product.notify_day_before)
        .bind(product.notify_week_before)
        .fetch_one(&self.pool)
        .await?;

        Ok(product.into())
    }

    async fn attach_custom_time(
        &self,
        product_id: ID,
        owner: UserId,
        custom_time: i64,
    ) -> anyhow::Result<Option<Product>> {
        let product = sqlx::query_as::<_, ProductRaw>(
            r#"
            UPDATE products
            SET custom_time = ?
            WHERE id = ? AND user_id = ? AND custom_time IS NULL
            RETURNING *
            "#,
        )
        .bind(custom_time)
        .bind(product_id.inner())
        .bind(owner.inner())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product.map(|p| p.into()))
    }

    async fn find_by_owner(&self, owner: UserId) -> anyhow::Result<Vec<Product>> {
        let products = sqlx::query_as::<_, ProductRaw>(
            r#"
            SELECT * FROM products
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner.inner())
        .fetch_all(&self.pool)
        .await?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Product>> {
        let products = sqlx::query_as::<_, ProductRaw>(
            r#"
            SELECT * FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products.into_iter().map(|p| p.into()).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::repos::Repos;
    use pantry_reminder_domain::{NewProduct, UserId};

    #[tokio::test]
    async fn acknowledged_writes_survive_reopening_the_database() {
        let dir = tempfile::tempdir().expect("To create temp dir");
        let path = dir.path().join("nested").join("products.db");

        let product_id = {
            let repos = Repos::create_sqlite(&path).await.expect("To open database");
            let product = repos
                .products
                .insert(&NewProduct {
                    owner: UserId::new(7),
                    name: "Yoghurt".into(),
                    expiration: 1_748_757_600_000,
                    notify_day_before: false,
                    notify_week_before: true,
                })
                .await
                .expect("To insert product");
            repos
                .products
                .attach_custom_time(product.id, product.owner, 1_748_000_000_000)
                .await
                .expect("To attach custom time");
            product.id
        };

        let repos = Repos::create_sqlite(&path).await.expect("To reopen database");
        let products = repos.products.find_all().await.expect("To list products");
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, product_id);
        assert_eq!(products[0].name, "Yoghurt");
        assert!(products[0].notify_week_before);
        assert_eq!(products[0].custom_time, Some(1_748_000_000_000));
    }
}
