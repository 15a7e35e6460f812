use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{CheckoutRequest, Order, OrderItemDetail, OrderWithItems};
use crate::utils::validate_email;
use chrono::Utc;

#[derive(Clone)]
pub struct OrderService {
    pool: DbPool,
}

impl OrderService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist an order header and all of its line items in one transaction.
    /// Preconditions are checked before any write; any failure after that
    /// rolls the whole order back. The id is returned only after commit.
    pub async fn place_order(&self, request: &CheckoutRequest) -> AppResult<i64> {
        validate_checkout(request)?;

        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (name, email, phone, address, payment, total_amount, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(&request.address)
        .bind(&request.payment)
        .bind(request.total_amount)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for item in &request.cart {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, size, quantity, price)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(item.id)
            .bind(&item.size)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        log::info!(
            "Placed order {} with {} items for {}",
            order_id,
            request.cart.len(),
            request.phone
        );

        Ok(order_id)
    }

    /// All orders for a phone number, newest first, items joined against the
    /// product catalog for display.
    pub async fn get_orders_by_phone(&self, phone: &str) -> AppResult<Vec<OrderWithItems>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, name, email, phone, address, payment, total_amount, created_at
            FROM orders
            WHERE phone = ?
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(orders.len());
        for order in orders {
            let items = sqlx::query_as::<_, OrderItemDetail>(
                r#"
                SELECT p.name, p.image_url, oi.size, oi.quantity, oi.price
                FROM order_items oi
                JOIN products p ON oi.product_id = p.id
                WHERE oi.order_id = ?
                ORDER BY oi.id
                "#,
            )
            .bind(order.id)
            .fetch_all(&self.pool)
            .await?;

            result.push(OrderWithItems { order, items });
        }

        Ok(result)
    }
}

fn validate_checkout(request: &CheckoutRequest) -> AppResult<()> {
    if request.name.trim().is_empty() {
        return Err(AppError::ValidationError("Name is required.".to_string()));
    }
    validate_email(&request.email)?;
    if request.phone.trim().is_empty() {
        return Err(AppError::ValidationError("Phone is required.".to_string()));
    }
    if request.address.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Address is required.".to_string(),
        ));
    }
    if request.payment.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Payment method is required.".to_string(),
        ));
    }
    if request.cart.is_empty() {
        return Err(AppError::ValidationError(
            "Cart must not be empty.".to_string(),
        ));
    }
    for item in &request.cart {
        if item.id <= 0 {
            return Err(AppError::ValidationError(
                "Cart item is missing a product reference.".to_string(),
            ));
        }
        if item.quantity <= 0 {
            return Err(AppError::ValidationError(
                "Cart item quantity must be positive.".to_string(),
            ));
        }
        if item.price <= 0 {
            return Err(AppError::ValidationError(
                "Cart item price must be positive.".to_string(),
            ));
        }
    }
    if request.total_amount <= 0 {
        return Err(AppError::ValidationError(
            "Total amount must be positive.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use crate::test_utils::{seed_product, test_pool, valid_checkout};

    async fn count(pool: &DbPool, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn successful_checkout_writes_header_and_all_items() {
        let pool = test_pool().await;
        let service = OrderService::new(pool.clone());

        let order_id = service.place_order(&valid_checkout()).await.unwrap();

        assert_eq!(count(&pool, "orders").await, 1);
        assert_eq!(count(&pool, "order_items").await, 2);

        let linked: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM order_items WHERE order_id = ?")
                .bind(order_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(linked, 2);
    }

    #[tokio::test]
    async fn invalid_input_writes_nothing() {
        let pool = test_pool().await;
        let service = OrderService::new(pool.clone());

        let mut no_cart = valid_checkout();
        no_cart.cart.clear();

        let mut bad_email = valid_checkout();
        bad_email.email = "not-an-email".to_string();

        let mut zero_quantity = valid_checkout();
        zero_quantity.cart[0].quantity = 0;

        let mut free_item = valid_checkout();
        free_item.cart[1].price = 0;

        let mut zero_total = valid_checkout();
        zero_total.total_amount = 0;

        for request in [no_cart, bad_email, zero_quantity, free_item, zero_total] {
            let err = service.place_order(&request).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }

        assert_eq!(count(&pool, "orders").await, 0);
        assert_eq!(count(&pool, "order_items").await, 0);
    }

    #[tokio::test]
    async fn item_insert_failure_rolls_back_the_header() {
        let pool = test_pool().await;
        let service = OrderService::new(pool.clone());

        // Make the item inserts fail after the header insert has succeeded
        sqlx::query("DROP TABLE order_items")
            .execute(&pool)
            .await
            .unwrap();

        let err = service.place_order(&valid_checkout()).await.unwrap_err();
        assert!(matches!(err, AppError::DatabaseError(_)));

        assert_eq!(count(&pool, "orders").await, 0);
    }

    #[tokio::test]
    async fn lookup_by_phone_joins_product_fields() {
        let pool = test_pool().await;
        let service = OrderService::new(pool.clone());

        seed_product(&pool, 1, "Block Print Kurta", Some("kurta.jpg")).await;
        seed_product(&pool, 2, "Silk Dupatta", None).await;

        let order_id = service.place_order(&valid_checkout()).await.unwrap();

        let orders = service.get_orders_by_phone("9876543210").await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order.id, order_id);
        assert_eq!(orders[0].order.total_amount, 1300);

        let items = &orders[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Block Print Kurta");
        assert_eq!(items[0].image_url.as_deref(), Some("kurta.jpg"));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].name, "Silk Dupatta");
        assert_eq!(items[1].price, 300);

        assert!(service.get_orders_by_phone("0000000000").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orders_for_phone_come_newest_first() {
        let pool = test_pool().await;
        let service = OrderService::new(pool.clone());
        seed_product(&pool, 1, "Block Print Kurta", None).await;
        seed_product(&pool, 2, "Silk Dupatta", None).await;

        let first = service.place_order(&valid_checkout()).await.unwrap();
        let mut second_request = valid_checkout();
        second_request.cart = vec![CartItem {
            id: 1,
            size: None,
            quantity: 1,
            price: 500,
        }];
        second_request.total_amount = 500;
        let second = service.place_order(&second_request).await.unwrap();

        let orders = service.get_orders_by_phone("9876543210").await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order.id, second);
        assert_eq!(orders[1].order.id, first);
    }
}
