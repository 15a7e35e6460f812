use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ApplyCouponRequest, Coupon, CouponQuote, CreateCouponRequest, DiscountType, PublicCoupon,
};
use chrono::{NaiveDate, Utc};

/// Evaluate a coupon against a cart subtotal. Pure; every call with the same
/// inputs returns the same quote. Rounding to whole minor units happens once,
/// on the way out.
pub fn evaluate(coupon: &Coupon, cart_total: i64, today: NaiveDate) -> AppResult<CouponQuote> {
    // Date-only comparison: a coupon expiring today is valid through end of day
    if let Some(expiry) = coupon.expiry_date
        && expiry < today
    {
        return Err(AppError::ValidationError("Coupon has expired.".to_string()));
    }

    if cart_total < coupon.min_cart_value {
        return Err(AppError::ValidationError(format!(
            "Minimum cart value {} required",
            coupon.min_cart_value
        )));
    }

    let discount = match coupon.discount_type {
        DiscountType::Flat => coupon.discount_value as f64,
        DiscountType::Percentage => {
            let computed = cart_total as f64 * coupon.discount_value as f64 / 100.0;
            match coupon.max_discount {
                Some(cap) if computed > cap as f64 => cap as f64,
                _ => computed,
            }
        }
    };

    let final_total = (cart_total as f64 - discount).max(0.0);

    Ok(CouponQuote {
        discount: discount.round() as i64,
        final_total: final_total.round() as i64,
        coupon_code: coupon.coupon_code.clone(),
    })
}

#[derive(Clone)]
pub struct CouponService {
    pool: DbPool,
}

impl CouponService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create_coupon(&self, request: CreateCouponRequest) -> AppResult<Coupon> {
        if request.coupon_code.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Coupon code is required.".to_string(),
            ));
        }
        if request.discount_value <= 0 {
            return Err(AppError::ValidationError(
                "Discount value must be positive.".to_string(),
            ));
        }

        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO coupons
                (coupon_code, discount_type, discount_value, min_cart_value, max_discount, expiry_date, is_active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?)
            RETURNING
                id, coupon_code, discount_type, discount_value, min_cart_value,
                max_discount, expiry_date, is_active, created_at
            "#,
        )
        .bind(&request.coupon_code)
        .bind(request.discount_type)
        .bind(request.discount_value)
        .bind(request.min_cart_value.unwrap_or(0))
        .bind(request.max_discount)
        .bind(request.expiry_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db) = e
                && db.is_unique_violation()
            {
                return AppError::Conflict("Coupon code already exists.".to_string());
            }
            AppError::DatabaseError(e)
        })?;

        Ok(coupon)
    }

    pub async fn list_coupons(&self) -> AppResult<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT
                id, coupon_code, discount_type, discount_value, min_cart_value,
                max_discount, expiry_date, is_active, created_at
            FROM coupons
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    pub async fn delete_coupon(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM coupons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Coupon not found.".to_string()));
        }

        Ok(())
    }

    /// Coupons worth advertising: active and not past expiry. The filter runs
    /// server-side so inactive and expired rows never leave the database.
    pub async fn list_active_coupons(&self) -> AppResult<Vec<PublicCoupon>> {
        let coupons = sqlx::query_as::<_, PublicCoupon>(
            r#"
            SELECT
                coupon_code, discount_type, discount_value, min_cart_value,
                max_discount, expiry_date
            FROM coupons
            WHERE is_active = 1
              AND (expiry_date IS NULL OR expiry_date >= ?)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(Utc::now().date_naive())
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    /// Look up an active coupon by code and quote it against the cart total.
    /// No usage state is recorded; the call is idempotent.
    pub async fn apply_coupon(&self, request: ApplyCouponRequest) -> AppResult<CouponQuote> {
        if request.coupon_code.trim().is_empty() || request.cart_total <= 0 {
            return Err(AppError::ValidationError(
                "Coupon code and cart total are required.".to_string(),
            ));
        }

        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT
                id, coupon_code, discount_type, discount_value, min_cart_value,
                max_discount, expiry_date, is_active, created_at
            FROM coupons
            WHERE coupon_code = ? AND is_active = 1
            "#,
        )
        .bind(&request.coupon_code)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Invalid or inactive coupon.".to_string()))?;

        evaluate(&coupon, request.cart_total, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_pool;
    use chrono::Duration;

    fn percentage_coupon(value: i64, cap: Option<i64>) -> Coupon {
        Coupon {
            id: 1,
            coupon_code: "SAVE10".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: value,
            min_cart_value: 0,
            max_discount: cap,
            expiry_date: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[test]
    fn percentage_discount_clamped_to_cap() {
        let coupon = percentage_coupon(10, Some(50));
        let quote = evaluate(&coupon, 1000, today()).unwrap();
        assert_eq!(quote.discount, 50);
        assert_eq!(quote.final_total, 950);
    }

    #[test]
    fn percentage_discount_below_cap_untouched() {
        let coupon = percentage_coupon(10, Some(50));
        let quote = evaluate(&coupon, 300, today()).unwrap();
        assert_eq!(quote.discount, 30);
        assert_eq!(quote.final_total, 270);
    }

    #[test]
    fn fractional_percentage_rounds_once_at_the_end() {
        let coupon = percentage_coupon(10, None);
        let quote = evaluate(&coupon, 333, today()).unwrap();
        assert_eq!(quote.discount, 33);
        assert_eq!(quote.final_total, 300);
    }

    #[test]
    fn flat_discount_never_drives_total_negative() {
        let coupon = Coupon {
            discount_type: DiscountType::Flat,
            discount_value: 500,
            ..percentage_coupon(0, None)
        };
        let quote = evaluate(&coupon, 300, today()).unwrap();
        assert_eq!(quote.discount, 500);
        assert_eq!(quote.final_total, 0);
    }

    #[test]
    fn expired_yesterday_rejected() {
        let coupon = Coupon {
            expiry_date: Some(today() - Duration::days(1)),
            ..percentage_coupon(10, None)
        };
        let err = evaluate(&coupon, 1000, today()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("expired")));
    }

    #[test]
    fn expiring_today_still_valid() {
        let coupon = Coupon {
            expiry_date: Some(today()),
            ..percentage_coupon(10, None)
        };
        assert!(evaluate(&coupon, 1000, today()).is_ok());
    }

    #[test]
    fn below_minimum_rejected_at_minimum_accepted() {
        let coupon = Coupon {
            min_cart_value: 500,
            ..percentage_coupon(10, None)
        };
        let err = evaluate(&coupon, 499, today()).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(msg) if msg.contains("Minimum")));
        assert!(evaluate(&coupon, 500, today()).is_ok());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let coupon = percentage_coupon(10, Some(50));
        let first = evaluate(&coupon, 1000, today()).unwrap();
        let second = evaluate(&coupon, 1000, today()).unwrap();
        assert_eq!(first, second);
    }

    fn sample_request(code: &str) -> CreateCouponRequest {
        CreateCouponRequest {
            coupon_code: code.to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: 10,
            min_cart_value: Some(500),
            max_discount: Some(50),
            expiry_date: None,
        }
    }

    #[tokio::test]
    async fn duplicate_code_conflicts_without_mutating_existing_row() {
        let pool = test_pool().await;
        let service = CouponService::new(pool);

        let created = service.create_coupon(sample_request("WELCOME")).await.unwrap();

        let mut duplicate = sample_request("WELCOME");
        duplicate.discount_value = 99;
        let err = service.create_coupon(duplicate).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let coupons = service.list_coupons().await.unwrap();
        assert_eq!(coupons.len(), 1);
        assert_eq!(coupons[0].id, created.id);
        assert_eq!(coupons[0].discount_value, 10);
    }

    #[tokio::test]
    async fn admin_list_is_most_recent_first() {
        let pool = test_pool().await;
        let service = CouponService::new(pool);

        service.create_coupon(sample_request("FIRST")).await.unwrap();
        service.create_coupon(sample_request("SECOND")).await.unwrap();

        let coupons = service.list_coupons().await.unwrap();
        assert_eq!(coupons[0].coupon_code, "SECOND");
        assert_eq!(coupons[1].coupon_code, "FIRST");
    }

    #[tokio::test]
    async fn delete_missing_coupon_is_not_found() {
        let pool = test_pool().await;
        let service = CouponService::new(pool);

        let err = service.delete_coupon(42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let created = service.create_coupon(sample_request("GONE")).await.unwrap();
        service.delete_coupon(created.id).await.unwrap();
        assert!(service.list_coupons().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn public_list_hides_inactive_and_expired() {
        let pool = test_pool().await;
        let service = CouponService::new(pool.clone());

        service.create_coupon(sample_request("LIVE")).await.unwrap();

        let mut expired = sample_request("OLD");
        expired.expiry_date = Some(today() - Duration::days(1));
        service.create_coupon(expired).await.unwrap();

        let deactivated = service.create_coupon(sample_request("OFF")).await.unwrap();
        sqlx::query("UPDATE coupons SET is_active = 0 WHERE id = ?")
            .bind(deactivated.id)
            .execute(&pool)
            .await
            .unwrap();

        let mut expiring_today = sample_request("TODAY");
        expiring_today.expiry_date = Some(today());
        service.create_coupon(expiring_today).await.unwrap();

        let public = service.list_active_coupons().await.unwrap();
        let codes: Vec<&str> = public.iter().map(|c| c.coupon_code.as_str()).collect();
        assert_eq!(codes, vec!["TODAY", "LIVE"]);
    }

    #[tokio::test]
    async fn apply_unknown_code_is_not_found() {
        let pool = test_pool().await;
        let service = CouponService::new(pool);

        let err = service
            .apply_coupon(ApplyCouponRequest {
                coupon_code: "NOPE".to_string(),
                cart_total: 1000,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn apply_is_idempotent_across_calls() {
        let pool = test_pool().await;
        let service = CouponService::new(pool);
        service.create_coupon(sample_request("STEADY")).await.unwrap();

        let request = || ApplyCouponRequest {
            coupon_code: "STEADY".to_string(),
            cart_total: 1000,
        };
        let first = service.apply_coupon(request()).await.unwrap();
        let second = service.apply_coupon(request()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.discount, 50);
        assert_eq!(first.final_total, 950);
    }
}
