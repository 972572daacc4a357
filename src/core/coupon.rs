use crate::core::event::EventLogic;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_coupon, insert_coupon, load_coupon_by_code, next_name};
use crate::errors::{AppError, AppResult};
use crate::models::coupon::{Coupon, CouponCheck, DiscountType};
use chrono::NaiveDate;

/// Input for creating a coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub event: String,
    pub discount_type: DiscountType,
    pub discount_amt: f64,
    pub coupons_granted: i64,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

pub struct CouponLogic;

impl CouponLogic {
    pub fn create(pool: &mut DbPool, input: NewCoupon) -> AppResult<Coupon> {
        let code = input.code.trim().to_string();
        if code.is_empty() {
            return Err(AppError::Validation("Coupon code is required.".into()));
        }

        if load_coupon_by_code(&pool.conn, &code)?.is_some() {
            return Err(AppError::Duplicate(format!(
                "Coupon code '{}' already exists. Please use a different coupon code.",
                code
            )));
        }

        if let (Some(from), Some(to)) = (input.valid_from, input.valid_to)
            && to <= from
        {
            return Err(AppError::Validation(
                "Valid To date must be later than Valid From date.".into(),
            ));
        }

        if input.discount_amt < 0.0 {
            return Err(AppError::Validation("Discount cannot be negative.".into()));
        }
        if input.discount_type == DiscountType::Percentage && input.discount_amt > 100.0 {
            return Err(AppError::Validation(
                "Percentage discount cannot exceed 100.".into(),
            ));
        }
        if input.coupons_granted < 0 {
            return Err(AppError::Validation(
                "Number of granted coupons cannot be negative.".into(),
            ));
        }

        let event = EventLogic::get(pool, &input.event)?;

        let coupon = Coupon {
            name: next_name(&pool.conn, "coupons", "CPN")?,
            code,
            event: event.name,
            discount_type: input.discount_type,
            discount_amt: input.discount_amt,
            coupons_granted: input.coupons_granted,
            claimed_coupon: 0,
            valid_from: input.valid_from,
            valid_to: input.valid_to,
        };

        insert_coupon(&pool.conn, &coupon)?;
        ttlog_quiet(
            &pool.conn,
            "coupon_add",
            &coupon.name,
            &format!("Created coupon '{}' for event {}", coupon.code, coupon.event),
        );

        Ok(coupon)
    }

    /// Booking-side validation of a coupon code on `today`.
    ///
    /// Every failure is a `Rejected` outcome carrying the message to show;
    /// only storage problems are errors.
    pub fn validate(pool: &mut DbPool, code: &str, today: NaiveDate) -> AppResult<CouponCheck> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(CouponCheck::Rejected("Coupon code is required.".into()));
        }

        let Some(coupon) = load_coupon_by_code(&pool.conn, code)? else {
            return Ok(CouponCheck::Rejected("Invalid coupon code.".into()));
        };

        if let Some(from) = coupon.valid_from
            && from > today
        {
            return Ok(CouponCheck::Rejected(format!(
                "Coupon is not active yet. Valid from {}.",
                from
            )));
        }

        if let Some(to) = coupon.valid_to
            && to < today
        {
            return Ok(CouponCheck::Rejected("Coupon has expired.".into()));
        }

        if coupon.is_used_up() {
            return Ok(CouponCheck::Rejected(
                "This coupon has already been fully used.".into(),
            ));
        }

        Ok(CouponCheck::Valid {
            name: coupon.name,
            code: coupon.code,
            discount_type: coupon.discount_type,
            discount_amt: coupon.discount_amt,
        })
    }

    /// Delete a coupon that nobody has claimed yet.
    pub fn delete(pool: &mut DbPool, code: &str) -> AppResult<()> {
        let coupon = load_coupon_by_code(&pool.conn, code.trim())?
            .ok_or_else(|| AppError::CouponNotFound(code.to_string()))?;

        if coupon.claimed_coupon > 0 {
            return Err(AppError::Validation(
                "Cannot delete a coupon that has been claimed.".into(),
            ));
        }

        delete_coupon(&pool.conn, &coupon.name)?;
        ttlog_quiet(
            &pool.conn,
            "coupon_del",
            &coupon.name,
            &format!("Deleted coupon '{}'", coupon.code),
        );
        Ok(())
    }
}
