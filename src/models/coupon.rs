use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DiscountType {
    Amount,
    Percentage,
}

impl DiscountType {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            DiscountType::Amount => "Amount",
            DiscountType::Percentage => "Percentage",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Amount" => Some(DiscountType::Amount),
            "Percentage" => Some(DiscountType::Percentage),
            _ => None,
        }
    }

    /// Helper: accept CLI input in any case ("amount", "PERCENTAGE", "pct").
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_lowercase().as_str() {
            "amount" | "amt" => Some(DiscountType::Amount),
            "percentage" | "percent" | "pct" | "%" => Some(DiscountType::Percentage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Coupon {
    pub name: String,
    pub code: String,
    pub event: String,
    pub discount_type: DiscountType,
    pub discount_amt: f64,
    pub coupons_granted: i64,
    pub claimed_coupon: i64,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

impl Coupon {
    /// A coupon with a positive grant is exhausted once claims reach it;
    /// a zero grant means unlimited.
    pub fn is_used_up(&self) -> bool {
        self.coupons_granted > 0 && self.claimed_coupon >= self.coupons_granted
    }
}

/// Outcome of validating a coupon code from the booking side.
#[derive(Debug, Clone, PartialEq)]
pub enum CouponCheck {
    Valid {
        name: String,
        code: String,
        discount_type: DiscountType,
        discount_amt: f64,
    },
    Rejected(String),
}
