use crate::cli::parser::CouponCmd;
use crate::config::Config;
use crate::core::coupon::{CouponLogic, NewCoupon};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::coupon::{CouponCheck, DiscountType};
use crate::ui::messages::{detail, success, warning};
use crate::utils::date;

fn parse_opt_date(raw: Option<&str>) -> AppResult<Option<chrono::NaiveDate>> {
    raw.map(|s| date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string())))
        .transpose()
}

pub fn handle(cmd: &CouponCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        CouponCmd::Add {
            code,
            event,
            kind,
            value,
            granted,
            from,
            to,
        } => {
            let discount_type = DiscountType::from_code(kind)
                .ok_or_else(|| AppError::InvalidDiscountType(kind.clone()))?;

            let coupon = CouponLogic::create(
                &mut pool,
                NewCoupon {
                    code: code.clone(),
                    event: event.clone(),
                    discount_type,
                    discount_amt: *value,
                    coupons_granted: *granted,
                    valid_from: parse_opt_date(from.as_deref())?,
                    valid_to: parse_opt_date(to.as_deref())?,
                },
            )?;

            success(format!("Coupon {} ({}) created.", coupon.code, coupon.name));
        }

        CouponCmd::Check { code, date: day } => {
            let today = date::parse_or_today(day.as_deref()).map_err(AppError::InvalidDate)?;

            match CouponLogic::validate(&mut pool, code, today)? {
                CouponCheck::Valid {
                    name,
                    code,
                    discount_type,
                    discount_amt,
                } => {
                    success(format!("Coupon {} is valid.", code));
                    detail("Name", name);
                    detail("Discount", match discount_type {
                        DiscountType::Percentage => format!("{}%", discount_amt),
                        DiscountType::Amount => format!("{:.2}", discount_amt),
                    });
                }
                CouponCheck::Rejected(msg) => warning(msg),
            }
        }

        CouponCmd::Del { code } => {
            CouponLogic::delete(&mut pool, code)?;
            success(format!("Coupon {} deleted.", code));
        }
    }

    Ok(())
}
