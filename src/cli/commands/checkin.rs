use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::check_in::CheckInOutcome;
use crate::ui::messages::{success, warning};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        ticket,
        date: day,
        cancel,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        if let Some(name) = cancel {
            let record = CheckInLogic::cancel(&mut pool, name)?;
            success(format!(
                "Check-in {} of ticket {} cancelled.",
                record.name, record.ticket
            ));
            return Ok(());
        }

        let Some(ticket) = ticket else {
            return Err(AppError::Validation("Ticket code is required.".into()));
        };

        let d = date::parse_or_today(day.as_deref()).map_err(AppError::InvalidDate)?;

        match CheckInLogic::mark(&mut pool, ticket, d)? {
            CheckInOutcome::CheckedIn(name) => {
                success(format!("Ticket {} checked in for {} ({}).", ticket, d, name));
            }
            CheckInOutcome::AlreadyCheckedIn => {
                warning(format!("Ticket {} is already checked in for {}.", ticket, d));
            }
        }
    }

    Ok(())
}
