use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{detail, error, success};
use crate::utils::colors::{GREEN, RESET, YELLOW};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Verify { ticket, date: day } = cmd {
        let d = date::parse_or_today(day.as_deref()).map_err(AppError::InvalidDate)?;
        let mut pool = DbPool::new(&cfg.database)?;

        match CheckInLogic::verify(&mut pool, ticket, d)? {
            Some(v) => {
                success(format!("Ticket {} found.", v.ticket));
                detail("Attendee", &v.attendee_name);
                detail("Event", &v.event);
                let state = if v.checked_in {
                    format!("{GREEN}checked in{RESET}")
                } else {
                    format!("{YELLOW}not checked in{RESET}")
                };
                detail(d, state);
            }
            None => error(format!("Invalid ticket code: {}", ticket.trim())),
        }
    }

    Ok(())
}
