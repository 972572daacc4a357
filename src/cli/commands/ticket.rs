use crate::cli::parser::TicketCmd;
use crate::config::Config;
use crate::core::ticket::TicketLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::doc_status::DocStatus;
use crate::models::ticket::NewTicket;
use crate::ui::messages::{detail, header, success, warning};
use crate::utils::colors::{GREEN, GREY, RED, RESET};
use crate::utils::table::{Column, Table};

fn status_cell(status: DocStatus) -> String {
    let color = match status {
        DocStatus::Submitted => GREEN,
        DocStatus::Cancelled => RED,
        DocStatus::Draft => GREY,
    };
    format!("{}{}{}", color, status.as_str(), RESET)
}

pub fn handle(cmd: &TicketCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        TicketCmd::Book {
            event,
            name,
            email,
            ticket_type,
            coupon,
        } => {
            let ticket = TicketLogic::book(
                &mut pool,
                NewTicket {
                    event: event.clone(),
                    attendee_name: name.clone(),
                    attendee_email: email.clone(),
                    ticket_type: ticket_type.clone(),
                    coupon_code: coupon.clone(),
                },
                &cfg.default_ticket_type,
            )?;

            success(format!("Ticket {} booked.", ticket.name));
            detail("Event", &ticket.event);
            detail("Attendee", &ticket.attendee_name);
            detail("Email", &ticket.attendee_email);
            detail("Type", &ticket.ticket_type);
            if let Some(c) = &ticket.coupon_used {
                detail("Coupon", c);
            }
            detail("QR payload", &ticket.name);
        }

        TicketCmd::Cancel { ticket } => {
            let t = TicketLogic::cancel(&mut pool, ticket)?;
            success(format!("Ticket {} cancelled.", t.name));
        }

        TicketCmd::List { event } => {
            let tickets = TicketLogic::list(&mut pool, event)?;
            if tickets.is_empty() {
                warning(format!("No tickets found for event {}.", event));
                return Ok(());
            }

            header(format!("Tickets of {}", event));
            let mut table = Table::new(vec![
                Column::new("Ticket"),
                Column::new("Attendee"),
                Column::new("Email"),
                Column::new("Type"),
                Column::new("Status"),
            ]);
            for t in &tickets {
                table.add_row(vec![
                    t.name.clone(),
                    t.attendee_name.clone(),
                    t.attendee_email.clone(),
                    t.ticket_type.clone(),
                    status_cell(t.status),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
