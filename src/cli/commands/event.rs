use crate::cli::parser::EventCmd;
use crate::config::Config;
use crate::core::checkin::CheckInLogic;
use crate::core::event::EventLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::event::NewEvent;
use crate::ui::messages::{detail, header, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_optional_field};
use crate::utils::date;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &EventCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        EventCmd::Add {
            title,
            start,
            end,
            route,
            category,
            published,
        } => {
            let start_date =
                date::parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end_date = end
                .as_deref()
                .map(|e| date::parse_date(e).ok_or_else(|| AppError::InvalidDate(e.to_string())))
                .transpose()?;

            let ev = EventLogic::create(
                &mut pool,
                NewEvent {
                    title: title.clone(),
                    start_date: Some(start_date),
                    end_date,
                    route: route.clone(),
                    category: category.clone(),
                    is_published: *published,
                    proposal: None,
                },
            )?;

            success(format!("Event {} created.", ev.name));
            detail("Title", &ev.title);
            detail("Start", ev.start_date);
            if let Some(end) = ev.end_date {
                detail("End", end);
            }
            if let Some(route) = &ev.route {
                detail("Route", route);
            }
            detail(
                "Ticket type",
                ev.default_ticket_type.as_deref().unwrap_or("--"),
            );
        }

        EventCmd::List => {
            let events = EventLogic::list(&mut pool)?;
            if events.is_empty() {
                warning("No events found.");
                return Ok(());
            }

            header("Events");
            let mut table = Table::new(vec![
                Column::new("Name"),
                Column::new("Title"),
                Column::new("Start"),
                Column::new("End"),
                Column::new("Route"),
                Column::new("Published"),
            ]);

            for ev in &events {
                let route_color = color_for_optional_field(ev.route.as_deref());
                table.add_row(vec![
                    ev.name.clone(),
                    ev.title.clone(),
                    date::to_db(&ev.start_date),
                    ev.end_date
                        .map(|d| date::to_db(&d))
                        .unwrap_or_else(|| format!("{GREY}--{RESET}")),
                    format!(
                        "{}{}{}",
                        route_color,
                        ev.route.as_deref().unwrap_or("--"),
                        RESET
                    ),
                    if ev.is_published { "yes" } else { "no" }.to_string(),
                ]);
            }
            print!("{}", table.render());
        }

        EventCmd::Show { event } => {
            let ev = EventLogic::get(&mut pool, event)?;
            let types = EventLogic::ticket_types(&mut pool, &ev.name)?;
            let check_ins = CheckInLogic::list(&mut pool, &ev.name)?;

            header(format!("{} ({})", ev.title, ev.name));
            detail("Start", ev.start_date);
            detail(
                "End",
                ev.end_date
                    .map(|d| date::to_db(&d))
                    .unwrap_or_else(|| "--".to_string()),
            );
            detail("Route", ev.route.as_deref().unwrap_or("--"));
            detail("Category", ev.category.as_deref().unwrap_or("--"));
            detail("Published", if ev.is_published { "yes" } else { "no" });
            if let Some(p) = &ev.proposal {
                detail("Proposal", p);
            }
            detail("Ticket types", types.join(", "));
            println!();

            if check_ins.is_empty() {
                warning("No check-ins recorded yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::new("Check-in"),
                Column::new("Ticket"),
                Column::new("Date"),
                Column::new("Time"),
                Column::new("Status"),
            ]);
            for ci in &check_ins {
                let status_color = if ci.status.is_submitted() { RESET } else { GREY };
                table.add_row(vec![
                    ci.name.clone(),
                    ci.ticket.clone(),
                    ci.date
                        .map(|d| date::to_db(&d))
                        .unwrap_or_else(|| format!("{GREY}--{RESET}")),
                    ci.checkin_time.clone(),
                    format!("{}{}{}", status_color, ci.status.as_str(), RESET),
                ]);
            }
            print!("{}", table.render());
        }

        EventCmd::TicketType { event, title } => {
            EventLogic::add_ticket_type(&mut pool, event, title)?;
            success(format!("Ticket type '{}' added to event {}.", title.trim(), event));
        }

        EventCmd::Category {
            name,
            slug,
            description,
        } => {
            let category = EventLogic::add_category(
                &mut pool,
                name,
                slug.as_deref(),
                description.as_deref(),
            )?;
            success(format!("Category '{}' added.", category.name));
            detail("Slug", &category.slug);
        }

        EventCmd::Categories => {
            let categories = EventLogic::categories(&mut pool)?;
            if categories.is_empty() {
                warning("No categories found.");
                return Ok(());
            }

            header("Event categories");
            let mut table = Table::new(vec![
                Column::new("Name"),
                Column::new("Slug"),
                Column::new("Description"),
            ]);
            for c in &categories {
                table.add_row(vec![
                    c.name.clone(),
                    c.slug.clone(),
                    c.description.clone().unwrap_or_else(|| format!("{GREY}--{RESET}")),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
