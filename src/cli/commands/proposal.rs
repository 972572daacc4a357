use crate::cli::parser::ProposalCmd;
use crate::config::Config;
use crate::core::proposal::ProposalLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::proposal::{NewProposal, Proposal, ProposalStatus};
use crate::ui::messages::{detail, header, success, warning};
use crate::utils::colors::{GREEN, GREY, RED, RESET, YELLOW};
use crate::utils::date;
use crate::utils::table::{Column, Table};

fn status_cell(status: ProposalStatus) -> String {
    let color = match status {
        ProposalStatus::Approved | ProposalStatus::EventCreated => GREEN,
        ProposalStatus::Rejected => RED,
        ProposalStatus::InReview => YELLOW,
        ProposalStatus::Received => GREY,
    };
    format!("{}{}{}", color, status.to_db_str(), RESET)
}

fn report_status(p: &Proposal) {
    success(format!(
        "Proposal {} is now '{}'.",
        p.name,
        p.status.to_db_str()
    ));
}

pub fn handle(cmd: &ProposalCmd, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::new(&cfg.database)?;

    match cmd {
        ProposalCmd::Add {
            title,
            start,
            end,
            category,
            host,
        } => {
            let start_date =
                date::parse_date(start).ok_or_else(|| AppError::InvalidDate(start.clone()))?;
            let end_date = end
                .as_deref()
                .map(|e| date::parse_date(e).ok_or_else(|| AppError::InvalidDate(e.to_string())))
                .transpose()?;

            let p = ProposalLogic::create(
                &mut pool,
                NewProposal {
                    title: title.clone(),
                    start_date: Some(start_date),
                    end_date,
                    category: category.clone(),
                    host: host.clone(),
                },
            )?;

            success(format!("Proposal {} received.", p.name));
            detail("Title", &p.title);
            detail("Host", p.host.as_deref().unwrap_or("--"));
        }

        ProposalCmd::List => {
            let proposals = ProposalLogic::list(&mut pool)?;
            if proposals.is_empty() {
                warning("No proposals found.");
                return Ok(());
            }

            header("Proposals");
            let mut table = Table::new(vec![
                Column::new("Name"),
                Column::new("Title"),
                Column::new("Start"),
                Column::new("Host"),
                Column::new("Status"),
                Column::new("Event"),
            ]);
            for p in &proposals {
                table.add_row(vec![
                    p.name.clone(),
                    p.title.clone(),
                    date::to_db(&p.start_date),
                    p.host.clone().unwrap_or_else(|| format!("{GREY}--{RESET}")),
                    status_cell(p.status),
                    p.event.clone().unwrap_or_else(|| format!("{GREY}--{RESET}")),
                ]);
            }
            print!("{}", table.render());
        }

        ProposalCmd::Review { proposal } => {
            report_status(&ProposalLogic::review(&mut pool, proposal)?);
        }

        ProposalCmd::Approve { proposal, host } => {
            report_status(&ProposalLogic::approve(&mut pool, proposal, host.as_deref())?);
        }

        ProposalCmd::Reject { proposal } => {
            report_status(&ProposalLogic::reject(&mut pool, proposal)?);
        }

        ProposalCmd::Submit { proposal } => {
            let p = ProposalLogic::submit(&mut pool, proposal)?;
            match &p.event {
                Some(ev) => success(format!("Proposal {} submitted: event {} created.", p.name, ev)),
                None => success(format!("Proposal {} submitted as rejected.", p.name)),
            }
        }
    }

    Ok(())
}
