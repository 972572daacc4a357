use crate::core::event::{EventLogic, resolve_category};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    insert_proposal, list_proposals, load_proposal, next_name, update_proposal,
};
use crate::errors::{AppError, AppResult};
use crate::models::doc_status::DocStatus;
use crate::models::event::NewEvent;
use crate::models::proposal::{NewProposal, Proposal, ProposalStatus};
use chrono::Local;

/// Event proposals: recorded, reviewed, then submitted into events.
pub struct ProposalLogic;

impl ProposalLogic {
    /// Record a new proposal as a draft with status `Received`.
    pub fn create(pool: &mut DbPool, input: NewProposal) -> AppResult<Proposal> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Proposal title is required.".into()));
        }

        let start_date = input
            .start_date
            .ok_or_else(|| AppError::Validation("Proposal start date is required.".into()))?;

        if let Some(end) = input.end_date
            && end < start_date
        {
            return Err(AppError::Validation(format!(
                "End date {} cannot be earlier than start date {}.",
                end, start_date
            )));
        }

        let category = resolve_category(&pool.conn, input.category.as_deref())?;

        let proposal = Proposal {
            name: next_name(&pool.conn, "proposals", "EPR")?,
            title,
            category,
            start_date,
            end_date: input.end_date,
            host: clean_host(input.host.as_deref()),
            status: ProposalStatus::Received,
            doc_status: DocStatus::Draft,
            event: None,
            created_at: Local::now().to_rfc3339(),
        };

        insert_proposal(&pool.conn, &proposal)?;
        ttlog_quiet(
            &pool.conn,
            "proposal_add",
            &proposal.name,
            &format!("Received proposal '{}'", proposal.title),
        );

        Ok(proposal)
    }

    pub fn get(pool: &mut DbPool, name: &str) -> AppResult<Proposal> {
        load_proposal(&pool.conn, name)?
            .ok_or_else(|| AppError::ProposalNotFound(name.to_string()))
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Proposal>> {
        list_proposals(&pool.conn)
    }

    pub fn review(pool: &mut DbPool, name: &str) -> AppResult<Proposal> {
        Self::decide(pool, name, ProposalStatus::InReview, None)
    }

    /// Approve a draft proposal, optionally setting (or replacing) its host.
    pub fn approve(pool: &mut DbPool, name: &str, host: Option<&str>) -> AppResult<Proposal> {
        Self::decide(pool, name, ProposalStatus::Approved, host)
    }

    pub fn reject(pool: &mut DbPool, name: &str) -> AppResult<Proposal> {
        Self::decide(pool, name, ProposalStatus::Rejected, None)
    }

    fn decide(
        pool: &mut DbPool,
        name: &str,
        status: ProposalStatus,
        host: Option<&str>,
    ) -> AppResult<Proposal> {
        let mut proposal = Self::get(pool, name)?;
        ensure_draft(&proposal)?;

        proposal.status = status;
        if let Some(h) = clean_host(host) {
            proposal.host = Some(h);
        }

        update_proposal(&pool.conn, &proposal)?;
        ttlog_quiet(
            &pool.conn,
            "proposal_status",
            &proposal.name,
            &format!("Status set to '{}'", status.to_db_str()),
        );

        Ok(proposal)
    }

    /// Submit a decided proposal.
    ///
    /// Only `Approved` or `Rejected` proposals can be submitted. An approved
    /// proposal needs a host and turns into an (unpublished) event created in
    /// the same transaction; its status becomes `Event Created`.
    pub fn submit(pool: &mut DbPool, name: &str) -> AppResult<Proposal> {
        let tx = pool.conn.transaction()?;

        let mut proposal =
            load_proposal(&tx, name)?.ok_or_else(|| AppError::ProposalNotFound(name.to_string()))?;
        ensure_draft(&proposal)?;

        match proposal.status {
            ProposalStatus::Rejected => {}
            ProposalStatus::Approved => {
                if proposal.host.is_none() {
                    return Err(AppError::Validation(
                        "Please set a host before submitting the proposal.".into(),
                    ));
                }

                let event = EventLogic::create_in(
                    &tx,
                    NewEvent {
                        title: proposal.title.clone(),
                        start_date: Some(proposal.start_date),
                        end_date: proposal.end_date,
                        category: proposal.category.clone(),
                        proposal: Some(proposal.name.clone()),
                        ..NewEvent::default()
                    },
                )?;

                proposal.status = ProposalStatus::EventCreated;
                proposal.event = Some(event.name);
            }
            _ => {
                return Err(AppError::Validation(
                    "Only Approved or Rejected proposals can be submitted.".into(),
                ));
            }
        }

        proposal.doc_status = DocStatus::Submitted;
        update_proposal(&tx, &proposal)?;
        tx.commit()?;

        let message = match &proposal.event {
            Some(ev) => format!("Submitted, created event {}", ev),
            None => "Submitted as rejected".to_string(),
        };
        ttlog_quiet(&pool.conn, "proposal_submit", &proposal.name, &message);

        Ok(proposal)
    }
}

fn ensure_draft(proposal: &Proposal) -> AppResult<()> {
    if proposal.doc_status != DocStatus::Draft {
        return Err(AppError::Validation(format!(
            "Proposal {} is already {}.",
            proposal.name,
            proposal.doc_status.as_str()
        )));
    }
    Ok(())
}

fn clean_host(host: Option<&str>) -> Option<String> {
    host.map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}
