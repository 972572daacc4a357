use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{
    category_exists, insert_category, insert_event, insert_ticket_type, list_categories,
    list_events, list_ticket_types, load_category, load_event, next_name, route_exists,
    set_default_ticket_type, ticket_type_exists,
};
use crate::errors::{AppError, AppResult};
use crate::models::category::EventCategory;
use crate::models::event::{Event, NewEvent};
use crate::utils::slug::slugify;
use chrono::Local;
use rusqlite::Connection;

/// Ticket type every new event starts with.
pub const DEFAULT_TICKET_TYPE: &str = "Normal";

/// High-level business logic for events.
pub struct EventLogic;

impl EventLogic {
    /// Validate and store a new event, then create its default records.
    ///
    /// - title is mandatory, start date too
    /// - end date (if any) cannot precede the start date
    /// - a category, when given, must name an existing category (by name or slug)
    /// - published events get a route slug derived from the title when none is given
    pub fn create(pool: &mut DbPool, input: NewEvent) -> AppResult<Event> {
        let tx = pool.conn.transaction()?;
        let event = Self::create_in(&tx, input)?;
        tx.commit()?;

        ttlog_quiet(
            &pool.conn,
            "event_add",
            &event.name,
            &format!("Created event '{}'", event.title),
        );

        Ok(event)
    }

    /// [`EventLogic::create`] inside a transaction owned by the caller.
    pub(crate) fn create_in(conn: &Connection, input: NewEvent) -> AppResult<Event> {
        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::Validation("Event title is required.".into()));
        }

        let start_date = input
            .start_date
            .ok_or_else(|| AppError::Validation("Event start date is required.".into()))?;

        if let Some(end) = input.end_date
            && end < start_date
        {
            return Err(AppError::Validation(format!(
                "End date {} cannot be earlier than start date {}.",
                end, start_date
            )));
        }

        let category = resolve_category(conn, input.category.as_deref())?;
        let route = resolve_route(input.route.as_deref(), &title, input.is_published);

        if let Some(r) = &route
            && route_exists(conn, r)?
        {
            return Err(AppError::Duplicate(format!(
                "Route '{}' is already used by another event.",
                r
            )));
        }

        let event = Event {
            name: next_name(conn, "events", "EV")?,
            title,
            route,
            category,
            start_date,
            end_date: input.end_date,
            is_published: input.is_published,
            default_ticket_type: None,
            proposal: input.proposal,
        };

        insert_event(conn, &event, &Local::now().to_rfc3339())?;

        // default records
        insert_ticket_type(conn, &event.name, DEFAULT_TICKET_TYPE)?;
        set_default_ticket_type(conn, &event.name, DEFAULT_TICKET_TYPE)?;

        Ok(Event {
            default_ticket_type: Some(DEFAULT_TICKET_TYPE.to_string()),
            ..event
        })
    }

    /// Register an event category. The slug defaults to the slug of the name.
    pub fn add_category(
        pool: &mut DbPool,
        name: &str,
        slug: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<EventCategory> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Category name is required.".into()));
        }

        let slug = slugify(slug.filter(|s| !s.trim().is_empty()).unwrap_or(name));
        if slug.is_empty() {
            return Err(AppError::Validation(format!(
                "Category '{}' has no usable slug.",
                name
            )));
        }

        if category_exists(&pool.conn, name, &slug)? {
            return Err(AppError::Duplicate(format!(
                "Category '{}' (slug '{}') already exists.",
                name, slug
            )));
        }

        let category = EventCategory {
            name: name.to_string(),
            slug,
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };

        insert_category(&pool.conn, &category)?;
        ttlog_quiet(
            &pool.conn,
            "category_add",
            &category.slug,
            &format!("Added event category '{}'", category.name),
        );
        Ok(category)
    }

    pub fn categories(pool: &mut DbPool) -> AppResult<Vec<EventCategory>> {
        list_categories(&pool.conn)
    }

    pub fn get(pool: &mut DbPool, name: &str) -> AppResult<Event> {
        load_event(&pool.conn, name)?.ok_or_else(|| AppError::EventNotFound(name.to_string()))
    }

    pub fn list(pool: &mut DbPool) -> AppResult<Vec<Event>> {
        list_events(&pool.conn)
    }

    /// Ticket type titles of an event, in creation order.
    pub fn ticket_types(pool: &mut DbPool, event: &str) -> AppResult<Vec<String>> {
        Self::get(pool, event)?;
        list_ticket_types(&pool.conn, event)
    }

    /// Add an extra ticket type to an event; titles are unique per event.
    pub fn add_ticket_type(pool: &mut DbPool, event: &str, title: &str) -> AppResult<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Ticket type title is required.".into()));
        }

        Self::get(pool, event)?;

        if ticket_type_exists(&pool.conn, event, title)? {
            return Err(AppError::Duplicate(format!(
                "Ticket type '{}' already exists for event {}.",
                title, event
            )));
        }

        insert_ticket_type(&pool.conn, event, title)?;
        ttlog_quiet(
            &pool.conn,
            "ticket_type_add",
            event,
            &format!("Added ticket type '{}'", title),
        );
        Ok(())
    }
}

/// Category key (name or slug) → stored category name.
pub(crate) fn resolve_category(conn: &Connection, key: Option<&str>) -> AppResult<Option<String>> {
    match key.map(str::trim) {
        None | Some("") => Ok(None),
        Some(key) => load_category(conn, key)?
            .map(|c| Some(c.name))
            .ok_or_else(|| AppError::CategoryNotFound(key.to_string())),
    }
}

/// Explicit routes are normalised; published events without one get a slug
/// of their title; unpublished events keep whatever was given (possibly none).
fn resolve_route(explicit: Option<&str>, title: &str, published: bool) -> Option<String> {
    match explicit.map(slugify).filter(|r| !r.is_empty()) {
        Some(r) => Some(r),
        None if published => Some(slugify(title)).filter(|r| !r.is_empty()),
        None => None,
    }
}
