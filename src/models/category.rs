use serde::Serialize;

/// Grouping label for events; `slug` is the URL-safe form of `name`.
#[derive(Debug, Clone, Serialize)]
pub struct EventCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
