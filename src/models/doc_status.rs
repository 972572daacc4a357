use serde::Serialize;

/// Lifecycle of a stored record (tickets, check-ins).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DocStatus {
    Draft,
    Submitted,
    Cancelled,
}

impl DocStatus {
    /// Convert enum → DB integer
    pub fn to_db(&self) -> i32 {
        match self {
            DocStatus::Draft => 0,
            DocStatus::Submitted => 1,
            DocStatus::Cancelled => 2,
        }
    }

    /// Convert DB integer → enum
    pub fn from_db(v: i32) -> Option<Self> {
        match v {
            0 => Some(DocStatus::Draft),
            1 => Some(DocStatus::Submitted),
            2 => Some(DocStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocStatus::Draft => "draft",
            DocStatus::Submitted => "submitted",
            DocStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, DocStatus::Submitted)
    }
}
