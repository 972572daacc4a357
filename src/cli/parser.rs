use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rCheckin
/// CLI application to book event tickets, check attendees in and report attendance
#[derive(Parser)]
#[command(
    name = "rcheckin",
    version = env!("CARGO_PKG_VERSION"),
    about = "A small event desk CLI: tickets, door check-ins and attendance reports on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Create, list and extend events
    #[command(subcommand)]
    Event(EventCmd),

    /// Book, cancel and list tickets
    #[command(subcommand)]
    Ticket(TicketCmd),

    /// Create, check and delete discount coupons
    #[command(subcommand)]
    Coupon(CouponCmd),

    /// Record, review and submit event proposals
    #[command(subcommand)]
    Proposal(ProposalCmd),

    /// Check a ticket holder in (or cancel a check-in)
    Checkin {
        /// Ticket code (as scanned from the QR)
        #[arg(required_unless_present = "cancel")]
        ticket: Option<String>,

        #[arg(long = "date", help = "Check-in date (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(
            long = "cancel",
            value_name = "CHECKIN",
            conflicts_with_all = ["ticket", "date"],
            help = "Cancel an existing check-in by its name (e.g. CI001)"
        )]
        cancel: Option<String>,
    },

    /// Look a ticket up without checking it in
    Verify {
        ticket: String,

        #[arg(long = "date", help = "Day to verify (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Print the attendance summary of an event
    Report {
        /// Event name (e.g. EV001)
        event: String,

        #[arg(long = "json", help = "Print the report as JSON instead of a table")]
        json: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export the attendance summary of an event
    Export {
        #[arg(long, value_name = "EVENT")]
        event: String,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EventCmd {
    /// Create a new event
    Add {
        title: String,

        #[arg(long = "start", help = "Start date (YYYY-MM-DD)")]
        start: String,

        #[arg(long = "end", help = "End date (YYYY-MM-DD)")]
        end: Option<String>,

        #[arg(long = "route", help = "Public route slug (default: derived from title)")]
        route: Option<String>,

        #[arg(long = "category", help = "Event category (name or slug)")]
        category: Option<String>,

        #[arg(long = "published", help = "Mark the event as published")]
        published: bool,
    },

    /// List all events
    List,

    /// Show one event with its ticket types and check-ins
    Show { event: String },

    /// Add a ticket type to an event
    TicketType {
        event: String,
        title: String,
    },

    /// Register an event category
    Category {
        name: String,

        #[arg(long = "slug", help = "URL slug (default: derived from the name)")]
        slug: Option<String>,

        #[arg(long = "description")]
        description: Option<String>,
    },

    /// List event categories
    Categories,
}

#[derive(Subcommand)]
pub enum TicketCmd {
    /// Book a ticket for an attendee
    Book {
        #[arg(long, value_name = "EVENT")]
        event: String,

        #[arg(long = "name", help = "Attendee full name")]
        name: String,

        #[arg(long = "email", help = "Attendee email")]
        email: String,

        #[arg(long = "type", help = "Ticket type (default: the event default)")]
        ticket_type: Option<String>,

        #[arg(long = "coupon", help = "Coupon code to apply")]
        coupon: Option<String>,
    },

    /// Cancel a booked ticket
    Cancel { ticket: String },

    /// List the tickets of an event
    List {
        #[arg(long, value_name = "EVENT")]
        event: String,
    },
}

#[derive(Subcommand)]
pub enum CouponCmd {
    /// Create a coupon for an event
    Add {
        code: String,

        #[arg(long, value_name = "EVENT")]
        event: String,

        #[arg(
            long = "kind",
            default_value = "percentage",
            help = "Discount kind: amount or percentage"
        )]
        kind: String,

        #[arg(long = "value", help = "Discount amount or percentage")]
        value: f64,

        #[arg(
            long = "granted",
            default_value_t = 0,
            help = "Maximum number of uses (0 = unlimited)"
        )]
        granted: i64,

        #[arg(long = "from", help = "Valid from (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", help = "Valid to (YYYY-MM-DD)")]
        to: Option<String>,
    },

    /// Check whether a coupon can be applied today
    Check {
        code: String,

        #[arg(long = "date", help = "Reference day (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Delete an unclaimed coupon
    Del { code: String },
}

#[derive(Subcommand)]
pub enum ProposalCmd {
    /// Record a new event proposal
    Add {
        title: String,

        #[arg(long = "start", help = "Proposed start date (YYYY-MM-DD)")]
        start: String,

        #[arg(long = "end", help = "Proposed end date (YYYY-MM-DD)")]
        end: Option<String>,

        #[arg(long = "category", help = "Event category (name or slug)")]
        category: Option<String>,

        #[arg(long = "host", help = "Host organising the event")]
        host: Option<String>,
    },

    /// List all proposals
    List,

    /// Mark a proposal as in review
    Review { proposal: String },

    /// Approve a proposal
    Approve {
        proposal: String,

        #[arg(long = "host", help = "Set the host while approving")]
        host: Option<String>,
    },

    /// Reject a proposal
    Reject { proposal: String },

    /// Submit an approved (creates the event) or rejected proposal
    Submit { proposal: String },
}
