pub mod messages;
pub mod report_view;
