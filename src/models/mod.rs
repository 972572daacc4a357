pub mod category;
pub mod check_in;
pub mod coupon;
pub mod doc_status;
pub mod event;
pub mod proposal;
pub mod report;
pub mod ticket;
