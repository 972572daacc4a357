pub mod backup;
pub mod checkin;
pub mod config;
pub mod coupon;
pub mod event;
pub mod log;
pub mod proposal;
pub mod report;
pub mod ticket;
