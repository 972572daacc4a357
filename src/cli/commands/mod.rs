pub mod backup;
pub mod checkin;
pub mod config;
pub mod coupon;
pub mod db;
pub mod event;
pub mod export;
pub mod init;
pub mod log;
pub mod proposal;
pub mod report;
pub mod ticket;
pub mod verify;
