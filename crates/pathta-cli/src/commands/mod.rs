pub mod config;
pub mod dispatch;
pub mod search;
pub mod shared;
pub mod study;
