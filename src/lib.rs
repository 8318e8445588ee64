pub mod application;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
