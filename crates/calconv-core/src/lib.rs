//! Shared configuration, error types and route constants for the calendar
//! conversion service.

pub mod config;
pub mod constants;
pub mod error;
