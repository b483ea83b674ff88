//! Client module for the spreadsheet web endpoint.
//!
//! A single GET per operation, selected with the `action` query
//! parameter (`getStudents`, `getCandidates`, `getBoth`), answered with a
//! `{success, data|error}` JSON envelope. Failures are classified by
//! [`ApiError`] and never reach callers of the data service.

pub mod client;
pub mod error;

pub use client::{Action, RosterPayload, SheetClient};
pub use error::ApiError;
