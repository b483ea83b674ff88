//! Data models for the voting app's reference datasets.
//!
//! - `Student`: roster entry, keyed by card number
//! - `Candidate`: ballot entry, keyed by numeric id
//!
//! Both are replaced wholesale on every successful sync; neither is
//! mutated in place.

pub mod candidate;
pub mod student;

pub use candidate::Candidate;
pub use student::Student;
