use serde::{Deserialize, Serialize};

/// A student on the voting roster.
///
/// The endpoint serves the spreadsheet's Spanish column names; they are
/// mapped to domain names on (de)serialization, so cached copies use the
/// same wire shape as the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Student card number, unique within the roster.
    #[serde(rename = "carnet")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "curso")]
    pub course: String,
    /// Whether the student may cast a vote.
    #[serde(rename = "habilitado")]
    pub eligible: bool,
}
