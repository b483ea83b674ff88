use serde::{Deserialize, Serialize};

/// A candidate on the ballot.
///
/// Field names follow the spreadsheet's wire shape (`sigla`, `foto`,
/// `propuestas`) via serde renames, matching the student model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Numeric candidate id, unique within the list. Vote tallies key on it.
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Short ballot code for the candidate's list.
    #[serde(rename = "sigla")]
    pub code: String,
    #[serde(rename = "foto")]
    pub photo_url: String,
    /// Platform statement shown on the candidate card.
    #[serde(rename = "propuestas")]
    pub platform: String,
}
