//! Built-in sample datasets.
//!
//! Served only when a fetch fails (or is skipped offline) and the cache
//! holds nothing at all. They are not "offline" data - they are "no data
//! ever fetched" data, which is why serving them never raises the offline
//! banner. Their existence is what lets every fetch operation guarantee a
//! non-empty result.

use crate::models::{Candidate, Student};

pub fn default_students() -> Vec<Student> {
    vec![
        Student {
            id: "2023-0101".to_string(),
            name: "Ana Rojas Quiroga".to_string(),
            course: "4to A".to_string(),
            eligible: true,
        },
        Student {
            id: "2023-0102".to_string(),
            name: "Bruno Céspedes".to_string(),
            course: "4to B".to_string(),
            eligible: true,
        },
        Student {
            id: "2022-0047".to_string(),
            name: "Camila Ortiz".to_string(),
            course: "5to A".to_string(),
            eligible: true,
        },
        Student {
            id: "2022-0051".to_string(),
            name: "Diego Salazar".to_string(),
            course: "5to B".to_string(),
            eligible: false,
        },
        Student {
            id: "2021-0019".to_string(),
            name: "Elena Vargas".to_string(),
            course: "6to A".to_string(),
            eligible: true,
        },
    ]
}

pub fn default_candidates() -> Vec<Candidate> {
    vec![
        Candidate {
            id: 1,
            name: "Lucía Mamani".to_string(),
            code: "UPE".to_string(),
            photo_url: "https://placehold.co/200x200?text=UPE".to_string(),
            platform: "Más horas de biblioteca y torneos interculturales.".to_string(),
        },
        Candidate {
            id: 2,
            name: "Marco Gutiérrez".to_string(),
            code: "FRE".to_string(),
            photo_url: "https://placehold.co/200x200?text=FRE".to_string(),
            platform: "Recreos más largos y una feria de ciencias semestral.".to_string(),
        },
        Candidate {
            id: 3,
            name: "Sofía Arce".to_string(),
            code: "AVE".to_string(),
            photo_url: "https://placehold.co/200x200?text=AVE".to_string(),
            platform: "Reciclaje en cada aula y un club de robótica.".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_defaults_are_non_empty_with_unique_ids() {
        let students = default_students();
        let candidates = default_candidates();

        assert_eq!(students.len(), 5);
        assert_eq!(candidates.len(), 3);

        let student_ids: HashSet<_> = students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(student_ids.len(), students.len());

        let candidate_ids: HashSet<_> = candidates.iter().map(|c| c.id).collect();
        assert_eq!(candidate_ids.len(), candidates.len());
    }
}
