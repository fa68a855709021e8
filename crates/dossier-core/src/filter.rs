//! Filter engine: derives a filtered view of a record collection.
//!
//! Filtering is a pure function of the input slice and the criteria. It
//! never mutates, is deterministic, and preserves the relative order of
//! matching records. Records whose field is not set match only the empty
//! criterion for that field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{FileRecord, RecordStatus};

/// Active equality filters. An absent field matches every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub agent: Option<String>,
    pub process_number: Option<String>,
    pub file_type: Option<String>,
    pub status: Option<RecordStatus>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.agent.is_none()
            && self.process_number.is_none()
            && self.file_type.is_none()
            && self.status.is_none()
    }

    /// Whether a single record satisfies every non-empty criterion.
    ///
    /// Agent and process number compare exactly; file type is a normalized
    /// classification and compares case-insensitively.
    pub fn matches(&self, record: &FileRecord) -> bool {
        if let Some(ref agent) = self.agent {
            match record.agent {
                Some(ref value) if value == agent => {}
                _ => return false,
            }
        }
        if let Some(ref process_number) = self.process_number {
            match record.process_number {
                Some(ref value) if value == process_number => {}
                _ => return false,
            }
        }
        if let Some(ref file_type) = self.file_type {
            match record.file_type {
                Some(ref value) if value.eq_ignore_ascii_case(file_type) => {}
                _ => return false,
            }
        }
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        true
    }
}

/// Ordered subsequence of `records` satisfying all criteria.
pub fn apply(records: &[FileRecord], criteria: &FilterCriteria) -> Vec<FileRecord> {
    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Distinct non-placeholder values per filterable field, sorted ascending.
/// Used to populate filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct DistinctValues {
    pub agents: Vec<String>,
    pub process_numbers: Vec<String>,
    pub file_types: Vec<String>,
    pub statuses: Vec<RecordStatus>,
}

pub fn distinct_values(records: &[FileRecord]) -> DistinctValues {
    let mut agents: Vec<String> = Vec::new();
    let mut process_numbers: Vec<String> = Vec::new();
    let mut file_types: Vec<String> = Vec::new();
    let mut statuses: Vec<RecordStatus> = Vec::new();

    for record in records {
        if let Some(ref agent) = record.agent {
            if !agents.contains(agent) {
                agents.push(agent.clone());
            }
        }
        if let Some(ref process_number) = record.process_number {
            if !process_numbers.contains(process_number) {
                process_numbers.push(process_number.clone());
            }
        }
        if let Some(ref file_type) = record.file_type {
            let normalized = file_type.to_lowercase();
            if !file_types.contains(&normalized) {
                file_types.push(normalized);
            }
        }
        if !statuses.contains(&record.status) {
            statuses.push(record.status);
        }
    }

    agents.sort();
    process_numbers.sort();
    file_types.sort();
    statuses.sort_by_key(|s| s.as_str());

    DistinctValues {
        agents,
        process_numbers,
        file_types,
        statuses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Payload;
    use uuid::Uuid;

    fn record(agent: Option<&str>, status: RecordStatus) -> FileRecord {
        let mut r = FileRecord::new(
            Uuid::new_v4(),
            "doc.pdf",
            10.0,
            Payload::new("AA=="),
            agent.map(String::from),
            None,
            None,
        );
        r.status = status;
        r
    }

    fn full_record(
        agent: Option<&str>,
        process_number: Option<&str>,
        file_type: Option<&str>,
        status: RecordStatus,
    ) -> FileRecord {
        let mut r = FileRecord::new(
            Uuid::new_v4(),
            "doc.pdf",
            10.0,
            Payload::new("AA=="),
            agent.map(String::from),
            process_number.map(String::from),
            file_type.map(String::from),
        );
        r.status = status;
        r
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let records = vec![
            record(Some("A"), RecordStatus::Pending),
            record(None, RecordStatus::Approved),
        ];
        let result = apply(&records, &FilterCriteria::default());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_filter_scenario_agent_and_status() {
        // Records [{agent: A, pending}, {agent: B, approved}].
        let a = record(Some("A"), RecordStatus::Pending);
        let b = record(Some("B"), RecordStatus::Approved);
        let records = vec![a.clone(), b.clone()];

        let by_agent = apply(
            &records,
            &FilterCriteria {
                agent: Some("A".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_agent.len(), 1);
        assert_eq!(by_agent[0].id, a.id);

        let by_status = apply(
            &records,
            &FilterCriteria {
                status: Some(RecordStatus::Approved),
                ..Default::default()
            },
        );
        assert_eq!(by_status.len(), 1);
        assert_eq!(by_status[0].id, b.id);

        let both = apply(
            &records,
            &FilterCriteria {
                agent: Some("A".to_string()),
                status: Some(RecordStatus::Approved),
                ..Default::default()
            },
        );
        assert!(both.is_empty());
    }

    #[test]
    fn test_every_result_satisfies_all_criteria() {
        let records = vec![
            full_record(Some("A"), Some("100-1"), Some("pdf"), RecordStatus::Pending),
            full_record(Some("A"), Some("100-2"), Some("pdf"), RecordStatus::Approved),
            full_record(Some("B"), Some("100-1"), Some("docx"), RecordStatus::Pending),
            full_record(None, None, None, RecordStatus::Pending),
        ];
        let criteria = FilterCriteria {
            agent: Some("A".to_string()),
            status: Some(RecordStatus::Pending),
            ..Default::default()
        };
        let result = apply(&records, &criteria);
        assert!(result.iter().all(|r| criteria.matches(r)));
        for excluded in records.iter().filter(|r| !result.iter().any(|m| m.id == r.id)) {
            assert!(!criteria.matches(excluded));
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = vec![
            full_record(Some("A"), Some("100-1"), Some("pdf"), RecordStatus::Pending),
            full_record(Some("B"), None, Some("pdf"), RecordStatus::Pending),
        ];
        let criteria = FilterCriteria {
            file_type: Some("pdf".to_string()),
            ..Default::default()
        };
        let once = apply(&records, &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(
            once.iter().map(|r| r.id).collect::<Vec<_>>(),
            twice.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_unset_field_never_matches_a_value() {
        let records = vec![record(None, RecordStatus::Pending)];
        let criteria = FilterCriteria {
            agent: Some("A".to_string()),
            ..Default::default()
        };
        assert!(apply(&records, &criteria).is_empty());
    }

    #[test]
    fn test_file_type_compares_case_insensitively() {
        let records = vec![full_record(None, None, Some("PDF"), RecordStatus::Pending)];
        let criteria = FilterCriteria {
            file_type: Some("pdf".to_string()),
            ..Default::default()
        };
        assert_eq!(apply(&records, &criteria).len(), 1);
    }

    #[test]
    fn test_order_is_preserved() {
        let r1 = record(Some("A"), RecordStatus::Pending);
        let r2 = record(Some("B"), RecordStatus::Pending);
        let r3 = record(Some("A"), RecordStatus::Pending);
        let records = vec![r1.clone(), r2, r3.clone()];
        let result = apply(
            &records,
            &FilterCriteria {
                agent: Some("A".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(
            result.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![r1.id, r3.id]
        );
    }

    #[test]
    fn test_empty_collection_yields_empty_results() {
        let records: Vec<FileRecord> = Vec::new();
        assert!(apply(&records, &FilterCriteria::default()).is_empty());
        assert_eq!(distinct_values(&records), DistinctValues::default());
    }

    #[test]
    fn test_distinct_values_sorted_without_placeholders() {
        let records = vec![
            full_record(Some("Bruna"), Some("200"), Some("PDF"), RecordStatus::Pending),
            full_record(Some("Alice"), Some("100"), Some("pdf"), RecordStatus::Approved),
            full_record(None, None, None, RecordStatus::Pending),
        ];
        let distinct = distinct_values(&records);
        assert_eq!(distinct.agents, vec!["Alice", "Bruna"]);
        assert_eq!(distinct.process_numbers, vec!["100", "200"]);
        assert_eq!(distinct.file_types, vec!["pdf"]);
        assert_eq!(
            distinct.statuses,
            vec![RecordStatus::Approved, RecordStatus::Pending]
        );
    }
}
