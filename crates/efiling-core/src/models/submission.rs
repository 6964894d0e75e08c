use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Durable record of one submission attempt against the filing service.
///
/// Created before the first external call so a crash mid-protocol is still
/// attributable, updated at each phase boundary, and never deleted by the
/// pipeline. A failed phase leaves the record at its last successful state
/// as an audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EFilingSubmission {
    pub id: Uuid,
    /// Minted per attempt, correlates both protocol phases and this record.
    pub transaction_id: Uuid,
    pub application_id: Uuid,
    /// Assigned by the external upload phase.
    pub submission_id: Option<String>,
    /// Assigned by the filing office callback once the package is processed.
    pub package_number: Option<String>,
    pub package_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Lifecycle position derived from which fields have been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Transaction minted, no external call has succeeded yet.
    Created,
    /// Document upload succeeded; awaiting package submission or callback.
    Uploaded,
    /// Filing office processed the package and called back.
    Packaged,
}

impl EFilingSubmission {
    pub fn status(&self) -> SubmissionStatus {
        if self.package_number.is_some() && self.package_url.is_some() {
            SubmissionStatus::Packaged
        } else if self.submission_id.is_some() {
            SubmissionStatus::Uploaded
        } else {
            SubmissionStatus::Created
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Created => "created",
            SubmissionStatus::Uploaded => "uploaded",
            SubmissionStatus::Packaged => "packaged",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_submission() -> EFilingSubmission {
        EFilingSubmission {
            id: Uuid::new_v4(),
            transaction_id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            submission_id: None,
            package_number: None,
            package_url: None,
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn test_status_created() {
        assert_eq!(test_submission().status(), SubmissionStatus::Created);
    }

    #[test]
    fn test_status_uploaded() {
        let mut submission = test_submission();
        submission.submission_id = Some("S1".to_string());
        assert_eq!(submission.status(), SubmissionStatus::Uploaded);
    }

    #[test]
    fn test_status_packaged_requires_both_fields() {
        let mut submission = test_submission();
        submission.submission_id = Some("S1".to_string());
        submission.package_number = Some("PKG-42".to_string());
        assert_eq!(submission.status(), SubmissionStatus::Uploaded);

        submission.package_url = Some("https://filing.example/packages/42".to_string());
        assert_eq!(submission.status(), SubmissionStatus::Packaged);
    }
}
