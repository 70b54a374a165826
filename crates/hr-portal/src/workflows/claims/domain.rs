use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::{ClaimStatus, ReportedStatus, StatusVocabulary};
use crate::workflows::ids::{ClaimId, EmployeeId};
use crate::workflows::money;

/// Government agency the benefit is claimed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BenefitType {
    Sss,
    Philhealth,
    Pagibig,
}

impl BenefitType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sss => "SSS",
            Self::Philhealth => "PhilHealth",
            Self::Pagibig => "Pag-IBIG",
        }
    }
}

/// Benefit claim as listed by `/benefit-claims`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitClaim {
    pub id: ClaimId,
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub employee_name: Option<String>,
    pub benefit_type: BenefitType,
    #[serde(default)]
    pub claim_type: String,
    #[serde(default, deserialize_with = "money::optional_amount")]
    pub amount: Option<f64>,
    pub status: ReportedStatus<ClaimStatus>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub completion_attachment: Option<String>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BenefitClaim {
    pub fn employee_label(&self) -> String {
        self.employee_name
            .clone()
            .unwrap_or_else(|| format!("Employee #{}", self.employee_id))
    }
}

/// Supporting file attached to a claim (`/benefit-claims/:id/documents`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDocument {
    pub id: u64,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Body of `PUT /benefit-claims/:id/status` for the post-approval pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimStatusUpdate {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_attachment: Option<String>,
}

impl ClaimStatusUpdate {
    pub fn new(status: ClaimStatus) -> Self {
        Self {
            status: status.as_str(),
            notes: None,
            completion_attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<String>) -> Self {
        self.completion_attachment = attachment;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_claim_with_legacy_status() {
        let claim: BenefitClaim = serde_json::from_value(serde_json::json!({
            "id": 14,
            "employee_id": 3,
            "employee_name": "Maria Santos",
            "benefit_type": "philhealth",
            "claim_type": "maternity",
            "amount": "15000.00",
            "status": "pending",
            "submitted_at": "2025-02-03T08:15:00Z"
        }))
        .expect("claim decodes");

        assert_eq!(claim.status.known(), Some(ClaimStatus::Submitted));
        assert_eq!(claim.amount, Some(15000.0));
        assert_eq!(claim.benefit_type.label(), "PhilHealth");
    }

    #[test]
    fn status_update_serializes_wire_name() {
        let body = serde_json::to_value(ClaimStatusUpdate::new(
            ClaimStatus::ForSubmissionToAgency,
        ))
        .expect("serializes");
        assert_eq!(body, serde_json::json!({ "status": "for_submission_to_agency" }));
    }
}
