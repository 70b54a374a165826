use super::domain::{latest_submission, DocumentRequirement, DocumentSubmission};
use crate::gate::GateError;

/// Required requirements whose latest submission is not approved.
pub fn outstanding_requirements<'a>(
    requirements: &'a [DocumentRequirement],
    submissions: &[DocumentSubmission],
) -> Vec<&'a DocumentRequirement> {
    requirements
        .iter()
        .filter(|requirement| requirement.is_required)
        .filter(|requirement| {
            !latest_submission(requirement.id, submissions)
                .is_some_and(DocumentSubmission::is_approved)
        })
        .collect()
}

/// Gate for "Mark as Done": every required document must be approved.
pub fn check_submission_complete(
    requirements: &[DocumentRequirement],
    submissions: &[DocumentSubmission],
) -> Result<(), GateError> {
    let outstanding = outstanding_requirements(requirements, submissions);
    if outstanding.is_empty() {
        return Ok(());
    }

    Err(GateError::DocumentsOutstanding {
        missing: outstanding
            .into_iter()
            .map(|requirement| requirement.name.clone())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ReportedStatus;
    use crate::workflows::ids::{RequirementId, SubmissionId};

    fn requirement(id: u64, name: &str, required: bool) -> DocumentRequirement {
        DocumentRequirement {
            id: RequirementId(id),
            application_id: None,
            document_key: name.to_lowercase(),
            name: name.to_string(),
            is_required: required,
            allowed_extensions: Vec::new(),
            max_size_kb: None,
        }
    }

    fn submission(id: u64, requirement: u64, status: &str) -> DocumentSubmission {
        DocumentSubmission {
            id: SubmissionId(id),
            requirement_id: RequirementId(requirement),
            file_name: None,
            file_path: None,
            status: ReportedStatus::parse(status),
            rejection_reason: None,
            submitted_at: None,
        }
    }

    #[test]
    fn refuses_while_a_required_document_is_pending() {
        let requirements = vec![requirement(1, "TIN", true), requirement(2, "NBI", true)];
        let submissions = vec![submission(1, 1, "approved"), submission(2, 2, "pending")];

        match check_submission_complete(&requirements, &submissions) {
            Err(GateError::DocumentsOutstanding { missing }) => {
                assert_eq!(missing, vec!["NBI".to_string()]);
            }
            other => panic!("expected outstanding documents, got {other:?}"),
        }
    }

    #[test]
    fn accepts_once_every_required_document_is_approved() {
        let requirements = vec![
            requirement(1, "TIN", true),
            requirement(2, "NBI", true),
            requirement(3, "Portfolio", false),
        ];
        let submissions = vec![submission(1, 1, "approved"), submission(2, 2, "received")];

        assert!(check_submission_complete(&requirements, &submissions).is_ok());
    }

    #[test]
    fn missing_submission_counts_as_outstanding() {
        let requirements = vec![requirement(1, "TIN", true)];
        assert!(check_submission_complete(&requirements, &[]).is_err());
    }
}
