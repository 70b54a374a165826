use serde::{Deserialize, Serialize};

use super::domain::{latest_submission, DocumentRequirement, DocumentSubmission};
use crate::status::{ColorToken, StatusVocabulary};
use crate::workflows::ids::RequirementId;

/// Logical document position on the onboarding checklist, e.g. "Government ID".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSlot {
    pub label: String,
    #[serde(default)]
    pub document_key: Option<String>,
    #[serde(default)]
    pub requirement_id: Option<RequirementId>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DocumentSlot {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            document_key: None,
            requirement_id: None,
            keywords: Vec::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.document_key = Some(key.into());
        self
    }

    pub fn with_requirement(mut self, id: RequirementId) -> Self {
        self.requirement_id = Some(id);
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    /// Checklist used by the pre-employment requirements panel.
    pub fn onboarding_checklist() -> Vec<Self> {
        vec![
            Self::new("Government ID")
                .with_key("government_id")
                .with_keywords(["government", "valid id", "passport", "driver"]),
            Self::new("NBI Clearance")
                .with_key("nbi_clearance")
                .with_keywords(["nbi", "clearance"]),
            Self::new("Medical Certificate")
                .with_key("medical_certificate")
                .with_keywords(["medical"]),
            Self::new("Birth Certificate")
                .with_key("birth_certificate")
                .with_keywords(["birth", "psa"]),
            Self::new("TIN")
                .with_key("tin")
                .with_keywords(["tin", "tax identification"]),
            Self::new("SSS")
                .with_key("sss")
                .with_keywords(["sss", "social security"]),
            Self::new("PhilHealth")
                .with_key("philhealth")
                .with_keywords(["philhealth"]),
            Self::new("Pag-IBIG")
                .with_key("pagibig")
                .with_keywords(["pag-ibig", "pagibig", "hdmf"]),
            Self::new("Diploma / TOR")
                .with_key("diploma")
                .with_keywords(["diploma", "transcript"]),
        ]
    }
}

/// Which rule linked a slot to its requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    DocumentKey,
    RequirementId,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotResolution<'a> {
    pub requirement: Option<&'a DocumentRequirement>,
    pub submission: Option<&'a DocumentSubmission>,
    pub matched_by: Option<MatchRule>,
    pub status_variant: ColorToken,
    pub status_label: String,
}

pub const NO_FILE_LABEL: &str = "No file uploaded";
pub const REQUIRED_MISSING_LABEL: &str = "Required - not yet uploaded";
pub const OPTIONAL_MISSING_LABEL: &str = "Optional - not uploaded";

/// Resolve `slot` to a requirement and its latest submission.
///
/// Rules are tried in order: document key, explicit requirement id, then any
/// keyword contained in the requirement name (case-insensitive). Within a rule
/// the lowest requirement id wins, so the outcome never depends on list order.
pub fn resolve<'a>(
    slot: &DocumentSlot,
    requirements: &'a [DocumentRequirement],
    submissions: &'a [DocumentSubmission],
) -> SlotResolution<'a> {
    let Some((requirement, rule)) = find_requirement(slot, requirements) else {
        return SlotResolution {
            requirement: None,
            submission: None,
            matched_by: None,
            status_variant: ColorToken::Neutral,
            status_label: NO_FILE_LABEL.to_string(),
        };
    };

    let submission = latest_submission(requirement.id, submissions);
    let (status_variant, status_label) = match submission {
        Some(submission) => {
            let descriptor = submission.status.descriptor();
            (descriptor.color_token, descriptor.label)
        }
        None if requirement.is_required => {
            (ColorToken::Warning, REQUIRED_MISSING_LABEL.to_string())
        }
        None => (ColorToken::Neutral, OPTIONAL_MISSING_LABEL.to_string()),
    };

    SlotResolution {
        requirement: Some(requirement),
        submission,
        matched_by: Some(rule),
        status_variant,
        status_label,
    }
}

fn find_requirement<'a>(
    slot: &DocumentSlot,
    requirements: &'a [DocumentRequirement],
) -> Option<(&'a DocumentRequirement, MatchRule)> {
    if let Some(key) = slot.document_key.as_deref().map(str::trim) {
        if !key.is_empty() {
            if let Some(found) = lowest(requirements, |requirement| requirement.document_key == key)
            {
                return Some((found, MatchRule::DocumentKey));
            }
        }
    }

    if let Some(id) = slot.requirement_id {
        if let Some(found) = lowest(requirements, |requirement| requirement.id == id) {
            return Some((found, MatchRule::RequirementId));
        }
    }

    let keywords: Vec<String> = slot
        .keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if keywords.is_empty() {
        return None;
    }

    lowest(requirements, |requirement| {
        let name = requirement.name.to_lowercase();
        keywords.iter().any(|keyword| name.contains(keyword.as_str()))
    })
    .map(|found| (found, MatchRule::Keyword))
}

fn lowest<'a>(
    requirements: &'a [DocumentRequirement],
    predicate: impl Fn(&DocumentRequirement) -> bool,
) -> Option<&'a DocumentRequirement> {
    requirements
        .iter()
        .filter(|requirement| predicate(*requirement))
        .min_by_key(|requirement| requirement.id)
}
