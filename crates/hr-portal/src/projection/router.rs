use axum::extract::Path;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::normalize_list;
use crate::error::AppError;
use crate::gate::{allowed_actions_for, Action, Role};
use crate::status::{classify, permitted_transitions, ColorToken, StatusDescriptor, StatusDomain};
use crate::workflows::applications::{filter_by_tab, tab_counts, Application, TabCount, WorkflowTab};
use crate::workflows::documents::{
    outstanding_requirements, resolve, DocumentRequirement, DocumentSlot, DocumentSubmission,
    MatchRule,
};
use crate::workflows::{RequirementId, SubmissionId};

pub fn projection_router() -> Router {
    Router::new()
        .route("/api/v1/status/:domain/:status", get(status_handler))
        .route("/api/v1/applications/tabs/:tab", post(tab_handler))
        .route("/api/v1/actions", post(actions_handler))
        .route("/api/v1/documents/resolve", post(resolve_handler))
        .route("/api/v1/documents/completion", post(completion_handler))
}

#[derive(Debug, Serialize)]
struct StatusView {
    domain: StatusDomain,
    status: String,
    #[serde(flatten)]
    descriptor: StatusDescriptor,
    next_statuses: Vec<&'static str>,
}

async fn status_handler(
    Path((domain, status)): Path<(String, String)>,
) -> Result<Json<StatusView>, AppError> {
    let domain: StatusDomain = domain
        .parse()
        .map_err(|err: crate::status::UnknownDomain| AppError::InvalidRequest(err.to_string()))?;
    Ok(Json(StatusView {
        domain,
        descriptor: classify(&status, domain),
        next_statuses: permitted_transitions(&status, domain),
        status,
    }))
}

#[derive(Debug, Serialize)]
struct TabView {
    tab: WorkflowTab,
    applications: Vec<Application>,
    counts: Vec<TabCount>,
}

/// Accepts any list shape the HR service produces for `/applications`.
async fn tab_handler(
    Path(tab): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<TabView>, AppError> {
    let tab: WorkflowTab = tab
        .parse()
        .map_err(|err: crate::workflows::applications::UnknownTab| {
            AppError::InvalidRequest(err.to_string())
        })?;
    let applications: Vec<Application> = normalize_list("/applications", body, &["applications"])
        .map_err(|err| AppError::InvalidRequest(err.to_string()))?;

    Ok(Json(TabView {
        tab,
        counts: tab_counts(&applications),
        applications: filter_by_tab(&applications, tab).into_iter().cloned().collect(),
    }))
}

#[derive(Debug, Deserialize)]
struct ActionsQuery {
    domain: StatusDomain,
    status: String,
    #[serde(default)]
    role: Role,
}

#[derive(Debug, Serialize)]
struct ActionView {
    action: Action,
    label: &'static str,
}

#[derive(Debug, Serialize)]
struct ActionsView {
    domain: StatusDomain,
    status: String,
    role: Role,
    actions: Vec<ActionView>,
}

async fn actions_handler(Json(query): Json<ActionsQuery>) -> Json<ActionsView> {
    let actions = allowed_actions_for(query.domain, &query.status, query.role)
        .into_iter()
        .map(|action| ActionView {
            action,
            label: action.label(),
        })
        .collect();
    Json(ActionsView {
        domain: query.domain,
        status: query.status,
        role: query.role,
        actions,
    })
}

#[derive(Debug, Deserialize)]
struct DocumentsBody {
    #[serde(default)]
    slots: Option<Vec<DocumentSlot>>,
    #[serde(default)]
    requirements: Vec<DocumentRequirement>,
    #[serde(default)]
    submissions: Vec<DocumentSubmission>,
}

#[derive(Debug, Serialize)]
struct SlotView {
    label: String,
    requirement_id: Option<RequirementId>,
    submission_id: Option<SubmissionId>,
    matched_by: Option<MatchRule>,
    status_variant: ColorToken,
    status_label: String,
}

/// Resolve checklist slots; the onboarding checklist is used when the body
/// names none.
async fn resolve_handler(Json(body): Json<DocumentsBody>) -> Json<Vec<SlotView>> {
    let slots = body.slots.unwrap_or_else(DocumentSlot::onboarding_checklist);
    let views = slots
        .iter()
        .map(|slot| {
            let resolution = resolve(slot, &body.requirements, &body.submissions);
            SlotView {
                label: slot.label.clone(),
                requirement_id: resolution.requirement.map(|requirement| requirement.id),
                submission_id: resolution.submission.map(|submission| submission.id),
                matched_by: resolution.matched_by,
                status_variant: resolution.status_variant,
                status_label: resolution.status_label,
            }
        })
        .collect();
    Json(views)
}

#[derive(Debug, Serialize)]
struct CompletionView {
    complete: bool,
    outstanding: Vec<String>,
}

async fn completion_handler(Json(body): Json<DocumentsBody>) -> Json<CompletionView> {
    let outstanding: Vec<String> = outstanding_requirements(&body.requirements, &body.submissions)
        .into_iter()
        .map(|requirement| requirement.name.clone())
        .collect();
    Json(CompletionView {
        complete: outstanding.is_empty(),
        outstanding,
    })
}
