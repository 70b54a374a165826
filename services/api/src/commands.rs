use crate::cli::PayrollExportArgs;
use crate::infra::{operator_portal, OperatorPortal};
use hr_portal::config::AppConfig;
use hr_portal::error::AppError;
use hr_portal::gate::Role;
use hr_portal::portal::rows::{
    application_rows, assignment_rows, claim_rows, document_panel, payroll_breakdown,
    ActionButton,
};
use hr_portal::portal::Severity;
use hr_portal::telemetry;
use hr_portal::workflows::applications::{tab_counts, WorkflowTab};
use hr_portal::workflows::documents::DocumentSlot;
use hr_portal::workflows::money::format_amount;
use hr_portal::workflows::payroll::{write_payroll_csv, PayrollLine, TitleKind};
use hr_portal::workflows::{ApplicationId, ClaimId, PayrollId, PeriodId, TitleId};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

/// Who runs a backend command and against which backend.
#[derive(Debug, Clone)]
pub(crate) struct Operator {
    pub(crate) backend_url: Option<String>,
    pub(crate) role: Role,
}

impl Operator {
    fn connect(self) -> Result<OperatorPortal, AppError> {
        let mut config = AppConfig::load()?;
        if let Some(url) = self.backend_url {
            config.backend = config.backend.with_base_url(url);
        }
        telemetry::init(&config.telemetry)?;
        info!(backend = %config.backend.base_url, role = ?self.role, "operator session");
        operator_portal(&config.backend, self.role)
    }
}

fn render_buttons(buttons: &[ActionButton]) -> String {
    if buttons.is_empty() {
        return "-".to_string();
    }
    buttons
        .iter()
        .map(|button| button.label)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_outcome(portal: &OperatorPortal) {
    if let Some(notification) = portal.state().last_notification() {
        let marker = match notification.severity {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        println!("[{marker}] {}", notification.message);
    }
}

pub(crate) async fn run_claims_list(operator: Operator) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_claims().await?;

    let rows = claim_rows(portal.state());
    if rows.is_empty() {
        println!("No benefit claims.");
        return Ok(());
    }
    println!(
        "{:>6}  {:<24} {:<12} {:<14} {:<28} Actions",
        "ID", "Employee", "Benefit", "Amount", "Status"
    );
    for row in rows {
        println!(
            "{:>6}  {:<24} {:<12} {:<14} {:<28} {}",
            row.id,
            row.employee,
            row.benefit,
            row.amount.as_deref().unwrap_or("-"),
            row.badge.label,
            render_buttons(&row.buttons)
        );
    }
    Ok(())
}

pub(crate) async fn run_claim_documents(operator: Operator, id: u64) -> Result<(), AppError> {
    let claim = ClaimId(id);
    let mut portal = operator.connect()?;
    portal.load_claim_documents(claim).await?;

    let documents = portal
        .state()
        .claim_documents
        .get(&claim)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if documents.is_empty() {
        println!("Claim {claim} has no attached documents.");
        return Ok(());
    }
    println!("Documents for claim {claim}");
    for document in documents {
        println!(
            "- {:<28} {:<32} {}",
            document.document_type.as_deref().unwrap_or("-"),
            document.file_name.as_deref().unwrap_or("-"),
            document.file_path.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

pub(crate) async fn run_claim_approve(operator: Operator, id: u64) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_claims().await?;
    portal.approve_claim(ClaimId(id)).await?;
    print_outcome(&portal);
    Ok(())
}

pub(crate) async fn run_claim_reject(
    operator: Operator,
    id: u64,
    reason: &str,
) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_claims().await?;
    portal.reject_claim(ClaimId(id), reason).await?;
    print_outcome(&portal);
    Ok(())
}

pub(crate) async fn run_claim_advance(
    operator: Operator,
    id: u64,
    attachment: Option<String>,
) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_claims().await?;
    portal.advance_claim(ClaimId(id), attachment).await?;
    print_outcome(&portal);
    Ok(())
}

pub(crate) async fn run_applications_list(
    operator: Operator,
    tab: WorkflowTab,
) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_applications().await?;
    portal.select_tab(tab);

    let counts = tab_counts(&portal.state().applications)
        .into_iter()
        .map(|count| format!("{} {}", count.tab, count.count))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{counts}");
    println!();

    let rows = application_rows(portal.state());
    if rows.is_empty() {
        println!("No applications under {tab}.");
        return Ok(());
    }
    println!(
        "{:>6}  {:<28} {:<24} {:<22} Actions",
        "ID", "Applicant", "Position", "Status"
    );
    for row in rows {
        println!(
            "{:>6}  {:<28} {:<24} {:<22} {}",
            row.id,
            row.applicant,
            row.position,
            row.badge.label,
            render_buttons(&row.buttons)
        );
    }
    Ok(())
}

pub(crate) async fn run_documents_status(
    operator: Operator,
    application: u64,
) -> Result<(), AppError> {
    let application = ApplicationId(application);
    let mut portal = operator.connect()?;
    portal.load_applications().await?;
    portal.load_documents(application).await?;

    let Some(panel) = document_panel(
        portal.state(),
        application,
        &DocumentSlot::onboarding_checklist(),
    ) else {
        println!("No documents loaded for application {application}.");
        return Ok(());
    };

    println!("Documents for application {application}");
    for row in &panel.rows {
        let required = if row.required { "required" } else { "optional" };
        println!(
            "- {:<32} {:<9} {:<22} {}",
            row.label,
            required,
            row.status_label,
            row.file_name.as_deref().unwrap_or("-")
        );
    }

    if !panel.follow_ups.is_empty() {
        println!("\nFollow-up requests");
        for follow_up in &panel.follow_ups {
            println!(
                "- #{} [{}] {}",
                follow_up.id, follow_up.badge.label, follow_up.message
            );
        }
    }

    if panel.outstanding.is_empty() {
        println!("\nAll required documents are approved.");
    } else {
        println!("\nOutstanding: {}", panel.outstanding.join(", "));
    }
    let state = if panel.mark_done.enabled {
        "available"
    } else {
        "unavailable"
    };
    println!("{}: {state}", panel.mark_done.label);
    Ok(())
}

pub(crate) async fn run_payroll_export(
    operator: Operator,
    args: PayrollExportArgs,
) -> Result<(), AppError> {
    let PayrollExportArgs { period, output } = args;
    let mut portal = operator.connect()?;
    portal.load_payroll(period.map(PeriodId)).await?;

    let records = &portal.state().payroll_records;
    match output {
        Some(path) => {
            let file = File::create(&path)?;
            write_payroll_csv(records, BufWriter::new(file))?;
            println!("Exported {} payroll records to {}", records.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_payroll_csv(records, &mut handle)?;
            handle.flush()?;
        }
    }
    Ok(())
}

fn print_lines(heading: &str, lines: &[PayrollLine], total: f64) {
    println!("{heading}");
    for line in lines {
        println!("  {:<28} {:>12}", line.name, format_amount(line.amount));
    }
    println!("  {:<28} {:>12}", "Total", format_amount(total));
}

pub(crate) async fn run_payroll_show(
    operator: Operator,
    record: u64,
    period: Option<u64>,
) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_payroll(period.map(PeriodId)).await?;

    let Some(breakdown) = payroll_breakdown(portal.state(), PayrollId(record)) else {
        return Err(AppError::InvalidRequest(format!(
            "payroll record {record} was not returned by the HR service"
        )));
    };
    println!("{} [{}]", breakdown.employee, breakdown.status.label);
    println!("  {:<28} {:>12}", "Basic pay", format_amount(breakdown.basic_pay));
    println!("  {:<28} {:>12}", "Gross pay", format_amount(breakdown.gross_pay));
    print_lines("Deductions", &breakdown.deductions, breakdown.total_deductions);
    print_lines("Taxes", &breakdown.taxes, breakdown.total_taxes);
    println!("  {:<28} {:>12}", "Net pay", format_amount(breakdown.net_pay));
    if !breakdown.reconciles {
        println!("[warning] net pay does not equal gross pay less deductions and taxes");
    }
    Ok(())
}

pub(crate) async fn run_title_assignments(
    operator: Operator,
    kind: TitleKind,
    title: u64,
) -> Result<(), AppError> {
    let mut portal = operator.connect()?;
    portal.load_titles(kind).await?;
    portal.load_payroll(None).await?;
    portal.open_assign_title(kind, TitleId(title)).await?;

    let rows = assignment_rows(portal.state());
    if rows.is_empty() {
        println!("No employees hold {} title {title}.", kind.label());
    } else {
        println!("{:>6}  {:<28} {:>8} {:>12}", "ID", "Employee", "Rate", "Amount");
        for row in rows {
            let rate = row
                .rate
                .map(|rate| format!("{rate}%"))
                .unwrap_or_else(|| "-".to_string());
            let marker = if row.custom { " (custom)" } else { "" };
            println!(
                "{:>6}  {:<28} {:>8} {:>12}{marker}",
                row.employee_id,
                row.employee,
                rate,
                row.amount.as_deref().unwrap_or("-")
            );
        }
    }

    if let Some(panel) = &portal.state().assignment {
        let available = panel
            .available
            .iter()
            .map(|employee| employee.full_name())
            .collect::<Vec<_>>();
        if !available.is_empty() {
            println!("\nAvailable: {}", available.join(", "));
        }
    }
    portal.close_modal();
    Ok(())
}
