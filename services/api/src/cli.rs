use crate::commands::{
    run_applications_list, run_claim_advance, run_claim_approve, run_claim_documents,
    run_claim_reject, run_claims_list, run_documents_status, run_payroll_export,
    run_payroll_show, run_title_assignments, Operator,
};
use crate::server;
use clap::{Args, Parser, Subcommand, ValueEnum};
use hr_portal::error::AppError;
use hr_portal::gate::Role;
use hr_portal::workflows::applications::WorkflowTab;
use hr_portal::workflows::payroll::TitleKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hr-portal",
    about = "Project HR workflow state and operate the HR backend from the command line",
    version
)]
struct Cli {
    /// Override HR_API_BASE_URL for backend commands
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Role the operator acts as when the gate checks an action
    #[arg(long, global = true, value_enum, default_value_t = OperatorRole::Hr)]
    role: OperatorRole,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the projection HTTP service (default command)
    Serve(ServeArgs),
    /// Review benefit claims
    Claims {
        #[command(subcommand)]
        command: ClaimsCommand,
    },
    /// Inspect job applications by workflow tab
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Inspect onboarding documents
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },
    /// Payroll records, breakdowns and title assignments
    Payroll {
        #[command(subcommand)]
        command: PayrollCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ClaimsCommand {
    /// List claims with their badge and the actions available
    List,
    /// List the files attached to a claim
    Documents { id: u64 },
    /// Approve a claim under review
    Approve { id: u64 },
    /// Reject a claim with a reason of at least ten characters
    Reject {
        id: u64,
        #[arg(long)]
        reason: String,
    },
    /// Move an approved claim to the agency, or an agency claim to completed
    Advance {
        id: u64,
        /// Attachment reference recorded when the claim completes
        #[arg(long)]
        attachment: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// List applications under a workflow tab
    List {
        #[arg(long, value_parser = parse_tab, default_value = "overview")]
        tab: WorkflowTab,
    },
}

#[derive(Subcommand, Debug)]
enum DocumentsCommand {
    /// Show the requirement checklist and follow-ups for an application
    Status { application: u64 },
}

#[derive(Subcommand, Debug)]
enum PayrollCommand {
    /// Export payroll records as CSV
    Export(PayrollExportArgs),
    /// Show the pay breakdown of one payroll record
    Show {
        record: u64,
        /// Period the record belongs to; narrows the backend query
        #[arg(long)]
        period: Option<u64>,
    },
    /// List employees holding a deduction or tax title
    Assignments {
        #[arg(long, value_enum)]
        kind: TitleKindArg,
        title: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TitleKindArg {
    Deduction,
    Tax,
}

impl From<TitleKindArg> for TitleKind {
    fn from(kind: TitleKindArg) -> Self {
        match kind {
            TitleKindArg::Deduction => TitleKind::Deduction,
            TitleKindArg::Tax => TitleKind::Tax,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct PayrollExportArgs {
    /// Payroll period to export; defaults to every record the backend returns
    #[arg(long)]
    pub(crate) period: Option<u64>,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OperatorRole {
    Admin,
    Hr,
}

impl From<OperatorRole> for Role {
    fn from(role: OperatorRole) -> Self {
        match role {
            OperatorRole::Admin => Role::Admin,
            OperatorRole::Hr => Role::Hr,
        }
    }
}

fn parse_tab(raw: &str) -> Result<WorkflowTab, String> {
    raw.parse::<WorkflowTab>().map_err(|err| err.to_string())
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));
    let operator = Operator {
        backend_url: cli.backend_url,
        role: cli.role.into(),
    };

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Claims { command } => match command {
            ClaimsCommand::List => run_claims_list(operator).await,
            ClaimsCommand::Documents { id } => run_claim_documents(operator, id).await,
            ClaimsCommand::Approve { id } => run_claim_approve(operator, id).await,
            ClaimsCommand::Reject { id, reason } => run_claim_reject(operator, id, &reason).await,
            ClaimsCommand::Advance { id, attachment } => {
                run_claim_advance(operator, id, attachment).await
            }
        },
        Command::Applications {
            command: ApplicationsCommand::List { tab },
        } => run_applications_list(operator, tab).await,
        Command::Documents {
            command: DocumentsCommand::Status { application },
        } => run_documents_status(operator, application).await,
        Command::Payroll { command } => match command {
            PayrollCommand::Export(args) => run_payroll_export(operator, args).await,
            PayrollCommand::Show { record, period } => {
                run_payroll_show(operator, record, period).await
            }
            PayrollCommand::Assignments { kind, title } => {
                run_title_assignments(operator, kind.into(), title).await
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_requires_a_reason_flag() {
        assert!(Cli::try_parse_from(["hr-portal", "claims", "reject", "7"]).is_err());
        let cli = Cli::try_parse_from([
            "hr-portal",
            "claims",
            "reject",
            "7",
            "--reason",
            "missing receipt",
        ])
        .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Claims {
                command: ClaimsCommand::Reject { id: 7, .. }
            })
        ));
    }

    #[test]
    fn tab_names_follow_dashboard_labels() {
        let cli = Cli::try_parse_from(["hr-portal", "applications", "list", "--tab", "Shortlisted"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Applications {
                command: ApplicationsCommand::List {
                    tab: WorkflowTab::ShortListed
                }
            })
        ));
        assert!(
            Cli::try_parse_from(["hr-portal", "applications", "list", "--tab", "archive"]).is_err()
        );
    }

    #[test]
    fn global_flags_apply_after_subcommands() {
        let cli = Cli::try_parse_from([
            "hr-portal",
            "claims",
            "list",
            "--backend-url",
            "http://hr.internal/api",
            "--role",
            "admin",
        ])
        .expect("parses");
        assert_eq!(cli.backend_url.as_deref(), Some("http://hr.internal/api"));
        assert_eq!(Role::from(cli.role), Role::Admin);
    }

    #[test]
    fn assignments_need_a_title_kind() {
        assert!(Cli::try_parse_from(["hr-portal", "payroll", "assignments", "4"]).is_err());
        let cli = Cli::try_parse_from([
            "hr-portal",
            "payroll",
            "assignments",
            "--kind",
            "tax",
            "4",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Payroll {
                command: PayrollCommand::Assignments { kind, title },
            }) => {
                assert_eq!(TitleKind::from(kind), TitleKind::Tax);
                assert_eq!(title, 4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["hr-portal"]).expect("parses");
        assert!(cli.command.is_none());
    }
}
