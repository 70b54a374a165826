use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::status::{PayrollStatus, ReportedStatus};
use crate::workflows::ids::{EmployeeId, PayrollId, PeriodId, TitleId};
use crate::workflows::money;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    pub id: PeriodId,
    #[serde(default)]
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    pub status: ReportedStatus<PayrollStatus>,
}

impl PayrollPeriod {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!(
                "{} to {}",
                self.start_date.format("%b %d, %Y"),
                self.end_date.format("%b %d, %Y")
            )
        })
    }
}

/// Named amount within a payroll record (one deduction or one tax).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollLine {
    pub name: String,
    #[serde(deserialize_with = "money::amount")]
    pub amount: f64,
}

/// Computed payroll for one employee in one period. All amounts come from the
/// backend; the portal only shapes them for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    pub id: PayrollId,
    #[serde(alias = "payroll_period_id")]
    pub period_id: PeriodId,
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(deserialize_with = "money::amount")]
    pub basic_pay: f64,
    #[serde(deserialize_with = "money::amount")]
    pub gross_pay: f64,
    #[serde(default)]
    pub deductions: Vec<PayrollLine>,
    #[serde(default)]
    pub taxes: Vec<PayrollLine>,
    #[serde(default, deserialize_with = "money::optional_amount")]
    pub total_deductions: Option<f64>,
    #[serde(default, deserialize_with = "money::optional_amount")]
    pub total_taxes: Option<f64>,
    #[serde(deserialize_with = "money::amount")]
    pub net_pay: f64,
    pub status: ReportedStatus<PayrollStatus>,
}

impl PayrollRecord {
    pub fn employee_label(&self) -> String {
        self.employee_name
            .clone()
            .unwrap_or_else(|| format!("Employee #{}", self.employee_id))
    }

    pub fn deductions_total(&self) -> f64 {
        self.total_deductions
            .unwrap_or_else(|| self.deductions.iter().map(|line| line.amount).sum())
    }

    pub fn taxes_total(&self) -> f64 {
        self.total_taxes
            .unwrap_or_else(|| self.taxes.iter().map(|line| line.amount).sum())
    }
}

/// Body of `POST /payroll/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GeneratePayrollRequest {
    pub payroll_period_id: PeriodId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountType {
    Fixed,
    Percentage,
}

/// Reusable deduction policy, e.g. "Uniform loan" or "Cooperative share".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionTitle {
    pub id: TitleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount_type: AmountType,
    #[serde(deserialize_with = "money::amount")]
    pub amount: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl DeductionTitle {
    /// Amount deducted for one employee: the per-employee override when one
    /// is set, otherwise the title default. Percentages apply to `base`.
    pub fn effective_amount(&self, assignment: Option<&TitleAssignment>, base: f64) -> f64 {
        if let Some(custom) = assignment.and_then(|assignment| assignment.custom_amount) {
            return custom;
        }
        match self.amount_type {
            AmountType::Fixed => self.amount,
            AmountType::Percentage => base * self.amount / 100.0,
        }
    }
}

/// Reusable tax policy with a percentage rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTitle {
    pub id: TitleId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "money::amount")]
    pub rate: f64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl TaxTitle {
    pub fn effective_rate(&self, assignment: Option<&TitleAssignment>) -> f64 {
        assignment
            .and_then(|assignment| assignment.custom_rate)
            .unwrap_or(self.rate)
    }

    pub fn effective_amount(&self, assignment: Option<&TitleAssignment>, base: f64) -> f64 {
        base * self.effective_rate(assignment) / 100.0
    }
}

fn default_active() -> bool {
    true
}

/// Employee currently assigned to a title, with optional overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAssignment {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "money::optional_amount")]
    pub custom_amount: Option<f64>,
    #[serde(default, deserialize_with = "money::optional_amount")]
    pub custom_rate: Option<f64>,
}

/// Deduction and tax titles share the same assignment endpoints under
/// different roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleKind {
    Deduction,
    Tax,
}

impl TitleKind {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Deduction => "/deduction-titles",
            Self::Tax => "/tax-titles",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Deduction => "deduction",
            Self::Tax => "tax",
        }
    }
}

/// Body of `POST /{deduction,tax}-titles/:id/assign`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRequest {
    pub employee_ids: Vec<EmployeeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_rate: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(custom_amount: Option<f64>, custom_rate: Option<f64>) -> TitleAssignment {
        TitleAssignment {
            employee_id: EmployeeId(1),
            employee_name: None,
            custom_amount,
            custom_rate,
        }
    }

    #[test]
    fn deduction_override_replaces_default() {
        let title = DeductionTitle {
            id: TitleId(1),
            name: "Uniform".to_string(),
            description: None,
            amount_type: AmountType::Fixed,
            amount: 250.0,
            is_active: true,
        };

        assert_eq!(title.effective_amount(None, 20_000.0), 250.0);
        assert_eq!(
            title.effective_amount(Some(&assignment(Some(100.0), None)), 20_000.0),
            100.0
        );
    }

    #[test]
    fn percentage_deduction_applies_to_base() {
        let title = DeductionTitle {
            id: TitleId(2),
            name: "Coop share".to_string(),
            description: None,
            amount_type: AmountType::Percentage,
            amount: 2.0,
            is_active: true,
        };

        assert_eq!(title.effective_amount(None, 30_000.0), 600.0);
    }

    #[test]
    fn tax_rate_override() {
        let title = TaxTitle {
            id: TitleId(3),
            name: "Withholding".to_string(),
            description: None,
            rate: 10.0,
            is_active: true,
        };

        assert_eq!(title.effective_amount(None, 1_000.0), 100.0);
        assert_eq!(
            title.effective_amount(Some(&assignment(None, Some(5.0))), 1_000.0),
            50.0
        );
    }

    #[test]
    fn record_decodes_string_amounts() {
        let record: PayrollRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "payroll_period_id": 4,
            "employee_id": 9,
            "basic_pay": "20000.00",
            "gross_pay": "21000.00",
            "deductions": [{ "name": "SSS", "amount": "900.00" }],
            "taxes": [{ "name": "Withholding", "amount": 1500 }],
            "net_pay": "18600.00",
            "status": "draft"
        }))
        .expect("record decodes");

        assert_eq!(record.period_id, PeriodId(4));
        assert_eq!(record.deductions_total(), 900.0);
        assert_eq!(record.taxes_total(), 1500.0);
    }
}
