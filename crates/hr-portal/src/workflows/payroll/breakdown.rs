use serde::Serialize;

use super::domain::{PayrollLine, PayrollRecord};
use crate::status::StatusDescriptor;

/// Largest difference, in currency units, still treated as reconciled.
pub const BREAKDOWN_TOLERANCE: f64 = 0.01;

/// Display shape of one payroll record for the breakdown modal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollBreakdown {
    pub employee: String,
    pub status: StatusDescriptor,
    pub basic_pay: f64,
    pub gross_pay: f64,
    pub deductions: Vec<PayrollLine>,
    pub total_deductions: f64,
    pub taxes: Vec<PayrollLine>,
    pub total_taxes: f64,
    pub net_pay: f64,
    /// Whether gross minus deductions and taxes equals the reported net pay.
    pub reconciles: bool,
}

impl From<&PayrollRecord> for PayrollBreakdown {
    fn from(record: &PayrollRecord) -> Self {
        let total_deductions = record.deductions_total();
        let total_taxes = record.taxes_total();
        let expected_net = record.gross_pay - total_deductions - total_taxes;

        Self {
            employee: record.employee_label(),
            status: record.status.descriptor(),
            basic_pay: record.basic_pay,
            gross_pay: record.gross_pay,
            deductions: record.deductions.clone(),
            total_deductions,
            taxes: record.taxes.clone(),
            total_taxes,
            net_pay: record.net_pay,
            reconciles: (expected_net - record.net_pay).abs() <= BREAKDOWN_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ReportedStatus;
    use crate::workflows::ids::{EmployeeId, PayrollId, PeriodId};

    fn record(net_pay: f64) -> PayrollRecord {
        PayrollRecord {
            id: PayrollId(1),
            period_id: PeriodId(1),
            employee_id: EmployeeId(3),
            employee_name: Some("Jose Rizal".to_string()),
            basic_pay: 20_000.0,
            gross_pay: 21_000.0,
            deductions: vec![
                PayrollLine {
                    name: "SSS".to_string(),
                    amount: 900.0,
                },
                PayrollLine {
                    name: "PhilHealth".to_string(),
                    amount: 500.0,
                },
            ],
            taxes: vec![PayrollLine {
                name: "Withholding".to_string(),
                amount: 1_200.0,
            }],
            total_deductions: None,
            total_taxes: None,
            net_pay,
            status: ReportedStatus::parse("processed"),
        }
    }

    #[test]
    fn breakdown_totals_lines_and_reconciles() {
        let breakdown = PayrollBreakdown::from(&record(18_400.0));
        assert_eq!(breakdown.total_deductions, 1_400.0);
        assert_eq!(breakdown.total_taxes, 1_200.0);
        assert!(breakdown.reconciles);
        assert_eq!(breakdown.status.label, "Processed");
    }

    #[test]
    fn mismatched_net_is_flagged() {
        let breakdown = PayrollBreakdown::from(&record(18_000.0));
        assert!(!breakdown.reconciles);
    }
}
