use std::io::Write;

use serde::Serialize;

use super::domain::PayrollRecord;
use crate::workflows::money::format_amount;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("export buffer was not valid UTF-8")]
    Encoding,
}

#[derive(Debug, Serialize)]
struct PayrollCsvRow {
    #[serde(rename = "Employee ID")]
    employee_id: u64,
    #[serde(rename = "Employee")]
    employee: String,
    #[serde(rename = "Basic Pay")]
    basic_pay: String,
    #[serde(rename = "Gross Pay")]
    gross_pay: String,
    #[serde(rename = "Deductions")]
    deductions: String,
    #[serde(rename = "Taxes")]
    taxes: String,
    #[serde(rename = "Net Pay")]
    net_pay: String,
    #[serde(rename = "Status")]
    status: String,
}

impl From<&PayrollRecord> for PayrollCsvRow {
    fn from(record: &PayrollRecord) -> Self {
        Self {
            employee_id: record.employee_id.0,
            employee: record.employee_label(),
            basic_pay: format_amount(record.basic_pay),
            gross_pay: format_amount(record.gross_pay),
            deductions: format_amount(record.deductions_total()),
            taxes: format_amount(record.taxes_total()),
            net_pay: format_amount(record.net_pay),
            status: record.status.descriptor().label,
        }
    }
}

/// Write payroll records as CSV with a header row.
pub fn write_payroll_csv<W: Write>(records: &[PayrollRecord], writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(PayrollCsvRow::from(record))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn payroll_csv(records: &[PayrollRecord]) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_payroll_csv(records, &mut buffer)?;
    String::from_utf8(buffer).map_err(|_| ExportError::Encoding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ReportedStatus;
    use crate::workflows::ids::{EmployeeId, PayrollId, PeriodId};
    use crate::workflows::payroll::domain::PayrollLine;

    #[test]
    fn export_writes_header_and_formatted_rows() {
        let records = vec![PayrollRecord {
            id: PayrollId(1),
            period_id: PeriodId(2),
            employee_id: EmployeeId(7),
            employee_name: Some("Santos, Maria".to_string()),
            basic_pay: 20_000.0,
            gross_pay: 21_000.5,
            deductions: vec![PayrollLine {
                name: "SSS".to_string(),
                amount: 900.0,
            }],
            taxes: Vec::new(),
            total_deductions: None,
            total_taxes: Some(1_250.0),
            net_pay: 18_850.5,
            status: ReportedStatus::parse("paid"),
        }];

        let csv = payroll_csv(&records).expect("export succeeds");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Employee ID,Employee,Basic Pay,Gross Pay,Deductions,Taxes,Net Pay,Status")
        );
        assert_eq!(
            lines.next(),
            Some("7,\"Santos, Maria\",20000.00,21000.50,900.00,1250.00,18850.50,Paid")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_has_no_rows() {
        assert_eq!(payroll_csv(&[]).expect("export succeeds"), "");
    }
}
