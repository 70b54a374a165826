//! Payroll periods and records, reusable deduction and tax titles, and the
//! client-side breakdown and CSV export built from them.

pub mod breakdown;
pub mod domain;
pub mod export;

pub use breakdown::{PayrollBreakdown, BREAKDOWN_TOLERANCE};
pub use domain::{
    AmountType, AssignmentRequest, DeductionTitle, GeneratePayrollRequest, PayrollLine,
    PayrollPeriod, PayrollRecord, TaxTitle, TitleAssignment, TitleKind,
};
pub use export::{payroll_csv, write_payroll_csv, ExportError};
