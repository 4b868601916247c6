//! Raw quarterly input metrics as submitted by a portfolio company.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{CompanyId, Currency, FiscalQuarter};

/// One quarter of raw financial input, in the company's local currency.
///
/// Immutable once transformed; corrections arrive as a new version under the
/// same (company, quarter) key and trigger recomputation of the derived
/// records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMetrics {
    /// Submitting company.
    pub company_id: CompanyId,
    /// Local reporting currency of all monetary fields below.
    pub currency: Currency,
    /// Total revenue for the quarter.
    pub total_revenue: Decimal,
    /// Recurring (subscription) revenue for the quarter.
    pub recurring_revenue: Decimal,
    /// Gross profit for the quarter.
    pub gross_profit: Decimal,
    /// Sales and marketing expense for the quarter.
    pub sales_marketing_expense: Decimal,
    /// Total operating expense for the quarter.
    pub total_operating_expense: Decimal,
    /// Earnings before interest, taxes, depreciation, and amortization.
    pub ebitda: Decimal,
    /// Net income for the quarter. May be negative.
    pub net_income: Decimal,
    /// Quarterly cash burn. May be negative (cash generation).
    pub cash_burn: Decimal,
    /// Cash balance at quarter end.
    pub cash_balance: Decimal,
    /// Debt outstanding at quarter end, if reported.
    pub debt_outstanding: Option<Decimal>,
    /// Full-time equivalent employee count.
    pub employees: u32,
    /// Customer count, if reported.
    pub customers: Option<u32>,
    /// Fiscal period end date.
    pub fiscal_reporting_date: NaiveDate,
    /// Fiscal quarter the record covers.
    pub fiscal_quarter: FiscalQuarter,
}

impl InputMetrics {
    /// Validate the record before transformation.
    ///
    /// Rejects records whose stated fiscal quarter disagrees with the
    /// calendar quarter of the reporting date, and records with negative
    /// values in fields where negativity is nonsensical. Cash burn and net
    /// income legitimately go negative and are not checked.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.fiscal_quarter.contains(self.fiscal_reporting_date) {
            return Err(CoreError::QuarterDateMismatch {
                date: self.fiscal_reporting_date,
                quarter: self.fiscal_quarter.to_string(),
            });
        }
        for (field, value) in [
            ("total_revenue", self.total_revenue),
            ("recurring_revenue", self.recurring_revenue),
            ("sales_marketing_expense", self.sales_marketing_expense),
            ("total_operating_expense", self.total_operating_expense),
            ("cash_balance", self.cash_balance),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(CoreError::NegativeField {
                    field,
                    value: value.to_string(),
                });
            }
        }
        if let Some(debt) = self.debt_outstanding {
            if debt.is_sign_negative() && !debt.is_zero() {
                return Err(CoreError::NegativeField {
                    field: "debt_outstanding",
                    value: debt.to_string(),
                });
            }
        }
        Ok(())
    }
}
