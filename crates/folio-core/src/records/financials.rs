//! Currency-normalized quarterly financial statements.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, Currency, FiscalQuarter};

/// One quarter of financials for one company in one currency.
///
/// Derived entirely from [`crate::records::InputMetrics`]; the local
/// currency row uses an exchange rate of exactly 1 and is stored like any
/// other row so downstream access is uniform. Keyed by
/// (company, currency, fiscal quarter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingFinancials {
    /// Company the row belongs to.
    pub company_id: CompanyId,
    /// Currency of all monetary fields in this row.
    pub currency: Currency,
    /// Rate applied to produce this row, in units of row currency per unit
    /// of local currency. Exactly 1 for the local row. Stored at 6 dp.
    pub exchange_rate_used: Decimal,
    /// Total revenue for the quarter.
    pub total_revenue: Decimal,
    /// Recurring revenue for the quarter.
    pub recurring_revenue: Decimal,
    /// Gross profit for the quarter.
    pub gross_profit: Decimal,
    /// Sales and marketing expense for the quarter.
    pub sales_marketing_expense: Decimal,
    /// Total operating expense for the quarter.
    pub total_operating_expense: Decimal,
    /// EBITDA for the quarter.
    pub ebitda: Decimal,
    /// Net income for the quarter.
    pub net_income: Decimal,
    /// Quarterly cash burn.
    pub cash_burn: Decimal,
    /// Cash balance at quarter end.
    pub cash_balance: Decimal,
    /// Debt outstanding at quarter end, if reported.
    pub debt_outstanding: Option<Decimal>,
    /// FTE count, carried through unconverted.
    pub employees: u32,
    /// Customer count, carried through unconverted.
    pub customers: Option<u32>,
    /// Fiscal period end date.
    pub fiscal_reporting_date: NaiveDate,
    /// Fiscal quarter the row covers.
    pub fiscal_quarter: FiscalQuarter,
}
