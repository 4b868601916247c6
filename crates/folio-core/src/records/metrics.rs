//! Derived quarterly performance metrics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, Currency, FiscalQuarter};

/// The full set of derived metrics for one company-quarter in one currency.
///
/// Every derived field is `Option<Decimal>`: a `None` means the metric is
/// legitimately unavailable this quarter (missing history, zero denominator,
/// absent reference data). Unavailability is data, not an error, and is
/// never encoded as zero or a sentinel.
///
/// Keyed by (company, currency, fiscal quarter). Ratios are stored as
/// fractions (0.80, not 80.00) at 4 dp; monetary aggregates at 2 dp;
/// runway at 1 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingMetrics {
    /// Company the row belongs to.
    pub company_id: CompanyId,
    /// Currency of all monetary fields in this row.
    pub currency: Currency,
    /// Fiscal period end date.
    pub fiscal_reporting_date: NaiveDate,
    /// Fiscal quarter the row covers.
    pub fiscal_quarter: FiscalQuarter,

    // -- Single-period metrics ------------------------------------------------
    /// Post-money valuation + debt outstanding - cash balance.
    pub enterprise_value: Option<Decimal>,
    /// Annualized recurring revenue (quarterly recurring revenue x 4).
    pub arr: Option<Decimal>,
    /// Recurring revenue / total revenue.
    pub recurring_percentage_revenue: Option<Decimal>,
    /// Total revenue / FTE count.
    pub revenue_per_fte: Option<Decimal>,
    /// Gross profit / FTE count.
    pub gross_profit_per_fte: Option<Decimal>,
    /// Gross profit / total revenue.
    pub gross_profit_margin: Option<Decimal>,
    /// Sales and marketing expense / total revenue.
    pub sales_marketing_percentage_revenue: Option<Decimal>,
    /// Total operating expense / total revenue.
    pub total_operating_percentage_revenue: Option<Decimal>,
    /// Enterprise value / (equity raised + debt outstanding).
    pub ev_by_equity_raised_plus_debt: Option<Decimal>,
    /// Post-money valuation / annualized total revenue.
    pub valuation_to_revenue: Option<Decimal>,
    /// Quarterly cash burn / 3.
    pub monthly_cash_burn: Option<Decimal>,
    /// Cash balance / monthly cash burn. `None` when the company is not
    /// burning cash (burn <= 0), signaling unbounded runway.
    pub runway_months: Option<Decimal>,

    // -- Period-over-period metrics (previous consecutive quarter) -----------
    /// Quarter-over-quarter revenue growth rate.
    pub revenue_growth: Option<Decimal>,
    /// Quarter-over-quarter change in cash balance, as a rate.
    pub change_in_cash: Option<Decimal>,
    /// Quarter-over-quarter employee growth rate.
    pub employee_growth_rate: Option<Decimal>,

    // -- LTM aggregates (4 consecutive trailing quarters, all-or-nothing) ----
    /// Trailing four-quarter total revenue.
    pub ltm_total_revenue: Option<Decimal>,
    /// Trailing four-quarter gross profit.
    pub ltm_gross_profit: Option<Decimal>,
    /// Trailing four-quarter sales and marketing expense.
    pub ltm_sales_marketing_expense: Option<Decimal>,
    /// Trailing four-quarter operating expense.
    pub ltm_operating_expense: Option<Decimal>,
    /// Trailing four-quarter EBITDA.
    pub ltm_ebitda: Option<Decimal>,
    /// Trailing four-quarter net income.
    pub ltm_net_income: Option<Decimal>,
    /// LTM gross profit / LTM total revenue.
    pub ltm_gross_margin: Option<Decimal>,
    /// LTM EBITDA / LTM total revenue.
    pub ltm_ebitda_margin: Option<Decimal>,
    /// LTM net income / LTM total revenue.
    pub ltm_net_income_margin: Option<Decimal>,

    // -- Year-over-year metrics (same quarter, exactly 4 quarters back) ------
    /// YoY total revenue growth rate.
    pub yoy_growth_revenue: Option<Decimal>,
    /// YoY gross profit growth rate.
    pub yoy_growth_profit: Option<Decimal>,
    /// YoY employee growth rate.
    pub yoy_growth_employees: Option<Decimal>,
    /// YoY LTM revenue growth rate. Requires both the current and the
    /// prior-year LTM windows to be complete.
    pub yoy_growth_ltm_revenue: Option<Decimal>,
}

impl ReportingMetrics {
    /// An empty metrics row carrying only the key fields.
    pub fn empty(
        company_id: CompanyId,
        currency: Currency,
        fiscal_reporting_date: NaiveDate,
        fiscal_quarter: FiscalQuarter,
    ) -> Self {
        Self {
            company_id,
            currency,
            fiscal_reporting_date,
            fiscal_quarter,
            enterprise_value: None,
            arr: None,
            recurring_percentage_revenue: None,
            revenue_per_fte: None,
            gross_profit_per_fte: None,
            gross_profit_margin: None,
            sales_marketing_percentage_revenue: None,
            total_operating_percentage_revenue: None,
            ev_by_equity_raised_plus_debt: None,
            valuation_to_revenue: None,
            monthly_cash_burn: None,
            runway_months: None,
            revenue_growth: None,
            change_in_cash: None,
            employee_growth_rate: None,
            ltm_total_revenue: None,
            ltm_gross_profit: None,
            ltm_sales_marketing_expense: None,
            ltm_operating_expense: None,
            ltm_ebitda: None,
            ltm_net_income: None,
            ltm_gross_margin: None,
            ltm_ebitda_margin: None,
            ltm_net_income_margin: None,
            yoy_growth_revenue: None,
            yoy_growth_profit: None,
            yoy_growth_employees: None,
            yoy_growth_ltm_revenue: None,
        }
    }

    /// True when every LTM field is populated.
    pub fn has_complete_ltm(&self) -> bool {
        self.ltm_total_revenue.is_some()
            && self.ltm_gross_profit.is_some()
            && self.ltm_sales_marketing_expense.is_some()
            && self.ltm_operating_expense.is_some()
            && self.ltm_ebitda.is_some()
            && self.ltm_net_income.is_some()
            && self.ltm_gross_margin.is_some()
            && self.ltm_ebitda_margin.is_some()
            && self.ltm_net_income_margin.is_some()
    }

    /// True when every LTM field is absent.
    pub fn has_no_ltm(&self) -> bool {
        self.ltm_total_revenue.is_none()
            && self.ltm_gross_profit.is_none()
            && self.ltm_sales_marketing_expense.is_none()
            && self.ltm_operating_expense.is_none()
            && self.ltm_ebitda.is_none()
            && self.ltm_net_income.is_none()
            && self.ltm_gross_margin.is_none()
            && self.ltm_ebitda_margin.is_none()
            && self.ltm_net_income_margin.is_none()
    }
}
