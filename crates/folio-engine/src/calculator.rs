//! Derived metrics calculation.
//!
//! A pure, synchronous function of the current financials row plus the
//! historical rows the accessor selected. Every ratio goes through the
//! null-propagating helpers in `folio_core::math`; a zero or unavailable
//! denominator is a data-quality note, never an error and never a sentinel.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LTM_WINDOW;
use crate::transformer::ConvertedValuation;
use folio_core::math::{growth_rate, round_money, round_ratio, round_runway, safe_div};
use folio_core::records::{ReportingFinancials, ReportingMetrics};

/// Quarters per year, used to annualize quarterly figures.
const QUARTERS_PER_YEAR: Decimal = Decimal::from_parts(4, 0, 0, false, 0);
/// Months per quarter, used for the monthly burn rate.
const MONTHS_PER_QUARTER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Everything the calculator needs for one company-currency-quarter.
///
/// `window` is the contiguous trailing window ending at and including
/// `current` (at most [`LTM_WINDOW`] rows, oldest first); the engine builds
/// it from the accessor's trailing lookup plus the in-flight current row.
/// `prior_year_window` is the corresponding window ending at the
/// same-numbered quarter one year earlier.
#[derive(Debug)]
pub struct MetricInputs<'a> {
    /// The row being aggregated.
    pub current: &'a ReportingFinancials,
    /// Company valuation fields in the row currency.
    pub valuation: &'a ConvertedValuation,
    /// Contiguous trailing window ending at `current`, oldest first.
    pub window: &'a [ReportingFinancials],
    /// The same-numbered quarter exactly one year earlier, if published.
    pub prior_year: Option<&'a ReportingFinancials>,
    /// Contiguous trailing window ending at the prior-year quarter.
    pub prior_year_window: &'a [ReportingFinancials],
}

/// Sums over one complete LTM window.
struct LtmSums {
    total_revenue: Decimal,
    gross_profit: Decimal,
    sales_marketing_expense: Decimal,
    operating_expense: Decimal,
    ebitda: Decimal,
    net_income: Decimal,
}

/// Sum a window into LTM aggregates, or `None` unless it holds exactly
/// [`LTM_WINDOW`] quarters. The accessor guarantees contiguity; a short
/// window means a gap and the whole LTM block is unavailable.
fn ltm_sums(window: &[ReportingFinancials]) -> Option<LtmSums> {
    if window.len() != LTM_WINDOW as usize {
        return None;
    }
    debug_assert!(window
        .windows(2)
        .all(|pair| pair[1].fiscal_quarter.follows(&pair[0].fiscal_quarter)));
    Some(LtmSums {
        total_revenue: window.iter().map(|q| q.total_revenue).sum(),
        gross_profit: window.iter().map(|q| q.gross_profit).sum(),
        sales_marketing_expense: window.iter().map(|q| q.sales_marketing_expense).sum(),
        operating_expense: window.iter().map(|q| q.total_operating_expense).sum(),
        ebitda: window.iter().map(|q| q.ebitda).sum(),
        net_income: window.iter().map(|q| q.net_income).sum(),
    })
}

/// Compute the full derived metrics row.
pub fn calculate(inputs: &MetricInputs<'_>) -> ReportingMetrics {
    let current = inputs.current;
    let mut metrics = ReportingMetrics::empty(
        current.company_id,
        current.currency,
        current.fiscal_reporting_date,
        current.fiscal_quarter,
    );

    let revenue = Some(current.total_revenue);
    let employees = Some(Decimal::from(current.employees));
    // Unreported debt means the company carries none; it enters the
    // valuation metrics as zero rather than nulling them out.
    let debt = current.debt_outstanding.unwrap_or(Decimal::ZERO);

    if current.total_revenue.is_zero() {
        debug!(
            company = %current.company_id,
            quarter = %current.fiscal_quarter,
            "zero revenue quarter: revenue-denominated ratios unavailable"
        );
    }

    // -- Single-period ---------------------------------------------------
    metrics.arr = Some(round_money(current.recurring_revenue * QUARTERS_PER_YEAR));
    metrics.recurring_percentage_revenue =
        safe_div(Some(current.recurring_revenue), revenue).map(round_ratio);
    metrics.gross_profit_margin =
        safe_div(Some(current.gross_profit), revenue).map(round_ratio);
    metrics.sales_marketing_percentage_revenue =
        safe_div(Some(current.sales_marketing_expense), revenue).map(round_ratio);
    metrics.total_operating_percentage_revenue =
        safe_div(Some(current.total_operating_expense), revenue).map(round_ratio);
    metrics.revenue_per_fte = safe_div(revenue, employees).map(round_money);
    metrics.gross_profit_per_fte =
        safe_div(Some(current.gross_profit), employees).map(round_money);

    metrics.enterprise_value = inputs
        .valuation
        .post_money_valuation
        .map(|pmv| round_money(pmv + debt - current.cash_balance));
    metrics.ev_by_equity_raised_plus_debt = safe_div(
        metrics.enterprise_value,
        inputs.valuation.equity_raised.map(|eq| eq + debt),
    )
    .map(round_ratio);
    metrics.valuation_to_revenue = safe_div(
        inputs.valuation.post_money_valuation,
        revenue.map(|r| r * QUARTERS_PER_YEAR),
    )
    .map(round_ratio);

    let monthly_burn = round_money(current.cash_burn / MONTHS_PER_QUARTER);
    metrics.monthly_cash_burn = Some(monthly_burn);
    // Burn at or below zero means the company is not consuming cash;
    // runway is unbounded and reported as unavailable, not infinity.
    metrics.runway_months = if monthly_burn > Decimal::ZERO {
        safe_div(Some(current.cash_balance), Some(monthly_burn)).map(round_runway)
    } else {
        None
    };

    // -- Period over period ----------------------------------------------
    // The previous consecutive quarter is the second-to-last window row;
    // window contiguity means its presence is exactly "no gap".
    let previous = inputs
        .window
        .len()
        .checked_sub(2)
        .and_then(|i| inputs.window.get(i));
    if let Some(prev) = previous {
        metrics.revenue_growth =
            growth_rate(revenue, Some(prev.total_revenue)).map(round_ratio);
        metrics.change_in_cash =
            growth_rate(Some(current.cash_balance), Some(prev.cash_balance)).map(round_ratio);
        metrics.employee_growth_rate = growth_rate(
            employees,
            Some(Decimal::from(prev.employees)),
        )
        .map(round_ratio);
    } else {
        debug!(
            company = %current.company_id,
            quarter = %current.fiscal_quarter,
            "no previous consecutive quarter: period-over-period metrics unavailable"
        );
    }

    // -- LTM ---------------------------------------------------------------
    let ltm = ltm_sums(inputs.window);
    match &ltm {
        Some(sums) => {
            metrics.ltm_total_revenue = Some(round_money(sums.total_revenue));
            metrics.ltm_gross_profit = Some(round_money(sums.gross_profit));
            metrics.ltm_sales_marketing_expense =
                Some(round_money(sums.sales_marketing_expense));
            metrics.ltm_operating_expense = Some(round_money(sums.operating_expense));
            metrics.ltm_ebitda = Some(round_money(sums.ebitda));
            metrics.ltm_net_income = Some(round_money(sums.net_income));
            metrics.ltm_gross_margin =
                safe_div(Some(sums.gross_profit), Some(sums.total_revenue)).map(round_ratio);
            metrics.ltm_ebitda_margin =
                safe_div(Some(sums.ebitda), Some(sums.total_revenue)).map(round_ratio);
            metrics.ltm_net_income_margin =
                safe_div(Some(sums.net_income), Some(sums.total_revenue)).map(round_ratio);
        }
        None => {
            debug!(
                company = %current.company_id,
                quarter = %current.fiscal_quarter,
                window_len = inputs.window.len(),
                "incomplete trailing window: LTM metrics unavailable"
            );
        }
    }

    // -- Year over year ----------------------------------------------------
    if let Some(prior) = inputs.prior_year {
        metrics.yoy_growth_revenue =
            growth_rate(revenue, Some(prior.total_revenue)).map(round_ratio);
        metrics.yoy_growth_profit =
            growth_rate(Some(current.gross_profit), Some(prior.gross_profit)).map(round_ratio);
        metrics.yoy_growth_employees = growth_rate(
            employees,
            Some(Decimal::from(prior.employees)),
        )
        .map(round_ratio);
    }
    // Doubly gated: needs a complete LTM window on both sides.
    let prior_ltm_revenue = ltm_sums(inputs.prior_year_window).map(|s| s.total_revenue);
    metrics.yoy_growth_ltm_revenue = growth_rate(
        ltm.as_ref().map(|s| s.total_revenue),
        prior_ltm_revenue,
    )
    .map(round_ratio);

    metrics
}
