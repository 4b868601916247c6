//! Financials transformation: one raw input record into one
//! currency-normalized row per target currency.
//!
//! Conversion is all-or-nothing per quarter: a missing rate for any
//! non-local target fails the whole unit rather than publishing a partial
//! currency set.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::convert::{convert, convert_amount};
use crate::error::{EngineError, EngineResult};
use folio_core::records::{CompanyProfile, InputMetrics, ReportingFinancials};
use folio_core::types::Currency;

/// The validated rates for one transformation unit: row currency to rate
/// from the local currency. The local leg is always exactly 1.
#[derive(Debug, Clone)]
pub struct RateSet {
    local: Currency,
    rates: HashMap<Currency, Decimal>,
}

impl RateSet {
    /// Start a rate set for a local currency (local leg rate = 1).
    pub fn new(local: Currency) -> Self {
        let mut rates = HashMap::new();
        rates.insert(local, Decimal::ONE);
        Self { local, rates }
    }

    /// The local currency of the unit.
    pub fn local(&self) -> Currency {
        self.local
    }

    /// Record a validated rate for a target currency.
    pub fn insert(&mut self, target: Currency, rate: Decimal) {
        self.rates.insert(target, rate);
    }

    /// The rate into `target`, if recorded.
    pub fn rate_for(&self, target: Currency) -> Option<Decimal> {
        self.rates.get(&target).copied()
    }
}

/// Company valuation fields converted into one row currency.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedValuation {
    /// Cumulative equity raised in the row currency.
    pub equity_raised: Option<Decimal>,
    /// Post-money valuation in the row currency.
    pub post_money_valuation: Option<Decimal>,
}

/// One transformed row plus the valuation inputs in its currency.
#[derive(Debug, Clone)]
pub struct TransformedRow {
    /// The currency-normalized financials row.
    pub financials: ReportingFinancials,
    /// Valuation reference data in the same currency.
    pub valuation: ConvertedValuation,
}

/// Transform a validated input into one row per unit currency: the local
/// row first, then each configured target.
///
/// Fails with a validation error before any conversion when the input is
/// out of policy, and with a rate error when any non-local target has no
/// rate in `rates`.
pub fn transform_all(
    input: &InputMetrics,
    profile: &CompanyProfile,
    rates: &RateSet,
    targets: &[Currency],
) -> EngineResult<Vec<TransformedRow>> {
    input.validate()?;

    let mut currencies = vec![input.currency];
    currencies.extend(targets.iter().copied().filter(|&c| c != input.currency));

    let mut rows = Vec::with_capacity(currencies.len());
    for currency in currencies {
        let rate = rates.rate_for(currency).ok_or_else(|| {
            EngineError::RateUnavailable(format!(
                "{}->{} on {}",
                input.currency, currency, input.fiscal_reporting_date
            ))
        })?;
        rows.push(transform_one(input, profile, currency, rate));
    }
    debug!(
        company = %input.company_id,
        quarter = %input.fiscal_quarter,
        currencies = rows.len(),
        "input transformed"
    );
    Ok(rows)
}

/// Convert every monetary field with one validated rate; carry non-monetary
/// fields through unchanged.
fn transform_one(
    input: &InputMetrics,
    profile: &CompanyProfile,
    currency: Currency,
    rate: Decimal,
) -> TransformedRow {
    let financials = ReportingFinancials {
        company_id: input.company_id,
        currency,
        exchange_rate_used: rate,
        total_revenue: convert_amount(input.total_revenue, rate),
        recurring_revenue: convert_amount(input.recurring_revenue, rate),
        gross_profit: convert_amount(input.gross_profit, rate),
        sales_marketing_expense: convert_amount(input.sales_marketing_expense, rate),
        total_operating_expense: convert_amount(input.total_operating_expense, rate),
        ebitda: convert_amount(input.ebitda, rate),
        net_income: convert_amount(input.net_income, rate),
        cash_burn: convert_amount(input.cash_burn, rate),
        cash_balance: convert_amount(input.cash_balance, rate),
        debt_outstanding: convert(input.debt_outstanding, rate),
        employees: input.employees,
        customers: input.customers,
        fiscal_reporting_date: input.fiscal_reporting_date,
        fiscal_quarter: input.fiscal_quarter,
    };
    let valuation = ConvertedValuation {
        equity_raised: convert(profile.equity_raised, rate),
        post_money_valuation: convert(profile.post_money_valuation, rate),
    };
    TransformedRow {
        financials,
        valuation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use folio_core::types::{CompanyId, FiscalQuarter};

    fn eur_input() -> InputMetrics {
        InputMetrics {
            company_id: CompanyId::random(),
            currency: Currency::EUR,
            total_revenue: dec!(1000000),
            recurring_revenue: dec!(800000),
            gross_profit: dec!(600000),
            sales_marketing_expense: dec!(150000),
            total_operating_expense: dec!(800000),
            ebitda: dec!(100000),
            net_income: dec!(50000),
            cash_burn: dec!(200000),
            cash_balance: dec!(1000000),
            debt_outstanding: Some(dec!(250000)),
            employees: 50,
            customers: Some(120),
            fiscal_reporting_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            fiscal_quarter: FiscalQuarter::new(2023, 2).unwrap(),
        }
    }

    fn profile(input: &InputMetrics) -> CompanyProfile {
        CompanyProfile {
            company_id: input.company_id,
            name: "Acme GmbH".to_string(),
            reporting_currency: input.currency,
            equity_raised: Some(dec!(5000000)),
            post_money_valuation: Some(dec!(20000000)),
        }
    }

    fn eur_rates() -> RateSet {
        let mut rates = RateSet::new(Currency::EUR);
        rates.insert(Currency::USD, dec!(1.10));
        rates.insert(Currency::CAD, dec!(1.48));
        rates
    }

    #[test]
    fn produces_local_and_target_rows() {
        let input = eur_input();
        let rows = transform_all(
            &input,
            &profile(&input),
            &eur_rates(),
            &Currency::NORMALIZATION_TARGETS,
        )
        .unwrap();
        assert_eq!(rows.len(), 3);

        let local = &rows[0].financials;
        assert_eq!(local.currency, Currency::EUR);
        assert_eq!(local.exchange_rate_used, Decimal::ONE);
        assert_eq!(local.total_revenue, dec!(1000000.00));

        let usd = &rows[1].financials;
        assert_eq!(usd.currency, Currency::USD);
        assert_eq!(usd.total_revenue, dec!(1100000.00));
        assert_eq!(usd.exchange_rate_used, dec!(1.10));

        let cad = &rows[2].financials;
        assert_eq!(cad.currency, Currency::CAD);
        assert_eq!(cad.total_revenue, dec!(1480000.00));
    }

    #[test]
    fn non_monetary_fields_carry_through() {
        let input = eur_input();
        let rows = transform_all(
            &input,
            &profile(&input),
            &eur_rates(),
            &Currency::NORMALIZATION_TARGETS,
        )
        .unwrap();
        for row in &rows {
            assert_eq!(row.financials.employees, 50);
            assert_eq!(row.financials.customers, Some(120));
            assert_eq!(
                row.financials.fiscal_reporting_date,
                input.fiscal_reporting_date
            );
        }
    }

    #[test]
    fn valuation_fields_convert_with_the_row_rate() {
        let input = eur_input();
        let rows = transform_all(
            &input,
            &profile(&input),
            &eur_rates(),
            &Currency::NORMALIZATION_TARGETS,
        )
        .unwrap();
        assert_eq!(rows[1].valuation.post_money_valuation, Some(dec!(22000000.00)));
        assert_eq!(rows[1].valuation.equity_raised, Some(dec!(5500000.00)));
    }

    #[test]
    fn missing_rate_fails_the_whole_unit() {
        let input = eur_input();
        let mut rates = RateSet::new(Currency::EUR);
        rates.insert(Currency::USD, dec!(1.10));
        // CAD rate missing
        let result = transform_all(
            &input,
            &profile(&input),
            &rates,
            &Currency::NORMALIZATION_TARGETS,
        );
        assert!(matches!(result, Err(EngineError::RateUnavailable(_))));
    }

    #[test]
    fn usd_local_company_gets_identity_usd_row() {
        let mut input = eur_input();
        input.currency = Currency::USD;
        let mut rates = RateSet::new(Currency::USD);
        rates.insert(Currency::CAD, dec!(1.35));
        let rows = transform_all(
            &input,
            &profile(&input),
            &rates,
            &Currency::NORMALIZATION_TARGETS,
        )
        .unwrap();
        // Local row doubles as the USD row; only CAD is converted.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].financials.currency, Currency::USD);
        assert_eq!(rows[1].financials.currency, Currency::CAD);
    }

    #[test]
    fn invalid_input_is_rejected_before_conversion() {
        let mut input = eur_input();
        input.total_revenue = dec!(-5);
        let result = transform_all(
            &input,
            &profile(&input),
            &eur_rates(),
            &Currency::NORMALIZATION_TARGETS,
        );
        assert!(matches!(result, Err(EngineError::Validation(_))));
    }
}
