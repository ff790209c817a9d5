//! Net-pay breakdown for one pay period.
//!
//! Gross income first loses the mandatory SSNIT contribution, then the
//! remainder is fed through the graduated bands in table order. Each band's
//! `limit` is a *width*: the band consumes up to that much of what is left and
//! taxes it at its marginal rate, with the unbounded top band absorbing the
//! rest.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::calculations::NetPayCalculator;
//! use paye_core::models::RateTable;
//!
//! let rates = RateTable::ghana_default();
//! let slip = NetPayCalculator::new(&rates).calculate(dec!(5000));
//!
//! assert_eq!(slip.mandatory_deduction, dec!(275));
//! assert_eq!(slip.total_tax, dec!(780.25));
//! assert_eq!(slip.net_income, dec!(3944.75));
//! ```

use rust_decimal::Decimal;

use crate::models::{BandLine, PaySlip, RateTable};

/// Calculator for a single period's take-home pay.
///
/// Borrows the table for the duration of a call and retains nothing across
/// calls. Input is not validated here: callers sanitize free-text income to a
/// non-negative figure first, and any `RateTable` that exists has already
/// passed construction-time checks.
#[derive(Debug, Clone)]
pub struct NetPayCalculator<'a> {
    rates: &'a RateTable,
}

impl<'a> NetPayCalculator<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    /// Computes the full breakdown for one period's gross income.
    ///
    /// No rounding happens inside the band loop, so `total_tax` is the exact
    /// sum of the band lines and
    /// `net_income + mandatory_deduction + total_tax == gross_income` holds
    /// exactly.
    pub fn calculate(
        &self,
        gross_income: Decimal,
    ) -> PaySlip {
        let mandatory_deduction = gross_income * self.rates.mandatory_rate;
        let taxable_income = gross_income - mandatory_deduction;

        let mut remaining = taxable_income;
        let mut total_tax = Decimal::ZERO;
        let mut bands = Vec::new();

        for bracket in &self.rates.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxed_amount = match bracket.limit {
                Some(limit) => remaining.min(limit),
                None => remaining,
            };
            let tax = taxed_amount * bracket.rate;

            total_tax += tax;
            bands.push(BandLine {
                label: bracket.label(),
                taxed_amount,
                tax,
            });
            remaining -= taxed_amount;
        }

        PaySlip {
            gross_income,
            mandatory_deduction,
            taxable_income,
            total_tax,
            net_income: taxable_income - total_tax,
            bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;

    /// The exhaustion-order fixture: widths 100, 50, then unbounded.
    fn widths_table() -> RateTable {
        RateTable::new(
            dec!(0),
            vec![
                TaxBracket::bounded(dec!(100), dec!(0)),
                TaxBracket::bounded(dec!(50), dec!(0.1)),
                TaxBracket::unbounded(dec!(0.2)),
            ],
            "test",
            None,
        )
        .unwrap()
    }

    #[test]
    fn zero_income_yields_all_zero_slip() {
        let rates = RateTable::ghana_default();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(0));

        assert_eq!(slip.gross_income, dec!(0));
        assert_eq!(slip.mandatory_deduction, dec!(0.000));
        assert_eq!(slip.taxable_income, dec!(0.000));
        assert_eq!(slip.total_tax, dec!(0));
        assert_eq!(slip.net_income, dec!(0.000));
        assert!(slip.bands.is_empty());
    }

    #[test]
    fn bands_are_consumed_in_table_order() {
        // Taxable 200: 100 at 0%, 50 at 10%, remaining 50 at 20%.
        let rates = widths_table();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(200));

        assert_eq!(
            slip.bands,
            vec![
                BandLine {
                    label: "0%".into(),
                    taxed_amount: dec!(100),
                    tax: dec!(0),
                },
                BandLine {
                    label: "10%".into(),
                    taxed_amount: dec!(50),
                    tax: dec!(5.0),
                },
                BandLine {
                    label: "20%".into(),
                    taxed_amount: dec!(50),
                    tax: dec!(10.0),
                },
            ]
        );
        assert_eq!(slip.total_tax, dec!(15.0));
    }

    #[test]
    fn unreached_bands_emit_no_lines() {
        let rates = widths_table();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(120));

        // 100 in the free band, 20 in the 10% band, top band never reached.
        assert_eq!(slip.bands.len(), 2);
        assert_eq!(slip.bands[1].taxed_amount, dec!(20));
        assert_eq!(slip.total_tax, dec!(2.0));
    }

    #[test]
    fn income_exactly_exhausting_a_band_stops_there() {
        let rates = widths_table();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(100));

        assert_eq!(slip.bands.len(), 1);
        assert_eq!(slip.total_tax, dec!(0));
        assert_eq!(slip.net_income, dec!(100));
    }

    #[test]
    fn ghana_default_scenario_gross_5000() {
        // SSNIT 5.5% of 5000 = 275, taxable 4725.
        // 490 at 0% (0), 110 at 5% (5.50), 130 at 10% (13), 3160 at 17.5%
        // (553), remaining 835 at 25% (208.75). Total 780.25, net 3944.75.
        let rates = RateTable::ghana_default();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(5000));

        assert_eq!(slip.mandatory_deduction, dec!(275.000));
        assert_eq!(slip.taxable_income, dec!(4725.000));
        assert_eq!(slip.total_tax, dec!(780.25000));
        assert_eq!(slip.net_income, dec!(3944.75000));
        assert_eq!(slip.bands.len(), 5);
        assert_eq!(slip.bands[3].tax, dec!(553.000));
        assert_eq!(slip.bands[4].taxed_amount, dec!(835.000));
        assert_eq!(slip.bands[4].tax, dec!(208.75000));
    }

    #[test]
    fn total_tax_is_exact_sum_of_band_lines() {
        let rates = RateTable::ghana_default();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(123456.78));

        let band_sum: Decimal = slip.bands.iter().map(|b| b.tax).sum();
        assert_eq!(slip.total_tax, band_sum);
    }

    #[test]
    fn conservation_holds_exactly_across_a_sweep() {
        let rates = RateTable::ghana_default();
        let calculator = NetPayCalculator::new(&rates);

        for gross in [
            dec!(0),
            dec!(0.01),
            dec!(490),
            dec!(517.46),
            dec!(730),
            dec!(5000),
            dec!(19999.99),
            dec!(70000),
            dec!(1000000),
        ] {
            let slip = calculator.calculate(gross);

            assert_eq!(
                slip.net_income + slip.mandatory_deduction + slip.total_tax,
                gross,
                "conservation failed for gross {gross}",
            );
        }
    }

    #[test]
    fn net_income_never_decreases_as_gross_increases() {
        let rates = RateTable::ghana_default();
        let calculator = NetPayCalculator::new(&rates);

        let mut previous_net = Decimal::MIN;
        let mut gross = Decimal::ZERO;
        while gross <= dec!(100000) {
            let slip = calculator.calculate(gross);

            assert!(
                slip.net_income >= previous_net,
                "net decreased at gross {gross}: {} < {previous_net}",
                slip.net_income,
            );
            previous_net = slip.net_income;
            gross += dec!(250);
        }
    }

    #[test]
    fn everything_lands_in_top_band_for_large_income() {
        let rates = widths_table();

        let slip = NetPayCalculator::new(&rates).calculate(dec!(10150));

        // 100 + 50 consumed, 10000 left for the top band.
        assert_eq!(slip.bands[2].taxed_amount, dec!(10000));
        assert_eq!(slip.bands[2].tax, dec!(2000.0));
    }

    #[test]
    fn calculator_retains_nothing_and_can_be_reused() {
        let rates = RateTable::ghana_default();
        let calculator = NetPayCalculator::new(&rates);

        let first = calculator.calculate(dec!(5000));
        let second = calculator.calculate(dec!(5000));

        assert_eq!(first, second);
    }
}
