//! Property tests for the payroll pipeline.
//!
//! Amounts are generated in whole cents so every generated input is a
//! realistic payslip figure.

use std::sync::LazyLock;

use proptest::prelude::*;
use rust_decimal::Decimal;

use payroll_engine::config::ConfigLoader;
use payroll_engine::engine::PayrollEngine;
use payroll_engine::models::{Allowance, Benefit, BenefitType};

static ENGINE: LazyLock<PayrollEngine> = LazyLock::new(|| {
    let rates = ConfigLoader::load("./config/kenya")
        .expect("Failed to load config")
        .latest_rates()
        .expect("No rate tables")
        .clone();
    PayrollEngine::new(rates).expect("Invalid rate table")
});

/// Up to KES 500,000.00 in cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..=50_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_allowance() -> impl Strategy<Value = Allowance> {
    ("[A-Z][a-z]{2,10}", arb_amount(), any::<bool>()).prop_map(|(name, amount, taxable)| {
        Allowance {
            name,
            amount,
            taxable,
        }
    })
}

fn arb_benefit(taxable: bool) -> impl Strategy<Value = Benefit> {
    ("[A-Z][a-z]{2,10}", arb_amount(), any::<bool>()).prop_map(move |(name, amount, cash)| {
        Benefit {
            name,
            amount,
            taxable,
            benefit_type: if cash {
                BenefitType::Cash
            } else {
                BenefitType::NonCash
            },
        }
    })
}

proptest! {
    #[test]
    fn net_plus_deductions_equals_gross(gross in arb_amount()) {
        let result = ENGINE.calculate_from_gross(gross, None).unwrap();
        prop_assert_eq!(result.net_salary + result.total_deductions, result.gross_pay);
        prop_assert_eq!(
            result.total_deductions,
            result.paye + result.nssf_employee + result.shif + result.housing_levy
        );
    }

    #[test]
    fn paye_is_never_negative(gross in arb_amount()) {
        let result = ENGINE.calculate_from_gross(gross, None).unwrap();
        prop_assert!(result.paye >= Decimal::ZERO);
    }

    #[test]
    fn employer_nssf_matches_employee(gross in arb_amount()) {
        let result = ENGINE.calculate_from_gross(gross, None).unwrap();
        prop_assert_eq!(result.nssf_employee, result.nssf_employer);
        prop_assert!(result.nssf_employee <= Decimal::from(2160));
    }

    #[test]
    fn shif_stays_within_table(gross in arb_amount()) {
        let result = ENGINE.calculate_from_gross(gross, None).unwrap();
        prop_assert!(result.shif >= Decimal::ZERO);
        prop_assert!(result.shif <= Decimal::from(1800));
    }

    #[test]
    fn gross_is_monotone_in_basic(basic in arb_amount(), extra in arb_amount()) {
        let lower = ENGINE.calculate(basic, &[], &[]).unwrap();
        let higher = ENGINE.calculate(basic + extra, &[], &[]).unwrap();
        prop_assert!(higher.gross_pay >= lower.gross_pay);
    }

    #[test]
    fn gross_is_monotone_in_taxable_items(
        basic in arb_amount(),
        allowance in arb_allowance(),
        benefit in arb_benefit(true),
    ) {
        let base = ENGINE.calculate(basic, &[], &[]).unwrap();
        let with_items = ENGINE
            .calculate(basic, &[allowance], &[benefit])
            .unwrap();
        prop_assert!(with_items.gross_pay >= base.gross_pay);
    }

    #[test]
    fn non_taxable_benefits_only_change_meta(
        basic in arb_amount(),
        allowances in prop::collection::vec(arb_allowance(), 0..4),
        benefits in prop::collection::vec(arb_benefit(false), 1..4),
    ) {
        let mut without = ENGINE.calculate(basic, &allowances, &[]).unwrap();
        let mut with = ENGINE.calculate(basic, &allowances, &benefits).unwrap();

        let with_meta = with.meta.take().unwrap();
        without.meta = None;

        prop_assert_eq!(without, with);
        prop_assert_eq!(with_meta.benefits, benefits);
    }

    #[test]
    fn repeated_calculations_are_identical(
        basic in arb_amount(),
        allowances in prop::collection::vec(arb_allowance(), 0..4),
        benefits in prop::collection::vec(arb_benefit(true), 0..4),
    ) {
        let first = ENGINE.calculate(basic, &allowances, &benefits).unwrap();
        let second = ENGINE.calculate(basic, &allowances, &benefits).unwrap();
        prop_assert_eq!(first, second);
    }
}
