//! Configuration types for statutory payroll rates.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, together with the
//! validation that rejects malformed band and bracket tables.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata about the jurisdiction whose statutory rules are configured.
#[derive(Debug, Clone, Deserialize)]
pub struct JurisdictionMetadata {
    /// Short jurisdiction code (e.g., "KE").
    pub code: String,
    /// The human-readable name of the jurisdiction.
    pub name: String,
    /// ISO 4217 currency code all amounts are expressed in.
    pub currency: String,
    /// URL to the revenue authority's published rates.
    pub source_url: String,
}

/// The upper limit of a PAYE band or SHIF bracket.
///
/// In YAML a limit is either a number or the keyword `remainder`, which
/// matches everything not consumed by the preceding entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimit", into = "RawLimit")]
pub enum BandLimit {
    /// An explicit amount.
    UpTo(Decimal),
    /// Catch-all for anything above the previous entries.
    Remainder,
}

const REMAINDER_KEYWORD: &str = "remainder";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Amount(Decimal),
    Keyword(String),
}

impl TryFrom<RawLimit> for BandLimit {
    type Error = String;

    fn try_from(raw: RawLimit) -> Result<Self, Self::Error> {
        match raw {
            RawLimit::Amount(amount) => Ok(BandLimit::UpTo(amount)),
            RawLimit::Keyword(word) if word == REMAINDER_KEYWORD => Ok(BandLimit::Remainder),
            RawLimit::Keyword(word) => Err(format!(
                "expected an amount or '{}', found '{}'",
                REMAINDER_KEYWORD, word
            )),
        }
    }
}

impl From<BandLimit> for RawLimit {
    fn from(limit: BandLimit) -> Self {
        match limit {
            BandLimit::UpTo(amount) => RawLimit::Amount(amount),
            BandLimit::Remainder => RawLimit::Keyword(REMAINDER_KEYWORD.to_string()),
        }
    }
}

/// A single PAYE band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeBand {
    /// The amount of taxable income consumed by this band.
    pub limit: BandLimit,
    /// The marginal rate applied within this band (e.g., 0.25 for 25%).
    pub rate: Decimal,
}

/// PAYE configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeConfig {
    /// Ordered bands, terminated by a remainder band.
    pub bands: Vec<PayeBand>,
    /// Monthly personal relief deducted from the computed tax.
    pub personal_relief: Decimal,
}

/// NSSF two-tier contribution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NssfConfig {
    /// Upper limit of Tier I pensionable pay.
    pub tier_one_cap: Decimal,
    /// Upper limit of Tier II pensionable pay.
    pub tier_two_cap: Decimal,
    /// Contribution rate on Tier I pensionable pay.
    pub tier_one_rate: Decimal,
    /// Contribution rate on Tier II pensionable pay.
    pub tier_two_rate: Decimal,
}

/// A single SHIF bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShifBracket {
    /// Highest gross pay (inclusive) this bracket applies to.
    pub upper_bound: BandLimit,
    /// Flat contribution charged within this bracket.
    pub amount: Decimal,
}

/// SHIF graduated bracket table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShifConfig {
    /// Ordered brackets, terminated by a remainder bracket.
    pub brackets: Vec<ShifBracket>,
}

/// Housing levy configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingLevyConfig {
    /// Share of gross pay charged (e.g., 0.015 for 1.5%).
    pub rate: Decimal,
}

/// All statutory rates effective from a given date.
///
/// Each rate file under `rates/` deserializes into one of these. A table is
/// only usable after [`StatutoryRates::validate`] succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// The date from which these rates apply.
    pub effective_date: NaiveDate,
    /// Version label of the rate table (e.g., "2024-12-27").
    pub version: String,
    /// PAYE bands and personal relief.
    pub paye: PayeConfig,
    /// NSSF tiers.
    pub nssf: NssfConfig,
    /// SHIF brackets.
    pub shif: ShifConfig,
    /// Housing levy rate.
    pub housing_levy: HousingLevyConfig,
}

impl StatutoryRates {
    /// Checks that every table is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigurationError`] if:
    /// - a band or bracket table is empty or does not end with exactly one
    ///   remainder entry
    /// - an explicit band limit is not positive
    /// - SHIF upper bounds are not strictly ascending
    /// - any rate lies outside `0..=1` or any amount is negative
    /// - the NSSF Tier II cap is below the Tier I cap
    pub fn validate(&self) -> EngineResult<()> {
        self.validate_paye()?;
        self.validate_nssf()?;
        self.validate_shif()?;
        check_rate("housing_levy.rate", self.housing_levy.rate)?;
        Ok(())
    }

    fn validate_paye(&self) -> EngineResult<()> {
        let limits: Vec<BandLimit> = self.paye.bands.iter().map(|b| b.limit).collect();
        check_terminal_remainder("paye.bands", &limits)?;

        for (index, band) in self.paye.bands.iter().enumerate() {
            if let BandLimit::UpTo(limit) = band.limit {
                if limit <= Decimal::ZERO {
                    return Err(config_error(format!(
                        "paye.bands[{}].limit must be positive, found {}",
                        index, limit
                    )));
                }
            }
            check_rate(&format!("paye.bands[{}].rate", index), band.rate)?;
        }

        check_non_negative("paye.personal_relief", self.paye.personal_relief)
    }

    fn validate_nssf(&self) -> EngineResult<()> {
        let nssf = &self.nssf;
        check_non_negative("nssf.tier_one_cap", nssf.tier_one_cap)?;
        check_non_negative("nssf.tier_two_cap", nssf.tier_two_cap)?;
        if nssf.tier_two_cap < nssf.tier_one_cap {
            return Err(config_error(format!(
                "nssf.tier_two_cap ({}) must not be below nssf.tier_one_cap ({})",
                nssf.tier_two_cap, nssf.tier_one_cap
            )));
        }
        check_rate("nssf.tier_one_rate", nssf.tier_one_rate)?;
        check_rate("nssf.tier_two_rate", nssf.tier_two_rate)
    }

    fn validate_shif(&self) -> EngineResult<()> {
        let bounds: Vec<BandLimit> = self.shif.brackets.iter().map(|b| b.upper_bound).collect();
        check_terminal_remainder("shif.brackets", &bounds)?;

        let mut previous: Option<Decimal> = None;
        for (index, bracket) in self.shif.brackets.iter().enumerate() {
            check_non_negative(&format!("shif.brackets[{}].amount", index), bracket.amount)?;
            if let BandLimit::UpTo(bound) = bracket.upper_bound {
                if previous.is_some_and(|p| bound <= p) {
                    return Err(config_error(format!(
                        "shif.brackets[{}].upper_bound ({}) must exceed the previous bound",
                        index, bound
                    )));
                }
                previous = Some(bound);
            }
        }
        Ok(())
    }
}

fn config_error(message: String) -> EngineError {
    EngineError::ConfigurationError { message }
}

fn check_terminal_remainder(table: &str, limits: &[BandLimit]) -> EngineResult<()> {
    match limits.last() {
        None => Err(config_error(format!("{} must not be empty", table))),
        Some(BandLimit::UpTo(_)) => Err(config_error(format!(
            "{} must end with a remainder entry",
            table
        ))),
        Some(BandLimit::Remainder) => {
            let remainders = limits.iter().filter(|l| **l == BandLimit::Remainder).count();
            if remainders > 1 {
                Err(config_error(format!(
                    "{} may contain only one remainder entry",
                    table
                )))
            } else {
                Ok(())
            }
        }
    }
}

fn check_rate(field: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(config_error(format!(
            "{} must be between 0 and 1, found {}",
            field, rate
        )));
    }
    Ok(())
}

fn check_non_negative(field: &str, amount: Decimal) -> EngineResult<()> {
    if amount < Decimal::ZERO {
        return Err(config_error(format!(
            "{} must not be negative, found {}",
            field, amount
        )));
    }
    Ok(())
}

/// The complete statutory configuration loaded from YAML files.
///
/// Aggregates the jurisdiction metadata and every rate table found in the
/// configuration directory.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    /// Jurisdiction metadata.
    metadata: JurisdictionMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rates: Vec<StatutoryRates>,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(metadata: JurisdictionMetadata, rates: Vec<StatutoryRates>) -> Self {
        let mut sorted_rates = rates;
        sorted_rates.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rates: sorted_rates,
        }
    }

    /// Returns the jurisdiction metadata.
    pub fn jurisdiction(&self) -> &JurisdictionMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rates(&self) -> &[StatutoryRates] {
        &self.rates
    }

    /// Returns the rate table in force on `date`.
    pub fn rates_on(&self, date: NaiveDate) -> Option<&StatutoryRates> {
        self.rates.iter().rev().find(|r| r.effective_date <= date)
    }

    /// Returns the most recent rate table.
    pub fn latest_rates(&self) -> Option<&StatutoryRates> {
        self.rates.last()
    }
}
