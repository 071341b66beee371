//! Calculation logic for the Payroll Calculation Engine.
//!
//! This module contains one function per statutory rule: gross pay
//! derivation from a salary structure, NSSF tiered contributions, PAYE
//! progressive bands with personal relief, SHIF graduated brackets, and the
//! housing levy. Each returns its figure together with an audit step.

mod gross_pay;
mod housing_levy;
mod nssf;
mod paye;
mod shif;

pub use gross_pay::{derive_gross_pay, GrossPayResult};
pub use housing_levy::{calculate_housing_levy, HousingLevyResult};
pub use nssf::{calculate_nssf, NssfResult};
pub use paye::{apply_paye_bands, calculate_paye, PayeResult};
pub use shif::{calculate_shif, find_shif_bracket, ShifResult};
