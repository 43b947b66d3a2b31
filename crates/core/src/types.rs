use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::CalcError;

/// A toggleable value category with its own inputs and formula.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DriverId {
    Revenue,
    Efficiency,
    Risk,
    Cx,
    Donations,
    Tco,
}

impl DriverId {
    pub fn display_name(self) -> &'static str {
        match self {
            DriverId::Revenue => "Revenue Growth",
            DriverId::Efficiency => "Operational Efficiency",
            DriverId::Risk => "Risk Mitigation",
            DriverId::Cx => "Customer Experience",
            DriverId::Donations => "Donation Volume",
            DriverId::Tco => "Total Cost of Ownership",
        }
    }

    /// Drivers whose benefit is shared with other initiatives and so is
    /// scaled by the attribution factor.
    pub fn is_attributable(self) -> bool {
        matches!(self, DriverId::Revenue | DriverId::Cx)
    }

    /// Donation volume is counted in donations, not money.
    pub fn is_monetary(self) -> bool {
        !matches!(self, DriverId::Donations)
    }
}

/// Number of years benefits and recurring costs are projected over.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Horizon {
    #[default]
    ThreeYears,
    FiveYears,
}

impl Horizon {
    pub fn years(self) -> u32 {
        match self {
            Horizon::ThreeYears => 3,
            Horizon::FiveYears => 5,
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = CalcError;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            3 => Ok(Horizon::ThreeYears),
            5 => Ok(Horizon::FiveYears),
            other => Err(CalcError::invalid(
                "horizon",
                format!("{other} years is not a supported horizon (use 3 or 5)"),
            )),
        }
    }
}

impl From<Horizon> for u32 {
    fn from(h: Horizon) -> Self {
        h.years()
    }
}

/// Parameterization of the customer-experience driver. Each preset picks
/// exactly one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CxFormula {
    /// Bounce factor 0.3, undamped engagement, repeat rate scaled by 0.4.
    FixedRatio,
    /// Explicit bounce/repeat improvement percentages, each lift halved.
    #[default]
    Dampened,
}

/// Which recurring costs count against the investment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CostModel {
    #[default]
    License,
    LicenseAndMaintenance,
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Display, EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    #[serde(alias = "usd")]
    Usd,
    #[serde(alias = "aud")]
    Aud,
    #[serde(alias = "eur")]
    Eur,
    #[serde(alias = "gbp")]
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Aud => "A$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn driver_ids_parse_case_insensitively() {
        assert_eq!(DriverId::from_str("CX").unwrap(), DriverId::Cx);
        assert_eq!(DriverId::from_str("donations").unwrap(), DriverId::Donations);
        assert!(DriverId::from_str("marketing").is_err());
        assert_eq!(DriverId::Tco.to_string(), "tco");
    }

    #[test]
    fn horizon_only_accepts_three_or_five() {
        assert_eq!(Horizon::try_from(5).unwrap().years(), 5);
        assert!(matches!(
            Horizon::try_from(4),
            Err(CalcError::InvalidInput { .. })
        ));
    }

    #[test]
    fn horizon_serializes_as_year_count() {
        let json = serde_json::to_string(&Horizon::FiveYears).unwrap();
        assert_eq!(json, "5");
        assert!(serde_json::from_str::<Horizon>("7").is_err());
    }
}
