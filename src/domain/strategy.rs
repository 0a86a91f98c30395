//! DCA purchase cadences.

use crate::domain::error::DcaError;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How often a fixed amount is invested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Strategy {
    /// Every strategy, in the order results are reported.
    pub const ALL: [Strategy; 4] = [
        Strategy::Daily,
        Strategy::Weekly,
        Strategy::Monthly,
        Strategy::Yearly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Daily => "daily",
            Strategy::Weekly => "weekly",
            Strategy::Monthly => "monthly",
            Strategy::Yearly => "yearly",
        }
    }

    /// Human-readable label used in result lines, e.g. "DCA monthly".
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Daily => "DCA daily",
            Strategy::Weekly => "DCA weekly",
            Strategy::Monthly => "DCA monthly",
            Strategy::Yearly => "DCA yearly",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Strategy {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Strategy::Daily),
            "weekly" => Ok(Strategy::Weekly),
            "monthly" => Ok(Strategy::Monthly),
            "yearly" => Ok(Strategy::Yearly),
            _ => Err(DcaError::InvalidStrategy {
                name: s.trim().to_string(),
            }),
        }
    }
}

/// Parse a comma-separated strategy list such as `"daily, monthly"`.
///
/// Empty tokens and duplicates are rejected. The result keeps the canonical
/// [`Strategy::ALL`] order regardless of input order.
pub fn parse_strategies(input: &str) -> Result<Vec<Strategy>, DcaError> {
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let strategy: Strategy = token.parse()?;
        if !seen.insert(strategy) {
            return Err(DcaError::InvalidStrategy {
                name: format!("{} (listed twice)", strategy.name()),
            });
        }
    }

    Ok(Strategy::ALL
        .into_iter()
        .filter(|s| seen.contains(s))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_report_format() {
        assert_eq!(Strategy::Daily.label(), "DCA daily");
        assert_eq!(Strategy::Yearly.to_string(), "DCA yearly");
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("Weekly".parse::<Strategy>().unwrap(), Strategy::Weekly);
        assert_eq!(" MONTHLY ".parse::<Strategy>().unwrap(), Strategy::Monthly);
    }

    #[test]
    fn from_str_rejects_unknown() {
        let err = "hourly".parse::<Strategy>().unwrap_err();
        assert!(matches!(err, DcaError::InvalidStrategy { name } if name == "hourly"));
    }

    #[test]
    fn parse_strategies_keeps_canonical_order() {
        let parsed = parse_strategies("yearly,daily").unwrap();
        assert_eq!(parsed, vec![Strategy::Daily, Strategy::Yearly]);
    }

    #[test]
    fn parse_strategies_rejects_empty_token() {
        let err = parse_strategies("daily,,weekly").unwrap_err();
        assert!(matches!(err, DcaError::InvalidStrategy { name } if name.is_empty()));
    }

    #[test]
    fn parse_strategies_rejects_duplicates() {
        assert!(parse_strategies("daily,Daily").is_err());
    }

    #[test]
    fn name_round_trips_through_from_str() {
        for s in Strategy::ALL {
            assert_eq!(s.name().parse::<Strategy>().unwrap(), s);
        }
    }
}
