//! Birth/survival rules and the `B…/S…` rulestring notation.
//!
//! `B3/S23` is Conway's Life: birth on exactly 3 neighbours, survival on 2 or
//! 3. Sections may appear in either order and are case-insensitive. Counts are
//! one digit each (`S23`) or comma separated when a neighbourhood is larger
//! than 9 (`B5,6,7/S5,6,10`). An empty section (`B/S`) is valid.

use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::error::RuleParseError;

/// Birth and survival neighbour counts, in the order supplied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSpec {
    /// Counts that spawn a cell into an empty address.
    pub birth: Vec<usize>,
    /// Counts that keep a living cell alive.
    pub survival: Vec<usize>,
}

impl RuleSpec {
    /// Conway's Life, `B3/S23`.
    pub fn life() -> Self {
        Self { birth: alloc::vec![3], survival: alloc::vec![2, 3] }
    }
}

fn parse_counts(body: &str) -> Result<Vec<usize>, RuleParseError> {
    if body.contains(',') {
        body.split(',')
            .map(|part| {
                part.trim()
                    .parse::<usize>()
                    .map_err(|_| RuleParseError::InvalidCount(String::from(part)))
            })
            .collect()
    } else {
        body.chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|d| d as usize)
                    .ok_or_else(|| RuleParseError::InvalidCount(c.into()))
            })
            .collect()
    }
}

impl FromStr for RuleSpec {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut birth = None;
        let mut survival = None;
        for section in s.trim().split('/') {
            let section = section.trim();
            let mut chars = section.chars();
            let target = match chars.next() {
                Some('B') | Some('b') => &mut birth,
                Some('S') | Some('s') => &mut survival,
                _ => return Err(RuleParseError::UnexpectedSection(String::from(section))),
            };
            if target.is_some() {
                return Err(RuleParseError::UnexpectedSection(String::from(section)));
            }
            *target = Some(parse_counts(chars.as_str())?);
        }
        Ok(Self {
            birth: birth.ok_or_else(|| RuleParseError::MissingBirth(String::from(s)))?,
            survival: survival.ok_or_else(|| RuleParseError::MissingSurvival(String::from(s)))?,
        })
    }
}

impl core::fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn write_counts(
            f: &mut core::fmt::Formatter<'_>,
            counts: &[usize],
        ) -> core::fmt::Result {
            let sorted: BTreeSet<usize> = counts.iter().copied().collect();
            let wide = sorted.iter().any(|&c| c > 9);
            for (i, c) in sorted.iter().enumerate() {
                if wide && i > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{c}")?;
            }
            Ok(())
        }
        f.write_str("B")?;
        write_counts(f, &self.birth)?;
        f.write_str("/S")?;
        write_counts(f, &self.survival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    #[test]
    fn test_parse_life() {
        let rule: RuleSpec = "B3/S23".parse().unwrap();
        assert_eq!(rule, RuleSpec::life());
    }

    #[test]
    fn test_parse_order_and_case_insensitive() {
        let rule: RuleSpec = "s23/b36".parse().unwrap();
        assert_eq!(rule.birth, vec![3, 6]);
        assert_eq!(rule.survival, vec![2, 3]);
    }

    #[test]
    fn test_parse_comma_counts() {
        let rule: RuleSpec = "B5,6,7/S5, 6,10".parse().unwrap();
        assert_eq!(rule.birth, vec![5, 6, 7]);
        assert_eq!(rule.survival, vec![5, 6, 10]);
    }

    #[test]
    fn test_parse_empty_sections() {
        let rule: RuleSpec = "B/S".parse().unwrap();
        assert!(rule.birth.is_empty());
        assert!(rule.survival.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "B3".parse::<RuleSpec>(),
            Err(RuleParseError::MissingSurvival("B3".to_string()))
        );
        assert_eq!(
            "S23".parse::<RuleSpec>(),
            Err(RuleParseError::MissingBirth("S23".to_string()))
        );
        assert_eq!(
            "B3/S2x".parse::<RuleSpec>(),
            Err(RuleParseError::InvalidCount("x".to_string()))
        );
        assert_eq!(
            "B3/S23/C2".parse::<RuleSpec>(),
            Err(RuleParseError::UnexpectedSection("C2".to_string()))
        );
        assert_eq!(
            "B3/B4/S23".parse::<RuleSpec>(),
            Err(RuleParseError::UnexpectedSection("B4".to_string()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(RuleSpec::life().to_string(), "B3/S23");
        let wide = RuleSpec { birth: vec![6, 5], survival: vec![10, 4] };
        assert_eq!(wide.to_string(), "B56/S4,10");
        let parsed: RuleSpec = wide.to_string().parse().unwrap();
        assert_eq!(parsed.birth, vec![5, 6]);
        assert_eq!(parsed.survival, vec![4, 10]);
    }
}
