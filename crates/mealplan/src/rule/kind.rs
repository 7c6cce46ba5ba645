use mealprep_shared::{Error, Result};
use std::str::FromStr;
use std::sync::Arc;
use strum::{AsRefStr, Display, EnumString, VariantArray};

use super::*;

/// Named, unparameterized rules that can be listed in configuration.
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RuleKind {
    ForceRoastOnSunday,
    NotIndianTwiceWithinTenDays,
    NotPastaTwiceWithinFiveDays,
    NotRoastOnNonSunday,
    NotSameMealWithinSevenDays,
    NotSameMeatOnConsecutiveDays,
}

impl RuleKind {
    pub fn all() -> impl Iterator<Item = RuleKind> {
        RuleKind::VARIANTS.iter().copied()
    }

    pub fn from_name(name: &str) -> Result<RuleKind> {
        RuleKind::from_str(name.trim()).map_err(|_| {
            Error::Usage(format!(
                "could not find the rule \"{name}\", expected one of {:?}",
                RuleKind::VARIANTS.iter().map(|k| k.to_string()).collect::<Vec<_>>()
            ))
        })
    }

    pub fn into_rule(self) -> Arc<dyn Rule> {
        match self {
            RuleKind::ForceRoastOnSunday => Arc::new(ForceRoastOnSunday),
            RuleKind::NotIndianTwiceWithinTenDays => Arc::new(NotIndianTwiceWithinTenDays),
            RuleKind::NotPastaTwiceWithinFiveDays => Arc::new(NotPastaTwiceWithinFiveDays),
            RuleKind::NotRoastOnNonSunday => Arc::new(NotRoastOnNonSunday),
            RuleKind::NotSameMealWithinSevenDays => Arc::new(NotSameMealWithinSevenDays),
            RuleKind::NotSameMeatOnConsecutiveDays => Arc::new(NotSameMeatOnConsecutiveDays),
        }
    }
}
