use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid meal: {0}")]
    InvalidMeal(String),

    #[error("unable to parse the recipe for \"{name}\": {reason}")]
    Recipe { name: String, reason: String },

    #[error("could not find a valid recommendation: ran out of meals on {}", crate::format_date(.0))]
    OutOfMeals(NaiveDate),

    #[error("{0}")]
    Usage(String),

    #[error("diary file \"{}\": {}", .path.display(), .reason)]
    Diary { path: PathBuf, reason: String },

    #[error("rule contract violated: {0}")]
    RuleContract(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when no meal satisfied the active rules for some date.
    pub fn is_out_of_meals(&self) -> bool {
        matches!(self, Error::OutOfMeals(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Usage(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Usage(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! invalid_meal {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::InvalidMeal(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::InvalidMeal(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage() -> Result<()> {
        let date = "2024-01-01";
        bail!("{date} is already in the meal diary");
    }

    #[test]
    fn test_bail_returns_usage_error() {
        let err = usage().unwrap_err();
        assert!(matches!(err, Error::Usage(_)));
        assert_eq!(err.to_string(), "2024-01-01 is already in the meal diary");
    }

    #[test]
    fn test_out_of_meals_message() {
        let err = Error::OutOfMeals(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert!(err.is_out_of_meals());
        assert_eq!(
            err.to_string(),
            "could not find a valid recommendation: ran out of meals on 2024-01-03"
        );
    }
}
