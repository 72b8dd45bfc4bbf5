use std::{fmt, str::FromStr};

use thiserror::Error;

/// Olympic games category a medal was won in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Season {
    Summer,
    Winter,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "Summer",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown season: {0}")]
pub struct SeasonParseError(pub String);

impl FromStr for Season {
    type Err = SeasonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Summer" => Ok(Season::Summer),
            "Winter" => Ok(Season::Winter),
            other => Err(SeasonParseError(other.to_string())),
        }
    }
}

/// Gender category of the event a medal was awarded for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "Men",
            Gender::Women => "Women",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gender: {0}")]
pub struct GenderParseError(pub String);

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Men" => Ok(Gender::Men),
            "Women" => Ok(Gender::Women),
            other => Err(GenderParseError(other.to_string())),
        }
    }
}

/// A single gold-medal award record.
///
/// `country` is a denormalized country name, not a foreign key; a medal whose
/// country matches no stored country simply never joins.
#[derive(Clone, Debug, PartialEq)]
pub struct GoldMedal {
    pub id: i64,
    pub year: i64,
    pub city: String,
    pub season: Season,
    pub athlete: String,
    pub country: String,
    pub gender: Gender,
    pub sport: String,
    pub discipline: String,
    pub event: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn season_round_trips_through_str() {
        assert_eq!("Summer".parse::<Season>().unwrap(), Season::Summer);
        assert_eq!("Winter".parse::<Season>().unwrap(), Season::Winter);
        assert_eq!(Season::Summer.as_str(), "Summer");
    }

    #[test]
    fn season_rejects_unknown_and_wrong_case() {
        assert!("summer".parse::<Season>().is_err());
        assert!("Spring".parse::<Season>().is_err());
    }

    #[test]
    fn gender_round_trips_through_str() {
        assert_eq!("Men".parse::<Gender>().unwrap(), Gender::Men);
        assert_eq!("Women".parse::<Gender>().unwrap(), Gender::Women);
    }

    #[test]
    fn gender_rejects_unknown() {
        let err = "Mixed".parse::<Gender>().unwrap_err();
        assert_eq!(err, GenderParseError("Mixed".to_string()));
    }
}
