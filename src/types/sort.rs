use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort field: {0}")]
pub struct SortFieldError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The `ascending` query parameter is true only for the literal "y",
    /// case-insensitively. "yes", "true", "" and everything else sort
    /// descending.
    pub fn from_ascending_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("y") {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Sort keys accepted by the country list endpoint.
///
/// `Medals` is derived rather than stored: the store returns table order and
/// the aggregator re-sorts by medal count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountrySortField {
    Name,
    Gdp,
    Population,
    Medals,
}

impl FromStr for CountrySortField {
    type Err = SortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(CountrySortField::Name),
            "gdp" => Ok(CountrySortField::Gdp),
            "population" => Ok(CountrySortField::Population),
            "medals" => Ok(CountrySortField::Medals),
            other => Err(SortFieldError(other.to_string())),
        }
    }
}

/// Sort keys accepted by the medal list endpoints. Each variant maps to a
/// fixed column name, so no caller-supplied string ever reaches SQL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MedalSortField {
    Year,
    City,
    Season,
    Athlete,
    Country,
    Gender,
    Sport,
    Discipline,
    Event,
}

impl MedalSortField {
    pub fn column(&self) -> &'static str {
        match self {
            MedalSortField::Year => "year",
            MedalSortField::City => "city",
            MedalSortField::Season => "season",
            MedalSortField::Athlete => "athlete",
            MedalSortField::Country => "country",
            MedalSortField::Gender => "gender",
            MedalSortField::Sport => "sport",
            MedalSortField::Discipline => "discipline",
            MedalSortField::Event => "event",
        }
    }
}

impl FromStr for MedalSortField {
    type Err = SortFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(MedalSortField::Year),
            "city" => Ok(MedalSortField::City),
            "season" => Ok(MedalSortField::Season),
            "athlete" => Ok(MedalSortField::Athlete),
            "country" => Ok(MedalSortField::Country),
            "gender" => Ok(MedalSortField::Gender),
            "sport" => Ok(MedalSortField::Sport),
            "discipline" => Ok(MedalSortField::Discipline),
            "event" => Ok(MedalSortField::Event),
            other => Err(SortFieldError(other.to_string())),
        }
    }
}
