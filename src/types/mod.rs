mod country;
mod medal;
mod sort;

pub use country::Country;
pub use medal::{Gender, GenderParseError, GoldMedal, Season, SeasonParseError};
pub use sort::{CountrySortField, MedalSortField, SortDirection, SortFieldError};
