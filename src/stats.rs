//! Derives the three response shapes from raw store rows: per-country medal
//! counts, the full per-country statistical breakdown, and sorted medal lists.

use anyhow::Result;

use crate::storage::StorageRead;
use crate::types::{
    Country, CountrySortField, Gender, GoldMedal, MedalSortField, Season, SortDirection,
};

/// A country plus its total gold-medal count, for the list view.
#[derive(Clone, Debug, PartialEq)]
pub struct CountrySummary {
    pub country: Country,
    pub medals: usize,
}

/// Full statistical breakdown for one country.
///
/// An unknown country yields the echoed name with every statistic at its
/// zero/default value; that is a valid outcome, not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct CountryDetails {
    pub name: String,
    pub gdp: Option<f64>,
    pub population: Option<i64>,
    pub number_gold_medals: usize,
    pub number_summer_wins: usize,
    pub percentage_total_summer_wins: f64,
    pub year_first_summer_win: i64,
    pub number_winter_wins: usize,
    pub percentage_total_winter_wins: f64,
    pub year_first_winter_win: i64,
    pub number_events_won_by_female_athletes: usize,
    pub number_events_won_by_male_athletes: usize,
}

impl CountryDetails {
    fn unknown(name: &str) -> Self {
        Self {
            name: name.to_string(),
            gdp: None,
            population: None,
            number_gold_medals: 0,
            number_summer_wins: 0,
            percentage_total_summer_wins: 0.0,
            year_first_summer_win: 0,
            number_winter_wins: 0,
            percentage_total_winter_wins: 0.0,
            year_first_winter_win: 0,
            number_events_won_by_female_athletes: 0,
            number_events_won_by_male_athletes: 0,
        }
    }
}

struct SeasonStats {
    wins: usize,
    percentage: f64,
    year_first_win: i64,
}

pub fn country_summaries<S: StorageRead>(
    storage: &S,
    sort: CountrySortField,
    direction: SortDirection,
) -> Result<Vec<CountrySummary>> {
    let countries = storage.list_countries(sort, direction)?;

    let mut summaries = Vec::with_capacity(countries.len());
    for country in countries {
        let medals = storage
            .list_medals_by_country(&country.name, MedalSortField::Year, SortDirection::Descending)?
            .len();
        summaries.push(CountrySummary { country, medals });
    }

    // The store cannot order by a derived count. Vec::sort_by is stable, so
    // equal counts keep their store order.
    if sort == CountrySortField::Medals {
        match direction {
            SortDirection::Ascending => summaries.sort_by(|a, b| a.medals.cmp(&b.medals)),
            SortDirection::Descending => summaries.sort_by(|a, b| b.medals.cmp(&a.medals)),
        }
    }

    Ok(summaries)
}

pub fn country_details<S: StorageRead>(storage: &S, name: &str) -> Result<CountryDetails> {
    let Some(country) = storage.find_country_by_name(name)? else {
        return Ok(CountryDetails::unknown(name));
    };

    let number_gold_medals = storage
        .list_medals_by_country(&country.name, MedalSortField::Year, SortDirection::Descending)?
        .len();

    let summer = season_stats(storage, &country.name, Season::Summer)?;
    let winter = season_stats(storage, &country.name, Season::Winter)?;

    let number_events_won_by_female_athletes = storage
        .list_medals_by_gender_and_country(Gender::Women, &country.name)?
        .len();
    let number_events_won_by_male_athletes = storage
        .list_medals_by_gender_and_country(Gender::Men, &country.name)?
        .len();

    Ok(CountryDetails {
        name: country.name,
        gdp: country.gdp,
        population: country.population,
        number_gold_medals,
        number_summer_wins: summer.wins,
        percentage_total_summer_wins: summer.percentage,
        year_first_summer_win: summer.year_first_win,
        number_winter_wins: winter.wins,
        percentage_total_winter_wins: winter.percentage,
        year_first_winter_win: winter.year_first_win,
        number_events_won_by_female_athletes,
        number_events_won_by_male_athletes,
    })
}

fn season_stats<S: StorageRead>(storage: &S, country: &str, season: Season) -> Result<SeasonStats> {
    let season_wins = storage.list_medals_by_country_and_season(country, season)?;
    let wins = season_wins.len();
    let total_events = storage.list_medals_by_season(season)?.len();

    let percentage = if wins != 0 && total_events != 0 {
        wins as f64 / total_events as f64
    } else {
        0.0
    };
    // season wins are year-ascending, so the first row is the earliest win
    let year_first_win = season_wins.first().map(|m| m.year).unwrap_or(0);

    Ok(SeasonStats {
        wins,
        percentage,
        year_first_win,
    })
}

pub fn country_medals<S: StorageRead>(
    storage: &S,
    country: Option<&str>,
    sort: MedalSortField,
    direction: SortDirection,
) -> Result<Vec<GoldMedal>> {
    match country {
        Some(name) => storage.list_medals_by_country(name, sort, direction),
        None => storage.list_medals(sort, direction),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryStorage;

    fn sample_storage() -> MemoryStorage {
        MemoryStorage::default()
            .with_country("United States", Some(20000.0), Some(300))
            .with_country("Kenya", Some(100.0), Some(50))
            .with_medal("United States", 2008, Season::Summer, Gender::Men, "A")
            .with_medal("United States", 2012, Season::Summer, Gender::Women, "B")
            .with_medal("Kenya", 2008, Season::Summer, Gender::Men, "C")
    }

    #[test]
    fn summaries_follow_store_order_for_plain_sort_fields() {
        let storage = sample_storage();
        let summaries =
            country_summaries(&storage, CountrySortField::Name, SortDirection::Ascending).unwrap();
        let names: Vec<_> = summaries.iter().map(|s| s.country.name.as_str()).collect();
        assert_eq!(names, ["Kenya", "United States"]);
        assert_eq!(summaries[0].medals, 1);
        assert_eq!(summaries[1].medals, 2);
    }

    #[test]
    fn medals_sort_orders_by_count_descending() {
        let storage = sample_storage();
        let summaries =
            country_summaries(&storage, CountrySortField::Medals, SortDirection::Descending)
                .unwrap();
        let counts: Vec<_> = summaries
            .iter()
            .map(|s| (s.country.name.as_str(), s.medals))
            .collect();
        assert_eq!(counts, [("United States", 2), ("Kenya", 1)]);
    }

    #[test]
    fn medals_sort_is_stable_on_ties() {
        let storage = MemoryStorage::default()
            .with_country("Alpha", None, None)
            .with_country("Beta", None, None)
            .with_country("Gamma", None, None)
            .with_medal("Alpha", 2000, Season::Summer, Gender::Men, "A")
            .with_medal("Beta", 2004, Season::Summer, Gender::Men, "B")
            .with_medal("Gamma", 2008, Season::Summer, Gender::Women, "C")
            .with_medal("Gamma", 2012, Season::Summer, Gender::Women, "D");

        // Alpha and Beta tie at one medal each; table order has Alpha first
        let descending =
            country_summaries(&storage, CountrySortField::Medals, SortDirection::Descending)
                .unwrap();
        let names: Vec<_> = descending.iter().map(|s| s.country.name.as_str()).collect();
        assert_eq!(names, ["Gamma", "Alpha", "Beta"]);

        let ascending =
            country_summaries(&storage, CountrySortField::Medals, SortDirection::Ascending)
                .unwrap();
        let names: Vec<_> = ascending.iter().map(|s| s.country.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn details_match_reference_example() {
        let storage = sample_storage();
        let details = country_details(&storage, "United States").unwrap();

        assert_eq!(details.name, "United States");
        assert_eq!(details.gdp, Some(20000.0));
        assert_eq!(details.population, Some(300));
        assert_eq!(details.number_gold_medals, 2);
        assert_eq!(details.number_summer_wins, 2);
        assert!((details.percentage_total_summer_wins - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(details.year_first_summer_win, 2008);
        assert_eq!(details.number_winter_wins, 0);
        assert_eq!(details.percentage_total_winter_wins, 0.0);
        assert_eq!(details.year_first_winter_win, 0);
        assert_eq!(details.number_events_won_by_female_athletes, 1);
        assert_eq!(details.number_events_won_by_male_athletes, 1);
    }

    #[test]
    fn details_for_unknown_country_echo_name_with_zeroes() {
        let storage = sample_storage();
        let details = country_details(&storage, "Atlantis").unwrap();

        assert_eq!(details.name, "Atlantis");
        assert_eq!(details.gdp, None);
        assert_eq!(details.population, None);
        assert_eq!(details.number_gold_medals, 0);
        assert_eq!(details.percentage_total_summer_wins, 0.0);
        assert_eq!(details.year_first_summer_win, 0);
        assert_eq!(details.number_events_won_by_male_athletes, 0);
    }

    #[test]
    fn percentage_is_exactly_zero_without_wins() {
        // Winter events exist, but Kenya has none; the ratio must be 0, not
        // a division result.
        let storage = sample_storage().with_medal(
            "United States",
            2010,
            Season::Winter,
            Gender::Men,
            "E",
        );
        let details = country_details(&storage, "Kenya").unwrap();
        assert_eq!(details.number_winter_wins, 0);
        assert_eq!(details.percentage_total_winter_wins, 0.0);
    }

    #[test]
    fn first_win_is_earliest_year() {
        let storage = MemoryStorage::default()
            .with_country("Kenya", None, None)
            .with_medal("Kenya", 2016, Season::Summer, Gender::Women, "A")
            .with_medal("Kenya", 1968, Season::Summer, Gender::Men, "B")
            .with_medal("Kenya", 1988, Season::Summer, Gender::Men, "C");
        let details = country_details(&storage, "Kenya").unwrap();
        assert_eq!(details.year_first_summer_win, 1968);
    }

    #[test]
    fn country_medals_filters_or_returns_all() {
        let storage = sample_storage();

        let kenya = country_medals(
            &storage,
            Some("Kenya"),
            MedalSortField::Year,
            SortDirection::Ascending,
        )
        .unwrap();
        assert_eq!(kenya.len(), 1);
        assert_eq!(kenya[0].country, "Kenya");

        let all = country_medals(&storage, None, MedalSortField::Year, SortDirection::Descending)
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].year, 2012);
    }

    #[test]
    fn orphaned_medals_never_join() {
        // medal references a country that has no row; list view and details
        // simply never see it
        let storage = sample_storage().with_medal(
            "Wakanda",
            2012,
            Season::Summer,
            Gender::Men,
            "Z",
        );
        let summaries =
            country_summaries(&storage, CountrySortField::Name, SortDirection::Ascending).unwrap();
        assert_eq!(summaries.len(), 2);

        // but it still contributes to the season total
        let details = country_details(&storage, "Kenya").unwrap();
        assert!((details.percentage_total_summer_wins - 1.0 / 4.0).abs() < 1e-9);
    }
}
