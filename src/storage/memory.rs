//! In-memory stand-in for the SQLite store, for unit tests only. Mirrors the
//! ordering contract documented on `StorageRead`.

use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;

use super::traits::{NewCountry, NewMedal, Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::{
    Country, CountrySortField, Gender, GoldMedal, MedalSortField, Season, SortDirection,
};

#[derive(Default)]
struct Inner {
    countries: Vec<Country>,
    medals: Vec<GoldMedal>,
}

#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStorage {
    pub fn with_country(self, name: &str, gdp: Option<f64>, population: Option<i64>) -> Self {
        {
            let mut guard = self.inner.write().unwrap();
            let id = guard.countries.len() as i64 + 1;
            guard.countries.push(Country {
                id,
                name: name.to_string(),
                gdp,
                population,
            });
        }
        self
    }

    pub fn with_medal(
        self,
        country: &str,
        year: i64,
        season: Season,
        gender: Gender,
        athlete: &str,
    ) -> Self {
        {
            let mut guard = self.inner.write().unwrap();
            let id = guard.medals.len() as i64 + 1;
            guard.medals.push(GoldMedal {
                id,
                year,
                city: "Testville".to_string(),
                season,
                athlete: athlete.to_string(),
                country: country.to_string(),
                gender,
                sport: "Athletics".to_string(),
                discipline: "Athletics".to_string(),
                event: "100m".to_string(),
            });
        }
        self
    }
}

fn sort_medals(rows: &mut [GoldMedal], sort: MedalSortField, direction: SortDirection) {
    rows.sort_by(|a, b| {
        let ord = match sort {
            MedalSortField::Year => a.year.cmp(&b.year),
            MedalSortField::City => a.city.cmp(&b.city),
            MedalSortField::Season => a.season.as_str().cmp(b.season.as_str()),
            MedalSortField::Athlete => a.athlete.cmp(&b.athlete),
            MedalSortField::Country => a.country.cmp(&b.country),
            MedalSortField::Gender => a.gender.as_str().cmp(b.gender.as_str()),
            MedalSortField::Sport => a.sport.cmp(&b.sport),
            MedalSortField::Discipline => a.discipline.cmp(&b.discipline),
            MedalSortField::Event => a.event.cmp(&b.event),
        };
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

impl StorageRead for MemoryStorage {
    fn list_countries(
        &self,
        sort: CountrySortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<Country>> {
        let guard = self.inner.read().unwrap();
        let mut rows = guard.countries.clone();
        match sort {
            CountrySortField::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
            CountrySortField::Gdp => rows.sort_by(|a, b| {
                a.gdp.partial_cmp(&b.gdp).unwrap_or(Ordering::Equal)
            }),
            CountrySortField::Population => rows.sort_by_key(|c| c.population),
            // table order regardless of direction; see StorageRead contract
            CountrySortField::Medals => {
                rows.sort_by_key(|c| c.id);
                return Ok(rows);
            }
        }
        if direction == SortDirection::Descending {
            rows.reverse();
        }
        Ok(rows)
    }

    fn find_country_by_name(&self, name: &str) -> anyhow::Result<Option<Country>> {
        let guard = self.inner.read().unwrap();
        Ok(guard.countries.iter().find(|c| c.name == name).cloned())
    }

    fn list_medals(
        &self,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        let guard = self.inner.read().unwrap();
        let mut rows = guard.medals.clone();
        sort_medals(&mut rows, sort, direction);
        Ok(rows)
    }

    fn list_medals_by_country(
        &self,
        country: &str,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        let guard = self.inner.read().unwrap();
        let mut rows: Vec<_> = guard
            .medals
            .iter()
            .filter(|m| m.country == country)
            .cloned()
            .collect();
        sort_medals(&mut rows, sort, direction);
        Ok(rows)
    }

    fn list_medals_by_country_and_season(
        &self,
        country: &str,
        season: Season,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        let guard = self.inner.read().unwrap();
        let mut rows: Vec<_> = guard
            .medals
            .iter()
            .filter(|m| m.country == country && m.season == season)
            .cloned()
            .collect();
        rows.sort_by_key(|m| m.year);
        Ok(rows)
    }

    fn list_medals_by_season(&self, season: Season) -> anyhow::Result<Vec<GoldMedal>> {
        let guard = self.inner.read().unwrap();
        Ok(guard
            .medals
            .iter()
            .filter(|m| m.season == season)
            .cloned()
            .collect())
    }

    fn list_medals_by_gender_and_country(
        &self,
        gender: Gender,
        country: &str,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        let guard = self.inner.read().unwrap();
        Ok(guard
            .medals
            .iter()
            .filter(|m| m.gender == gender && m.country == country)
            .cloned()
            .collect())
    }
}

impl Storage for MemoryStorage {
    type Tx = NoopTx;

    fn begin_tx(&self) -> anyhow::Result<Self::Tx> {
        Err(anyhow!("transactions not supported in memory storage"))
    }
}

pub struct NoopTx;

impl StorageRead for NoopTx {
    fn list_countries(
        &self,
        _sort: CountrySortField,
        _direction: SortDirection,
    ) -> anyhow::Result<Vec<Country>> {
        Err(anyhow!("not implemented"))
    }

    fn find_country_by_name(&self, _name: &str) -> anyhow::Result<Option<Country>> {
        Err(anyhow!("not implemented"))
    }

    fn list_medals(
        &self,
        _sort: MedalSortField,
        _direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        Err(anyhow!("not implemented"))
    }

    fn list_medals_by_country(
        &self,
        _country: &str,
        _sort: MedalSortField,
        _direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        Err(anyhow!("not implemented"))
    }

    fn list_medals_by_country_and_season(
        &self,
        _country: &str,
        _season: Season,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        Err(anyhow!("not implemented"))
    }

    fn list_medals_by_season(&self, _season: Season) -> anyhow::Result<Vec<GoldMedal>> {
        Err(anyhow!("not implemented"))
    }

    fn list_medals_by_gender_and_country(
        &self,
        _gender: Gender,
        _country: &str,
    ) -> anyhow::Result<Vec<GoldMedal>> {
        Err(anyhow!("not implemented"))
    }
}

impl StorageWrite for NoopTx {
    fn insert_countries(&self, _rows: &[NewCountry]) -> anyhow::Result<()> {
        Err(anyhow!("not implemented"))
    }

    fn insert_medals(&self, _rows: &[NewMedal]) -> anyhow::Result<()> {
        Err(anyhow!("not implemented"))
    }
}

impl StorageTx for NoopTx {
    fn commit(self) -> anyhow::Result<()> {
        Ok(())
    }
}
