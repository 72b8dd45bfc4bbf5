use std::{fs, path::Path};

use anyhow::{Context as AnyhowContext, Result};
use serde::Deserialize;

use crate::context;
use crate::storage::{NewCountry, NewMedal, SqliteStorage, Storage, StorageTx, StorageWrite};
use crate::types::{Gender, Season};

#[derive(Deserialize)]
struct Dataset {
    countries: Vec<CountryRecord>,
    medals: Vec<MedalRecord>,
}

#[derive(Deserialize)]
struct CountryRecord {
    name: String,
    gdp: Option<f64>,
    population: Option<i64>,
}

#[derive(Deserialize)]
struct MedalRecord {
    year: i64,
    city: String,
    season: String,
    athlete: String,
    country: String,
    gender: String,
    sport: String,
    discipline: String,
    event: String,
}

impl CountryRecord {
    fn into_row(self) -> NewCountry {
        NewCountry {
            name: self.name,
            gdp: self.gdp,
            population: self.population,
        }
    }
}

impl MedalRecord {
    fn into_row(self) -> Result<NewMedal> {
        let season: Season = self
            .season
            .parse()
            .with_context(|| format!("medal for {} in {}", self.country, self.year))?;
        let gender: Gender = self
            .gender
            .parse()
            .with_context(|| format!("medal for {} in {}", self.country, self.year))?;
        Ok(NewMedal {
            year: self.year,
            city: self.city,
            season,
            athlete: self.athlete,
            country: self.country,
            gender,
            sport: self.sport,
            discipline: self.discipline,
            event: self.event,
        })
    }
}

pub fn run(ctx: &context::Context, file: &Path) -> Result<()> {
    let storage = SqliteStorage::new(ctx.db_path());
    import_dataset(&storage, file)
}

pub fn import_dataset<S: Storage>(storage: &S, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("reading dataset {}", file.display()))?;
    let dataset: Dataset = serde_json::from_str(&raw).context("parsing dataset JSON")?;

    let countries: Vec<NewCountry> = dataset
        .countries
        .into_iter()
        .map(CountryRecord::into_row)
        .collect();
    let medals: Vec<NewMedal> = dataset
        .medals
        .into_iter()
        .map(MedalRecord::into_row)
        .collect::<Result<Vec<_>>>()?;

    let tx = storage.begin_tx().context("opening import transaction")?;
    tx.insert_countries(&countries)?;
    tx.insert_medals(&medals)?;
    tx.commit()?;

    log::info!(
        "📥 Imported {} countries and {} medal records",
        countries.len(),
        medals.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageRead;
    use crate::types::{CountrySortField, MedalSortField, SortDirection};
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "countries": [
            {"name": "United States", "gdp": 20000.0, "population": 300},
            {"name": "Kenya", "gdp": 100.0, "population": 50},
            {"name": "Norway"}
        ],
        "medals": [
            {"year": 2008, "city": "Beijing", "season": "Summer", "athlete": "A",
             "country": "United States", "gender": "Men", "sport": "Athletics",
             "discipline": "Athletics", "event": "100m"},
            {"year": 2012, "city": "London", "season": "Summer", "athlete": "B",
             "country": "Kenya", "gender": "Women", "sport": "Athletics",
             "discipline": "Athletics", "event": "800m"}
        ]
    }"#;

    fn temp_storage() -> (TempDir, SqliteStorage) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new(dir.path().join("goldmedal.sqlite"));
        storage.init().unwrap();
        (dir, storage)
    }

    #[test]
    fn imports_countries_and_medals() {
        let (dir, storage) = temp_storage();
        let dataset = dir.path().join("dataset.json");
        std::fs::write(&dataset, SAMPLE).unwrap();

        import_dataset(&storage, &dataset).unwrap();

        let countries = storage
            .list_countries(CountrySortField::Name, SortDirection::Ascending)
            .unwrap();
        assert_eq!(countries.len(), 3);
        assert_eq!(countries[1].name, "Norway");
        assert_eq!(countries[1].gdp, None);

        let medals = storage
            .list_medals(MedalSortField::Year, SortDirection::Ascending)
            .unwrap();
        assert_eq!(medals.len(), 2);
        assert_eq!(medals[0].city, "Beijing");
    }

    #[test]
    fn rejects_unknown_season() {
        let (dir, storage) = temp_storage();
        let dataset = dir.path().join("dataset.json");
        std::fs::write(
            &dataset,
            r#"{"countries": [], "medals": [
                {"year": 2008, "city": "Beijing", "season": "Autumn", "athlete": "A",
                 "country": "Kenya", "gender": "Men", "sport": "Athletics",
                 "discipline": "Athletics", "event": "100m"}
            ]}"#,
        )
        .unwrap();

        let err = import_dataset(&storage, &dataset).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown season"));
    }

    #[test]
    fn fails_on_missing_file() {
        let (dir, storage) = temp_storage();
        let err = import_dataset(&storage, &dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("reading dataset"));
    }
}
