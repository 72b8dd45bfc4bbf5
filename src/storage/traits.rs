use crate::types::{
    Country, CountrySortField, Gender, GoldMedal, MedalSortField, Season, SortDirection,
};

/// Country row as handed to the import path, before the store assigns an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCountry {
    pub name: String,
    pub gdp: Option<f64>,
    pub population: Option<i64>,
}

/// Medal row as handed to the import path, before the store assigns an id.
#[derive(Clone, Debug, PartialEq)]
pub struct NewMedal {
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

/// Read-only queries the aggregator and handlers are built on.
///
/// Ordering contract: `list_countries` with `CountrySortField::Medals`
/// returns table order (id ascending) and leaves medal-count ordering to the
/// aggregator; `list_medals_by_country_and_season` returns year-ascending
/// rows so the first row is the earliest win.
pub trait StorageRead {
    fn list_countries(
        &self,
        sort: CountrySortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<Country>>;

    /// Case-sensitive exact match on the stored name.
    fn find_country_by_name(&self, name: &str) -> anyhow::Result<Option<Country>>;

    fn list_medals(
        &self,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>>;

    fn list_medals_by_country(
        &self,
        country: &str,
        sort: MedalSortField,
        direction: SortDirection,
    ) -> anyhow::Result<Vec<GoldMedal>>;

    fn list_medals_by_country_and_season(
        &self,
        country: &str,
        season: Season,
    ) -> anyhow::Result<Vec<GoldMedal>>;

    fn list_medals_by_season(&self, season: Season) -> anyhow::Result<Vec<GoldMedal>>;

    fn list_medals_by_gender_and_country(
        &self,
        gender: Gender,
        country: &str,
    ) -> anyhow::Result<Vec<GoldMedal>>;
}

/// Writes, reachable only from the import command. The HTTP surface never
/// holds a write handle.
pub trait StorageWrite {
    fn insert_countries(&self, rows: &[NewCountry]) -> anyhow::Result<()>;

    fn insert_medals(&self, rows: &[NewMedal]) -> anyhow::Result<()>;
}

pub trait StorageTx: StorageRead + StorageWrite {
    fn commit(self) -> anyhow::Result<()>;
}

pub trait Storage: StorageRead {
    type Tx: StorageTx;

    fn begin_tx(&self) -> anyhow::Result<Self::Tx>;
}
