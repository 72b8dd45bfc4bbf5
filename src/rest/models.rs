use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountrySummaryResponse {
    pub name: String,
    pub gdp: Option<f64>,
    pub population: Option<i64>,
    pub medals: usize,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountriesResponse {
    pub countries: Vec<CountrySummaryResponse>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDetailsResponse {
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

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedalResponse {
    pub year: i64,
    pub city: String,
    pub season: String,
    pub athlete: String,
    pub country: String,
    pub gender: String,
    pub sport: String,
    pub discipline: String,
    pub event: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryMedalsListResponse {
    pub medals: Vec<MedalResponse>,
}
