use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    stats::{self, CountryDetails, CountrySummary},
    storage::Storage,
    types::{CountrySortField, GoldMedal, MedalSortField, SortDirection},
};

use super::{
    models::{
        CountriesResponse, CountryDetailsResponse, CountryMedalsListResponse,
        CountrySummaryResponse, ErrorResponse, HealthResponse, MedalResponse,
    },
    AppState,
};

#[derive(Deserialize)]
pub struct SortParams {
    pub sort_by: String,
    pub ascending: String,
}

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            uptime_secs,
        }),
    )
}

pub async fn get_countries<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Query(params): Query<SortParams>,
) -> impl IntoResponse {
    let sort = match params.sort_by.to_lowercase().parse::<CountrySortField>() {
        Ok(sort) => sort,
        Err(err) => {
            log::warn!("Invalid country sort field {}: {}", params.sort_by, err);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };
    let direction = SortDirection::from_ascending_param(&params.ascending);

    match stats::country_summaries(&state.storage, sort, direction) {
        Ok(summaries) => Json(CountriesResponse {
            countries: summaries.into_iter().map(summary_to_response).collect(),
        })
        .into_response(),
        Err(err) => {
            log::error!("Failed to build country summaries: {:?}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_country_details<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(country): Path<String>,
) -> impl IntoResponse {
    let name = capitalize_fully(&country);

    match stats::country_details(&state.storage, &name) {
        Ok(details) => Json(details_to_response(details)).into_response(),
        Err(err) => {
            log::error!("Failed to build details for {}: {:?}", name, err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn get_country_medals<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(country): Path<String>,
    Query(params): Query<SortParams>,
) -> impl IntoResponse {
    let sort = match params.sort_by.to_lowercase().parse::<MedalSortField>() {
        Ok(sort) => sort,
        Err(err) => {
            log::warn!("Invalid medal sort field {}: {}", params.sort_by, err);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };
    let direction = SortDirection::from_ascending_param(&params.ascending);
    let name = capitalize_fully(&country);

    match stats::country_medals(&state.storage, Some(&name), sort, direction) {
        Ok(medals) => Json(CountryMedalsListResponse {
            medals: medals.into_iter().map(medal_to_response).collect(),
        })
        .into_response(),
        Err(err) => {
            log::error!("Failed to list medals for {}: {:?}", name, err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

fn summary_to_response(summary: CountrySummary) -> CountrySummaryResponse {
    CountrySummaryResponse {
        name: summary.country.name,
        gdp: summary.country.gdp,
        population: summary.country.population,
        medals: summary.medals,
    }
}

fn details_to_response(details: CountryDetails) -> CountryDetailsResponse {
    CountryDetailsResponse {
        name: details.name,
        gdp: details.gdp,
        population: details.population,
        number_gold_medals: details.number_gold_medals,
        number_summer_wins: details.number_summer_wins,
        percentage_total_summer_wins: details.percentage_total_summer_wins,
        year_first_summer_win: details.year_first_summer_win,
        number_winter_wins: details.number_winter_wins,
        percentage_total_winter_wins: details.percentage_total_winter_wins,
        year_first_winter_win: details.year_first_winter_win,
        number_events_won_by_female_athletes: details.number_events_won_by_female_athletes,
        number_events_won_by_male_athletes: details.number_events_won_by_male_athletes,
    }
}

fn medal_to_response(medal: GoldMedal) -> MedalResponse {
    MedalResponse {
        year: medal.year,
        city: medal.city,
        season: medal.season.as_str().to_string(),
        athlete: medal.athlete,
        country: medal.country,
        gender: medal.gender.as_str().to_string(),
        sport: medal.sport,
        discipline: medal.discipline,
        event: medal.event,
    }
}

/// Title-case every whitespace-separated word, lowercasing the rest:
/// "uNited stATES" -> "United States". Idempotent on already-normalized
/// input; non-alphabetic characters pass through untouched.
fn capitalize_fully(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
