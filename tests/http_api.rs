//! End-to-end checks over the HTTP surface backed by a real SQLite file.

use std::time::SystemTime;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use goldmedal::rest::{router, AppState};
use goldmedal::storage::{NewCountry, NewMedal, SqliteStorage, Storage, StorageTx, StorageWrite};
use goldmedal::types::{Gender, Season};

fn medal(country: &str, year: i64, season: Season, gender: Gender) -> NewMedal {
    NewMedal {
        year,
        city: "Testville".to_string(),
        season,
        athlete: "Athlete".to_string(),
        country: country.to_string(),
        gender,
        sport: "Athletics".to_string(),
        discipline: "Athletics".to_string(),
        event: "100m".to_string(),
    }
}

fn seeded_storage() -> (TempDir, SqliteStorage) {
    let dir = TempDir::new().unwrap();
    let storage = SqliteStorage::new(dir.path().join("goldmedal.sqlite"));
    storage.init().unwrap();

    let tx = storage.begin_tx().unwrap();
    tx.insert_countries(&[
        NewCountry {
            name: "United States".to_string(),
            gdp: Some(20000.0),
            population: Some(300),
        },
        NewCountry {
            name: "Kenya".to_string(),
            gdp: Some(100.0),
            population: Some(50),
        },
    ])
    .unwrap();
    tx.insert_medals(&[
        medal("United States", 2008, Season::Summer, Gender::Men),
        medal("United States", 2012, Season::Summer, Gender::Women),
        medal("Kenya", 2008, Season::Summer, Gender::Men),
    ])
    .unwrap();
    tx.commit().unwrap();

    (dir, storage)
}

async fn get_json(storage: SqliteStorage, uri: &str) -> (StatusCode, Value) {
    let app = router(AppState {
        storage,
        started_at: SystemTime::now(),
    });
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn countries_sorted_by_medals_descending() {
    let (_dir, storage) = seeded_storage();
    let (status, body) = get_json(storage, "/countries?sort_by=medals&ascending=n").await;

    assert_eq!(status, StatusCode::OK);
    let countries = body["countries"].as_array().unwrap();
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0]["name"], "United States");
    assert_eq!(countries[0]["medals"], 2);
    assert_eq!(countries[1]["name"], "Kenya");
    assert_eq!(countries[1]["medals"], 1);
}

#[tokio::test]
async fn country_details_compute_reference_statistics() {
    let (_dir, storage) = seeded_storage();
    let (status, body) = get_json(storage, "/countries/united%20states").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "United States");
    assert_eq!(body["gdp"], 20000.0);
    assert_eq!(body["population"], 300);
    assert_eq!(body["numberGoldMedals"], 2);
    assert_eq!(body["numberSummerWins"], 2);
    let pct = body["percentageTotalSummerWins"].as_f64().unwrap();
    assert!((pct - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(body["yearFirstSummerWin"], 2008);
    assert_eq!(body["numberWinterWins"], 0);
    assert_eq!(body["percentageTotalWinterWins"], 0.0);
    assert_eq!(body["yearFirstWinterWin"], 0);
    assert_eq!(body["numberEventsWonByFemaleAthletes"], 1);
    assert_eq!(body["numberEventsWonByMaleAthletes"], 1);
}

#[tokio::test]
async fn unknown_country_is_not_an_error() {
    let (_dir, storage) = seeded_storage();
    let (status, body) = get_json(storage, "/countries/atlantis").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Atlantis");
    assert_eq!(body["numberGoldMedals"], 0);
    assert!(body["gdp"].is_null());
}

#[tokio::test]
async fn medals_list_honors_sort_and_direction() {
    let (_dir, storage) = seeded_storage();
    let (status, body) = get_json(
        storage,
        "/countries/united%20states/medals?sort_by=year&ascending=y",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let medals = body["medals"].as_array().unwrap();
    assert_eq!(medals.len(), 2);
    assert_eq!(medals[0]["year"], 2008);
    assert_eq!(medals[1]["year"], 2012);
    assert_eq!(medals[0]["season"], "Summer");
}

#[tokio::test]
async fn bad_sort_field_is_a_client_error() {
    let (_dir, storage) = seeded_storage();
    let (status, body) = get_json(storage, "/countries?sort_by=drop%20table&ascending=y").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("unknown sort field"));
}
