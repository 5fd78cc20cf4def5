mod common;

use common::TestDb;
use quran_core::{
    CalculationMethod, Coordinates, JuristicSchool, PrayerLocation, Reciter, Translation,
};
use quran_storage::preferences::{PREF_CALC_METHOD, PREF_RECITER};
use quran_storage::{settings, Preferences, Theme};
use serde_json::json;

async fn open() -> (TestDb, Preferences) {
    let db = TestDb::new().await;
    let prefs = Preferences::new(db.pool.clone());
    (db, prefs)
}

#[tokio::test]
async fn test_defaults() {
    let (_db, prefs) = open().await;

    assert_eq!(prefs.reciter().await.unwrap(), Reciter::Alafasy);
    assert_eq!(prefs.translation().await.unwrap(), Translation::EnglishSahih);
    assert_eq!(prefs.calculation_method().await.unwrap(), CalculationMethod::Isna);
    assert_eq!(prefs.juristic_school().await.unwrap(), JuristicSchool::Shafii);
    assert_eq!(prefs.location().await.unwrap(), None);
    assert_eq!(prefs.theme().await.unwrap(), Theme::System);
    assert_eq!(prefs.verse_repeat().await.unwrap(), 1);
    assert_eq!(prefs.range_repeat().await.unwrap(), 1);
}

#[tokio::test]
async fn test_round_trip() {
    let (_db, prefs) = open().await;

    prefs.set_reciter(Reciter::Minshawi).await.unwrap();
    prefs
        .set_translation(&Translation::Other("sq.ahmeti".into()))
        .await
        .unwrap();
    prefs
        .set_calculation_method(CalculationMethod::UmmAlQura)
        .await
        .unwrap();
    prefs.set_juristic_school(JuristicSchool::Hanafi).await.unwrap();
    prefs.set_theme(Theme::Dark).await.unwrap();
    prefs.set_verse_repeat(0).await.unwrap();

    assert_eq!(prefs.reciter().await.unwrap(), Reciter::Minshawi);
    assert_eq!(prefs.translation().await.unwrap().code(), "sq.ahmeti");
    assert_eq!(
        prefs.calculation_method().await.unwrap(),
        CalculationMethod::UmmAlQura
    );
    assert_eq!(prefs.juristic_school().await.unwrap(), JuristicSchool::Hanafi);
    assert_eq!(prefs.theme().await.unwrap(), Theme::Dark);
    assert_eq!(prefs.verse_repeat().await.unwrap(), 0);
}

#[tokio::test]
async fn test_location() {
    let (_db, prefs) = open().await;

    let coords = PrayerLocation::Coordinates(Coordinates::new(21.4225, 39.8262).unwrap());
    prefs.set_location(&coords).await.unwrap();
    assert_eq!(prefs.location().await.unwrap(), Some(coords));

    let address = PrayerLocation::Address("Istanbul".into());
    prefs.set_location(&address).await.unwrap();
    assert_eq!(prefs.location().await.unwrap(), Some(address));

    assert!(prefs.clear_location().await.unwrap());
    assert!(!prefs.clear_location().await.unwrap());
    assert_eq!(prefs.location().await.unwrap(), None);
}

#[tokio::test]
async fn test_values_stored_as_codes() {
    let (db, prefs) = open().await;

    prefs.set_reciter(Reciter::Husary).await.unwrap();
    prefs
        .set_calculation_method(CalculationMethod::Karachi)
        .await
        .unwrap();

    assert_eq!(
        settings::get_setting(db.pool(), PREF_RECITER).await.unwrap(),
        Some(json!("ar.husary"))
    );
    assert_eq!(
        settings::get_setting(db.pool(), PREF_CALC_METHOD).await.unwrap(),
        Some(json!(1))
    );
}

#[tokio::test]
async fn test_unknown_stored_values_fall_back_to_defaults() {
    let (db, prefs) = open().await;

    settings::set_setting(db.pool(), PREF_RECITER, &json!("ar.nobody")).await.unwrap();
    settings::set_setting(db.pool(), PREF_CALC_METHOD, &json!(99)).await.unwrap();

    assert_eq!(prefs.reciter().await.unwrap(), Reciter::Alafasy);
    assert_eq!(prefs.calculation_method().await.unwrap(), CalculationMethod::Isna);
}

#[tokio::test]
async fn test_range_repeat_is_at_least_one() {
    let (_db, prefs) = open().await;

    prefs.set_range_repeat(0).await.unwrap();
    assert_eq!(prefs.range_repeat().await.unwrap(), 1);

    prefs.set_range_repeat(3).await.unwrap();
    assert_eq!(prefs.range_repeat().await.unwrap(), 3);
}
