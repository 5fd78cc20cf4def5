//! Command tests against a mock API and a scratch data directory.

mod common;

use chrono::NaiveDate;
use common::*;
use quran_cli::commands::page::PageTarget;
use quran_cli::commands::play::{play_with, PlayOptions};
use quran_cli::commands::prayer::PrayerRequest;
use quran_cli::commands::settings::SettingsAction;
use quran_cli::commands::{bookmarks, page, prayer, qibla, read, settings, surahs};
use quran_cli::CliError;
use quran_core::{
    CalculationMethod, Coordinates, JuristicSchool, PageNumber, PrayerLocation, Reciter,
    SurahNumber, SurahSort, VerseRef,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn surah(n: u16) -> SurahNumber {
    SurahNumber::new(n).unwrap()
}

async fn mount_ikhlas(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/surah/112/quran-uthmani"))
        .respond_with(ok(ikhlas_edition(&IKHLAS_ARABIC)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/surah/112/en.sahih"))
        .respond_with(ok(ikhlas_edition(&IKHLAS_SAHIH)))
        .mount(server)
        .await;
}

// =============================================================================
// Reading
// =============================================================================

mod reading {
    use super::*;

    #[tokio::test]
    async fn test_surah_index_filters() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        Mock::given(method("GET"))
            .and(path("/surah"))
            .respond_with(ok(json!([
                {
                    "number": 1,
                    "name": "سُورَةُ ٱلْفَاتِحَةِ",
                    "englishName": "Al-Faatiha",
                    "englishNameTranslation": "The Opening",
                    "revelationType": "Meccan",
                    "numberOfAyahs": 7
                },
                ikhlas_summary()
            ])))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        surahs::run(&state, "sincer", SurahSort::Number, &mut out)
            .await
            .unwrap();
        let text = output_text(out);
        assert!(text.starts_with("112. Al-Ikhlaas"));
        assert!(!text.contains("Al-Faatiha"));

        let mut out = Vec::new();
        surahs::run(&state, "nothing like this", SurahSort::Number, &mut out)
            .await
            .unwrap();
        assert!(output_text(out).starts_with("No surah matches"));
    }

    #[tokio::test]
    async fn test_read_strips_basmalah_into_header() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;
        mount_ikhlas(&server).await;

        let mut out = Vec::new();
        read::run(&state, surah(112), None, None, None, &mut out)
            .await
            .unwrap();
        let text = output_text(out);

        assert!(text.contains("Al-Ikhlaas (Sincerity)"));
        assert!(text.contains("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ\n"));
        assert!(text.contains("[1] قُلْ هُوَ ٱللَّهُ أَحَدٌ\n"));
        assert!(text.contains("      Allah, the Eternal Refuge.\n"));
    }

    #[tokio::test]
    async fn test_read_range_skips_header() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;
        mount_ikhlas(&server).await;

        let mut out = Vec::new();
        read::run(&state, surah(112), Some(3), Some(4), None, &mut out)
            .await
            .unwrap();
        let text = output_text(out);

        assert!(!text.contains("[1]"));
        assert!(!text.contains("[2]"));
        assert!(text.contains("[3] لَمْ يَلِدْ وَلَمْ يُولَدْ"));
        assert!(!text.contains("ٱلرَّحِيمِ\n"));
    }

    #[tokio::test]
    async fn test_read_rejects_range_outside_surah() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let mut out = Vec::new();
        let err = read::run(&state, surah(112), Some(2), Some(9), None, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Playback(_)));
    }

    #[tokio::test]
    async fn test_page_shows_surah_headers() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let ayah = |n: u16, text: &str| {
            json!({
                "number": 6221 + n,
                "text": text,
                "numberInSurah": n,
                "page": 604,
                "surah": ikhlas_summary()
            })
        };
        Mock::given(method("GET"))
            .and(path("/page/604/quran-uthmani"))
            .respond_with(ok(json!({
                "number": 604,
                "ayahs": [ayah(1, IKHLAS_ARABIC[0]), ayah(2, IKHLAS_ARABIC[1])]
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let target = PageTarget::Page(PageNumber::new(604).unwrap());
        page::run(&state, target, &mut out).await.unwrap();
        let text = output_text(out);

        assert!(text.starts_with("Page 604 of 604\n"));
        assert_eq!(text.matches("Al-Ikhlaas").count(), 1);
        assert!(text.contains("قُلْ هُوَ ٱللَّهُ أَحَدٌ ﴿1﴾"));
        assert!(text.contains("ٱللَّهُ ٱلصَّمَدُ ﴿2﴾"));
    }

    #[tokio::test]
    async fn test_server_error_has_retry_hint() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        Mock::given(method("GET"))
            .and(path("/surah"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = surahs::run(&state, "", SurahSort::Number, &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::Api(_)));
        assert!(err.hint().is_some());
    }
}

// =============================================================================
// Prayer Times and Qibla
// =============================================================================

mod prayer_times {
    use super::*;

    fn timings() -> serde_json::Value {
        json!({
            "timings": {
                "Fajr": "04:40",
                "Sunrise": "06:05",
                "Dhuhr": "12:05",
                "Asr": "15:28",
                "Maghrib": "18:04",
                "Isha": "19:21"
            },
            "date": {
                "gregorian": {
                    "day": "10",
                    "weekday": { "en": "Monday" },
                    "month": { "en": "March" },
                    "year": "2025"
                },
                "hijri": {
                    "day": "10",
                    "weekday": { "en": "Al Athnayn" },
                    "month": { "en": "Ramadan" },
                    "year": "1446"
                }
            }
        })
    }

    fn afternoon() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_prayer_times_by_address_saved() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        Mock::given(method("GET"))
            .and(path("/timingsByAddress/1741608000"))
            .and(query_param("address", "Cairo"))
            .and(query_param("method", "5"))
            .and(query_param("school", "0"))
            .respond_with(ok(timings()))
            .expect(1)
            .mount(&server)
            .await;

        let request = PrayerRequest {
            location: Some(PrayerLocation::Address("Cairo".to_string())),
            method: Some(CalculationMethod::Egyptian),
            school: Some(JuristicSchool::Shafii),
            date: None,
            save: true,
        };
        let mut out = Vec::new();
        prayer::run(&state, request, afternoon(), &mut out)
            .await
            .unwrap();
        let text = output_text(out);

        assert!(text.contains("Prayer times for Cairo"));
        assert!(text.contains("Monday, March 10, 2025"));
        assert!(text.contains("> Asr      15:28  (next)"));

        assert_eq!(
            state.preferences.location().await.unwrap(),
            Some(PrayerLocation::Address("Cairo".to_string()))
        );
        assert_eq!(
            state.preferences.calculation_method().await.unwrap(),
            CalculationMethod::Egyptian
        );
    }

    #[tokio::test]
    async fn test_other_day_has_no_next_marker() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;
        state
            .preferences
            .set_location(&PrayerLocation::Address("Cairo".to_string()))
            .await
            .unwrap();

        Mock::given(method("GET"))
            .and(path("/timingsByAddress/1741694400"))
            .respond_with(ok(timings()))
            .mount(&server)
            .await;

        let request = PrayerRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 11),
            ..PrayerRequest::default()
        };
        let mut out = Vec::new();
        prayer::run(&state, request, afternoon(), &mut out)
            .await
            .unwrap();
        assert!(!output_text(out).contains("(next)"));
    }

    #[tokio::test]
    async fn test_no_location_is_distinct_error() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let mut out = Vec::new();
        let err = prayer::run(&state, PrayerRequest::default(), afternoon(), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, CliError::LocationUnavailable(_)));
        assert!(err.hint().unwrap().contains("--lat"));
    }

    #[tokio::test]
    async fn test_qibla_needs_coordinates() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;
        state
            .preferences
            .set_location(&PrayerLocation::Address("London".to_string()))
            .await
            .unwrap();

        let mut out = Vec::new();
        let err = qibla::run(&state, None, &mut out).await.unwrap_err();
        assert!(matches!(err, CliError::LocationUnavailable(_)));

        let london = Coordinates::new(51.5074, -0.1278).unwrap();
        state
            .preferences
            .set_location(&PrayerLocation::Coordinates(london))
            .await
            .unwrap();
        let mut out = Vec::new();
        qibla::run(&state, None, &mut out).await.unwrap();
        let text = output_text(out);
        assert!(text.contains("(ESE)"));
        assert!(text.contains("Distance to the Kaaba"));
    }
}

// =============================================================================
// Bookmarks and Settings
// =============================================================================

mod saved_state {
    use super::*;

    #[tokio::test]
    async fn test_bookmark_lifecycle() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let ayah = |text: &str| {
            json!({
                "number": 262,
                "text": text,
                "numberInSurah": 255,
                "page": 42,
                "surah": {
                    "number": 2,
                    "name": "سُورَةُ البَقَرَةِ",
                    "englishName": "Al-Baqara",
                    "englishNameTranslation": "The Cow",
                    "revelationType": "Medinan",
                    "numberOfAyahs": 286
                }
            })
        };
        Mock::given(method("GET"))
            .and(path("/ayah/2:255/quran-uthmani"))
            .respond_with(ok(ayah("ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ayah/2:255/en.sahih"))
            .respond_with(ok(ayah("Allah - there is no deity except Him")))
            .expect(1)
            .mount(&server)
            .await;

        let verse: VerseRef = "2:255".parse().unwrap();

        let mut out = Vec::new();
        bookmarks::add(&state, verse, &mut out).await.unwrap();
        // Second add is answered from storage
        bookmarks::add(&state, verse, &mut out).await.unwrap();
        let text = output_text(out);
        assert!(text.contains("Bookmarked 2:255"));
        assert!(text.contains("2:255 is already bookmarked"));

        let mut out = Vec::new();
        bookmarks::list(&state, &mut out).await.unwrap();
        let text = output_text(out);
        assert!(text.starts_with("2:255 Al-Baqara\n"));
        assert!(text.contains("Allah - there is no deity except Him"));

        let mut out = Vec::new();
        bookmarks::remove(&state, verse, &mut out).await.unwrap();
        bookmarks::remove(&state, verse, &mut out).await.unwrap();
        let text = output_text(out);
        assert!(text.contains("Removed bookmark 2:255"));
        assert!(text.contains("2:255 was not bookmarked"));
        assert!(state.bookmarks.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let mut out = Vec::new();
        settings::run(
            &state,
            SettingsAction::Reciter {
                code: Reciter::Husary,
            },
            &mut out,
        )
        .await
        .unwrap();
        settings::run(&state, SettingsAction::Repeat { count: 0 }, &mut out).await.unwrap();
        settings::run(&state, SettingsAction::Method { id: 4 }, &mut out).await.unwrap();
        assert!(settings::run(&state, SettingsAction::Method { id: 6 }, &mut out).await.is_err());

        let mut out = Vec::new();
        settings::run(&state, SettingsAction::Show, &mut out).await.unwrap();
        let text = output_text(out);
        assert!(text.contains("(ar.husary)"));
        assert!(text.contains("Verse repeat: ∞"));
        assert!(text.contains("Umm Al-Qura"));
        assert!(text.contains("Location:     not set"));
    }

    #[tokio::test]
    async fn test_location_settings() {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;

        let mut out = Vec::new();
        let err = settings::run(
            &state,
            SettingsAction::Location {
                lat: None,
                lng: None,
                address: Some("   ".to_string()),
            },
            &mut out,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, CliError::LocationUnavailable(_)));

        settings::run(
            &state,
            SettingsAction::Location {
                lat: Some(21.4),
                lng: Some(39.8),
                address: None,
            },
            &mut out,
        )
        .await
        .unwrap();
        assert!(matches!(
            state.preferences.location().await.unwrap(),
            Some(PrayerLocation::Coordinates(_))
        ));

        settings::run(&state, SettingsAction::ClearLocation, &mut out).await.unwrap();
        assert_eq!(state.preferences.location().await.unwrap(), None);
    }
}

// =============================================================================
// Playback
// =============================================================================

mod playback {
    use super::*;
    use quran_cli::commands::play::HELP;
    use tokio::sync::mpsc;

    fn options(reciter: Reciter) -> PlayOptions {
        PlayOptions {
            surah: surah(112),
            from: None,
            to: None,
            verse_repeat: Some(1),
            passes: Some(1),
            verse: None,
            reciter: Some(reciter),
            translation: None,
        }
    }

    async fn play(options: PlayOptions, input: &'static [u8]) -> String {
        let server = MockServer::start().await;
        let (state, _dir) = test_state(&server.uri()).await;
        mount_ikhlas(&server).await;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut out = Vec::new();
        tokio::time::timeout(
            Duration::from_secs(10),
            play_with(&state, InstantOutput::new(tx), rx, input, options, &mut out),
        )
        .await
        .expect("playback did not finish")
        .unwrap();
        output_text(out)
    }

    #[tokio::test]
    async fn test_sequence_plays_bismillah_then_every_verse() {
        let text = play(options(Reciter::Sudais), b"").await;

        let bismillah = text.find("بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ\n").unwrap();
        let first = text.find("[1] قُلْ هُوَ ٱللَّهُ أَحَدٌ").unwrap();
        let last = text.find("[4] ").unwrap();
        assert!(bismillah < first && first < last);

        assert!(text.contains("Abdur-Rahman as-Sudais · 4 of 4 verses have audio"));
        assert!(text.contains("Pass 1 complete\n"));
        assert!(text.trim_end().ends_with("Stopped"));
    }

    #[tokio::test]
    async fn test_range_passes_are_reported() {
        let mut opts = options(Reciter::Sudais);
        opts.from = Some(2);
        opts.to = Some(3);
        opts.passes = Some(2);
        let text = play(opts, b"").await;

        assert!(!text.contains("[1]"));
        assert!(!text.contains("[4]"));
        assert!(text.contains("Pass 1 complete, starting again"));
        assert!(text.contains("(112:2 play 1, pass 2)"));
        assert!(text.contains("Pass 2 complete\n"));
    }

    #[tokio::test]
    async fn test_single_verse_repeats() {
        let mut opts = options(Reciter::Sudais);
        opts.verse = Some(2);
        opts.verse_repeat = Some(3);
        let text = play(opts, b"").await;

        assert_eq!(text.matches("[2] ٱللَّهُ ٱلصَّمَدُ").count(), 3);
        assert!(text.contains("(112:2 play 3, pass 1)"));
        assert!(!text.contains("[1]"));
    }

    #[tokio::test]
    async fn test_quit_stops_playback() {
        let text = play(options(Reciter::Sudais), b"q\n").await;
        assert!(text.contains("Al-Ikhlaas"));
    }

    #[tokio::test]
    async fn test_unknown_input_prints_help() {
        let mut opts = options(Reciter::Sudais);
        opts.verse = Some(1);
        let text = play(opts, b"what\n").await;
        assert!(text.contains(HELP));
    }
}
