mod common;

use common::TestDb;
use quran_storage::{create_pool, run_migrations, settings, DATABASE_FILE};
use serde_json::json;

#[tokio::test]
async fn test_set_and_get_setting() {
    let db = TestDb::new().await;

    let value = json!({"name": "Al-Kahf", "count": 110});
    settings::set_setting(db.pool(), "sample", &value).await.unwrap();

    let result = settings::get_setting(db.pool(), "sample").await.unwrap();
    assert_eq!(result, Some(value));
}

#[tokio::test]
async fn test_get_non_existent_setting() {
    let db = TestDb::new().await;
    let result = settings::get_setting(db.pool(), "missing").await.unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn test_update_existing_setting() {
    let db = TestDb::new().await;

    settings::set_setting(db.pool(), "ui.theme", &json!("light")).await.unwrap();
    settings::set_setting(db.pool(), "ui.theme", &json!("dark")).await.unwrap();

    let result = settings::get_setting(db.pool(), "ui.theme").await.unwrap();
    assert_eq!(result, Some(json!("dark")));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings WHERE key = 'ui.theme'")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_corrupt_value_reads_as_absent() {
    let db = TestDb::new().await;
    sqlx::query("INSERT INTO settings (key, value, updated_at) VALUES ('sample', '{ not json', 0)")
        .execute(db.pool())
        .await
        .unwrap();

    assert_eq!(settings::get_setting(db.pool(), "sample").await.unwrap(), None);
    assert!(settings::get_all_settings(db.pool()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_setting() {
    let db = TestDb::new().await;
    settings::set_setting(db.pool(), "sample", &json!(1)).await.unwrap();

    assert!(settings::remove_setting(db.pool(), "sample").await.unwrap());
    assert!(!settings::remove_setting(db.pool(), "sample").await.unwrap());
    assert_eq!(settings::get_setting(db.pool(), "sample").await.unwrap(), None);
}

#[tokio::test]
async fn test_all_settings_sorted_by_key() {
    let db = TestDb::new().await;
    settings::set_setting(db.pool(), "quran.reciter", &json!("ar.alafasy")).await.unwrap();
    settings::set_setting(db.pool(), "prayer.calc_method", &json!(2)).await.unwrap();

    let keys: Vec<String> = settings::get_all_settings(db.pool())
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.key)
        .collect();
    assert_eq!(keys, vec!["prayer.calc_method", "quran.reciter"]);
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join(DATABASE_FILE).display());

    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    settings::set_setting(&pool, "count", &json!(7)).await.unwrap();
    pool.close().await;

    let reopened = TestDb::in_dir(dir).await;
    assert_eq!(
        settings::get_setting(reopened.pool(), "count").await.unwrap(),
        Some(json!(7))
    );
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = TestDb::new().await;
    run_migrations(db.pool()).await.unwrap();
    run_migrations(db.pool()).await.unwrap();
}

#[tokio::test]
async fn test_concurrent_writers_keep_one_row() {
    let db = TestDb::new().await;

    let writes = (0..20).map(|i| {
        let pool = db.pool.clone();
        tokio::spawn(async move {
            settings::set_setting(&pool, "ui.theme", &json!(format!("theme-{i}")))
                .await
                .unwrap();
        })
    });
    for write in writes.collect::<Vec<_>>() {
        write.await.unwrap();
    }

    let all = settings::get_all_settings(db.pool()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert!(all[0].value.as_str().unwrap().starts_with("theme-"));
}
