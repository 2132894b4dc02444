mod common;

use common::test_app;
use destajos_core::domain::entities::{CachedUser, CatalogItem, Employee, Plant};
use destajos_core::{CatalogId, Collection, ReconcileOutcome, RemoteError};

fn employee(document: &str, name: &str, plant: Option<&str>) -> Employee {
    Employee {
        document_number: document.to_string(),
        id_type: None,
        full_name: name.to_string(),
        full_surname: None,
        cargo: None,
        cost_center: None,
        estado: None,
        payroll_name: None,
        compania: None,
        plant_group: plant.map(str::to_string),
    }
}

fn catalog(id: i64, plant: &str, concept: &str) -> CatalogItem {
    CatalogItem {
        id,
        plant: Some(plant.to_string()),
        concept: concept.to_string(),
        value: Some(100.0),
    }
}

#[tokio::test]
async fn sync_is_idempotent_for_an_unchanged_snapshot() {
    let app = test_app(true).await;
    *app.gateway.employees.lock().unwrap() = Ok(vec![
        employee("123", "Juan Pérez", Some("Norte")),
        employee("456", "Ana Gómez", Some("Sur")),
    ]);

    let first = app.references.sync_employees().await.unwrap();
    assert_eq!(first, ReconcileOutcome::Applied { upserted: 2, removed: 0 });
    let snapshot_after_first = app.references.mirror_snapshot(Collection::Employees).await.unwrap();

    let second = app.references.sync_employees().await.unwrap();
    assert_eq!(second, ReconcileOutcome::Applied { upserted: 2, removed: 0 });
    let snapshot_after_second = app.references.mirror_snapshot(Collection::Employees).await.unwrap();

    assert_eq!(snapshot_after_first, snapshot_after_second);
}

#[tokio::test]
async fn fetch_failure_is_a_noop_on_local_state() {
    let app = test_app(true).await;
    *app.gateway.employees.lock().unwrap() = Ok(vec![employee("123", "Juan Pérez", None)]);
    app.references.sync_employees().await.unwrap();
    let before = app.references.mirror_snapshot(Collection::Employees).await.unwrap();

    *app.gateway.employees.lock().unwrap() = Err(RemoteError::transport("timed out"));
    let outcome = app.references.sync_employees().await.unwrap();
    assert!(matches!(outcome, ReconcileOutcome::SkippedFetchFailed { .. }));

    let after = app.references.mirror_snapshot(Collection::Employees).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn explicit_empty_snapshot_clears_the_mirror() {
    let app = test_app(true).await;
    *app.gateway.piecework.lock().unwrap() = Ok(vec![
        catalog(7, "TODAS", "Poda"),
        catalog(9, "Norte", "Corte"),
    ]);
    app.references.sync_piecework().await.unwrap();
    assert_eq!(app.references.local_piecework("", None).await.unwrap().len(), 2);

    *app.gateway.piecework.lock().unwrap() = Ok(Vec::new());
    let outcome = app.references.sync_piecework().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Cleared);
    assert!(app.references.local_piecework("", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn rows_absent_from_the_snapshot_are_tombstoned() {
    let app = test_app(true).await;
    *app.gateway.plants.lock().unwrap() = Ok(vec![
        Plant { name: "Norte".to_string() },
        Plant { name: "Sur".to_string() },
        Plant { name: "Centro".to_string() },
    ]);
    app.references.sync_plants().await.unwrap();

    *app.gateway.plants.lock().unwrap() = Ok(vec![
        Plant { name: "Norte".to_string() },
        Plant { name: "Centro".to_string() },
    ]);
    let outcome = app.references.sync_plants().await.unwrap();
    assert_eq!(outcome, ReconcileOutcome::Applied { upserted: 2, removed: 1 });

    let names: Vec<String> = app
        .references
        .local_plants()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, vec!["Norte".to_string(), "Centro".to_string()]);
}

#[tokio::test]
async fn one_failing_collection_does_not_block_the_others() {
    let app = test_app(true).await;
    *app.gateway.employees.lock().unwrap() = Err(RemoteError::transport("down"));
    *app.gateway.piecework.lock().unwrap() = Ok(vec![catalog(7, "TODAS", "Poda")]);
    *app.gateway.plants.lock().unwrap() = Ok(vec![Plant { name: "Norte".to_string() }]);

    let report = app.references.sync_all().await.unwrap();
    assert!(matches!(report.employees, ReconcileOutcome::SkippedFetchFailed { .. }));
    assert_eq!(report.piecework, ReconcileOutcome::Applied { upserted: 1, removed: 0 });
    assert_eq!(report.plants, ReconcileOutcome::Applied { upserted: 1, removed: 0 });
}

#[tokio::test]
async fn local_employee_lookup_honours_plant_and_wildcard() {
    let app = test_app(true).await;
    *app.gateway.employees.lock().unwrap() = Ok(vec![
        employee("1", "Juan Pérez", Some("Norte")),
        employee("2", "Ana Gómez", Some("Sur")),
        employee("3", "Luis Soto", None),
    ]);
    app.references.sync_employees().await.unwrap();

    let norte = app.references.local_employees("", Some("Norte")).await.unwrap();
    assert_eq!(norte.len(), 1);
    assert_eq!(norte[0].document_number, "1");

    // The wildcard plant matches everyone with a plant group.
    let all = app.references.local_employees("", Some("TODAS")).await.unwrap();
    assert_eq!(all.len(), 2);

    // No plant filter: everyone.
    assert_eq!(app.references.local_employees("", None).await.unwrap().len(), 3);

    // Case-insensitive substring on the name.
    let hits = app.references.local_employees("pérez", None).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].document_number, "1");
}

#[tokio::test]
async fn local_piecework_lookup_honours_wildcard_rows() {
    let app = test_app(true).await;
    *app.gateway.piecework.lock().unwrap() = Ok(vec![
        catalog(7, "TODAS", "Poda"),
        catalog(9, "Norte", "Corte"),
        catalog(11, "Sur", "Siembra"),
    ]);
    app.references.sync_piecework().await.unwrap();

    // A wildcard-tagged row is visible from any plant.
    let norte: Vec<i64> = app
        .references
        .local_piecework("", Some("Norte"))
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(norte, vec![7, 9]);

    // Asking for the wildcard plant sees everything.
    assert_eq!(app.references.local_piecework("", Some("TODAS")).await.unwrap().len(), 3);

    let corte = app.references.local_piecework("corte", None).await.unwrap();
    assert_eq!(corte.len(), 1);
    assert_eq!(corte[0].id, 9);
}

#[tokio::test]
async fn catalog_items_resolve_by_id() {
    let app = test_app(true).await;
    *app.gateway.piecework.lock().unwrap() = Ok(vec![catalog(7, "TODAS", "Poda")]);
    app.references.sync_piecework().await.unwrap();

    let item = app
        .references
        .catalog_item(CatalogId::new(7).unwrap())
        .await
        .unwrap();
    assert_eq!(item.unwrap().concept, "Poda");

    let missing = app
        .references
        .catalog_item(CatalogId::new(8).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn users_mirror_reconciles_like_the_reference_tables() {
    let app = test_app(true).await;
    *app.gateway.users.lock().unwrap() = Ok(vec![CachedUser {
        id: Some(1),
        email: Some("ana@example.com".to_string()),
        name: "ana".to_string(),
        password_hash: "cafe".to_string(),
        is_admin: true,
    }]);

    app.references.sync_users().await.unwrap();
    let user = app.references.find_user("ana").await.unwrap().unwrap();
    assert!(user.is_admin);
    assert!(app.references.find_user("luis").await.unwrap().is_none());
}
