use league_standings::clock::FixedClock;
use league_standings::error::AppError;
use league_standings::scores::ScoreSubmission;
use league_standings::service::{LeagueService, MISSING_DIVISION_MESSAGE};
use league_standings::storage::{DivisionStore, JsonFileStore};
use league_standings::testing_utils::TestDataBuilder;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const ORG: &str = TestDataBuilder::ORGANIZATION;

fn create_service(root: &Path) -> LeagueService<JsonFileStore, FixedClock> {
    LeagueService::new(
        JsonFileStore::new(root),
        FixedClock(TestDataBuilder::fixed_instant()),
    )
}

/// Full workflow against the JSON store: create, import, score, reload
#[tokio::test]
async fn test_season_workflow_persists() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());

    service
        .create_division(ORG, "U12", "Under 12")
        .await
        .unwrap();
    let result = service
        .import_schedule(ORG, "u12", &TestDataBuilder::sample_schedule_file(), false)
        .await
        .unwrap();
    assert!(result.success, "{:?}", result.error_message);

    service
        .save_scores(
            ORG,
            "U12",
            &[
                ScoreSubmission::final_score(1, 5, 3),
                ScoreSubmission::final_score(2, 2, 2),
                ScoreSubmission::final_score(4, 1, 6),
            ],
        )
        .await
        .unwrap();

    // a fresh service over the same directory sees the saved state
    let reopened = create_service(dir.path());
    let (info, division) = reopened.division(ORG, "u12").await.unwrap();
    assert_eq!(info.updated, Some(TestDataBuilder::fixed_instant()));
    assert_eq!(division, TestDataBuilder::create_played_division());

    let report = reopened.standings(ORG, "u12", None).await.unwrap();
    let order: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(order, vec!["Comets", "Meteors", "Stars", "Rockets"]);
}

#[tokio::test]
async fn test_import_without_division_record_writes_nothing() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());

    let result = service
        .import_schedule(ORG, "u12", &TestDataBuilder::sample_schedule_file(), false)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.error_message.as_deref(), Some(MISSING_DIVISION_MESSAGE));
    assert!(!service.store().division_path(ORG, "u12").exists());
}

#[tokio::test]
async fn test_bad_file_leaves_no_document() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());
    service.create_division(ORG, "u12", "Under 12").await.unwrap();

    let contents = TestDataBuilder::schedule_file(
        &["Comets", "Rockets"],
        &["13/45/2024,Mon,9:00 AM,1,2,North"],
    );
    let result = service
        .import_schedule(ORG, "u12", &contents, false)
        .await
        .unwrap();

    assert!(!result.success);
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap()
            .contains("13/45/2024")
    );
    assert!(service.store().load_division(ORG, "u12").await.unwrap().is_none());

    let infos = service.list_divisions(ORG).await.unwrap();
    assert_eq!(infos[0].updated, Some(TestDataBuilder::fixed_instant()));
}

#[tokio::test]
async fn test_delete_removes_document() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());
    service.create_division(ORG, "u12", "Under 12").await.unwrap();
    service
        .import_schedule(ORG, "u12", &TestDataBuilder::sample_schedule_file(), true)
        .await
        .unwrap();
    assert!(service.store().division_path(ORG, "u12").exists());

    assert!(service.delete_division(ORG, "U12").await.unwrap());
    assert!(!service.store().division_path(ORG, "u12").exists());

    let err = service.standings(ORG, "u12", None).await.unwrap_err();
    assert!(matches!(err, AppError::MissingDivision { .. }));
}

#[tokio::test]
async fn test_organizations_are_isolated() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());
    service.create_division(ORG, "u12", "Under 12").await.unwrap();
    service
        .create_division("Eastside Hockey", "u12", "Squirts")
        .await
        .unwrap();

    assert_eq!(service.list_divisions(ORG).await.unwrap().len(), 1);
    let hockey = service.list_divisions("Eastside Hockey").await.unwrap();
    assert_eq!(hockey[0].name, "Squirts");

    service
        .import_schedule(
            "Eastside Hockey",
            "u12",
            &TestDataBuilder::sample_schedule_file(),
            false,
        )
        .await
        .unwrap();
    let report = service
        .standings("Eastside Hockey", "u12", None)
        .await
        .unwrap();
    assert!(report.show_overtime_losses);
    assert!(service.store().load_division(ORG, "u12").await.unwrap().is_none());
}

/// Concurrent score saves on one division are serialized, so no update is lost
#[tokio::test]
async fn test_concurrent_score_saves() {
    let dir = tempdir().unwrap();
    let service = Arc::new(create_service(dir.path()));
    service.create_division(ORG, "u12", "Under 12").await.unwrap();
    service
        .import_schedule(ORG, "u12", &TestDataBuilder::sample_schedule_file(), false)
        .await
        .unwrap();

    let first = {
        let service = Arc::clone(&service);
        async move {
            service
                .save_scores(ORG, "u12", &[ScoreSubmission::final_score(1, 5, 3)])
                .await
        }
    };
    let second = {
        let service = Arc::clone(&service);
        async move {
            service
                .save_scores(ORG, "u12", &[ScoreSubmission::final_score(4, 1, 6)])
                .await
        }
    };
    let (a, b) = tokio::join!(first, second);
    assert_eq!(a.unwrap(), 1);
    assert_eq!(b.unwrap(), 1);

    let (_, division) = service.division(ORG, "u12").await.unwrap();
    assert!(division.game(1).unwrap().is_played());
    assert!(division.game(4).unwrap().is_played());
}

/// Imports into two divisions of one organization race a division create on
/// the shared division list; every record must survive and the list must
/// stay readable.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writes_across_divisions_keep_division_list() {
    let dir = tempdir().unwrap();
    let service = create_service(dir.path());
    service.create_division(ORG, "d0", "Division 0").await.unwrap();
    service.create_division(ORG, "d1", "Division 1").await.unwrap();
    let schedule = TestDataBuilder::sample_schedule_file();

    for round in 0..15 {
        let new_id = format!("new{round}");
        let (first, second, created) = tokio::join!(
            service.import_schedule(ORG, "d0", &schedule, false),
            service.import_schedule(ORG, "d1", &schedule, true),
            service.create_division(ORG, &new_id, "Added"),
        );
        assert!(first.unwrap().success, "round {round}");
        assert!(second.unwrap().success, "round {round}");
        created.unwrap();

        let ids: Vec<String> = service
            .list_divisions(ORG)
            .await
            .unwrap()
            .into_iter()
            .map(|info| info.id)
            .collect();
        assert_eq!(ids.len(), round + 3, "round {round}: {ids:?}");
        assert!(ids.contains(&new_id));
    }

    let list_dir = service.store().division_path(ORG, "d0");
    let org_dir = list_dir.parent().unwrap().parent().unwrap();
    let leftovers: Vec<_> = std::fs::read_dir(org_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "{leftovers:?}");
}

/// Concurrent writes of the same file through the store never share a
/// temporary file
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_list_writes_leave_valid_json() {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    let info = TestDataBuilder::create_division_info();

    for _ in 0..20 {
        let pair = [info.clone(), info.clone()];
        let (a, b) = tokio::join!(
            store.save_division_infos(ORG, std::slice::from_ref(&info)),
            store.save_division_infos(ORG, &pair),
        );
        a.unwrap();
        b.unwrap();

        let infos = store.load_division_infos(ORG).await.unwrap();
        assert!(matches!(infos.len(), 1 | 2));
    }
}
