//! Tests for the engine module.

use std::sync::Arc;

use jiff::civil::date;

use super::*;
use crate::{
    calendar::{Direction, ViewMode},
    dates::FixedClock,
    models::TaskId,
    params::{CreateCareTask, NewPlant, TaskRef},
    store::MemoryStore,
};

struct Fixture {
    engine: CareEngine,
    clock: Arc<FixedClock>,
    store: Arc<MemoryStore>,
    user: UserContext,
}

/// Engine over an in-memory store, with the clock at 09:00 UTC on `day`.
async fn create_test_engine(day: Date) -> Fixture {
    let clock = Arc::new(FixedClock::at(day, 9, TimeZone::UTC).expect("Failed to build clock"));
    let store = Arc::new(MemoryStore::with_clock(clock.clone()));
    let engine = CareEngineBuilder::new()
        .with_store(store.clone())
        .with_clock(clock.clone())
        .build()
        .await
        .expect("Failed to create engine");

    Fixture {
        engine,
        clock,
        store,
        user: UserContext::new("tester"),
    }
}

async fn add_fern(fixture: &Fixture) -> PlantId {
    fixture
        .engine
        .add_plant(
            &fixture.user,
            &NewPlant {
                id: Some(PlantId::new("fern")),
                name: "Fern".to_string(),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to add plant")
        .plant_id
}

#[tokio::test]
async fn test_create_care_task_persists_and_notifies() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;
    let mut events = fixture.engine.subscribe();

    let result = fixture
        .engine
        .create_care_task(
            &fixture.user,
            &CreateCareTask {
                plant_id: plant_id.clone(),
                name: "Water".to_string(),
                frequency: Some(3),
                start_date: None,
            },
        )
        .await
        .expect("Failed to create task");

    assert_eq!(result.message, "New care task \"Water\" created!");
    let task = result.task.expect("Created task missing");
    assert_eq!(task.next_due, date(2025, 6, 1));

    let event = events.try_recv().expect("No event published");
    assert_eq!(event.action, ChangeAction::Create);
    assert_eq!(event.plant_id, Some(plant_id.clone()));
    assert_eq!(event.task_id, Some(task.id.clone()));
    assert!(events.try_recv().is_none());

    let reloaded = fixture.engine.get_plant(&fixture.user, &plant_id).await.unwrap();
    assert_eq!(reloaded.care_tasks, vec![task]);
}

#[tokio::test]
async fn test_each_mutation_publishes_once_with_its_action() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;
    let task = fixture
        .engine
        .create_care_task(
            &fixture.user,
            &CreateCareTask {
                plant_id: plant_id.clone(),
                name: "Mist".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .task
        .unwrap();
    let target = TaskRef::new(plant_id, task.id);

    let mut events = fixture.engine.subscribe();

    fixture.engine.complete_care_task(&fixture.user, &target).await.unwrap();
    assert_eq!(events.try_recv().map(|e| e.action), Some(ChangeAction::Complete));
    assert!(events.try_recv().is_none());

    fixture.engine.postpone_care_task(&fixture.user, &target).await.unwrap();
    assert_eq!(events.try_recv().map(|e| e.action), Some(ChangeAction::Postpone));
    assert!(events.try_recv().is_none());

    fixture.engine.delete_care_task(&fixture.user, &target).await.unwrap();
    assert_eq!(events.try_recv().map(|e| e.action), Some(ChangeAction::Delete));
    assert!(events.try_recv().is_none());
}

#[tokio::test]
async fn test_not_found_writes_nothing() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;
    let before = fixture.engine.collection_version(&fixture.user).await.unwrap();
    let mut events = fixture.engine.subscribe();

    let ghost = TaskRef::new(plant_id, TaskId::new("ghost"));
    let err = fixture
        .engine
        .complete_care_task(&fixture.user, &ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, CareError::TaskNotFound { .. }));

    let err = fixture
        .engine
        .postpone_care_task(&fixture.user, &TaskRef::new("nowhere", "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, CareError::PlantNotFound { .. }));

    assert_eq!(
        fixture.engine.collection_version(&fixture.user).await.unwrap(),
        before
    );
    assert!(events.try_recv().is_none());
}

#[tokio::test]
async fn test_complete_then_advance_clock() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;
    let task = fixture
        .engine
        .create_care_task(
            &fixture.user,
            &CreateCareTask {
                plant_id: plant_id.clone(),
                name: "Water".to_string(),
                frequency: Some(3),
                start_date: Some(date(2025, 6, 1)),
            },
        )
        .await
        .unwrap()
        .task
        .unwrap();

    let done = fixture
        .engine
        .complete_care_task(&fixture.user, &TaskRef::new(plant_id.clone(), task.id.clone()))
        .await
        .unwrap();
    assert_eq!(done.message, "\"Water\" task completed!");
    assert_eq!(done.task.unwrap().next_due, date(2025, 6, 4));

    // Completed today still shows on today's agenda, flagged as done
    let agenda = fixture.engine.agenda(&fixture.user, date(2025, 6, 1)).await;
    assert_eq!(agenda.len(), 1);
    assert!(agenda[0].entries[0].is_completed);

    fixture.clock.advance_days(5).unwrap();
    let agenda = fixture.engine.agenda(&fixture.user, date(2025, 6, 6)).await;
    assert_eq!(agenda[0].entries.len(), 1);
    assert!(!agenda[0].entries[0].is_completed);

    let postponed = fixture
        .engine
        .postpone_care_task(&fixture.user, &TaskRef::new(plant_id, task.id))
        .await
        .unwrap();
    assert_eq!(postponed.message, "\"Water\" pushed to tomorrow");
    assert_eq!(postponed.task.unwrap().next_due, date(2025, 6, 7));
}

#[tokio::test]
async fn test_save_plants_replaces_and_notifies() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    add_fern(&fixture).await;
    let mut events = fixture.engine.subscribe();

    let mut plants = fixture.engine.load_plants(&fixture.user).await;
    plants.push(Plant::new(PlantId::new("rose"), "Rose"));
    let version = fixture
        .engine
        .save_plants(&fixture.user, plants.clone())
        .await
        .unwrap();

    let event = events.try_recv().expect("No event published");
    assert_eq!(event.action, ChangeAction::Replace);
    assert_eq!(event.version, version);
    assert_eq!(fixture.engine.load_plants(&fixture.user).await, plants);
}

#[tokio::test]
async fn test_external_write_is_rejected_as_stale() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;

    // Another writer bumps the version between our read and write
    let plants = fixture.engine.load_plants(&fixture.user).await;
    let read_version = fixture.engine.collection_version(&fixture.user).await.unwrap();
    fixture.store.save(&fixture.user, &plants, None).unwrap();

    let err = fixture
        .store
        .save(&fixture.user, &plants, Some(read_version))
        .unwrap_err();
    assert!(matches!(err, CareError::StaleWrite { .. }));

    // The engine re-reads on every mutation, so it is unaffected
    fixture
        .engine
        .create_care_task(
            &fixture.user,
            &CreateCareTask {
                plant_id,
                name: "Water".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_malformed_store_loads_empty() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    fixture.store.write_raw("tester", "{\"not\": \"an array\"}");

    assert!(fixture.engine.load_plants(&fixture.user).await.is_empty());
    let metrics = fixture.engine.metrics(&fixture.user).await.unwrap();
    assert_eq!(metrics.total_plants, 0);
}

#[tokio::test]
async fn test_blank_user() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let nobody = UserContext::new("");

    assert!(fixture.engine.load_plants(&nobody).await.is_empty());
    let err = fixture
        .engine
        .add_plant(
            &nobody,
            &NewPlant {
                name: "Fern".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CareError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_concurrent_mutations_are_serialized() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    let plant_id = add_fern(&fixture).await;
    let engine = Arc::new(fixture.engine);

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let engine = Arc::clone(&engine);
            let user = fixture.user.clone();
            let plant_id = plant_id.clone();
            tokio::spawn(async move {
                engine
                    .create_care_task(
                        &user,
                        &CreateCareTask {
                            plant_id,
                            name: format!("Task {n}"),
                            ..Default::default()
                        },
                    )
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let plants = engine.load_plants(&fixture.user).await;
    assert_eq!(plants[0].care_tasks.len(), 8);
}

#[tokio::test]
async fn test_views_follow_settings() {
    let clock = Arc::new(FixedClock::at(date(2025, 6, 4), 9, TimeZone::UTC).unwrap());
    let engine = CareEngineBuilder::new()
        .with_store(Arc::new(MemoryStore::with_clock(clock.clone())))
        .with_clock(clock)
        .with_week_start(WeekStart::Sunday)
        .with_navigation_horizon_months(1)
        .build()
        .await
        .unwrap();
    let user = UserContext::new("tester");

    let week = engine.week(&user, date(2025, 6, 4)).await.unwrap();
    assert_eq!(week[0].date, date(2025, 6, 1));

    let month = engine.month(&user, date(2025, 6, 4)).await.unwrap();
    assert_eq!(month[0][0].map(|cell| cell.date), Some(date(2025, 6, 1)));

    assert_eq!(
        engine
            .navigate(date(2025, 6, 4), ViewMode::Monthly, Direction::Next)
            .unwrap(),
        Some(date(2025, 7, 4))
    );
    assert_eq!(
        engine
            .navigate(date(2025, 7, 4), ViewMode::Daily, Direction::Next)
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_mutation_keeps_plants_with_odd_field_types() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    fixture.store.write_raw(
        "tester",
        r#"[
            {"id": "a", "name": "Fern", "careTasks": [
                {"id": "a-Water", "name": "Water", "frequency": 3, "nextDueDate": "2025-06-01"}
            ]},
            {"id": "b", "name": "Rose", "indoor": "yes", "careTasks": [
                {"id": "b-Feed", "name": "Feed", "completionHistory": [1748764800000]}
            ]}
        ]"#,
    );

    let loaded = fixture.engine.load_plants(&fixture.user).await;
    assert_eq!(loaded.len(), 2);

    fixture
        .engine
        .complete_care_task(&fixture.user, &TaskRef::new("a", "a-Water"))
        .await
        .expect("Failed to complete task");

    let raw = fixture.store.raw("tester").expect("Collection missing");
    assert!(raw.contains("Rose"));
    assert!(raw.contains(r#""indoor":"yes""#));

    let rose = fixture
        .engine
        .get_plant(&fixture.user, &PlantId::new("b"))
        .await
        .expect("Rose was dropped");
    assert_eq!(rose.care_tasks[0].completion_history.len(), 1);
}

#[tokio::test]
async fn test_save_plants_rejects_what_would_not_load_back() {
    let fixture = create_test_engine(date(2025, 6, 1)).await;
    add_fern(&fixture).await;
    let before = fixture.engine.collection_version(&fixture.user).await.unwrap();
    let mut events = fixture.engine.subscribe();

    let mut fern = Plant::new(PlantId::new("fern"), "Fern");
    fern.care_tasks.push(CareTask::new(
        TaskId::new("fern-water"),
        "Water",
        0,
        date(2025, 6, 1),
        fixture.clock.now(),
    ));
    let err = fixture
        .engine
        .save_plants(&fixture.user, vec![fern.clone()])
        .await
        .unwrap_err();
    assert!(matches!(err, CareError::InvalidInput { .. }));

    fern.care_tasks[0].frequency = 2;
    fern.care_tasks[0].name = String::new();
    assert!(fixture
        .engine
        .save_plants(&fixture.user, vec![fern.clone()])
        .await
        .is_err());

    assert_eq!(
        fixture.engine.collection_version(&fixture.user).await.unwrap(),
        before
    );
    assert!(events.try_recv().is_none());

    fern.care_tasks[0].name = "Water".to_string();
    fixture
        .engine
        .save_plants(&fixture.user, vec![fern.clone()])
        .await
        .expect("Failed to save valid plants");
    assert_eq!(fixture.engine.load_plants(&fixture.user).await, vec![fern]);
}
