//! Integration tests for the planner service.
//!
//! Drives `StudyPlanner` through its lifecycle against a JSON file store in
//! a temporary directory: generate, toggle, reopen, export, reset.

use studyplan_core::{
    GeneratePlanRequest, PlanError, PlanState, PlannerConfig, PlannerError, StudyPlanner,
    ToggleTopicRequest,
};
use studyplan_store::{JsonFileStore, MemoryStore, PlanStore, StudyPlan, Syllabus};
use studyplan_test_utils::{TempPlanFile, day, two_unit_syllabus};

fn request() -> GeneratePlanRequest {
    GeneratePlanRequest::new(two_unit_syllabus())
        .university("uni-1")
        .course("phys-101")
        .today(day(0))
        .exam_date(day(10))
        .hours_per_day(3)
}

fn open(file: &TempPlanFile) -> StudyPlanner<JsonFileStore> {
    StudyPlanner::open(file.store(), PlannerConfig::default()).expect("store should open")
}

#[test]
fn generate_persists_active_plan() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    assert_eq!(planner.state(), PlanState::Unconfigured);

    let id = planner.generate(&request()).unwrap().id;
    assert_eq!(planner.state(), PlanState::Active { progress: 0 });

    let stored = file.store().load().unwrap().expect("plan persisted");
    assert_eq!(stored.id, id);
    assert_eq!(stored.hours_per_day, 3);
}

#[test]
fn reopening_restores_plan_and_progress() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    planner.generate(&request()).unwrap();
    planner.toggle(ToggleTopicRequest::new(0, 0)).unwrap();
    planner.toggle(ToggleTopicRequest::new(1, 0)).unwrap();
    let expected = planner.active().cloned().unwrap();
    drop(planner);

    let reopened = open(&file);
    assert_eq!(reopened.active(), Some(&expected));
    // 2 of 9 topics (6 study + 3 revision) -> 22%.
    assert_eq!(reopened.state(), PlanState::Active { progress: 22 });
}

#[test]
fn json_roundtrip_preserves_every_field() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    planner.generate(&request()).unwrap();
    for (d, t) in [(0, 0), (2, 0), (6, 0), (2, 0), (8, 0)] {
        planner.toggle(ToggleTopicRequest::new(d, t)).unwrap();
    }
    let original: StudyPlan = planner.active().cloned().unwrap();

    let json = serde_json::to_string(&original).unwrap();
    let decoded: StudyPlan = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, original);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["exam_date"], "2025-01-16");
    assert_eq!(value["days"][0]["date"], "2025-01-07");
    assert_eq!(value["days"][0]["topics"][0]["completed"], true);
    assert_eq!(value["progress"], original.progress);
}

#[test]
fn toggling_twice_restores_progress() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    planner.generate(&request()).unwrap();
    planner.toggle(ToggleTopicRequest::new(3, 0)).unwrap();

    let before = planner.active().unwrap().progress;
    planner.toggle(ToggleTopicRequest::new(5, 0)).unwrap();
    planner.toggle(ToggleTopicRequest::new(5, 0)).unwrap();
    assert_eq!(planner.active().unwrap().progress, before);
}

#[test]
fn every_toggle_is_persisted() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    planner.generate(&request()).unwrap();
    planner.toggle(ToggleTopicRequest::new(0, 0)).unwrap();
    planner.toggle(ToggleTopicRequest::new(1, 0)).unwrap();
    assert_eq!(planner.store().writes(), 3);
    assert_eq!(planner.store().load().unwrap().as_ref(), planner.active());
}

#[test]
fn completing_everything_reaches_100_with_milestones() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    let day_count = planner.generate(&request()).unwrap().days.len();

    let mut thresholds = Vec::new();
    for d in 0..day_count {
        let outcome = planner.toggle(ToggleTopicRequest::new(d, 0)).unwrap();
        assert!(outcome.day_completed);
        for m in &outcome.milestones {
            assert_eq!(m.progress, outcome.progress);
            thresholds.push(m.threshold);
        }
    }
    assert_eq!(thresholds, vec![25, 50, 75, 100]);
    assert_eq!(planner.state(), PlanState::Active { progress: 100 });
    assert_eq!(planner.active().unwrap().completed_days(), day_count);
}

#[test]
fn empty_syllabus_reports_every_milestone() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    let empty = GeneratePlanRequest::new(Syllabus::default())
        .university("uni-1")
        .course("phys-101")
        .today(day(0))
        .exam_date(day(10));
    assert_eq!(planner.generate(&empty).unwrap().days.len(), 3);

    let mut reported = Vec::new();
    for d in 0..3 {
        let outcome = planner.toggle(ToggleTopicRequest::new(d, 0)).unwrap();
        reported.push(
            outcome
                .milestones
                .iter()
                .map(|m| m.threshold)
                .collect::<Vec<_>>(),
        );
    }
    assert_eq!(reported, vec![vec![25], vec![50], vec![75, 100]]);
}

#[test]
fn out_of_range_toggle_fails_loudly() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    planner.generate(&request()).unwrap();

    let err = planner.toggle(ToggleTopicRequest::new(99, 0)).unwrap_err();
    assert!(
        matches!(err, PlannerError::Plan(PlanError::DayOutOfRange { index: 99, .. })),
        "got: {err}"
    );
    let err = planner.toggle(ToggleTopicRequest::new(0, 1)).unwrap_err();
    assert!(
        matches!(err, PlannerError::Plan(PlanError::TopicOutOfRange { .. })),
        "got: {err}"
    );
    assert_eq!(planner.store().writes(), 1);
}

#[test]
fn new_plan_replaces_old_without_merging() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    let first = planner.generate(&request()).unwrap().id;
    planner.toggle(ToggleTopicRequest::new(0, 0)).unwrap();

    let second = planner
        .generate(&request().course("chem-201"))
        .unwrap()
        .clone();
    assert_ne!(second.id, first);
    assert_eq!(second.course_id, "chem-201");
    assert_eq!(second.progress, 0);
    assert_eq!(second.completed_topics(), 0);
    assert_eq!(file.store().load().unwrap(), Some(second));
}

#[test]
fn lead_time_rejection_leaves_store_untouched() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    let err = planner
        .generate(&request().exam_date(day(6)))
        .unwrap_err();
    assert!(
        matches!(err, PlannerError::Plan(PlanError::InsufficientLeadTime { .. })),
        "got: {err}"
    );
    assert!(!file.path().exists());
    assert_eq!(planner.state(), PlanState::Unconfigured);
}

#[test]
fn reset_clears_plan_and_store() {
    let file = TempPlanFile::new();
    let mut planner = open(&file);
    planner.generate(&request()).unwrap();
    assert!(file.path().exists());

    planner.reset().unwrap();
    assert_eq!(planner.state(), PlanState::Unconfigured);
    assert!(!file.path().exists());

    // Reset with nothing active is fine too.
    planner.reset().unwrap();

    let reopened = open(&file);
    assert_eq!(reopened.state(), PlanState::Unconfigured);
}

#[test]
fn calendar_export_has_one_event_per_day() {
    let mut planner = StudyPlanner::open(MemoryStore::new(), PlannerConfig::default()).unwrap();
    let days = planner.generate(&request()).unwrap().days.len();
    let ics = planner.export_calendar().unwrap();
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), days);
    assert!(ics.contains("DTSTART;VALUE=DATE:20250107\r\n"));
    assert!(ics.contains("DTSTART;VALUE=DATE:20250115\r\n"));
}
