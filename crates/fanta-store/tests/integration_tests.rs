//! Integration tests for fanta-store
//!
//! These tests verify the full CRUD cycle for every stored entity and the
//! roster version check.

use chrono::{Duration, TimeZone, Utc};
use fanta_domain::traits::{LeagueStore, WriteOutcome};
use fanta_domain::{
    Athlete, AthleteId, MatchStats, OwnerId, PerformanceRecord, Position, Roster, ScoringPeriod,
    SeasonStats, TransferWindow,
};
use fanta_store::SqliteStore;

fn owner(name: &str) -> OwnerId {
    OwnerId::new(name).unwrap()
}

#[test]
fn test_store_initialization() {
    let store = SqliteStore::new(":memory:");
    assert!(store.is_ok(), "Store should initialize successfully");
}

#[test]
fn test_upsert_and_get_athlete() {
    let mut store = SqliteStore::new(":memory:").unwrap();

    let mut athlete =
        Athlete::new(AthleteId::new(10), "Striker", Position::Attacker, 26).with_valuation(12_000_000);
    athlete.prior_season = Some(SeasonStats {
        appearances: 30,
        goals: 14,
        ..Default::default()
    });

    store.upsert_athlete(&athlete).unwrap();
    let retrieved = store.get_athlete(AthleteId::new(10)).unwrap();
    assert_eq!(retrieved, Some(athlete.clone()));

    // Re-ingesting replaces rather than duplicates
    athlete.valuation = 15_000_000;
    store.upsert_athlete(&athlete).unwrap();
    let all = store.list_athletes().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].valuation, 15_000_000);

    assert!(store.get_athlete(AthleteId::new(11)).unwrap().is_none());
}

#[test]
fn test_first_roster_save_commits_version_one() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let roster = Roster::new(owner("alice"));

    let outcome = store.save_roster(&roster).unwrap();
    assert_eq!(outcome, WriteOutcome::Committed { version: 1 });

    let loaded = store.load_roster(&owner("alice")).unwrap().unwrap();
    assert_eq!(loaded.version, 1);
    assert_eq!(loaded.budget, roster.budget);
}

#[test]
fn test_second_creation_conflicts() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.save_roster(&Roster::new(owner("alice"))).unwrap();

    let outcome = store.save_roster(&Roster::new(owner("alice"))).unwrap();
    assert_eq!(outcome, WriteOutcome::Conflict { current: 1 });
}

#[test]
fn test_stale_version_is_rejected() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.save_roster(&Roster::new(owner("bob"))).unwrap();

    let mut first = store.load_roster(&owner("bob")).unwrap().unwrap();
    let mut second = first.clone();

    first.budget -= 5_000_000;
    assert_eq!(
        store.save_roster(&first).unwrap(),
        WriteOutcome::Committed { version: 2 }
    );

    second.budget -= 9_000_000;
    assert_eq!(
        store.save_roster(&second).unwrap(),
        WriteOutcome::Conflict { current: 2 }
    );

    let stored = store.load_roster(&owner("bob")).unwrap().unwrap();
    assert_eq!(stored.budget, first.budget);
}

#[test]
fn test_conflict_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("league.db");

    let mut writer_a = SqliteStore::new(&path).unwrap();
    let mut writer_b = SqliteStore::new(&path).unwrap();

    writer_a.save_roster(&Roster::new(owner("carol"))).unwrap();

    let mut seen_by_a = writer_a.load_roster(&owner("carol")).unwrap().unwrap();
    let mut seen_by_b = writer_b.load_roster(&owner("carol")).unwrap().unwrap();

    seen_by_a.record_period_score(1, 50.0);
    seen_by_b.record_period_score(1, 70.0);

    assert!(matches!(
        writer_a.save_roster(&seen_by_a).unwrap(),
        WriteOutcome::Committed { .. }
    ));
    assert_eq!(
        writer_b.save_roster(&seen_by_b).unwrap(),
        WriteOutcome::Conflict { current: 2 }
    );

    let reloaded = writer_b.load_roster(&owner("carol")).unwrap().unwrap();
    assert_eq!(reloaded.total_score, 50.0);
}

#[test]
fn test_list_roster_owners() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    store.save_roster(&Roster::new(owner("zoe"))).unwrap();
    store.save_roster(&Roster::new(owner("adam"))).unwrap();

    let owners = store.list_roster_owners().unwrap();
    assert_eq!(owners, vec![owner("adam"), owner("zoe")]);
}

#[test]
fn test_window_round_trip() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();

    let mut late = TransferWindow::new(start + Duration::days(30), start + Duration::days(40)).unwrap();
    let early = TransferWindow::new(start, start + Duration::days(10)).unwrap();
    store.upsert_window(&late).unwrap();
    store.upsert_window(&early).unwrap();

    let windows = store.list_windows().unwrap();
    assert_eq!(windows, vec![early.clone(), late.clone()]);

    late.active = false;
    store.upsert_window(&late).unwrap();
    let windows = store.list_windows().unwrap();
    assert_eq!(windows.len(), 2);
    assert!(!windows[1].active);
}

#[test]
fn test_period_round_trip() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 9, 1, 15, 0, 0).unwrap();

    let mut second = ScoringPeriod::new(2, start + Duration::days(7), start + Duration::days(9)).unwrap();
    let first = ScoringPeriod::new(1, start, start + Duration::days(2)).unwrap();
    store.upsert_period(&second).unwrap();
    store.upsert_period(&first).unwrap();

    second.completed = true;
    second.scores_settled = true;
    store.upsert_period(&second).unwrap();

    let periods = store.list_periods().unwrap();
    assert_eq!(periods, vec![first, second]);
}

#[test]
fn test_window_flag_flip_is_conditional_and_keeps_bounds() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
    let mut window = TransferWindow::new(start, start + Duration::days(10)).unwrap();
    window.active = false;
    store.upsert_window(&window).unwrap();

    // An admin moves the end while a sweep holds the old row
    window.end = start + Duration::days(20);
    store.upsert_window(&window).unwrap();

    assert!(store.set_window_active(window.id, true).unwrap());
    assert!(!store.set_window_active(window.id, true).unwrap());

    let stored = &store.list_windows().unwrap()[0];
    assert!(stored.active);
    assert_eq!(stored.end, start + Duration::days(20));
}

#[test]
fn test_period_phase_never_leaves_completed() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 9, 1, 15, 0, 0).unwrap();
    let period = ScoringPeriod::new(1, start, start + Duration::days(2)).unwrap();
    store.upsert_period(&period).unwrap();

    assert!(store.set_period_phase(1, true, false).unwrap());
    assert!(!store.set_period_phase(1, true, false).unwrap());
    assert!(store.set_period_phase(1, false, true).unwrap());
    assert!(!store.set_period_phase(1, true, false).unwrap());
    assert!(!store.set_period_phase(7, true, false).unwrap());

    let stored = &store.list_periods().unwrap()[0];
    assert!(stored.completed && !stored.active);
}

#[test]
fn test_mark_period_settled_requires_completion() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 9, 1, 15, 0, 0).unwrap();
    let period = ScoringPeriod::new(1, start, start + Duration::days(2)).unwrap();
    store.upsert_period(&period).unwrap();

    assert!(!store.mark_period_settled(1).unwrap());
    store.set_period_phase(1, false, true).unwrap();
    assert!(store.mark_period_settled(1).unwrap());
    assert!(!store.mark_period_settled(1).unwrap());
    assert!(store.list_periods().unwrap()[0].scores_settled);
}

#[test]
fn test_period_bounds_update_keeps_flags() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let start = Utc.with_ymd_and_hms(2024, 9, 1, 15, 0, 0).unwrap();
    let mut period = ScoringPeriod::new(1, start, start + Duration::days(2)).unwrap();
    period.completed = true;
    period.scores_settled = true;
    store.upsert_period(&period).unwrap();

    let moved = start + Duration::days(3);
    assert!(store.set_period_bounds(1, start, moved).unwrap());
    assert!(!store.set_period_bounds(2, start, moved).unwrap());

    let stored = &store.list_periods().unwrap()[0];
    assert_eq!(stored.end, moved);
    assert!(stored.completed && stored.scores_settled);
}

#[test]
fn test_performance_upsert_is_keyed_by_period_and_athlete() {
    let mut store = SqliteStore::new(":memory:").unwrap();
    let athlete = AthleteId::new(7);

    let first = PerformanceRecord::new(
        3,
        athlete,
        MatchStats {
            rating: 6.0,
            ..Default::default()
        },
    );
    store.upsert_performance(&first).unwrap();

    let corrected = PerformanceRecord::new(
        3,
        athlete,
        MatchStats {
            rating: 6.0,
            goals: 1,
            ..Default::default()
        },
    );
    store.upsert_performance(&corrected).unwrap();
    store
        .upsert_performance(&PerformanceRecord::new(4, athlete, MatchStats::default()))
        .unwrap();

    let stored = store.get_performance(3, athlete).unwrap().unwrap();
    assert_eq!(stored, corrected);
    assert_eq!(stored.fantasy_score, 9.0);

    assert_eq!(store.list_performances(3).unwrap().len(), 1);
    assert!(store.get_performance(5, athlete).unwrap().is_none());
}
