//! # Seeded Dashboard Scenarios
//!
//! End-to-end checks over the built-in seed: district filtering feeding into
//! level counts, handling status rollups, and a full edit cycle through the
//! snapshot (insert, update in place, declined and confirmed delete).

use sibangda_core::{
    aggregate_status, drill_down, filter_by_district, group_by_category, handling_rollup,
    route, Confirmation, ConflictHandlingRecord, ConflictLevel, ConflictRecord, District,
    DistrictFilter, HandlingStatus, RecordId, Snapshot, UpsertOutcome, View, ViewContent,
};

fn high_count(records: &[ConflictRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.level == ConflictLevel::High)
        .count()
}

#[test]
fn bima_filter_has_one_high_level_conflict() {
    let snapshot = Snapshot::seeded();
    let bima = filter_by_district(&snapshot.conflicts, DistrictFilter::Only(District::Bima));
    assert_eq!(high_count(&bima), 1);
}

#[test]
fn all_districts_have_exactly_dompu_and_bima_at_high() {
    let snapshot = Snapshot::seeded();
    let all = filter_by_district(&snapshot.conflicts, DistrictFilter::All);
    assert_eq!(high_count(&all), 2);
    let districts: Vec<District> = all
        .iter()
        .filter(|r| r.level == ConflictLevel::High)
        .map(|r| r.district)
        .collect();
    assert_eq!(districts, vec![District::Dompu, District::Bima]);
}

#[test]
fn mixed_statuses_aggregate_to_pending() {
    assert_eq!(
        aggregate_status([
            HandlingStatus::Resolved,
            HandlingStatus::InProgress,
            HandlingStatus::Pending,
        ]),
        HandlingStatus::Pending
    );
}

#[test]
fn second_handling_entry_raises_district_marker() {
    let snapshot = Snapshot::seeded();
    let extra = ConflictHandlingRecord {
        id: RecordId::new("handling-extra").unwrap(),
        district: District::Mataram,
        status: HandlingStatus::Pending,
        cases: 3,
        last_action: "Pengumpulan data".to_string(),
        location_detail: Some("Kec. Cakranegara".to_string()),
        incident_time: None,
        participants_count: Some(40),
        image_url: None,
        media_urls: vec![],
        details: vec![],
    };
    let (next, _) = snapshot.upsert(extra).unwrap();
    let mataram = handling_rollup(&next.handling)
        .into_iter()
        .find(|m| m.district == District::Mataram)
        .unwrap();
    assert_eq!(mataram.status, HandlingStatus::Pending);
    assert_eq!(mataram.total_cases, 5);
    assert_eq!(mataram.record_count, 2);
    // Newest entry is prepended, so it supplies the latest action text.
    assert_eq!(mataram.last_action, "Pengumpulan data");
}

#[test]
fn edit_cycle_through_snapshot() {
    let snapshot = Snapshot::seeded();
    let id = RecordId::new("conflict-05").unwrap();

    let mut record = snapshot.find::<ConflictRecord>(&id).unwrap().clone();
    record.level = ConflictLevel::High;
    record.incidents = 3;
    let (updated, outcome) = snapshot.upsert(record).unwrap();
    assert_eq!(outcome, UpsertOutcome::Replaced(4));
    assert_eq!(high_count(&updated.conflicts), 3);

    let (kept, removal) = updated.remove::<ConflictRecord>(&id, Confirmation::Declined);
    assert!(!removal.confirmed);
    assert_eq!(kept.conflicts.len(), 10);

    let (removed, removal) = kept.remove::<ConflictRecord>(&id, Confirmation::Confirmed);
    assert_eq!(removal.removed, 1);
    assert_eq!(removed.conflicts.len(), 9);
    assert_eq!(high_count(&removed.conflicts), 2);
}

#[test]
fn seeded_drill_down_uses_details_or_falls_back() {
    let snapshot = Snapshot::seeded();
    let tengah = drill_down(&snapshot.conflicts, District::LombokTengah);
    let locations: Vec<&str> = tengah.iter().map(|p| p.location.as_str()).collect();
    assert_eq!(locations, vec!["Desa Kuta", "Kec. Pujut"]);

    let bima = drill_down(&snapshot.handling, District::Bima);
    assert_eq!(bima.len(), 1);
    assert_eq!(bima[0].location, "Bima");
    assert_eq!(bima[0].count, 12);
}

#[test]
fn seeded_categories_each_appear_once() {
    let snapshot = Snapshot::seeded();
    let tally = group_by_category(&snapshot.ormas);
    let names: Vec<&str> = tally.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sosial", "Politik", "Keagamaan", "Kepemudaan", "Ekonomi"]);
    assert!(tally.iter().all(|c| c.value == 1));
}

#[test]
fn dashboard_view_honours_filter() {
    let snapshot = Snapshot::seeded();
    let model = route(&snapshot, View::from_name("dashboard"), DistrictFilter::Only(District::Dompu));
    assert_eq!(model.title, "Dashboard SIBANGDA");
    match model.content {
        ViewContent::Dashboard(overview) => {
            assert_eq!(overview.stats.active_conflicts, 1);
            assert_eq!(overview.stats.total_foreigners, 12);
            assert_eq!(overview.stats.total_ormas, 0);
        }
        other => panic!("expected dashboard, got {other:?}"),
    }
}
