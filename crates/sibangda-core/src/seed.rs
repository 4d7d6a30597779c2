//! # Seed Data
//!
//! Initial contents of the four collections, loaded whenever a fresh
//! [`Snapshot`](crate::snapshot::Snapshot) is created.
//!
//! Organizations keep their published ids `"1"` through `"5"`. The other
//! collections get stable ids (`conflict-01`, `handling-01`, `wasnas-01`,
//! ...) in district order so seeded entries can be targeted for update and
//! delete like any other record.

use crate::district::District;
use crate::record::{
    CaseDetail, Category, ConflictHandlingRecord, ConflictLevel, ConflictRecord, ForeignerRecord,
    HandlingStatus, IncidentDetail, OrmasRecord, OrmasStatus, RecordId,
};

fn seed_id(prefix: &str, index: usize) -> RecordId {
    RecordId::from_seed(format!("{prefix}-{:02}", index + 1))
}

fn incident(location: &str, time: &str, description: &str, remarks: &str) -> IncidentDetail {
    IncidentDetail {
        location: location.to_string(),
        time: time.to_string(),
        description: description.to_string(),
        remarks: remarks.to_string(),
    }
}

fn case(location: &str, time: &str, description: &str, action: &str, remarks: &str) -> CaseDetail {
    CaseDetail {
        location: location.to_string(),
        time: time.to_string(),
        description: description.to_string(),
        action: action.to_string(),
        remarks: remarks.to_string(),
    }
}

/// Seeded potential-conflict records, one per district.
pub fn conflicts() -> Vec<ConflictRecord> {
    use ConflictLevel::*;
    use District::*;

    let rows: [(District, ConflictLevel, u32, &str); 10] = [
        (Mataram, Low, 2, "Situasi kondusif"),
        (LombokBarat, Low, 1, "Stabil"),
        (LombokTengah, Medium, 5, "Potensi sengketa lahan"),
        (LombokTimur, Medium, 4, "Gesekan antar pemuda"),
        (LombokUtara, Low, 0, "Aman"),
        (SumbawaBarat, Low, 1, "Terkendali"),
        (Sumbawa, Medium, 3, "Isu lingkungan"),
        (Dompu, High, 8, "Konflik batas wilayah"),
        (Bima, High, 12, "Rawan konflik sosial"),
        (KotaBima, Medium, 6, "Aksi unjuk rasa"),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (district, level, incidents, description))| {
            let details = match district {
                Mataram => vec![
                    incident("Kec. Mataram", "12 Feb 2024", "Gesekan kecil antar pedagang", "Selesai dimediasi"),
                    incident("Kec. Ampenan", "20 Feb 2024", "Kericuhan parkir", "Terkendali"),
                ],
                LombokTengah => vec![
                    incident("Desa Kuta", "10 Feb 2024", "Klaim lahan sirkuit", "Proses negosiasi"),
                    incident("Kec. Pujut", "15 Feb 2024", "Protes warga lokal", "Pendampingan aparat"),
                ],
                _ => Vec::new(),
            };
            ConflictRecord {
                id: seed_id("conflict", i),
                district,
                level,
                incidents,
                description: description.to_string(),
                location_detail: None,
                incident_time: None,
                participants_count: None,
                image_url: None,
                details,
            }
        })
        .collect()
}

/// Seeded conflict-handling records, one per district.
pub fn handling() -> Vec<ConflictHandlingRecord> {
    use District::*;
    use HandlingStatus::*;

    let rows: [(District, HandlingStatus, u32, &str); 10] = [
        (Mataram, Resolved, 2, "Mediasi selesai"),
        (LombokBarat, Resolved, 1, "Koordinasi aparat"),
        (LombokTengah, InProgress, 5, "Tim terpadu turun"),
        (LombokTimur, InProgress, 4, "Dialog komunitas"),
        (LombokUtara, Resolved, 0, "Pemantauan rutin"),
        (SumbawaBarat, Resolved, 1, "Sosialisasi"),
        (Sumbawa, Pending, 3, "Identifikasi awal"),
        (Dompu, InProgress, 8, "Pengamanan lokasi"),
        (Bima, InProgress, 12, "Operasi gabungan"),
        (KotaBima, Resolved, 6, "Kesepakatan damai"),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (district, status, cases, last_action))| {
            let details = match district {
                Mataram => vec![case(
                    "Pasar Mandalika",
                    "14 Feb 2024",
                    "Sengketa lapak",
                    "Mediasi Polsek",
                    "Selesai",
                )],
                LombokTengah => vec![
                    case("Kawasan Mandalika", "11 Feb 2024", "Pemblokiran jalan", "Dialog persuasif", "Jalan dibuka"),
                    case("Desa Rembitan", "18 Feb 2024", "Sengketa waris", "Pendampingan hukum", "Berjalan"),
                ],
                _ => Vec::new(),
            };
            ConflictHandlingRecord {
                id: seed_id("handling", i),
                district,
                status,
                cases,
                last_action: last_action.to_string(),
                location_detail: None,
                incident_time: None,
                participants_count: None,
                image_url: None,
                media_urls: Vec::new(),
                details,
            }
        })
        .collect()
}

/// Seeded foreigner (Wasnas) records, one per district.
pub fn foreigners() -> Vec<ForeignerRecord> {
    let rows: [(District, u32, u32); 10] = [
        (District::Mataram, 120, 15),
        (District::LombokBarat, 450, 8),
        (District::LombokTengah, 320, 12),
        (District::LombokTimur, 85, 4),
        (District::LombokUtara, 600, 25),
        (District::SumbawaBarat, 150, 2),
        (District::Sumbawa, 40, 3),
        (District::Dompu, 12, 1),
        (District::Bima, 8, 1),
        (District::KotaBima, 25, 2),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (district, count, institutions))| ForeignerRecord {
            id: seed_id("wasnas", i),
            district,
            count,
            institutions,
            location_detail: None,
            activity_description: None,
        })
        .collect()
}

/// Seeded civic organizations.
pub fn ormas() -> Vec<OrmasRecord> {
    let rows: [(&str, &str, &str, District, OrmasStatus, u32); 5] = [
        ("1", "Paguyuban NTB Bersatu", "Sosial", District::Mataram, OrmasStatus::Active, 150),
        ("2", "LSM Suara Rakyat", "Politik", District::LombokTimur, OrmasStatus::Active, 80),
        ("3", "Yayasan Pendidikan Islam", "Keagamaan", District::LombokTengah, OrmasStatus::Active, 300),
        ("4", "Forum Pemuda Kreatif", "Kepemudaan", District::Sumbawa, OrmasStatus::Active, 45),
        ("5", "Himpunan Nelayan", "Ekonomi", District::Bima, OrmasStatus::Inactive, 120),
    ];

    rows.into_iter()
        .map(|(id, name, category, district, status, member_count)| OrmasRecord {
            id: RecordId::from_seed(id),
            name: name.to_string(),
            category: Category::new(category),
            district,
            status,
            member_count,
            leader_name: None,
            address: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    #[test]
    fn every_seeded_collection_covers_all_districts_in_order() {
        let conflict_districts: Vec<District> = conflicts().iter().map(|r| r.district).collect();
        assert_eq!(conflict_districts, District::ALL.to_vec());
        let handling_districts: Vec<District> = handling().iter().map(|r| r.district).collect();
        assert_eq!(handling_districts, District::ALL.to_vec());
        let foreigner_districts: Vec<District> = foreigners().iter().map(|r| r.district).collect();
        assert_eq!(foreigner_districts, District::ALL.to_vec());
    }

    #[test]
    fn seed_ids_are_stable_and_unique() {
        let ids: Vec<String> = conflicts().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids[0], "conflict-01");
        assert_eq!(ids[9], "conflict-10");
        assert_eq!(handling()[4].id, "handling-05");
        assert_eq!(foreigners()[2].id, "wasnas-03");

        let ormas_ids: Vec<String> = ormas().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ormas_ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn seeded_details_match_source() {
        let conflicts = conflicts();
        assert_eq!(conflicts[0].details.len(), 2);
        assert_eq!(conflicts[0].details[1].location, "Kec. Ampenan");
        assert_eq!(conflicts[2].details[0].description, "Klaim lahan sirkuit");
        assert!(conflicts[8].details.is_empty());

        let handling = handling();
        assert_eq!(handling[0].details[0].action, "Mediasi Polsek");
        assert_eq!(handling[2].details.len(), 2);
        assert_eq!(handling[6].status, HandlingStatus::Pending);
    }

    #[test]
    fn seed_records_pass_validation() {
        assert!(conflicts().iter().all(|r| r.validate().is_ok()));
        assert!(handling().iter().all(|r| r.validate().is_ok()));
        assert!(foreigners().iter().all(|r| r.validate().is_ok()));
        assert!(ormas().iter().all(|r| r.validate().is_ok()));
    }

    #[test]
    fn himpunan_nelayan_is_inactive() {
        let inactive: Vec<String> = ormas()
            .into_iter()
            .filter(|r| r.status == OrmasStatus::Inactive)
            .map(|r| r.name)
            .collect();
        assert_eq!(inactive, vec!["Himpunan Nelayan"]);
    }
}
