use super::*;
use std::io::Write as _;

fn event(id: &str, status: EventStatus) -> EventRecord {
    EventRecord {
        id: EventId::new(id),
        title: format!("Event {id}"),
        subtitle: "Subtitle".into(),
        tamil_title: None,
        date: "March 1, 2026".into(),
        time: "6:00 PM".into(),
        end_time: None,
        location: "Brisbane".into(),
        venue: None,
        address: None,
        description: "Description".into(),
        long_description: None,
        image: "/cover.png".into(),
        featured: false,
        status,
        registration_open: false,
        registration_link: None,
        ticket_price: None,
        sponsors: None,
        video_url: None,
        gallery: None,
        highlights: None,
        schedule: None,
        organizer: None,
        contact_email: None,
        contact_phone: None,
    }
}

fn mixed_catalog() -> Catalog {
    Catalog::from_records(vec![
        event("a", EventStatus::Completed),
        event("b", EventStatus::Upcoming),
        event("c", EventStatus::Ongoing),
        event("d", EventStatus::Upcoming),
        event("e", EventStatus::Completed),
    ])
    .expect("catalog")
}

fn ids(records: &[&EventRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.to_string()).collect()
}

#[test]
fn builtin_catalog_loads_in_definition_order() {
    let catalog = Catalog::builtin().expect("builtin");
    let ids: Vec<&str> = catalog.ids().map(EventId::as_str).collect();
    assert_eq!(ids, vec!["pongal-2026", "tamil-new-year-2026"]);

    let pongal = catalog.find_by_id("pongal-2026").expect("pongal");
    assert!(pongal.registration_open);
    assert!(pongal.featured);
    assert_eq!(pongal.status, EventStatus::Upcoming);
    assert_eq!(pongal.schedule.as_ref().map(Vec::len), Some(7));
    assert!(pongal
        .about_text()
        .starts_with("Join Queensland Tamil Mandram"));
}

#[test]
fn find_by_id_returns_each_record() {
    let catalog = mixed_catalog();
    for record in catalog.list_all() {
        assert_eq!(catalog.find_by_id(record.id.as_str()), Some(record));
    }
}

#[test]
fn find_by_id_reports_absence() {
    let catalog = mixed_catalog();
    assert!(catalog.find_by_id("nonexistent-id").is_none());
    assert!(catalog.find_by_id("").is_none());
    assert!(catalog.find_by_id("A").is_none());
}

#[test]
fn status_groups_partition_catalog_in_order() {
    let catalog = mixed_catalog();
    assert_eq!(ids(&catalog.list_by_status(EventStatus::Upcoming)), vec!["b", "d"]);
    assert_eq!(ids(&catalog.list_by_status(EventStatus::Ongoing)), vec!["c"]);
    assert_eq!(ids(&catalog.list_by_status(EventStatus::Completed)), vec!["a", "e"]);

    let total: usize = EventStatus::ALL
        .into_iter()
        .map(|status| catalog.list_by_status(status).len())
        .sum();
    assert_eq!(total, catalog.len());
}

#[test]
fn list_all_is_stable_across_calls() {
    let catalog = mixed_catalog();
    assert_eq!(catalog.list_all(), catalog.list_all());
}

#[test]
fn rejects_duplicate_ids() {
    let err = Catalog::from_records(vec![
        event("same", EventStatus::Upcoming),
        event("same", EventStatus::Completed),
    ])
    .expect_err("duplicate");
    assert!(matches!(err, CatalogError::DuplicateId(id) if id.as_str() == "same"));
}

#[test]
fn rejects_ids_that_are_not_path_safe() {
    let err = Catalog::from_records(vec![event("Pongal 2026", EventStatus::Upcoming)])
        .expect_err("invalid id");
    assert!(matches!(err, CatalogError::InvalidId(_)));
}

#[test]
fn rejects_blank_required_fields() {
    let mut record = event("blank", EventStatus::Upcoming);
    record.title = "  ".into();
    let err = Catalog::from_records(vec![record]).expect_err("blank title");
    assert!(matches!(
        err,
        CatalogError::MissingField { field: "title", .. }
    ));
}

#[test]
fn rejects_blank_schedule_activity() {
    let mut record = event("sched", EventStatus::Upcoming);
    record.schedule = Some(vec![shared::domain::ScheduleItem {
        time: "1:00 PM".into(),
        activity: String::new(),
    }]);
    let err = Catalog::from_records(vec![record]).expect_err("blank activity");
    assert!(matches!(
        err,
        CatalogError::MissingField {
            field: "schedule.activity",
            ..
        }
    ));
}

#[test]
fn parses_minimal_toml_catalog() {
    let catalog = Catalog::from_toml_str(
        r#"
        [[events]]
        id = "diwali-2026"
        title = "Diwali"
        subtitle = "Festival of Lights"
        date = "November 8, 2026"
        time = "6:00 PM"
        location = "Brisbane"
        description = "Lights and sweets."
        image = "/diwali.png"
        status = "ongoing"
        "#,
    )
    .expect("catalog");

    let diwali = catalog.find_by_id("diwali-2026").expect("diwali");
    assert_eq!(diwali.status, EventStatus::Ongoing);
    assert!(!diwali.featured);
    assert!(diwali.highlights.is_none());
}

#[test]
fn empty_catalog_file_is_valid() {
    let catalog = Catalog::from_toml_str("").expect("empty");
    assert!(catalog.is_empty());
}

#[test]
fn rejects_unknown_status() {
    let err = Catalog::from_toml_str(
        r#"
        [[events]]
        id = "x"
        title = "X"
        subtitle = "X"
        date = "d"
        time = "t"
        location = "l"
        description = "d"
        image = "/x.png"
        status = "cancelled"
        "#,
    )
    .expect_err("bad status");
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn loads_catalog_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(BUILTIN_EVENTS.as_bytes()).expect("write");

    let catalog = Catalog::load(file.path()).expect("load");
    assert_eq!(catalog.len(), 2);
}

#[test]
fn missing_file_reports_path() {
    let err = Catalog::load("/definitely/not/here/events.toml").expect_err("missing");
    assert!(matches!(err, CatalogError::Read { .. }));
    assert!(err.to_string().contains("/definitely/not/here/events.toml"));
}
