//! Integration tests for the shared data model

use chrono::NaiveDate;
use quire_core::{
    attach_backlinks, dates, Frontmatter, FrontmatterValue, Note, NoteType, QuireConfig,
};

fn note(id: &str, links: &[&str]) -> Note {
    let frontmatter = Frontmatter::new();
    Note {
        id: id.to_string(),
        content: String::new(),
        note_type: NoteType::derive(id, &frontmatter),
        title: String::new(),
        url: None,
        display_name: id.to_string(),
        frontmatter,
        tags: Vec::new(),
        dates: Vec::new(),
        links: links.iter().map(|l| l.to_string()).collect(),
        tasks: Vec::new(),
        backlinks: Vec::new(),
    }
}

#[test]
fn test_backlinks_are_inverse_of_links() {
    let mut notes = vec![
        note("2024-01-01", &["project"]),
        note("project", &["2024-01-01", "people"]),
        note("people", &["project"]),
    ];
    attach_backlinks(&mut notes);

    for target in &notes {
        for source in &notes {
            let links_here = source.links.contains(&target.id) && source.id != target.id;
            assert_eq!(
                target.backlinks.contains(&source.id),
                links_here,
                "{} -> {}",
                source.id,
                target.id
            );
        }
    }
    assert_eq!(notes[0].note_type, NoteType::Daily);
}

#[test]
fn test_reserved_keys_from_config() {
    let config = QuireConfig::default();
    let fm: Frontmatter = vec![
        ("gist_id".to_string(), FrontmatterValue::from("abc")),
        ("width".to_string(), FrontmatterValue::from("fill")),
        ("status".to_string(), FrontmatterValue::from("active")),
    ]
    .into_iter()
    .collect();

    let visible: Vec<&str> = fm
        .visible_entries(&config.frontmatter.reserved_keys)
        .map(|(key, _)| key)
        .collect();
    assert_eq!(visible, vec!["status"]);
}

#[test]
fn test_week_and_day_helpers_agree_on_display() {
    let day = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
    assert_eq!(dates::display_date(day), "Mon, Feb 5, 2024");
    let (year, week) = dates::parse_week("2024-W06").unwrap();
    assert_eq!(dates::display_week(year, week), "Week 6, 2024");
}
