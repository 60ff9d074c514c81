//! Site manifest JSON fixtures: parse, validation, and error surfaces.

use showreel::{PageId, ShowreelError, SiteManifest};

const FULL: &str = r#"{
    "intro": {
        "frames_dir": "ClapperBoard",
        "total_frames": 120,
        "fps": { "num": 50, "den": 1 }
    },
    "pages": [
        { "id": "home", "label": "HOME" },
        { "id": "contact", "label": "CONTACT" },
        { "id": "works", "label": "WORKS", "label_translations": ["WORKS", "PRACE", "WERKE"] },
        { "id": "about", "label": "ABOUT" }
    ],
    "promo": {
        "heading": "In cinemas this Diwali",
        "poster": "posters/announcement.png"
    }
}"#;

#[test]
fn full_manifest_round_trips() {
    let m = SiteManifest::from_reader(FULL.as_bytes()).unwrap();
    m.validate().unwrap();

    let intro = m.intro.as_ref().unwrap();
    assert_eq!(intro.total_frames, 120);
    assert_eq!(intro.fps.as_f64(), 50.0);
    assert_eq!(
        m.page(PageId::Works).unwrap().label_translations,
        vec!["WORKS", "PRACE", "WERKE"]
    );
    assert!(m.promo.is_some());

    // Serialize and parse again: identical structure.
    let json = serde_json::to_string(&m).unwrap();
    let again = SiteManifest::from_reader(json.as_bytes()).unwrap();
    again.validate().unwrap();
    assert_eq!(again.pages.len(), 4);
}

#[test]
fn missing_pages_field_is_a_serde_error() {
    let err = SiteManifest::from_reader(r#"{ "intro": null }"#.as_bytes()).unwrap_err();
    assert!(matches!(err, ShowreelError::Serde(_)), "got {err}");
}

#[test]
fn traversal_in_poster_path_fails_validation() {
    let json = r#"{
        "pages": [ { "id": "home", "label": "HOME" } ],
        "promo": { "heading": "Soon", "poster": "../outside.png" }
    }"#;
    let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
    let err = m.validate().unwrap_err();
    assert!(matches!(err, ShowreelError::Validation(_)), "got {err}");
}

#[test]
fn blank_page_label_fails_validation() {
    let json = r#"{ "pages": [ { "id": "home", "label": "   " } ] }"#;
    let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
    assert!(m.validate().is_err());
}

#[test]
fn bad_fps_fails_validation_after_parse() {
    let json = r#"{
        "intro": { "frames_dir": "clapper", "total_frames": 120, "fps": { "num": 50, "den": 0 } },
        "pages": [ { "id": "home", "label": "HOME" } ]
    }"#;
    let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
    assert!(m.validate().is_err());
}
