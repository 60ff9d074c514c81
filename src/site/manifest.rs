use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::normalize_rel_path;
use crate::foundation::core::Fps;
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::nav::controller::PageId;

/// Intro playback configuration.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct IntroDef {
    /// Manifest-relative directory holding the numbered frame files.
    pub frames_dir: String,
    /// Number of frames in the sequence.
    pub total_frames: u32,
    /// Playback rate.
    pub fps: Fps,
}

/// A navigable page and its header label.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PageDef {
    /// Which page this is.
    pub id: PageId,
    /// Header label text.
    pub label: String,
    /// Translations the label cycles through on hover, primary first.
    #[serde(default)]
    pub label_translations: Vec<String>,
}

/// Promotional popup content.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PromoDef {
    /// Announcement heading shown in the popup.
    pub heading: String,
    /// Manifest-relative path of the poster image.
    pub poster: String,
}

/// The human-edited JSON description of the site.
///
/// Parsed leniently, then checked by [`SiteManifest::validate`] before a
/// session is built from it. A manifest without an `intro` boots straight to
/// the page content.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SiteManifest {
    /// Optional intro sequence; omit to skip the intro entirely.
    #[serde(default)]
    pub intro: Option<IntroDef>,
    /// The site's pages. Must contain `home`, each page at most once.
    pub pages: Vec<PageDef>,
    /// Optional promotional popup.
    #[serde(default)]
    pub promo: Option<PromoDef>,
}

impl SiteManifest {
    /// Parse a manifest from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ShowreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShowreelError::serde(format!("parse site manifest JSON: {e}")))
    }

    /// Parse a manifest from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ShowreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShowreelError::validation(format!("open site manifest '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> ShowreelResult<()> {
        if let Some(intro) = &self.intro {
            normalize_rel_path(&intro.frames_dir)?;
            if intro.total_frames == 0 {
                return Err(ShowreelError::validation(
                    "intro.total_frames must be > 0",
                ));
            }
            Fps::new(intro.fps.num, intro.fps.den)?;
        }

        if !self.pages.iter().any(|p| p.id == PageId::Home) {
            return Err(ShowreelError::validation("pages must include 'home'"));
        }
        for (i, page) in self.pages.iter().enumerate() {
            if self.pages[..i].iter().any(|p| p.id == page.id) {
                return Err(ShowreelError::validation(format!(
                    "duplicate page id {:?}",
                    page.id
                )));
            }
            if page.label.trim().is_empty() {
                return Err(ShowreelError::validation(format!(
                    "page {:?} label must be non-empty",
                    page.id
                )));
            }
        }

        if let Some(promo) = &self.promo {
            if promo.heading.trim().is_empty() {
                return Err(ShowreelError::validation(
                    "promo.heading must be non-empty",
                ));
            }
            normalize_rel_path(&promo.poster)?;
        }

        Ok(())
    }

    /// The page definition for `id`, if the site declares it.
    pub fn page(&self, id: PageId) -> Option<&PageDef> {
        self.pages.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_json() -> &'static str {
        r#"{
            "pages": [
                { "id": "home", "label": "HOME" },
                { "id": "works", "label": "WORKS", "label_translations": ["WORKS", "PRACE"] }
            ]
        }"#
    }

    #[test]
    fn minimal_manifest_parses_and_validates() {
        let m = SiteManifest::from_reader(minimal_json().as_bytes()).unwrap();
        m.validate().unwrap();
        assert!(m.intro.is_none());
        assert_eq!(m.pages.len(), 2);
        assert_eq!(m.page(PageId::Works).unwrap().label, "WORKS");
    }

    #[test]
    fn unknown_page_ids_fail_to_parse() {
        let json = r#"{ "pages": [ { "id": "blog", "label": "BLOG" } ] }"#;
        let err = SiteManifest::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, ShowreelError::Serde(_)));
    }

    #[test]
    fn home_is_required_and_duplicates_rejected() {
        let json = r#"{ "pages": [ { "id": "works", "label": "WORKS" } ] }"#;
        let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
        assert!(m.validate().is_err());

        let json = r#"{ "pages": [
            { "id": "home", "label": "HOME" },
            { "id": "home", "label": "HOME AGAIN" }
        ] }"#;
        let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
        assert!(m.validate().is_err());
    }

    #[test]
    fn intro_fields_are_checked() {
        let json = r#"{
            "intro": { "frames_dir": "/abs/path", "total_frames": 120, "fps": { "num": 50, "den": 1 } },
            "pages": [ { "id": "home", "label": "HOME" } ]
        }"#;
        let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
        assert!(m.validate().is_err(), "absolute frames_dir must be rejected");

        let json = r#"{
            "intro": { "frames_dir": "clapper", "total_frames": 0, "fps": { "num": 50, "den": 1 } },
            "pages": [ { "id": "home", "label": "HOME" } ]
        }"#;
        let m = SiteManifest::from_reader(json.as_bytes()).unwrap();
        assert!(m.validate().is_err(), "zero-frame intro must be rejected");
    }
}
