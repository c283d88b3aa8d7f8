//! System font discovery for the software rasterizer.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use fontdue::{Font, FontSettings};
use tracing::{debug, warn};

use crate::error::{PostcardError, Result};
use crate::scene::FontSlot;

/// Parsed faces for every slot the templates reference.
///
/// Faces are optional: a machine without a serif or monospace family still
/// renders, falling back down the chain in [`FontLibrary::face`]. Only a
/// system with no usable face at all is an error.
pub struct FontLibrary {
    sans: Option<Font>,
    sans_bold: Option<Font>,
    serif: Option<Font>,
    serif_bold: Option<Font>,
    mono: Option<Font>,
}

impl FontLibrary {
    /// Load the default faces from the system font database.
    pub fn from_system() -> Result<Self> {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!(faces = db.len(), "loaded system font database");

        let library = Self {
            sans: load_face(&db, Family::SansSerif, Weight::NORMAL),
            sans_bold: load_face(&db, Family::SansSerif, Weight::BOLD),
            serif: load_face(&db, Family::Serif, Weight::NORMAL),
            serif_bold: load_face(&db, Family::Serif, Weight::BOLD),
            mono: load_face(&db, Family::Monospace, Weight::NORMAL),
        };
        if library.sans.is_none() && library.serif.is_none() {
            return Err(PostcardError::FontLoad(
                "no usable sans-serif or serif face on this system".into(),
            ));
        }
        Ok(library)
    }

    /// A library with no faces. Text nodes are skipped; useful in tests that
    /// only care about fills and photos.
    pub fn empty() -> Self {
        Self {
            sans: None,
            sans_bold: None,
            serif: None,
            serif_bold: None,
            mono: None,
        }
    }

    /// Resolve a slot to a parsed face, walking the fallback chain: bold
    /// falls back to regular, serif and mono fall back to sans.
    pub fn face(&self, slot: FontSlot, bold: bool) -> Option<&Font> {
        match (slot, bold) {
            (FontSlot::Sans, false) => self.sans.as_ref(),
            (FontSlot::Sans, true) => self.sans_bold.as_ref().or(self.sans.as_ref()),
            (FontSlot::Serif, false) => self.serif.as_ref().or(self.sans.as_ref()),
            (FontSlot::Serif, true) => self
                .serif_bold
                .as_ref()
                .or(self.serif.as_ref())
                .or_else(|| self.face(FontSlot::Sans, true)),
            (FontSlot::Mono, _) => self.mono.as_ref().or(self.sans.as_ref()),
        }
    }
}

fn load_face(db: &Database, family: Family, weight: Weight) -> Option<Font> {
    let query = Query {
        families: &[family],
        weight,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db.query(&query)?;
    let font = db.with_face_data(id, |data, index| {
        Font::from_bytes(
            data,
            FontSettings {
                collection_index: index,
                ..FontSettings::default()
            },
        )
    })?;
    match font {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(?family, ?weight, "failed to parse font face: {err}");
            None
        }
    }
}
