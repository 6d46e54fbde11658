use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{IntroError, IntroResult};

/// Families tried after the generic sans-serif alias, which `fontdb` maps to Arial.
const PREFERRED_SANS: &[&str] = &[
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Helvetica",
    "Segoe UI",
];

/// Best sans-serif face in `db`, falling back to any regular face, then to any face.
pub(crate) fn pick_face(db: &fontdb::Database) -> Option<fontdb::ID> {
    let mut families = vec![fontdb::Family::SansSerif];
    families.extend(PREFERRED_SANS.iter().map(|name| fontdb::Family::Name(*name)));
    let query = fontdb::Query {
        families: &families,
        ..fontdb::Query::default()
    };
    db.query(&query).or_else(|| {
        db.faces()
            .find(|f| f.style == fontdb::Style::Normal && f.weight == fontdb::Weight::NORMAL)
            .or_else(|| db.faces().next())
            .map(|f| f.id)
    })
}

/// Raw bytes of the file (or collection) holding `id`.
pub(crate) fn face_bytes(db: &fontdb::Database, id: fontdb::ID) -> Option<Vec<u8>> {
    db.with_face_data(id, |data, _index| data.to_vec())
}

/// Bytes of a sans-serif system font, as found by `fontdb`.
pub fn system_font() -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let id = pick_face(&db)?;
    if let Some(face) = db.face(id) {
        let family = face.families.first().map(|(name, _)| name.as_str());
        tracing::debug!(?family, faces = db.len(), "resolved system font");
    }
    face_bytes(&db, id)
}

/// Read `path`, or resolve a system sans-serif font when `None`.
pub fn load_font(path: Option<&Path>) -> IntroResult<Vec<u8>> {
    let Some(path) = path else {
        return system_font().ok_or_else(|| {
            IntroError::surface("no system font found; pass a TTF/OTF file explicitly")
        });
    };
    let bytes =
        std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded font");
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
