use super::*;

#[test]
fn empty_database_has_no_face() {
    let db = fontdb::Database::new();
    assert_eq!(pick_face(&db), None);
}

#[test]
fn any_loaded_face_is_picked_without_a_preferred_family() {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return;
    };
    // A database that only knows this face, whatever its family is called.
    let mut db = fontdb::Database::new();
    db.load_font_data(bytes.clone());
    let id = pick_face(&db).expect("face");
    assert_eq!(face_bytes(&db, id), Some(bytes));
}

#[test]
fn system_font_registers_with_the_surface() {
    let Some(bytes) = system_font() else {
        eprintln!("skipping: no system font available");
        return;
    };
    assert!(crate::CpuSurface::new(8, 8, bytes).is_ok());
}

#[test]
fn explicit_path_is_read_or_reported() {
    let missing = Path::new("target/no-such-font.ttf");
    let err = load_font(Some(missing)).unwrap_err();
    assert!(err.to_string().contains("no-such-font.ttf"), "{err}");
}
