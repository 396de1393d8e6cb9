use std::fs;
use std::path::{Path, PathBuf};

use stratagem::direction::Direction::{Down, Left, Right, Up};
use stratagem::library::{IconRef, LibraryEntry, LibraryError, SequenceLibrary};

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stratagem-library-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write scratch file");
    path
}

#[test]
fn loads_entries_from_json_in_file_order() {
    let path = scratch_file(
        "ok.json",
        r#"{"entries":[
            {"icon":"Resupply.png","steps":["down","down","up","right"]},
            {"name":"Smoke","icon":"Orbital Smoke Strike.png","steps":["right","right","down","up"]}
        ]}"#,
    );

    let library = SequenceLibrary::load(&path).expect("library loads");
    assert_eq!(library.len(), 2);
    assert_eq!(library.entries()[0].name(), "Resupply");
    assert_eq!(library.entries()[0].steps(), &[Down, Down, Up, Right]);
    assert_eq!(library.entries()[1].name(), "Smoke");
    assert_eq!(
        library.entries()[1].icon(),
        &IconRef::new("Orbital Smoke Strike.png")
    );
}

#[test]
fn json_round_trip_preserves_the_standard_set() {
    let standard = SequenceLibrary::standard();
    let text = standard.to_json_string().expect("encode");
    let parsed = SequenceLibrary::from_json_str(&text, Path::new("inline")).expect("decode");
    assert_eq!(parsed, standard);
}

#[test]
fn empty_library_is_rejected() {
    let err = SequenceLibrary::from_json_str(r#"{"entries":[]}"#, Path::new("inline"))
        .expect_err("empty library");
    assert!(matches!(err, LibraryError::Empty));
}

#[test]
fn empty_sequence_is_rejected_with_its_position() {
    let err = SequenceLibrary::new(vec![
        LibraryEntry::new(IconRef::new("a.png"), vec![Up]),
        LibraryEntry::new(IconRef::new("b.png"), vec![]),
    ])
    .expect_err("empty sequence");
    assert!(matches!(err, LibraryError::EmptySequence { index: 1 }));
}

#[test]
fn mismatched_parts_are_rejected() {
    let err = SequenceLibrary::from_parts(
        vec![vec![Up], vec![Left]],
        vec![IconRef::new("only.png")],
    )
    .expect_err("length mismatch");
    assert!(matches!(
        err,
        LibraryError::LengthMismatch {
            sequences: 2,
            icons: 1
        }
    ));
}

#[test]
fn unknown_direction_is_a_parse_error() {
    let path = scratch_file(
        "bad.json",
        r#"{"entries":[{"icon":"x.png","steps":["sideways"]}]}"#,
    );
    let err = SequenceLibrary::load(&path).expect_err("parse error");
    match err {
        LibraryError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let path = std::env::temp_dir().join("stratagem-definitely-missing.json");
    let err = SequenceLibrary::load(&path).expect_err("read error");
    assert!(matches!(err, LibraryError::Read { .. }));
    assert!(err.to_string().contains("stratagem-definitely-missing.json"));
}

#[test]
fn shipped_asset_matches_the_built_in_set() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/stratagems.json");
    let library = SequenceLibrary::load(&path).expect("asset loads");
    assert_eq!(library, SequenceLibrary::standard());
}

#[test]
fn no_path_means_the_built_in_set() {
    let library = SequenceLibrary::load_or_standard(None).expect("standard set");
    assert_eq!(library, SequenceLibrary::standard());
}
