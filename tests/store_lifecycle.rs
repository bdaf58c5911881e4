use contactbook::error::ContactError;
use contactbook::record::Contact;
use contactbook::store::Store;
use std::fs;

fn sample() -> Vec<Contact> {
    vec![
        Contact::new("Alice", "555-0100", "alice@example.com"),
        Contact::new("Smith, John", "555 \"work\"", ""),
        Contact::new("Line\nBreak", "", "lb@example.com"),
    ]
}

#[test]
fn missing_file_loads_empty_and_is_not_created() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    let store = Store::new(&path);
    assert!(store.load().expect("load").is_empty());
    assert!(!path.exists(), "load must not create the file");
}

#[test]
fn ensure_initialized_writes_header_only_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    let store = Store::new(&path);
    store.ensure_initialized().expect("init");
    assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Phone,Email\n");
    assert!(store.load().expect("load").is_empty());

    store.save(&sample()).expect("save");
    let before = fs::read(&path).unwrap();
    store.ensure_initialized().expect("init again");
    assert_eq!(fs::read(&path).unwrap(), before, "existing file must be left alone");
}

#[test]
fn save_then_load_reproduces_contents_and_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::new(dir.path().join("contacts.csv"));
    store.save(&sample()).expect("save");
    assert_eq!(store.load().expect("load"), sample());
}

#[test]
fn save_replaces_previous_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    let store = Store::new(&path);
    store.save(&sample()).expect("save");
    store.save(&[Contact::new("Only", "1", "o@x")]).expect("save");
    assert_eq!(fs::read_to_string(&path).unwrap(), "Name,Phone,Email\nOnly,1,o@x\n");
    assert!(!dir.path().join("contacts.csv.tmp").exists(), "temp file must be renamed away");
}

#[test]
fn malformed_row_fails_the_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    fs::write(&path, "Name,Phone,Email\nAlice,1,a@x\nBob,2\n").unwrap();
    let err = Store::new(&path).load().unwrap_err();
    assert!(matches!(err, ContactError::DataCorruption { .. }), "got {err}");
}

#[test]
fn save_into_missing_directory_fails_loudly() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::new(dir.path().join("nope").join("contacts.csv"));
    let err = store.save(&sample()).unwrap_err();
    assert!(matches!(err, ContactError::Persistence(_)));
}

#[test]
fn zero_byte_file_loads_like_header_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    fs::write(&path, "").unwrap();
    assert!(Store::new(&path).load().expect("load").is_empty());
}

#[test]
fn crlf_line_endings_load() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("contacts.csv");
    fs::write(&path, "Name,Phone,Email\r\nA,1,a@x\r\nB,2,b@x\r\n").unwrap();
    assert_eq!(
        Store::new(&path).load().expect("load"),
        vec![Contact::new("A", "1", "a@x"), Contact::new("B", "2", "b@x")]
    );
}

#[test]
fn all_empty_contact_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = Store::new(dir.path().join("contacts.csv"));
    let contacts = vec![
        Contact::default(),
        Contact::new("  padded  ", "\r", "\"quoted\""),
        Contact::default(),
    ];
    store.save(&contacts).expect("save");
    assert_eq!(store.load().expect("load"), contacts);
}
