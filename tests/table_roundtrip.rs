use quickcheck::quickcheck;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use tempfile::{tempdir, NamedTempFile};
use tidsearch::{IdPair, SeedDatabase, TidSearchError};

quickcheck! {
    fn bytes_roundtrip(entries: Vec<(u32, u32)>, low: u16, high: u16, timeout: u32) -> bool {
        let db = SeedDatabase::from_entries(IdPair::new(low, high), timeout, entries);
        let bytes = db.to_bytes().unwrap();
        SeedDatabase::from_bytes(&bytes).unwrap() == db
    }
}

#[test]
fn empty_table_roundtrips_through_disk() {
    let tmp = NamedTempFile::new().unwrap();
    let db = SeedDatabase::new(IdPair::new(0, 28552), 3030);
    db.save(tmp.path()).unwrap();
    let loaded = SeedDatabase::load(tmp.path()).unwrap();
    assert_eq!(loaded, db);
    assert!(loaded.is_empty());
}

#[test]
fn large_random_table_roundtrips_through_disk() {
    let mut rng = StdRng::seed_from_u64(42);
    let entries: Vec<(u32, u32)> = (0..50_000).map(|_| (rng.gen(), rng.gen_range(0..3030))).collect();
    let db = SeedDatabase::from_entries(IdPair::new(12345, 54321), 3030, entries);

    let dir = tempdir().unwrap();
    let path = db.default_path(dir.path());
    assert!(path.ends_with("12345-54321.dat"));
    db.save(&path).unwrap();
    assert_eq!(SeedDatabase::load(&path).unwrap(), db);
}

#[test]
fn extreme_keys_and_values_survive() {
    let db = SeedDatabase::from_entries(
        IdPair::new(u16::MAX, 0),
        u32::MAX,
        [(0, 0), (u32::MAX, u32::MAX), (0x8000_0000, 1)],
    );
    let back = SeedDatabase::from_bytes(&db.to_bytes().unwrap()).unwrap();
    assert_eq!(back.get(u32::MAX), Some(u32::MAX));
    assert_eq!(back.get(0), Some(0));
    assert_eq!(back, db);
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = SeedDatabase::load(dir.path().join("0-0.dat")).unwrap_err();
    assert!(matches!(err, TidSearchError::Io(_)));
}

#[test]
fn truncated_file_fails_fast() {
    let db = SeedDatabase::from_entries(IdPair::default(), 10, [(1, 2), (3, 4)]);
    let bytes = db.to_bytes().unwrap();
    let tmp = NamedTempFile::new().unwrap();
    fs::write(tmp.path(), &bytes[..bytes.len() - 1]).unwrap();
    assert!(SeedDatabase::load(tmp.path()).is_err());
}

#[test]
fn trailing_garbage_fails() {
    let db = SeedDatabase::from_entries(IdPair::default(), 10, [(1, 2)]);
    let mut bytes = db.to_bytes().unwrap();
    bytes.push(0);
    assert!(SeedDatabase::from_bytes(&bytes).is_err());
}

#[test]
fn export_writes_sorted_csv() {
    let db = SeedDatabase::from_entries(IdPair::default(), 10, [(0xB281_A4EE, 2), (16, 9)]);
    let dir = tempdir().unwrap();
    let out = dir.path().join("table.csv");
    db.export_csv(&out).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text, "seed,advance\n00000010,9\nB281A4EE,2\n");
}
