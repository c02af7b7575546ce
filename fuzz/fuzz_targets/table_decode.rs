use honggfuzz::fuzz;
use tidsearch::SeedDatabase;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            if let Ok(db) = SeedDatabase::from_bytes(data) {
                let again = db.to_bytes().expect("re-encode");
                assert_eq!(SeedDatabase::from_bytes(&again).ok(), Some(db));
            }
        });
    }
}
