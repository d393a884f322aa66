//! Request tickets

use crate::filter::FilterState;

/// One issued evaluation request
///
/// Generations increase monotonically per session; only the newest ticket's
/// result may be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub generation: u64,
    pub filters: FilterState,
    pub fingerprint: blake3::Hash,
}

/// Identity of an evaluation: the SQL it will run, or the filters themselves
/// when there is no SQL to run
pub fn fingerprint(sql: Option<&str>, filters: &FilterState) -> blake3::Hash {
    match sql {
        Some(sql) => blake3::hash(sql.as_bytes()),
        None => {
            let mut hasher = blake3::Hasher::new();
            // FilterState serialization cannot fail: plain data, string keys
            let encoded = serde_json::to_vec(filters).unwrap_or_default();
            hasher.update(b"simulated:");
            hasher.update(&encoded);
            hasher.finalize()
        }
    }
}
