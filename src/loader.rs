// 📂 Raw Record Loader
// Best-effort reads of the raw survey records. Missing keys, read failures
// and malformed JSON all collapse to "absent" - the loader never raises.

use crate::store::RecordStore;
use serde_json::Value;

// ============================================================================
// STORAGE KEYS
// ============================================================================

/// Names of the store keys the loader reads.
///
/// The basic profile exists as a final/draft pair: the final record wins,
/// the draft is the fallback while the survey is still in progress.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    pub basic_final: String,
    pub basic_draft: String,
    pub design: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            basic_final: "basic:final".to_string(),
            basic_draft: "basic:draft".to_string(),
            design: "design".to_string(),
        }
    }
}

// ============================================================================
// LOADER
// ============================================================================

/// The pair of raw records the normalizer consumes. Either side may be
/// absent. The raw JSON text that produced each side is kept so the
/// snapshot can fingerprint its inputs.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub basic: Option<Value>,
    pub design: Option<Value>,
    pub basic_raw: Option<String>,
    pub design_raw: Option<String>,
}

/// Read and deserialize `(basic, design)` from the store.
///
/// Resolution order for the basic record: final key first, then draft.
/// A key that fails to read or parse is treated identically to an absent
/// one.
pub fn load_records(store: &dyn RecordStore, keys: &StorageKeys) -> LoadedRecords {
    let basic = read_json(store, &keys.basic_final)
        .or_else(|| read_json(store, &keys.basic_draft));
    let design = read_json(store, &keys.design);

    let (basic, basic_raw) = split(basic);
    let (design, design_raw) = split(design);

    LoadedRecords {
        basic,
        design,
        basic_raw,
        design_raw,
    }
}

/// Read one key and parse it as JSON; any failure yields `None`.
fn read_json(store: &dyn RecordStore, key: &str) -> Option<(Value, String)> {
    let raw = store.read(key).ok().flatten()?;
    let value = serde_json::from_str::<Value>(&raw).ok()?;
    Some((value, raw))
}

fn split(pair: Option<(Value, String)>) -> (Option<Value>, Option<String>) {
    match pair {
        Some((value, raw)) => (Some(value), Some(raw)),
        None => (None, None),
    }
}
