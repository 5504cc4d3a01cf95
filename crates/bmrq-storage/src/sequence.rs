//! Sequence-id allocation.
//!
//! Advisory at render time: the allocated id is displayed, then written
//! unchanged at submit. Two sessions rendered in the same window can
//! receive the same id; the backing store's append order is the source of
//! truth, not this number.

use tracing::warn;

use crate::local::CsvStore;
use crate::store::SubmissionStore;

/// Allocate the next sequence id, failing soft: a broken remote falls
/// back to the local CSV, and a broken local store yields 1.
pub async fn next_sid(remote: Option<&dyn SubmissionStore>, local: &CsvStore) -> u32 {
    if let Some(store) = remote {
        match store.sequence_hint().await {
            Ok(hint) => return hint.next_sid(),
            Err(e) => warn!(
                backend = store.describe(),
                "sequence lookup failed: {e}, consulting local CSV"
            ),
        }
    }
    match local.sequence_hint().await {
        Ok(hint) => hint.next_sid(),
        Err(e) => {
            warn!("local sequence lookup failed: {e}, defaulting to 1");
            1
        }
    }
}
