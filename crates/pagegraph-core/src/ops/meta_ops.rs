use chrono::{DateTime, Utc};

use crate::model::{Annotation, Props};
use crate::snapshot::Snapshot;

/// Merge a patch into document metadata
pub fn set_meta(snapshot: &mut Snapshot, props: &Props) {
    snapshot.stamp();
    snapshot.meta.props.merge(props);
}

/// Append a note to the annotation log
///
/// The note is stamped with this write's sequence number. `at` is stored
/// only as supplied by the producer.
///
/// # Returns
/// The sequence stamp of the new annotation
pub fn annotate(
    snapshot: &mut Snapshot,
    note: &str,
    pinned: bool,
    at: Option<DateTime<Utc>>,
) -> u64 {
    let sequence = snapshot.stamp();
    snapshot.meta.annotations.push(Annotation {
        note: note.to_string(),
        pinned,
        sequence,
        at,
    });
    sequence
}
