use crate::errors::Result;
use crate::model::Props;
use crate::snapshot::Snapshot;

/// Merge a patch into the global style document
pub fn set_global_style(snapshot: &mut Snapshot, props: &Props) {
    snapshot.stamp();
    snapshot.styles.global.merge(props);
}

/// Merge a patch into one entity's style overrides
///
/// # Errors
/// * `EntityNotFound` - entity doesn't exist
/// * `EntityAlreadyRemoved` - entity was removed
pub fn set_entity_style(snapshot: &mut Snapshot, entity_ref: &str, props: &Props) -> Result<()> {
    snapshot.get_entity(entity_ref)?;
    snapshot.stamp();
    snapshot.styles.merge_entity(entity_ref, props);
    Ok(())
}
