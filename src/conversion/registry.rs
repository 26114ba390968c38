//! Discriminator registry
//!
//! Maps the `"object"` field of a response to the kind it materializes as.
//! Built once on first use and read-only afterwards.

use crate::models::object::ObjectKind;
use std::collections::HashMap;
use std::sync::LazyLock;

static OBJECT_CLASSES: LazyLock<HashMap<&'static str, ObjectKind>> = LazyLock::new(|| {
    ObjectKind::REGISTERED
        .iter()
        .filter_map(|kind| kind.tag().map(|tag| (tag, *kind)))
        .collect()
});

/// Kind registered for `tag`, or the generic kind
pub fn object_kind_for(tag: &str) -> ObjectKind {
    OBJECT_CLASSES
        .get(tag)
        .copied()
        .unwrap_or(ObjectKind::Generic)
}
