use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::GymClassId;

/// The classes a member is enrolled in.
///
/// Backed by an ordered set, so repeated class ids collapse into a single
/// enrollment and iteration is always in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentSet(BTreeSet<GymClassId>);

impl EnrollmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, class_id: &GymClassId) -> bool {
        self.0.contains(class_id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GymClassId> {
        self.0.iter()
    }

    /// Raw ids in ascending order, ready to bind as an `int4[]`.
    pub fn to_raw_ids(&self) -> Vec<i32> {
        self.0.iter().map(|id| *id.as_ref()).collect()
    }
}

impl FromIterator<GymClassId> for EnrollmentSet {
    fn from_iter<T: IntoIterator<Item = GymClassId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[i32]> for EnrollmentSet {
    fn from(ids: &[i32]) -> Self {
        ids.iter().copied().map(GymClassId::new).collect()
    }
}
