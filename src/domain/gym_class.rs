use super::{ClassName, GymClassId};

#[derive(Debug, Clone, PartialEq)]
pub struct GymClass {
    pub id: GymClassId,
    pub class_name: ClassName,
}

impl GymClass {
    pub fn new(id: GymClassId, class_name: ClassName) -> Self {
        Self { id, class_name }
    }
}
