mod class_name;
mod data_stores;
mod email;
mod enrollment_set;
mod error;
mod gym_class;
mod ids;
mod member;
mod person_name;
mod phone_number;
mod trainer;

pub use class_name::*;
pub use data_stores::*;
pub use email::*;
pub use enrollment_set::*;
pub use error::*;
pub use gym_class::*;
pub use ids::*;
pub use member::*;
pub use person_name::*;
pub use phone_number::*;
pub use trainer::*;
