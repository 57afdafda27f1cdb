pub mod ids;
pub mod models;
pub mod pii;

pub use ids::{prefixed_id, IdPrefix};
pub use pii::Masked;
