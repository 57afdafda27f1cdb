pub mod events;

pub use events::{OrderCreatedEvent, OrderEvent};
