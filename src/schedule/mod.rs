pub mod conflict;
pub mod store;
pub mod time;
pub mod types;

pub use store::RoomSchedules;
pub use types::{Occupant, SlotChange};
