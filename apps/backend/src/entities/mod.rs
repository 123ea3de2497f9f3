//! SeaORM entities mirroring the durable schema.

pub mod evidence;
pub mod transcript_entries;
pub mod trials;
pub mod users;
pub mod witnesses;
