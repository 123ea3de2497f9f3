//! Realtime trial rooms over WebSocket.
//!
//! One `TrialSocket` actor per connection, one `TrialCoordinator`
//! actor per live trial. Sockets forward parsed commands to the
//! coordinator through `TrialRegistry`; the coordinator broadcasts
//! events to the room through `TrialHub`.

pub mod coordinator;
pub mod hub;
pub mod registry;
pub mod session;

#[cfg(test)]
mod tests_ws;
