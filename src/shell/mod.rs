// Composition root for the attendance client.
//
// Responsibilities
// - Read config from the environment.
// - Pick the backend (HTTP or in-memory) and wire it into the store and the service.
// - Install logging.

pub mod config;
pub mod logging;
pub mod state;
