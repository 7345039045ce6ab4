//! Service Layer
//!
//! Orchestrates domain logic per device and reports through the ports.

pub mod session_manager;

pub use session_manager::SessionManager;
