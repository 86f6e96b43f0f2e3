//! Backend test support utilities
//!
//! Shared helpers for the game server's integration test binaries. Unit tests
//! inside the backend crate use `test_bootstrap` instead, which cannot be
//! reached from `tests/`.

pub mod test_logging;
