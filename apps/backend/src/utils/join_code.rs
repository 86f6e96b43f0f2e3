//! Lobby join codes.
//!
//! Codes are four decimal digits without a leading zero, drawn from the
//! caller's random source so seeded runs hand out the same codes.

use crate::domain::random::RandomSource;

pub const JOIN_CODE_MIN: u64 = 1000;
pub const JOIN_CODE_MAX: u64 = 9999;

/// Draw a join code in `1000..=9999`.
///
/// Uniqueness is the caller's concern; see `LobbyService::create_lobby`.
pub fn generate_join_code<R: RandomSource + ?Sized>(rng: &mut R) -> String {
    rng.between(JOIN_CODE_MIN, JOIN_CODE_MAX).to_string()
}
