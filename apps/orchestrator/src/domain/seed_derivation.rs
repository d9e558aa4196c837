//! RNG seed derivation utilities for deterministic game behavior.
//!
//! One base seed per game fans out into independent streams for the role
//! shuffle and for each seat's built-in oracle.

/// Derive the seed used to shuffle the role deck.
pub fn derive_deck_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(1)
}

/// Derive a seed for the oracle driving `seat`.
///
/// Same game + seat gives the same oracle behavior; different seats diverge.
pub fn derive_oracle_seed(game_seed: u64, seat: u8) -> u64 {
    game_seed
        .wrapping_add((seat as u64 + 1).wrapping_mul(1_000_003))
        .wrapping_add(2)
}
