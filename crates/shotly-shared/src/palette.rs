//! The fixed reaction palette.
//!
//! Reactions are restricted to this set; the coordinator rejects anything
//! else so arbitrary strings never reach the shared activity feed.

/// Every reaction glyph a visitor can pick.
pub const REACTION_PALETTE: [&str; 5] = ["❤️", "🔥", "👏", "😂", "😍"];

/// The glyph used when a reaction is submitted without an explicit choice.
pub const DEFAULT_REACTION: &str = "❤️";

/// Whether `emoji` is a member of the palette.
pub fn is_palette_emoji(emoji: &str) -> bool {
    REACTION_PALETTE.contains(&emoji)
}
