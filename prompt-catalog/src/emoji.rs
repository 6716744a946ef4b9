//! Emoji validity checks shared by the validator and the repair engine
//!
//! The accepted code-point ranges are intentionally lenient (the last bucket
//! spans most of the BMP symbol blocks). Catalog consumers rely on this
//! acceptance behavior, so the table must not be tightened.

/// Code-point ranges a symbol must touch to count as an emoji
pub const SYMBOL_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // Emoticons
    (0x1F300, 0x1F5FF), // Misc Symbols and Pictographs
    (0x1F680, 0x1F6FF), // Transport and Map
    (0x1F1E0, 0x1F1FF), // Flags
    (0x2600, 0x26FF),   // Misc symbols
    (0x2700, 0x27BF),   // Dingbats
    (0x1F900, 0x1F9FF), // Supplemental Symbols and Pictographs
    (0x1FA00, 0x1FA6F), // Chess Symbols
    (0x1FA70, 0x1FAFF), // Symbols and Pictographs Extended-A
    (0x231A, 0x23FF),   // Miscellaneous Technical
    (0x2B50, 0x2B55),   // Stars
    (0x203C, 0x3299),   // Miscellaneous Symbols
];

/// Longest symbol (in code points) the repair engine keeps as-is
pub const MAX_SYMBOL_CODE_POINTS: usize = 4;

/// True if any character of `text` falls in [`SYMBOL_RANGES`]
pub fn looks_like_emoji(text: &str) -> bool {
    text.chars().any(|c| {
        let code = c as u32;
        SYMBOL_RANGES
            .iter()
            .any(|&(start, end)| (start..=end).contains(&code))
    })
}

/// Stricter check used before keeping an existing symbol during repair
///
/// The symbol must be non-empty, at most [`MAX_SYMBOL_CODE_POINTS`] long and
/// pass [`looks_like_emoji`].
pub fn is_valid_emoji(text: &str) -> bool {
    !text.is_empty() && text.chars().count() <= MAX_SYMBOL_CODE_POINTS && looks_like_emoji(text)
}
