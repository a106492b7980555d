//! Multibyte string utilities.
//!
//! Character-granular helpers shared by every matching mode. Rust's `str`
//! type guarantees well-formed UTF-8, so the fallible operations here take
//! raw byte slices: they are the boundary where input read from a terminal
//! (or any other byte source) gets validated before the engine sees it.
//!
//! A distinction worth preserving from the callers' perspective: an *empty*
//! input is a zero-length success, while a *malformed* sequence anywhere in
//! the input is a failure (`None`).

use smallvec::SmallVec;

/// Byte offsets of each character boundary in `s`.
///
/// For a string of `n` characters this returns `n` offsets; indexing into
/// the backing bytes at `offsets[i]` lands on the start of character `i`.
/// The distance functions use this table to walk both strings at character
/// granularity without re-scanning from the front.
///
/// # Example
///
/// ```rust
/// use tabmatch::mbyte::char_offsets;
///
/// let offsets = char_offsets("Äpfel");
/// assert_eq!(&offsets[..], &[0, 2, 3, 4, 5]);
/// ```
pub fn char_offsets(s: &str) -> SmallVec<[usize; 32]> {
    s.char_indices().map(|(idx, _)| idx).collect()
}

/// Expected encoded width of a UTF-8 sequence, judged by its leading byte.
///
/// Returns `None` for continuation bytes and bytes that can never start a
/// valid sequence.
fn utf8_width(leading: u8) -> Option<usize> {
    match leading {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// Decode the single character at the head of `bytes`.
///
/// Returns the scalar value and its encoded width, or `None` when `bytes`
/// is empty or does not start with a complete, well-formed sequence.
pub fn decode_first(bytes: &[u8]) -> Option<(char, usize)> {
    let leading = *bytes.first()?;
    let width = utf8_width(leading)?;
    let chunk = bytes.get(..width)?;
    // from_utf8 rejects bad continuation bytes, overlong forms and surrogates
    let decoded = std::str::from_utf8(chunk).ok()?;
    decoded.chars().next().map(|ch| (ch, width))
}

/// Count the characters (not bytes) in `bytes`.
///
/// Returns `None` if the input contains a malformed sequence anywhere.
/// The empty slice counts as zero characters.
///
/// # Example
///
/// ```rust
/// use tabmatch::mbyte::char_count;
///
/// assert_eq!(char_count(b"apple"), Some(5));
/// assert_eq!(char_count("Äpfel im Baum kosten £".as_bytes()), Some(22));
/// assert_eq!(char_count(b""), Some(0));
/// // a stray continuation byte is not a character
/// assert_eq!(char_count(&"ä".as_bytes()[1..]), None);
/// ```
pub fn char_count(bytes: &[u8]) -> Option<usize> {
    std::str::from_utf8(bytes).ok().map(|s| s.chars().count())
}

/// Test whether the characters at the head of two byte positions are equal.
///
/// Multibyte sequences are consumed atomically: the comparison is between
/// whole characters, never individual bytes. Malformed or empty input on
/// either side compares unequal.
pub fn char_equal(a: &[u8], b: &[u8]) -> bool {
    match (decode_first(a), decode_first(b)) {
        (Some((ca, _)), Some((cb, _))) => ca == cb,
        _ => false,
    }
}

/// Whether `s` contains any character encoded in more than one byte.
pub fn is_multibyte(s: &str) -> bool {
    s.bytes().any(|b| !b.is_ascii())
}
