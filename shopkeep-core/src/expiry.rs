//! Expiry stamps on batch item names.
//!
//! Successive inventory batches of the same product are told apart by an
//! eight-digit `YYYYMMDD` stamp appended to the item name. Appending
//! happens when a batch is duplicated; stripping happens when the next
//! batch is promoted after the old one sells out.

/// Length of the `YYYYMMDD` stamp.
pub const EXPIRY_STAMP_LEN: usize = 8;

/// Append an expiry stamp to an item name, the way batch duplicates are
/// named (no separator).
pub fn append_expiry(name: &str, expiry: &str) -> String {
    format!("{name}{expiry}")
}

/// Strip a trailing expiry stamp from a batch item name.
///
/// Returns `None` when the name does not end in a full eight-digit stamp,
/// so a hand-renamed item is never blindly truncated.
pub fn strip_expiry(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(EXPIRY_STAMP_LEN)?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (head, tail) = name.split_at(split);
    tail.bytes().all(|b| b.is_ascii_digit()).then_some(head)
}
