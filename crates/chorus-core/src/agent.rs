//! Reserved agent names.
//!
//! Every sequence is bounded by two sentinel agents that always occupy the
//! first and last slots of the agent ordering. Blocks are bounded by virtual
//! agents synthesized by the generator.

/// Name of the sentinel agent pinned to the far left.
pub const LEFT_SENTINEL: &str = "[";

/// Name of the sentinel agent pinned to the far right.
pub const RIGHT_SENTINEL: &str = "]";

/// Returns `true` if `name` is one of the two sentinel agents.
pub fn is_sentinel(name: &str) -> bool {
    name == LEFT_SENTINEL || name == RIGHT_SENTINEL
}

/// Returns the `(left, right)` virtual boundary agent names for the block
/// numbered `index`.
///
/// # Examples
///
/// ```
/// use chorus_core::agent::block_boundary_names;
///
/// let (left, right) = block_boundary_names(3);
/// assert_eq!(left, "__BLOCK3[");
/// assert_eq!(right, "__BLOCK3]");
/// ```
pub fn block_boundary_names(index: usize) -> (String, String) {
    (
        format!("__BLOCK{index}{LEFT_SENTINEL}"),
        format!("__BLOCK{index}{RIGHT_SENTINEL}"),
    )
}
