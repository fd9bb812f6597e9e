use thiserror::Error;

/// Errors raised while building a paging view.
///
/// Gesture handling itself never fails: stale or out-of-range requests are
/// ignored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PagingError {
    /// A paging view needs at least one page.
    #[error("a paging view needs at least one page")]
    NoPages,
    /// The page width must be finite and greater than zero.
    #[error("invalid page width {0}: must be finite and greater than zero")]
    InvalidPageWidth(f32),
    /// A style option holds a value that cannot be laid out.
    #[error("invalid style option `{field}`: {reason}")]
    InvalidStyle {
        field: &'static str,
        reason: &'static str,
    },
}
