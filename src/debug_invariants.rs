//! Structural self-checks for built grids.
//!
//! [`Grid`](crate::grid::Grid) implements [`DebugInvariants`] by checking
//! that every arrow is paired with its reverse at `i ^ 1`, that each metric
//! array has one entry per vertex, face, edge or arrow, and that each
//! vertex's dual area equals the sum of its outgoing arrow slices.
//! Construction runs the check through [`debug_invariants!`](crate::debug_invariants)
//! in debug builds, and in release builds with `strict-invariants` or
//! `check-invariants`.

use crate::mesh_error::MeshGridError;

pub trait DebugInvariants {
    /// Panic on the first violated invariant when checks are compiled in.
    fn debug_assert_invariants(&self);
    /// First violated invariant, as [`MeshGridError::InvariantViolation`].
    fn validate_invariants(&self) -> Result<(), MeshGridError>;
}

/// Run a fallible check and panic with `[invariants] <context>: <error>` if
/// it fails, when invariant checking is compiled in.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
