//! Invariant checking shared by the connectivity stores.

use crate::mesh_error::MeshConnectivityError;

/// Structures whose internal bookkeeping can be cross-checked.
pub trait DebugInvariants {
    /// Panic on a broken invariant in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first violation found.
    fn validate_invariants(&self) -> Result<(), MeshConnectivityError>;
}

/// Turn a failed condition into [`MeshConnectivityError::InvariantViolation`].
#[inline]
pub(crate) fn ensure(
    cond: bool,
    msg: impl FnOnce() -> String,
) -> Result<(), MeshConnectivityError> {
    if cond {
        Ok(())
    } else {
        Err(MeshConnectivityError::InvariantViolation(msg()))
    }
}

/// Run a fallible invariant check and panic with context when checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
