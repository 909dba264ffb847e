use crate::traits::{HostKernel, HostQueries};

/// Both halves of the host kernel behind one object.
///
/// The orchestrator alternates between issuing feature commands and
/// reading the model back; `as_queries` lends out the read-only half so
/// the resolver functions can be called while the caller still holds the
/// kernel mutably.
pub trait HostBundle: HostKernel + HostQueries {
    fn as_queries(&self) -> &dyn HostQueries;
}

impl<T: HostKernel + HostQueries> HostBundle for T {
    fn as_queries(&self) -> &dyn HostQueries {
        self
    }
}
