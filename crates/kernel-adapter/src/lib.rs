//! Adapter layer over the host modeling kernel.
//!
//! The engine never talks to a real kernel directly: it consumes the
//! [`HostKernel`] (mutating feature commands) and [`HostQueries`]
//! (read-only geometric oracle) traits. A production build implements them
//! over the host CAD API; [`MockKernel`] is the deterministic test double.

pub mod bundle;
pub mod mock_kernel;
pub mod traits;
pub mod types;

pub use bundle::HostBundle;
pub use mock_kernel::MockKernel;
pub use traits::*;
pub use types::*;
