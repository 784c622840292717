//! Search domain - submits a query and turns whatever comes back into
//! something displayable

pub mod coordinator;
pub mod error;
pub mod session;
pub mod types;

pub use self::coordinator::{DEFAULT_REQUEST_TIMEOUT, RequestCoordinator};
pub use self::error::{DEMO_DATA_NOTE, FailureKind, SearchFailure};
pub use self::session::{SearchSession, SearchTicket};
pub use self::types::SearchOutcome;
