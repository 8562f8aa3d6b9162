//! Server-side kernel: shared state, HTTP error taxonomy, system endpoints.

pub mod error;
mod extract;
mod health;
pub mod router;
mod state;

pub use error::{ApiError, ErrorBody};
pub use extract::ApiQuery;
pub use state::{ApiState, ApiStateBuilder, ApiStateError};
