//! HTTP surface of the advisor.
//!
//! ```text
//! GET  /health  liveness
//! POST /run     multipart (file + other_data) or JSON body -> advice
//! POST /test    fixed sample request -> advice
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
