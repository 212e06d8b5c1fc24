//! advisor-server: HTTP service and CLI around the priority engine

pub mod config;
pub mod error;
pub mod http;
pub mod llm;
pub mod pipeline;
pub mod sample;

pub use config::Config;
pub use error::AdvisorError;
pub use pipeline::{AdviceRequest, AdviceResponse, Advisor, RecommendationWriter};
