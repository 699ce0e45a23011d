//! # Lexa Client
//!
//! Request issuer for the Lexa analysis service.
//!
//! Serializes user input, issues one HTTP call per submission and feeds the
//! outcome into a [`lexa_core::Session`].

pub mod error;
pub mod http;
pub mod service;
pub mod submit;

pub use error::{ClientError, ClientResult};
pub use http::{ClientConfig, HttpAnalyzer, DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS};
pub use service::AnalysisService;
pub use submit::{complete, submit, Submission};
