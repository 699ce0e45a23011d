//! Lexa Core Library
//!
//! Payload model, analysis profiles, result interpretation and session
//! state for the Lexa analysis client.

pub mod analysis;
pub mod error;
pub mod interpret;
pub mod profile;
pub mod session;

pub use analysis::model::{AnalysisRequest, RawAnalysis, RequestField, Token, TokenKind};
pub use error::{CoreError, CoreResult};
pub use interpret::{interpret, DisplayState};
pub use profile::Profile;
pub use session::{Phase, Session, SubmitPolicy, Ticket};
