//! The analysis service seam.

use async_trait::async_trait;
use lexa_core::{AnalysisRequest, RawAnalysis};

use crate::error::ClientResult;

/// Something that turns one request into one analysis payload.
///
/// The HTTP analyzer is the production implementation; tests plug in fakes.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> ClientResult<RawAnalysis>;
}
