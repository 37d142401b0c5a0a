use contracts::shared::api_error::ApiError;
use contracts::shared::envelope::MessageData;
use contracts::usecases::u501_relocation_analysis::{
    AnalyzeRelocationRequest, AnalyzeRelocationResponse, SaveRelocationRequest,
};

use crate::shared::api_utils::post_json;

pub async fn analyze_relocation(
    request: &AnalyzeRelocationRequest,
) -> Result<AnalyzeRelocationResponse, ApiError> {
    post_json("/analyze-relocation", request).await
}

/// A bare acknowledgement without `data` still counts as saved.
pub async fn save_relocation(request: &SaveRelocationRequest) -> Result<MessageData, ApiError> {
    match post_json("/save-relocation", request).await {
        Err(ApiError::Empty) => Ok(MessageData::default()),
        other => other,
    }
}
