use serde_derive::Deserialize;
use utoipa::ToSchema;

use crate::{
    domain::screenshot::Screenshot,
    errors::code_error::{CodeError, CodeErrorResp, code_err},
};

#[derive(Deserialize, ToSchema)]
pub struct ScreenshotRequest {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

impl ScreenshotRequest {
    pub fn into_screenshot(self) -> Result<Screenshot, CodeErrorResp> {
        Screenshot::new(&self.url, self.alt.as_deref())
            .ok_or_else(|| code_err(CodeError::INVALID_REQUEST, "url must not be blank"))
    }
}

#[derive(Deserialize, ToSchema)]
pub struct SwapScreenshotsRequest {
    pub a: usize,
    pub b: usize,
}
