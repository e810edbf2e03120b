use crate::error::FolioError;
use salvo::http::ParseError;
use salvo::prelude::*;
use thiserror::Error;

/// Request-level failure. The writer only sets the status: the response
/// body stays empty so the error catcher renders the matching page.
#[derive(Error, Debug)]
pub enum WebError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound(_) => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FolioError> for WebError {
    fn from(e: FolioError) -> Self {
        match e {
            FolioError::NotFound(what) => WebError::NotFound(what),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl From<minijinja::Error> for WebError {
    fn from(e: minijinja::Error) -> Self {
        WebError::Internal(format!("template: {}", e))
    }
}

impl From<ParseError> for WebError {
    fn from(e: ParseError) -> Self {
        WebError::BadRequest(e.to_string())
    }
}

#[async_trait]
impl Writer for WebError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        match &self {
            WebError::Internal(msg) => tracing::error!(error = %msg, "request failed"),
            other => tracing::debug!(error = %other, "request rejected"),
        }
        res.status_code(self.status());
    }
}
