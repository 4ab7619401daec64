use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("File too large in field '{0}'")]
    FileTooLarge(String),

    #[error("Unexpected field '{0}'")]
    UnexpectedFile(String),

    #[error("Request body too large: {0}")]
    RequestTooLarge(String),

    #[error("Malformed multipart body: {0}")]
    MalformedMultipart(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// Machine-readable code sent as the `error` member of the response body.
    ///
    /// A MIME rejection reports `UNSUPPORTED_FILE_TYPE` rather than the
    /// generic `"Error"` name a plain error object would carry.
    pub fn code(&self) -> &'static str {
        match self {
            ApplicationError::Unauthorized => "Unauthorized",
            ApplicationError::UnsupportedFileType(_) => "UNSUPPORTED_FILE_TYPE",
            ApplicationError::FileTooLarge(_) => "LIMIT_FILE_SIZE",
            ApplicationError::UnexpectedFile(_) => "LIMIT_UNEXPECTED_FILE",
            ApplicationError::RequestTooLarge(_) => "LIMIT_REQUEST_SIZE",
            ApplicationError::MalformedMultipart(_) => "MALFORMED_MULTIPART",
            ApplicationError::InternalError(_) => "UnknownError",
        }
    }

    /// Client-facing detail, `None` where nothing should be disclosed.
    pub fn client_message(&self) -> Option<String> {
        match self {
            ApplicationError::Unauthorized | ApplicationError::InternalError(_) => None,
            ApplicationError::UnsupportedFileType(_) => Some("Unsupported file type".to_string()),
            ApplicationError::FileTooLarge(_) => Some("File too large".to_string()),
            ApplicationError::UnexpectedFile(_) => Some("Unexpected field".to_string()),
            ApplicationError::RequestTooLarge(msg) | ApplicationError::MalformedMultipart(msg) => {
                Some(msg.clone())
            }
        }
    }
}
