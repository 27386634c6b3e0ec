use reqwest::StatusCode;
use reqwest::header::HeaderMap;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between the review API and the chat.
///
/// Startup failures (`MissingEnv`) are fatal. Fetch and shape failures bubble
/// out of the poll loop; the remaining variants are contained per iteration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("required environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("homework API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("homework API returned {status}: {body}")]
    UnexpectedStatus {
        status: StatusCode,
        body: String,
        // kept for diagnostics, not rendered in the message
        headers: HeaderMap,
    },

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("response has no \"homeworks\" key")]
    MissingHomeworks,

    #[error("\"homeworks\" is not a list")]
    HomeworksNotAList,

    #[error("malformed homework entry: {0}")]
    BadHomework(#[source] serde_json::Error),

    #[error("no homework updates")]
    NoHomeworks,

    #[error("no homework to report on")]
    MissingHomework,

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("telegram rejected the bot credentials: {0}")]
    TelegramAuth(String),

    #[error("telegram message not delivered: {0}")]
    TelegramSend(String),
}
