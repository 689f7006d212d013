use chrono::NaiveDate;

/// Failure talking to the remote sheet store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sheet store rejected our credentials: {0}")]
    Auth(String),

    #[error("sheet store rate limit exceeded")]
    RateLimited,

    #[error("sheet store responded {status}: {body}")]
    Http { status: u16, body: String },

    #[error("sheet store unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected sheet store payload: {0}")]
    Decode(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no calendar entry for {}", crate::date::key_of(.0))]
    NotFound(NaiveDate),

    #[error("unknown user {0}")]
    UnknownUser(String),

    #[error("unknown date {}", crate::date::key_of(.0))]
    UnknownDate(NaiveDate),

    #[error("invalid worksheet: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
