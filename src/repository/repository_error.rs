use mongodb::error::{ErrorKind, WriteFailure};

/// Server code reported when a write collides with a unique index.
const DUPLICATE_KEY: i32 = 11000;

/// Failures raised by the record stores, independent of the backend.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found: {0}")]
    NotFound(String),
    /// A unique index (member or user email) already holds the value.
    #[error("unique index violated: {0}")]
    AlreadyExists(String),
    #[error("rejected by the store: {0}")]
    Rejected(String),
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("document mapping failed: {0}")]
    Serialization(String),
}

impl RepositoryError {
    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        RepositoryError::NotFound(msg.into())
    }

    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Database(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        RepositoryError::Serialization(msg.into())
    }
}

fn is_duplicate_key(kind: &ErrorKind) -> bool {
    match kind {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        ErrorKind::BulkWrite(failure) => failure
            .write_errors
            .iter()
            .flatten()
            .any(|e| e.code == DUPLICATE_KEY),
        _ => false,
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        let kind = err.kind.as_ref();
        if is_duplicate_key(kind) {
            return RepositoryError::AlreadyExists(err.to_string());
        }
        match kind {
            ErrorKind::Authentication { .. } | ErrorKind::Io(_) | ErrorKind::ServerSelection { .. } => {
                RepositoryError::Unavailable(err.to_string())
            }
            ErrorKind::InvalidArgument { .. } => RepositoryError::Rejected(err.to_string()),
            ErrorKind::BsonSerialization(_) | ErrorKind::BsonDeserialization(_) => {
                RepositoryError::Serialization(err.to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use mongodb::error::CommandError;
    use std::sync::Arc;

    fn command_error(code: i32, msg: &str) -> mongodb::error::Error {
        let command: CommandError =
            bson::from_document(doc! { "code": code, "codeName": "Test", "errmsg": msg }).unwrap();
        ErrorKind::Command(command).into()
    }

    #[test]
    fn duplicate_key_code_becomes_already_exists() {
        let err = RepositoryError::from(command_error(11000, "index: email_1 dup key"));
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));
    }

    #[test]
    fn other_command_codes_stay_database_errors() {
        // The message alone must not decide the mapping.
        let err = RepositoryError::from(command_error(2, "E11000 mentioned in passing"));
        assert!(matches!(err, RepositoryError::Database(_)));
    }

    #[test]
    fn io_failures_mean_the_store_is_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = RepositoryError::from(mongodb::error::Error::from(ErrorKind::Io(Arc::new(io))));
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }
}
