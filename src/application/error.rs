#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationError {
    NotFound,
    Conflict,
    NothingUpdated,
    BadRequest(String),
    StorageFailure(String),
    DatabaseError(String),
    InternalError(String),
}
