use crate::database::database::DBConn;
use diesel::result::Error;
use diesel::Connection;
use enum_kinds::EnumKind;
use serde::Serialize;
use std::fmt;
use strum_macros::Display;

/// Error returned by every store operation
#[derive(Serialize, Debug)]
pub struct ErrorResponse {
    pub error_type: ErrorTypeKind,
    pub message: String,
    // Rollback the diesel transaction if true
    #[serde(skip)]
    pub rollback: bool,
}

impl ErrorResponse {
    pub fn kind(&self) -> ErrorTypeKind {
        self.error_type
    }
    pub fn do_rollback(&self) -> bool {
        self.rollback
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

/// Convert Diesel [`Error`] to [`ErrorResponse`]
impl From<Error> for ErrorResponse {
    fn from(value: Error) -> Self {
        // Rollback all uncaught errors
        ErrorType::DatabaseError("Diesel error".to_string(), value).res_rollback()
    }
}

/// All possible error types that can be converted to [`ErrorResponse`]
#[derive(EnumKind, Debug, Display)]
#[enum_kind(ErrorTypeKind, derive(Display, Serialize))]
pub enum ErrorType {
    InternalError(String),
    // Groups
    GroupNotFound,
    GroupAlreadyExists,
    // Memberships
    UserAlreadyInGroup,
    // Database error
    DatabaseError(String, Error),
}

impl ErrorType {
    /// Convert to a result of [`ErrorResponse`] without Diesel transaction rollback
    pub fn res_err<T>(self) -> Result<T, ErrorResponse> {
        Err(self.to_response(false))
    }
    /// Convert to a result of [`ErrorResponse`] with Diesel transaction rollback
    pub fn res_err_rollback<T>(self) -> Result<T, ErrorResponse> {
        Err(self.to_response(true))
    }
    /// Convert to a [`ErrorResponse`] without Diesel transaction rollback
    pub fn res(self) -> ErrorResponse {
        self.to_response(false)
    }
    /// Convert to a [`ErrorResponse`] with Diesel transaction rollback
    pub fn res_rollback(self) -> ErrorResponse {
        self.to_response(true)
    }

    fn to_response(self, rollback: bool) -> ErrorResponse {
        let error_type = ErrorTypeKind::from(&self);
        let message = match self {
            ErrorType::InternalError(msg) => format!("Internal error: {}", msg),
            ErrorType::GroupNotFound => "No group found".to_string(),
            ErrorType::GroupAlreadyExists => "A group with this name already exists for this admin".to_string(),
            ErrorType::UserAlreadyInGroup => "User is already a member of this group".to_string(),
            ErrorType::DatabaseError(msg, err) => format!("Database error: {} - {}", msg, err),
        };
        ErrorResponse { error_type, message, rollback }
    }
}

/// Diesel transaction encapsulation to handle rollback
/// depending on the rollback boolean value contained in the returned Err(ErrorResponse) struct.
pub fn err_transaction<T, F>(conn: &mut DBConn, f: F) -> Result<T, ErrorResponse>
where
    F: FnOnce(&mut DBConn) -> Result<T, ErrorResponse>,
{
    let result = conn.transaction::<Result<T, ErrorResponse>, ErrorResponse, _>(|conn| {
        let res = f(conn);
        if let Err(err) = res {
            if err.do_rollback() {
                Err(err)
            } else {
                // Returns Ok(Err(ErrorResponse)) to avoid rollback
                Ok(Err(err))
            }
        } else {
            Ok(res)
        }
    });
    match result {
        Ok(Ok(res)) => Ok(res),
        Ok(Err(err)) => Err(err),
        Err(err) => Err(err),
    }
}
