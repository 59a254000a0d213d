//! Shared Diesel error mapping for the catalogue repositories.
//!
//! Both repository error enums expose the same three constructors, so the
//! mapping is written once over constructor closures.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error.
pub fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Constructors for the repository error being produced.
pub struct ErrorConstructors<Q, C, I> {
    pub query: Q,
    pub connection: C,
    pub integrity: I,
}

/// Map Diesel errors into query, connection or integrity failures.
///
/// Unique and foreign-key violations become integrity errors carrying the
/// database message; a closed connection becomes a connection error.
pub fn map_diesel_error<E, Q, C, I>(
    error: diesel::result::Error,
    ctors: ErrorConstructors<Q, C, I>,
) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
    I: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
            info,
        ) => (ctors.integrity)(info.message().to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            (ctors.connection)("database connection error".to_owned())
        }
        DieselError::QueryBuilderError(_) => (ctors.query)("database query error".to_owned()),
        _ => (ctors.query)("database error".to_owned()),
    }
}
