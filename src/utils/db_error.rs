//! Helpers for classifying database errors.

/// Name of the partial unique index guarding active codes.
pub const ACTIVE_CODE_INDEX: &str = "links_code_active_idx";

/// Returns true if `e` is a unique violation on the active-code index.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(ACTIVE_CODE_INDEX))
}
