use sea_orm::{DbErr, SqlErr};

/// Message of a unique-index violation, which names the offending constraint
pub fn unique_violation(err: &DbErr) -> Option<String> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
        _ => None,
    }
}

pub fn is_unique_violation(err: &DbErr) -> bool {
    unique_violation(err).is_some()
}

/// True when `err` is a unique violation on the index called `constraint`
pub fn violates_constraint(err: &DbErr, constraint: &str) -> bool {
    unique_violation(err).is_some_and(|message| message.contains(constraint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_sql_errors_are_not_violations() {
        let err = DbErr::RecordNotFound("brand".into());
        assert!(!is_unique_violation(&err));
        assert!(!violates_constraint(&err, "idx_users_email"));
    }
}
