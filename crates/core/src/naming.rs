//! SQL Server database name validation and identifier quoting.

use crate::error::CoreError;

/// Collation every provisioned database is created with.
pub const DEFAULT_COLLATION: &str = "SQL_Latin1_General_CP1_CI_AS";

/// Maximum length of a `sysname` identifier.
pub const MAX_DATABASE_NAME_LEN: usize = 128;

/// Reject names SQL Server would refuse or that cannot be safely quoted.
pub fn validate_database_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Database name must not be empty".into()));
    }
    if name.chars().count() > MAX_DATABASE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Database name exceeds {MAX_DATABASE_NAME_LEN} characters"
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(CoreError::Validation(
            "Database name must not contain control characters".into(),
        ));
    }
    Ok(())
}

/// Quote `name` as a bracketed identifier, doubling any `]`.
pub fn quote_identifier(name: &str) -> String {
    format!("[{}]", name.replace(']', "]]"))
}

/// Build the `CREATE DATABASE` statement.
///
/// Database names cannot be bound as parameters here, so the name is
/// validated and quoted instead.
pub fn create_database_statement(name: &str) -> Result<String, CoreError> {
    validate_database_name(name)?;
    Ok(format!(
        "CREATE DATABASE {} COLLATE {DEFAULT_COLLATION}",
        quote_identifier(name)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_database_name("orders").is_ok());
        assert!(validate_database_name("orders_ci-1234").is_ok());
        assert!(validate_database_name(&"a".repeat(128)).is_ok());
    }

    #[test]
    fn rejects_bad_names() {
        assert!(validate_database_name("").is_err());
        assert!(validate_database_name("   ").is_err());
        assert!(validate_database_name(&"a".repeat(129)).is_err());
        assert!(validate_database_name("bad\nname").is_err());
    }

    #[test]
    fn quoting_escapes_closing_bracket() {
        assert_eq!(quote_identifier("orders"), "[orders]");
        assert_eq!(quote_identifier("a]b"), "[a]]b]");
        assert_eq!(quote_identifier("x]; DROP DATABASE y; --"), "[x]]; DROP DATABASE y; --]");
    }

    #[test]
    fn create_statement_uses_fixed_collation() {
        assert_eq!(
            create_database_statement("orders").unwrap(),
            "CREATE DATABASE [orders] COLLATE SQL_Latin1_General_CP1_CI_AS"
        );
        assert!(create_database_statement("").is_err());
    }
}
