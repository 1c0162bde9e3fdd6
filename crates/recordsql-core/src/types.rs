//! Host type name to database type mapping.
//!
//! Both functions are total: unknown names never fail, they degrade to a
//! best-effort answer.

/// Looks up the fixed host-to-database table. `name` must be lower-case.
fn known_database_type(name: &str) -> Option<&'static str> {
    match name {
        "int32" | "i32" => Some("int"),
        "int64" | "i64" => Some("bigint"),
        "double" | "f64" => Some("double"),
        "string" | "str" => Some("text"),
        "datetime" | "naivedatetime" => Some("datetime"),
        _ => None,
    }
}

/// Maps a host field type name to a database column type name.
///
/// The lookup is case-insensitive. Names outside the fixed table are
/// assumed to already be database type names and are returned lower-cased.
///
/// ```rust
/// use recordsql_core::types::to_database_type;
///
/// assert_eq!(to_database_type("Int32"), "int");
/// assert_eq!(to_database_type("String"), "text");
/// assert_eq!(to_database_type("VARCHAR(64)"), "varchar(64)");
/// ```
#[must_use]
pub fn to_database_type(host_type: &str) -> String {
    let lower = host_type.to_lowercase();
    known_database_type(&lower).map_or(lower, str::to_string)
}

/// Returns a default literal for a host type name.
///
/// Names in the fixed table yield the same text as [`to_database_type`].
/// Other names are resolved against the primitive value types and yield
/// the textual form of their `Default` value. Unresolvable names yield an
/// empty string.
#[must_use]
pub fn default_value(host_type: &str) -> String {
    let lower = host_type.to_lowercase();
    if let Some(db_type) = known_database_type(&lower) {
        return db_type.to_string();
    }
    zero_value(&lower).unwrap_or_default()
}

fn zero_value(name: &str) -> Option<String> {
    let value = match name {
        "i8" | "sbyte" => i8::default().to_string(),
        "i16" | "int16" => i16::default().to_string(),
        "i128" => i128::default().to_string(),
        "isize" => isize::default().to_string(),
        "u8" | "byte" => u8::default().to_string(),
        "u16" | "uint16" => u16::default().to_string(),
        "u32" | "uint32" => u32::default().to_string(),
        "u64" | "uint64" => u64::default().to_string(),
        "u128" => u128::default().to_string(),
        "usize" => usize::default().to_string(),
        "f32" | "single" => f32::default().to_string(),
        "bool" | "boolean" => bool::default().to_string(),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_table_is_case_insensitive() {
        assert_eq!(to_database_type("Int32"), "int");
        assert_eq!(to_database_type("INT64"), "bigint");
        assert_eq!(to_database_type("Double"), "double");
        assert_eq!(to_database_type("String"), "text");
        assert_eq!(to_database_type("DateTime"), "datetime");
    }

    #[test]
    fn rust_spellings_map_like_their_aliases() {
        assert_eq!(to_database_type("i32"), "int");
        assert_eq!(to_database_type("i64"), "bigint");
        assert_eq!(to_database_type("f64"), "double");
        assert_eq!(to_database_type("str"), "text");
        assert_eq!(to_database_type("NaiveDateTime"), "datetime");
    }

    #[test]
    fn unknown_types_pass_through_lower_cased() {
        assert_eq!(to_database_type("TinyInt"), "tinyint");
        assert_eq!(to_database_type("bool"), "bool");
        assert_eq!(to_database_type(""), "");
        assert_eq!(to_database_type("Décimal"), "décimal");
    }

    #[test]
    fn default_value_of_known_types_matches_mapping() {
        assert_eq!(default_value("Int32"), "int");
        assert_eq!(default_value("string"), "text");
    }

    #[test]
    fn default_value_resolves_value_types() {
        assert_eq!(default_value("u8"), "0");
        assert_eq!(default_value("Int16"), "0");
        assert_eq!(default_value("f32"), "0");
        assert_eq!(default_value("Boolean"), "false");
    }

    #[test]
    fn default_value_of_unresolvable_type_is_empty() {
        assert_eq!(default_value("Vec<u8>"), "");
        assert_eq!(default_value("MyStruct"), "");
    }
}
