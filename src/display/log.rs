//! Operation log display formatting

use crate::audit::AuditEntry;

use super::blank_if_empty;

/// One human-readable line per logged operation
pub fn format_operation_log(entries: &[AuditEntry]) -> Vec<String> {
    blank_if_empty(entries.iter().map(AuditEntry::format_human_readable).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{EntityType, Operator};
    use crate::models::Privilege;

    #[test]
    fn test_format_operation_log() {
        assert_eq!(format_operation_log(&[]), vec![String::new()]);

        let entry = AuditEntry::create(
            Operator::user("root", Privilege::Owner),
            EntityType::Book,
            "111",
            &serde_json::json!({"isbn": "111"}),
        );
        let lines = format_operation_log(&[entry]);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("root(7) CREATE Book 111"));
    }
}
