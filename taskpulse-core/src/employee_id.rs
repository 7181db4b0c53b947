//! Employee id extraction from free-text assignee names.

/// Return the first maximal run of ASCII digits in `assignee`.
///
/// Later digit runs are ignored: "Ravi_12_b7" yields "12".
pub fn extract_employee_id(assignee: &str) -> Option<String> {
    let bytes = assignee.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let len = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    // ASCII digits are single bytes, so these are char boundaries.
    Some(assignee[start..start + len].to_string())
}
