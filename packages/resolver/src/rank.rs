/// Remediation hints attached to an ambiguous match, most useful first
pub fn rank_hints(count: usize) -> Vec<String> {
    if count <= 1 {
        return Vec::new();
    }
    vec![
        "Add `.nth(1)` or `.nth(2)` to pick a specific match.".to_string(),
        "Scope the selector with `under(heading(\"X\"))`.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hints_without_ambiguity() {
        assert!(rank_hints(1).is_empty());
        assert_eq!(rank_hints(3).len(), 2);
        assert!(rank_hints(2)[0].contains(".nth(1)"));
    }
}
