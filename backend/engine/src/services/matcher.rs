/// Containment scoring policy: the trimmed, lowercased candidate must be a
/// non-empty substring of the lowercased reference. The check is asymmetric:
/// a short generic candidate can match a long reference, never the reverse.
/// Empty candidates never match, even though the empty string is a substring
/// of everything.
pub fn matches(candidate: &str, reference: &str) -> bool {
    let normalized = candidate.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    reference.to_lowercase().contains(&normalized)
}
