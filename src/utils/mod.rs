use strsim::jaro_winkler;

/// Minimum similarity for a fuzzy team-name match.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Validate team name format
pub fn validate_team_name(name: &str) -> bool {
    !name.trim().is_empty() && name.len() <= 100
}

/// Initials of each word, e.g. "Chennai Super Kings" -> "CSK".
pub fn team_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Map what a user typed to one of the known team names.
///
/// Tries, in order: case-insensitive equality, initials ("MI", "rcb"), then
/// the closest Jaro-Winkler match above [`FUZZY_THRESHOLD`].
pub fn resolve_team_name(input: &str, known: &[String]) -> Option<String> {
    let input = input.trim();
    if !validate_team_name(input) {
        return None;
    }
    let lowered = input.to_lowercase();

    if let Some(exact) = known.iter().find(|k| k.to_lowercase() == lowered) {
        return Some(exact.clone());
    }

    let upper = input.to_uppercase();
    let mut by_initials = known.iter().filter(|k| team_initials(k) == upper);
    if let (Some(only), None) = (by_initials.next(), by_initials.next()) {
        return Some(only.clone());
    }

    known
        .iter()
        .map(|k| (k, jaro_winkler(&lowered, &k.to_lowercase())))
        .filter(|(_, score)| *score >= FUZZY_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(k, score)| {
            tracing::debug!("Resolved '{}' to '{}' (similarity {:.3})", input, k, score);
            k.clone()
        })
}

/// Format large numbers with appropriate suffixes
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        format!("{:.1}", num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<String> {
        [
            "Chennai Super Kings",
            "Mumbai Indians",
            "Royal Challengers Bengaluru",
            "Rajasthan Royals",
            "Sunrisers Hyderabad",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_team_initials() {
        assert_eq!(team_initials("Royal Challengers Bengaluru"), "RCB");
        assert_eq!(team_initials("  mumbai   indians "), "MI");
    }

    #[test]
    fn test_resolve_exact_and_initials() {
        let known = teams();
        assert_eq!(resolve_team_name("mumbai indians", &known).as_deref(), Some("Mumbai Indians"));
        assert_eq!(resolve_team_name("csk", &known).as_deref(), Some("Chennai Super Kings"));
        assert_eq!(resolve_team_name("RR", &known).as_deref(), Some("Rajasthan Royals"));
    }

    #[test]
    fn test_resolve_fuzzy() {
        let known = teams();
        assert_eq!(resolve_team_name("Sunrisers Hyderbad", &known).as_deref(), Some("Sunrisers Hyderabad"));
        assert_eq!(resolve_team_name("Chenai Super King", &known).as_deref(), Some("Chennai Super Kings"));
    }

    #[test]
    fn test_resolve_rejects_unrelated() {
        let known = teams();
        assert_eq!(resolve_team_name("Yorkshire", &known), None);
        assert_eq!(resolve_team_name("   ", &known), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(308.5), "308.5");
        assert_eq!(format_number(1_500.0), "1.5K");
    }
}
