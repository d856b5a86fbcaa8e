// src/utils/id.rs

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates a catalog identifier: `REC-<base36 millis>-<5 random base36>`,
/// uppercased. Ids are never reused; the random suffix keeps same-millisecond
/// generations distinct.
pub fn generate_resource_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().max(0) as u128;
    let mut rng = rand::rng();
    let suffix: String = (0..5)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("REC-{}-{}", to_base36(millis), suffix).to_uppercase()
}

fn to_base36(mut value: u128) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    digits.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_matches_expected_pattern() {
        let pattern = regex::Regex::new(r"^REC-[0-9A-Z]+-[0-9A-Z]{5}$").unwrap();
        for _ in 0..100 {
            let id = generate_resource_id();
            assert!(pattern.is_match(&id), "unexpected id shape: {id}");
        }
    }

    #[test]
    fn consecutive_ids_are_distinct() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_resource_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn base36_encodes_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_700_000_000_000), "loyw3v28");
    }
}
