//! Zodiac compatibility lookup
//!
//! Static product-defined scoring table. Unknown signs score `None`;
//! callers skip those candidates.

/// Zodiac signs in matrix order.
pub const SIGNS: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Compatibility scores, indexed [sign][other] in `SIGNS` order.
const MATRIX: [[u8; 12]; 12] = [
    // Aries
    [75, 70, 85, 60, 90, 65, 80, 55, 88, 60, 77, 50],
    // Taurus
    [70, 80, 65, 85, 55, 88, 60, 82, 58, 84, 55, 75],
    // Gemini
    [85, 65, 78, 62, 80, 67, 90, 53, 83, 57, 88, 60],
    // Cancer
    [60, 85, 62, 80, 70, 75, 55, 90, 50, 82, 52, 88],
    // Leo
    [90, 55, 80, 70, 85, 60, 87, 66, 92, 58, 81, 54],
    // Virgo
    [65, 88, 67, 75, 60, 85, 70, 80, 55, 90, 63, 77],
    // Libra
    [80, 60, 90, 55, 87, 70, 88, 59, 85, 65, 92, 58],
    // Scorpio
    [55, 82, 53, 90, 66, 80, 59, 85, 57, 86, 50, 89],
    // Sagittarius
    [88, 58, 83, 50, 92, 55, 85, 57, 80, 60, 79, 52],
    // Capricorn
    [60, 84, 57, 82, 58, 90, 65, 86, 60, 85, 62, 78],
    // Aquarius
    [77, 55, 88, 52, 81, 63, 92, 50, 79, 62, 87, 55],
    // Pisces
    [50, 75, 60, 88, 54, 77, 58, 89, 52, 78, 55, 85],
];

fn sign_index(sign: &str) -> Option<usize> {
    SIGNS.iter().position(|s| s.eq_ignore_ascii_case(sign))
}

/// Score for a pair of signs; `None` when either sign is unknown.
pub fn compatibility_score(a: &str, b: &str) -> Option<u8> {
    Some(MATRIX[sign_index(a)?][sign_index(b)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_pairs_score_from_the_table() {
        assert_eq!(compatibility_score("Aries", "Leo"), Some(90));
        assert_eq!(compatibility_score("Leo", "Sagittarius"), Some(92));
        assert_eq!(compatibility_score("Pisces", "Aries"), Some(50));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(compatibility_score("aries", "LEO"), Some(90));
    }

    #[test]
    fn unknown_sign_scores_none() {
        assert_eq!(compatibility_score("Ophiuchus", "Leo"), None);
        assert_eq!(compatibility_score("Leo", ""), None);
    }

    #[test]
    fn table_is_symmetric() {
        for a in SIGNS {
            for b in SIGNS {
                assert_eq!(
                    compatibility_score(a, b),
                    compatibility_score(b, a),
                    "{a} vs {b}"
                );
            }
        }
    }
}
