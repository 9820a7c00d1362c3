use std::collections::HashMap;
use std::sync::OnceLock;

static VARIATION_TABLE: OnceLock<HashMap<&'static str, Vec<&'static str>>> = OnceLock::new();

/// Known synonyms for a normalized token. Unknown tokens have no variations.
pub fn variations_of(token: &str) -> &'static [&'static str] {
    variation_table()
        .get(token)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// True when either token lists the other as a variation.
pub fn are_variations(left: &str, right: &str) -> bool {
    variations_of(left).contains(&right) || variations_of(right).contains(&left)
}

fn variation_table() -> &'static HashMap<&'static str, Vec<&'static str>> {
    VARIATION_TABLE.get_or_init(|| {
        // Every member of a cluster is interchangeable with every other member.
        const CLUSTERS: &[&[&str]] = &[
            // Club types
            &["VBC", "VOLLEYBALL CLUB", "VOLLEY BALL CLUB", "VOLLEY CLUB"],
            &["VBC", "VC", "VOLLEYBALL", "VOLLEY"],
            &["TV", "STV", "TURNVEREIN"],
            // Bilingual city names
            &["GENEVE", "GENF", "GENEVA"],
            &["BALE", "BASEL", "BASLE"],
            &["LUZERN", "LUCERNE"],
            &["BERN", "BERNE"],
            &["ZURICH", "ZUERICH"],
            &["FRIBOURG", "FREIBURG"],
            &["NEUCHATEL", "NEUENBURG"],
            &["BIENNE", "BIEL"],
            &["SOLEURE", "SOLOTHURN"],
            &["SION", "SITTEN"],
        ];

        let mut table: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for cluster in CLUSTERS {
            for &key in cluster.iter() {
                let entry = table.entry(key).or_default();
                for &other in cluster.iter() {
                    if other != key && !entry.contains(&other) {
                        entry.push(other);
                    }
                }
            }
        }
        table
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn club_type_abbreviations_expand_both_ways() {
        let vbc = variations_of("VBC");
        assert!(vbc.contains(&"VOLLEYBALL CLUB"));
        assert!(vbc.contains(&"VOLLEY BALL CLUB"));
        assert!(vbc.contains(&"VOLLEY CLUB"));
        assert!(vbc.contains(&"VOLLEYBALL"));

        assert!(variations_of("VOLLEYBALL CLUB").contains(&"VBC"));
        assert!(are_variations("VOLLEYBALL", "VBC"));
        assert!(are_variations("VBC", "VOLLEY"));
    }

    #[test]
    fn bilingual_city_pairs_are_related() {
        assert!(are_variations("GENF", "GENEVE"));
        assert!(are_variations("GENEVA", "GENF"));
        assert!(are_variations("BASLE", "BALE"));
        assert!(are_variations("LUCERNE", "LUZERN"));
        assert!(are_variations("BERNE", "BERN"));
        assert!(!are_variations("BERN", "BASEL"));
    }

    #[test]
    fn unknown_tokens_have_no_variations() {
        assert!(variations_of("AMRISWIL").is_empty());
        assert!(variations_of("").is_empty());
        assert!(!are_variations("AMRISWIL", "AMRISWIL"));
    }

    #[test]
    fn clusters_do_not_list_a_token_as_its_own_variation() {
        assert!(!variations_of("VBC").contains(&"VBC"));
        let vbc = variations_of("VBC");
        let unique: std::collections::HashSet<_> = vbc.iter().collect();
        assert_eq!(unique.len(), vbc.len());
    }
}
