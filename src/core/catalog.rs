use crate::core::fund::FundRecord;

/// Funds whose name contains `term`, ignoring case. An empty term matches all.
pub fn search_funds<'a>(funds: &'a [FundRecord], term: &str) -> Vec<&'a FundRecord> {
    let needle = term.trim().to_lowercase();
    funds
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> FundRecord {
        FundRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_search_funds() {
        let funds = vec![
            named("Axis Bluechip Fund"),
            named("Parag Parikh Flexi Cap"),
            named("Mirae Asset Large Cap"),
        ];

        let hits = search_funds(&funds, "CAP");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].name, "Parag Parikh Flexi Cap");

        assert_eq!(search_funds(&funds, "").len(), 3);
        assert_eq!(search_funds(&funds, "  bluechip ").len(), 1);
        assert!(search_funds(&funds, "debt").is_empty());
    }
}
