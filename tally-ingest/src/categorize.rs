//! Keyword fallback for exports that carry no category column.
//!
//! Deterministic substring rules over the description; first match wins.
//! Labels are free text; the cache groups by whatever string arrives here.

/// Categorize a transaction description.
pub fn categorize(description: &str) -> &'static str {
    let desc = description.to_lowercase();

    if desc.contains("payroll")
        || desc.contains("salary")
        || desc.contains("direct deposit")
        || desc.contains("stipend")
    {
        return "salary";
    }

    if desc.contains("rent")
        || desc.contains("lease")
        || desc.contains("apartment")
        || desc.contains("mortgage")
        || desc.contains("landlord")
    {
        return "housing";
    }

    if desc.contains("grocery")
        || desc.contains("restaurant")
        || desc.contains("doordash")
        || desc.contains("uber eats")
        || desc.contains("grubhub")
        || desc.contains("dining")
        || desc.contains("coffee")
        || desc.contains("food")
    {
        return "food";
    }

    if desc.contains("spotify")
        || desc.contains("netflix")
        || desc.contains("hulu")
        || desc.contains("youtube")
        || desc.contains("icloud")
        || desc.contains("subscription")
        || desc.contains("github")
    {
        return "subscriptions";
    }

    if desc.contains("uber")
        || desc.contains("lyft")
        || desc.contains("transit")
        || desc.contains("fuel")
        || desc.contains("gas station")
        || desc.contains("parking")
    {
        return "transport";
    }

    if desc.contains("pharmacy")
        || desc.contains("clinic")
        || desc.contains("dental")
        || desc.contains("medical")
    {
        return "health";
    }

    if desc.contains("transfer to savings") || desc.contains("savings") || desc.contains("invest") {
        return "savings";
    }

    "uncategorized"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_keywords() {
        assert_eq!(categorize("ACME CORP PAYROLL 0229"), "salary");
        assert_eq!(categorize("Direct Deposit - March"), "salary");
    }

    #[test]
    fn test_first_match_wins() {
        // "uber eats" must land on food, not transport.
        assert_eq!(categorize("UBER EATS ORDER 4412"), "food");
        assert_eq!(categorize("UBER TRIP 9921"), "transport");
    }

    #[test]
    fn test_unknown_falls_through() {
        assert_eq!(categorize("MISC VENDOR 001"), "uncategorized");
    }
}
