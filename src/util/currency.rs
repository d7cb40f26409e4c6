/// Formats rupees with Indian digit grouping: `₹1,00,000`.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("₹{},{}", groups.join(","), last_three)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts() {
        assert_eq!(format_inr(0), "₹0");
        assert_eq!(format_inr(999), "₹999");
    }

    #[test]
    fn test_thousands_and_lakhs() {
        assert_eq!(format_inr(1000), "₹1,000");
        assert_eq!(format_inr(6000), "₹6,000");
        assert_eq!(format_inr(12345), "₹12,345");
        assert_eq!(format_inr(100000), "₹1,00,000");
        assert_eq!(format_inr(1234567), "₹12,34,567");
        assert_eq!(format_inr(123456789), "₹12,34,56,789");
    }
}
