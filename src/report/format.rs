//! Display formatting shared by the reducers.

/// Half-up rounding to an integer (`round(-2.5) == -2`).
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Integer percentage clamped to `[0, 100]`; a non-positive denominator yields 0.
pub fn clamped_percent(numerator: f64, denominator: f64) -> u32 {
    if denominator <= 0.0 || !numerator.is_finite() {
        return 0;
    }
    round_half_up(numerator / denominator * 100.0).clamp(0.0, 100.0) as u32
}

/// Indian digit grouping: last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// en-IN number text with up to three fraction digits, trailing zeros dropped.
pub fn format_indian(amount: f64) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let negative = amount < 0.0;
    let millis = (amount.abs() * 1000.0).round() as u128;
    let whole = (millis / 1000).to_string();
    let frac = millis % 1000;

    let mut out = String::new();
    if negative && millis > 0 {
        out.push('-');
    }
    out.push_str(&group_indian(&whole));
    if frac > 0 {
        let frac = format!("{frac:03}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

/// `₹` followed by the en-IN rendering.
pub fn format_inr(amount: f64) -> String {
    format!("₹{}", format_indian(amount))
}

/// Compact thousands: `₹12.3K`.
pub fn format_inr_thousands(amount: f64) -> String {
    format!("₹{:.1}K", amount / 1000.0)
}

/// Whole-number shares of the values that add up to exactly 100 (largest remainder).
/// Negative values count as zero; all zeros when nothing positive remains.
pub fn percentage_shares(values: &[f64]) -> Vec<u32> {
    let clamped: Vec<f64> = values.iter().map(|v| v.max(0.0)).collect();
    let total: f64 = clamped.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return vec![0; values.len()];
    }

    let exact: Vec<f64> = clamped
        .iter()
        .map(|v| (v / total * 100.0).clamp(0.0, 100.0))
        .collect();
    let mut shares: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let assigned: u32 = shares.iter().sum();

    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal).then(a.cmp(&b))
    });

    let target = if exact.iter().sum::<f64>() >= 99.5 { 100 } else { assigned };
    for idx in order.into_iter().take(target.saturating_sub(assigned) as usize) {
        shares[idx] += 1;
    }
    shares
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupees_use_indian_grouping() {
        assert_eq!(format_inr(500.0), "₹500");
        assert_eq!(format_inr(1000.0), "₹1,000");
        assert_eq!(format_inr(123456.0), "₹1,23,456");
        assert_eq!(format_inr(10_000_000.0), "₹1,00,00,000");
        assert_eq!(format_inr(0.0), "₹0");
    }

    #[test]
    fn rupees_keep_up_to_three_decimals() {
        assert_eq!(format_inr(1234.5), "₹1,234.5");
        assert_eq!(format_inr(99.12345), "₹99.123");
        assert_eq!(format_inr(-1500.0), "₹-1,500");
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.49), 2.0);
    }

    #[test]
    fn percent_guards_and_clamps() {
        assert_eq!(clamped_percent(5.0, 0.0), 0);
        assert_eq!(clamped_percent(300.0, 100.0), 100);
        assert_eq!(clamped_percent(-20.0, 100.0), 0);
        assert_eq!(clamped_percent(1.0, 3.0), 33);
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let shares = percentage_shares(&[1.0, 1.0, 4.0]);
        assert_eq!(shares.iter().sum::<u32>(), 100);
        assert_eq!(shares, vec![17, 17, 66]);

        let thirds = percentage_shares(&[1.0, 1.0, 1.0, 0.0, 0.0]);
        assert_eq!(thirds.iter().sum::<u32>(), 100);
        assert!(thirds.iter().all(|s| *s <= 100));
    }

    #[test]
    fn shares_of_nothing_are_zero() {
        assert_eq!(percentage_shares(&[0.0, 0.0]), vec![0, 0]);
        assert_eq!(percentage_shares(&[-5.0, 0.0]), vec![0, 0]);
    }

    #[test]
    fn negative_values_do_not_shrink_the_total() {
        let shares = percentage_shares(&[100.0, 0.0, 0.0, 100.0, -150.0]);
        assert_eq!(shares, vec![50, 0, 0, 50, 0]);
    }

    #[test]
    fn thousands_compact_form() {
        assert_eq!(format_inr_thousands(2100.0), "₹2.1K");
        assert_eq!(format_inr_thousands(-650.0), "₹-0.7K");
    }
}
