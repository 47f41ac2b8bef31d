//! Number and label formatting shared by the terminal and image renderers.


/// Format a number with thousands separators.
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}


/// Format a number with a K/M/B suffix for tight spaces.
pub fn format_compact(num: u64) -> String {
    if num >= 1_000_000_000 {
        format!("{:.1}B", num as f64 / 1_000_000_000.0)
    } else if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        format!("{}", num)
    }
}


/// Cut a label to `max` characters, marking the cut with an ellipsis.
pub fn truncate_label(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut cut: String = label.chars().take(max - 1).collect();
    cut.push('…');
    cut
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950), "950");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(2_300_000), "2.3M");
        assert_eq!(format_compact(4_000_000_000), "4.0B");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Mortgage", 10), "Mortgage");
        assert_eq!(truncate_label("Credit reporting", 8), "Credit …");
        assert_eq!(truncate_label("Débito", 3), "Dé…");
        assert_eq!(truncate_label("abc", 0), "");
    }
}
