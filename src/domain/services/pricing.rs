/// Extracts the amount from a display price such as `2.500.000 VNĐ` or `1,200,000đ/đêm`.
/// Only the first number counts (`1.500.000 - 2.000.000` -> 1500000); dots and commas
/// inside it are thousands separators. `None` when there is no number or it does not fit.
pub fn parse_price(display: &str) -> Option<i64> {
    let digits: String = display
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

pub fn total_for_stay(room_price: i64, nights: i64) -> i64 {
    room_price.saturating_mul(nights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("2.500.000 VNĐ"), Some(2_500_000));
        assert_eq!(parse_price("1,200,000đ/đêm"), Some(1_200_000));
        assert_eq!(parse_price("Liên hệ"), None);
    }

    #[test]
    fn test_parse_price_takes_first_number() {
        assert_eq!(parse_price("1.500.000 - 2.000.000 VNĐ"), Some(1_500_000));
        assert_eq!(parse_price("Từ 900.000đ"), Some(900_000));
    }

    #[test]
    fn test_parse_price_overflow_is_none() {
        assert_eq!(parse_price("99999999999999999999999 VNĐ"), None);
    }

    #[test]
    fn test_total_for_stay() {
        assert_eq!(total_for_stay(1_500_000, 3), 4_500_000);
    }
}
