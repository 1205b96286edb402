use chrono::NaiveDate;
use crate::error::AppError;

/// Half-open interval test over `[start, end)`, written as the same three
/// clauses the repositories use in SQL:
/// the new start falls inside an existing stay, the new end falls inside it,
/// or the new stay swallows it.
pub fn ranges_overlap(
    existing_start: NaiveDate,
    existing_end: NaiveDate,
    new_start: NaiveDate,
    new_end: NaiveDate,
) -> bool {
    (existing_start <= new_start && existing_end > new_start)
        || (existing_start < new_end && existing_end >= new_end)
        || (existing_start >= new_start && existing_end <= new_end)
}

/// Number of nights, or a validation error for an empty or inverted stay.
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate) -> Result<i64, AppError> {
    if check_out <= check_in {
        return Err(AppError::Validation("Check-out date must be after check-in date".into()));
    }
    Ok((check_out - check_in).num_days())
}

pub fn validate_guests(number_of_guests: i32, capacity: Option<i32>) -> Result<(), AppError> {
    if number_of_guests < 1 {
        return Err(AppError::Validation("At least one guest is required".into()));
    }
    if let Some(cap) = capacity
        && cap > 0
        && number_of_guests > cap {
        return Err(AppError::Validation(format!("This room accommodates at most {} guests", cap)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_overlap_start_inside() {
        assert!(ranges_overlap(d("2025-06-01"), d("2025-06-05"), d("2025-06-04"), d("2025-06-07")));
    }

    #[test]
    fn test_overlap_end_inside() {
        assert!(ranges_overlap(d("2025-06-05"), d("2025-06-10"), d("2025-06-01"), d("2025-06-06")));
    }

    #[test]
    fn test_overlap_contains() {
        assert!(ranges_overlap(d("2025-06-03"), d("2025-06-04"), d("2025-06-01"), d("2025-06-07")));
        assert!(ranges_overlap(d("2025-06-01"), d("2025-06-10"), d("2025-06-03"), d("2025-06-04")));
    }

    #[test]
    fn test_touching_ranges_do_not_overlap() {
        assert!(!ranges_overlap(d("2025-06-01"), d("2025-06-05"), d("2025-06-05"), d("2025-06-07")));
        assert!(!ranges_overlap(d("2025-06-05"), d("2025-06-07"), d("2025-06-01"), d("2025-06-05")));
    }

    #[test]
    fn test_identical_ranges_overlap() {
        assert!(ranges_overlap(d("2025-06-01"), d("2025-06-05"), d("2025-06-01"), d("2025-06-05")));
    }

    #[test]
    fn test_validate_stay() {
        assert_eq!(validate_stay(d("2025-06-01"), d("2025-06-05")).unwrap(), 4);
        assert!(validate_stay(d("2025-06-05"), d("2025-06-05")).is_err());
        assert!(validate_stay(d("2025-06-06"), d("2025-06-05")).is_err());
    }

    #[test]
    fn test_validate_guests() {
        assert!(validate_guests(2, Some(2)).is_ok());
        assert!(validate_guests(3, Some(2)).is_err());
        assert!(validate_guests(0, None).is_err());
        assert!(validate_guests(9, None).is_ok());
    }
}
