//! Travel direction from the train number.

use crate::state::Direction;

/// Derive the travel direction from a train number string.
///
/// The first contiguous run of decimal digits is the numeric portion; the
/// parity of its last digit decides the direction (even = Up, odd = Down).
/// Strings with no digits, including the empty string, default to Up.
pub fn resolve_direction(train_number: &str) -> Direction {
    let mut last_digit = None;

    for c in train_number.chars() {
        if c.is_ascii_digit() {
            last_digit = Some(c);
        } else if last_digit.is_some() {
            // End of the first digit run; later runs are ignored.
            break;
        }
    }

    match last_digit {
        Some(d) if (d as u8 - b'0') % 2 == 0 => Direction::Up,
        Some(_) => Direction::Down,
        None => Direction::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_train_number_is_up() {
        assert_eq!(resolve_direction("1262"), Direction::Up);
    }

    #[test]
    fn test_odd_train_number_is_down() {
        assert_eq!(resolve_direction("1261"), Direction::Down);
    }

    #[test]
    fn test_deadhead_prefix_is_skipped() {
        assert_eq!(resolve_direction("回1302A"), Direction::Up);
        assert_eq!(resolve_direction("回1301A"), Direction::Down);
    }

    #[test]
    fn test_letter_prefix_and_suffix() {
        assert_eq!(resolve_direction("A1234"), Direction::Up);
    }

    #[test]
    fn test_first_digit_run_wins() {
        // "12" is the matched run; the trailing "3" belongs to a later run.
        assert_eq!(resolve_direction("12X3"), Direction::Up);
        assert_eq!(resolve_direction("1X34"), Direction::Down);
    }

    #[test]
    fn test_no_digits_defaults_to_up() {
        assert_eq!(resolve_direction(""), Direction::Up);
        assert_eq!(resolve_direction("回送"), Direction::Up);
        assert_eq!(resolve_direction("ABC"), Direction::Up);
    }
}
