//! Target-digit substitution.
//!
//! Rewrites the leading digit of every code in a sorted list. The list is not
//! re-sorted afterwards and collisions are kept, so position `i` of the output
//! always corresponds to position `i` of the input.

use crate::types::{Code3, TargetDigit};

/// Substitute `digit` into the first position of each code.
///
/// With no digit selected the codes come back unchanged.
///
/// # Examples
///
/// ```
/// use pickline_core::code::CodeNormalizer;
/// use pickline_core::target;
/// use pickline_core::TargetDigit;
///
/// let codes = CodeNormalizer::default();
/// let sorted: Vec<_> = ["050", "123", "999"]
///     .iter()
///     .map(|s| codes.normalize_str(s).unwrap())
///     .collect();
///
/// let nine = TargetDigit::try_from(9).unwrap();
/// let targeted: Vec<String> = target::apply(&sorted, Some(nine))
///     .iter()
///     .map(ToString::to_string)
///     .collect();
/// assert_eq!(targeted, ["950", "923", "999"]);
/// ```
#[must_use]
pub fn apply(codes: &[Code3], digit: Option<TargetDigit>) -> Vec<Code3> {
    match digit {
        None => codes.to_vec(),
        Some(digit) => codes.iter().map(|code| code.with_leading(digit)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::CodeNormalizer;
    use pretty_assertions::assert_eq;

    fn codes(list: &[&str]) -> Vec<Code3> {
        let normalizer = CodeNormalizer::default();
        list.iter()
            .map(|s| normalizer.normalize_str(s).unwrap())
            .collect()
    }

    fn strings(list: &[Code3]) -> Vec<&str> {
        list.iter().map(Code3::as_str).collect()
    }

    #[test]
    fn test_no_selection_is_identity() {
        let input = codes(&["050", "123"]);
        assert_eq!(apply(&input, None), input);
    }

    #[test]
    fn test_order_is_not_recomputed() {
        let input = codes(&["050", "123", "999"]);
        let zero = TargetDigit::try_from(0).unwrap();
        // 050 -> 050, 123 -> 023, 999 -> 099: no longer ascending
        assert_eq!(strings(&apply(&input, Some(zero))), vec!["050", "023", "099"]);
    }

    #[test]
    fn test_collisions_are_kept() {
        let input = codes(&["123", "223", "323"]);
        let five = TargetDigit::try_from(5).unwrap();
        assert_eq!(strings(&apply(&input, Some(five))), vec!["523", "523", "523"]);
    }

    #[test]
    fn test_empty() {
        let seven = TargetDigit::try_from(7).unwrap();
        assert!(apply(&[], Some(seven)).is_empty());
    }
}
