//! Natural string ordering
//!
//! Pin and gate names mix letters and numbers ("A2", "A10", "VCC"). Plain
//! lexicographic order puts "A10" before "A2"; [`natural_cmp`] compares runs
//! of ASCII digits by numeric value instead.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

/// Compare two strings, treating digit runs as numbers
///
/// Total order: strings that compare equal numerically but differ in
/// spelling (e.g. leading zeros) fall back to byte order.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_digits(&mut ai);
                let nb = take_digits(&mut bi);
                match cmp_digit_runs(&na, &nb) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(ca), Some(cb)) => {
                match ca.cmp(&cb) {
                    Ordering::Equal => {}
                    other => return other,
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digits(it: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = it.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        it.next();
    }
    run
}

// Digit runs may exceed any integer width, so compare them as text.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(natural_cmp("A2", "A10"), Ordering::Less);
        assert_eq!(natural_cmp("A10", "A2"), Ordering::Greater);
        assert_eq!(natural_cmp("pin9", "pin10"), Ordering::Less);
    }

    #[test]
    fn letters_compare_lexicographically() {
        assert_eq!(natural_cmp("GND", "VCC"), Ordering::Less);
        assert_eq!(natural_cmp("A", "AB"), Ordering::Less);
    }

    #[test]
    fn leading_zeros_break_ties_by_spelling() {
        assert_ne!(natural_cmp("A01", "A1"), Ordering::Equal);
        assert_eq!(natural_cmp("A1", "A1"), Ordering::Equal);
    }

    #[test]
    fn sorts_pin_names() {
        let mut names = vec!["10", "2", "1", "GND", "A10", "A9"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["1", "2", "10", "A9", "A10", "GND"]);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a in "[A-C0-9]{0,6}", b in "[A-C0-9]{0,6}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }

        #[test]
        fn prop_equal_only_when_identical(a in "[A-C0-9]{0,6}", b in "[A-C0-9]{0,6}") {
            prop_assert_eq!(natural_cmp(&a, &b) == Ordering::Equal, a == b);
        }
    }
}
