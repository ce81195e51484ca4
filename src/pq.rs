//! The pq-system: hyphen strings of the shape `-^a p -^b q -^c`. The
//! isomorphism maps well-formed strings onto addition; a string is a
//! theorem exactly when the hyphen counts satisfy `a + b = c`.

use crate::error::{StrangeloopError, StrangeloopResult};

/// A parsed pq string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PqString {
    pub left: usize,
    pub right: usize,
    pub result: usize,
}

impl PqString {
    /// Theorem iff the symbol structure mirrors addition and every group
    /// is non-empty.
    pub fn is_theorem(self) -> bool {
        self.left >= 1 && self.right >= 1 && self.left + self.right == self.result
    }
}

/// Build the (unique) theorem for `left + right`.
pub fn format(left: usize, right: usize) -> String {
    let hyphens = |n: usize| "-".repeat(n);
    format!(
        "{}p{}q{}",
        hyphens(left),
        hyphens(right),
        hyphens(left + right)
    )
}

/// Parse a pq string into its hyphen counts.
pub fn parse(s: &str) -> StrangeloopResult<PqString> {
    let malformed = || {
        StrangeloopError::validation(format!(
            "'{s}' is not a pq string (expected hyphens p hyphens q hyphens)"
        ))
    };

    let (left, rest) = s.split_once('p').ok_or_else(malformed)?;
    let (right, result) = rest.split_once('q').ok_or_else(malformed)?;
    for group in [left, right, result] {
        if !group.chars().all(|c| c == '-') {
            return Err(malformed());
        }
    }
    Ok(PqString {
        left: left.len(),
        right: right.len(),
        result: result.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mirrors_addition() {
        assert_eq!(format(2, 3), "--p---q-----");
    }

    #[test]
    fn parse_roundtrips_format() {
        let parsed = parse(&format(2, 3)).unwrap();
        assert_eq!(
            parsed,
            PqString {
                left: 2,
                right: 3,
                result: 5
            }
        );
        assert!(parsed.is_theorem());
    }

    #[test]
    fn non_theorems_are_well_formed_but_false() {
        let parsed = parse("--p--q-----").unwrap();
        assert!(!parsed.is_theorem());
    }

    #[test]
    fn empty_groups_are_not_theorems() {
        assert!(!parse("p-q-").unwrap().is_theorem());
    }

    #[test]
    fn junk_is_rejected() {
        assert!(parse("--p--x----").is_err());
        assert!(parse("---").is_err());
        assert!(parse("-p-q-z").is_err());
    }
}
