//! Operator overloading for specification combinators.
//!
//! `&`, `|` and `!` build the same trees as [`Specification::and`],
//! [`Specification::or`] and [`Specification::negate`]:
//!
//! ```
//! use roster_spec::Specification;
//!
//! let spec = Specification::attribute_equals("username", "m1")
//!     & Specification::joined_attribute_equals("team", "name", "teamA");
//! assert!(matches!(spec, Specification::And { .. }));
//! ```

use std::ops::{BitAnd, BitOr, Not};

use crate::specification::Specification;

impl BitAnd for Specification {
    type Output = Specification;

    fn bitand(self, rhs: Specification) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Specification {
    type Output = Specification;

    fn bitor(self, rhs: Specification) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for Specification {
    type Output = Specification;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{member, team, Teams};

    #[test]
    fn test_and_operator() {
        let rule = Specification::Always & Specification::Always;
        assert!(rule.is_satisfied_by(&member("m1", 1, None), &()).unwrap());

        let rule = Specification::Always & Specification::Never;
        assert!(!rule.is_satisfied_by(&member("m1", 1, None), &()).unwrap());
    }

    #[test]
    fn test_or_operator() {
        let rule = Specification::Never | Specification::Always;
        assert!(rule.is_satisfied_by(&member("m1", 1, None), &()).unwrap());

        let rule = Specification::Never | Specification::Never;
        assert!(!rule.is_satisfied_by(&member("m1", 1, None), &()).unwrap());
    }

    #[test]
    fn test_not_operator() {
        let team_a = team("teamA");
        let m = member("m1", 1, Some(&team_a));
        let teams = Teams(vec![team_a]);

        let in_team_a = Specification::joined_attribute_equals("team", "name", "teamA");
        assert!(in_team_a.is_satisfied_by(&m, &teams).unwrap());
        assert!(!(!in_team_a).is_satisfied_by(&m, &teams).unwrap());
    }

    #[test]
    fn test_operators_match_methods() {
        let a = Specification::attribute_equals("username", "m1");
        let b = Specification::attribute_equals("age", 3);
        assert_eq!(a.clone() & b.clone(), a.clone().and(b.clone()));
        assert_eq!(a.clone() | b.clone(), a.clone().or(b));
        assert_eq!(!a.clone(), a.negate());
    }
}
