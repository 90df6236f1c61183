//! Fixed ranking of shape kinds that decides which side of a pair supplies the test.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Dispatch rank of a shape kind.
///
/// A kind with precedence `N` must be able to test itself against every kind whose precedence
/// is `<= N`. The resolver always runs the higher-ranked side's test, so each pair only needs
/// to be written once. This is a contract, not something the compiler checks: a missing test
/// resolves to "not colliding".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Precedence(pub u32);

impl Precedence {
    pub const POINT: Precedence = Precedence(0);
    pub const SEGMENT: Precedence = Precedence(1);
    pub const RECT: Precedence = Precedence(2);
    pub const ELLIPSE: Precedence = Precedence(3);
    /// Highest builtin rank. User shapes must rank above it.
    pub const MAX: Precedence = Precedence::ELLIPSE;

    #[inline]
    pub const fn above_builtin(offset: u32) -> Precedence {
        //! Returns the `offset`th rank available to user-defined shapes.
        Precedence(Precedence::MAX.0 + 1 + offset)
    }

    #[inline]
    pub fn is_builtin(self) -> bool {
        self <= Precedence::MAX
    }
}

impl Display for Precedence {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
