//! Error type shared by the demangling routines.

use std::fmt;

/// Reasons a symbol can fail to demangle.
///
/// Malformed and unsupported symbols are expected inputs. Every parsing
/// step reports one of these instead of panicking, and the first failure
/// at any depth aborts the whole decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The mangled symbol ends abruptly.
    UnexpectedEnd,

    /// A length, count or index field is missing, malformed or would
    /// overflow.
    BadLength,

    /// An operator code without a known spelling. This includes the
    /// user-defined conversion form `op`, which is not implemented.
    UnknownOperator,

    /// A `T` or `N` reference outside the bounds of the argument table.
    BadBackReference,

    /// A character that no type production recognizes.
    UnexpectedType,

    /// The argument list ran past its iteration bound.
    TooManyArguments,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnexpectedEnd => write!(f, "mangled symbol ends abruptly"),
            Error::BadLength => write!(f, "length field is malformed or out of range"),
            Error::UnknownOperator => write!(f, "operator code has no known spelling"),
            Error::BadBackReference => {
                write!(f, "back reference that is out-of-bounds of the argument table")
            }
            Error::UnexpectedType => write!(f, "type code is not recognized"),
            Error::TooManyArguments => write!(f, "argument list exceeds the iteration bound"),
        }
    }
}

impl std::error::Error for Error {}

/// A demangling result of `T` or a demangling [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn size_of_error() {
    assert_eq!(
        std::mem::size_of::<Error>(),
        1,
        "We should keep the size of our Error type in check"
    );
}
