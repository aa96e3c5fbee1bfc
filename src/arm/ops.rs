//! Operator code table.
//!
//! Codes are two characters; a few disambiguate on a third and a few
//! span a fixed three characters. `ct` and `dt` never reach this table,
//! the name resolver handles them since they mark constructors and
//! destructors rather than a spelling.

/// Spelling for the operator code at the front of `code`, along with how
/// many bytes the code occupies. `None` for codes with no known spelling,
/// notably the user-defined conversion form `op`.
pub(super) fn lookup(code: &[u8]) -> Option<(&'static str, usize)> {
    let (&a, &b) = (code.first()?, code.get(1)?);
    let third = code.get(2).copied();

    let entry = match (a, b) {
        (b'm', b'l') => ("operator*", 2),
        (b'd', b'v') => ("operator/", 2),
        (b'm', b'd') => ("operator%", 2),
        (b'p', b'l') => ("operator+", 2),
        (b'm', b'i') => ("operator-", 2),
        (b'l', b's') => ("operator<<", 2),
        (b'r', b's') => ("operator>>", 2),
        (b'e', b'q') => ("operator==", 2),
        (b'n', b'e') => ("operator!=", 2),
        (b'l', b't') => ("operator<", 2),
        (b'g', b't') => ("operator>", 2),
        (b'l', b'e') => ("operator<=", 2),
        (b'g', b'e') => ("operator>=", 2),
        (b'o', b'r') => ("operator|", 2),
        (b'e', b'r') => ("operator^", 2),
        (b'o', b'o') => ("operator||", 2),
        (b'n', b't') => ("operator!", 2),
        (b'c', b'o') => ("operator~", 2),
        (b'p', b'p') => ("operator++", 2),
        (b'm', b'm') => ("operator--", 2),
        (b'a', b's') => ("operator=", 2),
        (b'r', b'f') => ("operator->", 2),
        (b'c', b'm') => ("operator,", 2),
        (b'r', b'm') => ("operator->*", 2),
        (b'c', b'l') => ("()", 2),
        (b'v', b'c') => ("[]", 2),
        (b'n', b'w') => ("operator new()", 2),
        (b'd', b'l') => ("operator delete()", 2),

        // a trailing `v` distinguishes /= from a bare address-of
        (b'a', b'd') => match third {
            Some(b'v') => ("operator/=", 3),
            _ => ("operator&", 2),
        },
        (b'a', b'a') => match third {
            Some(b'd') => ("operator&=", 3),
            _ => ("operator&&", 2),
        },
        (b'a', b'm') => match third {
            Some(b'i') => ("operator-=", 3),
            Some(b'u') => ("operator*=", 3),
            Some(b'd') => ("operator%=", 3),
            _ => return None,
        },

        // fixed three character codes, the third character is not checked
        (b'a', b'p') => ("operator+=", 3),
        (b'a', b'l') => ("operator<<=", 3),
        (b'a', b'r') => ("operator>>=", 3),
        (b'a', b'o') => ("operator|=", 3),
        (b'a', b'e') => ("operator^=", 3),

        _ => return None,
    };

    Some(entry)
}
