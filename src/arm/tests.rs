#![cfg(test)]

use super::*;

macro_rules! eq {
    ($mangled:expr => $demangled:expr) => {
        match parse($mangled) {
            Ok(sym) => assert_eq!(sym, $demangled),
            Err(err) => panic!("demangling '{}' failed: {err}", $mangled),
        }
    };
}

macro_rules! fails {
    ($mangled:expr => $err:expr) => {
        assert_eq!(parse($mangled), Err($err));
    };
}

#[test]
fn plain() {
    eq!("hello__Fv" => "hello(void)");
    eq!("f__Fii" => "f(int, int)");
}

#[test]
fn scoped() {
    eq!("bar__3FooFi" => "Foo::bar(int)");
}

#[test]
fn qualified_scope() {
    eq!("bar__Q23Foo3Baz__Fi" => "Foo::Baz::bar(int)");
}

#[test]
fn fundamentals() {
    eq!("f__Fcsilfd" => "f(char, short, int, long, float, double)");
    eq!("f__Fr" => "f(long double)");
    eq!("f__Fie" => "f(int, ...)");
}

#[test]
fn declarators() {
    eq!("f__FPc" => "f(char*)");
    eq!("f__FRd" => "f(double&)");
    eq!("f__FUiSc" => "f(unsigned int, signed char)");
    eq!("f__FVl" => "f(volatile long)");
}

#[test]
fn const_placement() {
    eq!("f__FCi" => "f(const int)");
    // const binding to a pointer renders after it
    eq!("f__FCPi" => "f(int* const)");
}

#[test]
fn class_arguments() {
    eq!("f__F3Boo" => "f(Boo)");
    eq!("f__FP6Widget" => "f(Widget*)");
    eq!("f__FiQ23Gtk6Window__" => "f(int, Gtk::Window)");
}

#[test]
fn operators() {
    let table = [
        ("pl", "operator+"),
        ("mi", "operator-"),
        ("ml", "operator*"),
        ("dv", "operator/"),
        ("md", "operator%"),
        ("ls", "operator<<"),
        ("rs", "operator>>"),
        ("eq", "operator=="),
        ("ne", "operator!="),
        ("lt", "operator<"),
        ("gt", "operator>"),
        ("le", "operator<="),
        ("ge", "operator>="),
        ("or", "operator|"),
        ("er", "operator^"),
        ("oo", "operator||"),
        ("nt", "operator!"),
        ("co", "operator~"),
        ("pp", "operator++"),
        ("mm", "operator--"),
        ("as", "operator="),
        ("rf", "operator->"),
        ("cm", "operator,"),
        ("rm", "operator->*"),
        ("ad", "operator&"),
        ("aa", "operator&&"),
        ("adv", "operator/="),
        ("aad", "operator&="),
        ("ami", "operator-="),
        ("amu", "operator*="),
        ("amd", "operator%="),
        ("apl", "operator+="),
        ("als", "operator<<="),
        ("ars", "operator>>="),
        ("aor", "operator|="),
        ("aer", "operator^="),
        ("cl", "()"),
        ("vc", "[]"),
        ("nw", "operator new()"),
        ("dl", "operator delete()"),
    ];

    for (code, spelling) in table {
        let mangled = format!("__{code}__1CFv");
        match parse(&mangled) {
            Ok(sym) => assert_eq!(sym, format!("C::{spelling}(void)"), "`{code}`"),
            Err(err) => panic!("demangling operator code `{code}` failed: {err}"),
        }
    }
}

#[test]
fn qualified_operator() {
    eq!("__pl__Q23Foo3Bar__Fi" => "Foo::Bar::operator+(int)");
}

#[test]
fn operator_scope_required() {
    fails!("__pl__Fv" => Error::UnexpectedType);
}

#[test]
fn conversion_operator_unsupported() {
    fails!("__op__1CFv" => Error::UnknownOperator);
    fails!("__zz__1CFv" => Error::UnknownOperator);
    // `am` only pairs with `i`, `u` or `d`
    fails!("__amz__1CFv" => Error::UnknownOperator);
}

#[test]
fn truncated_operator_code() {
    fails!("__c" => Error::UnexpectedEnd);
    fails!("__" => Error::UnexpectedEnd);
}

#[test]
fn ctor_dtor() {
    eq!("__ct__3FooFv" => "Foo::Foo()");
    eq!("__dt__3FooFv" => "Foo::~Foo()");
    // the scope text is duplicated wholesale
    eq!("__ct__Q23Foo3Bar" => "Foo::Bar::Foo::Bar()");
}

#[test]
fn back_references() {
    eq!("f__FiT1" => "f(int, int)");
    eq!("f__FicT2" => "f(int, char, char)");
}

#[test]
fn back_reference_bounds() {
    fails!("f__FT1" => Error::BadBackReference);
    fails!("f__FiT0" => Error::BadBackReference);
    fails!("f__FiT2" => Error::BadBackReference);
}

#[test]
fn repeats() {
    eq!("f__FicN32" => "f(int, char, char, char, char)");
    eq!("f__FiiN31" => "f(int, int, int, int, int)");
}

#[test]
fn repeat_of_one_rejected() {
    fails!("f__FiN12" => Error::BadLength);
}

#[test]
fn function_pointers() {
    eq!("f__FPFi_v" => "f(void (*)(int))");
    eq!("f__FPFic_v" => "f(void (*)(int, char))");
    eq!("f__FPFv_i" => "f(int (*)(void))");
    eq!("f__FPFv_Pc" => "f(char* (*)(void))");
    eq!("f__FiPFi_vc" => "f(int, void (*)(int), char)");
}

#[test]
fn inline_back_references() {
    // `T` inside the inline list resolves against the nested table, not
    // the enclosing one
    eq!("f__FPFiT1_v" => "f(void (*)(int, int))");
}

#[test]
fn inline_repeat_rejected() {
    fails!("f__FPFiN21_v" => Error::UnexpectedType);
}

#[test]
fn missing_parameter_list() {
    fails!("f__3Fooi" => Error::UnexpectedType);
    fails!("f__3Foo" => Error::UnexpectedEnd);
    fails!("hello" => Error::UnexpectedEnd);
    fails!("" => Error::UnexpectedEnd);
}

#[test]
fn bad_lengths() {
    fails!("f__F0x" => Error::BadLength);
    fails!("f__F9i" => Error::UnexpectedEnd);
    fails!("f__F99999999999999999999i" => Error::BadLength);
}

#[test]
fn class_name_must_be_utf8() {
    // lengths count bytes, so a length can cut a multibyte character in half
    fails!("f__F1é" => Error::UnexpectedType);
}

#[test]
fn unknown_type_code() {
    fails!("f__Fz" => Error::UnexpectedType);
}

#[test]
fn iteration_bound() {
    let adversarial = format!("f__F{}", "i".repeat(140));
    fails!(&adversarial => Error::TooManyArguments);
}

#[test]
fn pure_function_of_input() {
    assert_eq!(parse("bar__3FooFi"), parse("bar__3FooFi"));
    assert_eq!(parse("f__FicT2"), parse("f__FicT2"));
}

#[test]
fn detection() {
    assert!(is_mangled("bar__3FooFi"));
    assert!(is_mangled("__pl__3FooFi"));
    // over-approximate on purpose
    assert!(is_mangled("rust__symbol__with__separators"));
    assert!(!is_mangled("main"));
    assert!(!is_mangled(""));
}
