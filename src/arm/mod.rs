//! Legacy ARM-style (cfront) C++ symbol demangler
//!
//! ```text
//! <mangled-name> = <name> __ [<scope>] F <argument-list>
//!                | __ <operator-code> __ <scope> F <argument-list>
//!                | __ ct __ <scope>                // constructor
//!                | __ dt __ <scope>                // destructor
//!
//! <scope> = <class-name>
//!         | Q <digit> [<class-name>]+ <filler> <filler>
//!
//! <class-name> = <length> <identifier>
//!
//! <argument-list> = [<argument>]+
//!
//! <argument> = <type>
//!            | T <index>                           // back reference
//!            | N <digit> <index>                   // repeat, digit >= 2
//!
//! <type> = [<declarator>]* <base-type>
//!
//! <declarator> = U | C | V | S                     // unsigned const volatile signed
//!              | P | R                             // pointer, reference
//!              | P F <argument>* _ <type>          // pointer to function
//!
//! <base-type> = <class-name>
//!             | Q <digit> [<class-name>]+ <filler> <filler>
//!             | v | c | s | i | l | f | d | r | e
//! ```
//!
//! Array (`A`), standalone function (`F`) and pointer-to-member (`M`)
//! declarators are recognized but not expanded, and the user-defined
//! conversion form (`op`) is not implemented.

mod error;
mod index_str;
mod ops;
mod tests;

pub use error::Error;

use crate::TokenStream;
use bitflags::bitflags;
use error::Result;
use index_str::IndexStr;

/// Bound on the argument list loop so malformed symbols cannot spin
/// forever.
const MAX_ARGUMENTS: usize = 128;

/// Checks whether a symbol could plausibly be mangled in the ARM scheme.
///
/// Only a heuristic: every ARM mangled name contains a `__` separator
/// but so do symbols from several other schemes, so expect false
/// positives. Picking between candidate schemes is the caller's job.
pub fn is_mangled(s: &str) -> bool {
    s.contains("__")
}

/// Demangles one ARM-scheme mangled symbol.
pub fn parse(s: &str) -> Result<String> {
    Demangler::new(s).demangle()
}

bitflags! {
    /// Declarators that render after the base type of the argument they
    /// belong to, in the fixed order pointer, reference, const.
    #[derive(Clone, Copy)]
    struct Modifiers: u8 {
        const POINTER = 1;
        const REFERENCE = 1 << 1;
        /// `const` applied to a pointer renders as a ` const` suffix
        /// rather than a `const ` prefix.
        const CONST = 1 << 2;
    }
}

/// How the head of the symbol is encoded. Constructors and destructors
/// are terminal, they carry no parameter list.
#[derive(Clone, Copy)]
enum Encoding {
    Function,
    Operator,
    Constructor,
    Destructor,
}

/// Previously rendered argument types, referenced 1-based by the `T`
/// and `N` productions.
#[derive(Default)]
struct ArgTable {
    entries: Vec<String>,
}

impl ArgTable {
    fn record(&mut self, arg: String) {
        self.entries.push(arg);
    }

    fn get(&self, index: usize) -> Result<&str> {
        index
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .map(String::as_str)
            .ok_or(Error::BadBackReference)
    }
}

struct Demangler<'a> {
    src: IndexStr<'a>,
    stream: TokenStream,
    args: ArgTable,
    encoding: Encoding,
}

impl<'a> Demangler<'a> {
    fn new(s: &'a str) -> Demangler<'a> {
        Demangler {
            src: IndexStr::new(s.as_bytes()),
            stream: TokenStream::new(),
            args: ArgTable::default(),
            encoding: Encoding::Function,
        }
    }

    /// Nested declarators parse with their own stream, argument table
    /// and modifier scope, sharing only the cursor position.
    fn nested(&self) -> Demangler<'a> {
        Demangler {
            src: self.src,
            stream: TokenStream::new(),
            args: ArgTable::default(),
            encoding: Encoding::Function,
        }
    }

    fn demangle(mut self) -> Result<String> {
        self.read_name()?;

        match self.encoding {
            Encoding::Constructor => {
                self.finish_member("::")?;
                return Ok(self.stream.flatten());
            }
            Encoding::Destructor => {
                self.finish_member("::~")?;
                return Ok(self.stream.flatten());
            }
            Encoding::Function | Encoding::Operator => {}
        }

        match self.src.next() {
            Some(b'F') => {}
            Some(_) => return Err(Error::UnexpectedType),
            None => return Err(Error::UnexpectedEnd),
        }

        self.stream.push("(");

        let mut count = 0;
        loop {
            match self.src.peek() {
                Some(b'T') => {
                    self.src.advance(1);
                    let index = self.src.base10()?;
                    let arg = self.args.get(index)?.to_owned();
                    self.stream.push_string(arg.clone());
                    self.args.record(arg);
                }
                Some(b'N') => {
                    self.src.advance(1);
                    let repeat = self.src.digit()?;
                    if repeat < 2 {
                        return Err(Error::BadLength);
                    }
                    let index = self.src.base10()?;
                    let arg = self.args.get(index)?.to_owned();
                    for rep in 0..repeat {
                        if rep != 0 {
                            self.stream.push(", ");
                        }
                        self.stream.push_string(arg.clone());
                        self.args.record(arg.clone());
                    }
                }
                _ => {
                    let mark = self.stream.mark();
                    let modifiers = self.type_expr()?;
                    self.apply(modifiers);
                    self.args.record(self.stream.text_from(mark));
                    self.stream.push(", ");
                }
            }

            if self.src.is_empty() {
                break;
            }

            count += 1;
            if count > MAX_ARGUMENTS {
                return Err(Error::TooManyArguments);
            }
        }

        // the type branch leaves a separator behind after the final argument
        if self.stream.last() == Some(", ") {
            self.stream.pop();
        }

        self.stream.push(")");
        Ok(self.stream.flatten())
    }

    fn read_name(&mut self) -> Result<()> {
        if self.src.eat_slice(b"__") {
            self.read_operator_name()
        } else {
            self.read_plain()
        }
    }

    /// A plain function: everything before the first `__` is the name,
    /// an optional scope qualifier follows the delimiter.
    fn read_plain(&mut self) -> Result<()> {
        let delim = self.src.find(b"__").ok_or(Error::UnexpectedEnd)?;
        let name = self.src.take(delim).ok_or(Error::UnexpectedEnd)?;
        self.src.advance(2);

        if let Some(scope) = self.read_scope()? {
            self.stream.push_string(scope);
            self.stream.push("::");
        }

        self.stream.push_string(utf8(name)?.to_string());
        Ok(())
    }

    /// Operator, constructor and destructor heads all start with `__`,
    /// which the caller has already consumed.
    fn read_operator_name(&mut self) -> Result<()> {
        match self.src.remaining().get(..2) {
            Some(b"ct") => return self.read_ctor_dtor(Encoding::Constructor),
            Some(b"dt") => return self.read_ctor_dtor(Encoding::Destructor),
            Some(_) => {}
            // the input ends mid-code
            None => return Err(Error::UnexpectedEnd),
        }

        let (spelling, len) = ops::lookup(self.src.remaining()).ok_or(Error::UnknownOperator)?;
        self.src.advance(len);
        self.encoding = Encoding::Operator;
        self.stream.push(spelling);

        if !self.src.eat_slice(b"__") {
            return Err(Error::UnexpectedEnd);
        }

        // retract the provisional operator fragment so the enclosing
        // scope can render in front of it
        match self.read_scope()? {
            Some(scope) => {
                let operator = self.stream.pop().ok_or(Error::UnexpectedEnd)?;
                self.stream.push_string(scope);
                self.stream.push("::");
                self.stream.push_cow(operator);
                Ok(())
            }
            // an operator head without an enclosing scope is not a
            // valid encoding
            None => Err(Error::UnexpectedType),
        }
    }

    /// `ct`/`dt` span four characters, then name the class they belong
    /// to. The head is terminal, anything after the class is ignored.
    fn read_ctor_dtor(&mut self, encoding: Encoding) -> Result<()> {
        self.encoding = encoding;
        self.src.advance(4);

        match self.read_scope()? {
            Some(scope) => {
                self.stream.push_string(scope);
                Ok(())
            }
            None => Err(Error::UnexpectedType),
        }
    }

    /// Renders `Scope::Scope()` or `Scope::~Scope()` by duplicating the
    /// class fragment the constructor/destructor reader left behind.
    fn finish_member(&mut self, separator: &'static str) -> Result<()> {
        let class = self.stream.last().ok_or(Error::UnexpectedEnd)?.to_string();
        self.stream.push(separator);
        self.stream.push_string(class);
        self.stream.push("()");
        Ok(())
    }

    /// An optional scope qualifier: `Q<digit>` introduces a qualified
    /// name, a bare digit a single class name.
    fn read_scope(&mut self) -> Result<Option<String>> {
        match (self.src.peek(), self.src.peek_second()) {
            (Some(b'Q'), Some(digit)) if digit.is_ascii_digit() => {
                self.src.advance(1);
                self.read_qualified().map(Some)
            }
            (Some(digit), _) if digit.is_ascii_digit() => {
                self.read_class().map(|class| Some(class.to_string()))
            }
            _ => Ok(None),
        }
    }

    /// `<length><identifier>`, e.g. `3Foo`.
    fn read_class(&mut self) -> Result<&'a str> {
        let len = self.src.base10()?;
        if len == 0 {
            return Err(Error::BadLength);
        }
        let name = self.src.take(len).ok_or(Error::UnexpectedEnd)?;
        utf8(name)
    }

    /// A component count followed by that many class names. Two filler
    /// characters terminate the form; constructor encodings may end the
    /// input inside them, so running off the end there is tolerated.
    fn read_qualified(&mut self) -> Result<String> {
        let count = self.src.digit()?;
        if count == 0 {
            return Err(Error::BadLength);
        }

        let mut path = String::new();
        for component in 0..count {
            if component != 0 {
                path.push_str("::");
            }
            path.push_str(self.read_class()?);
        }

        self.src.advance(2);
        Ok(path)
    }

    /// Decodes one type expression into the stream, returning the
    /// declarator suffixes to apply after it.
    fn type_expr(&mut self) -> Result<Modifiers> {
        let mut modifiers = Modifiers::empty();

        loop {
            match self.src.peek() {
                Some(b'U') => {
                    self.src.advance(1);
                    self.stream.push("unsigned ");
                }
                Some(b'C') => {
                    self.src.advance(1);
                    if self.src.peek() == Some(b'P') {
                        modifiers |= Modifiers::CONST;
                    } else {
                        self.stream.push("const ");
                    }
                }
                Some(b'V') => {
                    self.src.advance(1);
                    self.stream.push("volatile ");
                }
                Some(b'S') => {
                    self.src.advance(1);
                    self.stream.push("signed ");
                }
                Some(b'P') => {
                    self.src.advance(1);
                    if self.src.peek() == Some(b'F') {
                        self.src.advance(1);
                        self.fn_pointer()?;
                        return Ok(modifiers);
                    }
                    modifiers |= Modifiers::POINTER;
                }
                Some(b'R') => {
                    self.src.advance(1);
                    modifiers |= Modifiers::REFERENCE;
                }
                // array, function and pointer-to-member declarators are
                // recognized but not expanded
                Some(b'A' | b'F' | b'M') => self.src.advance(1),
                _ => break,
            }
        }

        match self.src.peek() {
            Some(b'0'..=b'9') => {
                let class = self.read_class()?.to_string();
                self.stream.push_string(class);
            }
            Some(b'Q') => {
                self.src.advance(1);
                let path = self.read_qualified()?;
                self.stream.push_string(path);
            }
            Some(c) => {
                let spelling = match c {
                    b'v' => "void",
                    b'c' => "char",
                    b's' => "short",
                    b'i' => "int",
                    b'l' => "long",
                    b'f' => "float",
                    b'd' => "double",
                    b'r' => "long double",
                    b'e' => "...",
                    _ => return Err(Error::UnexpectedType),
                };
                self.src.advance(1);
                self.stream.push(spelling);
            }
            None => return Err(Error::UnexpectedEnd),
        }

        Ok(modifiers)
    }

    /// `PF<arguments>_<return>` renders as `<return> (*)(<arguments>)`.
    fn fn_pointer(&mut self) -> Result<()> {
        let arguments = self.fn_arguments()?;

        let mut inner = self.nested();
        let modifiers = inner.type_expr()?;
        inner.apply(modifiers);
        self.src = inner.src;

        self.stream.push_string(inner.stream.flatten());
        self.stream.push(" (*)(");
        self.stream.push_string(arguments);
        self.stream.push(")");
        Ok(())
    }

    /// The inline argument list of a function pointer, terminated by a
    /// literal `_`. Back references resolve against the nested scope's
    /// own table; `N` repeats are not valid here.
    fn fn_arguments(&mut self) -> Result<String> {
        let mut inner = self.nested();
        let mut count = 0;

        loop {
            match inner.src.peek() {
                Some(b'T') => {
                    inner.src.advance(1);
                    let index = inner.src.base10()?;
                    let arg = inner.args.get(index)?.to_owned();
                    inner.stream.push_string(arg.clone());
                    inner.args.record(arg);
                }
                _ => {
                    let mark = inner.stream.mark();
                    let modifiers = inner.type_expr()?;
                    inner.apply(modifiers);
                    inner.args.record(inner.stream.text_from(mark));
                }
            }

            if inner.src.peek() == Some(b'_') {
                inner.src.advance(1);
                break;
            }

            inner.stream.push(", ");

            count += 1;
            if count > MAX_ARGUMENTS {
                return Err(Error::TooManyArguments);
            }
        }

        self.src = inner.src;
        Ok(inner.stream.flatten())
    }

    /// Declarator suffixes render in a fixed order after the base type.
    fn apply(&mut self, modifiers: Modifiers) {
        if modifiers.contains(Modifiers::POINTER) {
            self.stream.push("*");
        }
        if modifiers.contains(Modifiers::REFERENCE) {
            self.stream.push("&");
        }
        if modifiers.contains(Modifiers::CONST) {
            self.stream.push(" const");
        }
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| Error::UnexpectedType)
}
