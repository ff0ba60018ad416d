//! HTTP method bit flags.

use bitflags::bitflags;
use std::fmt;

/// Number of real (non-synthetic) methods a [`MethodSet`] can hold.
pub const METHOD_COUNT: usize = 9;

bitflags! {
    /// A set of HTTP methods a route answers to.
    ///
    /// Besides the nine real methods there are two synthetic flags:
    ///
    /// - [`MethodSet::ANY`] is the union of every real method.
    /// - [`MethodSet::STUB`] marks placeholder routes created by a mount. It is
    ///   never produced by [`MethodSet::from_method_name`], so it can't match a
    ///   request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct MethodSet: u16 {
        /// `CONNECT`
        const CONNECT = 1 << 0;
        /// `DELETE`
        const DELETE = 1 << 1;
        /// `GET`
        const GET = 1 << 2;
        /// `HEAD`
        const HEAD = 1 << 3;
        /// `OPTIONS`
        const OPTIONS = 1 << 4;
        /// `PATCH`
        const PATCH = 1 << 5;
        /// `POST`
        const POST = 1 << 6;
        /// `PUT`
        const PUT = 1 << 7;
        /// `TRACE`
        const TRACE = 1 << 8;

        /// Every real method.
        const ANY = Self::CONNECT.bits()
            | Self::DELETE.bits()
            | Self::GET.bits()
            | Self::HEAD.bits()
            | Self::OPTIONS.bits()
            | Self::PATCH.bits()
            | Self::POST.bits()
            | Self::PUT.bits()
            | Self::TRACE.bits();

        /// Synthetic mount placeholder.
        const STUB = 1 << 9;
    }
}

// Ordered by bit position, so `METHODS[m.index()]` names `m`.
const METHODS: [(&str, MethodSet); METHOD_COUNT] = [
    ("CONNECT", MethodSet::CONNECT),
    ("DELETE", MethodSet::DELETE),
    ("GET", MethodSet::GET),
    ("HEAD", MethodSet::HEAD),
    ("OPTIONS", MethodSet::OPTIONS),
    ("PATCH", MethodSet::PATCH),
    ("POST", MethodSet::POST),
    ("PUT", MethodSet::PUT),
    ("TRACE", MethodSet::TRACE),
];

impl MethodSet {
    /// Look up the flag for a request method name.
    ///
    /// Returns `None` for methods the router doesn't support. Callers answer
    /// those with `405 Method Not Allowed`.
    pub fn from_method_name(name: &str) -> Option<Self> {
        METHODS
            .iter()
            .find(|(method, _)| *method == name)
            .map(|(_, flag)| *flag)
    }

    /// Look up the flag for an [`http::Method`].
    pub fn from_method(method: &http::Method) -> Option<Self> {
        Self::from_method_name(method.as_str())
    }

    /// Slot of a single real method, in `0..METHOD_COUNT`.
    ///
    /// Returns `None` if the set is empty, holds more than one method, or is
    /// only the `STUB` flag.
    pub fn index(self) -> Option<usize> {
        let real = self & Self::ANY;
        if real.bits().count_ones() == 1 && real == self {
            Some(real.bits().trailing_zeros() as usize)
        } else {
            None
        }
    }

    /// Iterate over the single real methods contained in this set.
    pub fn methods(self) -> impl Iterator<Item = MethodSet> {
        METHODS
            .iter()
            .map(|(_, flag)| *flag)
            .filter(move |flag| self.contains(*flag))
    }

    /// Name of a single real method.
    pub fn as_str(self) -> Option<&'static str> {
        self.index().map(|i| METHODS[i].0)
    }

    /// True if the set holds only the synthetic `STUB` flag.
    pub fn is_stub_only(self) -> bool {
        self == Self::STUB
    }
}

impl fmt::Display for MethodSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contains(Self::ANY) {
            f.write_str("ANY")?;
        } else {
            let mut first = true;
            for (name, flag) in METHODS.iter() {
                if self.contains(*flag) {
                    if !first {
                        f.write_str("|")?;
                    }
                    f.write_str(name)?;
                    first = false;
                }
            }
            if first && !self.contains(Self::STUB) {
                return f.write_str("NONE");
            }
        }
        if self.contains(Self::STUB) {
            if *self != Self::STUB {
                f.write_str("|")?;
            }
            f.write_str("STUB")?;
        }
        Ok(())
    }
}
