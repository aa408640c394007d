/// A stack of boolean flags, one per open element.
///
/// Used to remember per-element state that must be restored when the element
/// is closed, for example whether its content became mixed, or whether text
/// inside it is written as CDATA.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitStack {
    bits: Vec<bool>,
}

impl BitStack {
    /// Creates an empty stack.
    #[inline]
    pub const fn new() -> Self {
        Self { bits: Vec::new() }
    }

    /// Pushes a new flag on top of the stack.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Removes the top flag and returns it. An empty stack yields `false`.
    #[inline]
    pub fn pop(&mut self) -> bool {
        self.bits.pop().unwrap_or(false)
    }

    /// Returns the top flag without removing it. An empty stack yields `false`.
    #[inline]
    pub fn peek(&self) -> bool {
        self.bits.last().copied().unwrap_or(false)
    }

    /// Returns `true` if no flags are pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}
