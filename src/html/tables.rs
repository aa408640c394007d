//! Precomputed ternary search trees of HTML element and attribute names.
//!
//! Each node takes four bytes: the character (an uppercase ASCII letter or
//! digit, or `0` which terminates a name), the offset of the node holding
//! smaller characters, the offset of the node holding greater characters, and
//! the properties of the name that ends at the terminating node. Offsets are
//! relative to the current node, `0` means that there is no such node. The
//! node for the next character of a name always follows its parent.

#[rustfmt::skip]
pub(crate) static HTML_ELEMENTS: [u8; 1212] = [
    b'M', 11, 184, 0,
    b'E', 7, 0, 0,
    b'T', 3, 0, 0,
    b'A', 0, 0, 0,
    0, 0, 0, 72,
    b'N', 0, 0, 0,
    b'U', 0, 0, 0,
    0, 0, 0, 66,
    b'A', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 64,
    b'F', 25, 114, 0,
    b'O', 7, 15, 0,
    b'R', 3, 0, 0,
    b'M', 0, 0, 0,
    0, 0, 0, 65,
    b'N', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    b'I', 0, 0, 0,
    b'E', 0, 0, 0,
    b'L', 0, 0, 0,
    b'D', 0, 0, 0,
    b'S', 0, 0, 0,
    b'E', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    b'R', 0, 0, 0,
    b'A', 0, 0, 0,
    b'M', 0, 0, 0,
    b'E', 0, 0, 0,
    b'S', 4, 0, 0,
    b'E', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    0, 0, 0, 74,
    b'C', 23, 74, 0,
    b'E', 6, 13, 0,
    b'N', 0, 0, 0,
    b'T', 0, 0, 0,
    b'E', 0, 0, 0,
    b'R', 0, 0, 0,
    0, 0, 0, 64,
    b'A', 0, 0, 0,
    b'P', 0, 0, 0,
    b'T', 0, 0, 0,
    b'I', 0, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    0, 0, 0, 64,
    b'O', 0, 0, 0,
    b'L', 0, 0, 0,
    b'G', 6, 0, 0,
    b'R', 0, 0, 0,
    b'O', 0, 0, 0,
    b'U', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 64,
    0, 0, 0, 72,
    b'B', 32, 0, 0,
    b'O', 4, 23, 0,
    b'D', 0, 0, 0,
    b'Y', 0, 0, 0,
    0, 0, 0, 64,
    b'L', 10, 0, 0,
    b'O', 0, 0, 0,
    b'C', 0, 0, 0,
    b'K', 0, 0, 0,
    b'Q', 0, 0, 0,
    b'U', 0, 0, 0,
    b'O', 0, 0, 0,
    b'T', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 65,
    b'A', 0, 0, 0,
    b'S', 0, 0, 0,
    b'E', 0, 0, 0,
    b'F', 5, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 72,
    0, 0, 0, 73,
    b'U', 6, 0, 0,
    b'T', 0, 0, 0,
    b'T', 0, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    0, 0, 0, 2,
    b'R', 0, 0, 0,
    0, 0, 0, 8,
    b'A', 0, 0, 0,
    b'P', 6, 14, 0,
    b'P', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    b'D', 7, 0, 0,
    b'D', 0, 0, 0,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    b'S', 0, 0, 0,
    b'S', 0, 0, 0,
    0, 0, 0, 64,
    0, 0, 0, 5,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    b'A', 0, 0, 0,
    0, 0, 0, 75,
    b'D', 0, 0, 0,
    b'I', 5, 10, 0,
    b'V', 2, 0, 0,
    0, 0, 0, 64,
    b'R', 0, 0, 0,
    0, 0, 0, 66,
    b'E', 3, 0, 0,
    b'L', 0, 0, 0,
    0, 0, 0, 65,
    b'D', 0, 0, 0,
    0, 0, 0, 64,
    b'T', 2, 0, 0,
    0, 0, 0, 64,
    b'L', 0, 0, 0,
    0, 0, 0, 66,
    b'I', 24, 47, 0,
    b'N', 7, 16, 0,
    b'S', 2, 0, 0,
    0, 0, 0, 65,
    b'P', 0, 0, 0,
    b'U', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 11,
    b'M', 3, 0, 0,
    b'G', 0, 0, 0,
    0, 0, 0, 15,
    b'F', 0, 0, 0,
    b'R', 0, 0, 0,
    b'A', 0, 0, 0,
    b'M', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 64,
    b'S', 0, 0, 0,
    b'I', 0, 0, 0,
    b'N', 0, 0, 0,
    b'D', 0, 0, 0,
    b'E', 0, 0, 0,
    b'X', 0, 0, 0,
    0, 0, 0, 72,
    b'H', 0, 0, 0,
    b'5', 2, 10, 0,
    0, 0, 0, 64,
    b'3', 2, 6, 0,
    0, 0, 0, 64,
    b'2', 2, 0, 0,
    0, 0, 0, 64,
    b'1', 0, 0, 0,
    0, 0, 0, 64,
    b'4', 0, 0, 0,
    0, 0, 0, 64,
    b'R', 2, 8, 0,
    0, 0, 0, 74,
    b'E', 4, 0, 0,
    b'A', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 97,
    b'6', 0, 0, 0,
    0, 0, 0, 64,
    b'T', 0, 0, 0,
    b'M', 0, 0, 0,
    b'L', 0, 0, 0,
    0, 0, 0, 64,
    b'L', 0, 0, 0,
    b'I', 5, 0, 0,
    b'N', 3, 0, 0,
    b'K', 0, 0, 0,
    0, 0, 0, 73,
    0, 0, 0, 64,
    b'E', 0, 0, 0,
    b'G', 0, 0, 0,
    b'E', 0, 0, 0,
    b'N', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 64,
    b'S', 24, 73, 0,
    b'E', 6, 13, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    b'C', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 2,
    b'C', 6, 0, 0,
    b'R', 0, 0, 0,
    b'I', 0, 0, 0,
    b'P', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 19,
    0, 0, 0, 64,
    b'T', 0, 0, 0,
    b'Y', 4, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 80,
    b'R', 0, 0, 0,
    b'I', 0, 0, 0,
    b'K', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 64,
    b'P', 10, 47, 0,
    b'A', 5, 6, 0,
    b'R', 0, 0, 0,
    b'A', 0, 0, 0,
    b'M', 0, 0, 0,
    0, 0, 0, 72,
    0, 0, 0, 64,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 64,
    b'O', 21, 0, 0,
    b'L', 2, 8, 0,
    0, 0, 0, 66,
    b'B', 0, 0, 0,
    b'J', 0, 0, 0,
    b'E', 0, 0, 0,
    b'C', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 67,
    b'P', 0, 0, 0,
    b'T', 0, 0, 0,
    b'I', 4, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    0, 0, 0, 66,
    b'G', 0, 0, 0,
    b'R', 0, 0, 0,
    b'O', 0, 0, 0,
    b'U', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 66,
    b'N', 0, 0, 0,
    b'O', 0, 0, 0,
    b'S', 7, 0, 0,
    b'C', 0, 0, 0,
    b'R', 0, 0, 0,
    b'I', 0, 0, 0,
    b'P', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    b'F', 0, 0, 0,
    b'R', 0, 0, 0,
    b'A', 0, 0, 0,
    b'M', 0, 0, 0,
    b'E', 0, 0, 0,
    b'S', 0, 0, 0,
    0, 0, 0, 64,
    b'Q', 0, 0, 0,
    0, 0, 0, 1,
    b'U', 3, 42, 0,
    b'L', 0, 0, 0,
    0, 0, 0, 66,
    b'T', 0, 0, 0,
    b'F', 5, 25, 0,
    b'O', 0, 0, 0,
    b'O', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 64,
    b'D', 2, 12, 0,
    0, 0, 0, 66,
    b'B', 5, 0, 0,
    b'O', 0, 0, 0,
    b'D', 0, 0, 0,
    b'Y', 0, 0, 0,
    0, 0, 0, 64,
    b'A', 0, 0, 0,
    b'B', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 64,
    b'E', 0, 0, 0,
    b'X', 0, 0, 0,
    b'T', 0, 0, 0,
    b'A', 0, 0, 0,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    b'A', 0, 0, 0,
    0, 0, 0, 2,
    b'I', 5, 11, 0,
    b'T', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 64,
    b'H', 0, 0, 0,
    b'E', 4, 0, 0,
    b'A', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 64,
    0, 0, 0, 66,
    b'R', 0, 0, 0,
    0, 0, 0, 64,
    b'X', 0, 0, 0,
    b'M', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 64,
];

#[rustfmt::skip]
pub(crate) static HTML_ATTRIBUTES: [u8; 664] = [
    b'L', 9, 92, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    b'G', 0, 0, 0,
    b'D', 0, 0, 0,
    b'E', 0, 0, 0,
    b'S', 0, 0, 0,
    b'C', 0, 0, 0,
    0, 0, 0, 1,
    b'F', 4, 72, 0,
    b'O', 0, 0, 0,
    b'R', 0, 0, 0,
    0, 0, 0, 1,
    b'C', 33, 40, 0,
    b'L', 7, 18, 0,
    b'A', 0, 0, 0,
    b'S', 0, 0, 0,
    b'S', 0, 0, 0,
    b'I', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 1,
    b'I', 4, 0, 0,
    b'T', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 1,
    b'H', 0, 0, 0,
    b'E', 0, 0, 0,
    b'C', 0, 0, 0,
    b'K', 0, 0, 0,
    b'E', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 2,
    b'O', 0, 0, 0,
    b'M', 6, 0, 0,
    b'P', 0, 0, 0,
    b'A', 0, 0, 0,
    b'C', 0, 0, 0,
    b'T', 0, 0, 0,
    0, 0, 0, 2,
    b'D', 0, 0, 0,
    b'E', 0, 0, 0,
    b'B', 0, 0, 0,
    b'A', 0, 0, 0,
    b'S', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 1,
    b'A', 0, 0, 0,
    b'C', 0, 0, 0,
    b'T', 0, 0, 0,
    b'I', 0, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    0, 0, 0, 1,
    b'D', 0, 0, 0,
    b'E', 11, 19, 0,
    b'F', 4, 0, 0,
    b'E', 0, 0, 0,
    b'R', 0, 0, 0,
    0, 0, 0, 2,
    b'C', 0, 0, 0,
    b'L', 0, 0, 0,
    b'A', 0, 0, 0,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 2,
    b'A', 0, 0, 0,
    b'T', 0, 0, 0,
    b'A', 0, 0, 0,
    b'S', 4, 0, 0,
    b'R', 0, 0, 0,
    b'C', 0, 0, 0,
    0, 0, 0, 1,
    0, 0, 0, 1,
    b'I', 0, 0, 0,
    b'S', 0, 0, 0,
    b'A', 0, 0, 0,
    b'B', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 2,
    b'I', 6, 0, 0,
    b'S', 0, 0, 0,
    b'M', 0, 0, 0,
    b'A', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 2,
    b'H', 0, 0, 0,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    b'F', 0, 0, 0,
    0, 0, 0, 1,
    b'R', 9, 55, 0,
    b'E', 0, 0, 0,
    b'A', 0, 0, 0,
    b'D', 0, 0, 0,
    b'O', 0, 0, 0,
    b'N', 0, 0, 0,
    b'L', 0, 0, 0,
    b'Y', 0, 0, 0,
    0, 0, 0, 2,
    b'N', 29, 38, 0,
    b'O', 24, 0, 0,
    b'S', 6, 18, 0,
    b'H', 0, 0, 0,
    b'A', 0, 0, 0,
    b'D', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 2,
    b'R', 7, 0, 0,
    b'E', 0, 0, 0,
    b'S', 0, 0, 0,
    b'I', 0, 0, 0,
    b'Z', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 2,
    b'H', 0, 0, 0,
    b'R', 0, 0, 0,
    b'E', 0, 0, 0,
    b'F', 0, 0, 0,
    0, 0, 0, 2,
    b'W', 0, 0, 0,
    b'R', 0, 0, 0,
    b'A', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 2,
    b'A', 0, 0, 0,
    b'M', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 4,
    b'M', 0, 0, 0,
    b'U', 0, 0, 0,
    b'L', 0, 0, 0,
    b'T', 0, 0, 0,
    b'I', 0, 0, 0,
    b'P', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 2,
    b'P', 0, 0, 0,
    b'R', 0, 0, 0,
    b'O', 0, 0, 0,
    b'F', 0, 0, 0,
    b'I', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    0, 0, 0, 1,
    b'U', 7, 0, 0,
    b'S', 0, 0, 0,
    b'E', 0, 0, 0,
    b'M', 0, 0, 0,
    b'A', 0, 0, 0,
    b'P', 0, 0, 0,
    0, 0, 0, 1,
    b'S', 0, 0, 0,
    b'R', 3, 0, 0,
    b'C', 0, 0, 0,
    0, 0, 0, 1,
    b'E', 0, 0, 0,
    b'L', 0, 0, 0,
    b'E', 0, 0, 0,
    b'C', 0, 0, 0,
    b'T', 0, 0, 0,
    b'E', 0, 0, 0,
    b'D', 0, 0, 0,
    0, 0, 0, 2,
];
