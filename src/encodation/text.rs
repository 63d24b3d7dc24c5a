//! The Text mode: C40 with the letter cases traded.
//!
//! The basic set carries a-z where C40 carries A-Z, and the shift 3 set
//! gets the upper case letters instead. Swapping the case of a byte
//! before the C40 mapping produces exactly that table.
use arrayvec::ArrayVec;

use super::{c40, EncodingContext};
use crate::EncodingError;

pub(super) fn is_native(ch: u8) -> bool {
    matches!(ch, b' ' | b'0'..=b'9' | b'a'..=b'z')
}

fn swap_case(ch: u8) -> u8 {
    match ch {
        ch @ b'A'..=b'Z' => ch - b'A' + b'a',
        ch @ b'a'..=b'z' => ch - b'a' + b'A',
        ch => ch,
    }
}

fn low_ascii_vals(vals: &mut ArrayVec<u8, 4>, ch: u8) {
    c40::low_ascii_vals(vals, swap_case(ch));
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    c40::encode_generic(ctx, low_ascii_vals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lower_case_is_the_basic_set() {
        let mut vals = ArrayVec::new();
        low_ascii_vals(&mut vals, b'a');
        assert_eq!(&vals[..], &[14]);
        vals.clear();
        low_ascii_vals(&mut vals, b'z');
        assert_eq!(&vals[..], &[39]);
    }

    #[test]
    fn upper_case_needs_shift3() {
        let mut vals = ArrayVec::new();
        low_ascii_vals(&mut vals, b'A');
        assert_eq!(&vals[..], &[2, 1]);
        vals.clear();
        low_ascii_vals(&mut vals, b'`');
        assert_eq!(&vals[..], &[2, 0]);
        vals.clear();
        low_ascii_vals(&mut vals, 0x7F);
        assert_eq!(&vals[..], &[2, 31]);
    }
}
