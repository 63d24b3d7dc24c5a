//! The EDIFACT mode: four 6-bit values in three codewords.
use arrayvec::ArrayVec;

use super::encodation_type::Mode;
use super::{ascii, EncodingContext};
use crate::EncodingError;

/// The in-band "return to ASCII" value.
pub(super) const UNLATCH_VAL: u8 = 0b01_1111;

pub(super) fn is_native(ch: u8) -> bool {
    matches!(ch, 0x20..=0x5E)
}

fn val(ch: u8) -> u8 {
    match ch {
        0x20..=0x3F => ch,
        0x40..=0x5E => ch - 64,
        _ => UNLATCH_VAL,
    }
}

/// Write 1 to 4 six-bit values, packed big endian, trailing bits zero.
fn write4<T: EncodingContext>(ctx: &mut T, s: &ArrayVec<u8, 4>) {
    let s1 = s.get(1).copied().unwrap_or(0) & 0b11_1111;
    ctx.push((s[0] << 2) | (s1 >> 4));

    if s.len() >= 2 {
        let s2 = s.get(2).copied().unwrap_or(0) & 0b11_1111;
        ctx.push((s1 << 4) | (s2 >> 2));

        if s.len() >= 3 {
            let s3 = s.get(3).copied().unwrap_or(0) & 0b11_1111;
            ctx.push((s2 << 6) | s3);
        }
    }
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    let mut vals = ArrayVec::<u8, 4>::new();
    let mut raw = ArrayVec::<u8, 4>::new();
    while let Some(ch) = ctx.eat() {
        vals.push(val(ch));
        raw.push(ch);
        if vals.len() == 4 {
            write4(ctx, &vals);
            vals.clear();
            raw.clear();
            if ctx.has_more_characters() && ctx.look_ahead() != Mode::Edifact {
                let mut unlatch = ArrayVec::new();
                unlatch.push(UNLATCH_VAL);
                write4(ctx, &unlatch);
                ctx.set_mode(Mode::Ascii);
                return Ok(());
            }
        }
    }
    handle_end(ctx, vals, &raw)
}

fn handle_end<T: EncodingContext>(
    ctx: &mut T,
    mut vals: ArrayVec<u8, 4>,
    raw: &ArrayVec<u8, 4>,
) -> Result<(), EncodingError> {
    if vals.is_empty() {
        // end of data on a group boundary; an exactly full symbol ends
        // the mode without an unlatch
        if ctx
            .symbol_size_left(0)
            .ok_or(EncodingError::OutOfSpace)?
            > 0
        {
            let mut unlatch = ArrayVec::new();
            unlatch.push(UNLATCH_VAL);
            write4(ctx, &unlatch);
            ctx.set_mode(Mode::Ascii);
        }
        return Ok(());
    }
    // when the tail encoded as ASCII lands exactly on the symbol
    // boundary the unlatch is omitted and the driver finishes in ASCII
    let ascii_size = ascii::encoding_size(raw);
    if ctx.symbol_size_left(ascii_size) == Some(0) {
        ctx.backup(vals.len());
        ctx.set_mode(Mode::Ascii);
        return Ok(());
    }
    vals.push(UNLATCH_VAL);
    write4(ctx, &vals);
    ctx.set_mode(Mode::Ascii);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::DummyContext;
    use super::*;
    use pretty_assertions::assert_eq;

    fn vals(s: &[u8]) -> ArrayVec<u8, 4> {
        s.iter().copied().collect()
    }

    #[test]
    fn write4_four() {
        let mut ctx = DummyContext::new(vec![], 3);
        write4(&mut ctx, &vals(&[0b10_01_00, 0b11_01_10, 0b011010, 1]));
        assert_eq!(
            ctx.codewords,
            vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_01]
        );
    }

    #[test]
    fn write4_three() {
        let mut ctx = DummyContext::new(vec![], 3);
        write4(&mut ctx, &vals(&[0b10_01_00, 0b11_01_10, 0b011010]));
        assert_eq!(
            ctx.codewords,
            vec![0b10_01_00_11, 0b01_10_01_10, 0b10_00_00_00]
        );
    }

    #[test]
    fn write4_two() {
        let mut ctx = DummyContext::new(vec![], 2);
        write4(&mut ctx, &vals(&[0b10_01_00, 0b11_01_10]));
        assert_eq!(ctx.codewords, vec![0b10_01_00_11, 0b01_10_00_00]);
    }

    #[test]
    fn write4_one() {
        let mut ctx = DummyContext::new(vec![], 1);
        write4(&mut ctx, &vals(&[0b10_01_00]));
        assert_eq!(ctx.codewords, vec![0b10_01_00_00]);
    }

    #[test]
    fn values_are_six_bit() {
        assert_eq!(val(0x20), 0x20);
        assert_eq!(val(0x3F), 0x3F);
        assert_eq!(val(0x40), 0);
        assert_eq!(val(0x5E), 0x1E);
    }
}
