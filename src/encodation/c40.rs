//! The C40 mode, and the ternary packing it shares with Text.
//!
//! Characters map to one to four shift values in 0..=39; every three
//! values pack into two codewords as `1600 v1 + 40 v2 + v3 + 1`. The
//! packer buffers whole characters so the end-of-data rules can return
//! characters to the input when the last group would be left with a
//! single value.
use arrayvec::ArrayVec;

use super::encodation_type::Mode;
use super::{EncodingContext, UNLATCH};
use crate::EncodingError;

pub(super) const SHIFT1: u8 = 0;
const SHIFT2: u8 = 1;
const SHIFT3: u8 = 2;
const UPPER_SHIFT: u8 = 30;

/// One input byte together with its shift values.
pub(super) struct EncodedChar {
    vals: ArrayVec<u8, 4>,
}

pub(super) fn is_native(ch: u8) -> bool {
    matches!(ch, b' ' | b'0'..=b'9' | b'A'..=b'Z')
}

pub(super) fn low_ascii_vals(vals: &mut ArrayVec<u8, 4>, ch: u8) {
    match ch {
        // basic set
        b' ' => vals.push(3),
        ch @ b'0'..=b'9' => vals.push(ch - b'0' + 4),
        ch @ b'A'..=b'Z' => vals.push(ch - b'A' + 14),
        // shift 1 set
        ch @ 0..=31 => {
            vals.push(SHIFT1);
            vals.push(ch);
        }
        // shift 2 set
        ch @ 33..=47 => {
            vals.push(SHIFT2);
            vals.push(ch - 33);
        }
        ch @ 58..=64 => {
            vals.push(SHIFT2);
            vals.push(ch - 58 + 15);
        }
        ch @ 91..=95 => {
            vals.push(SHIFT2);
            vals.push(ch - 91 + 22);
        }
        // shift 3 set
        ch @ 96..=127 => {
            vals.push(SHIFT3);
            vals.push(ch - 96);
        }
        _ => unreachable!("extended ascii is handled a level up"),
    }
}

fn encode_char<F>(to_vals: &F, ch: u8) -> EncodedChar
where
    F: Fn(&mut ArrayVec<u8, 4>, u8),
{
    let mut vals = ArrayVec::new();
    match ch {
        0..=127 => to_vals(&mut vals, ch),
        _ => {
            vals.push(SHIFT2);
            vals.push(UPPER_SHIFT);
            to_vals(&mut vals, ch - 128);
        }
    }
    EncodedChar { vals }
}

/// Pack three shift values into two codewords.
pub(super) fn write_three_values<T: EncodingContext>(ctx: &mut T, v1: u8, v2: u8, v3: u8) {
    let enc = 1600 * v1 as u16 + 40 * v2 as u16 + v3 as u16 + 1;
    ctx.push((enc >> 8) as u8);
    ctx.push((enc & 0xFF) as u8);
}

pub(super) fn encode_generic<T, F>(ctx: &mut T, to_vals: F) -> Result<(), EncodingError>
where
    T: EncodingContext,
    F: Fn(&mut ArrayVec<u8, 4>, u8),
{
    let mode = ctx.mode();
    let mut chars: Vec<EncodedChar> = Vec::new();
    let mut n_vals = 0;
    while let Some(ch) = ctx.eat() {
        let encoded = encode_char(&to_vals, ch);
        n_vals += encoded.vals.len();
        chars.push(encoded);
        // on a full group the selector may call the mode off
        if n_vals % 3 == 0 && ctx.has_more_characters() && ctx.look_ahead() != mode {
            flush_groups(ctx, &chars);
            return Ok(());
        }
    }
    handle_end(ctx, chars, n_vals)
}

fn flush_groups<T: EncodingContext>(ctx: &mut T, chars: &[EncodedChar]) {
    let vals: Vec<u8> = chars.iter().flat_map(|c| c.vals.iter().copied()).collect();
    debug_assert_eq!(vals.len() % 3, 0);
    for group in vals.chunks_exact(3) {
        write_three_values(ctx, group[0], group[1], group[2]);
    }
}

fn handle_end<T: EncodingContext>(
    ctx: &mut T,
    mut chars: Vec<EncodedChar>,
    mut n_vals: usize,
) -> Result<(), EncodingError> {
    let pending = (n_vals / 3) * 2 + [0, 1, 2][n_vals % 3];
    let space_left = ctx
        .symbol_size_left(pending)
        .ok_or(EncodingError::OutOfSpace)?;
    let mut forced_ascii = false;
    if space_left > 0 {
        // a group must not end up with a single value; give characters
        // back to the input until it no longer would
        while n_vals % 3 == 1 {
            let Some(ch) = chars.pop() else { break };
            n_vals -= ch.vals.len();
            ctx.backup(1);
            forced_ascii = true;
        }
    }
    let mut vals: Vec<u8> = chars.iter().flat_map(|c| c.vals.iter().copied()).collect();
    if n_vals % 3 == 2 {
        // dummy shift completing the last group
        vals.push(SHIFT1);
    }
    for group in vals.chunks(3) {
        match *group {
            [v1, v2, v3] => write_three_values(ctx, v1, v2, v3),
            [v1] => {
                // a lone value in the very last codeword slot of the
                // symbol; its upper half alone is decodable and the
                // symbol boundary acts as the unlatch
                let enc = 1600 * v1 as u16 + 1;
                ctx.push((enc >> 8) as u8);
                ctx.set_mode(Mode::Ascii);
            }
            _ => unreachable!("groups of three with at most one remainder"),
        }
    }
    if forced_ascii {
        ctx.push(UNLATCH);
        ctx.set_mode(Mode::Ascii);
    }
    Ok(())
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    encode_generic(ctx, low_ascii_vals)
}

#[cfg(test)]
pub(super) fn vals(data: &[u8]) -> Vec<u8> {
    data.iter()
        .flat_map(|&ch| encode_char(&low_ascii_vals, ch).vals)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn enc_basic_set() {
        let vals = vals(b" 0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        let out: Vec<u8> = (3..=39).collect();
        assert_eq!(vals, out);
    }

    #[test]
    fn enc_shift1_set() {
        let input: Vec<u8> = (0..=31).collect();
        let got = vals(&input);
        let expected: Vec<u8> = input.iter().flat_map(|&ch| [SHIFT1, ch]).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn enc_shift2_set() {
        let got = vals(b"!\"#$%&'()*+,-./:;<=>?@[\\]^_");
        let expected: Vec<u8> = (0..=26).flat_map(|v| [SHIFT2, v]).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn enc_shift3_set() {
        let input: Vec<u8> = (96..=127).collect();
        let got = vals(&input);
        let expected: Vec<u8> = (0..=31).flat_map(|v| [SHIFT3, v]).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn enc_upper_shift() {
        let got = vals(b"\x80\xFF\xA0");
        assert_eq!(
            got,
            vec![1, 30, 0, 0, 1, 30, 2, 31, 1, 30, 3],
        );
    }
}
