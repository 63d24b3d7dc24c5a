//! The X12 mode: the ternary packing over the ANSI X12 alphabet.
use super::encodation_type::Mode;
use super::{c40, EncodingContext, UNLATCH};
use crate::EncodingError;

pub(super) fn is_native(ch: u8) -> bool {
    matches!(ch, 13 | 42 | 62 | 32 | b'0'..=b'9' | b'A'..=b'Z')
}

/// The segment terminator and the two separators.
pub(super) fn is_special(ch: u8) -> bool {
    matches!(ch, 13 | 42 | 62)
}

fn val(ch: u8) -> u8 {
    match ch {
        13 => 0,
        42 => 1,
        62 => 2,
        b' ' => 3,
        ch @ b'0'..=b'9' => ch - b'0' + 4,
        ch @ b'A'..=b'Z' => ch - b'A' + 14,
        _ => unreachable!("caller checks the triple is native"),
    }
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    loop {
        let rest = ctx.rest();
        if rest.len() < 3 || !rest[..3].iter().all(|&ch| is_native(ch)) {
            break;
        }
        let triple = [rest[0], rest[1], rest[2]];
        for _ in 0..3 {
            ctx.eat();
        }
        c40::write_three_values(ctx, val(triple[0]), val(triple[1]), val(triple[2]));
        if ctx.has_more_characters() && ctx.look_ahead() != Mode::X12 {
            // the driver writes the unlatch for the switch
            return Ok(());
        }
    }
    if ctx.has_more_characters() {
        // fewer than three codable bytes: back to ASCII without
        // consuming them
        ctx.push(UNLATCH);
        ctx.set_mode(Mode::Ascii);
    }
    Ok(())
}
