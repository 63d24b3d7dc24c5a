//! The Base256 mode for raw byte runs.
use super::encodation_type::Mode;
use super::EncodingContext;
use crate::EncodingError;

/// The position based randomisation defined in the standard.
///
/// `pos` is the codeword's 0-based index in the full output stream.
fn randomize(ch: u8, pos: usize) -> u8 {
    let pseudo_random = (149 * pos) % 254 + 1;
    ((ch as usize + pseudo_random) % 256) as u8
}

fn push_randomized<T: EncodingContext>(ctx: &mut T, ch: u8) {
    let pos = ctx.codewords().len();
    ctx.push(randomize(ch, pos));
}

pub(super) fn encode<T: EncodingContext>(ctx: &mut T) -> Result<(), EncodingError> {
    let mut run = Vec::new();
    while let Some(ch) = ctx.eat() {
        run.push(ch);
        if !ctx.has_more_characters() {
            ctx.set_mode(Mode::Ascii);
            break;
        }
        if ctx.look_ahead() != Mode::Base256 {
            break;
        }
    }
    let len = run.len();
    if len <= 254 {
        push_randomized(ctx, len as u8);
    } else {
        if len / 250 > 6 {
            return Err(EncodingError::OutOfSpace);
        }
        push_randomized(ctx, (len / 250 + 249) as u8);
        push_randomized(ctx, (len % 250) as u8);
    }
    for ch in run {
        push_randomized(ctx, ch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn randomisation_round_trips() {
        for pos in 0..2000 {
            for ch in [0u8, 1, 127, 128, 200, 255] {
                let out = randomize(ch, pos);
                let pseudo_random = (149 * pos) % 254 + 1;
                let back = (out as usize + 256 - pseudo_random % 256) % 256;
                assert_eq!(back as u8, ch);
            }
        }
    }

    #[test]
    fn known_positions() {
        // the values behind the latch of an all-binary nine byte message
        assert_eq!(randomize(9, 1), 159);
        assert_eq!(randomize(130, 2), 175);
        assert_eq!(randomize(140, 3), 78);
    }
}
