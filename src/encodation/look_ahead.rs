//! The look-ahead mode selection.
//!
//! Encoding keeps one cost accumulator per mode and scans the upcoming
//! input until one mode is clearly the cheapest. Costs are fractions of
//! codewords (C40 packs a native character into 2/3 of a codeword, and
//! so on), so they are tracked in fixed point.
use std::fmt::{Debug, Error, Formatter};

use super::encodation_type::Mode;
use super::{c40, edifact, text, x12};

type C = u32;

const DENUM: C = 12;

/// Fraction with fixed denominator 12, which covers the halves, thirds
/// and quarters of the cost table.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Frac(C);

impl Debug for Frac {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        f.write_fmt(format_args!("{}", self.0 as f32 / DENUM as f32))
    }
}

impl Frac {
    #[inline]
    fn new(num: C, denum: C) -> Self {
        let mut me = Self(0);
        me.add_mut(num, denum);
        me
    }

    #[inline]
    fn add_mut(&mut self, num: C, denum: C) -> &mut Self {
        debug_assert!(denum > 0 && DENUM % denum == 0);
        self.0 += num * (DENUM / denum);
        self
    }

    #[inline]
    fn ceil(&mut self) -> &mut Self {
        let rest = self.0 % DENUM;
        if rest != 0 {
            self.0 += DENUM - rest;
        }
        self
    }
}

#[derive(Debug, Clone)]
struct Stat {
    ascii: Frac,
    c40: Frac,
    text: Frac,
    x12: Frac,
    edf: Frac,
    b256: Frac,
}

impl Stat {
    fn new(mode: Mode) -> Self {
        let mut me = if mode == Mode::Ascii {
            Self {
                ascii: Frac::new(0, 1),
                c40: Frac::new(1, 1),
                text: Frac::new(1, 1),
                x12: Frac::new(1, 1),
                edf: Frac::new(1, 1),
                b256: Frac::new(5, 4),
            }
        } else {
            Self {
                ascii: Frac::new(1, 1),
                c40: Frac::new(2, 1),
                text: Frac::new(2, 1),
                x12: Frac::new(2, 1),
                edf: Frac::new(2, 1),
                b256: Frac::new(9, 4),
            }
        };
        match mode {
            Mode::Ascii => (),
            Mode::C40 => me.c40 = Frac::new(0, 1),
            Mode::Text => me.text = Frac::new(0, 1),
            Mode::X12 => me.x12 = Frac::new(0, 1),
            Mode::Edifact => me.edf = Frac::new(0, 1),
            Mode::Base256 => me.b256 = Frac::new(0, 1),
        }
        me
    }

    fn count(&mut self, ch: u8) {
        if ch.is_ascii_digit() {
            self.ascii.add_mut(1, 2);
        } else if ch > 127 {
            self.ascii.ceil().add_mut(2, 1);
        } else {
            self.ascii.ceil().add_mut(1, 1);
        }

        if c40::is_native(ch) {
            self.c40.add_mut(2, 3);
        } else if ch > 127 {
            self.c40.add_mut(8, 3);
        } else {
            self.c40.add_mut(4, 3);
        }

        if text::is_native(ch) {
            self.text.add_mut(2, 3);
        } else if ch > 127 {
            self.text.add_mut(8, 3);
        } else {
            self.text.add_mut(4, 3);
        }

        if x12::is_native(ch) {
            self.x12.add_mut(2, 3);
        } else if ch > 127 {
            self.x12.add_mut(13, 3);
        } else {
            self.x12.add_mut(10, 3);
        }

        if edifact::is_native(ch) {
            self.edf.add_mut(3, 4);
        } else if ch > 127 {
            self.edf.add_mut(17, 4);
        } else {
            self.edf.add_mut(13, 4);
        }

        self.b256.add_mut(1, 1);
    }

    fn round_up(&mut self) {
        self.ascii.ceil();
        self.c40.ceil();
        self.text.ceil();
        self.x12.ceil();
        self.edf.ceil();
        self.b256.ceil();
    }

    /// The mid-scan decision ladder. `None` keeps scanning.
    ///
    /// Every test except the ASCII one demands a winning margin of a
    /// full codeword; `upcoming` feeds the C40/X12 tie break.
    fn decide(&self, upcoming: &[u8]) -> Option<Mode> {
        let (a, c, t, x, e, b) = (
            self.ascii.0,
            self.c40.0,
            self.text.0,
            self.x12.0,
            self.edf.0,
            self.b256.0,
        );
        if a < c && a < t && a < x && a < e && a < b {
            return Some(Mode::Ascii);
        }
        if b < a || (b + DENUM < c && b + DENUM < t && b + DENUM < x && b + DENUM < e) {
            return Some(Mode::Base256);
        }
        if e + DENUM < a && e + DENUM < c && e + DENUM < t && e + DENUM < x && e + DENUM < b {
            return Some(Mode::Edifact);
        }
        if t + DENUM < a && t + DENUM < c && t + DENUM < x && t + DENUM < e && t + DENUM < b {
            return Some(Mode::Text);
        }
        if x + DENUM < a && x + DENUM < c && x + DENUM < t && x + DENUM < e && x + DENUM < b {
            return Some(Mode::X12);
        }
        if c + DENUM < a && c + DENUM < t && c + DENUM < e && c + DENUM < b {
            if c < x {
                return Some(Mode::C40);
            }
            if c == x {
                return Some(if x12_advantage(upcoming) {
                    Mode::X12
                } else {
                    Mode::C40
                });
            }
        }
        None
    }

    /// Pick at the end of the input: the rounded minimum, ties resolved
    /// in favor of ASCII, then Base256, EDIFACT, Text, X12, C40.
    fn final_pick(&self) -> Mode {
        let min = self
            .ascii
            .min(self.c40)
            .min(self.text)
            .min(self.x12)
            .min(self.edf)
            .min(self.b256);
        if self.ascii == min {
            Mode::Ascii
        } else if self.b256 == min {
            Mode::Base256
        } else if self.edf == min {
            Mode::Edifact
        } else if self.text == min {
            Mode::Text
        } else if self.x12 == min {
            Mode::X12
        } else {
            Mode::C40
        }
    }
}

/// Does an X12 terminator/separator come up before the first byte the
/// mode can not encode? Then X12 beats C40 on equal cost.
fn x12_advantage(data: &[u8]) -> bool {
    for &ch in data {
        if x12::is_special(ch) {
            return true;
        }
        if !x12::is_native(ch) {
            return false;
        }
    }
    false
}

/// Choose the mode for the next stretch of `data`, `mode` being active.
pub(super) fn look_ahead(mode: Mode, data: &[u8]) -> Mode {
    let decided = cheapest_mode(mode, data);
    // A latch into X12 or EDIFACT only pays off when the characters the
    // packer will consume next are native ones; otherwise the cost the
    // scan amortized over a long window is not realizable yet.
    match decided {
        Mode::X12 if data.iter().take(3).any(|&ch| !x12::is_native(ch)) => Mode::Ascii,
        Mode::Edifact if data.iter().take(4).any(|&ch| !edifact::is_native(ch)) => Mode::Ascii,
        decided => decided,
    }
}

fn cheapest_mode(mode: Mode, mut data: &[u8]) -> Mode {
    let mut stat = Stat::new(mode);
    let mut processed = 0;
    while let Some((&ch, rest)) = data.split_first() {
        data = rest;
        stat.count(ch);
        processed += 1;
        if processed >= 4 {
            let mut rounded = stat.clone();
            rounded.round_up();
            if let Some(winner) = rounded.decide(data) {
                return winner;
            }
        }
    }
    stat.round_up();
    stat.final_pick()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frac_init() {
        assert_eq!(Frac::new(0, 1).0, 0);
        assert_eq!(Frac::new(1, 2).0, 6);
        assert_eq!(Frac::new(1, 1).0, 12);
    }

    #[test]
    fn frac_add_mut() {
        assert_eq!(Frac::new(1, 2).add_mut(3, 4).0, 15);
    }

    #[test]
    fn frac_ceil() {
        assert_eq!(Frac::new(1, 2).ceil().0, 12);
        assert_eq!(Frac::new(1, 1).ceil().0, 12);
        assert_eq!(Frac::new(0, 1).ceil().0, 0);
        assert_eq!(Frac::new(12, 1).ceil().0, 12 * 12);
    }

    #[test]
    fn digits_stay_ascii() {
        assert_eq!(look_ahead(Mode::Ascii, b"0011223344"), Mode::Ascii);
    }

    #[test]
    fn lowercase_run_picks_text() {
        assert_eq!(look_ahead(Mode::Ascii, b"wiftdatamatrixtail"), Mode::Text);
    }

    #[test]
    fn uppercase_run_picks_c40() {
        assert_eq!(look_ahead(Mode::Ascii, b"ABCDEFGHIJKLMNOP"), Mode::C40);
    }

    #[test]
    fn x12_wins_for_separator_heavy_input() {
        assert_eq!(look_ahead(Mode::Ascii, b"***X12 SHOULD BE USED*"), Mode::X12);
    }

    #[test]
    fn binary_picks_base256() {
        assert_eq!(
            look_ahead(Mode::Ascii, &[130, 140, 150, 170, 180]),
            Mode::Base256
        );
    }

    #[test]
    fn short_tail_prefers_ascii() {
        assert_eq!(look_ahead(Mode::Ascii, b"VW"), Mode::Ascii);
        assert_eq!(look_ahead(Mode::Ascii, b"x"), Mode::Ascii);
    }

    #[test]
    fn short_native_tail_keeps_text() {
        assert_eq!(look_ahead(Mode::Text, b"t"), Mode::Text);
    }

    #[test]
    fn x12_continuation_needs_native_bytes() {
        assert_eq!(look_ahead(Mode::X12, b"ABCDEF"), Mode::X12);
        assert_eq!(look_ahead(Mode::X12, b"AbCDEFGH"), Mode::Ascii);
    }

    #[test]
    fn edifact_switches_away_on_extended() {
        assert_eq!(
            look_ahead(Mode::Edifact, b".\xFCXX.XXX.XXX.XXX.XXX.XXX.XXX"),
            Mode::Ascii,
        );
        assert_eq!(
            look_ahead(Mode::Ascii, b".\xFCXX.XXX.XXX.XXX.XXX.XXX.XXX"),
            Mode::Ascii,
        );
    }
}
