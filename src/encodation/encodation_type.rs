use super::{ascii, base256, c40, edifact, text, x12, EncodingContext};
use crate::EncodingError;

/// The six ECC200 data encodation modes.
///
/// A symbol can switch between them mid-stream; each one has its own
/// packing arithmetic. ASCII is the initial and terminal mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Mode {
    Ascii,
    C40,
    Text,
    X12,
    Edifact,
    Base256,
}

impl Mode {
    pub(super) fn encode<T: EncodingContext>(self, ctx: &mut T) -> Result<(), EncodingError> {
        match self {
            Self::Ascii => ascii::encode(ctx),
            Self::C40 => c40::encode(ctx),
            Self::Text => text::encode(ctx),
            Self::X12 => x12::encode(ctx),
            Self::Edifact => edifact::encode(ctx),
            Self::Base256 => base256::encode(ctx),
        }
    }

    /// The LATCH codeword switching to this mode from ASCII.
    pub(super) fn latch_from_ascii(self) -> u8 {
        match self {
            Self::Ascii => unreachable!("ascii needs no latch"),
            Self::C40 => ascii::LATCH_C40,
            Self::Text => ascii::LATCH_TEXT,
            Self::X12 => ascii::LATCH_X12,
            Self::Edifact => ascii::LATCH_EDIFACT,
            Self::Base256 => ascii::LATCH_BASE256,
        }
    }

    /// Does leaving this mode take an explicit 254 codeword?
    ///
    /// EDIFACT unlatches with its in-band 0x1F value and Base256 is
    /// delimited by its length header.
    pub(super) fn requires_unlatch(self) -> bool {
        matches!(self, Self::C40 | Self::Text | Self::X12)
    }
}
