//! ECC200 Data Matrix symbol generation.
//!
//! This crate turns a byte payload into the monochrome bitmap of a
//! finished Data Matrix symbol: the six-mode high level encoding
//! (ASCII, C40, Text, X12, EDIFACT, Base256) with look-ahead mode
//! selection, symbol sizing, Reed-Solomon check codewords, the ECC200
//! module placement, and the finder/clock overlay.
//!
//! ```rust
//! use ecc200::{encode, CodeForm, CodeType};
//!
//! let bitmap = encode(b"Hello, World!", CodeType::default(), CodeForm::default())?;
//! for (x, y) in bitmap.pixels() {
//!     // draw a black square at (x, y)
//! }
//! # Ok::<(), ecc200::EncodingError>(())
//! ```
//!
//! Decoding, image file output and quiet-zone handling are out of
//! scope; [Bitmap] exposes the packed rows for whatever renderer sits
//! on top.
use std::error::Error;
use std::fmt;

mod encodation;
mod errorcode;
mod placement;
mod symbol_size;

pub use placement::Bitmap;
pub use symbol_size::CodeForm;

/// Content marker emitted ahead of the data codewords.
///
/// `Format05`/`Format06` also strip the corresponding macro header and
/// trailer from the payload when both are present.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CodeType {
    #[default]
    Default,
    /// FNC1, for GS1 element strings.
    Gs1,
    ReaderProgramming,
    /// Macro "[)>\x1E05\x1D ... \x1E\x04".
    Format05,
    /// Macro "[)>\x1E06\x1D ... \x1E\x04".
    Format06,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// The payload does not fit the largest symbol of the requested
    /// form, or a Base256 run overflows its length header.
    OutOfSpace,
    /// No generator polynomial exists for the symbol's check-codeword
    /// count. Unreachable for the built-in symbol table.
    InvalidBlockSize,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::OutOfSpace => write!(f, "data does not fit into the requested symbol form"),
            Self::InvalidBlockSize => write!(f, "no generator polynomial for this block size"),
        }
    }
}

impl Error for EncodingError {}

/// Encode `data` into a Data Matrix symbol.
///
/// The returned [Bitmap] contains the complete symbol including finder
/// patterns, without a quiet zone.
pub fn encode(
    data: &[u8],
    code_type: CodeType,
    code_form: CodeForm,
) -> Result<Bitmap, EncodingError> {
    let (mut codewords, symbol) = encodation::Encoder::new(data, code_form).codewords(code_type)?;
    let ecc = errorcode::encode_error(&codewords, symbol)?;
    codewords.extend_from_slice(&ecc);
    let cells = placement::place(&codewords, symbol);
    Ok(placement::rasterize(&cells, symbol))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bitmap_geometry() {
        let bitmap = encode(b"Foo", CodeType::default(), CodeForm::default()).unwrap();
        assert_eq!(bitmap.width(), 10);
        assert_eq!(bitmap.height(), 10);
        assert_eq!(bitmap.bytes_per_row(), 2);
        assert_eq!(bitmap.bytes().len(), bitmap.bytes_per_row() * bitmap.height());
    }

    #[test]
    fn symbol_for_24x24_message() {
        let bitmap = encode(
            b"This DataMatrix code should be 24x24 elements",
            CodeType::default(),
            CodeForm::default(),
        )
        .unwrap();
        assert_eq!(bitmap.width(), 24);
        assert_eq!(bitmap.height(), 24);
        assert_eq!(bitmap.bytes_per_row(), 3);
        // the top clock track alternates starting black
        assert_eq!(&bitmap.bytes()[..3], &[85, 85, 85]);
    }

    #[test]
    fn finder_l_is_solid() {
        let bitmap = encode(b"Hello", CodeType::default(), CodeForm::default()).unwrap();
        for y in 0..bitmap.height() {
            assert!(bitmap.get(0, y));
        }
        for x in 0..bitmap.width() {
            assert!(bitmap.get(x, bitmap.height() - 1));
        }
    }

    #[test]
    fn rectangular_symbol() {
        let bitmap = encode(b"AB", CodeType::default(), CodeForm::Rectangular).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (18, 8));
        assert_eq!(bitmap.bytes_per_row(), 3);
    }

    #[test]
    fn prefer_rectangular_takes_the_wide_size() {
        // nine ASCII codewords skip past 14x14 straight to 8x32
        let bitmap = encode(b"a1B2c3D4e", CodeType::default(), CodeForm::PreferRectangular)
            .unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (32, 8));
    }

    #[test]
    fn unicode_preview_has_border() {
        let bitmap = encode(b"Foo", CodeType::default(), CodeForm::default()).unwrap();
        let art = bitmap.unicode();
        // 10 modules, one border each side, half-block rows
        assert_eq!(art.lines().count(), (10 + 2) / 2);
        assert!(art.lines().all(|line| line.chars().count() == 12));
    }

    #[test]
    fn out_of_space_surfaces() {
        let data = vec![0u8; 4000];
        assert_eq!(
            encode(&data, CodeType::default(), CodeForm::default()).unwrap_err(),
            EncodingError::OutOfSpace
        );
    }
}
