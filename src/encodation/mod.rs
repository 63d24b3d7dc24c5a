//! High-level data encodation over the six ECC200 modes.
use crate::symbol_size::{symbol_for, CodeForm, SymbolInfo};
use crate::{CodeType, EncodingError};

mod ascii;
mod base256;
mod c40;
mod edifact;
mod encodation_type;
mod look_ahead;
mod text;
mod x12;

#[cfg(test)]
mod tests;

pub(crate) use encodation_type::Mode;

pub(crate) const UNLATCH: u8 = 254;

const FNC1: u8 = 232;
const READER_PROGRAMMING: u8 = 234;
const MACRO05: u8 = 236;
const MACRO06: u8 = 237;
const MACRO05_HEAD: &[u8] = b"[)>\x1E05\x1D";
const MACRO06_HEAD: &[u8] = b"[)>\x1E06\x1D";
const MACRO_TRAIL: &[u8] = b"\x1E\x04";

/// Largest data codeword count of any symbol; output beyond it can
/// never fit and the encoder bails out early.
const MAX_DATA_CODEWORDS: usize = 1558;

/// What the mode packers need from the encoder.
///
/// The packers are generic over this so tests can drive them with a
/// scripted context.
trait EncodingContext {
    fn eat(&mut self) -> Option<u8>;

    /// Return the last `steps` consumed bytes to the input head.
    fn backup(&mut self, steps: usize);

    fn rest(&self) -> &[u8];

    fn push(&mut self, codeword: u8);

    fn codewords(&self) -> &[u8];

    fn mode(&self) -> Mode;

    fn set_mode(&mut self, mode: Mode);

    /// Run the look-ahead from the current position.
    fn look_ahead(&self) -> Mode;

    /// Space left in the smallest symbol that holds the codewords
    /// written so far plus `extra_codewords`.
    fn symbol_size_left(&self, extra_codewords: usize) -> Option<usize>;

    fn has_more_characters(&self) -> bool {
        !self.rest().is_empty()
    }
}

pub(crate) struct Encoder<'a> {
    data: &'a [u8],
    input: &'a [u8],
    mode: Mode,
    form: CodeForm,
    codewords: Vec<u8>,
}

impl EncodingContext for Encoder<'_> {
    fn eat(&mut self) -> Option<u8> {
        let (ch, rest) = self.data.split_first()?;
        self.data = rest;
        Some(*ch)
    }

    fn backup(&mut self, steps: usize) {
        let offset = (self.input.len() - self.data.len()) - steps;
        self.data = &self.input[offset..];
    }

    fn rest(&self) -> &[u8] {
        self.data
    }

    fn push(&mut self, codeword: u8) {
        self.codewords.push(codeword);
    }

    fn codewords(&self) -> &[u8] {
        &self.codewords
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn look_ahead(&self) -> Mode {
        look_ahead::look_ahead(self.mode, self.data)
    }

    fn symbol_size_left(&self, extra_codewords: usize) -> Option<usize> {
        let size_used = self.codewords.len() + extra_codewords;
        let symbol = symbol_for(size_used, self.form)?;
        Some(symbol.num_data_codewords - size_used)
    }
}

impl<'a> Encoder<'a> {
    pub fn new(data: &'a [u8], form: CodeForm) -> Self {
        Self {
            data,
            input: data,
            mode: Mode::Ascii,
            form,
            codewords: Vec::new(),
        }
    }

    /// Run the full encodation: preamble, selector and packer loop,
    /// terminal unlatch and padding.
    pub fn codewords(
        mut self,
        code_type: CodeType,
    ) -> Result<(Vec<u8>, &'static SymbolInfo), EncodingError> {
        self.apply_code_type(code_type);

        while self.has_more_characters() {
            if self.codewords.len() > MAX_DATA_CODEWORDS {
                return Err(EncodingError::OutOfSpace);
            }
            let next = self.look_ahead();
            if next != self.mode {
                if self.mode.requires_unlatch() {
                    self.push(UNLATCH);
                    self.mode = Mode::Ascii;
                }
                if next != Mode::Ascii {
                    self.push(next.latch_from_ascii());
                }
                self.mode = next;
            }
            let mode = self.mode;
            mode.encode(&mut self)?;
        }

        let symbol =
            symbol_for(self.codewords.len(), self.form).ok_or(EncodingError::OutOfSpace)?;
        self.add_padding(symbol);
        Ok((self.codewords, symbol))
    }

    fn apply_code_type(&mut self, code_type: CodeType) {
        match code_type {
            CodeType::Default => {}
            CodeType::Gs1 => {
                self.codewords.push(FNC1);
                if self.data.first() == Some(&FNC1) {
                    self.data = &self.data[1..];
                    self.input = self.data;
                }
            }
            CodeType::ReaderProgramming => self.codewords.push(READER_PROGRAMMING),
            CodeType::Format05 => {
                self.codewords.push(MACRO05);
                self.strip_macro(MACRO05_HEAD);
            }
            CodeType::Format06 => {
                self.codewords.push(MACRO06);
                self.strip_macro(MACRO06_HEAD);
            }
        }
    }

    // Drop the macro header and trailer; both anchors must be present.
    fn strip_macro(&mut self, head: &[u8]) {
        if self.data.len() >= head.len() + MACRO_TRAIL.len()
            && self.data.starts_with(head)
            && self.data.ends_with(MACRO_TRAIL)
        {
            self.data = &self.data[head.len()..self.data.len() - MACRO_TRAIL.len()];
            self.input = self.data;
        }
    }

    fn add_padding(&mut self, symbol: &SymbolInfo) {
        let mut size_left = symbol.num_data_codewords - self.codewords.len();
        if size_left == 0 {
            return;
        }
        if self.mode.requires_unlatch() {
            self.mode = Mode::Ascii;
            self.push(UNLATCH);
            size_left -= 1;
        }
        if size_left > 0 {
            self.push(ascii::PAD);
            size_left -= 1;
        }
        for _ in 0..size_left {
            // the "randomize 253 state" pad
            let pos = self.codewords.len() + 1;
            let pseudo_random = (149 * pos) % 253 + 1;
            let tmp = ascii::PAD as usize + pseudo_random;
            if tmp <= 254 {
                self.push(tmp as u8);
            } else {
                self.push((tmp - 254) as u8);
            }
        }
    }
}
