//! Reed-Solomon error correction for ECC200.
//!
//! Every Data Matrix symbol carries Reed-Solomon check codewords computed
//! over GF(256). For the bigger symbol sizes the data codewords are first
//! split into interleaved blocks; each block gets its own check polynomial
//! and the check blocks are stored interleaved again.
mod galois;

use std::sync::OnceLock;

use crate::symbol_size::SymbolInfo;
use crate::EncodingError;
use galois::GF;

#[cfg(test)]
use pretty_assertions::assert_eq;

/// Every check-codeword count appearing in the symbol table.
const SUPPORTED_ECC_LENGTHS: [usize; 16] =
    [5, 7, 10, 11, 12, 14, 18, 20, 24, 28, 36, 42, 48, 56, 62, 68];

/// Generator polynomial `g(x) = (x - a^1)(x - a^2)...(x - a^k)` with a = 2.
///
/// Coefficients are returned highest order first, with the leading 1.
fn generator_polynomial(k: usize) -> Vec<u8> {
    let mut g = vec![GF(1)];
    for i in 1..=k {
        let root = GF::primitive_power(i as u8);
        let mut next = Vec::with_capacity(g.len() + 1);
        next.push(GF(1));
        for j in 1..g.len() {
            next.push(g[j] + g[j - 1] * root);
        }
        next.push(g[g.len() - 1] * root);
        g = next;
    }
    g.into_iter().map(u8::from).collect()
}

fn generator(len: usize) -> Result<&'static [u8], EncodingError> {
    static GENERATORS: OnceLock<Vec<(usize, Vec<u8>)>> = OnceLock::new();
    let table = GENERATORS.get_or_init(|| {
        SUPPORTED_ECC_LENGTHS
            .iter()
            .map(|&k| (k, generator_polynomial(k)))
            .collect()
    });
    table
        .iter()
        .find(|(k, _)| *k == len)
        .map(|(_, g)| g.as_slice())
        .ok_or(EncodingError::InvalidBlockSize)
}

/// Compute the check codewords for a full symbol.
///
/// `data` must contain exactly the symbol's data codewords. The returned
/// vector holds `numberOfBlocks * reedSolomonPerBlock` codewords, block
/// interleaved the way the placement expects them.
pub(crate) fn encode_error(data: &[u8], symbol: &SymbolInfo) -> Result<Vec<u8>, EncodingError> {
    debug_assert_eq!(data.len(), symbol.num_data_codewords);
    let gen = generator(symbol.ecc_per_block)?;
    let stride = symbol.num_blocks;
    let mut ecc = vec![0; symbol.ecc_per_block + 1];
    let mut full_ecc = vec![0; symbol.ecc_per_block * stride];
    for block in 0..stride {
        for item in &mut ecc {
            *item = 0;
        }
        let strided_input = (block..data.len()).step_by(stride).map(|i| data[i]);
        ecc_block(strided_input, gen, &mut ecc);

        for (result, ecc_i) in full_ecc
            .iter_mut()
            .skip(block)
            .step_by(stride)
            .zip(&ecc[..symbol.ecc_per_block])
        {
            *result = *ecc_i;
        }
    }
    Ok(full_ecc)
}

fn ecc_block<T: Iterator<Item = u8>>(data: T, g: &[u8], ecc: &mut [u8]) {
    // Polynomial division of data(x) * x^k by g, keeping only the
    // remainder. The quotient is never materialized; ecc holds the
    // running remainder with one scratch slot at the end.
    let ecc_len = g.len() - 1;
    for a in data {
        let k = GF(ecc[0]) + GF(a);
        for j in 0..ecc_len {
            ecc[j] = (GF(ecc[j + 1]) + k * GF(g[j + 1])).into();
        }
    }
}

#[test]
fn generator_polynomial_k5() {
    // Coefficients as listed in the standard.
    assert_eq!(generator_polynomial(5), vec![1, 62, 111, 15, 48, 228]);
}

#[test]
fn generator_polynomial_k7() {
    assert_eq!(
        generator_polynomial(7),
        vec![1, 254, 92, 240, 134, 144, 68, 23]
    );
}

#[test]
fn generator_polynomial_k10() {
    assert_eq!(
        generator_polynomial(10),
        vec![1, 61, 110, 255, 116, 248, 223, 166, 185, 24, 28]
    );
}

#[test]
fn generator_lookup_miss() {
    assert_eq!(generator(13).unwrap_err(), EncodingError::InvalidBlockSize);
    assert!(generator(68).is_ok());
}

#[test]
fn ecc_block_known_vector() {
    let data = [23, 40, 11];
    let g = generator(5).unwrap();
    let mut ecc = vec![0; 5 + 1];
    ecc_block(data.iter().cloned(), g, &mut ecc);
    assert_eq!(ecc[..5], [255, 207, 37, 244, 81]);
}

#[test]
fn interleaved_blocks_cover_all_positions() {
    use crate::symbol_size::symbol_for;
    use crate::CodeForm;

    // 52x52 is the smallest symbol with two blocks
    let symbol = symbol_for(204, CodeForm::Square).unwrap();
    assert_eq!(symbol.num_blocks, 2);
    let data: Vec<u8> = (0..204u16).map(|i| (i % 251) as u8).collect();
    let ecc = encode_error(&data, symbol).unwrap();
    assert_eq!(ecc.len(), 2 * 42);

    // each block's check codewords must match an independent computation
    for block in 0..2 {
        let gen = generator(42).unwrap();
        let mut single = vec![0; 42 + 1];
        ecc_block(
            (block..data.len()).step_by(2).map(|i| data[i]),
            gen,
            &mut single,
        );
        let interleaved: Vec<u8> = (block..ecc.len()).step_by(2).map(|i| ecc[i]).collect();
        assert_eq!(interleaved, single[..42]);
    }
}
