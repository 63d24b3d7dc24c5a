//! The ECC200 symbol sizes and the smallest-fit chooser.

/// Requested shape of the finished symbol.
///
/// `PreferRectangular` considers every size; because the table is ordered
/// by capacity the rectangular sizes win for the payloads they fit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum CodeForm {
    #[default]
    Square,
    Rectangular,
    PreferRectangular,
}

/// One row of the ECC200 symbol table.
///
/// `rows`/`columns` count modules of the whole symbol including finder
/// patterns; `regions_horizontal`/`regions_vertical` how many data regions
/// the symbol is split into along each axis.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SymbolInfo {
    pub rows: usize,
    pub columns: usize,
    pub regions_horizontal: usize,
    pub regions_vertical: usize,
    pub num_blocks: usize,
    pub ecc_per_block: usize,
    pub num_data_codewords: usize,
}

impl SymbolInfo {
    const fn new(
        rows: usize,
        columns: usize,
        regions_horizontal: usize,
        regions_vertical: usize,
        num_blocks: usize,
        ecc_per_block: usize,
        num_data_codewords: usize,
    ) -> Self {
        Self {
            rows,
            columns,
            regions_horizontal,
            regions_vertical,
            num_blocks,
            ecc_per_block,
            num_data_codewords,
        }
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    /// Width of the combined data region, finders removed.
    pub fn data_region_columns(&self) -> usize {
        self.columns - 2 * self.regions_horizontal
    }

    /// Height of the combined data region, finders removed.
    pub fn data_region_rows(&self) -> usize {
        self.rows - 2 * self.regions_vertical
    }

    /// Data plus check codewords.
    pub fn total_codewords(&self) -> usize {
        self.num_data_codewords + self.num_blocks * self.ecc_per_block
    }
}

/// All 30 sizes, ascending by data capacity so a linear scan finds the
/// smallest fit. Rectangular sizes are interleaved where they belong.
#[rustfmt::skip]
static SYMBOLS: [SymbolInfo; 30] = [
    SymbolInfo::new( 10,  10, 1, 1,  1,  5,    3),
    SymbolInfo::new( 12,  12, 1, 1,  1,  7,    5),
    SymbolInfo::new(  8,  18, 1, 1,  1,  7,    5),
    SymbolInfo::new( 14,  14, 1, 1,  1, 10,    8),
    SymbolInfo::new(  8,  32, 2, 1,  1, 11,   10),
    SymbolInfo::new( 16,  16, 1, 1,  1, 12,   12),
    SymbolInfo::new( 12,  26, 1, 1,  1, 14,   16),
    SymbolInfo::new( 18,  18, 1, 1,  1, 14,   18),
    SymbolInfo::new( 20,  20, 1, 1,  1, 18,   22),
    SymbolInfo::new( 12,  36, 2, 1,  1, 18,   22),
    SymbolInfo::new( 22,  22, 1, 1,  1, 20,   30),
    SymbolInfo::new( 16,  36, 2, 1,  1, 24,   32),
    SymbolInfo::new( 24,  24, 1, 1,  1, 24,   36),
    SymbolInfo::new( 26,  26, 1, 1,  1, 28,   44),
    SymbolInfo::new( 16,  48, 2, 1,  1, 28,   49),
    SymbolInfo::new( 32,  32, 2, 2,  1, 36,   62),
    SymbolInfo::new( 36,  36, 2, 2,  1, 42,   86),
    SymbolInfo::new( 40,  40, 2, 2,  1, 48,  114),
    SymbolInfo::new( 44,  44, 2, 2,  1, 56,  144),
    SymbolInfo::new( 48,  48, 2, 2,  1, 68,  174),
    SymbolInfo::new( 52,  52, 2, 2,  2, 42,  204),
    SymbolInfo::new( 64,  64, 4, 4,  2, 56,  280),
    SymbolInfo::new( 72,  72, 4, 4,  4, 36,  368),
    SymbolInfo::new( 80,  80, 4, 4,  4, 48,  456),
    SymbolInfo::new( 88,  88, 4, 4,  4, 56,  576),
    SymbolInfo::new( 96,  96, 4, 4,  4, 68,  696),
    SymbolInfo::new(104, 104, 4, 4,  6, 56,  816),
    SymbolInfo::new(120, 120, 6, 6,  6, 68, 1050),
    SymbolInfo::new(132, 132, 6, 6,  8, 62, 1304),
    SymbolInfo::new(144, 144, 6, 6, 10, 62, 1558),
];

/// Smallest symbol that can hold `size_needed` data codewords under the
/// requested form, or `None` if even 144x144 / 16x48 is too small.
pub(crate) fn symbol_for(size_needed: usize, form: CodeForm) -> Option<&'static SymbolInfo> {
    SYMBOLS
        .iter()
        .filter(|s| match form {
            CodeForm::Square => s.is_square(),
            CodeForm::Rectangular => !s.is_square(),
            CodeForm::PreferRectangular => true,
        })
        .find(|s| s.num_data_codewords >= size_needed)
}
