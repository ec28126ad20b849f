//! Reed-Solomon block split and codeword interleaving

use crate::capability::generator::ec_codewords;
use crate::capability::tables::BlockLayout;

/// Split data codewords into blocks, append EC to each and interleave:
/// data column by column across blocks, then EC column by column.
pub fn add_ec_and_interleave(data: &[u8], layout: &BlockLayout) -> Vec<u8> {
    debug_assert_eq!(data.len(), layout.data_codewords());

    let mut data_blocks = Vec::with_capacity(layout.num_blocks);
    let mut ec_blocks = Vec::with_capacity(layout.num_blocks);
    let mut offset = 0;
    for index in 0..layout.num_blocks {
        let len = layout.data_len(index);
        let block = &data[offset..offset + len];
        ec_blocks.push(ec_codewords(block, layout.ecc_per_block));
        data_blocks.push(block);
        offset += len;
    }

    let mut out = Vec::with_capacity(layout.total_codewords());
    for column in 0..=layout.short_data_len {
        // The last column exists only in long blocks
        out.extend(data_blocks.iter().filter_map(|b| b.get(column)));
    }
    for column in 0..layout.ecc_per_block {
        out.extend(ec_blocks.iter().map(|b| b[column]));
    }
    out
}
