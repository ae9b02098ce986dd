/*++

Licensed under the Apache-2.0 license.

File Name:

    seed.rs

Abstract:

    File contains the SST seed/IV reconstruction used by the legacy cipher
    unit in decrypt mode.

--*/

/// Embedded vendor secret the legacy SST IV is reconstructed from. Only the
/// first four bytes feed the seed; the remainder is carried verbatim from
/// the vendor blob.
const SST_SECRET: [u8; 256] = [
    0x00, 0xbe, 0x13, 0xbb, 0x95, 0xe2, 0x18, 0xb5, 0x3d, 0x07, 0xa0, 0x89,
    0xcb, 0x93, 0x52, 0x55, 0x29, 0x4f, 0x70, 0xd4, 0x08, 0x8f, 0x39, 0x30,
    0x35, 0x0b, 0xc6, 0x36, 0xcc, 0x49, 0xc9, 0x02, 0x5e, 0xce, 0x7a, 0x62,
    0xc2, 0x92, 0x85, 0x3e, 0xf5, 0x5b, 0x23, 0xa6, 0xef, 0x7b, 0x74, 0x64,
    0xc7, 0xf3, 0xf2, 0xa7, 0x4a, 0xe9, 0x19, 0x41, 0x6d, 0x6b, 0x4d, 0x9c,
    0x1d, 0x68, 0x09, 0x65, 0x5d, 0xd8, 0x2d, 0x43, 0xd6, 0x59, 0x99, 0xcf,
    0x04, 0x1a, 0x38, 0x6e, 0x1c, 0x0f, 0x1e, 0x58, 0x84, 0x9d, 0x8e, 0xd0,
    0x9e, 0xf0, 0x7e, 0x6a, 0x9f, 0x0d, 0x7d, 0x3b, 0x8d, 0xad, 0x6c, 0xba,
    0xe4, 0x66, 0x8a, 0x2f, 0xd5, 0x37, 0x76, 0xc3, 0xd2, 0x6f, 0x88, 0xb0,
    0xbf, 0x61, 0x7c, 0x81, 0x12, 0xb8, 0xb1, 0xa8, 0x71, 0xd3, 0x22, 0xd9,
    0x51, 0x34, 0x91, 0xe0, 0x73, 0x96, 0xe1, 0x63, 0x80, 0x90, 0x05, 0x5f,
    0x4b, 0x8b, 0x9a, 0xa2, 0xf4, 0xec, 0x24, 0xeb, 0xae, 0xb9, 0x17, 0xe8,
    0x1f, 0x46, 0x87, 0x83, 0xea, 0x77, 0x1b, 0x27, 0x86, 0x14, 0xcd, 0x57,
    0x79, 0xa3, 0xca, 0x50, 0xdf, 0x5c, 0xc5, 0xaf, 0x0e, 0xdc, 0x33, 0x2e,
    0x2b, 0x69, 0xb2, 0xb4, 0x21, 0x54, 0xbc, 0xff, 0xfd, 0x0a, 0xf1, 0x3c,
    0xe5, 0xa4, 0x67, 0xab, 0xb7, 0xfb, 0x10, 0x7f, 0xe7, 0x94, 0xf9, 0x28,
    0xda, 0x44, 0xb6, 0xdb, 0x72, 0x15, 0xaa, 0x53, 0xbd, 0x03, 0x98, 0xe3,
    0x40, 0x31, 0x26, 0xfa, 0xd1, 0xf7, 0xde, 0x2a, 0x56, 0xed, 0xfe, 0x47,
    0x4c, 0x5a, 0x06, 0xf8, 0xdd, 0x9b, 0xc0, 0xb3, 0x42, 0x2c, 0x45, 0xa9,
    0xa1, 0x32, 0xe6, 0x4e, 0x48, 0xfc, 0xac, 0xf6, 0x3f, 0x78, 0x75, 0x60,
    0xc4, 0xc8, 0x97, 0x01, 0xd7, 0xc1, 0x25, 0x11, 0x8c, 0x20, 0xa5, 0xee,
    0x82, 0x0c, 0x3a, 0x16,
];

/// Expand a 32-bit seed into the four IV words.
///
/// `w1`/`w3` are the complements of `w0`/`w2`, and `w2` swaps the 16-bit
/// halves of `w0`. This must stay bit-for-bit identical to the vendor
/// derivation.
pub fn derive_words(seed: u32) -> [u32; 4] {
    let rotated = seed.rotate_left(16);
    [seed, !seed, rotated, !rotated]
}

/// Derive the 4-word legacy IV from a 256-byte embedded secret.
///
/// The seed is packed from the first four bytes with the exact ordering of
/// the vendor code: byte 3 occupies the top octet, not byte 2.
pub fn derive_iv(secret: &[u8; 256]) -> [u32; 4] {
    let seed = (secret[2] as u32) << 16
        | (secret[1] as u32) << 8
        | (secret[0] as u32)
        | (secret[3] as u32) << 24;
    derive_words(seed)
}

/// The legacy IV reconstructed from the built-in vendor secret.
pub fn sst_iv() -> [u32; 4] {
    derive_iv(&SST_SECRET)
}

/// Serialize IV words into the 16-byte form, each word little-endian.
pub fn iv_bytes(words: &[u32; 4]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for (chunk, word) in out.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Golden value captured from the vendor derivation for the built-in
    // secret.
    const GOLDEN_WORDS: [u32; 4] = [0xbb13_be00, 0x44ec_41ff, 0xbe00_bb13, 0x41ff_44ec];

    #[test]
    fn test_sst_iv_golden() {
        assert_eq!(sst_iv(), GOLDEN_WORDS);
        // Pure function: repeated calls agree.
        assert_eq!(sst_iv(), sst_iv());
    }

    #[test]
    fn test_iv_bytes_golden() {
        assert_eq!(
            iv_bytes(&GOLDEN_WORDS),
            [
                0x00, 0xbe, 0x13, 0xbb, 0xff, 0x41, 0xec, 0x44, 0x13, 0xbb, 0x00, 0xbe, 0xec,
                0x44, 0xff, 0x41,
            ]
        );
    }

    #[test]
    fn test_word_structure() {
        for seed in [0u32, 0xffff_ffff, 0x1234_5678, 0xbb13_be00] {
            let [w0, w1, w2, w3] = derive_words(seed);
            assert_eq!(w0, seed);
            assert_eq!(w1, 0xffff_ffff ^ w0);
            assert_eq!(w3, 0xffff_ffff ^ w2);
            assert_eq!(w2 >> 16, w0 & 0xffff);
            assert_eq!(w2 & 0xffff, w0 >> 16);
        }
    }

    #[test]
    fn test_seed_packing_order() {
        let mut secret = [0u8; 256];
        secret[0] = 0x11;
        secret[1] = 0x22;
        secret[2] = 0x33;
        secret[3] = 0x44;
        assert_eq!(derive_iv(&secret)[0], 0x4433_2211);
    }
}
