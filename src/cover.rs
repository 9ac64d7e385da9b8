//! Deterministic cover image assignment.
//!
//! Posts without an explicit cover get one of the configured `banners`. The
//! choice is a pure function of the post identifier, so a post keeps its
//! banner across builds and machines:
//!
//! ```text
//! hash  = Σ c[i] · 31^(n-1-i)     c = UTF-16 code units of the identifier
//! index = hash mod banners.len()
//! ```
//!
//! ## Arithmetic
//!
//! The polynomial grows past 2^53 after roughly eleven characters, so the
//! result depends on how it is evaluated. Two evaluations are offered via
//! [`CoverHash`]:
//!
//! - **`Exact`** (default): Horner's rule reduced modulo `len` at every step.
//!   This is the mathematically exact residue for identifiers of any length.
//! - **`Float`**: a double-precision accumulator summing `c · 31^k` left to
//!   right, reproducing the banner choices of sites built by the JavaScript
//!   theme. The weights are the doubles V8 returns for `31 ** k`, which are
//!   not always correctly rounded (k = 13, 30, 31, …), so they come from
//!   a recorded table rather than `f64::powf`. Identifiers long enough to
//!   overflow (about 207 UTF-16 units) get index 0.
//!
//! Both agree for identifiers whose hash stays below 2^53.

use serde::{Deserialize, Serialize};

const BASE: u128 = 31;

/// Evaluation strategy for the cover hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverHash {
    #[default]
    Exact,
    Float,
}

/// Index into a list of `len` banners for `identifier`, using exact arithmetic.
///
/// Always in `0..len`. A zero `len` is a caller bug (config validation
/// rejects empty banner lists); it yields 0 rather than panicking.
pub fn index_for(identifier: &str, len: usize) -> usize {
    index_with(identifier, len, CoverHash::Exact)
}

/// Index into a list of `len` banners using the given arithmetic.
pub fn index_with(identifier: &str, len: usize, arithmetic: CoverHash) -> usize {
    if len == 0 {
        return 0;
    }
    match arithmetic {
        CoverHash::Exact => exact_index(identifier, len),
        CoverHash::Float => float_index(identifier, len),
    }
}

/// Pick the banner for `identifier`. `None` only when `banners` is empty.
pub fn cover_for<'a>(
    identifier: &str,
    banners: &'a [String],
    arithmetic: CoverHash,
) -> Option<&'a str> {
    banners
        .get(index_with(identifier, banners.len(), arithmetic))
        .map(String::as_str)
}

fn exact_index(identifier: &str, len: usize) -> usize {
    let modulus = len as u128;
    let residue = identifier
        .encode_utf16()
        .fold(0u128, |acc, unit| (acc * BASE + u128::from(unit)) % modulus);
    // residue < len, so it fits back into usize
    residue as usize
}

fn float_index(identifier: &str, len: usize) -> usize {
    let units: Vec<u16> = identifier.encode_utf16().collect();
    let n = units.len();
    let mut hash = 0.0_f64;
    for (i, unit) in units.iter().enumerate() {
        hash += f64::from(*unit) * pow31(n - 1 - i);
    }
    let index = hash % len as f64;
    if index.is_finite() {
        // Float-to-int casts saturate; `index` is already in [0, len).
        index as usize
    } else {
        0
    }
}

fn pow31(exponent: usize) -> f64 {
    POW31_BITS
        .get(exponent)
        .map_or(f64::INFINITY, |bits| f64::from_bits(*bits))
}

/// Bit patterns of `31 ** k` as evaluated by V8, for `k` in `0..=206`.
/// `31 ** 207` is infinite.
const POW31_BITS: [u64; 207] = [
    0x3FF0_0000_0000_0000, 0x403F_0000_0000_0000, 0x408E_0800_0000_0000, 0x40DD_17C0_0000_0000,
    0x412C_2F02_0000_0000, 0x417B_4D89_F000_0000, 0x41CA_731D_A080_0000, 0x4219_9F84_B37C_0000,
    0x4268_D288_8DE0_2000, 0x42B8_0BF4_4971_1F00, 0x4307_4B94_A725_9608, 0x4356_9138_01EC_6958,
    0x43A5_DCAE_41DD_060D, 0x43F5_2DC8_CFCE_1DDC, 0x4444_845A_894F_ACEE, 0x4493_E037_B505_2F86,
    0x44E3_4135_F75D_060A, 0x4532_A72C_47A2_1DDA, 0x4582_11F2_E565_0CEB, 0x45D1_8163_4E39_E484,
    0x4620_F558_33C8_1560, 0x4670_6DAD_7229_D4B5, 0x46BF_D480_0D31_0C1E, 0x470E_D5DC_0CC7_83BD,
    0x475D_DF2D_2C61_479F, 0x47AC_F033_C2FE_3D62, 0x47FC_08B2_24E6_4B77, 0x484B_286C_93BF_191B,
    0x489A_4F29_2F21_2052, 0x48E9_7CAF_E5A8_1750, 0x4938_B0CA_667A_D696, 0x4987_EB44_1346_FFE0,
    0x49D7_2BE9_F2AC_C7E2, 0x4A26_728A_A317_61A3, 0x4A75_BEF6_4DFE_A696, 0x4AC5_10FE_9B8E_B161,
    0x4B14_6876_A6B2_3BD6, 0x4B63_C532_F17C_A9F7, 0x4BB3_2709_59F0_C4A8, 0x4C02_8DD1_0F21_3E82,
    0x4C51_F962_86A8_348E, 0x4CA1_6997_7272_F2EA, 0x4CF0_DE4A_B6DF_5B52, 0x4D40_5758_6128_6078,
    0x4D8F_A93B_3C3E_3AE8, 0x4DDE_ABF1_625C_4911, 0x4E2D_B691_D749_66C8, 0x4E7C_C8DD_488F_1B92,
    0x4ECB_E296_5E4A_A2B5, 0x4F1B_0381_AB58_4DA0, 0x4F6A_2B65_9DFD_8B33, 0x4FB9_5A0A_710D_9ED9,
    0x5008_8F3A_1D85_31E2, 0x5057_CAC0_4C99_0853, 0x50A7_0C6A_4A34_4011, 0x50F6_5406_F7E2_9E10,
    0x5145_A166_C023_8920, 0x5194_F45B_8A22_6CD7, 0x51E4_4CB8_ADD1_5970, 0x5233_AA52_E862_CEA4,
    0x5283_0D00_511F_B82F, 0x52D2_7498_4E96_BA6E, 0x5321_E0F3_8C22_049A, 0x5371_51EB_EFC0_F476,
    0x53C0_C75C_9042_ECD2, 0x5410_4121_ABC0_D56B, 0x545F_7E31_3CC5_9D80, 0x54AE_823F_B2DF_7094,
    0x54FD_8E2D_B548_750F, 0x554C_A1BC_479E_3167, 0x559B_BCAE_6561_3FDC, 0x55EA_DEC8_F236_35DD,
    0x563A_07D2_AAA4_842E, 0x5689_3794_154F_600C, 0x56D8_6DD7_74A4_E50C, 0x5727_AA68_B8FF_BDE4,
    0x5776_ED15_7337_BFF4, 0x57C6_35AC_C79E_01F5, 0x5815_83FF_6161_11E5, 0x5864_D7DF_6656_0956,
    0x58B4_3120_6B23_590C, 0x5903_8F97_67CA_3E43, 0x5952_F31A_AC8B_EC51, 0x59A2_5B81_D727_8CEE,
    0x59F1_C8A5_C86E_5087, 0x5A41_3A60_9A2A_DE03, 0x5A90_B08D_9559_8713, 0x5AE0_2B09_28AE_BADA,
    0x5B2F_5361_BED2_8A07, 0x5B7E_58C6_B0DB_F5B6, 0x5BCD_6600_7B55_1609, 0x5C1C_7AD0_777A_6D58,
    0x5C6B_96F9_F3BE_99EE, 0x5CBA_BA42_2420_A51E, 0x5D09_E470_12FF_9FF5, 0x5D59_154C_9267_A2F6,
    0x5DA8_4CA2_2DD4_65DE, 0x5DF7_8A3D_1C65_C2AF, 0x5E46_CDEB_3382_949A, 0x5E96_177B_D9E6_7FF5,
    0x5EE5_66BF_FB17_4BF5, 0x5F34_BB89_FB3E_9196, 0x5F84_15AD_AB64_9D09, 0x5FD3_7500_3E09_7820,
    0x6022_D958_3C19_2C60, 0x6072_428D_7A38_62FC, 0x60C1_B079_0E66_9FE5, 0x6111_22F5_45F3_6AE6,
    0x6160_99DD_9BC3_CF8E, 0x61B0_150E_AEE5_B112, 0x61FF_28CC_72DD_0713, 0x624E_2F86_0F46_1EDA,
    0x629D_3E09_DECB_EDE3, 0x62EC_5419_8FD5_8E74, 0x633B_7178_C356_E200, 0x638A_95EC_FD3C_2AF0,
    0x63D9_C13D_9552_4999, 0x6428_F333_A8A7_B74C, 0x6478_2B9A_0B62_7992, 0x64C7_6A3D_3B07_65C5,
    0x6516_AEEB_512F_2A97, 0x6565_F973_F6A5_B142, 0x65B5_49A8_56F0_83B8, 0x6604_9F5B_1438_FF9A,
    0x6653_FA60_3B97_379E, 0x66A3_5A8D_39BA_7DE1, 0x66F2_BFB8_CFEC_A9F2, 0x6742_29BB_096D_44A2,
    0x6791_986D_3121_DA7D, 0x67E1_0BA9_C798_CBA9, 0x6830_834C_795C_054C, 0x687F_FE64_2B22_4A43,
    0x68CE_FE71_09C9_37F1, 0x691E_067D_817A_EE31, 0x696D_1649_956F_16C0, 0x69BC_2D97_48C3_9E0A,
    0x6A0B_4C2A_8E7D_811A, 0x6A5A_71C9_3A09_9511, 0x6AA9_9E3A_F039_4868, 0x6AF8_D149_18B7_7E25,
    0x6B48_0ABE_CFF1_C234, 0x6B97_4A68_D972_3422, 0x6BE6_9015_92A6_A281, 0x6C35_DB94_E611_6D6D,
    0x6C85_2CB8_3EE0_E202, 0x6CD4_8352_7CE9_DAF2, 0x6D23_DF37_E902_8C1A, 0x6D73_403E_29BA_77B9,
    0x6DC2_A63C_386C_A3FC, 0x6E12_110A_56A9_3EDC, 0x6E61_8082_03F3_F4E5, 0x6EB0_F47D_F3D4_553E,
    0x6F00_6CDA_0435_B294, 0x6F4F_D2E6_6828_09FE, 0x6F9E_D44F_34E6_C9AE, 0x6FED_DDAC_BB3F_9361,
    0x703C_EEBF_5565_96C6, 0x708C_0749_5ABA_6A10, 0x70DB_270F_0FE4_96BF, 0x712A_4DD6_9765_7209,
    0x7179_7B67_E2AA_4679, 0x71C8_AF8C_A394_F445, 0x7217_EA10_3E78_4CA3, 0x7267_2ABF_BC84_8A3E,
    0x72B6_7169_BEA0_65EC, 0x7305_BDDE_70AB_62BC, 0x7355_0FEF_7D26_07A6, 0x73A4_6770_013C_D769,
    0x73F3_C434_8132_F0AE, 0x7443_2612_DD29_5929, 0x7492_8CE2_4640_0E5F, 0x74E1_F87B_340E_0DEC,
    0x7531_68B7_5A6D_9D7D, 0x7580_DD71_9F9A_3091, 0x75D0_5686_129D_5F0D, 0x761F_A7A3_C410_E828,
    0x766E_AA66_A5F0_60E7, 0x76BD_B513_70C0_DDE0, 0x770C_C76A_D53A_D6F1, 0x775B_E12F_7E91_003A,
    0x77AB_0226_029C_7838, 0x77FA_2A14_D287_9476, 0x7849_58C4_2BF3_57D2, 0x7898_8DFE_0A93_BD14,
    0x78E7_C98E_1A3F_1F2B, 0x7937_0B41_A96D_2632, 0x7986_52E7_9C21_BD00, 0x79D5_A050_5F40_AF18,
    0x7A24_F34D_DC46_A99F, 0x7A74_4BB3_6D64_7452, 0x7AC3_A955_D1F9_50B0, 0x7B13_0C0B_2369_862A,
    0x7B62_73AA_CA4E_39F9, 0x7BB1_E00D_73FB_C829, 0x7C01_510D_085B_E9E8, 0x7C50_C684_A019_0A99,
    0x7CA0_4050_7B18_4244, 0x7CEF_7C9B_EE7F_0064, 0x7D3E_80B7_0F0B_0860, 0x7D8D_8CB1_5692_B01D,
    0x7DDC_A04B_CBDE_1A9C, 0x7E2B_BB49_6D7F_29C8, 0x7E7A_DD6F_2213_3079, 0x7ECA_0683_A902_96F6,
    0x7F19_364F_8BBA_823E, 0x7F68_6C9D_0F5C_AE2C, 0x7FB7_A938_26E1_C8BA,
];
