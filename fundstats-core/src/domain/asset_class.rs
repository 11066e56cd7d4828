//! Canonical asset-class vocabulary.
//!
//! The Assets chart orders its bars by this list, not alphabetically and not by
//! value.

/// The sixteen asset classes in display order.
pub const ASSET_ORDER: [&str; 16] = [
    "CIU",
    "Cash",
    "Commodities",
    "Conv. Bonds",
    "Corp. Bonds",
    "Digital Assets",
    "L. EQ",
    "Loans",
    "Muni./Oth. Pub. Local Debt",
    "Other",
    "Oth. Asset Classes",
    "Real Estate",
    "Repo",
    "Sov. Bonds",
    "Str./Sec. Products",
    "UL EQ",
];

/// Position of `asset` in [`ASSET_ORDER`], or `None` for labels outside the vocabulary.
pub fn canonical_rank(asset: &str) -> Option<usize> {
    ASSET_ORDER.iter().position(|a| *a == asset)
}
