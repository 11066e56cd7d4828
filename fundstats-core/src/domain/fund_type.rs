//! Fund-type enumeration and its metrics-panel labels.

use serde::{Deserialize, Serialize};

/// Fund types with a dedicated panel label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundKind {
    HedgeFunds,
    OpenEnded,
    CloseEnded,
}

impl FundKind {
    /// Match the `FundType` value used in the NAV table.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Hedge Funds" => Some(FundKind::HedgeFunds),
            "Open Ended Funds" => Some(FundKind::OpenEnded),
            "Close Ended Funds" => Some(FundKind::CloseEnded),
            _ => None,
        }
    }

    pub fn panel_label(self) -> &'static str {
        match self {
            FundKind::HedgeFunds => "All QHFs*",
            FundKind::OpenEnded => "All OEFs*",
            FundKind::CloseEnded => "All CEFs*",
        }
    }
}

/// Panel label for a raw fund-type value; unknown fund types get an empty label.
pub fn panel_label(fund_type: &str) -> &'static str {
    FundKind::from_name(fund_type).map_or("", FundKind::panel_label)
}
