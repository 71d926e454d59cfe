// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClauseCategory {
    Payment,
    Termination,
    Liability,
    Confidentiality,
    IpRights,
}

impl ClauseCategory {
    /// Classification order; the first matching category wins.
    pub const ALL: [ClauseCategory; 5] = [
        Self::Payment,
        Self::Termination,
        Self::Liability,
        Self::Confidentiality,
        Self::IpRights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "PAYMENT",
            Self::Termination => "TERMINATION",
            Self::Liability => "LIABILITY",
            Self::Confidentiality => "CONFIDENTIALITY",
            Self::IpRights => "IP_RIGHTS",
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Payment => &[
                "payment",
                "invoice",
                "fee",
                "net 30",
                "compensation",
                "remuneration",
            ],
            Self::Termination => &[
                "termination",
                "terminate",
                "cancellation",
                "notice period",
                "breach",
            ],
            Self::Liability => &[
                "liability",
                "indemnify",
                "damages",
                "limitation",
                "hold harmless",
            ],
            Self::Confidentiality => &[
                "confidential",
                "non-disclosure",
                "proprietary",
                "trade secret",
            ],
            Self::IpRights => &[
                "intellectual property",
                "copyright",
                "patent",
                "ownership",
                "work for hire",
            ],
        }
    }

    /// Placeholder tier until clause-level scoring exists.
    pub fn default_risk(&self) -> RiskTier {
        match self {
            Self::Liability => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }
}

impl std::fmt::Display for ClauseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

/// A classified paragraph-level excerpt of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    #[serde(rename = "type")]
    pub category: ClauseCategory,
    pub text: String,
    pub section: String,
    #[serde(rename = "riskLevel")]
    pub risk_level: RiskTier,
}
