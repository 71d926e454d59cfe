// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod analysis;
pub mod clauses;
pub mod document;
pub mod gateway;
pub mod llm;
pub mod matcher;
pub mod qa;
pub mod risks;
pub mod text;
