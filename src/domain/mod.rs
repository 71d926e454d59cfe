// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod answer;
mod clause;
mod risk;

pub use answer::*;
pub use clause::*;
pub use risk::*;
