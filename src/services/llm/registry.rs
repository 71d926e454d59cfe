// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use super::LlmProvider;
use super::gemini::GeminiProvider;
use super::openai::OpenAiProvider;
use crate::config::Config;
use crate::domain::Method;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Gemini,
    OpenAi,
}

impl ProviderKind {
    /// Resolution order: primary first.
    pub const ORDER: [ProviderKind; 2] = [Self::Gemini, Self::OpenAi];

    pub fn method(&self) -> Method {
        match self {
            Self::Gemini => Method::Gemini,
            Self::OpenAi => Method::OpenAi,
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Gemini => 0,
            Self::OpenAi => 1,
        }
    }

    fn build(&self, config: &Config) -> Option<Arc<dyn LlmProvider>> {
        let built = match self {
            Self::Gemini => GeminiProvider::from_config(config)
                .map(|p| p.map(|p| Arc::new(p) as Arc<dyn LlmProvider>)),
            Self::OpenAi => OpenAiProvider::from_config(config)
                .map(|p| p.map(|p| Arc::new(p) as Arc<dyn LlmProvider>)),
        };
        match built {
            Ok(Some(provider)) => {
                debug!(provider = %self, "provider client initialized");
                Some(provider)
            }
            Ok(None) => {
                debug!(provider = %self, "no usable credential, provider skipped");
                None
            }
            Err(e) => {
                warn!(provider = %self, error = %e, "failed to build provider client");
                None
            }
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.method().as_str())
    }
}

type Slot = OnceLock<Option<Arc<dyn LlmProvider>>>;

/// Process-lifetime cache of provider clients, one slot per [`ProviderKind`].
///
/// Each slot is filled at most once. A missing credential or a failed build is
/// cached as `None`, so later lookups neither retry nor rebuild.
pub struct ProviderRegistry {
    config: Config,
    slots: [Slot; 2],
}

impl ProviderRegistry {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            slots: [OnceLock::new(), OnceLock::new()],
        }
    }

    /// Registry whose slots are already decided. Kinds not listed are absent.
    pub fn with_providers(
        config: Config,
        providers: Vec<(ProviderKind, Arc<dyn LlmProvider>)>,
    ) -> Self {
        let registry = Self::new(config);
        for (kind, provider) in providers {
            // First entry per kind wins.
            let _ = registry.slots[kind.index()].set(Some(provider));
        }
        for slot in &registry.slots {
            let _ = slot.set(None);
        }
        registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get-or-create the client for `kind`.
    pub fn get(&self, kind: ProviderKind) -> Option<Arc<dyn LlmProvider>> {
        self.slots[kind.index()]
            .get_or_init(|| kind.build(&self.config))
            .clone()
    }

    pub fn is_initialized(&self, kind: ProviderKind) -> bool {
        self.slots[kind.index()].get().is_some()
    }

    /// Usable providers in resolution order, initializing slots on first use.
    pub fn available(&self) -> Vec<(ProviderKind, Arc<dyn LlmProvider>)> {
        ProviderKind::ORDER
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|p| (kind, p)))
            .collect()
    }
}
