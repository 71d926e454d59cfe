// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use dealsign::config::Config;
use dealsign::services::llm::{GenerateRequest, LlmProvider, Operation, ProviderFailure};

/// A short services agreement with one paragraph per clause category.
#[allow(dead_code)]
pub const SAMPLE_CONTRACT: &str = "\
MASTER SERVICES AGREEMENT

1.1 Payment. Payment is due within 30 days of invoice. Late fees accrue monthly.

2. Termination. Either party may terminate this Agreement upon a material breach. \
The Provider may terminate without notice if the Client fails to pay.

Article IV Indemnification. The Client shall indemnify and hold harmless the Provider.

3.2 Confidentiality. Each party shall keep confidential all proprietary information.

5 Ownership. All intellectual property created under this Agreement belongs to the Client.

This Agreement shall auto-renew for successive one-year terms.";

/// Config with no credentials and no environment lookups.
#[allow(dead_code)]
pub fn offline_config() -> Config {
    Config {
        timeout_secs: 5,
        ..Config::default()
    }
}

#[derive(Clone)]
#[allow(dead_code)]
pub enum Behavior {
    Reply(&'static str),
    Fail {
        status: Option<u16>,
        message: &'static str,
    },
    Hang,
}

/// Scripted provider that counts its calls and records the last prompt.
#[allow(dead_code)]
pub struct ScriptedProvider {
    pub name: &'static str,
    pub behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
    pub last_prompt: std::sync::Mutex<Option<String>>,
    pub context_chars: usize,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn new(name: &'static str, behavior: Behavior) -> (Arc<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Arc::new(Self {
            name,
            behavior,
            calls: Arc::clone(&calls),
            last_prompt: std::sync::Mutex::new(None),
            context_chars: 50,
        });
        (provider, calls)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, ProviderFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.user.clone());
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.to_string()),
            Behavior::Fail { status, message } => {
                Err(ProviderFailure::new(self.name, *status, *message))
            }
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok("too late".into())
            }
        }
    }

    fn context_chars(&self, _op: Operation) -> usize {
        self.context_chars
    }

    fn name(&self) -> &str {
        self.name
    }
}
