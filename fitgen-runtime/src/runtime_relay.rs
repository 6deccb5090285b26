use std::sync::Arc;

use fitgen_engine::relay::Relay;
use fitgen_engine::traits::CompletionProvider;

use crate::llm::OpenAiCompatibleCompletionProvider;
use crate::settings::RelaySettings;

/// Build a runnable relay from resolved settings.
///
/// This keeps the server layer thin.
pub fn build_relay_from_settings(settings: &RelaySettings) -> Relay {
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiCompatibleCompletionProvider::new(
        settings.llm_base_url.clone(),
    ));

    if settings.api_key.is_none() {
        log::warn!(
            "{} is not set; every relay request will fail with a configuration error",
            crate::settings::ENV_API_KEY
        );
    }

    Relay::new(settings.relay_config(), provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_relay_settings;

    #[test]
    fn relay_reflects_settings() {
        let mut settings = default_relay_settings();
        settings.llm_model = "m".into();
        let relay = build_relay_from_settings(&settings);
        assert!(!relay.has_credential());
        assert_eq!(relay.model(), "m");

        settings.api_key = Some("k".into());
        assert!(build_relay_from_settings(&settings).has_credential());
    }
}
