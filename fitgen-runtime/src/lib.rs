pub mod config_store;
pub mod defaults;
pub mod ipc;
pub mod llm;
pub mod relay_client;
pub mod runtime_relay;
pub mod settings;
