mod blocking;
mod config;
mod generator;
mod mock;
mod openai;
mod traits;

pub use blocking::BlockingGenerator;
pub use config::{
    mask_key, ModelConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
pub use generator::{Generator, MAX_SCHEMA_ATTEMPTS};
pub use mock::MockModelClient;
pub use openai::OpenAiClient;
pub use traits::ModelClient;
