//! Environment-driven configuration for the Thumbforge node

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::generation::GenerationSettings;

/// Generation provider configuration
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_token: String,
    pub base_url: String,
    pub model_name: String,
    pub model_version: String,
    pub trigger_word: String,
}

/// Object storage + metadata store configuration
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub supabase_url: String,
    pub supabase_key: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_port: u16,
    pub provider: ProviderSettings,
    pub storage: StorageSettings,
    pub generation: GenerationSettings,
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} is invalid: {}", name, e)),
        Err(_) => Ok(default),
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Provider and storage credentials are required; everything else has a
    /// default suitable for local development.
    pub fn from_env() -> Result<Self> {
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .context("API_PORT must be a valid port number")?;

        let provider = ProviderSettings {
            api_token: env::var("REPLICATE_API_TOKEN")
                .context("REPLICATE_API_TOKEN must be set")?,
            base_url: env::var("REPLICATE_BASE_URL")
                .unwrap_or_else(|_| "https://api.replicate.com".to_string()),
            model_name: env::var("MODEL_NAME").context("MODEL_NAME must be set")?,
            model_version: env::var("MODEL_VERSION").context("MODEL_VERSION must be set")?,
            trigger_word: env::var("TRIGGER_WORD").unwrap_or_default(),
        };

        let storage = StorageSettings {
            supabase_url: env::var("SUPABASE_URL").context("SUPABASE_URL must be set")?,
            supabase_key: env::var("SUPABASE_ANON_KEY")
                .context("SUPABASE_ANON_KEY must be set")?,
            bucket: env::var("SUPABASE_BUCKET").unwrap_or_else(|_| "images".to_string()),
        };

        // Provider tuning: each knob overridable, defaulting per the model
        let defaults = GenerationSettings::default();
        let generation = GenerationSettings {
            aspect_ratio: env::var("GENERATION_ASPECT_RATIO")
                .unwrap_or(defaults.aspect_ratio),
            output_format: env::var("GENERATION_OUTPUT_FORMAT")
                .unwrap_or(defaults.output_format),
            output_quality: env_or("GENERATION_OUTPUT_QUALITY", defaults.output_quality)?,
            num_inference_steps: env_or(
                "GENERATION_INFERENCE_STEPS",
                defaults.num_inference_steps,
            )?,
            guidance_scale: env_or("GENERATION_GUIDANCE_SCALE", defaults.guidance_scale)?,
            prompt_strength: env_or("GENERATION_PROMPT_STRENGTH", defaults.prompt_strength)?,
            lora_scale: env_or("GENERATION_LORA_SCALE", defaults.lora_scale)?,
            extra_lora_scale: env_or("GENERATION_EXTRA_LORA_SCALE", defaults.extra_lora_scale)?,
        };

        Ok(Self {
            api_port,
            provider,
            storage,
            generation,
        })
    }
}
