// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Settings loading tests
//!
//! Environment variables are process-wide, so everything runs in one test
//! function, phase by phase, instead of racing across test threads.

use std::env;
use thumbforge::config::Settings;

fn set_required_vars() {
    env::set_var("REPLICATE_API_TOKEN", "r8_test");
    env::set_var("MODEL_NAME", "owner/model");
    env::set_var("MODEL_VERSION", "abc123");
    env::set_var("SUPABASE_URL", "https://project.supabase.co");
    env::set_var("SUPABASE_ANON_KEY", "anon");
}

fn clear_tuning_vars() {
    for name in [
        "GENERATION_ASPECT_RATIO",
        "GENERATION_OUTPUT_FORMAT",
        "GENERATION_OUTPUT_QUALITY",
        "GENERATION_INFERENCE_STEPS",
        "GENERATION_GUIDANCE_SCALE",
        "GENERATION_PROMPT_STRENGTH",
        "GENERATION_LORA_SCALE",
        "GENERATION_EXTRA_LORA_SCALE",
    ] {
        env::remove_var(name);
    }
}

#[test]
fn test_settings_from_env() {
    // Phase 1: required vars only, everything else defaulted
    set_required_vars();
    clear_tuning_vars();
    env::remove_var("API_PORT");
    env::remove_var("REPLICATE_BASE_URL");
    env::remove_var("TRIGGER_WORD");
    env::remove_var("SUPABASE_BUCKET");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.api_port, 8080);
    assert_eq!(settings.provider.base_url, "https://api.replicate.com");
    assert_eq!(settings.provider.model_name, "owner/model");
    assert_eq!(settings.provider.trigger_word, "");
    assert_eq!(settings.storage.bucket, "images");
    assert_eq!(settings.generation.aspect_ratio, "16:9");
    assert_eq!(settings.generation.output_quality, 90);
    assert_eq!(settings.generation.num_inference_steps, 28);

    // Phase 2: tuning knobs honor overrides
    env::set_var("GENERATION_ASPECT_RATIO", "1:1");
    env::set_var("GENERATION_OUTPUT_QUALITY", "80");
    env::set_var("GENERATION_INFERENCE_STEPS", "40");
    env::set_var("GENERATION_GUIDANCE_SCALE", "4.5");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.generation.aspect_ratio, "1:1");
    assert_eq!(settings.generation.output_quality, 80);
    assert_eq!(settings.generation.num_inference_steps, 40);
    assert!((settings.generation.guidance_scale - 4.5).abs() < f32::EPSILON);
    // Untouched knobs keep their defaults
    assert_eq!(settings.generation.output_format, "webp");
    assert!((settings.generation.prompt_strength - 0.8).abs() < f32::EPSILON);

    // Phase 3: a malformed numeric knob is a startup error
    env::set_var("GENERATION_OUTPUT_QUALITY", "very high");
    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("GENERATION_OUTPUT_QUALITY"));

    // Phase 4: a missing required var is a startup error
    clear_tuning_vars();
    env::remove_var("MODEL_NAME");
    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("MODEL_NAME"));
}
