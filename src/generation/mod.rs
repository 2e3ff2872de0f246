// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Batched image generation against an external provider

pub mod batch;
pub mod client;
pub mod orchestrator;
pub mod prompt;

pub use batch::plan_batches;
pub use client::{
    GenerationClient, GenerationSettings, MockGenerationClient, ProviderError, ReplicateClient,
    MAX_OUTPUTS_PER_CALL,
};
pub use orchestrator::{
    run_generation, BatchFailure, GeneratedImage, GenerationError, GenerationRunResult,
};
pub use prompt::apply_trigger_word;
