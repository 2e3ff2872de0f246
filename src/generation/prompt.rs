// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Prompt normalization for fine-tuned models with a trigger word

/// Prefix the trigger word onto the prompt unless it is already present.
///
/// Containment is checked case-insensitively so "dani portrait" is left
/// alone when the trigger word is "DANI". An empty trigger word returns the
/// prompt unchanged.
pub fn apply_trigger_word(prompt: &str, trigger_word: &str) -> String {
    if trigger_word.is_empty() {
        return prompt.to_string();
    }

    if prompt
        .to_lowercase()
        .contains(&trigger_word.to_lowercase())
    {
        prompt.to_string()
    } else {
        format!("{} {}", trigger_word, prompt)
    }
}
