// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Client-session image state: the current generated batch and favorites
//!
//! Single owner of the generated-image list and the in-session favorites
//! view. The store carries no locking of its own; callers share it behind
//! whatever synchronization the surrounding context requires, and the
//! do-not-start-a-run-while-one-is-running guard lives at the call site via
//! `is_generating`, not here.

use crate::favorites::FavoriteImage;
use crate::generation::GeneratedImage;

#[derive(Debug, Default)]
pub struct ImageStore {
    is_generating: bool,
    generation_progress: f32,
    current_prompt: String,
    error: Option<String>,
    generated_images: Vec<GeneratedImage>,
    favorite_images: Vec<FavoriteImage>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Flags ---

    pub fn is_generating(&self) -> bool {
        self.is_generating
    }

    pub fn set_generating(&mut self, is_generating: bool) {
        self.is_generating = is_generating;
    }

    pub fn generation_progress(&self) -> f32 {
        self.generation_progress
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.generation_progress = progress;
    }

    pub fn current_prompt(&self) -> &str {
        &self.current_prompt
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        self.current_prompt = prompt.to_string();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    // --- Generated images ---

    pub fn generated_images(&self) -> &[GeneratedImage] {
        &self.generated_images
    }

    /// Replace the generated list wholesale, used after a run completes
    pub fn set_generated_images(&mut self, images: Vec<GeneratedImage>) {
        self.generated_images = images;
    }

    /// Flip `is_selected` on the image with the given id; unknown ids are a
    /// no-op.
    pub fn toggle_image_selection(&mut self, image_id: &str) {
        if let Some(image) = self
            .generated_images
            .iter_mut()
            .find(|img| img.id == image_id)
        {
            image.is_selected = !image.is_selected;
        }
    }

    /// Selected images in their original order
    pub fn selected_images(&self) -> Vec<&GeneratedImage> {
        self.generated_images
            .iter()
            .filter(|img| img.is_selected)
            .collect()
    }

    // --- Favorites ---

    pub fn favorite_images(&self) -> &[FavoriteImage] {
        &self.favorite_images
    }

    pub fn add_favorite(&mut self, image: FavoriteImage) {
        self.favorite_images.push(image);
    }

    pub fn remove_favorite(&mut self, favorite_id: &str) {
        self.favorite_images.retain(|img| img.id != favorite_id);
    }

    // --- Lifecycle ---

    /// Empty the generated list and reset progress and error, used before
    /// starting a new run
    pub fn clear_generated(&mut self) {
        self.generated_images.clear();
        self.generation_progress = 0.0;
        self.error = None;
    }

    /// Return all run state to initial values. Favorites survive: they are
    /// owned by persistent storage, not the ephemeral run.
    pub fn reset(&mut self) {
        self.is_generating = false;
        self.generation_progress = 0.0;
        self.current_prompt.clear();
        self.error = None;
        self.generated_images.clear();
    }
}
