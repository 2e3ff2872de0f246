// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
pub mod image_store;

pub use image_store::ImageStore;
