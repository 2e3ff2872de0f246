// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
pub mod settings;

pub use settings::{ProviderSettings, Settings, StorageSettings};
