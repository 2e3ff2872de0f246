// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
pub mod object_store;

pub use object_store::{MockObjectStore, ObjectStorage, StorageError, SupabaseStorageClient};
