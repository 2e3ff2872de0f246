// Copyright (c) 2025 Thumbforge
// SPDX-License-Identifier: BUSL-1.1
//! Batch planning for provider calls with a bounded per-call output count

use super::orchestrator::GenerationError;

/// Split a requested total into per-call batch sizes.
///
/// Greedy: emit `max_per_batch` until the remainder is smaller, then the
/// nonzero remainder. The plan always sums to `requested_total` and every
/// element is in `1..=max_per_batch`.
pub fn plan_batches(requested_total: u32, max_per_batch: u32) -> Result<Vec<u32>, GenerationError> {
    if requested_total == 0 {
        return Err(GenerationError::InvalidArgument(
            "requested_total must be greater than zero".to_string(),
        ));
    }
    if max_per_batch == 0 {
        return Err(GenerationError::InvalidArgument(
            "max_per_batch must be greater than zero".to_string(),
        ));
    }

    let mut plan = Vec::new();
    let mut remaining = requested_total;
    while remaining > 0 {
        let batch = remaining.min(max_per_batch);
        plan.push(batch);
        remaining -= batch;
    }

    Ok(plan)
}
