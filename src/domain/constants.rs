// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

// =============================================================================
// SCAN WINDOW
// =============================================================================

/// Number of recent blocks examined for activity touching an address.
pub const BLOCK_COUNT: u64 = 1_000;
/// Upper bound on block groups kept in a snapshot, newest first.
pub const MAX_BLOCK_GROUPS: usize = 100;
pub const DEFAULT_SCAN_CONCURRENCY: usize = 16;
pub const DEFAULT_SCAN_TIMEOUT_MS: u64 = 30_000;

// =============================================================================
// STORAGE
// =============================================================================

pub const STORAGE_MAX_ENTRIES: usize = 1_000;
pub const STORAGE_TX_INDEX: u64 = 0;

// =============================================================================
// BYTECODE
// =============================================================================

/// Wasm magic (`\0asm`) followed by the first byte of version 1.
pub const WASM_MODULE_SIGNATURE: [u8; 5] = [0x00, 0x61, 0x73, 0x6d, 0x01];
