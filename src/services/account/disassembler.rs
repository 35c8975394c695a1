// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use crate::common::error::AppError;
use crate::domain::constants::WASM_MODULE_SIGNATURE;

/// True when `code` starts with the wasm module signature.
pub fn is_wasm_module(code: &[u8]) -> bool {
    code.starts_with(&WASM_MODULE_SIGNATURE)
}

/// Render wasm bytecode as text.
///
/// Names from the `name` section are applied, unnamed items get
/// generated names, and instructions are folded into s-expressions.
/// Any decode failure is returned whole; there is no partial output.
pub fn disassemble(code: &[u8]) -> Result<String, AppError> {
    let mut config = wasmprinter::Config::new();
    config.name_unnamed(true).fold_instructions(true);

    let mut out = wasmprinter::PrintFmtWrite(String::new());
    config
        .print(code, &mut out)
        .map_err(|e| AppError::Decode(format!("{e:#}")))?;
    Ok(out.0)
}
