use std::io::Write;

use postboard::application::error::AppError;
use serde::Serialize;

pub fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::output(format!("failed to render output: {e}")))?;
    writeln!(out, "{rendered}").map_err(|e| AppError::output(e.to_string()))
}
