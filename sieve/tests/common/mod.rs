#![allow(dead_code)]

use sieve::{Value, value};

// ============================================================================
// Test Inputs
// ============================================================================

/// `{ type: "ok", data: { type: "text", content } }`
pub fn ok_text(content: &str) -> Value {
    value!({
        "type" => "ok",
        "data" => value!({ "type" => "text", "content" => content }),
    })
}

/// `{ type: "ok", data: { type: "img", src } }`
pub fn ok_image(src: &str) -> Value {
    value!({
        "type" => "ok",
        "data" => value!({ "type" => "img", "src" => src }),
    })
}

/// `{ type: "error", errorMessage }`
pub fn error_input(message: &str) -> Value {
    value!({ "type" => "error", "errorMessage" => message })
}

/// Arithmetic expression record.
pub fn binary(operator: &str, left: i32, right: i32) -> Value {
    value!({ "operator" => operator, "left" => left, "right" => right })
}

pub fn is_odd(value: &Value) -> bool {
    value.as_number().is_some_and(|n| n % 2.0 == 1.0)
}
