//! Target-language conventions used when emitting calls.
use crate::utils::conf::CompilationParameters;

/// Conventions of the language generated code is written in.
pub trait CodeContext {
    fn parameters(&self) -> &CompilationParameters;

    /// Map an identifier-safe label to the name of the generated function.
    fn label_to_name(&self, label: &str) -> String;

    /// Expression passing `value` by pointer.
    fn value_to_pointer(&self, value: &str) -> String;

    /// Statement terminator.
    fn end_of_stat(&self) -> &str;

    fn library_handle(&self) -> &str {
        &self.parameters().library_handle
    }
}

/// C++ conventions: pointers are taken with `&(...)` and statements end with `;`.
#[derive(Debug, Clone, Default)]
pub struct CppCodeContext {
    parameters: CompilationParameters,
}

impl CppCodeContext {
    pub fn new(parameters: CompilationParameters) -> Self {
        Self { parameters }
    }
}

impl CodeContext for CppCodeContext {
    fn parameters(&self) -> &CompilationParameters {
        &self.parameters
    }

    /// Identifiers cannot start with a digit, such labels get a leading underscore.
    fn label_to_name(&self, label: &str) -> String {
        match label.chars().next() {
            Some(c) if c.is_ascii_digit() => format!("_{label}"),
            _ => label.to_string(),
        }
    }

    fn value_to_pointer(&self, value: &str) -> String {
        format!("&({value})")
    }

    fn end_of_stat(&self) -> &str {
        ";"
    }
}
