//! Diagnostic message table.
//!
//! Entries mirror TypeScript's `diagnosticMessages.json` for the codes the
//! scanner and the class-field pass can report.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const UNTERMINATED_TEMPLATE_LITERAL: &str = "Unterminated template literal.";
    pub const A_PARAMETER_PROPERTY_MAY_NOT_BE_DECLARED_USING_A_BINDING_PATTERN: &str =
        "A parameter property may not be declared using a binding pattern.";
    pub const UNEXPECTED_TOKEN: &str = "Unexpected token.";
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const EXPECTED: u32 = 1005;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const UNTERMINATED_TEMPLATE_LITERAL: u32 = 1160;
    pub const A_PARAMETER_PROPERTY_MAY_NOT_BE_DECLARED_USING_A_BINDING_PATTERN: u32 = 1187;
    pub const UNEXPECTED_TOKEN: u32 = 1012;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNEXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNEXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_TEMPLATE_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_TEMPLATE_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::A_PARAMETER_PROPERTY_MAY_NOT_BE_DECLARED_USING_A_BINDING_PATTERN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::A_PARAMETER_PROPERTY_MAY_NOT_BE_DECLARED_USING_A_BINDING_PATTERN,
    },
];
