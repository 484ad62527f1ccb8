//! Token kinds.
//!
//! Names follow TypeScript's `SyntaxKind` so code reads the same as the
//! checker and emitter. Only the token kinds are modelled; there are no node
//! kinds in a token-level pass.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    BigIntLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    /// A whole template literal, substitutions included.
    TemplateLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    HashToken,

    // Assignments
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    AsteriskAsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,

    // Strict mode reserved words
    ImplementsKeyword,
    InterfaceKeyword,
    LetKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    StaticKeyword,
    YieldKeyword,

    // Contextual keywords
    AbstractKeyword,
    AsKeyword,
    AsyncKeyword,
    AwaitKeyword,
    ConstructorKeyword,
    DeclareKeyword,
    GetKeyword,
    IsKeyword,
    KeyOfKeyword,
    OfKeyword,
    OverrideKeyword,
    ReadonlyKeyword,
    SetKeyword,
    TypeKeyword,
}

impl SyntaxKind {
    /// Reserved, strict-mode reserved, or contextual keyword.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (Self::BreakKeyword as u16) && (self as u16) <= (Self::TypeKeyword as u16)
    }

    /// Identifier or any keyword; everything that may appear as a property name.
    #[must_use]
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, Self::Identifier) || self.is_keyword()
    }

    /// Keywords that may prefix a class member.
    #[must_use]
    pub const fn is_class_member_modifier(self) -> bool {
        matches!(
            self,
            Self::AbstractKeyword
                | Self::AsyncKeyword
                | Self::DeclareKeyword
                | Self::GetKeyword
                | Self::OverrideKeyword
                | Self::PrivateKeyword
                | Self::ProtectedKeyword
                | Self::PublicKeyword
                | Self::ReadonlyKeyword
                | Self::SetKeyword
                | Self::StaticKeyword
        )
    }

    #[must_use]
    pub const fn is_open_delimiter(self) -> bool {
        matches!(
            self,
            Self::OpenBraceToken | Self::OpenParenToken | Self::OpenBracketToken
        )
    }

    #[must_use]
    pub const fn is_close_delimiter(self) -> bool {
        matches!(
            self,
            Self::CloseBraceToken | Self::CloseParenToken | Self::CloseBracketToken
        )
    }

    /// The closing kind matching an opening delimiter.
    #[must_use]
    pub const fn closing_delimiter(self) -> Option<Self> {
        match self {
            Self::OpenBraceToken => Some(Self::CloseBraceToken),
            Self::OpenParenToken => Some(Self::CloseParenToken),
            Self::OpenBracketToken => Some(Self::CloseBracketToken),
            _ => None,
        }
    }

    /// Tokens after which an expression has ended, so a following `/` divides.
    #[must_use]
    pub const fn ends_expression(self) -> bool {
        matches!(
            self,
            Self::Identifier
                | Self::NumericLiteral
                | Self::BigIntLiteral
                | Self::StringLiteral
                | Self::RegularExpressionLiteral
                | Self::TemplateLiteral
                | Self::CloseParenToken
                | Self::CloseBracketToken
                | Self::CloseBraceToken
                | Self::PlusPlusToken
                | Self::MinusMinusToken
                | Self::ThisKeyword
                | Self::SuperKeyword
                | Self::TrueKeyword
                | Self::FalseKeyword
                | Self::NullKeyword
        )
    }
}

/// Map identifier text to a keyword kind.
#[must_use]
pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "class" => SyntaxKind::ClassKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "debugger" => SyntaxKind::DebuggerKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "delete" => SyntaxKind::DeleteKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "enum" => SyntaxKind::EnumKeyword,
        "export" => SyntaxKind::ExportKeyword,
        "extends" => SyntaxKind::ExtendsKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "for" => SyntaxKind::ForKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "in" => SyntaxKind::InKeyword,
        "instanceof" => SyntaxKind::InstanceOfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "super" => SyntaxKind::SuperKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "with" => SyntaxKind::WithKeyword,
        "implements" => SyntaxKind::ImplementsKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "let" => SyntaxKind::LetKeyword,
        "private" => SyntaxKind::PrivateKeyword,
        "protected" => SyntaxKind::ProtectedKeyword,
        "public" => SyntaxKind::PublicKeyword,
        "static" => SyntaxKind::StaticKeyword,
        "yield" => SyntaxKind::YieldKeyword,
        "abstract" => SyntaxKind::AbstractKeyword,
        "as" => SyntaxKind::AsKeyword,
        "async" => SyntaxKind::AsyncKeyword,
        "await" => SyntaxKind::AwaitKeyword,
        "constructor" => SyntaxKind::ConstructorKeyword,
        "declare" => SyntaxKind::DeclareKeyword,
        "get" => SyntaxKind::GetKeyword,
        "is" => SyntaxKind::IsKeyword,
        "keyof" => SyntaxKind::KeyOfKeyword,
        "of" => SyntaxKind::OfKeyword,
        "override" => SyntaxKind::OverrideKeyword,
        "readonly" => SyntaxKind::ReadonlyKeyword,
        "set" => SyntaxKind::SetKeyword,
        "type" => SyntaxKind::TypeKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Map identifier text to its token kind: a keyword kind or `Identifier`.
#[must_use]
pub fn string_to_token(text: &str) -> SyntaxKind {
    text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
}

/// Punctuators ordered longest first, so the lexer can take the first prefix
/// match. `>` is never combined with following characters: generic argument
/// lists close with `>>` as two tokens.
pub(crate) const PUNCTUATORS: &[(&str, SyntaxKind)] = &[
    ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
    ("...", SyntaxKind::DotDotDotToken),
    ("===", SyntaxKind::EqualsEqualsEqualsToken),
    ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
    ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
    ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
    ("||=", SyntaxKind::BarBarEqualsToken),
    ("??=", SyntaxKind::QuestionQuestionEqualsToken),
    ("=>", SyntaxKind::EqualsGreaterThanToken),
    ("==", SyntaxKind::EqualsEqualsToken),
    ("!=", SyntaxKind::ExclamationEqualsToken),
    ("<=", SyntaxKind::LessThanEqualsToken),
    ("<<", SyntaxKind::LessThanLessThanToken),
    ("**", SyntaxKind::AsteriskAsteriskToken),
    ("++", SyntaxKind::PlusPlusToken),
    ("--", SyntaxKind::MinusMinusToken),
    ("+=", SyntaxKind::PlusEqualsToken),
    ("-=", SyntaxKind::MinusEqualsToken),
    ("*=", SyntaxKind::AsteriskEqualsToken),
    ("/=", SyntaxKind::SlashEqualsToken),
    ("%=", SyntaxKind::PercentEqualsToken),
    ("&=", SyntaxKind::AmpersandEqualsToken),
    ("|=", SyntaxKind::BarEqualsToken),
    ("^=", SyntaxKind::CaretEqualsToken),
    ("&&", SyntaxKind::AmpersandAmpersandToken),
    ("||", SyntaxKind::BarBarToken),
    ("??", SyntaxKind::QuestionQuestionToken),
    ("?.", SyntaxKind::QuestionDotToken),
    ("{", SyntaxKind::OpenBraceToken),
    ("}", SyntaxKind::CloseBraceToken),
    ("(", SyntaxKind::OpenParenToken),
    (")", SyntaxKind::CloseParenToken),
    ("[", SyntaxKind::OpenBracketToken),
    ("]", SyntaxKind::CloseBracketToken),
    (".", SyntaxKind::DotToken),
    (";", SyntaxKind::SemicolonToken),
    (",", SyntaxKind::CommaToken),
    ("<", SyntaxKind::LessThanToken),
    (">", SyntaxKind::GreaterThanToken),
    ("+", SyntaxKind::PlusToken),
    ("-", SyntaxKind::MinusToken),
    ("*", SyntaxKind::AsteriskToken),
    ("/", SyntaxKind::SlashToken),
    ("%", SyntaxKind::PercentToken),
    ("&", SyntaxKind::AmpersandToken),
    ("|", SyntaxKind::BarToken),
    ("^", SyntaxKind::CaretToken),
    ("!", SyntaxKind::ExclamationToken),
    ("~", SyntaxKind::TildeToken),
    ("?", SyntaxKind::QuestionToken),
    (":", SyntaxKind::ColonToken),
    ("@", SyntaxKind::AtToken),
    ("#", SyntaxKind::HashToken),
    ("=", SyntaxKind::EqualsToken),
];

/// Source text of a punctuation token.
#[must_use]
pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    PUNCTUATORS
        .iter()
        .find(|(_, k)| *k == kind)
        .map(|(text, _)| *text)
}
