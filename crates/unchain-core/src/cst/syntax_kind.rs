//! Syntax kind enumeration for the JavaScript CST
//!
//! This module defines all node and token types the parser produces.

use std::fmt;

/// Syntax kind for JavaScript language elements
///
/// Values are grouped in numeric ranges so classification helpers can be
/// simple range checks:
/// - Trivia (0-9)
/// - Keywords (10-99)
/// - Punctuation and operators (100-149)
/// - Assignment operators (150-169)
/// - Literals and identifiers (170-199)
/// - Statement and expression nodes (200-399)
/// - Special tokens (400+)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum JsSyntaxKind {
    // ==================
    // Trivia (0-9)
    // ==================
    /// Whitespace (spaces, tabs)
    Whitespace = 0,
    /// Line comment starting with //
    CommentLine = 1,
    /// Block comment /* ... */
    CommentBlock = 2,
    /// Newline character
    Newline = 3,

    // ==================
    // Keywords (10-99)
    // ==================
    VarKw = 10,
    LetKw = 11,
    ConstKw = 12,
    ExportKw = 13,
    FunctionKw = 14,
    ReturnKw = 15,
    IfKw = 16,
    ElseKw = 17,
    ForKw = 18,
    WhileKw = 19,
    DoKw = 20,
    BreakKw = 21,
    ContinueKw = 22,
    NewKw = 23,
    TypeofKw = 24,
    VoidKw = 25,
    DeleteKw = 26,
    InKw = 27,
    InstanceofKw = 28,
    ThisKw = 29,
    NullKw = 30,
    TrueKw = 31,
    FalseKw = 32,

    // ==================
    // Punctuation (100-149)
    // ==================
    LParen = 100,
    RParen = 101,
    LBrace = 102,
    RBrace = 103,
    LBracket = 104,
    RBracket = 105,
    Semicolon = 106,
    Comma = 107,
    Dot = 108,
    DotDotDot = 109,
    Colon = 110,
    Question = 111,
    /// `?.`
    QuestionDot = 112,
    /// `=>`
    Arrow = 113,
    Plus = 114,
    Minus = 115,
    Star = 116,
    StarStar = 117,
    Slash = 118,
    Percent = 119,
    PlusPlus = 120,
    MinusMinus = 121,
    Bang = 122,
    Tilde = 123,
    Amp = 124,
    Pipe = 125,
    Caret = 126,
    AmpAmp = 127,
    PipePipe = 128,
    QuestionQuestion = 129,
    Lt = 130,
    Gt = 131,
    LtEq = 132,
    GtEq = 133,
    EqEq = 134,
    EqEqEq = 135,
    BangEq = 136,
    BangEqEq = 137,
    /// `<<`
    Shl = 138,
    /// `>>`
    Shr = 139,
    /// `>>>`
    UShr = 140,

    // ==================
    // Assignment operators (150-169)
    // ==================
    /// Plain assignment `=`
    Eq = 150,
    PlusEq = 151,
    MinusEq = 152,
    StarEq = 153,
    SlashEq = 154,
    PercentEq = 155,
    StarStarEq = 156,
    ShlEq = 157,
    ShrEq = 158,
    UShrEq = 159,
    AmpEq = 160,
    PipeEq = 161,
    CaretEq = 162,
    AmpAmpEq = 163,
    PipePipeEq = 164,
    QuestionQuestionEq = 165,

    // ==================
    // Literals & Identifiers (170-199)
    // ==================
    Ident = 170,
    Number = 171,
    String = 172,
    /// Template literal, interpolations are not tokenized separately
    Template = 173,
    Regex = 174,

    // ==================
    // Statements (200-229)
    // ==================
    /// Root node of every parse
    Program = 200,
    ExprStmt = 201,
    /// `var`/`let`/`const` declaration, the ESTree VariableDeclaration
    VarDecl = 202,
    /// A single binding inside a declaration, the ESTree VariableDeclarator
    VarDeclarator = 203,
    Block = 204,
    IfStmt = 205,
    ForStmt = 206,
    WhileStmt = 207,
    DoWhileStmt = 208,
    ReturnStmt = 209,
    BreakStmt = 210,
    ContinueStmt = 211,
    FunctionDecl = 212,
    ParamList = 213,
    ExportDecl = 214,
    EmptyStmt = 215,

    // ==================
    // Expressions (230-299)
    // ==================
    AssignExpr = 230,
    BinaryExpr = 231,
    LogicalExpr = 232,
    ConditionalExpr = 233,
    UnaryExpr = 234,
    UpdateExpr = 235,
    CallExpr = 236,
    NewExpr = 237,
    ArgList = 238,
    MemberExpr = 239,
    IndexExpr = 240,
    /// Parenthesized expression; transparent in the ESTree view
    ParenExpr = 241,
    ArrayExpr = 242,
    ObjectExpr = 243,
    Property = 244,
    ArrowExpr = 245,
    FunctionExpr = 246,
    SequenceExpr = 247,
    NameRef = 248,
    Literal = 249,

    // ==================
    // Special tokens (400+)
    // ==================
    /// Parse error node or unrecognized character
    Error = 400,
    /// End of file
    Eof = 401,
}

impl JsSyntaxKind {
    /// Check if this is a trivia kind (whitespace, comments, newlines)
    pub const fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::CommentLine | Self::CommentBlock | Self::Newline
        )
    }

    /// Check if this is a keyword
    pub const fn is_keyword(self) -> bool {
        (self as u16) >= 10 && (self as u16) < 100
    }

    /// Check if this is punctuation (assignment operators included)
    pub const fn is_punct(self) -> bool {
        (self as u16) >= 100 && (self as u16) < 170
    }

    /// Check if this is an assignment operator, plain or compound
    pub const fn is_assign_op(self) -> bool {
        (self as u16) >= 150 && (self as u16) < 170
    }

    /// Check if this is a literal
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Number
                | Self::String
                | Self::Template
                | Self::Regex
                | Self::TrueKw
                | Self::FalseKw
                | Self::NullKw
        )
    }

    /// Check if this is a syntax node kind
    pub const fn is_node(self) -> bool {
        (self as u16) >= 200 && (self as u16) < 400
    }

    /// Check if this node kind is a statement
    pub const fn is_statement(self) -> bool {
        (self as u16) >= 200 && (self as u16) < 230 && !matches!(self, Self::Program)
    }

    /// Map identifier text to its keyword kind
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text {
            "var" => Self::VarKw,
            "let" => Self::LetKw,
            "const" => Self::ConstKw,
            "export" => Self::ExportKw,
            "function" => Self::FunctionKw,
            "return" => Self::ReturnKw,
            "if" => Self::IfKw,
            "else" => Self::ElseKw,
            "for" => Self::ForKw,
            "while" => Self::WhileKw,
            "do" => Self::DoKw,
            "break" => Self::BreakKw,
            "continue" => Self::ContinueKw,
            "new" => Self::NewKw,
            "typeof" => Self::TypeofKw,
            "void" => Self::VoidKw,
            "delete" => Self::DeleteKw,
            "in" => Self::InKw,
            "instanceof" => Self::InstanceofKw,
            "this" => Self::ThisKw,
            "null" => Self::NullKw,
            "true" => Self::TrueKw,
            "false" => Self::FalseKw,
            _ => return None,
        };
        Some(kind)
    }

    /// Get the source text of fixed-text tokens
    pub const fn token_text(self) -> Option<&'static str> {
        let text = match self {
            Self::VarKw => "var",
            Self::LetKw => "let",
            Self::ConstKw => "const",
            Self::ExportKw => "export",
            Self::FunctionKw => "function",
            Self::ReturnKw => "return",
            Self::IfKw => "if",
            Self::ElseKw => "else",
            Self::ForKw => "for",
            Self::WhileKw => "while",
            Self::DoKw => "do",
            Self::BreakKw => "break",
            Self::ContinueKw => "continue",
            Self::NewKw => "new",
            Self::TypeofKw => "typeof",
            Self::VoidKw => "void",
            Self::DeleteKw => "delete",
            Self::InKw => "in",
            Self::InstanceofKw => "instanceof",
            Self::ThisKw => "this",
            Self::NullKw => "null",
            Self::TrueKw => "true",
            Self::FalseKw => "false",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            Self::DotDotDot => "...",
            Self::Colon => ":",
            Self::Question => "?",
            Self::QuestionDot => "?.",
            Self::Arrow => "=>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::StarStar => "**",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::PlusPlus => "++",
            Self::MinusMinus => "--",
            Self::Bang => "!",
            Self::Tilde => "~",
            Self::Amp => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::AmpAmp => "&&",
            Self::PipePipe => "||",
            Self::QuestionQuestion => "??",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::EqEq => "==",
            Self::EqEqEq => "===",
            Self::BangEq => "!=",
            Self::BangEqEq => "!==",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::UShr => ">>>",
            Self::Eq => "=",
            Self::PlusEq => "+=",
            Self::MinusEq => "-=",
            Self::StarEq => "*=",
            Self::SlashEq => "/=",
            Self::PercentEq => "%=",
            Self::StarStarEq => "**=",
            Self::ShlEq => "<<=",
            Self::ShrEq => ">>=",
            Self::UShrEq => ">>>=",
            Self::AmpEq => "&=",
            Self::PipeEq => "|=",
            Self::CaretEq => "^=",
            Self::AmpAmpEq => "&&=",
            Self::PipePipeEq => "||=",
            Self::QuestionQuestionEq => "??=",
            _ => return None,
        };
        Some(text)
    }

    /// All punctuators, longest first, so the lexer can match greedily
    pub const PUNCTUATORS: &'static [JsSyntaxKind] = &[
        Self::UShrEq,
        Self::EqEqEq,
        Self::BangEqEq,
        Self::StarStarEq,
        Self::ShlEq,
        Self::ShrEq,
        Self::UShr,
        Self::AmpAmpEq,
        Self::PipePipeEq,
        Self::QuestionQuestionEq,
        Self::DotDotDot,
        Self::Arrow,
        Self::EqEq,
        Self::BangEq,
        Self::LtEq,
        Self::GtEq,
        Self::AmpAmp,
        Self::PipePipe,
        Self::QuestionQuestion,
        Self::QuestionDot,
        Self::PlusPlus,
        Self::MinusMinus,
        Self::StarStar,
        Self::Shl,
        Self::Shr,
        Self::PlusEq,
        Self::MinusEq,
        Self::StarEq,
        Self::SlashEq,
        Self::PercentEq,
        Self::AmpEq,
        Self::PipeEq,
        Self::CaretEq,
        Self::LParen,
        Self::RParen,
        Self::LBrace,
        Self::RBrace,
        Self::LBracket,
        Self::RBracket,
        Self::Semicolon,
        Self::Comma,
        Self::Dot,
        Self::Colon,
        Self::Question,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::Percent,
        Self::Bang,
        Self::Tilde,
        Self::Amp,
        Self::Pipe,
        Self::Caret,
        Self::Lt,
        Self::Gt,
        Self::Eq,
    ];
}

impl fmt::Display for JsSyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_text() {
            Some(text) => write!(f, "'{text}'"),
            None => write!(f, "{self:?}"),
        }
    }
}

impl From<JsSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: JsSyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trivia_classification() {
        assert!(JsSyntaxKind::Whitespace.is_trivia());
        assert!(JsSyntaxKind::CommentBlock.is_trivia());
        assert!(!JsSyntaxKind::Ident.is_trivia());
    }

    #[test]
    fn test_assignment_operator_classification() {
        assert!(JsSyntaxKind::Eq.is_assign_op());
        assert!(JsSyntaxKind::QuestionQuestionEq.is_assign_op());
        assert!(!JsSyntaxKind::EqEq.is_assign_op());
        assert!(!JsSyntaxKind::Arrow.is_assign_op());
        assert!(!JsSyntaxKind::LtEq.is_assign_op());
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(JsSyntaxKind::from_keyword("var"), Some(JsSyntaxKind::VarKw));
        assert_eq!(JsSyntaxKind::from_keyword("foo"), None);
        assert!(JsSyntaxKind::ExportKw.is_keyword());
    }

    #[test]
    fn test_punctuators_are_longest_first() {
        for (i, kind) in JsSyntaxKind::PUNCTUATORS.iter().enumerate() {
            let text = kind.token_text().unwrap();
            for later in &JsSyntaxKind::PUNCTUATORS[i + 1..] {
                let later_text = later.token_text().unwrap();
                assert!(
                    !later_text.starts_with(text) || later_text == text,
                    "{later_text} would be shadowed by {text}"
                );
            }
        }
    }

    #[test]
    fn test_statement_classification() {
        assert!(JsSyntaxKind::ExprStmt.is_statement());
        assert!(JsSyntaxKind::VarDecl.is_statement());
        assert!(!JsSyntaxKind::Program.is_statement());
        assert!(!JsSyntaxKind::AssignExpr.is_statement());
    }
}
