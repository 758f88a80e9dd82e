//! Rowan language implementation for JavaScript
//!
//! Connects the `JsSyntaxKind` enum to Rowan's generic CST infrastructure.

use rowan::Language;

use super::JsSyntaxKind;

/// Language marker for the JavaScript CST
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsLanguage;

impl Language for JsLanguage {
    type Kind = JsSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        match raw.0 {
            // Trivia
            0 => JsSyntaxKind::Whitespace,
            1 => JsSyntaxKind::CommentLine,
            2 => JsSyntaxKind::CommentBlock,
            3 => JsSyntaxKind::Newline,

            // Keywords
            10 => JsSyntaxKind::VarKw,
            11 => JsSyntaxKind::LetKw,
            12 => JsSyntaxKind::ConstKw,
            13 => JsSyntaxKind::ExportKw,
            14 => JsSyntaxKind::FunctionKw,
            15 => JsSyntaxKind::ReturnKw,
            16 => JsSyntaxKind::IfKw,
            17 => JsSyntaxKind::ElseKw,
            18 => JsSyntaxKind::ForKw,
            19 => JsSyntaxKind::WhileKw,
            20 => JsSyntaxKind::DoKw,
            21 => JsSyntaxKind::BreakKw,
            22 => JsSyntaxKind::ContinueKw,
            23 => JsSyntaxKind::NewKw,
            24 => JsSyntaxKind::TypeofKw,
            25 => JsSyntaxKind::VoidKw,
            26 => JsSyntaxKind::DeleteKw,
            27 => JsSyntaxKind::InKw,
            28 => JsSyntaxKind::InstanceofKw,
            29 => JsSyntaxKind::ThisKw,
            30 => JsSyntaxKind::NullKw,
            31 => JsSyntaxKind::TrueKw,
            32 => JsSyntaxKind::FalseKw,

            // Punctuation
            100 => JsSyntaxKind::LParen,
            101 => JsSyntaxKind::RParen,
            102 => JsSyntaxKind::LBrace,
            103 => JsSyntaxKind::RBrace,
            104 => JsSyntaxKind::LBracket,
            105 => JsSyntaxKind::RBracket,
            106 => JsSyntaxKind::Semicolon,
            107 => JsSyntaxKind::Comma,
            108 => JsSyntaxKind::Dot,
            109 => JsSyntaxKind::DotDotDot,
            110 => JsSyntaxKind::Colon,
            111 => JsSyntaxKind::Question,
            112 => JsSyntaxKind::QuestionDot,
            113 => JsSyntaxKind::Arrow,
            114 => JsSyntaxKind::Plus,
            115 => JsSyntaxKind::Minus,
            116 => JsSyntaxKind::Star,
            117 => JsSyntaxKind::StarStar,
            118 => JsSyntaxKind::Slash,
            119 => JsSyntaxKind::Percent,
            120 => JsSyntaxKind::PlusPlus,
            121 => JsSyntaxKind::MinusMinus,
            122 => JsSyntaxKind::Bang,
            123 => JsSyntaxKind::Tilde,
            124 => JsSyntaxKind::Amp,
            125 => JsSyntaxKind::Pipe,
            126 => JsSyntaxKind::Caret,
            127 => JsSyntaxKind::AmpAmp,
            128 => JsSyntaxKind::PipePipe,
            129 => JsSyntaxKind::QuestionQuestion,
            130 => JsSyntaxKind::Lt,
            131 => JsSyntaxKind::Gt,
            132 => JsSyntaxKind::LtEq,
            133 => JsSyntaxKind::GtEq,
            134 => JsSyntaxKind::EqEq,
            135 => JsSyntaxKind::EqEqEq,
            136 => JsSyntaxKind::BangEq,
            137 => JsSyntaxKind::BangEqEq,
            138 => JsSyntaxKind::Shl,
            139 => JsSyntaxKind::Shr,
            140 => JsSyntaxKind::UShr,

            // Assignment operators
            150 => JsSyntaxKind::Eq,
            151 => JsSyntaxKind::PlusEq,
            152 => JsSyntaxKind::MinusEq,
            153 => JsSyntaxKind::StarEq,
            154 => JsSyntaxKind::SlashEq,
            155 => JsSyntaxKind::PercentEq,
            156 => JsSyntaxKind::StarStarEq,
            157 => JsSyntaxKind::ShlEq,
            158 => JsSyntaxKind::ShrEq,
            159 => JsSyntaxKind::UShrEq,
            160 => JsSyntaxKind::AmpEq,
            161 => JsSyntaxKind::PipeEq,
            162 => JsSyntaxKind::CaretEq,
            163 => JsSyntaxKind::AmpAmpEq,
            164 => JsSyntaxKind::PipePipeEq,
            165 => JsSyntaxKind::QuestionQuestionEq,

            // Literals & identifiers
            170 => JsSyntaxKind::Ident,
            171 => JsSyntaxKind::Number,
            172 => JsSyntaxKind::String,
            173 => JsSyntaxKind::Template,
            174 => JsSyntaxKind::Regex,

            // Statements
            200 => JsSyntaxKind::Program,
            201 => JsSyntaxKind::ExprStmt,
            202 => JsSyntaxKind::VarDecl,
            203 => JsSyntaxKind::VarDeclarator,
            204 => JsSyntaxKind::Block,
            205 => JsSyntaxKind::IfStmt,
            206 => JsSyntaxKind::ForStmt,
            207 => JsSyntaxKind::WhileStmt,
            208 => JsSyntaxKind::DoWhileStmt,
            209 => JsSyntaxKind::ReturnStmt,
            210 => JsSyntaxKind::BreakStmt,
            211 => JsSyntaxKind::ContinueStmt,
            212 => JsSyntaxKind::FunctionDecl,
            213 => JsSyntaxKind::ParamList,
            214 => JsSyntaxKind::ExportDecl,
            215 => JsSyntaxKind::EmptyStmt,

            // Expressions
            230 => JsSyntaxKind::AssignExpr,
            231 => JsSyntaxKind::BinaryExpr,
            232 => JsSyntaxKind::LogicalExpr,
            233 => JsSyntaxKind::ConditionalExpr,
            234 => JsSyntaxKind::UnaryExpr,
            235 => JsSyntaxKind::UpdateExpr,
            236 => JsSyntaxKind::CallExpr,
            237 => JsSyntaxKind::NewExpr,
            238 => JsSyntaxKind::ArgList,
            239 => JsSyntaxKind::MemberExpr,
            240 => JsSyntaxKind::IndexExpr,
            241 => JsSyntaxKind::ParenExpr,
            242 => JsSyntaxKind::ArrayExpr,
            243 => JsSyntaxKind::ObjectExpr,
            244 => JsSyntaxKind::Property,
            245 => JsSyntaxKind::ArrowExpr,
            246 => JsSyntaxKind::FunctionExpr,
            247 => JsSyntaxKind::SequenceExpr,
            248 => JsSyntaxKind::NameRef,
            249 => JsSyntaxKind::Literal,

            // Special tokens
            400 => JsSyntaxKind::Error,
            401 => JsSyntaxKind::Eof,

            // Only kinds produced by `kind_to_raw` ever reach the tree
            _ => JsSyntaxKind::Error,
        }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        let kinds = [
            JsSyntaxKind::Whitespace,
            JsSyntaxKind::VarKw,
            JsSyntaxKind::Ident,
            JsSyntaxKind::Eq,
            JsSyntaxKind::QuestionQuestionEq,
            JsSyntaxKind::Program,
            JsSyntaxKind::AssignExpr,
            JsSyntaxKind::ParenExpr,
            JsSyntaxKind::Eof,
        ];

        for &kind in &kinds {
            let raw = JsLanguage::kind_to_raw(kind);
            let back = JsLanguage::kind_from_raw(raw);
            assert_eq!(kind, back, "Roundtrip failed for {kind:?}");
        }
    }

    #[test]
    fn test_kind_values() {
        assert_eq!(JsLanguage::kind_to_raw(JsSyntaxKind::Whitespace).0, 0);
        assert_eq!(JsLanguage::kind_to_raw(JsSyntaxKind::VarKw).0, 10);
        assert_eq!(JsLanguage::kind_to_raw(JsSyntaxKind::Eq).0, 150);
        assert_eq!(JsLanguage::kind_to_raw(JsSyntaxKind::Program).0, 200);
    }

    #[test]
    fn test_unknown_raw_kind_maps_to_error() {
        assert_eq!(
            JsLanguage::kind_from_raw(rowan::SyntaxKind(9999)),
            JsSyntaxKind::Error
        );
    }
}
