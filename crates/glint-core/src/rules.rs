//! Token kind to CSS class table.
//!
//! Every class is `"{group} {kind-name}"`, so a stylesheet can target a whole
//! group (`.keyword`) or one kind (`.keyword.new`). A handful of kinds are
//! renamed outright, and kinds the table does not list pass through under
//! their own name.
//!
//! This table and the tokenizer are the only grammar-specific parts of the
//! highlighter.

use std::borrow::Cow;

use glint_lexer::TokenKind;

/// How a kind is turned into a class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    /// `"{group} {kind-name}"`.
    Prefixed(&'static str),
    /// A fixed class replacing the kind name.
    Renamed(&'static str),
    /// The kind name alone.
    Verbatim,
}

fn group(kind: TokenKind) -> Group {
    use TokenKind::*;
    match kind {
        Abstract | Array | As | Class | Clone | Const | Declare | Default | Echo | Enddeclare
        | Enum | Extends | Final | Fn | Function | Global | Implements | Include | IncludeOnce
        | Insteadof | Interface | Namespace | New | Print | Private | Protected | Public
        | Readonly | Require | RequireOnce | Static | Trait | Use | Var => Group::Prefixed("keyword"),

        Break | Case | Catch | Continue | Do | Else | Elseif | Endfor | Endforeach | Endif
        | Endswitch | Endwhile | Exit | Finally | For | Foreach | Goto | If | Match | Return
        | Switch | Throw | Try | While | Yield | YieldFrom => Group::Prefixed("keyword flow"),

        Callable => Group::Prefixed("type"),

        ArrayCast | BoolCast | DoubleCast | IntCast | ObjectCast | StringCast | UnsetCast => {
            Group::Prefixed("cast")
        }

        CloseTag | OpenTag | OpenTagWithEcho => Group::Prefixed("tag"),

        AndEqual | BooleanAnd | BooleanOr | Coalesce | CoalesceEqual | ConcatEqual | Dec
        | DivEqual | Inc | IsEqual | IsGreaterOrEqual | IsIdentical | IsNotEqual
        | IsNotIdentical | IsSmallerOrEqual | Spaceship | LogicalAnd | LogicalOr | LogicalXor
        | MinusEqual | ModEqual | MulEqual | OrEqual | PaamayimNekudotayim | PlusEqual | Pow
        | PowEqual | Sl | SlEqual | Sr | SrEqual | XorEqual => Group::Prefixed("operator"),

        Ellipsis | Instanceof => Group::Prefixed("operator special"),

        BadCharacter => Group::Prefixed("char"),

        ClassC | Dir | File | FuncC | Line | MethodC | NsC | TraitC => Group::Prefixed("constant"),

        Empty | Eval | HaltCompiler | Isset | List | Unset => Group::Prefixed("func"),

        NumString | StringVarname | Variable => Group::Prefixed("var"),

        EncapsedAndWhitespace | ConstantEncapsedString => Group::Prefixed("string"),

        Dnumber => Group::Renamed("float"),
        Lnumber => Group::Renamed("int"),

        CurlyOpen | DollarOpenCurlyBraces | DoubleArrow | EndHeredoc | NsSeparator
        | ObjectOperator | NullsafeObjectOperator | StartHeredoc | Whitespace => {
            Group::Prefixed("g")
        }

        Comment => Group::Renamed("comment"),
        DocComment => Group::Prefixed("comment"),

        InlineHtml => Group::Renamed("html"),
        String => Group::Renamed("name"),

        _ => Group::Verbatim,
    }
}

/// Returns the class attribute value for a token of `kind`.
pub fn class_for(kind: TokenKind) -> Cow<'static, str> {
    match group(kind) {
        Group::Prefixed(prefix) => Cow::Owned(format!("{prefix} {}", kind.name())),
        Group::Renamed(class) => Cow::Borrowed(class),
        Group::Verbatim => Cow::Borrowed(kind.name()),
    }
}

/// Class for bare punctuation characters.
pub const PUNCTUATION_CLASS: &str = "g";
