//! Reserved word and cast tables.

use crate::token::TokenKind;

/// Looks up a reserved word. PHP keywords are case-insensitive.
pub(crate) fn keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match word.to_ascii_lowercase().as_str() {
        "abstract" => Abstract,
        "and" => LogicalAnd,
        "array" => Array,
        "as" => As,
        "break" => Break,
        "callable" => Callable,
        "case" => Case,
        "catch" => Catch,
        "class" => Class,
        "clone" => Clone,
        "const" => Const,
        "continue" => Continue,
        "declare" => Declare,
        "default" => Default,
        "die" | "exit" => Exit,
        "do" => Do,
        "echo" => Echo,
        "else" => Else,
        "elseif" => Elseif,
        "empty" => Empty,
        "enddeclare" => Enddeclare,
        "endfor" => Endfor,
        "endforeach" => Endforeach,
        "endif" => Endif,
        "endswitch" => Endswitch,
        "endwhile" => Endwhile,
        "eval" => Eval,
        "extends" => Extends,
        "final" => Final,
        "finally" => Finally,
        "fn" => Fn,
        "for" => For,
        "foreach" => Foreach,
        "function" => Function,
        "global" => Global,
        "goto" => Goto,
        "if" => If,
        "implements" => Implements,
        "include" => Include,
        "include_once" => IncludeOnce,
        "instanceof" => Instanceof,
        "insteadof" => Insteadof,
        "interface" => Interface,
        "isset" => Isset,
        "list" => List,
        "match" => Match,
        "namespace" => Namespace,
        "new" => New,
        "or" => LogicalOr,
        "print" => Print,
        "private" => Private,
        "protected" => Protected,
        "public" => Public,
        "readonly" => Readonly,
        "require" => Require,
        "require_once" => RequireOnce,
        "return" => Return,
        "static" => Static,
        "switch" => Switch,
        "throw" => Throw,
        "trait" => Trait,
        "try" => Try,
        "unset" => Unset,
        "use" => Use,
        "var" => Var,
        "while" => While,
        "xor" => LogicalXor,
        "yield" => Yield,
        "__class__" => ClassC,
        "__dir__" => Dir,
        "__file__" => File,
        "__function__" => FuncC,
        "__line__" => Line,
        "__method__" => MethodC,
        "__namespace__" => NsC,
        "__trait__" => TraitC,
        "__halt_compiler" => HaltCompiler,
        _ => return None,
    };
    Some(kind)
}

/// Looks up the type name inside a cast such as `(int)`.
pub(crate) fn cast(name: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match name.to_ascii_lowercase().as_str() {
        "int" | "integer" => IntCast,
        "bool" | "boolean" => BoolCast,
        "float" | "double" | "real" => DoubleCast,
        "string" | "binary" => StringCast,
        "array" => ArrayCast,
        "object" => ObjectCast,
        "unset" => UnsetCast,
        _ => return None,
    };
    Some(kind)
}
