//! Token model produced by the PHP tokenizer.
//!
//! ## Learning: Enums as Closed Vocabularies
//!
//! Every structural token carries a [`TokenKind`]. Because the enum is
//! closed, a `match` over it is checked for exhaustiveness by the compiler,
//! which is what lets the classification table downstream stay complete.

use std::fmt;

/// Kind tag of a structural token.
///
/// Names follow the PHP-7 token vocabulary: qualified names are split into
/// [`TokenKind::String`] segments joined by [`TokenKind::NsSeparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Markup boundaries
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    InlineHtml,

    // Trivia
    Whitespace,
    Comment,
    DocComment,

    // Names and literals
    Variable,
    String,
    ConstantEncapsedString,
    EncapsedAndWhitespace,
    StringVarname,
    NumString,
    CurlyOpen,
    DollarOpenCurlyBraces,
    StartHeredoc,
    EndHeredoc,
    Lnumber,
    Dnumber,

    // Keywords
    Abstract,
    Array,
    As,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    Do,
    Echo,
    Else,
    Elseif,
    Empty,
    Enddeclare,
    Endfor,
    Endforeach,
    Endif,
    Endswitch,
    Endwhile,
    Enum,
    Eval,
    Exit,
    Extends,
    Final,
    Finally,
    Fn,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    HaltCompiler,
    If,
    Implements,
    Include,
    IncludeOnce,
    Instanceof,
    Insteadof,
    Interface,
    Isset,
    List,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Match,
    Namespace,
    New,
    Print,
    Private,
    Protected,
    Public,
    Readonly,
    Require,
    RequireOnce,
    Return,
    Static,
    Switch,
    Throw,
    Trait,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,
    YieldFrom,

    // Magic constants
    ClassC,
    Dir,
    File,
    FuncC,
    Line,
    MethodC,
    NsC,
    TraitC,

    // Casts
    ArrayCast,
    BoolCast,
    DoubleCast,
    IntCast,
    ObjectCast,
    StringCast,
    UnsetCast,

    // Operators
    AndEqual,
    BooleanAnd,
    BooleanOr,
    Coalesce,
    CoalesceEqual,
    ConcatEqual,
    Dec,
    DivEqual,
    Inc,
    IsEqual,
    IsGreaterOrEqual,
    IsIdentical,
    IsNotEqual,
    IsNotIdentical,
    IsSmallerOrEqual,
    Spaceship,
    MinusEqual,
    ModEqual,
    MulEqual,
    OrEqual,
    PaamayimNekudotayim,
    PlusEqual,
    Pow,
    PowEqual,
    Sl,
    SlEqual,
    Sr,
    SrEqual,
    XorEqual,
    Ellipsis,
    DoubleArrow,
    ObjectOperator,
    NullsafeObjectOperator,
    NsSeparator,
    Attribute,

    BadCharacter,
}

impl TokenKind {
    /// Returns the lowercase, hyphenated name of this kind.
    ///
    /// This is the name the markup carries as its most specific class.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            OpenTag => "open-tag",
            OpenTagWithEcho => "open-tag-with-echo",
            CloseTag => "close-tag",
            InlineHtml => "inline-html",
            Whitespace => "whitespace",
            Comment => "comment",
            DocComment => "doc-comment",
            Variable => "variable",
            String => "string",
            ConstantEncapsedString => "constant-encapsed-string",
            EncapsedAndWhitespace => "encapsed-and-whitespace",
            StringVarname => "string-varname",
            NumString => "num-string",
            CurlyOpen => "curly-open",
            DollarOpenCurlyBraces => "dollar-open-curly-braces",
            StartHeredoc => "start-heredoc",
            EndHeredoc => "end-heredoc",
            Lnumber => "lnumber",
            Dnumber => "dnumber",
            Abstract => "abstract",
            Array => "array",
            As => "as",
            Break => "break",
            Callable => "callable",
            Case => "case",
            Catch => "catch",
            Class => "class",
            Clone => "clone",
            Const => "const",
            Continue => "continue",
            Declare => "declare",
            Default => "default",
            Do => "do",
            Echo => "echo",
            Else => "else",
            Elseif => "elseif",
            Empty => "empty",
            Enddeclare => "enddeclare",
            Endfor => "endfor",
            Endforeach => "endforeach",
            Endif => "endif",
            Endswitch => "endswitch",
            Endwhile => "endwhile",
            Enum => "enum",
            Eval => "eval",
            Exit => "exit",
            Extends => "extends",
            Final => "final",
            Finally => "finally",
            Fn => "fn",
            For => "for",
            Foreach => "foreach",
            Function => "function",
            Global => "global",
            Goto => "goto",
            HaltCompiler => "halt-compiler",
            If => "if",
            Implements => "implements",
            Include => "include",
            IncludeOnce => "include-once",
            Instanceof => "instanceof",
            Insteadof => "insteadof",
            Interface => "interface",
            Isset => "isset",
            List => "list",
            LogicalAnd => "logical-and",
            LogicalOr => "logical-or",
            LogicalXor => "logical-xor",
            Match => "match",
            Namespace => "namespace",
            New => "new",
            Print => "print",
            Private => "private",
            Protected => "protected",
            Public => "public",
            Readonly => "readonly",
            Require => "require",
            RequireOnce => "require-once",
            Return => "return",
            Static => "static",
            Switch => "switch",
            Throw => "throw",
            Trait => "trait",
            Try => "try",
            Unset => "unset",
            Use => "use",
            Var => "var",
            While => "while",
            Yield => "yield",
            YieldFrom => "yield-from",
            ClassC => "class-c",
            Dir => "dir",
            File => "file",
            FuncC => "func-c",
            Line => "line",
            MethodC => "method-c",
            NsC => "ns-c",
            TraitC => "trait-c",
            ArrayCast => "array-cast",
            BoolCast => "bool-cast",
            DoubleCast => "double-cast",
            IntCast => "int-cast",
            ObjectCast => "object-cast",
            StringCast => "string-cast",
            UnsetCast => "unset-cast",
            AndEqual => "and-equal",
            BooleanAnd => "boolean-and",
            BooleanOr => "boolean-or",
            Coalesce => "coalesce",
            CoalesceEqual => "coalesce-equal",
            ConcatEqual => "concat-equal",
            Dec => "dec",
            DivEqual => "div-equal",
            Inc => "inc",
            IsEqual => "is-equal",
            IsGreaterOrEqual => "is-greater-or-equal",
            IsIdentical => "is-identical",
            IsNotEqual => "is-not-equal",
            IsNotIdentical => "is-not-identical",
            IsSmallerOrEqual => "is-smaller-or-equal",
            Spaceship => "spaceship",
            MinusEqual => "minus-equal",
            ModEqual => "mod-equal",
            MulEqual => "mul-equal",
            OrEqual => "or-equal",
            PaamayimNekudotayim => "paamayim-nekudotayim",
            PlusEqual => "plus-equal",
            Pow => "pow",
            PowEqual => "pow-equal",
            Sl => "sl",
            SlEqual => "sl-equal",
            Sr => "sr",
            SrEqual => "sr-equal",
            XorEqual => "xor-equal",
            Ellipsis => "ellipsis",
            DoubleArrow => "double-arrow",
            ObjectOperator => "object-operator",
            NullsafeObjectOperator => "nullsafe-object-operator",
            NsSeparator => "ns-separator",
            Attribute => "attribute",
            BadCharacter => "bad-character",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structural token with its raw text and 1-based start line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, preserved exactly as scanned.
    pub text: String,
    /// Line on which the token starts.
    pub line: usize,
}

impl Token {
    /// Creates a token value.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Returns the line on which the token's text ends.
    pub fn end_line(&self) -> usize {
        self.line + self.text.matches('\n').count()
    }
}

/// One element of the token stream.
///
/// Single-character punctuation is not given a kind of its own; it appears
/// as a bare [`Lexeme::Char`] and inherits the line of its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    Token(Token),
    Char(char),
}

impl Lexeme {
    /// Returns the kind of a structural token, or `None` for bare characters.
    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            Lexeme::Token(token) => Some(token.kind),
            Lexeme::Char(_) => None,
        }
    }

    /// Returns true if this is a structural token of `kind`.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind() == Some(kind)
    }

    /// Returns true if this is the bare character `c`.
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Lexeme::Char(found) if *found == c)
    }

    /// Returns the structural token, if any.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Lexeme::Token(token) => Some(token),
            Lexeme::Char(_) => None,
        }
    }

    /// Appends the source text of this lexeme to `out`.
    pub fn write_text(&self, out: &mut String) {
        match self {
            Lexeme::Token(token) => out.push_str(&token.text),
            Lexeme::Char(c) => out.push(*c),
        }
    }
}

impl From<Token> for Lexeme {
    fn from(token: Token) -> Self {
        Lexeme::Token(token)
    }
}
