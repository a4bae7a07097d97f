use std::fmt;
use std::rc::Rc;

use crate::interpreter::lexer::{Token, TokenKind};

/// Binary operators of the language.
///
/// `|>` and `::` are parsed as ordinary infix operators but are given special
/// treatment by the evaluator: the pipe rewrites its right-hand call and the
/// slice operator constructs a half-open range value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Lt,
    Gt,
    Lte,
    Gte,
    Eq,
    Neq,
    DeepEq,
    DeepNeq,
    Concat,
    And,
    Or,
    Pipe,
    Slice,
}

impl InfixOp {
    /// Maps a token kind to its corresponding infix operator.
    ///
    /// Returns `None` for all tokens that cannot appear in infix position.
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Asterisk => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            TokenKind::Mod => Some(Self::Mod),
            TokenKind::Pow => Some(Self::Pow),
            TokenKind::Lt => Some(Self::Lt),
            TokenKind::Gt => Some(Self::Gt),
            TokenKind::Lte => Some(Self::Lte),
            TokenKind::Gte => Some(Self::Gte),
            TokenKind::Eq => Some(Self::Eq),
            TokenKind::Neq => Some(Self::Neq),
            TokenKind::DeepEq => Some(Self::DeepEq),
            TokenKind::DeepNeq => Some(Self::DeepNeq),
            TokenKind::Concat => Some(Self::Concat),
            TokenKind::And => Some(Self::And),
            TokenKind::Or => Some(Self::Or),
            TokenKind::Pipe => Some(Self::Pipe),
            TokenKind::ColonColon => Some(Self::Slice),
            _ => None,
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Eq => "==",
            Self::Neq => "!=",
            Self::DeepEq => "===",
            Self::DeepNeq => "!==",
            Self::Concat => "++",
            Self::And => "and",
            Self::Or => "or",
            Self::Pipe => "|>",
            Self::Slice => "::",
        };
        f.write_str(symbol)
    }
}

/// Unary prefix operators: numeric negation and logical not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Neg,
    Not,
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Neg => "-",
            Self::Not => "!",
        })
    }
}

/// A plain identifier with its originating token.
///
/// Used for function names and parameters, where only a name (never a
/// pattern) is permitted.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub token: Token,
    pub name:  String,
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A brace-delimited ordered sequence of statements.
///
/// Single-expression bodies (`cond`/`case` arms, `\x => expr` lambdas) are
/// lifted into a one-statement block by the parser so evaluation has a single
/// body shape to deal with.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub token:      Token,
    pub statements: Vec<Statement>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}

/// One `condition => body` arm of a `cond` or `case` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Arm {
    pub condition: Expr,
    pub body:      Block,
}

/// Defines the structure of parsed expressions.
///
/// Every variant carries the token it originates from, giving each node a
/// file/line/column for error reporting. Nodes are immutable after parsing;
/// the evaluator clones subtrees where it needs to rewrite (pipe calls) and
/// never mutates them in place.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier {
        token: Token,
        name:  String,
    },
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    FloatLiteral {
        token: Token,
        value: f64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    /// `$"…"`; segments alternate between plain strings and embedded
    /// expressions, in source order.
    InterpolatedString {
        token:    Token,
        segments: Vec<Expr>,
    },
    AtomLiteral {
        token: Token,
        value: String,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    ArrayLiteral {
        token:    Token,
        elements: Vec<Expr>,
    },
    TupleLiteral {
        token:    Token,
        elements: Vec<Expr>,
    },
    /// Pairs are kept in source order so evaluation observes insertion order.
    MapLiteral {
        token: Token,
        pairs: Vec<(Expr, Expr)>,
    },
    /// `{ base with k = v … }`
    MapUpdate {
        token: Token,
        base:  Box<Expr>,
        pairs: Vec<(Expr, Expr)>,
    },
    Prefix {
        token:    Token,
        operator: PrefixOp,
        right:    Box<Expr>,
    },
    Infix {
        token:    Token,
        operator: InfixOp,
        left:     Box<Expr>,
        right:    Box<Expr>,
    },
    If {
        token:       Token,
        condition:   Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    Cond {
        token: Token,
        arms:  Vec<Arm>,
    },
    Case {
        token:   Token,
        subject: Box<Expr>,
        arms:    Vec<Arm>,
    },
    /// `\x y => body`; parameters and body are shared so closing over them
    /// at evaluation time is a pointer copy.
    FunctionLiteral {
        token:      Token,
        parameters: Rc<Vec<Ident>>,
        body:       Rc<Block>,
    },
    Call {
        token:     Token,
        function:  Box<Expr>,
        arguments: Vec<Expr>,
    },
    Index {
        token: Token,
        left:  Box<Expr>,
        index: Box<Expr>,
    },
    /// `left.right` where `right` is an identifier or a call.
    PropertyAccess {
        token: Token,
        left:  Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// The token this node originates from.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Identifier { token, .. }
            | Self::IntegerLiteral { token, .. }
            | Self::FloatLiteral { token, .. }
            | Self::StringLiteral { token, .. }
            | Self::InterpolatedString { token, .. }
            | Self::AtomLiteral { token, .. }
            | Self::BooleanLiteral { token, .. }
            | Self::ArrayLiteral { token, .. }
            | Self::TupleLiteral { token, .. }
            | Self::MapLiteral { token, .. }
            | Self::MapUpdate { token, .. }
            | Self::Prefix { token, .. }
            | Self::Infix { token, .. }
            | Self::If { token, .. }
            | Self::Cond { token, .. }
            | Self::Case { token, .. }
            | Self::FunctionLiteral { token, .. }
            | Self::Call { token, .. }
            | Self::Index { token, .. }
            | Self::PropertyAccess { token, .. } => token,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => f.write_str(name),
            Self::IntegerLiteral { token, .. } | Self::FloatLiteral { token, .. } => {
                f.write_str(&token.literal)
            },
            Self::StringLiteral { value, .. } => write!(f, "\"{value}\""),
            Self::InterpolatedString { segments, .. } => {
                write!(f, "$\"")?;
                for segment in segments {
                    match segment {
                        Self::StringLiteral { value, .. } => f.write_str(value)?,
                        other => write!(f, "{{{other}}}")?,
                    }
                }
                write!(f, "\"")
            },
            Self::AtomLiteral { value, .. } => write!(f, ":{value}"),
            Self::BooleanLiteral { value, .. } => write!(f, "{value}"),
            Self::ArrayLiteral { elements, .. } => {
                write!(f, "[{}]", join(elements, ", "))
            },
            Self::TupleLiteral { elements, .. } => {
                write!(f, "({})", join(elements, ", "))
            },
            Self::MapLiteral { pairs, .. } => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, "}}")
            },
            Self::MapUpdate { base, pairs, .. } => {
                write!(f, "{{{base} with ")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, "}}")
            },
            Self::Prefix { operator, right, .. } => write!(f, "({operator}{right})"),
            Self::Infix { operator, left, right, .. } => write!(f, "({left} {operator} {right})"),
            Self::If { condition, consequence, alternative, .. } => {
                write!(f, "if {condition} {consequence}")?;
                if let Some(alternative) = alternative {
                    write!(f, " else {alternative}")?;
                }
                Ok(())
            },
            Self::Cond { arms, .. } => {
                write!(f, "cond {{ ")?;
                for arm in arms {
                    write!(f, "{} => {} ", arm.condition, arm.body)?;
                }
                write!(f, "}}")
            },
            Self::Case { subject, arms, .. } => {
                write!(f, "case {subject} {{ ")?;
                for arm in arms {
                    write!(f, "{} => {} ", arm.condition, arm.body)?;
                }
                write!(f, "}}")
            },
            Self::FunctionLiteral { parameters, body, .. } => {
                let params = parameters.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "\\{} => {body}", params.join(" "))
            },
            Self::Call { function, arguments, .. } => {
                write!(f, "{function}({})", join(arguments, " "))
            },
            Self::Index { left, index, .. } => write!(f, "({left} @ {index})"),
            Self::PropertyAccess { left, right, .. } => write!(f, "{left}.{right}"),
        }
    }
}

fn join(exprs: &[Expr], separator: &str) -> String {
    exprs.iter().map(ToString::to_string).collect::<Vec<_>>().join(separator)
}

/// Defines the structure of parsed statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let pattern = value`; the pattern may be an identifier or a
    /// destructuring tuple/array/map literal.
    Let {
        token:   Token,
        pattern: Expr,
        value:   Expr,
    },
    Return {
        token: Token,
        value: Expr,
    },
    Expression {
        token:      Token,
        expression: Expr,
    },
    /// `fn name(params) { body }`
    Function {
        token:      Token,
        name:       Ident,
        parameters: Rc<Vec<Ident>>,
        body:       Rc<Block>,
    },
    /// `module Name` followed by the rest of the file as its body.
    Module {
        token: Token,
        name:  Ident,
        body:  Vec<Statement>,
    },
}

impl Statement {
    /// The token this node originates from.
    #[must_use]
    pub const fn token(&self) -> &Token {
        match self {
            Self::Let { token, .. }
            | Self::Return { token, .. }
            | Self::Expression { token, .. }
            | Self::Function { token, .. }
            | Self::Module { token, .. } => token,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Let { pattern, value, .. } => write!(f, "let {pattern} = {value}"),
            Self::Return { value, .. } => write!(f, "return {value}"),
            Self::Expression { expression, .. } => write!(f, "{expression}"),
            Self::Function { name, parameters, body, .. } => {
                let params = parameters.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "fn {name}({}) {body}", params.join(" "))
            },
            Self::Module { name, body, .. } => {
                write!(f, "module {name} ")?;
                for statement in body {
                    write!(f, "{statement}")?;
                }
                Ok(())
            },
        }
    }
}

/// A parsed source file: an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
