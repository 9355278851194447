//! Formula system for skill and item effect values.
//!
//! Content writes formulas as arithmetic strings over the attacker's and the
//! defender's attributes. They are parsed once, when the ruleset loads, so an
//! unknown attribute is a load error rather than a silent zero in combat.
//!
//! ## Examples
//!
//! ```text
//! attacker.attack_power * 1.5
//! spell_power * 2 + 30                      // bare names read the attacker
//! max(defender.max_health * 0.1, 50)
//! caster.missing_health * 0.5 + target.defense
//! ```
//!
//! Operands: any attribute name, `health` / `mana` / `stamina` (current),
//! `missing_health`, and `realm` (tier index). Prefixes `attacker.`, `caster.`,
//! `self.` read the acting side; `defender.` and `target.` the receiving side.

pub mod evaluate;
pub mod parse;

pub use evaluate::FormulaContext;

use crate::error::{ErrorSeverity, GameError};
use crate::stats::{Attribute, ResourceKind};

/// Which side of the exchange an operand reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Attacker,
    Defender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Attribute(Attribute),
    Current(ResourceKind),
    MissingHealth,
    RealmIndex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Parsed expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Constant(f64),
    Value(Side, Operand),
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Min(Vec<Expr>),
    Max(Vec<Expr>),
}

/// A parsed formula that remembers its source text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let expr = parse::parse(source)?;
        Ok(Self {
            source: source.to_owned(),
            expr,
        })
    }

    /// A formula that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            source: value.to_string(),
            expr: Expr::Constant(value),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn evaluate(&self, ctx: &FormulaContext<'_>) -> f64 {
        evaluate::evaluate(&self.expr, ctx)
    }
}

impl TryFrom<String> for Formula {
    type Error = FormulaError;

    fn try_from(source: String) -> Result<Self, Self::Error> {
        let expr = parse::parse(&source)?;
        Ok(Self { source, expr })
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> Self {
        formula.source
    }
}

impl core::fmt::Display for Formula {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.source)
    }
}

/// Errors raised while parsing formula text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    #[error("unexpected character `{found}` at offset {offset}")]
    UnexpectedChar { offset: usize, found: char },

    #[error("unexpected `{found}` at offset {offset}")]
    UnexpectedToken { offset: usize, found: String },

    #[error("formula ended unexpectedly")]
    UnexpectedEnd,

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("unknown operand `{0}`")]
    UnknownOperand(String),

    #[error("unknown side `{0}` (expected attacker, caster, self, defender or target)")]
    UnknownSide(String),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("`{0}` needs at least two arguments")]
    Arity(String),
}

impl GameError for FormulaError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        "FORMULA_INVALID"
    }
}
