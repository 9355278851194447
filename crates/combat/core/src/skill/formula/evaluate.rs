//! Formula evaluation.

use super::{BinaryOp, Expr, Operand, Side};
use crate::combatant::Combatant;
use crate::stats::{Resources, StatsSnapshot};

/// One side's inputs: stats locked at action start plus current pools.
#[derive(Clone, Copy, Debug)]
pub struct SideValues<'a> {
    pub stats: &'a StatsSnapshot,
    pub resources: &'a Resources,
}

/// Everything a formula can read.
#[derive(Clone, Copy, Debug)]
pub struct FormulaContext<'a> {
    pub attacker: SideValues<'a>,
    pub defender: SideValues<'a>,
}

impl<'a> FormulaContext<'a> {
    pub fn new(
        attacker: (&'a StatsSnapshot, &'a Resources),
        defender: (&'a StatsSnapshot, &'a Resources),
    ) -> Self {
        Self {
            attacker: SideValues {
                stats: attacker.0,
                resources: attacker.1,
            },
            defender: SideValues {
                stats: defender.0,
                resources: defender.1,
            },
        }
    }

    /// Context for an effect the combatant applies to itself.
    pub fn reflexive(stats: &'a StatsSnapshot, combatant: &'a Combatant) -> Self {
        Self::new((stats, &combatant.resources), (stats, &combatant.resources))
    }
}

/// Evaluates an expression. Division by zero yields zero.
pub fn evaluate(expr: &Expr, ctx: &FormulaContext<'_>) -> f64 {
    match expr {
        Expr::Constant(value) => *value,
        Expr::Value(side, operand) => {
            let values = match side {
                Side::Attacker => ctx.attacker,
                Side::Defender => ctx.defender,
            };
            read(values, *operand)
        }
        Expr::Neg(inner) => -evaluate(inner, ctx),
        Expr::Binary(op, lhs, rhs) => {
            let lhs = evaluate(lhs, ctx);
            let rhs = evaluate(rhs, ctx);
            match op {
                BinaryOp::Add => lhs + rhs,
                BinaryOp::Sub => lhs - rhs,
                BinaryOp::Mul => lhs * rhs,
                BinaryOp::Div if rhs == 0.0 => 0.0,
                BinaryOp::Div => lhs / rhs,
            }
        }
        Expr::Min(args) => args
            .iter()
            .map(|arg| evaluate(arg, ctx))
            .fold(f64::INFINITY, f64::min),
        Expr::Max(args) => args
            .iter()
            .map(|arg| evaluate(arg, ctx))
            .fold(f64::NEG_INFINITY, f64::max),
    }
}

fn read(values: SideValues<'_>, operand: Operand) -> f64 {
    match operand {
        Operand::Attribute(attribute) => values.stats.get(attribute),
        Operand::Current(kind) => values.resources.get(kind),
        Operand::MissingHealth => (values.stats.derived.max_health - values.resources.health).max(0.0),
        Operand::RealmIndex => f64::from(values.stats.realm.index()),
    }
}
