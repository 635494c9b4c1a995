// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility conditions.

use core::cmp::Ordering;

use crate::viewer::{Value, Viewer};

/// One side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A constant.
    Literal(Value),
    /// A placeholder read from the viewer.
    Placeholder(String),
}

impl Operand {
    fn resolve(&self, viewer: &dyn Viewer) -> Option<Value> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Placeholder(name) => viewer.placeholder(name),
        }
    }
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
}

impl CompareOp {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Gt => ordering.is_gt(),
            Self::Ge => ordering.is_ge(),
            Self::Lt => ordering.is_lt(),
            Self::Le => ordering.is_le(),
        }
    }
}

/// A predicate over the viewer that decides whether something is drawn.
///
/// Comparisons are numeric when both sides read as numbers and textual otherwise. A
/// comparison involving an unknown placeholder is false.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Condition {
    /// Always true.
    #[default]
    Always,
    /// Compares two operands.
    Compare {
        /// Left-hand side.
        left: Operand,
        /// Operator.
        op: CompareOp,
        /// Right-hand side.
        right: Operand,
    },
    /// True when every condition is.
    All(Vec<Condition>),
    /// True when any condition is.
    Any(Vec<Condition>),
    /// Negation.
    Not(Box<Condition>),
}

impl Condition {
    /// Compares placeholder `name` against a constant.
    pub fn placeholder(name: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            left: Operand::Placeholder(name.into()),
            op,
            right: Operand::Literal(value.into()),
        }
    }

    /// Both `self` and `other`.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Always, other) | (other, Self::Always) => other,
            (Self::All(mut left), Self::All(right)) => {
                left.extend(right);
                Self::All(left)
            }
            (Self::All(mut left), other) => {
                left.push(other);
                Self::All(left)
            }
            (this, other) => Self::All(vec![this, other]),
        }
    }

    /// Whether this condition is [`Condition::Always`].
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Evaluates the condition for `viewer`.
    pub fn evaluate(&self, viewer: &dyn Viewer) -> bool {
        match self {
            Self::Always => true,
            Self::Compare { left, op, right } => {
                let (Some(left), Some(right)) = (left.resolve(viewer), right.resolve(viewer))
                else {
                    return false;
                };
                compare(&left, &right).is_some_and(|ordering| op.accepts(ordering))
            }
            Self::All(conditions) => conditions.iter().all(|c| c.evaluate(viewer)),
            Self::Any(conditions) => conditions.iter().any(|c| c.evaluate(viewer)),
            Self::Not(condition) => !condition.evaluate(viewer),
        }
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => Some(left.to_string().cmp(&right.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stats;

    impl Viewer for Stats {
        fn placeholder(&self, name: &str) -> Option<Value> {
            match name {
                "health" => Some(Value::Number(12.0)),
                "world" => Some(Value::from("nether")),
                "flying" => Some(Value::Bool(false)),
                _ => None,
            }
        }
    }

    #[test]
    fn numeric_and_textual_comparisons() {
        assert!(Condition::placeholder("health", CompareOp::Gt, 10.0).evaluate(&Stats));
        assert!(!Condition::placeholder("health", CompareOp::Lt, 10.0).evaluate(&Stats));
        assert!(Condition::placeholder("health", CompareOp::Eq, "12").evaluate(&Stats));
        assert!(Condition::placeholder("world", CompareOp::Eq, "nether").evaluate(&Stats));
        assert!(Condition::placeholder("flying", CompareOp::Ne, true).evaluate(&Stats));
    }

    #[test]
    fn unknown_placeholder_is_false() {
        let missing = Condition::placeholder("mana", CompareOp::Ge, 0.0);
        assert!(!missing.evaluate(&Stats));
        assert!(!missing.clone().and(Condition::Always).evaluate(&Stats));
        assert!(Condition::Not(Box::new(missing)).evaluate(&Stats));
    }

    #[test]
    fn and_flattens() {
        let a = Condition::placeholder("health", CompareOp::Gt, 0.0);
        let b = Condition::placeholder("world", CompareOp::Eq, "nether");
        assert_eq!(Condition::Always.and(a.clone()), a);
        let both = a.clone().and(b.clone()).and(a);
        assert!(matches!(&both, Condition::All(all) if all.len() == 3));
        assert!(both.evaluate(&Stats));
        assert!(Condition::Any(vec![b, Condition::Not(Box::new(Condition::Always))]).evaluate(&Stats));
    }
}
