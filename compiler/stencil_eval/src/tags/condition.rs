//! Conditions for `if`, `unless` and `elsif`.
//!
//! ```text
//! condition := leaf ( ("and" | "or") condition )?
//! leaf      := expression ( comparison expression )?
//! ```
//!
//! `and`/`or` associate to the right with equal precedence, so
//! `a or b and c` reads as `a or (b and c)`.

use std::cmp::Ordering;
use stencil_lexer::TokenKind;
use stencil_parse::{syntax_error, Cursor, Expression, ParseError};
use stencil_value::Data;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Contains,
}

impl Comparison {
    fn from_operator(text: &str) -> Option<Comparison> {
        Some(match text {
            "==" => Comparison::Eq,
            "!=" | "<>" => Comparison::Ne,
            "<" => Comparison::Lt,
            ">" => Comparison::Gt,
            "<=" => Comparison::Le,
            ">=" => Comparison::Ge,
            "contains" => Comparison::Contains,
            _ => return None,
        })
    }

    /// Apply to two values. Orderings between unordered variants are false.
    pub fn test(self, left: &Data, right: &Data) -> bool {
        match self {
            Comparison::Eq => left == right,
            Comparison::Ne => left != right,
            Comparison::Lt => left.compare(right) == Some(Ordering::Less),
            Comparison::Gt => left.compare(right) == Some(Ordering::Greater),
            Comparison::Le => matches!(
                left.compare(right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Comparison::Ge => matches!(
                left.compare(right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Comparison::Contains => left.contains(right),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Bare truthiness test.
    Truthy(Expression),
    Compare {
        left: Expression,
        op: Comparison,
        right: Expression,
    },
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Parse a full condition; the cursor must be exhausted afterwards.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Condition, ParseError> {
        if cursor.is_at_end() {
            return Err(syntax_error(
                "expected a condition",
                Some(cursor.current_span()),
            ));
        }
        let condition = Self::parse_chain(cursor)?;
        cursor.expect_end()?;
        Ok(condition)
    }

    fn parse_chain(cursor: &mut Cursor<'_>) -> Result<Condition, ParseError> {
        let leaf = Self::parse_leaf(cursor)?;
        if cursor.try_consume_id("and").is_some() {
            let rest = Self::parse_chain(cursor)?;
            Ok(Condition::And(Box::new(leaf), Box::new(rest)))
        } else if cursor.try_consume_id("or").is_some() {
            let rest = Self::parse_chain(cursor)?;
            Ok(Condition::Or(Box::new(leaf), Box::new(rest)))
        } else {
            Ok(leaf)
        }
    }

    fn parse_leaf(cursor: &mut Cursor<'_>) -> Result<Condition, ParseError> {
        let left = Expression::parse(cursor)?;
        let Some(op) = cursor.try_consume(TokenKind::Comparison) else {
            return Ok(Condition::Truthy(left));
        };
        let op = Comparison::from_operator(op.text).ok_or_else(|| {
            syntax_error(
                format!("unknown comparison `{}`", op.text),
                Some(cursor.current_span()),
            )
        })?;
        let right = Expression::parse(cursor)?;
        Ok(Condition::Compare { left, op, right })
    }

    pub fn evaluate(&self, root: &Data) -> bool {
        match self {
            Condition::Truthy(expr) => expr.evaluate(root).is_truthy(),
            Condition::Compare { left, op, right } => {
                op.test(&left.evaluate(root), &right.evaluate(root))
            }
            Condition::And(left, right) => left.evaluate(root) && right.evaluate(root),
            Condition::Or(left, right) => left.evaluate(root) || right.evaluate(root),
        }
    }
}
