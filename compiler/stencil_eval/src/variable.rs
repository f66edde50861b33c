//! Variables: an expression followed by a filter pipeline.
//!
//! ```text
//! variable := expression ( "|" identifier ( ":" expression ( "," expression )* )? )*
//! ```

use crate::error::unknown_filter;
use crate::{Context, RenderError};
use smallvec::SmallVec;
use stencil_lexer::{Span, TokenKind};
use stencil_parse::{Cursor, Expression, ParseError};
use stencil_value::Data;

/// One `| name: args` application.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCall {
    pub name: String,
    pub args: SmallVec<[Expression; 2]>,
    pub span: Span,
}

/// An expression and the filters applied to it, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub expression: Expression,
    pub filters: Vec<FilterCall>,
}

impl Variable {
    /// Parse a variable at the cursor. Trailing tokens are left for the
    /// caller.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Variable, ParseError> {
        let expression = Expression::parse(cursor)?;
        let mut filters = Vec::new();
        while cursor.try_consume(TokenKind::Pipe).is_some() {
            let span = cursor.current_span();
            let name = cursor.expect(TokenKind::Identifier)?;
            let mut args = SmallVec::new();
            if cursor.try_consume(TokenKind::Colon).is_some() {
                loop {
                    args.push(Expression::parse(cursor)?);
                    if cursor.try_consume(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            filters.push(FilterCall {
                name: name.text.to_owned(),
                args,
                span,
            });
        }
        Ok(Variable {
            expression,
            filters,
        })
    }

    /// Evaluate the expression and thread it through each filter.
    ///
    /// Filters are resolved at render time; arguments are evaluated against
    /// the same data root as the expression.
    pub fn evaluate(&self, context: &Context<'_>) -> Result<Data, RenderError> {
        let root = context.data();
        let mut value = self.expression.evaluate(root);
        for call in &self.filters {
            let filter = context
                .filters()
                .get(&call.name)
                .ok_or_else(|| unknown_filter(&call.name).or_span(call.span))?;
            let args: SmallVec<[Data; 2]> = call.args.iter().map(|arg| arg.evaluate(root)).collect();
            value = filter
                .apply(&value, &args)
                .map_err(|err| err.or_span(call.span))?;
        }
        Ok(value)
    }
}
