use super::*;
use crate::ast::{BinOp, Expr};

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self, pos: usize) -> ParseResult<Expr> {
        self.parse_expr_bp(0, pos) // 0 to accept any expression
    }

    /// Parses an expression whose operators all bind tighter than `min_bp`.
    ///
    /// The right-hand side of an operator is parsed at the operator's own binding power,
    /// so operators of equal precedence are chained by this loop and group to the left.
    pub fn parse_expr_bp(&mut self, min_bp: i8, pos: usize) -> ParseResult<Expr> {
        self.nested(pos, |this| {
            let (token, next) = this.lex(pos)?;
            let (mut lhs, mut pos) = this.parse_prefix_expr(token, next)?;

            loop {
                let (token, after_op) = this.lex(pos)?;
                let l_bp = token.kind.left_binding_power();
                if l_bp <= min_bp {
                    break; // not strong enough to take lhs, stop parsing
                }

                let op = BinOp::from_token(token.kind).ok_or_else(|| ParseError::UnknownOperator {
                    found: token.text.to_string(),
                    span: token.span.clone(),
                })?;
                let (rhs, after_rhs) = this.parse_expr_bp(l_bp, after_op)?;

                lhs = Expr::Binary {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(rhs),
                };
                pos = after_rhs;
            }

            Ok((lhs, pos))
        })
    }

    /// Parses a prefix (atom) expression from an already lexed `token`.
    /// `next` is the offset right after `token`.
    fn parse_prefix_expr(&mut self, token: Token<'a>, next: usize) -> ParseResult<Expr> {
        match token.kind {
            TokenKind::Integer => {
                let val = token
                    .text
                    .parse()
                    .map_err(|_| ParseError::IntegerOverflow {
                        text: token.text.to_string(),
                        span: token.span.clone(),
                    })?;
                Ok((Expr::IntegerLit(val), next))
            }
            TokenKind::Float => {
                let val = token
                    .text
                    .parse()
                    .map_err(|_| ParseError::InvalidExpression {
                        found: token.text.to_string(),
                        span: token.span.clone(),
                    })?;
                Ok((Expr::FloatLit(val), next))
            }
            TokenKind::String => {
                // strip the quotes
                let val = token.text[1..token.text.len() - 1].to_string();
                Ok((Expr::StringLit(val), next))
            }
            TokenKind::Identifier => self.parse_variable_ref(token.text.to_string(), next),
            TokenKind::OpenParen => {
                let (inner, after) = self.parse_expr(next)?;
                let after_close = self.expect(TokenKind::CloseParen, after, |found| {
                    ParseError::UnclosedParen {
                        found: found.text.to_string(),
                        span: found.span,
                    }
                })?;
                Ok((inner, after_close))
            }
            _ => Err(ParseError::InvalidExpression {
                found: token.text.to_string(),
                span: token.span,
            }
            .into()),
        }
    }

    /* Expressions.Identifier */
    /// Parses a variable reference and greedily collects its arguments.
    ///
    /// Arguments are atoms: an identifier argument is taken as a bare reference without
    /// arguments of its own, anything else goes through [`Self::parse_prefix_expr`].
    fn parse_variable_ref(&mut self, ident: String, pos: usize) -> ParseResult<Expr> {
        let mut args = Vec::new();
        let mut pos = pos;
        loop {
            let (token, next) = self.lex(pos)?;
            match token.kind {
                TokenKind::Identifier => {
                    args.push(Expr::VariableRef {
                        ident: token.text.to_string(),
                        args: Vec::new(),
                    });
                    pos = next;
                }
                kind if kind.can_begin_expr() => {
                    let (arg, after) = self.parse_prefix_expr(token, next)?;
                    args.push(arg);
                    pos = after;
                }
                _ => break,
            }
        }
        Ok((Expr::VariableRef { ident, args }, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn expr(source: &str) -> Expr {
        let (ast, _) = Parser::new(source.into()).parse_expr(0).unwrap();
        ast
    }

    fn expr_err(source: &str) -> SyntaxError {
        Parser::new(source.into()).parse_expr(0).unwrap_err()
    }

    fn int(val: i64) -> Expr {
        Expr::IntegerLit(val)
    }

    fn var(ident: &str) -> Expr {
        Expr::VariableRef {
            ident: ident.to_string(),
            args: Vec::new(),
        }
    }

    fn binary(lhs: Expr, op: BinOp, rhs: Expr) -> Expr {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    #[test]
    fn test_literal() {
        assert_eq!(expr("1"), int(1));
        assert_eq!(expr("2.5"), Expr::FloatLit(2.5));
        assert_eq!(expr("'single'"), Expr::StringLit("single".to_string()));
        assert_eq!(expr("\"double\""), Expr::StringLit("double".to_string()));
        assert_eq!(expr("''"), Expr::StringLit(String::new()));
    }

    #[test]
    fn test_binary_expr() {
        assert_debug_snapshot!(expr("1 + 2 * 3"), @r###"
        Binary {
            lhs: IntegerLit(
                1,
            ),
            op: Add,
            rhs: Binary {
                lhs: IntegerLit(
                    2,
                ),
                op: Mult,
                rhs: IntegerLit(
                    3,
                ),
            },
        }
        "###);
    }

    #[test]
    fn test_binary_associativity() {
        // should be (10 - 3) - 2
        assert_eq!(
            expr("10 - 3 - 2"),
            binary(binary(int(10), BinOp::Sub, int(3)), BinOp::Sub, int(2))
        );
        // should be (2 * 2) * 2
        assert_eq!(
            expr("2 * 2 * 2"),
            binary(binary(int(2), BinOp::Mult, int(2)), BinOp::Mult, int(2))
        );
        // should be (2 * 3) + 4
        assert_eq!(
            expr("2 * 3 + 4"),
            binary(binary(int(2), BinOp::Mult, int(3)), BinOp::Add, int(4))
        );
    }

    #[test]
    fn test_parenthesized() {
        assert_eq!(
            expr("(2 + 3) * 4"),
            binary(binary(int(2), BinOp::Add, int(3)), BinOp::Mult, int(4))
        );
        assert_eq!(expr("((7))"), int(7));
    }

    #[test]
    fn test_identifier() {
        assert_eq!(expr("foo"), var("foo"));
    }

    #[test]
    fn test_variable_ref_with_args() {
        assert_debug_snapshot!(expr("f x 'a' (1 + 2) 3.5"), @r###"
        VariableRef {
            ident: "f",
            args: [
                VariableRef {
                    ident: "x",
                    args: [],
                },
                StringLit(
                    "a",
                ),
                Binary {
                    lhs: IntegerLit(
                        1,
                    ),
                    op: Add,
                    rhs: IntegerLit(
                        2,
                    ),
                },
                FloatLit(
                    3.5,
                ),
            ],
        }
        "###);
    }

    #[test]
    fn test_args_are_atoms() {
        // `f 1 + 2` is `(f 1) + 2`
        assert_eq!(
            expr("f 1 + 2"),
            binary(
                Expr::VariableRef {
                    ident: "f".to_string(),
                    args: vec![int(1)],
                },
                BinOp::Add,
                int(2)
            )
        );
        // identifier arguments do not collect arguments of their own
        assert_eq!(
            expr("f g h"),
            Expr::VariableRef {
                ident: "f".to_string(),
                args: vec![var("g"), var("h")],
            }
        );
        // a parenthesized argument may itself be an invocation
        assert_eq!(
            expr("f (g h)"),
            Expr::VariableRef {
                ident: "f".to_string(),
                args: vec![Expr::VariableRef {
                    ident: "g".to_string(),
                    args: vec![var("h")],
                }],
            }
        );
    }

    #[test]
    fn test_expr_stops_at_delimiter() {
        let (ast, next) = Parser::new("a + b; print a;".into()).parse_expr(0).unwrap();
        assert_eq!(ast, binary(var("a"), BinOp::Add, var("b")));
        assert_eq!(next, 5);
    }

    #[test]
    fn test_unclosed_paren() {
        assert_eq!(
            expr_err("(1 + 2;"),
            SyntaxError::Parse(ParseError::UnclosedParen {
                found: ";".to_string(),
                span: 6..7
            })
        );
        assert!(matches!(
            expr_err("(1 + 2"),
            SyntaxError::Parse(ParseError::UnclosedParen { .. })
        ));
    }

    #[test]
    fn test_invalid_prefix() {
        assert_eq!(
            expr_err("* 2"),
            SyntaxError::Parse(ParseError::InvalidExpression {
                found: "*".to_string(),
                span: 0..1
            })
        );
        assert!(matches!(
            expr_err("1 +"),
            SyntaxError::Parse(ParseError::InvalidExpression { .. })
        ));
        assert!(matches!(
            expr_err("print"),
            SyntaxError::Parse(ParseError::InvalidExpression { .. })
        ));
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(
            expr_err("99999999999999999999"),
            SyntaxError::Parse(ParseError::IntegerOverflow {
                text: "99999999999999999999".to_string(),
                span: 0..20
            })
        );
    }
}
