use std::rc::Rc;

use super::*;
use crate::ast::{Block, Stmt};

impl<'a> Parser<'a> {
    /// Parses a statement starting at `pos`.
    /// A bare expression statement may be followed by an optional `;`.
    pub fn parse_stmt(&mut self, pos: usize) -> ParseResult<Stmt> {
        let (token, next) = self.lex(pos)?;
        match token.kind {
            TokenKind::Print => self.parse_print_stmt(next),
            TokenKind::Let => self.parse_let_stmt(next),
            kind if kind.can_begin_expr() => {
                let (expr, after) = self.parse_expr(pos)?;
                let (follow, after_follow) = self.lex(after)?;
                let end = if follow.kind == TokenKind::Semi {
                    after_follow
                } else {
                    after
                };
                Ok((Stmt::ExprStmt(expr), end))
            }
            _ => Err(ParseError::InvalidStatement {
                found: token.text.to_string(),
                span: token.span,
            }
            .into()),
        }
    }

    /// Parses the rest of a `print` statement. `pos` is right after the keyword.
    fn parse_print_stmt(&mut self, pos: usize) -> ParseResult<Stmt> {
        let (expr, after) = self.parse_expr(pos)?;
        let end = self.expect_delimiter("print", after)?;
        Ok((Stmt::Print(expr), end))
    }

    /// Parses the rest of a `let` statement. `pos` is right after the keyword.
    fn parse_let_stmt(&mut self, pos: usize) -> ParseResult<Stmt> {
        let (token, mut pos) = self.lex(pos)?;
        let ident = match token.kind {
            TokenKind::Identifier => token.text.to_string(),
            _ => return Err(invalid_assignment(token).into()),
        };

        let mut params: Vec<String> = Vec::new();
        loop {
            let (token, next) = self.lex(pos)?;
            pos = next;
            match token.kind {
                TokenKind::Identifier => {
                    if params.iter().any(|param| param == token.text) {
                        return Err(ParseError::DuplicateParameter {
                            ident: token.text.to_string(),
                            span: token.span,
                        }
                        .into());
                    }
                    params.push(token.text.to_string());
                }
                TokenKind::Equals => break,
                _ => return Err(invalid_assignment(token).into()),
            }
        }

        let (block, after) = self.parse_block(params, pos)?;
        let end = self.expect_delimiter("let", after)?;
        Ok((
            Stmt::Let {
                ident,
                block: Rc::new(block),
            },
            end,
        ))
    }

    /// Parses a block body: nested statements followed by the tail expression.
    ///
    /// A bare expression ends the block unless the token after it can start another
    /// statement, in which case it is kept as an expression statement of the body.
    fn parse_block(&mut self, params: Vec<String>, pos: usize) -> ParseResult<Block> {
        self.nested(pos, |this| {
            let mut body = Vec::new();
            let mut pos = pos;
            loop {
                let (token, next) = this.lex(pos)?;
                match token.kind {
                    TokenKind::Print => {
                        let (stmt, after) = this.parse_print_stmt(next)?;
                        body.push(stmt);
                        pos = after;
                    }
                    TokenKind::Let => {
                        let (stmt, after) = this.parse_let_stmt(next)?;
                        body.push(stmt);
                        pos = after;
                    }
                    kind if kind.can_begin_expr() => {
                        let (expr, after) = this.parse_expr(pos)?;
                        let (follow, _) = this.lex(after)?;
                        if follow.kind.can_begin_stmt() {
                            body.push(Stmt::ExprStmt(expr));
                            pos = after;
                        } else {
                            let block = Block {
                                params,
                                body,
                                tail: expr,
                            };
                            return Ok((block, after));
                        }
                    }
                    _ => {
                        return Err(ParseError::MissingTail {
                            found: token.text.to_string(),
                            span: token.span,
                        }
                        .into())
                    }
                }
            }
        })
    }

    fn expect_delimiter(&self, after: &'static str, pos: usize) -> Result<usize, SyntaxError> {
        self.expect(TokenKind::Semi, pos, |found| ParseError::DelimiterRequired {
            after,
            found: found.text.to_string(),
            span: found.span,
        })
    }
}

fn invalid_assignment(token: Token<'_>) -> ParseError {
    ParseError::InvalidAssignment {
        found: token.text.to_string(),
        span: token.span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinOp, Expr, Program};
    use insta::assert_debug_snapshot;

    fn program(source: &str) -> Program {
        Parser::new(source.into()).parse_program().unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        match Parser::new(source.into()).parse_program() {
            Err(SyntaxError::Parse(err)) => err,
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    fn let_block(stmt: &Stmt) -> &Block {
        match stmt {
            Stmt::Let { block, .. } => block,
            _ => panic!("not a let statement: {:?}", stmt),
        }
    }

    #[test]
    fn test_let_with_params() {
        assert_debug_snapshot!(program("let f a b = a + b;"), @r###"
        Program {
            stmts: [
                Let {
                    ident: "f",
                    block: Block {
                        params: [
                            "a",
                            "b",
                        ],
                        body: [],
                        tail: Binary {
                            lhs: VariableRef {
                                ident: "a",
                                args: [],
                            },
                            op: Add,
                            rhs: VariableRef {
                                ident: "b",
                                args: [],
                            },
                        },
                    },
                },
            ],
        }
        "###);
    }

    #[test]
    fn test_print() {
        let ast = program("print 'hi'; print 1 + 2;");
        assert_eq!(
            ast.stmts,
            vec![
                Stmt::Print(Expr::StringLit("hi".to_string())),
                Stmt::Print(Expr::Binary {
                    lhs: Box::new(Expr::IntegerLit(1)),
                    op: BinOp::Add,
                    rhs: Box::new(Expr::IntegerLit(2)),
                }),
            ]
        );
    }

    #[test]
    fn test_block_with_nested_statements() {
        let ast = program("let f x = print x; let y = x * 2; y + 1;");
        assert_eq!(ast.stmts.len(), 1);
        let block = let_block(&ast.stmts[0]);
        assert_eq!(block.params, vec!["x".to_string()]);
        assert_eq!(block.body.len(), 2);
        assert!(matches!(block.body[0], Stmt::Print(_)));
        assert!(matches!(&block.body[1], Stmt::Let { ident, .. } if ident == "y"));
        assert!(matches!(block.tail, Expr::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn test_block_expression_statement() {
        // `1` is followed by another expression, so it is a statement of the body
        let ast = program("let f = 1 2;");
        let block = let_block(&ast.stmts[0]);
        assert_eq!(block.body, vec![Stmt::ExprStmt(Expr::IntegerLit(1))]);
        assert_eq!(block.tail, Expr::IntegerLit(2));
    }

    #[test]
    fn test_bare_expression_statements() {
        let ast = program("1 + 1; 'a' f 2");
        assert_eq!(ast.stmts.len(), 3);
        assert!(ast.stmts.iter().all(|stmt| matches!(stmt, Stmt::ExprStmt(_))));
    }

    #[test]
    fn test_delimiter_required() {
        assert_eq!(
            parse_err("print 1 let x = 2;"),
            ParseError::DelimiterRequired {
                after: "print",
                found: "let".to_string(),
                span: 8..11
            }
        );
        assert!(matches!(
            parse_err("let x = 1"),
            ParseError::DelimiterRequired { after: "let", .. }
        ));
    }

    #[test]
    fn test_invalid_assignment() {
        assert_eq!(
            parse_err("let = 1;"),
            ParseError::InvalidAssignment {
                found: "=".to_string(),
                span: 4..5
            }
        );
        assert!(matches!(
            parse_err("let f 1 = 2;"),
            ParseError::InvalidAssignment { .. }
        ));
        assert!(matches!(
            parse_err("let print = 2;"),
            ParseError::InvalidAssignment { .. }
        ));
    }

    #[test]
    fn test_duplicate_parameter() {
        assert_eq!(
            parse_err("let f a a = a;"),
            ParseError::DuplicateParameter {
                ident: "a".to_string(),
                span: 8..9
            }
        );
    }

    #[test]
    fn test_missing_tail() {
        assert_eq!(
            parse_err("let f = print 1;;"),
            ParseError::MissingTail {
                found: ";".to_string(),
                span: 16..17
            }
        );
    }

    #[test]
    fn test_invalid_statement() {
        assert_eq!(
            parse_err(") print 1;"),
            ParseError::InvalidStatement {
                found: ")".to_string(),
                span: 0..1
            }
        );
        assert!(matches!(parse_err("= 1;"), ParseError::InvalidStatement { .. }));
    }
}
