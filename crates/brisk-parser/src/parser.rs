//! Recursive-descent parser with operator-precedence climbing.

use std::rc::Rc;

use brisk_lexer::Lexer;
use brisk_syntax::ast::*;
use brisk_syntax::error::{error_at, Result};
use brisk_syntax::token::{Token, TokenKind};

/// Pulls tokens from a [`Lexer`] on demand and produces a [`Program`].
/// The first syntax error aborts parsing; there is no recovery.
pub struct Parser {
    lexer: Lexer,
    cur: Token,
}

fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let line = lhs.line;
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        line,
    }
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur = lexer.next_token();
        Self { lexer, cur }
    }

    fn advance(&mut self) {
        self.cur = self.lexer.next_token();
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.cur.kind == *kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn skip_newlines(&mut self) {
        while self.eat(&TokenKind::Newline) {}
    }

    fn syntax_error<T>(&self, msg: &str) -> Result<T> {
        error_at(
            self.cur.line,
            self.cur.col,
            format!(
                "{} (found '{}' on line {})",
                msg,
                self.cur.kind.lexeme(),
                self.cur.line
            ),
        )
    }

    fn expect(&mut self, kind: &TokenKind, msg: &str) -> Result<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            self.syntax_error(msg)
        }
    }

    fn expect_ident(&mut self, msg: &str) -> Result<String> {
        if let TokenKind::Ident(name) = &self.cur.kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            self.syntax_error(msg)
        }
    }

    // expressions, lowest precedence first

    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.logical_or()
    }

    fn logical_or(&mut self) -> Result<Expr> {
        let mut expr = self.logical_and()?;
        while self.eat(&TokenKind::OrOr) {
            let rhs = self.logical_and()?;
            expr = bin(BinOp::Or, expr, rhs);
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        let mut expr = self.equality()?;
        while self.eat(&TokenKind::AndAnd) {
            let rhs = self.equality()?;
            expr = bin(BinOp::And, expr, rhs);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr> {
        let mut expr = self.comparison()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.comparison()?;
            expr = bin(op, expr, rhs);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr> {
        let mut expr = self.addition()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Less => BinOp::Lt,
                TokenKind::Greater => BinOp::Gt,
                TokenKind::LessEq => BinOp::Le,
                TokenKind::GreaterEq => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.addition()?;
            expr = bin(op, expr, rhs);
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expr> {
        let mut expr = self.multiplication()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.multiplication()?;
            expr = bin(op, expr, rhs);
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expr> {
        let mut expr = self.call_or_index()?;
        loop {
            let op = match self.cur.kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.call_or_index()?;
            expr = bin(op, expr, rhs);
        }
        Ok(expr)
    }

    /// Postfix call `(...)` and index `[...]` chains over a primary.
    fn call_or_index(&mut self) -> Result<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.eat(&TokenKind::LParen) {
                let mut args = Vec::new();
                if !self.check(&TokenKind::RParen) {
                    loop {
                        args.push(self.parse_expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RParen, "Expected ')' after arguments")?;
                let line = expr.line;
                match expr.kind {
                    ExprKind::Ident(name) => {
                        expr = Expr {
                            kind: ExprKind::Call { name, args },
                            line,
                        };
                    }
                    _ => return self.syntax_error("Can only call identifiers"),
                }
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(&TokenKind::RBracket, "Expected ']' after index")?;
                let line = expr.line;
                expr = Expr {
                    kind: ExprKind::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    },
                    line,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr> {
        let line = self.cur.line;
        match self.cur.kind.clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Int(n),
                    line,
                })
            }
            TokenKind::Float(f) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Float(f),
                    line,
                })
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Str(s),
                    line,
                })
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Bool(true),
                    line,
                })
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Bool(false),
                    line,
                })
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr {
                    kind: ExprKind::Ident(name),
                    line,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenKind::LBracket => {
                self.advance();
                let mut items = Vec::new();
                if !self.check(&TokenKind::RBracket) {
                    loop {
                        items.push(self.parse_expr()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.expect(&TokenKind::RBracket, "Expected ']' at end of list")?;
                Ok(Expr {
                    kind: ExprKind::List(items),
                    line,
                })
            }
            TokenKind::Input => {
                self.advance();
                let mut prompt = None;
                if self.eat(&TokenKind::LParen) {
                    if !self.check(&TokenKind::RParen) {
                        prompt = Some(Box::new(self.parse_expr()?));
                    }
                    self.expect(&TokenKind::RParen, "Expected ')' after input prompt")?;
                }
                Ok(Expr {
                    kind: ExprKind::Input(prompt),
                    line,
                })
            }
            _ => self.syntax_error("Unexpected token"),
        }
    }

    // statements

    fn parse_stmt(&mut self) -> Result<Stmt> {
        self.skip_newlines();
        let line = self.cur.line;

        if self.eat(&TokenKind::Let) {
            let name = self.expect_ident("Expected variable name after 'let'")?;
            self.expect(&TokenKind::Equal, "Expected '=' in variable declaration")?;
            let expr = self.parse_expr()?;
            return Ok(Stmt {
                kind: StmtKind::Let { name, expr },
                line,
            });
        }

        if self.eat(&TokenKind::Print) {
            self.expect(&TokenKind::LParen, "Expected '(' after print")?;
            let mut args = Vec::new();
            if !self.check(&TokenKind::RParen) {
                loop {
                    args.push(self.parse_expr()?);
                    if !self.eat(&TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.expect(&TokenKind::RParen, "Expected ')' after print arguments")?;
            return Ok(Stmt {
                kind: StmtKind::Print(args),
                line,
            });
        }

        if self.eat(&TokenKind::If) {
            return self.if_stmt(line);
        }
        if self.eat(&TokenKind::While) {
            return self.while_stmt(line);
        }
        if self.eat(&TokenKind::Switch) {
            return self.switch_stmt(line);
        }
        if self.eat(&TokenKind::Break) {
            return Ok(Stmt {
                kind: StmtKind::Break,
                line,
            });
        }
        if self.eat(&TokenKind::Continue) {
            return Ok(Stmt {
                kind: StmtKind::Continue,
                line,
            });
        }
        if self.eat(&TokenKind::Return) {
            let expr = self.parse_expr()?;
            return Ok(Stmt {
                kind: StmtKind::Return(Some(expr)),
                line,
            });
        }

        // Expression statement, rewritten to an assignment when followed
        // by '=' and the left side is a bare identifier.
        let expr = self.parse_expr()?;
        if self.eat(&TokenKind::Equal) {
            let value = self.parse_expr()?;
            return match expr.kind {
                ExprKind::Ident(name) => Ok(Stmt {
                    kind: StmtKind::Assign { name, expr: value },
                    line,
                }),
                _ => self.syntax_error("Cannot assign to non-variable"),
            };
        }
        Ok(Stmt {
            kind: StmtKind::Expr(expr),
            line,
        })
    }

    fn if_stmt(&mut self, line: usize) -> Result<Stmt> {
        self.expect(&TokenKind::LParen, "Expected '(' after 'if'")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "Expected ')' after condition")?;
        self.skip_newlines();
        self.expect(&TokenKind::LBrace, "Expected '{' to start if-block")?;
        let then_body = self.block()?;

        let mut else_body = Vec::new();
        if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                // else-if chains recurse as the sole else item
                else_body.push(self.parse_stmt()?);
            } else {
                self.skip_newlines();
                self.expect(&TokenKind::LBrace, "Expected '{' to start else-block")?;
                else_body = self.block()?;
            }
        }
        Ok(Stmt {
            kind: StmtKind::If {
                cond,
                then_body,
                else_body,
            },
            line,
        })
    }

    fn while_stmt(&mut self, line: usize) -> Result<Stmt> {
        self.expect(&TokenKind::LParen, "Expected '(' after 'while'")?;
        let cond = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "Expected ')' after condition")?;
        self.skip_newlines();
        self.expect(&TokenKind::LBrace, "Expected '{' to start while-body")?;
        let body = self.block()?;
        Ok(Stmt {
            kind: StmtKind::While { cond, body },
            line,
        })
    }

    fn switch_stmt(&mut self, line: usize) -> Result<Stmt> {
        self.expect(&TokenKind::LParen, "Expected '(' after switch")?;
        let subject = self.parse_expr()?;
        self.expect(&TokenKind::RParen, "Expected ')' after switch expression")?;
        self.skip_newlines();
        self.expect(&TokenKind::LBrace, "Expected '{' to start switch block")?;

        let mut cases = Vec::new();
        let mut default = None;
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            self.skip_newlines();
            if self.check(&TokenKind::RBrace) || self.check(&TokenKind::Eof) {
                break;
            }
            let arm_line = self.cur.line;
            if self.eat(&TokenKind::Case) {
                let value = self.parse_expr()?;
                self.expect(&TokenKind::Colon, "Expected ':' after case value")?;
                let body = self.case_items(true)?;
                cases.push(CaseArm {
                    value,
                    body,
                    line: arm_line,
                });
            } else if self.eat(&TokenKind::Default) {
                self.expect(&TokenKind::Colon, "Expected ':' after default")?;
                default = Some(self.case_items(false)?);
            } else {
                return self.syntax_error("Expected 'case' or 'default' inside switch");
            }
        }
        self.expect(&TokenKind::RBrace, "Expected '}' at end of switch")?;
        Ok(Stmt {
            kind: StmtKind::Switch {
                subject,
                cases,
                default,
            },
            line,
        })
    }

    /// Statements of one switch arm, up to the next `case`/`default`/`}`.
    fn case_items(&mut self, stop_at_default: bool) -> Result<Vec<Stmt>> {
        let mut items = Vec::new();
        loop {
            if self.check(&TokenKind::Case)
                || self.check(&TokenKind::RBrace)
                || self.check(&TokenKind::Eof)
                || (stop_at_default && self.check(&TokenKind::Default))
            {
                break;
            }
            if self.eat(&TokenKind::Newline) {
                continue;
            }
            items.push(self.parse_stmt()?);
        }
        Ok(items)
    }

    /// Statements up to and including the closing `}`.
    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut items = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            if self.eat(&TokenKind::Newline) {
                continue;
            }
            items.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace, "Expected '}' at end of block")?;
        Ok(items)
    }

    fn function_def(&mut self, line: usize) -> Result<Stmt> {
        let name = self.expect_ident("Expected function name")?;
        self.expect(&TokenKind::LParen, "Expected '(' after function name")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                params.push(self.expect_ident("Expected parameter name")?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen, "Expected ')' after parameters")?;
        self.skip_newlines();
        self.expect(&TokenKind::LBrace, "Expected '{' to start function body")?;
        let body = self.block()?;
        Ok(Stmt {
            kind: StmtKind::Func(Rc::new(Function {
                name,
                params,
                body,
                line,
            })),
            line,
        })
    }

    /// Parse the whole program: top-level statements and function
    /// definitions up to end of input.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::Eof) {
            if self.eat(&TokenKind::Newline) {
                continue;
            }
            let line = self.cur.line;
            if self.eat(&TokenKind::Func) {
                body.push(self.function_def(line)?);
            } else {
                body.push(self.parse_stmt()?);
            }
        }
        Ok(Program { body })
    }
}
