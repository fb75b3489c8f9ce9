//! Debug printers over the syntax tree
//!
//! Two small visitors: [`AstPrinter`] renders a Lisp-style, fully
//! parenthesized form of expressions and statements; [`RpnPrinter`] renders
//! expressions in reverse Polish notation.

use super::expr::{self, Expr};
use super::stmt::{self, Stmt};

/// Parenthesized prefix rendering, e.g. `(* (- 123) (group 45.67))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    /// Render an expression.
    pub fn print_expr(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    /// Render a statement.
    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    /// Render a program, one statement per line.
    pub fn print_program(&mut self, program: &[Stmt]) -> String {
        program
            .iter()
            .map(|stmt| self.print_stmt(stmt))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = format!("({}", name);
        for expr in exprs {
            out.push(' ');
            out.push_str(&expr.accept(self));
        }
        out.push(')');
        out
    }

    fn parenthesize_stmts(&mut self, head: &str, stmts: &[Stmt]) -> String {
        let mut out = format!("({}", head);
        for stmt in stmts {
            out.push(' ');
            out.push_str(&stmt.accept(self));
        }
        out.push(')');
        out
    }
}

impl expr::Visitor<String> for AstPrinter {
    fn visit_assign_expr(&mut self, expr: &expr::Assign) -> String {
        self.parenthesize(&format!("= {}", expr.name().lexeme), &[expr.value()])
    }

    fn visit_binary_expr(&mut self, expr: &expr::Binary) -> String {
        self.parenthesize(&expr.operator().lexeme, &[expr.left(), expr.right()])
    }

    fn visit_call_expr(&mut self, expr: &expr::Call) -> String {
        let mut operands = vec![expr.callee()];
        operands.extend(expr.arguments());
        self.parenthesize("call", &operands)
    }

    fn visit_grouping_expr(&mut self, expr: &expr::Grouping) -> String {
        self.parenthesize("group", &[expr.expression()])
    }

    fn visit_literal_expr(&mut self, expr: &expr::Literal) -> String {
        expr.value().to_string()
    }

    fn visit_logical_expr(&mut self, expr: &expr::Logical) -> String {
        self.parenthesize(&expr.operator().lexeme, &[expr.left(), expr.right()])
    }

    fn visit_unary_expr(&mut self, expr: &expr::Unary) -> String {
        self.parenthesize(&expr.operator().lexeme, &[expr.right()])
    }

    fn visit_ternary_expr(&mut self, expr: &expr::Ternary) -> String {
        let name = format!("{}{}", expr.question().lexeme, expr.colon().lexeme);
        self.parenthesize(
            &name,
            &[expr.condition(), expr.then_branch(), expr.else_branch()],
        )
    }

    fn visit_variable_expr(&mut self, expr: &expr::Variable) -> String {
        expr.name().lexeme.clone()
    }
}

impl stmt::Visitor<String> for AstPrinter {
    fn visit_block_stmt(&mut self, stmt: &stmt::Block) -> String {
        self.parenthesize_stmts("block", stmt.statements())
    }

    fn visit_expression_stmt(&mut self, stmt: &stmt::Expression) -> String {
        self.parenthesize(";", &[stmt.expression()])
    }

    fn visit_function_stmt(&mut self, stmt: &stmt::Function) -> String {
        let params: Vec<&str> = stmt.params().iter().map(|p| p.lexeme.as_str()).collect();
        let head = format!("fun {} ({})", stmt.name().lexeme, params.join(" "));
        self.parenthesize_stmts(&head, stmt.body())
    }

    fn visit_if_stmt(&mut self, stmt: &stmt::If) -> String {
        let mut out = format!(
            "(if {} {}",
            stmt.condition().accept(self),
            stmt.then_branch().accept(self)
        );
        if let Some(else_branch) = stmt.else_branch() {
            out.push(' ');
            out.push_str(&else_branch.accept(self));
        }
        out.push(')');
        out
    }

    fn visit_print_stmt(&mut self, stmt: &stmt::Print) -> String {
        self.parenthesize("print", &[stmt.expression()])
    }

    fn visit_while_stmt(&mut self, stmt: &stmt::While) -> String {
        format!(
            "(while {} {})",
            stmt.condition().accept(self),
            stmt.body().accept(self)
        )
    }

    fn visit_var_stmt(&mut self, stmt: &stmt::Var) -> String {
        let name = format!("var {}", stmt.name().lexeme);
        match stmt.initializer() {
            Some(init) => self.parenthesize(&name, &[init]),
            None => format!("({})", name),
        }
    }
}

/// Reverse Polish rendering, e.g. `1 2 + 4 3 - *`.
///
/// Grouping is implicit in the operand order, so `Grouping` nodes print
/// their inner expression only.
#[derive(Debug, Default, Clone, Copy)]
pub struct RpnPrinter;

impl RpnPrinter {
    /// Render an expression.
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn postfix(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut out = String::new();
        for expr in exprs {
            out.push_str(&expr.accept(self));
            out.push(' ');
        }
        out.push_str(name);
        out
    }
}

impl expr::Visitor<String> for RpnPrinter {
    fn visit_assign_expr(&mut self, expr: &expr::Assign) -> String {
        format!("{} {} =", expr.value().accept(self), expr.name().lexeme)
    }

    fn visit_binary_expr(&mut self, expr: &expr::Binary) -> String {
        self.postfix(&expr.operator().lexeme, &[expr.left(), expr.right()])
    }

    fn visit_call_expr(&mut self, expr: &expr::Call) -> String {
        let mut operands: Vec<&Expr> = expr.arguments().iter().collect();
        operands.push(expr.callee());
        self.postfix("call", &operands)
    }

    fn visit_grouping_expr(&mut self, expr: &expr::Grouping) -> String {
        expr.expression().accept(self)
    }

    fn visit_literal_expr(&mut self, expr: &expr::Literal) -> String {
        expr.value().to_string()
    }

    fn visit_logical_expr(&mut self, expr: &expr::Logical) -> String {
        self.postfix(&expr.operator().lexeme, &[expr.left(), expr.right()])
    }

    fn visit_unary_expr(&mut self, expr: &expr::Unary) -> String {
        self.postfix(&expr.operator().lexeme, &[expr.right()])
    }

    fn visit_ternary_expr(&mut self, expr: &expr::Ternary) -> String {
        let name = format!("{}{}", expr.question().lexeme, expr.colon().lexeme);
        self.postfix(
            &name,
            &[expr.condition(), expr.then_branch(), expr.else_branch()],
        )
    }

    fn visit_variable_expr(&mut self, expr: &expr::Variable) -> String {
        expr.name().lexeme.clone()
    }
}
