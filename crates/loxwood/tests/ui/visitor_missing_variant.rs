use loxwood::ast::expr;

// Handles every expression variant except `Ternary`
struct Partial;

impl expr::Visitor<()> for Partial {
    fn visit_assign_expr(&mut self, _: &expr::Assign) {}
    fn visit_binary_expr(&mut self, _: &expr::Binary) {}
    fn visit_call_expr(&mut self, _: &expr::Call) {}
    fn visit_grouping_expr(&mut self, _: &expr::Grouping) {}
    fn visit_literal_expr(&mut self, _: &expr::Literal) {}
    fn visit_logical_expr(&mut self, _: &expr::Logical) {}
    fn visit_unary_expr(&mut self, _: &expr::Unary) {}
    fn visit_variable_expr(&mut self, _: &expr::Variable) {}
}

fn main() {
    let _visitor = Partial;
}
