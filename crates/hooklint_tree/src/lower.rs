//! Lowering from the OXC AST into the closed script tree.
//!
//! The pass walks the native tree once and emits one arena node per
//! expression or statement it visits. Constructs the rules reason about
//! (calls, functions, returns, identifiers, container literals, declarators,
//! expression statements, blocks) keep a dedicated kind; everything else
//! becomes [`NodeKind::Other`] so that ancestor walks still see conditionals,
//! loops and similar wrappers in the right places.
//!
//! Two ESTree-compatibility details matter here:
//! - parenthesized expressions lower transparently (ESTree has no node for
//!   them, and the rules' ancestor walks must not either);
//! - the property name of a static member access lowers as an
//!   [`NodeKind::Identifier`], so `obj.setX` counts as a mention of `setX`.

use compact_str::CompactString;
use oxc_ast::ast::{
    Argument, ArrayExpressionElement, BindingPattern, CallExpression,
    ChainElement, Class, ClassElement, Declaration, Expression, FormalParameters, Function,
    JSXAttributeItem, JSXAttributeValue, JSXChild, JSXElement, ObjectPropertyKind, Program,
    PropertyKey, Statement,
};
use oxc_span::GetSpan;
use smallvec::SmallVec;

use crate::tree::{NodeId, NodeKind, ScriptTree};

/// Lower a parsed program into a [`ScriptTree`].
pub fn lower_program(program: &Program<'_>) -> ScriptTree {
    let mut lowerer = Lowerer {
        tree: ScriptTree::new(program.span),
    };
    for stmt in program.body.iter() {
        lowerer.lower_statement(stmt, NodeId::ROOT);
    }
    lowerer.tree
}

struct Lowerer {
    tree: ScriptTree,
}

impl Lowerer {
    fn lower_statement(&mut self, stmt: &Statement<'_>, parent: NodeId) {
        match stmt {
            Statement::ExpressionStatement(expr_stmt) => {
                let node = self
                    .tree
                    .push(NodeKind::ExpressionStatement, expr_stmt.span, parent);
                self.lower_expression(&expr_stmt.expression, node);
            }
            Statement::BlockStatement(block) => {
                let node = self.tree.push(NodeKind::Block, block.span, parent);
                for stmt in block.body.iter() {
                    self.lower_statement(stmt, node);
                }
            }
            Statement::ReturnStatement(ret) => {
                let node = self.tree.push(NodeKind::Return, ret.span, parent);
                if let Some(arg) = &ret.argument {
                    self.lower_expression(arg, node);
                }
            }
            Statement::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    let node = self.tree.push(
                        NodeKind::VariableDeclarator {
                            second_binding: second_array_binding(&declarator.id),
                        },
                        declarator.span,
                        parent,
                    );
                    if let Some(init) = &declarator.init {
                        self.lower_expression(init, node);
                    }
                }
            }
            Statement::FunctionDeclaration(func) => {
                self.lower_function(func, parent);
            }
            Statement::ClassDeclaration(class) => {
                self.lower_class(class, parent);
            }
            Statement::IfStatement(if_stmt) => {
                let node = self.tree.push(NodeKind::Other, if_stmt.span, parent);
                self.lower_expression(&if_stmt.test, node);
                self.lower_statement(&if_stmt.consequent, node);
                if let Some(alternate) = &if_stmt.alternate {
                    self.lower_statement(alternate, node);
                }
            }
            Statement::ForStatement(for_stmt) => {
                let node = self.tree.push(NodeKind::Other, for_stmt.span, parent);
                if let Some(init) = &for_stmt.init {
                    if let oxc_ast::ast::ForStatementInit::VariableDeclaration(decl) = init {
                        for declarator in decl.declarations.iter() {
                            let decl_node = self.tree.push(
                                NodeKind::VariableDeclarator {
                                    second_binding: second_array_binding(&declarator.id),
                                },
                                declarator.span,
                                node,
                            );
                            if let Some(init) = &declarator.init {
                                self.lower_expression(init, decl_node);
                            }
                        }
                    } else if let Some(expr) = init.as_expression() {
                        self.lower_expression(expr, node);
                    }
                }
                if let Some(test) = &for_stmt.test {
                    self.lower_expression(test, node);
                }
                if let Some(update) = &for_stmt.update {
                    self.lower_expression(update, node);
                }
                self.lower_statement(&for_stmt.body, node);
            }
            Statement::ForInStatement(for_in) => {
                let node = self.tree.push(NodeKind::Other, for_in.span, parent);
                self.lower_expression(&for_in.right, node);
                self.lower_statement(&for_in.body, node);
            }
            Statement::ForOfStatement(for_of) => {
                let node = self.tree.push(NodeKind::Other, for_of.span, parent);
                self.lower_expression(&for_of.right, node);
                self.lower_statement(&for_of.body, node);
            }
            Statement::WhileStatement(while_stmt) => {
                let node = self.tree.push(NodeKind::Other, while_stmt.span, parent);
                self.lower_expression(&while_stmt.test, node);
                self.lower_statement(&while_stmt.body, node);
            }
            Statement::DoWhileStatement(do_while) => {
                let node = self.tree.push(NodeKind::Other, do_while.span, parent);
                self.lower_statement(&do_while.body, node);
                self.lower_expression(&do_while.test, node);
            }
            Statement::SwitchStatement(switch) => {
                let node = self.tree.push(NodeKind::Other, switch.span, parent);
                self.lower_expression(&switch.discriminant, node);
                for case in switch.cases.iter() {
                    let case_node = self.tree.push(NodeKind::Other, case.span, node);
                    if let Some(test) = &case.test {
                        self.lower_expression(test, case_node);
                    }
                    for stmt in case.consequent.iter() {
                        self.lower_statement(stmt, case_node);
                    }
                }
            }
            Statement::TryStatement(try_stmt) => {
                let node = self.tree.push(NodeKind::Other, try_stmt.span, parent);
                self.lower_block(&try_stmt.block, node);
                if let Some(handler) = &try_stmt.handler {
                    self.lower_block(&handler.body, node);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.lower_block(finalizer, node);
                }
            }
            Statement::LabeledStatement(labeled) => {
                let node = self.tree.push(NodeKind::Other, labeled.span, parent);
                self.lower_statement(&labeled.body, node);
            }
            Statement::ThrowStatement(throw) => {
                let node = self.tree.push(NodeKind::Other, throw.span, parent);
                self.lower_expression(&throw.argument, node);
            }
            Statement::ExportNamedDeclaration(export) => {
                let node = self.tree.push(NodeKind::Other, export.span, parent);
                if let Some(declaration) = &export.declaration {
                    self.lower_declaration(declaration, node);
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                let node = self.tree.push(NodeKind::Other, export.span, parent);
                match &export.declaration {
                    oxc_ast::ast::ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.lower_function(func, node);
                    }
                    oxc_ast::ast::ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        self.lower_class(class, node);
                    }
                    declaration => {
                        if let Some(expr) = declaration.as_expression() {
                            self.lower_expression(expr, node);
                        }
                    }
                }
            }
            _ => {
                self.tree.push(NodeKind::Other, stmt.span(), parent);
            }
        }
    }

    fn lower_declaration(&mut self, declaration: &Declaration<'_>, parent: NodeId) {
        match declaration {
            Declaration::VariableDeclaration(decl) => {
                for declarator in decl.declarations.iter() {
                    let node = self.tree.push(
                        NodeKind::VariableDeclarator {
                            second_binding: second_array_binding(&declarator.id),
                        },
                        declarator.span,
                        parent,
                    );
                    if let Some(init) = &declarator.init {
                        self.lower_expression(init, node);
                    }
                }
            }
            Declaration::FunctionDeclaration(func) => {
                self.lower_function(func, parent);
            }
            Declaration::ClassDeclaration(class) => {
                self.lower_class(class, parent);
            }
            _ => {
                self.tree
                    .push(NodeKind::Other, declaration.span(), parent);
            }
        }
    }

    fn lower_block(&mut self, block: &oxc_ast::ast::BlockStatement<'_>, parent: NodeId) {
        let node = self.tree.push(NodeKind::Block, block.span, parent);
        for stmt in block.body.iter() {
            self.lower_statement(stmt, node);
        }
    }

    /// Lower one expression, always emitting exactly one direct child of
    /// `parent`. Call-argument indices rely on this invariant.
    fn lower_expression(&mut self, expr: &Expression<'_>, parent: NodeId) {
        match expr {
            Expression::Identifier(id) => {
                self.tree.push(
                    NodeKind::Identifier(CompactString::new(id.name.as_str())),
                    id.span,
                    parent,
                );
            }
            Expression::CallExpression(call) => {
                self.lower_call(call, parent);
            }
            Expression::ArrowFunctionExpression(arrow) => {
                let node = self.tree.push(
                    NodeKind::Function {
                        concise: arrow.expression,
                        rest_bound: first_param_rest(&arrow.params),
                    },
                    arrow.span,
                    parent,
                );
                if arrow.expression {
                    // Concise arrow: the body is a single implicit-return
                    // expression, stored by OXC as one expression statement.
                    if let Some(Statement::ExpressionStatement(expr_stmt)) =
                        arrow.body.statements.first()
                    {
                        self.lower_expression(&expr_stmt.expression, node);
                    }
                } else {
                    let block = self.tree.push(NodeKind::Block, arrow.body.span, node);
                    for stmt in arrow.body.statements.iter() {
                        self.lower_statement(stmt, block);
                    }
                }
            }
            Expression::FunctionExpression(func) => {
                self.lower_function(func, parent);
            }
            Expression::StaticMemberExpression(member) => {
                let node = self.tree.push(NodeKind::Other, member.span, parent);
                self.lower_expression(&member.object, node);
                self.tree.push(
                    NodeKind::Identifier(CompactString::new(member.property.name.as_str())),
                    member.property.span,
                    node,
                );
            }
            Expression::ComputedMemberExpression(member) => {
                let node = self.tree.push(NodeKind::Other, member.span, parent);
                self.lower_expression(&member.object, node);
                self.lower_expression(&member.expression, node);
            }
            Expression::PrivateFieldExpression(field) => {
                let node = self.tree.push(NodeKind::Other, field.span, parent);
                self.lower_expression(&field.object, node);
            }
            Expression::ChainExpression(chain) => {
                let node = self.tree.push(NodeKind::Other, chain.span, parent);
                match &chain.expression {
                    ChainElement::CallExpression(call) => {
                        self.lower_call(call, node);
                    }
                    ChainElement::TSNonNullExpression(inner) => {
                        self.lower_expression(&inner.expression, node);
                    }
                    ChainElement::StaticMemberExpression(member) => {
                        self.lower_expression(&member.object, node);
                        self.tree.push(
                            NodeKind::Identifier(CompactString::new(
                                member.property.name.as_str(),
                            )),
                            member.property.span,
                            node,
                        );
                    }
                    ChainElement::ComputedMemberExpression(member) => {
                        self.lower_expression(&member.object, node);
                        self.lower_expression(&member.expression, node);
                    }
                    ChainElement::PrivateFieldExpression(field) => {
                        self.lower_expression(&field.object, node);
                    }
                }
            }
            Expression::ObjectExpression(obj) => {
                let node = self.tree.push(NodeKind::ObjectLiteral, obj.span, parent);
                for prop in obj.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => {
                            match &p.key {
                                PropertyKey::StaticIdentifier(key) => {
                                    self.tree.push(
                                        NodeKind::Identifier(CompactString::new(
                                            key.name.as_str(),
                                        )),
                                        key.span,
                                        node,
                                    );
                                }
                                PropertyKey::PrivateIdentifier(_) => {}
                                key => {
                                    if let Some(key_expr) = key.as_expression() {
                                        self.lower_expression(key_expr, node);
                                    }
                                }
                            }
                            self.lower_expression(&p.value, node);
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.lower_expression(&spread.argument, node);
                        }
                    }
                }
            }
            Expression::ArrayExpression(arr) => {
                let node = self.tree.push(
                    NodeKind::ArrayLiteral {
                        elements: arr.elements.len() as u32,
                    },
                    arr.span,
                    parent,
                );
                for elem in arr.elements.iter() {
                    match elem {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            let spread_node =
                                self.tree.push(NodeKind::Other, spread.span, node);
                            self.lower_expression(&spread.argument, spread_node);
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        _ => {
                            if let Some(expr) = elem.as_expression() {
                                self.lower_expression(expr, node);
                            }
                        }
                    }
                }
            }
            // ESTree has no node for parentheses; neither does this tree.
            Expression::ParenthesizedExpression(paren) => {
                self.lower_expression(&paren.expression, parent);
            }
            Expression::ConditionalExpression(cond) => {
                let node = self.tree.push(NodeKind::Other, cond.span, parent);
                self.lower_expression(&cond.test, node);
                self.lower_expression(&cond.consequent, node);
                self.lower_expression(&cond.alternate, node);
            }
            Expression::LogicalExpression(logical) => {
                let node = self.tree.push(NodeKind::Other, logical.span, parent);
                self.lower_expression(&logical.left, node);
                self.lower_expression(&logical.right, node);
            }
            Expression::BinaryExpression(binary) => {
                let node = self.tree.push(NodeKind::Other, binary.span, parent);
                self.lower_expression(&binary.left, node);
                self.lower_expression(&binary.right, node);
            }
            Expression::AssignmentExpression(assign) => {
                let node = self.tree.push(NodeKind::Other, assign.span, parent);
                self.lower_expression(&assign.right, node);
            }
            Expression::SequenceExpression(seq) => {
                let node = self.tree.push(NodeKind::Other, seq.span, parent);
                for expr in seq.expressions.iter() {
                    self.lower_expression(expr, node);
                }
            }
            Expression::AwaitExpression(await_expr) => {
                let node = self.tree.push(NodeKind::Other, await_expr.span, parent);
                self.lower_expression(&await_expr.argument, node);
            }
            Expression::UnaryExpression(unary) => {
                let node = self.tree.push(NodeKind::Other, unary.span, parent);
                self.lower_expression(&unary.argument, node);
            }
            Expression::NewExpression(new_expr) => {
                let node = self.tree.push(NodeKind::Other, new_expr.span, parent);
                self.lower_expression(&new_expr.callee, node);
                self.lower_arguments(&new_expr.arguments, node);
            }
            Expression::TemplateLiteral(template) => {
                let node = self.tree.push(NodeKind::Other, template.span, parent);
                for expr in template.expressions.iter() {
                    self.lower_expression(expr, node);
                }
            }
            Expression::TaggedTemplateExpression(tagged) => {
                let node = self.tree.push(NodeKind::Other, tagged.span, parent);
                self.lower_expression(&tagged.tag, node);
                for expr in tagged.quasi.expressions.iter() {
                    self.lower_expression(expr, node);
                }
            }
            Expression::TSAsExpression(ts_as) => {
                let node = self.tree.push(NodeKind::Other, ts_as.span, parent);
                self.lower_expression(&ts_as.expression, node);
            }
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                let node = self.tree.push(NodeKind::Other, ts_satisfies.span, parent);
                self.lower_expression(&ts_satisfies.expression, node);
            }
            Expression::TSNonNullExpression(ts_non_null) => {
                let node = self.tree.push(NodeKind::Other, ts_non_null.span, parent);
                self.lower_expression(&ts_non_null.expression, node);
            }
            // JSX markup is opaque, but expressions embedded in attributes
            // and children still lower so identifier mentions inside them
            // stay visible.
            Expression::JSXElement(element) => {
                let node = self.tree.push(NodeKind::Other, element.span, parent);
                self.lower_jsx_element(element, node);
            }
            Expression::JSXFragment(fragment) => {
                let node = self.tree.push(NodeKind::Other, fragment.span, parent);
                self.lower_jsx_children(&fragment.children, node);
            }
            _ => {
                self.tree.push(NodeKind::Other, expr.span(), parent);
            }
        }
    }

    fn lower_jsx_element(&mut self, element: &JSXElement<'_>, parent: NodeId) {
        for attr in element.opening_element.attributes.iter() {
            match attr {
                JSXAttributeItem::Attribute(attr) => match &attr.value {
                    Some(JSXAttributeValue::ExpressionContainer(container)) => {
                        if let Some(expr) = container.expression.as_expression() {
                            self.lower_expression(expr, parent);
                        }
                    }
                    Some(JSXAttributeValue::Element(inner)) => {
                        let node = self.tree.push(NodeKind::Other, inner.span, parent);
                        self.lower_jsx_element(inner, node);
                    }
                    Some(JSXAttributeValue::Fragment(inner)) => {
                        let node = self.tree.push(NodeKind::Other, inner.span, parent);
                        self.lower_jsx_children(&inner.children, node);
                    }
                    _ => {}
                },
                JSXAttributeItem::SpreadAttribute(spread) => {
                    self.lower_expression(&spread.argument, parent);
                }
            }
        }
        self.lower_jsx_children(&element.children, parent);
    }

    fn lower_jsx_children(&mut self, children: &[JSXChild<'_>], parent: NodeId) {
        for child in children {
            match child {
                JSXChild::ExpressionContainer(container) => {
                    if let Some(expr) = container.expression.as_expression() {
                        self.lower_expression(expr, parent);
                    }
                }
                JSXChild::Element(element) => {
                    let node = self.tree.push(NodeKind::Other, element.span, parent);
                    self.lower_jsx_element(element, node);
                }
                JSXChild::Fragment(fragment) => {
                    let node = self.tree.push(NodeKind::Other, fragment.span, parent);
                    self.lower_jsx_children(&fragment.children, node);
                }
                JSXChild::Spread(spread) => {
                    self.lower_expression(&spread.expression, parent);
                }
                JSXChild::Text(_) => {}
            }
        }
    }

    fn lower_call(&mut self, call: &CallExpression<'_>, parent: NodeId) {
        let node = self.tree.push(
            NodeKind::Call {
                callee: callee_name(&call.callee),
            },
            call.span,
            parent,
        );
        self.lower_expression(&call.callee, node);
        self.lower_arguments(&call.arguments, node);
    }

    fn lower_arguments(&mut self, arguments: &[Argument<'_>], parent: NodeId) {
        for arg in arguments {
            match arg {
                Argument::SpreadElement(spread) => {
                    let node = self.tree.push(NodeKind::Other, spread.span, parent);
                    self.lower_expression(&spread.argument, node);
                }
                _ => {
                    if let Some(expr) = arg.as_expression() {
                        self.lower_expression(expr, parent);
                    } else {
                        // Keeps argument indices aligned with the source.
                        self.tree.push(NodeKind::Other, arg.span(), parent);
                    }
                }
            }
        }
    }

    fn lower_function(&mut self, func: &Function<'_>, parent: NodeId) {
        let node = self.tree.push(
            NodeKind::Function {
                concise: false,
                rest_bound: first_param_rest(&func.params),
            },
            func.span,
            parent,
        );
        if let Some(body) = &func.body {
            let block = self.tree.push(NodeKind::Block, body.span, node);
            for stmt in body.statements.iter() {
                self.lower_statement(stmt, block);
            }
        }
    }

    fn lower_class(&mut self, class: &Class<'_>, parent: NodeId) {
        let node = self.tree.push(NodeKind::Other, class.span, parent);
        for element in class.body.body.iter() {
            match element {
                ClassElement::MethodDefinition(method) => {
                    self.lower_function(&method.value, node);
                }
                ClassElement::PropertyDefinition(property) => {
                    if let Some(value) = &property.value {
                        self.lower_expression(value, node);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Name of a call target: a bare identifier, or the property name of a
/// static member access (namespace-qualified call form).
fn callee_name(callee: &Expression<'_>) -> Option<CompactString> {
    match callee {
        Expression::Identifier(id) => Some(CompactString::new(id.name.as_str())),
        Expression::StaticMemberExpression(member) => {
            Some(CompactString::new(member.property.name.as_str()))
        }
        Expression::ParenthesizedExpression(paren) => callee_name(&paren.expression),
        _ => None,
    }
}

/// Identifiers bound by the rest element of the first parameter's
/// destructuring pattern (`([a, ...rest]) =>` or `({ a, ...rest }) =>`).
fn first_param_rest(params: &FormalParameters<'_>) -> SmallVec<[CompactString; 1]> {
    let mut names = SmallVec::new();
    if let Some(param) = params.items.first() {
        match &param.pattern {
            BindingPattern::ArrayPattern(array) => {
                if let Some(rest) = &array.rest {
                    push_rest_name(&rest.argument, &mut names);
                }
            }
            BindingPattern::ObjectPattern(object) => {
                if let Some(rest) = &object.rest {
                    push_rest_name(&rest.argument, &mut names);
                }
            }
            _ => {}
        }
    }
    names
}

fn push_rest_name(pattern: &BindingPattern<'_>, names: &mut SmallVec<[CompactString; 1]>) {
    if let BindingPattern::BindingIdentifier(id) = pattern {
        names.push(CompactString::new(id.name.as_str()));
    }
}

/// The bare identifier bound by the second element of an array destructuring
/// pattern, as in `const [value, setValue] = useState()`.
fn second_array_binding(id: &BindingPattern<'_>) -> Option<CompactString> {
    if let BindingPattern::ArrayPattern(array) = id {
        if let Some(Some(element)) = array.elements.get(1) {
            if let BindingPattern::BindingIdentifier(ident) = element {
                return Some(CompactString::new(ident.name.as_str()));
            }
        }
    }
    None
}
