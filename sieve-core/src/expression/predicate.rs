use super::{Expression, Operand, Predicate, keyword::*, node::Node};

impl<E> Expression<E, bool> {
    pub fn is_true(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_TRUE))
    }

    pub fn is_not_true(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_NOT_TRUE))
    }

    pub fn is_false(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_FALSE))
    }

    pub fn is_not_false(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_NOT_FALSE))
    }

    pub fn is_unknown(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_UNKNOWN))
    }

    pub fn is_not_unknown(&self) -> Predicate<E> {
        Expression::from_node(Node::postfix(&self.node, IS_NOT_UNKNOWN))
    }

    pub fn and(&self, rhs: impl Into<Operand<E, bool>>) -> Predicate<E> {
        Expression::from_node(Node::binary(&self.node, AND, rhs.into().0))
    }

    pub fn or(&self, rhs: impl Into<Operand<E, bool>>) -> Predicate<E> {
        Expression::from_node(Node::binary(&self.node, OR, rhs.into().0))
    }

    pub fn not(&self) -> Predicate<E> {
        Expression::from_node(Node::prefix(NOT, &self.node))
    }
}
