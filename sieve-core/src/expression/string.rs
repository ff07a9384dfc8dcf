use super::{Expression, Operand, Predicate, keyword::*, node::Node};
use crate::{Value, push_quoted};

impl<E> Expression<E, String> {
    /// `CONCAT(self, rhs)`
    pub fn concat(&self, rhs: impl Into<Operand<E, String>>) -> Expression<E, String> {
        Expression::from_node(Node::function(
            CONCAT,
            [self.node.clone(), rhs.into().0],
        ))
    }

    pub fn like(&self, pattern: impl Into<String>) -> Predicate<E> {
        self.pattern(LIKE, pattern.into(), None)
    }

    /// `LIKE` with a custom escape character, the character is written into the text.
    pub fn like_escape(&self, pattern: impl Into<String>, escape: char) -> Predicate<E> {
        self.pattern(LIKE, pattern.into(), Some(escape))
    }

    pub fn not_like(&self, pattern: impl Into<String>) -> Predicate<E> {
        self.pattern(NOT_LIKE, pattern.into(), None)
    }

    pub fn not_like_escape(&self, pattern: impl Into<String>, escape: char) -> Predicate<E> {
        self.pattern(NOT_LIKE, pattern.into(), Some(escape))
    }

    fn pattern(&self, op: &str, pattern: String, escape: Option<char>) -> Predicate<E> {
        let mut rhs = Node::bind(Value::Varchar(Some(pattern)));
        if let Some(escape) = escape {
            let mut buffer = [0; 4];
            rhs.push_str(ESCAPE);
            let mut quoted = String::with_capacity(4);
            push_quoted(&mut quoted, escape.encode_utf8(&mut buffer));
            rhs.push_str(&quoted);
        }
        Expression::from_node(Node::binary(&self.node, op, rhs))
    }
}
