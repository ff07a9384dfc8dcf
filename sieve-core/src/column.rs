use crate::Value;

/// Declarative description of a table column.
#[derive(Default, Debug, Clone)]
pub struct ColumnDef {
    pub name: &'static str,
    /// `Value` variant describing the column type.
    pub value: Value,
    pub nullable: bool,
    /// Exactly one column of an entity is the primary key.
    pub primary_key: bool,
    /// Raw SQL default expression used in `CREATE TABLE`.
    pub default: Option<&'static str>,
}

impl ColumnDef {
    pub fn name(&self) -> &'static str {
        self.name
    }
}
