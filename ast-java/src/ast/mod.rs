pub mod decl;
pub mod expr;
pub mod kind;
pub mod modifiers;
pub mod node;
pub mod stmt;
pub mod type_expr;
