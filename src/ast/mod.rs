/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The statement and expression enums, plus the tree printer
/// - expressions: Payloads of the expression variants and resolved references
/// - statements: Payloads of the statement variants and declarations
/// - types: The primitive types of the language
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
