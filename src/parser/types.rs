//! Type annotation parsing.
//!
//! Every type in the language is a single name, so there is no Pratt
//! machinery here: the name is looked up in `TYPE_LOOKUP`.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::types::LoxType,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

lazy_static! {
    pub static ref TYPE_LOOKUP: HashMap<&'static str, LoxType> = {
        let mut map = HashMap::new();
        map.insert("int", LoxType::Int);
        map.insert("double", LoxType::Double);
        map.insert("bool", LoxType::Bool);
        map.insert("string", LoxType::String);
        map.insert("void", LoxType::Void);
        map
    };
}

/// Parses a type name at the current token.
pub fn parse_type(parser: &mut Parser) -> Result<LoxType, Error> {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected("expected a type name"));
    }

    let token = parser.current_token();
    match TYPE_LOOKUP.get(token.value.as_str()) {
        Some(ty) => {
            let ty = *ty;
            parser.advance();
            Ok(ty)
        }
        None => Err(Error::new(
            ErrorImpl::UnknownType {
                type_: token.value.clone(),
            },
            token.span.start.clone(),
        )),
    }
}
