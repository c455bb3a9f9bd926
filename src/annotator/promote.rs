//! Type compatibility.
//!
//! The annotator never decides on its own whether a value of one type may be
//! stored in a slot of another; it asks a [`TypeOracle`].

use thiserror::Error;

use crate::ast::types::LoxType;

/// Where the value being promoted is flowing to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionContext {
    /// `name = value`
    Assignment,
    /// `var name: T = value`
    Initializer,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("{from} does not promote to {to}")]
    NotPromotable { to: LoxType, from: LoxType },
    #[error("value has no known type")]
    Unknown,
}

pub trait TypeOracle {
    /// Checks that a value of type `source` can be stored in a slot of type
    /// `target`, returning the type the stored value takes.
    fn promote(
        &self,
        target: LoxType,
        source: Option<LoxType>,
        context: PromotionContext,
    ) -> Result<LoxType, TypeError>;
}

/// The language's own promotion rules: identity, plus `int` widening to `double`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoxPromotion;

impl TypeOracle for LoxPromotion {
    fn promote(
        &self,
        target: LoxType,
        source: Option<LoxType>,
        _context: PromotionContext,
    ) -> Result<LoxType, TypeError> {
        let source = source.ok_or(TypeError::Unknown)?;

        match (target, source) {
            (LoxType::Void, _) | (_, LoxType::Void) => Err(TypeError::NotPromotable {
                to: target,
                from: source,
            }),
            (target, source) if target == source => Ok(target),
            (LoxType::Double, LoxType::Int) => Ok(LoxType::Double),
            _ => Err(TypeError::NotPromotable {
                to: target,
                from: source,
            }),
        }
    }
}
