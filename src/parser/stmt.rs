use crate::{
    ast::{
        ast::Stmt,
        statements::{
            BlockStmt, Declaration, ExpressionStmt, FnDeclStmt, IfStmt, LoopControl,
            LoopControlStmt, PrintStmt, ReturnStmt, VarDeclStmt, WhileStmt,
        },
        types::LoxType,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();
    if let Some(handler) = handler {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt {
        span: Span {
            start: expression.get_span().start.clone(),
            end: parser.previous_end(),
        },
        expression,
    }))
}

/// `name: type`, as written in variable and parameter declarations.
fn parse_declaration(parser: &mut Parser, context: &str) -> Result<Declaration, Error> {
    let error = parser.unexpected(&format!("expected identifier during {}", context));
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let error = parser.unexpected(&format!("expected ':' and a type during {}", context));
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let ty = parse_type(parser)?;

    Ok(Declaration::new(name.value, name.span, ty))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let declaration = parse_declaration(parser, "variable declaration")?;

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        declaration,
        assigned_value,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body: Box::new(then_body),
        else_body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body: Box::new(body),
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_loop_control_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();
    let kind = if token.kind == TokenKind::Break {
        LoopControl::Break
    } else {
        LoopControl::Continue
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::LoopControl(LoopControlStmt {
        kind,
        span: Span {
            start: token.span.start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Print(PrintStmt {
        expression,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected '}' to close block"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?;

    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = Vec::new();
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            parameters.push(parse_declaration(parser, "parameter declaration")?);
            if parser.current_token_kind() != TokenKind::Comma {
                break;
            }
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        LoxType::Void
    };

    let body = parse_block(parser)?;

    Ok(Stmt::FnDecl(FnDeclStmt {
        declaration: Declaration::new(name.value, name.span, return_type),
        parameters,
        body,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        implicit: false,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
