use super::ast::{
    BinaryOp, Call, Class, ClassVarDec, ClassVarKind, Expr, KeywordConst, Stmt, SubKind,
    Subroutine, Term, Type, UnaryOp, VarDec,
};
use super::parsercore::Parser;
use super::token::{Kw, Token, TokenKind::*};
use crate::error::Error;
use crate::{check, check_second, expect, optional, repeat};

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Parse exactly one class. Nothing may follow its closing brace.
    pub fn parse(mut self) -> Result<Class, Error> {
        let class = self.parse_class()?;
        self.expect_end()?;
        Ok(class)
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    fn parse_ident(&mut self) -> Result<String, Error> {
        self.expect_map(|kind| match kind {
            Ident(name) => Some(name.clone()),
            _ => None,
        })
    }

    /// class = "class" ident "{" { class-var-dec } { subroutine-dec } "}"
    fn parse_class(&mut self) -> Result<Class, Error> {
        expect!(self, Keyword(Kw::Class))?;
        let name = self.parse_ident()?;
        expect!(self, Symbol('{'))?;

        let mut vars = Vec::new();
        while check!(self, Keyword(Kw::Static | Kw::Field)) {
            vars.push(self.parse_class_var_dec()?);
        }

        let mut subs = Vec::new();
        while check!(self, Keyword(Kw::Constructor | Kw::Function | Kw::Method)) {
            subs.push(self.parse_subroutine()?);
        }

        expect!(self, Symbol('}'))?;
        Ok(Class { name, vars, subs })
    }

    /// class-var-dec = ( "static" | "field" ) type ident { "," ident } ";"
    fn parse_class_var_dec(&mut self) -> Result<ClassVarDec, Error> {
        let kind = self.expect_map(|kind| match kind {
            Keyword(Kw::Static) => Some(ClassVarKind::Static),
            Keyword(Kw::Field) => Some(ClassVarKind::Field),
            _ => None,
        })?;
        let ty = self.parse_type()?;
        let names = self.parse_names()?;
        Ok(ClassVarDec(kind, ty, names))
    }

    /// type = "int" | "char" | "boolean" | ident
    fn parse_type(&mut self) -> Result<Type, Error> {
        self.expect_map(|kind| match kind {
            Keyword(Kw::Int) => Some(Type::Int),
            Keyword(Kw::Char) => Some(Type::Char),
            Keyword(Kw::Boolean) => Some(Type::Boolean),
            Ident(name) => Some(Type::Class(name.clone())),
            _ => None,
        })
    }

    /// subroutine-dec = ( "constructor" | "function" | "method" ) ( "void" | type ) ident
    ///                  "(" [ type ident { "," type ident } ] ")" subroutine-body
    fn parse_subroutine(&mut self) -> Result<Subroutine, Error> {
        let kind = self.expect_map(|kind| match kind {
            Keyword(Kw::Constructor) => Some(SubKind::Constructor),
            Keyword(Kw::Function) => Some(SubKind::Function),
            Keyword(Kw::Method) => Some(SubKind::Method),
            _ => None,
        })?;
        let ret = if check!(self, Keyword(Kw::Void)) {
            expect!(self, Keyword(Kw::Void))?;
            None
        } else {
            Some(self.parse_type()?)
        };
        let name = self.parse_ident()?;

        expect!(self, Symbol('('))?;
        let params = repeat!(self, self.parse_param(), Symbol(','), Symbol(')'));
        expect!(self, Symbol(')'))?;

        // subroutine-body = "{" { var-dec } { stmt } "}"
        expect!(self, Symbol('{'))?;
        let mut locals = Vec::new();
        while check!(self, Keyword(Kw::Var)) {
            locals.push(self.parse_var_dec()?);
        }
        let body = self.parse_stmts()?;

        Ok(Subroutine {
            kind,
            ret,
            name,
            params,
            locals,
            body,
        })
    }

    /// param = type ident
    fn parse_param(&mut self) -> Result<(Type, String), Error> {
        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        Ok((ty, name))
    }

    /// var-dec = "var" type ident { "," ident } ";"
    fn parse_var_dec(&mut self) -> Result<VarDec, Error> {
        expect!(self, Keyword(Kw::Var))?;
        let ty = self.parse_type()?;
        let names = self.parse_names()?;
        Ok(VarDec(ty, names))
    }

    /// names = ident { "," ident } ";"
    fn parse_names(&mut self) -> Result<Vec<String>, Error> {
        let mut names = vec![self.parse_ident()?];
        while check!(self, Symbol(',')) {
            expect!(self, Symbol(','))?;
            names.push(self.parse_ident()?);
        }
        expect!(self, Symbol(';'))?;
        Ok(names)
    }

    /// stmts = { stmt } "}"
    fn parse_stmts(&mut self) -> Result<Vec<Stmt>, Error> {
        let stmts = repeat!(self, self.parse_stmt(), Symbol('}'));
        expect!(self, Symbol('}'))?;
        Ok(stmts)
    }

    /// stmt = let-stmt | if-stmt | while-stmt | do-stmt | return-stmt
    fn parse_stmt(&mut self) -> Result<Stmt, Error> {
        let Some(token) = self.peek() else {
            return Err(Error::UnexpectedEOF);
        };
        match token.kind {
            // Let statement: "let" ident [ "[" expr "]" ] "=" expr ";"
            Keyword(Kw::Let) => {
                expect!(self, Keyword(Kw::Let))?;
                let name = self.parse_ident()?;
                let index = optional!(self, Symbol('['), {
                    let index = self.parse_expr()?;
                    expect!(self, Symbol(']'))?;
                    index
                });
                expect!(self, Symbol('='))?;
                let rhs = self.parse_expr()?;
                expect!(self, Symbol(';'))?;
                Ok(Stmt::Let(name, index, rhs))
            }

            // Conditional statement: "if" "(" expr ")" "{" stmts [ "else" "{" stmts ]
            Keyword(Kw::If) => {
                expect!(self, Keyword(Kw::If))?;
                let cond = self.parse_cond()?;
                expect!(self, Symbol('{'))?;
                let then = self.parse_stmts()?;
                let other = optional!(self, Keyword(Kw::Else), {
                    expect!(self, Symbol('{'))?;
                    self.parse_stmts()?
                });
                Ok(Stmt::If(cond, then, other))
            }

            // Loop statement: "while" "(" expr ")" "{" stmts
            Keyword(Kw::While) => {
                expect!(self, Keyword(Kw::While))?;
                let cond = self.parse_cond()?;
                expect!(self, Symbol('{'))?;
                let body = self.parse_stmts()?;
                Ok(Stmt::While(cond, body))
            }

            // Do statement: "do" call ";"
            Keyword(Kw::Do) => {
                expect!(self, Keyword(Kw::Do))?;
                let call = self.parse_call()?;
                expect!(self, Symbol(';'))?;
                Ok(Stmt::Do(call))
            }

            // Return statement: "return" [ expr ] ";"
            Keyword(Kw::Return) => {
                expect!(self, Keyword(Kw::Return))?;
                let expr = if !check!(self, Symbol(';')) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                expect!(self, Symbol(';'))?;
                Ok(Stmt::Return(expr))
            }

            _ => Err(Error::UnexpectedToken(token.into())),
        }
    }

    /// cond = "(" expr ")"
    fn parse_cond(&mut self) -> Result<Expr, Error> {
        expect!(self, Symbol('('))?;
        let cond = self.parse_expr()?;
        expect!(self, Symbol(')'))?;
        Ok(cond)
    }

    /// expr = term { op term }
    fn parse_expr(&mut self) -> Result<Expr, Error> {
        let head = self.parse_term()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek().and_then(|token| match token.kind {
            Symbol(ch) => BinaryOp::from_symbol(ch),
            _ => None,
        }) {
            self.next();
            rest.push((op, self.parse_term()?));
        }
        Ok(Expr(head, rest))
    }

    /// term = int-const | string-const | keyword-const | "(" expr ")" | ( "-" | "~" ) term
    ///      | ident | ident "[" expr "]" | call
    fn parse_term(&mut self) -> Result<Term, Error> {
        let Some(token) = self.peek() else {
            return Err(Error::UnexpectedEOF);
        };
        match &token.kind {
            Int(num) => {
                let num = *num;
                self.next();
                Ok(Term::Int(num))
            }

            Str(text) => {
                let text = text.clone();
                self.next();
                Ok(Term::Str(text))
            }

            Keyword(kw @ (Kw::True | Kw::False | Kw::Null | Kw::This)) => {
                let value = match kw {
                    Kw::True => KeywordConst::True,
                    Kw::False => KeywordConst::False,
                    Kw::Null => KeywordConst::Null,
                    _ => KeywordConst::This,
                };
                self.next();
                Ok(Term::Const(value))
            }

            Symbol('(') => {
                expect!(self, Symbol('('))?;
                let expr = self.parse_expr()?;
                expect!(self, Symbol(')'))?;
                Ok(Term::Paren(Box::new(expr)))
            }

            Symbol(ch @ ('-' | '~')) => {
                let op = if *ch == '-' { UnaryOp::Neg } else { UnaryOp::Not };
                self.next();
                let term = self.parse_term()?;
                Ok(Term::Unary(op, Box::new(term)))
            }

            // The token after the identifier picks one of its four forms
            Ident(_) => {
                if check_second!(self, Symbol('(' | '.')) {
                    return Ok(Term::Call(self.parse_call()?));
                }
                let name = self.parse_ident()?;
                match optional!(self, Symbol('['), self.parse_expr()?) {
                    Some(index) => {
                        expect!(self, Symbol(']'))?;
                        Ok(Term::Index(name, Box::new(index)))
                    }
                    None => Ok(Term::Var(name)),
                }
            }

            _ => Err(Error::UnexpectedToken(token.into())),
        }
    }

    /// call = [ ident "." ] ident "(" [ expr { "," expr } ] ")"
    fn parse_call(&mut self) -> Result<Call, Error> {
        let first = self.parse_ident()?;
        let (receiver, name) = match optional!(self, Symbol('.'), self.parse_ident()?) {
            Some(name) => (Some(first), name),
            None => (None, first),
        };
        expect!(self, Symbol('('))?;
        let args = repeat!(self, self.parse_expr(), Symbol(','), Symbol(')'));
        expect!(self, Symbol(')'))?;
        Ok(Call {
            receiver,
            name,
            args,
        })
    }
}
