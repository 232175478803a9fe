use super::Labels;
use crate::{
    error::Error,
    grammer::ast,
    symbols::{Kind, Resolved, SymbolTable},
};
use itertools::chain;
use vm::{ArithOp, Code, Inst, Segment};

/// Generates the code of one class. The symbol table lives as long as the class.
pub struct ClassCompiler<'a> {
    class: &'a ast::Class,
    symbols: SymbolTable,
    labels: &'a mut Labels,
    void: bool,
}

impl<'a> ClassCompiler<'a> {
    pub fn new(class: &'a ast::Class, labels: &'a mut Labels) -> Self {
        Self {
            class,
            symbols: SymbolTable::new(),
            labels,
            void: false,
        }
    }

    pub fn compile(mut self) -> Result<Code, Error> {
        let class = self.class;

        // Fields must all be known before any constructor sizes its object
        for ast::ClassVarDec(kind, ty, names) in &class.vars {
            let kind = match kind {
                ast::ClassVarKind::Static => Kind::Static,
                ast::ClassVarKind::Field => Kind::Field,
            };
            for name in names {
                self.symbols.define(name, &ty.to_string(), kind);
            }
        }

        let mut code = Code::new();
        for sub in &class.subs {
            code.extend(self.compile_subroutine(sub)?);
        }
        Ok(code)
    }

    fn compile_subroutine(&mut self, sub: &ast::Subroutine) -> Result<Vec<Inst>, Error> {
        self.symbols.start_subroutine();
        self.void = sub.ret.is_none();

        // The receiver comes before the declared parameters
        if sub.kind == ast::SubKind::Method {
            self.symbols.define("this", &self.class.name, Kind::Argument);
        }
        for (ty, name) in &sub.params {
            self.symbols.define(name, &ty.to_string(), Kind::Argument);
        }
        for ast::VarDec(ty, names) in &sub.locals {
            for name in names {
                self.symbols.define(name, &ty.to_string(), Kind::Local);
            }
        }

        let name = format!("{}.{}", self.class.name, sub.name);
        let nlocals = self.symbols.count(Kind::Local);

        let prologue = match sub.kind {
            ast::SubKind::Constructor => vec![
                Inst::Push(Segment::Constant, self.symbols.count(Kind::Field)),
                Inst::call("Memory.alloc", 1),
                Inst::Pop(Segment::Pointer, 0),
            ],
            ast::SubKind::Method => vec![
                Inst::Push(Segment::Argument, 0),
                Inst::Pop(Segment::Pointer, 0),
            ],
            ast::SubKind::Function => vec![],
        };

        let body = self.compile_stmts(&sub.body)?;

        Ok(chain!([Inst::Function(name, nlocals)], prologue, body).collect())
    }

    fn compile_stmts(&mut self, stmts: &[ast::Stmt]) -> Result<Vec<Inst>, Error> {
        let mut insts = Vec::new();
        for stmt in stmts {
            insts.extend(self.compile_stmt(stmt)?);
        }
        Ok(insts)
    }

    fn compile_stmt(&mut self, stmt: &ast::Stmt) -> Result<Vec<Inst>, Error> {
        match stmt {
            ast::Stmt::Let(name, None, rhs) => {
                let (seg, idx) = self.variable(name)?;
                let rhs = self.compile_expr(rhs)?;
                Ok(chain!(rhs, [Inst::Pop(seg, idx)]).collect())
            }

            // The address is computed first and waits on the stack while the
            // value is evaluated, since the value may itself move `pointer 1`.
            ast::Stmt::Let(name, Some(index), rhs) => {
                let (seg, idx) = self.variable(name)?;
                let index = self.compile_expr(index)?;
                let rhs = self.compile_expr(rhs)?;
                Ok(chain!(
                    [Inst::Push(seg, idx)],
                    index,
                    [Inst::Arith(ArithOp::Add)],
                    rhs,
                    [
                        Inst::Pop(Segment::Temp, 0),
                        Inst::Pop(Segment::Pointer, 1),
                        Inst::Push(Segment::Temp, 0),
                        Inst::Pop(Segment::That, 0),
                    ]
                )
                .collect())
            }

            ast::Stmt::If(cond, then_stmts, else_stmts) => {
                let (l_false, l_end) = self.labels.pair("IF", "FALSE", "END");
                let cond = self.compile_expr(cond)?;
                let then_insts = self.compile_stmts(then_stmts)?;
                let else_insts = match else_stmts {
                    Some(stmts) => self.compile_stmts(stmts)?,
                    None => vec![],
                };
                Ok(chain!(
                    cond,
                    [Inst::Arith(ArithOp::Not), Inst::IfGoto(l_false.clone())],
                    then_insts,
                    [Inst::Goto(l_end.clone()), Inst::Label(l_false)],
                    else_insts,
                    [Inst::Label(l_end)]
                )
                .collect())
            }

            ast::Stmt::While(cond, body) => {
                let (l_exp, l_end) = self.labels.pair("WHILE", "EXP", "END");
                let cond = self.compile_expr(cond)?;
                let body = self.compile_stmts(body)?;
                Ok(chain!(
                    [Inst::Label(l_exp.clone())],
                    cond,
                    [Inst::Arith(ArithOp::Not), Inst::IfGoto(l_end.clone())],
                    body,
                    [Inst::Goto(l_exp), Inst::Label(l_end)]
                )
                .collect())
            }

            // Every callee returns a value; discard it
            ast::Stmt::Do(call) => {
                let call = self.compile_call(call)?;
                Ok(chain!(call, [Inst::Pop(Segment::Temp, 0)]).collect())
            }

            ast::Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.compile_expr(expr)?,
                    None => vec![],
                };
                let dummy = if self.void {
                    vec![Inst::Push(Segment::Constant, 0)]
                } else {
                    vec![]
                };
                Ok(chain!(value, dummy, [Inst::Return]).collect())
            }
        }
    }

    fn compile_expr(&self, expr: &ast::Expr) -> Result<Vec<Inst>, Error> {
        let ast::Expr(head, rest) = expr;
        let mut insts = self.compile_term(head)?;
        for (op, term) in rest {
            insts.extend(self.compile_term(term)?);
            insts.push(match op {
                ast::BinaryOp::Add => Inst::Arith(ArithOp::Add),
                ast::BinaryOp::Sub => Inst::Arith(ArithOp::Sub),
                ast::BinaryOp::Mul => Inst::call("Math.multiply", 2),
                ast::BinaryOp::Div => Inst::call("Math.divide", 2),
                ast::BinaryOp::And => Inst::Arith(ArithOp::And),
                ast::BinaryOp::Or => Inst::Arith(ArithOp::Or),
                ast::BinaryOp::Lt => Inst::Arith(ArithOp::Lt),
                ast::BinaryOp::Gt => Inst::Arith(ArithOp::Gt),
                ast::BinaryOp::Eq => Inst::Arith(ArithOp::Eq),
            });
        }
        Ok(insts)
    }

    fn compile_term(&self, term: &ast::Term) -> Result<Vec<Inst>, Error> {
        match term {
            ast::Term::Int(num) => Ok(vec![Inst::Push(Segment::Constant, *num)]),

            // The lexer keeps the length and every code point within 0..=32767
            ast::Term::Str(text) => {
                let mut insts = vec![
                    Inst::Push(Segment::Constant, text.chars().count() as u16),
                    Inst::call("String.new", 1),
                ];
                for ch in text.chars() {
                    insts.push(Inst::Push(Segment::Constant, ch as u16));
                    insts.push(Inst::call("String.appendChar", 2));
                }
                Ok(insts)
            }

            ast::Term::Const(value) => Ok(match value {
                ast::KeywordConst::This => vec![Inst::Push(Segment::Pointer, 0)],
                ast::KeywordConst::True => vec![
                    Inst::Push(Segment::Constant, 1),
                    Inst::Arith(ArithOp::Neg),
                ],
                ast::KeywordConst::False | ast::KeywordConst::Null => {
                    vec![Inst::Push(Segment::Constant, 0)]
                }
            }),

            ast::Term::Paren(expr) => self.compile_expr(expr),

            ast::Term::Unary(op, term) => {
                let op = match op {
                    ast::UnaryOp::Neg => ArithOp::Neg,
                    ast::UnaryOp::Not => ArithOp::Not,
                };
                Ok(chain!(self.compile_term(term)?, [Inst::Arith(op)]).collect())
            }

            ast::Term::Var(name) => {
                let (seg, idx) = self.variable(name)?;
                Ok(vec![Inst::Push(seg, idx)])
            }

            ast::Term::Index(name, index) => {
                let (seg, idx) = self.variable(name)?;
                Ok(chain!(
                    [Inst::Push(seg, idx)],
                    self.compile_expr(index)?,
                    [
                        Inst::Arith(ArithOp::Add),
                        Inst::Pop(Segment::Pointer, 1),
                        Inst::Push(Segment::That, 0),
                    ]
                )
                .collect())
            }

            ast::Term::Call(call) => self.compile_call(call),
        }
    }

    fn compile_call(&self, call: &ast::Call) -> Result<Vec<Inst>, Error> {
        let mut args = Vec::new();
        for arg in &call.args {
            args.extend(self.compile_expr(arg)?);
        }
        let argc = call.args.len() as u16;

        match &call.receiver {
            // Bare call: a method of this class on the current object
            None => Ok(chain!(
                [Inst::Push(Segment::Pointer, 0)],
                args,
                [Inst::Call(format!("{}.{}", self.class.name, call.name), argc + 1)]
            )
            .collect()),

            Some(receiver) => match self.symbols.resolve(receiver) {
                // Method call on an object variable
                Resolved::Variable(symbol) => Ok(chain!(
                    [Inst::Push(symbol.kind.segment(), symbol.index)],
                    args,
                    [Inst::Call(format!("{}.{}", symbol.ty, call.name), argc + 1)]
                )
                .collect()),

                // Function or constructor of a class
                Resolved::Unresolved => Ok(chain!(
                    args,
                    [Inst::Call(format!("{}.{}", receiver, call.name), argc)]
                )
                .collect()),
            },
        }
    }

    fn variable(&self, name: &str) -> Result<(Segment, u16), Error> {
        match self.symbols.resolve(name) {
            Resolved::Variable(symbol) => Ok((symbol.kind.segment(), symbol.index)),
            Resolved::Unresolved => Err(Error::UndefinedVariable(name.to_string())),
        }
    }
}
