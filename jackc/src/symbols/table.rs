use indexmap::IndexMap;
use strum::Display;
use vm::Segment;

/// Storage kind of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    pub fn segment(self) -> Segment {
        match self {
            Kind::Static => Segment::Static,
            Kind::Field => Segment::This,
            Kind::Argument => Segment::Argument,
            Kind::Local => Segment::Local,
        }
    }

    fn is_class_scope(self) -> bool {
        matches!(self, Kind::Static | Kind::Field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub ty: String,
    pub kind: Kind,
    pub index: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Variable(Symbol),
    /// Not a variable: a class or subroutine name.
    Unresolved,
}

/// Class scope (statics, fields) and subroutine scope (arguments, locals).
#[derive(Debug, Default)]
pub struct SymbolTable {
    class: IndexMap<String, Symbol>,
    subroutine: IndexMap<String, Symbol>,
    counts: IndexMap<Kind, u16>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_subroutine(&mut self) {
        self.subroutine.clear();
        self.counts.insert(Kind::Argument, 0);
        self.counts.insert(Kind::Local, 0);
    }

    /// Later definitions of the same name replace earlier ones; indices are never reused.
    pub fn define(&mut self, name: &str, ty: &str, kind: Kind) {
        let count = self.counts.entry(kind).or_insert(0);
        let symbol = Symbol {
            name: name.to_string(),
            ty: ty.to_string(),
            kind,
            index: *count,
        };
        *count += 1;

        let scope = if kind.is_class_scope() {
            &mut self.class
        } else {
            &mut self.subroutine
        };
        scope.insert(name.to_string(), symbol);
    }

    pub fn count(&self, kind: Kind) -> u16 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn resolve(&self, name: &str) -> Resolved {
        match self.subroutine.get(name).or_else(|| self.class.get(name)) {
            Some(symbol) => Resolved::Variable(symbol.clone()),
            None => Resolved::Unresolved,
        }
    }
}
