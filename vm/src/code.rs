use crate::{error::InstParseError, inst::Inst};
use itertools::Itertools;
use std::fmt;

/// Ordered instruction stream of one compiled class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code(pub Vec<Inst>);

impl Code {
    pub fn new() -> Self {
        Code(Vec::new())
    }

    pub fn push(&mut self, inst: Inst) {
        self.0.push(inst);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Inst> {
        self.0.iter()
    }

    /// Parse a whole stream. Blank lines and `//` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, (usize, InstParseError)> {
        let mut code = Code::new();
        for (idx, line) in text.lines().enumerate() {
            let line = line.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            code.push(line.parse::<Inst>().map_err(|e| (idx, e))?);
        }
        Ok(code)
    }

    /// Coloured listing, one function per section.
    pub fn cformat(&self) -> String {
        self.0
            .iter()
            .map(|inst| match inst.is_function() {
                true => format!("{}\n{}", "-".repeat(55), inst.cformat()),
                false => inst.cformat(),
            })
            .join("\n")
    }
}

impl Extend<Inst> for Code {
    fn extend<T: IntoIterator<Item = Inst>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.0 {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}
