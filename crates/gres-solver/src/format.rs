//! Reflection-style names for resolved types.
//!
//! ```text
//! System.Object
//! System.Collections.Generic.List`1
//! System.Collections.Generic.List`1[[System.String]]
//! `0      (type parameter #0 of a type definition)
//! ``1     (type parameter #1 of a method)
//! ```

use crate::compilation::Compilation;
use crate::decl::{SymbolKind, TypeDefKey};
use crate::types::{TypeData, TypeDefId, TypeId, TypeParamId};
use std::fmt::Write;

pub struct TypeFormatter<'a> {
    compilation: &'a Compilation,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(compilation: &'a Compilation) -> Self {
        Self { compilation }
    }

    /// Reflection name of a type. Handles from another compilation format
    /// as `?`.
    pub fn reflection_name(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty);
        out
    }

    /// Full name of a definition, with its arity suffix.
    pub fn definition_name(&self, definition: TypeDefId) -> String {
        match self.compilation.type_definition(definition) {
            Some(def) => self.key_name(&def.key()),
            None => "?".to_string(),
        }
    }

    /// Positional reflection name of a type parameter (`` `0 ``, ``` ``0 ```).
    pub fn type_parameter_name(&self, param: TypeParamId) -> String {
        match self.compilation.type_parameter(param) {
            Some(p) => match p.owner_kind() {
                SymbolKind::TypeDefinition => format!("`{}", p.index()),
                SymbolKind::Method => format!("``{}", p.index()),
            },
            None => "?".to_string(),
        }
    }

    fn write_type(&self, out: &mut String, ty: TypeId) {
        match self.compilation.type_data(ty) {
            None => out.push('?'),
            Some(TypeData::Definition(def)) => out.push_str(&self.definition_name(*def)),
            Some(TypeData::Parameterized {
                definition,
                type_arguments,
            }) => {
                out.push_str(&self.definition_name(*definition));
                out.push('[');
                for (i, arg) in type_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push('[');
                    self.write_type(out, *arg);
                    out.push(']');
                }
                out.push(']');
            }
            Some(TypeData::TypeParameter(param)) => {
                out.push_str(&self.type_parameter_name(*param));
            }
            Some(TypeData::Unknown(key)) => out.push_str(&self.key_name(key)),
        }
    }

    /// Full name for a definition key, bound or not.
    pub fn key_name(&self, key: &TypeDefKey) -> String {
        let interner = self.compilation.interner();
        let namespace = interner.resolve(key.namespace);
        let mut name = String::new();
        if !namespace.is_empty() {
            let _ = write!(name, "{namespace}.");
        }
        name.push_str(&interner.resolve(key.name));
        if key.arity > 0 {
            let _ = write!(name, "`{}", key.arity);
        }
        name
    }
}

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod tests;
