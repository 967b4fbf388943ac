//! JSON declaration files.
//!
//! ```json
//! {
//!   "options": { "inferReferenceKindFromBaseClass": true },
//!   "types": [
//!     {
//!       "namespace": "Demo",
//!       "name": "C",
//!       "kind": "class",
//!       "typeParameters": [
//!         { "name": "T", "constraints": [{ "type": "System.Collections.Generic.List", "args": ["string"] }] },
//!         { "name": "U", "class": true, "constraints": [{ "param": "T" }] }
//!       ],
//!       "baseTypes": [],
//!       "methods": [{ "name": "M", "typeParameters": [{ "name": "X", "constraints": [{ "param": "U" }] }] }]
//!     }
//!   ]
//! }
//! ```
//!
//! `{ "param": "T" }` names a type parameter of the innermost scope that
//! declares it (method first, then type). `{ "typeParam": i }` and
//! `{ "methodParam": i }` are raw positional references and are not
//! validated here; out-of-range ordinals surface as binding errors. A bare
//! string is shorthand for `{ "type": ... }`, and the C# keywords `object`,
//! `string`, `int` and `bool` name the core library types.

use anyhow::{Context, Result, bail};
use gres_common::interner::ShardedInterner;
use gres_solver::{
    KnownTypeCode, MethodDecl, ProjectContent, ResolutionOptions, SymbolKind, TypeDefDecl,
    TypeDefKey, TypeKind, TypeParamDecl, TypeRef,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(default)]
    pub options: ResolutionOptions,
    pub types: Vec<TypeJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeJson {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default)]
    pub kind: KindJson,
    #[serde(default)]
    pub type_parameters: Vec<TypeParamJson>,
    #[serde(default)]
    pub base_types: Vec<TypeRefJson>,
    #[serde(default)]
    pub methods: Vec<MethodJson>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindJson {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

impl From<KindJson> for TypeKind {
    fn from(value: KindJson) -> Self {
        match value {
            KindJson::Class => TypeKind::Class,
            KindJson::Interface => TypeKind::Interface,
            KindJson::Struct => TypeKind::Struct,
            KindJson::Enum => TypeKind::Enum,
            KindJson::Delegate => TypeKind::Delegate,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TypeParamJson {
    pub name: String,
    #[serde(default, rename = "class")]
    pub reference_type: bool,
    #[serde(default, rename = "struct")]
    pub value_type: bool,
    #[serde(default, rename = "new")]
    pub default_constructor: bool,
    #[serde(default)]
    pub constraints: Vec<TypeRefJson>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodJson {
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<TypeParamJson>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TypeRefJson {
    Shorthand(String),
    Param {
        param: String,
    },
    TypeParam {
        #[serde(rename = "typeParam")]
        type_param: u32,
    },
    MethodParam {
        #[serde(rename = "methodParam")]
        method_param: u32,
    },
    Named {
        #[serde(rename = "type")]
        name: String,
        #[serde(default)]
        args: Vec<TypeRefJson>,
    },
}

/// Read and parse a declaration file.
pub fn load(path: &Path) -> Result<ProjectFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid declaration file {}", path.display()))
}

pub fn parse(text: &str) -> Result<ProjectFile> {
    Ok(serde_json::from_str(text)?)
}

/// Declarations converted from a file, in file order.
pub struct LoadedProject {
    pub content: Arc<ProjectContent>,
    pub declarations: Vec<Arc<TypeDefDecl>>,
    pub options: ResolutionOptions,
}

impl ProjectFile {
    pub fn into_project(self, with_core_library: bool) -> Result<LoadedProject> {
        let interner = Arc::new(ShardedInterner::new());
        let mut content = if with_core_library {
            ProjectContent::with_core_library(Arc::clone(&interner))
        } else {
            ProjectContent::new(Arc::clone(&interner))
        };

        let mut declarations = Vec::with_capacity(self.types.len());
        let mut seen: Vec<TypeDefKey> = Vec::with_capacity(self.types.len());
        for ty in &self.types {
            let decl = convert_type(&interner, ty)?;
            let key = decl.key();
            if seen.contains(&key) {
                bail!("type '{}' is declared twice", display_name(ty));
            }
            seen.push(key);
            declarations.push(content.add_type_definition(decl));
        }

        Ok(LoadedProject {
            content: Arc::new(content),
            declarations,
            options: self.options,
        })
    }
}

fn display_name(ty: &TypeJson) -> String {
    if ty.namespace.is_empty() {
        ty.name.clone()
    } else {
        format!("{}.{}", ty.namespace, ty.name)
    }
}

/// Type parameter names visible while converting a reference.
struct Scope<'a> {
    type_params: &'a [TypeParamJson],
    method_params: &'a [TypeParamJson],
}

impl Scope<'_> {
    fn lookup(&self, name: &str) -> Option<TypeRef> {
        let position = |params: &[TypeParamJson]| params.iter().position(|p| p.name == name);
        if let Some(index) = position(self.method_params) {
            return Some(TypeRef::type_parameter(SymbolKind::Method, index as u32));
        }
        position(self.type_params)
            .map(|index| TypeRef::type_parameter(SymbolKind::TypeDefinition, index as u32))
    }
}

fn convert_type(interner: &ShardedInterner, ty: &TypeJson) -> Result<TypeDefDecl> {
    let mut decl = TypeDefDecl::new(
        ty.kind.into(),
        interner.intern(&ty.namespace),
        interner.intern(&ty.name),
    );
    let type_scope = Scope {
        type_params: &ty.type_parameters,
        method_params: &[],
    };
    let context = || format!("in type '{}'", display_name(ty));

    for (index, param) in ty.type_parameters.iter().enumerate() {
        let param = convert_param(interner, SymbolKind::TypeDefinition, index, param, &type_scope)
            .with_context(context)?;
        decl = decl.with_type_param(param);
    }
    for base in &ty.base_types {
        let base = convert_ref(interner, base, &type_scope).with_context(context)?;
        decl = decl.with_base_type(base);
    }
    for method in &ty.methods {
        let scope = Scope {
            type_params: &ty.type_parameters,
            method_params: &method.type_parameters,
        };
        let mut method_decl = MethodDecl::new(interner.intern(&method.name));
        for (index, param) in method.type_parameters.iter().enumerate() {
            let param = convert_param(interner, SymbolKind::Method, index, param, &scope)
                .with_context(|| format!("in method '{}.{}'", display_name(ty), method.name))?;
            method_decl = method_decl.with_type_param(param);
        }
        decl = decl.with_method(method_decl);
    }
    Ok(decl)
}

fn convert_param(
    interner: &ShardedInterner,
    owner: SymbolKind,
    index: usize,
    param: &TypeParamJson,
    scope: &Scope<'_>,
) -> Result<TypeParamDecl> {
    let mut decl = TypeParamDecl::new(owner, index as u32, interner.intern(&param.name));
    decl.has_reference_type_constraint = param.reference_type;
    decl.has_value_type_constraint = param.value_type;
    decl.has_default_constructor_constraint = param.default_constructor;
    for constraint in &param.constraints {
        decl.constraints.push(convert_ref(interner, constraint, scope)?);
    }
    Ok(decl)
}

fn convert_ref(interner: &ShardedInterner, r: &TypeRefJson, scope: &Scope<'_>) -> Result<TypeRef> {
    match r {
        TypeRefJson::Param { param } => match scope.lookup(param) {
            Some(reference) => Ok(reference),
            None => bail!("unknown type parameter '{param}'"),
        },
        TypeRefJson::TypeParam { type_param } => Ok(TypeRef::type_parameter(
            SymbolKind::TypeDefinition,
            *type_param,
        )),
        TypeRefJson::MethodParam { method_param } => {
            Ok(TypeRef::type_parameter(SymbolKind::Method, *method_param))
        }
        TypeRefJson::Shorthand(name) => Ok(named_ref(interner, name, Vec::new())),
        TypeRefJson::Named { name, args } => {
            let args = args
                .iter()
                .map(|arg| convert_ref(interner, arg, scope))
                .collect::<Result<Vec<_>>>()?;
            Ok(named_ref(interner, name, args))
        }
    }
}

fn named_ref(interner: &ShardedInterner, full_name: &str, args: Vec<TypeRef>) -> TypeRef {
    if args.is_empty() {
        if let Some(code) = keyword_type(full_name) {
            return TypeRef::Known(code);
        }
    }
    let (namespace, name) = full_name.rsplit_once('.').unwrap_or(("", full_name));
    TypeRef::generic(interner.intern(namespace), interner.intern(name), args)
}

fn keyword_type(name: &str) -> Option<KnownTypeCode> {
    match name {
        "object" => Some(KnownTypeCode::Object),
        "string" => Some(KnownTypeCode::String),
        "int" => Some(KnownTypeCode::Int32),
        "bool" => Some(KnownTypeCode::Boolean),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../tests/project_file_tests.rs"]
mod tests;
