use anyhow::{Result, bail};
use gres_solver::{
    Compilation, ResolutionOptions, TypeDefDecl, TypeDefId, TypeKind, TypeParamId,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info_span};

use crate::project_file::LoadedProject;

/// Resolution result for one declared type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeReport {
    pub name: String,
    pub kind: &'static str,
    pub type_parameters: Vec<TypeParamReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TypeReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParamReport {
    pub name: String,
    /// `C`1` for a type parameter, `C`1.M` for a method type parameter.
    pub owner: String,
    pub index: u32,
    pub reference_kind: &'static str,
    pub effective_base_class: String,
    pub interfaces: Vec<String>,
    pub has_default_constructor_constraint: bool,
}

#[derive(Debug, Default)]
pub struct DriverOptions<'a> {
    pub type_filter: Option<&'a str>,
    /// Ignore the base class when classifying parameters.
    pub strict_reference_kind: bool,
}

/// Bind every selected declaration of `project` into a fresh compilation.
///
/// Each declaration gets its own report; a declaration that fails to bind
/// carries the error message instead of parameters. Dependencies bound while
/// resolving an earlier type are reused.
pub fn resolve_project(
    project: &LoadedProject,
    options: &DriverOptions<'_>,
) -> Result<Vec<TypeReport>> {
    let mut resolution = project.options.clone();
    if options.strict_reference_kind {
        resolution = ResolutionOptions {
            infer_reference_kind_from_base_class: false,
            ..resolution
        };
    }

    let mut compilation = Compilation::with_options(Arc::clone(&project.content), resolution);
    let selected = select(&compilation, &project.declarations, options.type_filter)?;

    let mut reports = Vec::with_capacity(selected.len());
    for decl in selected {
        let name = compilation.formatter().key_name(&decl.key());
        let _span = info_span!("resolve_type", name = %name).entered();
        let report = match compilation.bind_type_definition(decl) {
            Ok(def) => TypeReport {
                type_parameters: describe_parameters(&compilation, def),
                name,
                kind: kind_name(decl.kind),
                error: None,
            },
            Err(err) => {
                debug!(error = %err, "bind failed");
                TypeReport {
                    name,
                    kind: kind_name(decl.kind),
                    type_parameters: Vec::new(),
                    error: Some(err.to_string()),
                }
            }
        };
        reports.push(report);
    }
    Ok(reports)
}

fn select<'a>(
    compilation: &Compilation,
    declarations: &'a [Arc<TypeDefDecl>],
    filter: Option<&str>,
) -> Result<Vec<&'a Arc<TypeDefDecl>>> {
    let Some(filter) = filter else {
        return Ok(declarations.iter().collect());
    };
    let interner = compilation.interner();
    let selected: Vec<_> = declarations
        .iter()
        .filter(|decl| {
            let name = interner.resolve(decl.name);
            let namespace = interner.resolve(decl.namespace);
            &*name == filter
                || (!namespace.is_empty() && filter == format!("{namespace}.{name}"))
                || filter == compilation.formatter().key_name(&decl.key())
        })
        .collect();
    if selected.is_empty() {
        bail!("no declared type named '{filter}'");
    }
    Ok(selected)
}

fn describe_parameters(compilation: &Compilation, def: TypeDefId) -> Vec<TypeParamReport> {
    let Some(definition) = compilation.type_definition(def) else {
        return Vec::new();
    };
    let formatter = compilation.formatter();
    let type_name = formatter.definition_name(def);

    let mut reports: Vec<TypeParamReport> = definition
        .type_parameters()
        .iter()
        .filter_map(|&param| describe_parameter(compilation, param, type_name.clone()))
        .collect();

    for &method in definition.methods() {
        let Some(method) = compilation.method(method) else {
            continue;
        };
        let owner = format!("{type_name}.{}", compilation.interner().resolve(method.name()));
        reports.extend(
            method
                .type_parameters()
                .iter()
                .filter_map(|&param| describe_parameter(compilation, param, owner.clone())),
        );
    }
    reports
}

fn describe_parameter(
    compilation: &Compilation,
    param: TypeParamId,
    owner: String,
) -> Option<TypeParamReport> {
    let p = compilation.type_parameter(param)?;
    let formatter = compilation.formatter();
    Some(TypeParamReport {
        name: compilation.interner().resolve(p.name()).to_string(),
        owner,
        index: p.index(),
        reference_kind: p.reference_kind().as_str(),
        effective_base_class: formatter.reflection_name(p.effective_base_class()),
        interfaces: p
            .effective_interface_set()
            .iter()
            .map(|&iface| formatter.reflection_name(iface))
            .collect(),
        has_default_constructor_constraint: p.has_default_constructor_constraint(),
    })
}

const fn kind_name(kind: TypeKind) -> &'static str {
    match kind {
        TypeKind::Class => "class",
        TypeKind::Interface => "interface",
        TypeKind::Struct => "struct",
        TypeKind::Enum => "enum",
        TypeKind::Delegate => "delegate",
    }
}

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod tests;
