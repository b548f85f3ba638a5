//! Type signatures.

use xrefsig_core::{DeclId, DeclKind, Declaration, Nesting, Type, TypeId};

use super::{SignatureEngine, Walk, ERROR_TYPE};
use crate::error::SignatureError;

impl<'m> SignatureEngine<'m> {
    /// Renders the types whose signature never goes through the cache: bound
    /// type variables (context-dependent bare names) and the opaque inference
    /// artifacts (nothing). Returns `false` for every other type.
    pub(super) fn render_uncached_type(
        &mut self,
        id: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<bool, SignatureError> {
        let model = self.model;
        match model.ty(id).ok_or(SignatureError::TypeNotFound { id })? {
            Type::TypeVar { decl, .. } => match walk.binding_level(*decl) {
                Some(level) => {
                    let var = model
                        .decl(*decl)
                        .ok_or(SignatureError::DeclNotFound { id: *decl })?;
                    out.push_str(&var.name);
                    walk.note_bare(level);
                    Ok(true)
                }
                None => Ok(false),
            },
            ty => Ok(ty.is_opaque()),
        }
    }

    pub(super) fn render_type(
        &mut self,
        id: TypeId,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        match model.ty(id).ok_or(SignatureError::TypeNotFound { id })? {
            Type::Primitive { name } => out.push_str(name),
            Type::Void => out.push_str("void"),
            Type::Array { component, varargs } => {
                self.type_signature(*component, walk, out)?;
                out.push_str(if *varargs { "..." } else { "[]" });
            }
            Type::Class {
                decl,
                enclosing,
                type_args,
            } => {
                self.render_class_type(*decl, *enclosing, walk, out)?;
                if !type_args.is_empty() {
                    out.push('<');
                    self.render_type_list(type_args, ',', walk, out)?;
                    out.push('>');
                }
            }
            Type::Method { params, .. } => {
                out.push('(');
                self.render_type_list(params, ',', walk, out)?;
                out.push(')');
            }
            // Reached only for variables no enclosing construct binds.
            Type::TypeVar { decl, .. } => {
                let var = model
                    .decl(*decl)
                    .ok_or(SignatureError::DeclNotFound { id: *decl })?;
                let owner = var.enclosing.ok_or_else(|| {
                    SignatureError::malformed(format!(
                        "type variable '{}' has no declaring construct",
                        var.name
                    ))
                })?;
                self.decl_signature(owner, walk, out)?;
                out.push('~');
                out.push_str(&var.name);
            }
            Type::Intersection {
                supertype,
                interfaces,
            } => {
                let parts: Vec<TypeId> =
                    supertype.iter().chain(interfaces.iter()).copied().collect();
                self.render_type_list(&parts, '&', walk, out)?;
            }
            Type::Wildcard { kind, bound } => {
                out.push_str(kind.keyword());
                if let Some(bound) = bound {
                    self.type_signature(*bound, walk, out)?;
                }
            }
            Type::Error { qualified_name } => {
                out.push_str(ERROR_TYPE);
                if let Some(name) = qualified_name {
                    out.push('.');
                    out.push_str(name);
                }
            }
            Type::Forall { type_vars, method } => {
                let mut vars = Vec::with_capacity(type_vars.len());
                for var in type_vars {
                    match model.ty(*var) {
                        Some(Type::TypeVar { decl, .. }) => vars.push(*decl),
                        Some(other) => {
                            return Err(SignatureError::malformed(format!(
                                "generic method type quantifies over a {} type",
                                other.variant_name()
                            )))
                        }
                        None => return Err(SignatureError::TypeNotFound { id: *var }),
                    }
                }
                walk.bind(vars);
                let result = self.type_signature(*method, walk, out);
                walk.unbind();
                result?;
            }
            Type::Package { decl } => self.decl_signature(*decl, walk, out)?,
            Type::Captured | Type::Undetermined => {}
        }
        Ok(())
    }

    /// Prefix and simple name of a class type, without type arguments.
    fn render_class_type(
        &mut self,
        id: DeclId,
        enclosing: Option<TypeId>,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let model = self.model;
        let decl = model.decl(id).ok_or(SignatureError::DeclNotFound { id })?;
        match &decl.kind {
            DeclKind::Type {
                nesting: Nesting::Anonymous,
                ..
            } => return self.decl_signature(id, walk, out),
            DeclKind::Type {
                nesting: Nesting::Local,
                ..
            } => {
                self.enclosing_signature(id, decl, walk, out)?;
            }
            DeclKind::Type { .. } => match enclosing {
                Some(outer) => self.type_signature(outer, walk, out)?,
                None => self.render_owner_name(decl, walk, out)?,
            },
            _ => {
                return Err(SignatureError::malformed(format!(
                    "class type declared by a {}",
                    decl.kind_name()
                )))
            }
        }
        out.push('.');
        out.push_str(&decl.name);
        Ok(())
    }

    /// Qualified name of the package or type that owns a non-local class.
    /// Classes nested, at any depth, in a local or anonymous class take their
    /// owner's signature.
    fn render_owner_name(
        &mut self,
        decl: &Declaration,
        walk: &mut Walk,
        out: &mut String,
    ) -> Result<(), SignatureError> {
        let (owner_id, _) = self.enclosing_decl(decl)?;
        if self.is_inside_local_type(owner_id)? {
            return self.decl_signature(owner_id, walk, out);
        }
        let name = self.model.qualified_name(owner_id).ok_or_else(|| {
            SignatureError::malformed(format!(
                "owner of class '{}' has no qualified name",
                decl.name
            ))
        })?;
        out.push_str(&name);
        Ok(())
    }

    /// Whether `id` is a local or anonymous class, or a type nested in one.
    fn is_inside_local_type(&self, id: DeclId) -> Result<bool, SignatureError> {
        let model = self.model;
        let mut current = id;
        for _ in 0..=model.decl_count() {
            let decl = model
                .decl(current)
                .ok_or(SignatureError::DeclNotFound { id: current })?;
            match (&decl.kind, decl.enclosing) {
                (
                    DeclKind::Type {
                        nesting: Nesting::Local | Nesting::Anonymous,
                        ..
                    },
                    _,
                ) => return Ok(true),
                (DeclKind::Type { .. }, Some(parent)) => current = parent,
                _ => return Ok(false),
            }
        }
        Err(SignatureError::malformed(format!(
            "enclosing chain of declaration {} does not end",
            id
        )))
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;
    use xrefsig_core::{BlockKind, BoundKind, SemanticModel, Type, TypeDeclKind};

    use crate::config::EngineConfig;
    use crate::signature::SignatureEngine;

    #[test]
    fn array_and_varargs() {
        let mut model = SemanticModel::new("A.java");
        let int = model.primitive("int");
        let arr = model
            .add_ty(Type::Array {
                component: int,
                varargs: false,
            })
            .unwrap();
        let va = model
            .add_ty(Type::Array {
                component: arr,
                varargs: true,
            })
            .unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(arr).as_deref(), Some("int[]"));
        assert_eq!(engine.signature_of_type(va).as_deref(), Some("int[]..."));
    }

    #[test]
    fn method_type_excludes_return_type() {
        let mut model = SemanticModel::new("A.java");
        let int = model.primitive("int");
        let long = model.primitive("long");
        let ty = model.method_type(&[int, int], Some(long)).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(ty).as_deref(), Some("(int,int)"));
    }

    #[test]
    fn empty_method_type_renders_parentheses() {
        let mut model = SemanticModel::new("A.java");
        let ty = model.method_type(&[], None).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(ty).as_deref(), Some("()"));
    }

    #[test]
    fn wildcards() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("java.lang");
        let number = model.add_type("Number", pkg, TypeDeclKind::Class).unwrap();
        let number_ty = model.decl(number).unwrap().ty().unwrap();
        let any = model
            .add_ty(Type::Wildcard {
                kind: BoundKind::Unbound,
                bound: None,
            })
            .unwrap();
        let upper = model
            .add_ty(Type::Wildcard {
                kind: BoundKind::Extends,
                bound: Some(number_ty),
            })
            .unwrap();
        let lower = model
            .add_ty(Type::Wildcard {
                kind: BoundKind::Super,
                bound: Some(number_ty),
            })
            .unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(any).as_deref(), Some("?"));
        assert_eq!(
            engine.signature_of_type(upper).as_deref(),
            Some("? extends java.lang.Number")
        );
        assert_eq!(
            engine.signature_of_type(lower).as_deref(),
            Some("? super java.lang.Number")
        );
    }

    #[test]
    fn error_type_placeholder() {
        let mut model = SemanticModel::new("A.java");
        let named = model
            .add_ty(Type::Error {
                qualified_name: Some("com.missing.Dep".into()),
            })
            .unwrap();
        let unnamed = model.add_ty(Type::Error { qualified_name: None }).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(named).as_deref(),
            Some("ERROR-TYPE.com.missing.Dep")
        );
        assert_eq!(engine.signature_of_type(unnamed).as_deref(), Some("ERROR-TYPE"));
    }

    #[test]
    fn opaque_types_have_no_signature() {
        let mut model = SemanticModel::new("A.java");
        let captured = model.add_ty(Type::Captured).unwrap();
        let undet = model.add_ty(Type::Undetermined).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(captured), None);
        assert_eq!(engine.signature_of_type(undet), None);
    }

    #[test]
    fn inner_class_recurses_into_enclosing_type() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let string = model.add_type("String", pkg, TypeDeclKind::Class).unwrap();
        let string_ty = model.decl(string).unwrap().ty().unwrap();
        let outer = model.add_type("Outer", pkg, TypeDeclKind::Class).unwrap();
        let inner = model.add_type("Inner", outer, TypeDeclKind::Class).unwrap();
        let outer_ty = model.class_type(outer, &[string_ty]).unwrap();
        let inner_ty = model
            .add_ty(Type::Class {
                decl: inner,
                enclosing: Some(outer_ty),
                type_args: smallvec![],
            })
            .unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(inner_ty).as_deref(),
            Some("p.Outer<p.String>.Inner")
        );
    }

    #[test]
    fn static_nested_class_uses_owner_qualified_name() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("java.util");
        let map = model.add_type("Map", pkg, TypeDeclKind::Interface).unwrap();
        let entry = model.add_type("Entry", map, TypeDeclKind::Interface).unwrap();
        let ty = model.decl(entry).unwrap().ty().unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(ty).as_deref(),
            Some("java.util.Map.Entry")
        );
    }

    #[test]
    fn free_type_variable_is_owner_qualified() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let list = model.add_type("List", pkg, TypeDeclKind::Interface).unwrap();
        let (_, e) = model.add_type_parameter("E", list).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(e).as_deref(), Some("p.List~E"));
    }

    #[test]
    fn forall_binds_its_variables() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let c = model.add_type("C", pkg, TypeDeclKind::Class).unwrap();
        let m = model.add_method("id", c).unwrap();
        let (_, t) = model.add_type_parameter("T", m).unwrap();
        let method = model.method_type(&[t], Some(t)).unwrap();
        let forall = model
            .add_ty(Type::Forall {
                type_vars: smallvec![t],
                method,
            })
            .unwrap();
        model.set_type(m, forall).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(engine.signature_of_type(forall).as_deref(), Some("(T)"));
        assert_eq!(engine.signature_of_decl(m).as_deref(), Some("p.C.<T>id(T)"));
    }

    #[test]
    fn local_class_type_is_block_qualified() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let c = model.add_type("C", pkg, TypeDeclKind::Class).unwrap();
        let m = model.add_method("run", c).unwrap();
        let ty = model.method_type(&[], None).unwrap();
        model.set_type(m, ty).unwrap();
        let body = model.add_block(m, BlockKind::Body, None).unwrap();
        let local = model
            .add_local_type("Helper", body, TypeDeclKind::Class)
            .unwrap();
        let local_ty = model.decl(local).unwrap().ty().unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(local_ty).as_deref(),
            Some("p.C.run()/block0.Helper")
        );
        assert_eq!(
            engine.signature_of_decl(local).as_deref(),
            Some("p.C.run()/block0.Helper")
        );
    }

    #[test]
    fn member_of_local_class_member_keeps_block_prefix() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let c = model.add_type("C", pkg, TypeDeclKind::Class).unwrap();
        let mut deep = Vec::new();
        for name in ["run", "stop"] {
            let m = model.add_method(name, c).unwrap();
            let ty = model.method_type(&[], None).unwrap();
            model.set_type(m, ty).unwrap();
            let body = model.add_block(m, BlockKind::Body, None).unwrap();
            let helper = model
                .add_local_type("Helper", body, TypeDeclKind::Class)
                .unwrap();
            let inner = model.add_type("Inner", helper, TypeDeclKind::Class).unwrap();
            deep.push(model.add_type("Deep", inner, TypeDeclKind::Class).unwrap());
        }

        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        let mut type_sigs = Vec::new();
        for decl in &deep {
            let ty = model.decl(*decl).unwrap().ty().unwrap();
            let type_sig = engine.signature_of_type(ty);
            assert_eq!(type_sig, engine.signature_of_decl(*decl));
            type_sigs.push(type_sig);
        }
        assert_eq!(
            type_sigs,
            vec![
                Some("p.C.run()/block0.Helper.Inner.Deep".to_string()),
                Some("p.C.stop()/block0.Helper.Inner.Deep".to_string()),
            ]
        );
    }

    #[test]
    fn type_owned_by_cyclic_chain_has_no_signature() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("p");
        let a = model.add_type("A", pkg, TypeDeclKind::Class).unwrap();
        let b = model.add_type("B", a, TypeDeclKind::Class).unwrap();
        let b_ty = model.decl(b).unwrap().ty().unwrap();

        let mut json = serde_json::to_value(&model).unwrap();
        json["decls"][a.0 as usize]["enclosing"] = serde_json::json!(b.0);
        let broken: SemanticModel = serde_json::from_value(json).unwrap();

        let mut engine = SignatureEngine::new(&broken, EngineConfig::default());
        assert_eq!(engine.signature_of_type(b_ty), None);
        assert_eq!(engine.signature_of_decl(b), None);
        assert_eq!(engine.signature_of_decl(pkg).as_deref(), Some("p"));
    }

    #[test]
    fn package_type_renders_its_package() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("com.example.util");
        let ty = model.add_ty(Type::Package { decl: pkg }).unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(ty).as_deref(),
            Some("com.example.util")
        );
    }

    #[test]
    fn intersection_without_class_part_joins_interfaces() {
        let mut model = SemanticModel::new("A.java");
        let pkg = model.add_package("java.io");
        let closeable = model.add_type("Closeable", pkg, TypeDeclKind::Interface).unwrap();
        let flushable = model.add_type("Flushable", pkg, TypeDeclKind::Interface).unwrap();
        let closeable_ty = model.decl(closeable).unwrap().ty().unwrap();
        let flushable_ty = model.decl(flushable).unwrap().ty().unwrap();
        let both = model
            .add_ty(Type::Intersection {
                supertype: None,
                interfaces: smallvec![closeable_ty, flushable_ty],
            })
            .unwrap();
        let mut engine = SignatureEngine::new(&model, EngineConfig::default());
        assert_eq!(
            engine.signature_of_type(both).as_deref(),
            Some("java.io.Closeable&java.io.Flushable")
        );
    }
}
