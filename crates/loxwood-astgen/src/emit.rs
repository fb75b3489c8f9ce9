//! Rust source emission for a parsed family
//!
//! For a family `F` with variants `V1..Vn` the emitted module contains one
//! struct per variant, the closed enum `F`, the `Visitor<R>` trait with one
//! required method per variant, and `F::accept` as an exhaustive match.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::Ident;

use crate::descriptor::{Family, Field, FieldType, Variant};

/// Emit the complete item list for one family.
pub fn emit_family(family: &Family, derives: &[syn::Path]) -> TokenStream {
    let structs = family.variants.iter().map(|v| emit_variant(family, v, derives));

    let name = &family.name;
    let family_doc = format!(
        " The closed `{}` family. Traverse with [`{}::accept`].",
        name, name
    );
    let variant_names: Vec<_> = family.variants.iter().map(|v| &v.name).collect();
    let variant_strs: Vec<_> = variant_names.iter().map(|v| v.to_string()).collect();

    let visit_methods: Vec<_> = family
        .variants
        .iter()
        .map(|v| visit_method(family, v))
        .collect();
    let param = snake_ident(&name.to_string());

    let trait_methods = family.variants.iter().zip(&visit_methods).map(|(v, method)| {
        let variant = &v.name;
        let doc = format!(" Handle a `{}` node.", variant);
        quote! {
            #[doc = #doc]
            fn #method(&mut self, #param: &#variant) -> R;
        }
    });

    let shorthands = family.variants.iter().map(|v| {
        let variant = &v.name;
        let ctor = constructor_name(&variant.to_string());
        let params = v.fields.iter().map(constructor_param);
        let args = v.fields.iter().map(|f| &f.name);
        let doc = format!(" Build a `{}::{}` node.", name, variant);
        quote! {
            #[doc = #doc]
            pub fn #ctor(#(#params),*) -> Self {
                #name::#variant(#variant::new(#(#args),*))
            }
        }
    });

    let trait_doc = format!(
        " Exhaustive traversal over the `{}` family: one method per variant, no defaults.",
        name
    );

    quote! {
        #[allow(unused_imports)]
        use super::*;

        #(#structs)*

        #[doc = #family_doc]
        #[derive(#(#derives),*)]
        pub enum #name {
            #(
                #[allow(missing_docs)]
                #variant_names(#variant_names),
            )*
        }

        #[doc = #trait_doc]
        pub trait Visitor<R> {
            #(#trait_methods)*
        }

        impl #name {
            /// Variant names in declaration order.
            pub const VARIANTS: &'static [&'static str] = &[#(#variant_strs),*];

            /// Dispatch to the visitor method matching this node's variant.
            pub fn accept<R, Vis>(&self, visitor: &mut Vis) -> R
            where
                Vis: Visitor<R> + ?Sized,
            {
                match self {
                    #(#name::#variant_names(node) => visitor.#visit_methods(node),)*
                }
            }

            /// Name of this node's variant.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    #(#name::#variant_names(_) => #variant_strs,)*
                }
            }

            #(#shorthands)*
        }

        #(
            impl From<#variant_names> for #name {
                fn from(node: #variant_names) -> Self {
                    #name::#variant_names(node)
                }
            }
        )*
    }
}

fn emit_variant(family: &Family, variant: &Variant, derives: &[syn::Path]) -> TokenStream {
    let name = &variant.name;
    let doc = format!(" `{}` node of the `{}` family.", name, family.name);

    let field_names: Vec<_> = variant.fields.iter().map(|f| &f.name).collect();
    let storage = variant.fields.iter().map(storage_type);
    let params = variant.fields.iter().map(constructor_param);
    let inits = variant.fields.iter().map(initializer);
    let accessors = variant.fields.iter().map(accessor);

    quote! {
        #[doc = #doc]
        #[derive(#(#derives),*)]
        pub struct #name {
            #(#field_names: #storage,)*
        }

        #[allow(clippy::new_without_default)]
        impl #name {
            /// Construct the node, taking ownership of every field.
            #[allow(clippy::too_many_arguments)]
            pub fn new(#(#params),*) -> Self {
                Self {
                    #(#field_names: #inits,)*
                }
            }

            #(#accessors)*
        }
    }
}

fn storage_type(field: &Field) -> TokenStream {
    match &field.ty {
        FieldType::Node(family) => quote!(Box<#family>),
        FieldType::OptionalNode(family) => quote!(Option<Box<#family>>),
        FieldType::List(element) => quote!(Vec<#element>),
        FieldType::Optional(inner) => quote!(Option<#inner>),
        FieldType::Plain(ty) => quote!(#ty),
    }
}

fn constructor_param(field: &Field) -> TokenStream {
    let name = &field.name;
    let ty = match &field.ty {
        FieldType::Node(family) => quote!(#family),
        FieldType::OptionalNode(family) => quote!(Option<#family>),
        FieldType::List(element) => quote!(Vec<#element>),
        FieldType::Optional(inner) => quote!(Option<#inner>),
        FieldType::Plain(ty) => quote!(#ty),
    };
    quote!(#name: #ty)
}

fn initializer(field: &Field) -> TokenStream {
    let name = &field.name;
    match &field.ty {
        FieldType::Node(_) => quote!(Box::new(#name)),
        FieldType::OptionalNode(_) => quote!(#name.map(Box::new)),
        _ => quote!(#name),
    }
}

fn accessor(field: &Field) -> TokenStream {
    let name = &field.name;
    let (ty, body) = match &field.ty {
        FieldType::Node(family) => (quote!(&#family), quote!(&self.#name)),
        FieldType::OptionalNode(family) => (quote!(Option<&#family>), quote!(self.#name.as_deref())),
        FieldType::List(element) => (quote!(&[#element]), quote!(&self.#name)),
        FieldType::Optional(inner) => (quote!(Option<&#inner>), quote!(self.#name.as_ref())),
        FieldType::Plain(ty) => (quote!(&#ty), quote!(&self.#name)),
    };
    let doc = format!(" The `{}` field.", name);
    quote! {
        #[doc = #doc]
        pub fn #name(&self) -> #ty {
            #body
        }
    }
}

/// `visit_<variant>_<family>`, e.g. `visit_binary_expr`.
pub fn visit_method(family: &Family, variant: &Variant) -> Ident {
    format_ident!(
        "visit_{}_{}",
        to_snake_case(&variant.name.to_string()),
        to_snake_case(&family.name.to_string())
    )
}

/// Name of the shorthand constructor for `variant`, e.g. `binary`.
///
/// Keywords become raw identifiers (`r#if`). The path keywords cannot be
/// raw, so those take a trailing underscore instead (`super_`).
pub fn constructor_name(variant: &str) -> Ident {
    snake_ident(variant)
}

fn snake_ident(name: &str) -> Ident {
    let snake = to_snake_case(name);
    if let Ok(ident) = syn::parse_str::<Ident>(&snake) {
        return ident;
    }
    match snake.as_str() {
        "self" | "super" | "crate" | "Self" => format_ident!("{}_", snake),
        _ => Ident::new_raw(&snake, Span::call_site()),
    }
}

/// Convert `CamelCase` to `snake_case`.
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{parse_families, FamilyDescriptor};

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Expr"), "expr");
        assert_eq!(to_snake_case("ExprStmt"), "expr_stmt");
        assert_eq!(to_snake_case("If"), "if");
        assert_eq!(to_snake_case("then_branch"), "then_branch");
        assert_eq!(to_snake_case("Call2Expr"), "call2_expr");
    }

    #[test]
    fn test_snake_ident_escapes_keywords() {
        assert_eq!(snake_ident("If").to_string(), "r#if");
        assert_eq!(snake_ident("While").to_string(), "r#while");
        assert_eq!(snake_ident("Print").to_string(), "print");
    }

    #[test]
    fn test_path_keywords_get_underscore() {
        assert_eq!(constructor_name("Super").to_string(), "super_");
        assert_eq!(constructor_name("Crate").to_string(), "crate_");
        assert_eq!(constructor_name("This").to_string(), "this");
        assert_eq!(snake_ident("self").to_string(), "self_");
    }

    #[test]
    fn test_emitted_family_parses_as_file() {
        let families = parse_families(&[FamilyDescriptor::new(
            "Stmt",
            ["If : Token keyword, Option<Stmt> else_branch", "Block : List<Stmt> statements"],
        )])
        .unwrap();
        let derives = vec![syn::parse_str("Debug").unwrap()];
        let tokens = emit_family(&families[0], &derives);
        let file: syn::File = syn::parse2(tokens).unwrap();

        let trait_methods: Vec<String> = file
            .items
            .iter()
            .find_map(|item| match item {
                syn::Item::Trait(t) if t.ident == "Visitor" => Some(t),
                _ => None,
            })
            .unwrap()
            .items
            .iter()
            .filter_map(|item| match item {
                syn::TraitItem::Fn(f) => {
                    // Required methods only: a default body would let a visitor skip a variant
                    assert!(f.default.is_none());
                    Some(f.sig.ident.to_string())
                }
                _ => None,
            })
            .collect();
        assert_eq!(trait_methods, vec!["visit_if_stmt", "visit_block_stmt"]);
    }
}
