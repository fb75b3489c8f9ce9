//! Family descriptors and their parsed, validated form
//!
//! A descriptor is the declarative input: a family name plus one line per
//! variant, written as `Name : Type field, Type field`. Parsing turns the
//! whole descriptor list into a [`Family`] schema, or fails on the first
//! malformed or duplicate entry.

use std::collections::{HashMap, HashSet};

use syn::{GenericArgument, Ident, PathArguments, Type};

use crate::emit::{constructor_name, to_snake_case};
use crate::error::{Result, SchemaError};

/// Items every generated module defines or names in its own code.
const RESERVED_TYPE_NAMES: &[&str] = &["Visitor", "R", "Vis", "Box", "Option", "Vec", "From"];

/// Associated functions every family enum already has.
const RESERVED_CONSTRUCTORS: &[&str] = &["accept", "variant_name"];

/// Associated functions every variant struct already has.
const RESERVED_FIELDS: &[&str] = &["new"];

/// Declarative description of one node family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyDescriptor {
    /// Family name, e.g. `Expr`
    pub name: String,

    /// Variant lines in declaration order
    pub variants: Vec<String>,
}

impl FamilyDescriptor {
    /// Create a descriptor from a name and its variant lines.
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }
}

/// A parsed family: a closed, ordered set of variants.
#[derive(Debug, Clone)]
pub struct Family {
    /// Family type name
    pub name: Ident,

    /// Variants in declaration order
    pub variants: Vec<Variant>,
}

/// One concrete node kind.
#[derive(Debug, Clone)]
pub struct Variant {
    /// Variant (and struct) name
    pub name: Ident,

    /// Fields in declaration order
    pub fields: Vec<Field>,
}

/// A named, typed field of a variant.
#[derive(Debug, Clone)]
pub struct Field {
    /// Field name
    pub name: Ident,

    /// How the field is stored
    pub ty: FieldType,
}

/// Storage shape of a field.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A single owned child of some family, stored boxed.
    Node(Ident),

    /// An optional owned child of some family, stored boxed.
    OptionalNode(Ident),

    /// An owned ordered sequence (`List<T>` or `Vec<T>`).
    List(Type),

    /// An optional primitive.
    Optional(Type),

    /// A primitive stored by value (tokens, literal values).
    Plain(Type),
}

impl FieldType {
    /// Collect the type names this field mentions, e.g. `Token` for
    /// `List<Token>`.
    pub fn referenced_types(&self, out: &mut HashSet<String>) {
        match self {
            FieldType::Node(family) | FieldType::OptionalNode(family) => {
                out.insert(family.to_string());
            }
            FieldType::List(ty) | FieldType::Optional(ty) | FieldType::Plain(ty) => {
                if let Type::Path(path) = ty {
                    out.extend(path.path.segments.iter().map(|s| s.ident.to_string()));
                }
            }
        }
    }
}

/// Parse and validate a whole descriptor list.
///
/// Family names are collected first so that a variant may reference any
/// family in the list, including ones declared after it.
pub fn parse_families(descriptors: &[FamilyDescriptor]) -> Result<Vec<Family>> {
    let mut names = HashSet::new();
    let mut files = HashMap::new();
    for descriptor in descriptors {
        let family = descriptor.name.as_str();
        parse_ident(family).ok_or_else(|| SchemaError::InvalidFamilyName {
            family: family.to_string(),
        })?;
        if !names.insert(family) {
            return Err(SchemaError::DuplicateFamily {
                family: family.to_string(),
            });
        }
        if RESERVED_TYPE_NAMES.contains(&family) {
            return Err(clash(family, family, "an item every generated module defines"));
        }
        // One output file per family, named after the snake-cased family
        if let Some(other) = files.insert(to_snake_case(family), family) {
            return Err(clash(
                family,
                family,
                &format!("family `{}` (both are written to `{}.rs`)", other, to_snake_case(family)),
            ));
        }
    }

    descriptors
        .iter()
        .map(|descriptor| parse_family(descriptor, &names))
        .collect()
}

fn parse_family(descriptor: &FamilyDescriptor, families: &HashSet<&str>) -> Result<Family> {
    let family = descriptor.name.as_str();
    if descriptor.variants.is_empty() {
        return Err(SchemaError::EmptyFamily {
            family: family.to_string(),
        });
    }

    let mut seen = HashSet::new();
    let mut variants = Vec::with_capacity(descriptor.variants.len());
    for spec in &descriptor.variants {
        let variant = parse_variant(family, spec, families)?;
        if !seen.insert(variant.name.to_string()) {
            return Err(SchemaError::DuplicateVariant {
                family: family.to_string(),
                variant: variant.name.to_string(),
            });
        }
        variants.push(variant);
    }
    check_clashes(family, &variants, families)?;

    let name = parse_ident(family).ok_or_else(|| SchemaError::InvalidFamilyName {
        family: family.to_string(),
    })?;
    Ok(Family { name, variants })
}

/// Reject names that parse but would make the emitted module fail to build.
fn check_clashes(family: &str, variants: &[Variant], families: &HashSet<&str>) -> Result<()> {
    let mut referenced = HashSet::new();
    for field in variants.iter().flat_map(|v| &v.fields) {
        field.ty.referenced_types(&mut referenced);
    }

    let mut snake_names: HashMap<String, String> = HashMap::new();
    let mut constructors: HashMap<String, String> = HashMap::new();
    for variant in variants {
        let name = variant.name.to_string();
        if families.contains(name.as_str()) {
            return Err(clash(family, &name, &format!("the family `{}`", name)));
        }
        if RESERVED_TYPE_NAMES.contains(&name.as_str()) {
            return Err(clash(family, &name, "an item every generated module defines"));
        }
        if referenced.contains(&name) {
            return Err(clash(family, &name, &format!("the field type `{}`", name)));
        }

        let snake = to_snake_case(&name);
        if let Some(other) = snake_names.insert(snake.clone(), name.clone()) {
            return Err(clash(
                family,
                &name,
                &format!("variant `{}` (both become `{}`)", other, snake),
            ));
        }
        let ctor = constructor_name(&name).to_string();
        let ctor = ctor.trim_start_matches("r#").to_string();
        if RESERVED_CONSTRUCTORS.contains(&ctor.as_str()) {
            return Err(clash(family, &name, &format!("the `{}` method", ctor)));
        }
        if let Some(other) = constructors.insert(ctor.clone(), name.clone()) {
            return Err(clash(
                family,
                &name,
                &format!("variant `{}` (both construct through `{}`)", other, ctor),
            ));
        }

        for field in &variant.fields {
            let field_name = field.name.to_string();
            if RESERVED_FIELDS.contains(&field_name.as_str()) {
                return Err(clash(
                    family,
                    &format!("{}.{}", name, field_name),
                    "the `new` constructor",
                ));
            }
        }
    }
    Ok(())
}

fn clash(family: &str, name: &str, existing: &str) -> SchemaError {
    SchemaError::NameClash {
        family: family.to_string(),
        name: name.to_string(),
        existing: existing.to_string(),
    }
}

fn parse_variant(family: &str, spec: &str, families: &HashSet<&str>) -> Result<Variant> {
    let malformed = || SchemaError::MalformedVariant {
        family: family.to_string(),
        spec: spec.to_string(),
    };

    let (name, field_list) = spec.split_once(':').ok_or_else(malformed)?;
    // `::` paths are not allowed in field types, so a second colon is always an error
    if field_list.contains(':') {
        return Err(malformed());
    }
    let name = parse_ident(name.trim()).ok_or_else(malformed)?;
    let variant = name.to_string();

    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    let field_list = field_list.trim();
    if !field_list.is_empty() {
        for field_spec in split_fields(field_list) {
            let field = parse_field(family, &variant, field_spec, families)?;
            if !seen.insert(field.name.to_string()) {
                return Err(SchemaError::DuplicateField {
                    family: family.to_string(),
                    variant,
                    field: field.name.to_string(),
                });
            }
            fields.push(field);
        }
    }

    Ok(Variant { name, fields })
}

/// Split a field list on top-level commas, ignoring commas inside `<...>`.
fn split_fields(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts
}

fn parse_field(
    family: &str,
    variant: &str,
    spec: &str,
    families: &HashSet<&str>,
) -> Result<Field> {
    let malformed = || SchemaError::MalformedField {
        family: family.to_string(),
        variant: variant.to_string(),
        spec: spec.to_string(),
    };

    let (ty, name) = spec.rsplit_once(char::is_whitespace).ok_or_else(malformed)?;
    let name = parse_ident(name.trim()).ok_or_else(malformed)?;
    let ty: Type = syn::parse_str(ty.trim()).map_err(|_| malformed())?;

    let unsupported = |ty: &Type| SchemaError::UnsupportedType {
        family: family.to_string(),
        variant: variant.to_string(),
        field: name.to_string(),
        ty: quote::quote!(#ty).to_string(),
    };

    let ty = classify(&ty, families).ok_or_else(|| unsupported(&ty))?;
    Ok(Field { name, ty })
}

/// Map a descriptor type onto its storage shape.
fn classify(ty: &Type, families: &HashSet<&str>) -> Option<FieldType> {
    let path = match ty {
        Type::Path(type_path) if type_path.qself.is_none() => &type_path.path,
        _ => return None,
    };

    if path.leading_colon.is_some() || path.segments.len() != 1 {
        return None;
    }
    let segment = &path.segments[0];
    let head = segment.ident.to_string();

    match &segment.arguments {
        PathArguments::None if families.contains(head.as_str()) => {
            Some(FieldType::Node(segment.ident.clone()))
        }
        PathArguments::None => Some(FieldType::Plain(ty.clone())),
        PathArguments::AngleBracketed(args) => {
            let inner = match args.args.iter().collect::<Vec<_>>().as_slice() {
                [GenericArgument::Type(inner)] => inner,
                _ => return None,
            };
            // Only simple element types; nested containers are rejected
            let element = match classify(inner, families)? {
                FieldType::Node(ident) => ident,
                FieldType::Plain(Type::Path(p)) if p.path.segments.len() == 1 => {
                    p.path.segments[0].ident.clone()
                }
                _ => return None,
            };
            match head.as_str() {
                "List" | "Vec" => Some(FieldType::List(inner.clone())),
                "Option" if families.contains(element.to_string().as_str()) => {
                    Some(FieldType::OptionalNode(element))
                }
                "Option" => Some(FieldType::Optional(inner.clone())),
                _ => None,
            }
        }
        PathArguments::Parenthesized(_) => None,
    }
}

fn parse_ident(text: &str) -> Option<Ident> {
    syn::parse_str::<Ident>(text).ok()
}
