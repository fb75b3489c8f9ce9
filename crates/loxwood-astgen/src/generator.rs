//! Generator entry points: render artifacts and write them out

use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{parse_families, Family, FamilyDescriptor};
use crate::emit::{emit_family, to_snake_case};
use crate::error::{Result, SchemaError};
use crate::grammar::lox_grammar;

/// Derives applied to every generated struct and enum unless overridden.
pub const DEFAULT_DERIVES: &[&str] = &[
    "Debug",
    "Clone",
    "PartialEq",
    "serde::Serialize",
    "serde::Deserialize",
];

/// Rendered source for one family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Family name
    pub family: String,

    /// File name inside the output directory, e.g. `expr.rs`
    pub file_name: String,

    /// Complete Rust source
    pub source: String,
}

impl Artifact {
    /// Whether `dir` already holds this artifact byte for byte.
    pub fn is_current_in(&self, dir: &Path) -> bool {
        fs::read_to_string(dir.join(&self.file_name))
            .map(|existing| existing == self.source)
            .unwrap_or(false)
    }
}

/// Turns family descriptors into generated Rust modules.
///
/// # Example
///
/// ```
/// use loxwood_astgen::{FamilyDescriptor, Generator};
///
/// let generator = Generator::new([FamilyDescriptor::new(
///     "Expr",
///     ["Literal : f64 value", "Negate : Expr operand"],
/// )]);
/// let artifacts = generator.generate().unwrap();
/// assert_eq!(artifacts[0].file_name, "expr.rs");
/// assert!(artifacts[0].source.contains("visit_negate_expr"));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    families: Vec<FamilyDescriptor>,
    derives: Vec<String>,
}

impl Generator {
    /// Create a generator over the given descriptors with [`DEFAULT_DERIVES`].
    pub fn new(families: impl IntoIterator<Item = FamilyDescriptor>) -> Self {
        Self {
            families: families.into_iter().collect(),
            derives: DEFAULT_DERIVES.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Generator over the Lox grammar.
    pub fn lox() -> Self {
        Self::new(lox_grammar())
    }

    /// Replace the derive list.
    pub fn with_derives<I, S>(mut self, derives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derives = derives.into_iter().map(Into::into).collect();
        self
    }

    /// Append one derive.
    pub fn derive(mut self, path: impl Into<String>) -> Self {
        self.derives.push(path.into());
        self
    }

    /// The descriptors this generator was built from.
    pub fn families(&self) -> &[FamilyDescriptor] {
        &self.families
    }

    /// Parse and validate the descriptors without rendering.
    pub fn schema(&self) -> Result<Vec<Family>> {
        parse_families(&self.families)
    }

    /// Render every family. Nothing is returned unless all families succeed.
    #[tracing::instrument(level = "debug", skip_all, fields(families = self.families.len()))]
    pub fn generate(&self) -> Result<Vec<Artifact>> {
        let derives = self
            .derives
            .iter()
            .map(|d| syn::parse_str::<syn::Path>(d).map_err(|_| SchemaError::InvalidDerive(d.clone())))
            .collect::<Result<Vec<_>>>()?;

        let schema = self.schema()?;
        let mut artifacts = Vec::with_capacity(schema.len());
        for family in &schema {
            let tokens = emit_family(family, &derives);
            let name = family.name.to_string();

            syn::parse2::<syn::File>(tokens.clone()).map_err(|e| SchemaError::InvalidOutput {
                family: name.clone(),
                message: e.to_string(),
            })?;

            tracing::debug!(
                family = %name,
                variants = family.variants.len(),
                "rendered family"
            );

            artifacts.push(Artifact {
                file_name: format!("{}.rs", to_snake_case(&name)),
                source: format!(
                    "// @generated by loxwood-astgen from the `{}` descriptor. Do not edit.\n{}\n",
                    name, tokens
                ),
                family: name,
            });
        }
        Ok(artifacts)
    }

    /// Render and write every artifact into `dir`.
    ///
    /// Artifacts are staged as `*.rs.tmp` and renamed into place once all of
    /// them are on disk, so a schema or staging failure leaves the directory
    /// untouched. If a rename fails, artifacts renamed before it stay in
    /// place and the remaining staged files are removed.
    #[tracing::instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let artifacts = self.generate()?;

        fs::create_dir_all(dir).map_err(|source| SchemaError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut staged = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            let target = dir.join(&artifact.file_name);
            let tmp = dir.join(format!("{}.tmp", artifact.file_name));
            if let Err(source) = fs::write(&tmp, &artifact.source) {
                discard(&staged);
                return Err(SchemaError::Io { path: tmp, source });
            }
            staged.push((tmp, target));
        }

        let mut written = Vec::with_capacity(staged.len());
        for (i, (tmp, target)) in staged.iter().enumerate() {
            if let Err(source) = fs::rename(tmp, target) {
                discard(&staged[i..]);
                return Err(SchemaError::Io {
                    path: target.clone(),
                    source,
                });
            }
            tracing::debug!(path = %target.display(), "wrote artifact");
            written.push(target.clone());
        }
        Ok(written)
    }
}

fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        let _ = fs::remove_file(tmp);
    }
}
