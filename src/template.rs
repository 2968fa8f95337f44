//! Load template documents: ordered named structs of `field = spec` entries.
//!
//! The document grammar lives in `grammar.pest`; the spec text right of `=`
//! is handed to [`parse_spec`](crate::spec::parse_spec). Section and field
//! order follow document order exactly, since rendering and decoding depend
//! on it. Templates are immutable once loaded.

use crate::spec::{parse_spec, OffsetRange, SpecError};
use pest::Parser;
use pest_derive::Parser as PestParser;
use std::collections::HashMap;
use std::path::Path;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct TemplateParser;

/// One `field = spec` entry of a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub range: OffsetRange,
}

/// A named struct: ordered fields as declared in the document.
#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

/// Ordered collection of structs, indexed by name.
///
/// The empty template ([`Template::default`]) is the startup fallback when
/// the source is unreadable.
#[derive(Debug, Clone, Default)]
pub struct Template {
    structs: Vec<StructDef>,
    by_name: HashMap<String, usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Syntax(String),
    #[error("[{section}] {field}: {source}")]
    InvalidSpec {
        section: String,
        field: String,
        #[source]
        source: SpecError,
    },
    #[error("duplicate struct name: {0}")]
    DuplicateStruct(String),
}

impl Template {
    pub fn structs(&self) -> &[StructDef] {
        &self.structs
    }

    /// Struct names in document order (the selector list).
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.structs.iter().map(|s| s.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&StructDef> {
        self.by_name.get(name).map(|&i| &self.structs[i])
    }

    pub fn len(&self) -> usize {
        self.structs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    fn from_structs(structs: Vec<StructDef>) -> Result<Self, TemplateError> {
        let mut by_name = HashMap::new();
        for (i, s) in structs.iter().enumerate() {
            if by_name.insert(s.name.clone(), i).is_some() {
                return Err(TemplateError::DuplicateStruct(s.name.clone()));
            }
        }
        Ok(Template { structs, by_name })
    }
}

/// Parse a template document. A malformed entry aborts the whole load
/// (fail-fast config-load semantics).
pub fn parse(source: &str) -> Result<Template, TemplateError> {
    let sections = parse_sections(source)?;
    let mut structs = Vec::with_capacity(sections.len());
    for (name, entries) in sections {
        let mut fields = Vec::with_capacity(entries.len());
        for (field, spec) in entries {
            let range = parse_spec(&spec).map_err(|source| TemplateError::InvalidSpec {
                section: name.clone(),
                field: field.clone(),
                source,
            })?;
            fields.push(FieldDef { name: field, range });
        }
        structs.push(StructDef { name, fields });
    }
    Template::from_structs(structs)
}

/// Parse, dropping each struct whose entries fail instead of aborting: a
/// broken struct disappears from the selector, the rest keep working.
pub fn parse_lenient(source: &str) -> (Template, Vec<TemplateError>) {
    let mut errors = Vec::new();
    let sections = match parse_sections(source) {
        Ok(s) => s,
        Err(e) => {
            errors.push(e);
            return (Template::default(), errors);
        }
    };

    let mut template = Template::default();
    'sections: for (name, entries) in sections {
        let mut fields = Vec::with_capacity(entries.len());
        for (field, spec) in entries {
            match parse_spec(&spec) {
                Ok(range) => fields.push(FieldDef { name: field, range }),
                Err(source) => {
                    errors.push(TemplateError::InvalidSpec {
                        section: name.clone(),
                        field,
                        source,
                    });
                    continue 'sections;
                }
            }
        }
        if template.by_name.contains_key(&name) {
            errors.push(TemplateError::DuplicateStruct(name));
            continue;
        }
        template.by_name.insert(name.clone(), template.structs.len());
        template.structs.push(StructDef { name, fields });
    }
    (template, errors)
}

/// Read and parse a template file.
pub fn load(path: impl AsRef<Path>) -> Result<Template, TemplateError> {
    let source = std::fs::read_to_string(path)?;
    parse(&source)
}

/// Read and parse a template file, keeping every struct that loads. An
/// unreadable file yields the empty template plus the IO error.
pub fn load_lenient(path: impl AsRef<Path>) -> (Template, Vec<TemplateError>) {
    match std::fs::read_to_string(path) {
        Ok(source) => parse_lenient(&source),
        Err(e) => (Template::default(), vec![TemplateError::Io(e)]),
    }
}

type RawSection = (String, Vec<(String, String)>);

fn parse_sections(source: &str) -> Result<Vec<RawSection>, TemplateError> {
    let pairs = TemplateParser::parse(Rule::document, source)
        .map_err(|e| TemplateError::Syntax(e.to_string()))?;
    let document = pairs
        .into_iter()
        .next()
        .ok_or_else(|| TemplateError::Syntax("empty parse".to_string()))?;

    let mut sections: Vec<RawSection> = Vec::new();
    for item in document.into_inner() {
        match item.as_rule() {
            Rule::header => {
                let name = item
                    .into_inner()
                    .next()
                    .ok_or_else(|| TemplateError::Syntax("header: missing name".to_string()))?;
                sections.push((name.as_str().trim().to_string(), Vec::new()));
            }
            Rule::entry => {
                let mut it = item.into_inner();
                let field = it
                    .next()
                    .ok_or_else(|| TemplateError::Syntax("entry: missing field name".to_string()))?
                    .as_str()
                    .to_string();
                let spec = it.next().map(|p| p.as_str().to_string()).unwrap_or_default();
                match sections.last_mut() {
                    Some((_, entries)) => entries.push((field, spec)),
                    None => {
                        return Err(TemplateError::Syntax(format!(
                            "entry `{}` before any [struct] header",
                            field
                        )))
                    }
                }
            }
            _ => {}
        }
    }
    Ok(sections)
}
