//! Parsing of `#[postgen(...)]` field attributes.

use syn::{Attribute, Expr, ExprLit, Field, Lit, LitStr, Meta, Result, Token, ext::IdentExt};

/// Routing role keywords, in the order they are emitted.
pub const ROLES: [(&str, &str); 5] = [
    ("json", "Json"),
    ("form", "Form"),
    ("form_file", "FormFile"),
    ("query", "Query"),
    ("param", "Param"),
];

/// Everything the derive needs to know about one field.
#[derive(Debug, Default)]
pub struct FieldConfig {
    /// Declared name, without any raw-identifier prefix.
    pub name: String,
    /// `(role variant, tag value)` pairs in declaration order.
    pub tags: Vec<(&'static str, String)>,
    pub description: Option<String>,
    pub example: Option<String>,
    pub flatten: bool,
    pub skip: bool,
    /// Collected `///` lines, used when no explicit description is given.
    pub doc: Vec<String>,
}

impl FieldConfig {
    /// Parse configuration for a named field.
    pub fn from_field(field: &Field) -> Result<Self> {
        let name = field
            .ident
            .as_ref()
            .map(|ident| ident.unraw().to_string())
            .unwrap_or_default();

        let mut config = FieldConfig {
            name,
            ..Default::default()
        };

        for attr in &field.attrs {
            if attr.path().is_ident("postgen") {
                config.parse_postgen_attr(attr)?;
            } else if attr.path().is_ident("doc") {
                if let Some(line) = doc_line(attr) {
                    config.doc.push(line);
                }
            }
        }

        Ok(config)
    }

    fn parse_postgen_attr(&mut self, attr: &Attribute) -> Result<()> {
        attr.parse_nested_meta(|meta| {
            if let Some((_, variant)) = ROLES.iter().find(|(keyword, _)| meta.path.is_ident(keyword))
            {
                // A bare role keyword routes the field under its declared name.
                let value = if meta.input.peek(Token![=]) {
                    let lit: LitStr = meta.value()?.parse()?;
                    lit.value()
                } else {
                    self.name.clone()
                };
                self.tags.retain(|(existing, _)| existing != variant);
                self.tags.push((*variant, value));
            } else if meta.path.is_ident("description") {
                let lit: LitStr = meta.value()?.parse()?;
                self.description = Some(lit.value());
            } else if meta.path.is_ident("example") {
                let lit: LitStr = meta.value()?.parse()?;
                self.example = Some(lit.value());
            } else if meta.path.is_ident("flatten") {
                self.flatten = true;
            } else if meta.path.is_ident("skip") {
                self.skip = true;
            } else {
                return Err(meta.error(format!(
                    "unknown postgen attribute: `{}`. Expected one of: json, form, form_file, query, param, description, example, flatten, skip",
                    meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                )));
            }
            Ok(())
        })
    }

    /// The description to emit: explicit attribute first, then doc comment.
    pub fn effective_description(&self) -> String {
        match &self.description {
            Some(description) => description.clone(),
            None => self.doc.join(" "),
        }
    }
}

fn doc_line(attr: &Attribute) -> Option<String> {
    let Meta::NameValue(name_value) = &attr.meta else {
        return None;
    };
    let Expr::Lit(ExprLit {
        lit: Lit::Str(lit), ..
    }) = &name_value.value
    else {
        return None;
    };
    let line = lit.value().trim().to_string();
    (!line.is_empty()).then_some(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{DeriveInput, Fields, parse_quote};

    fn first_field(input: DeriveInput) -> Field {
        let syn::Data::Struct(data) = input.data else {
            panic!("Expected struct");
        };
        let Fields::Named(named) = data.fields else {
            panic!("Expected named fields");
        };
        named.named.into_iter().next().unwrap()
    }

    #[test]
    fn parses_roles_and_metadata() {
        let field = first_field(parse_quote! {
            struct S {
                #[postgen(json = "user_name", query, example = "jdoe")]
                #[postgen(description = "Login name")]
                pub r#user: String,
            }
        });
        let config = FieldConfig::from_field(&field).unwrap();

        assert_eq!(config.name, "user");
        assert_eq!(
            config.tags,
            vec![("Json", "user_name".to_string()), ("Query", "user".to_string())]
        );
        assert_eq!(config.example.as_deref(), Some("jdoe"));
        assert_eq!(config.effective_description(), "Login name");
    }

    #[test]
    fn doc_comment_backs_up_description() {
        let field = first_field(parse_quote! {
            struct S {
                /// The tenant
                /// to scope by.
                #[postgen(query = "tenant_id")]
                pub tenant: String,
            }
        });
        let config = FieldConfig::from_field(&field).unwrap();
        assert_eq!(config.effective_description(), "The tenant to scope by.");
    }

    #[test]
    fn flags_are_recognised() {
        let field = first_field(parse_quote! {
            struct S {
                #[postgen(flatten, skip)]
                pub base: Base,
            }
        });
        let config = FieldConfig::from_field(&field).unwrap();
        assert!(config.flatten);
        assert!(config.skip);
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        let field = first_field(parse_quote! {
            struct S {
                #[postgen(header = "x")]
                pub h: String,
            }
        });
        let err = FieldConfig::from_field(&field).unwrap_err();
        assert!(err.to_string().contains("unknown postgen attribute"));
    }
}
