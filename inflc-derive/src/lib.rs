use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, token, Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta,
    Token, Type,
};

/// Derive macro describing the delimited-text columns a record struct reads.
///
/// For each named field it collects:
/// - the column name (`#[serde(rename = "...")]`, else the field name)
/// - header aliases accepted on input (`#[serde(alias = "...")]`)
/// - whether the column is required (not `Option<T>` and no `#[serde(default)]`)
/// - a description taken from the field's doc comment
///
/// Generates `csv_columns() -> &'static [CsvColumn]`. A `CsvColumn` type must be
/// in scope where the derive is used.
#[proc_macro_derive(CsvSchema, attributes(serde))]
pub fn derive_csv_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "CsvSchema only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "CsvSchema only supports structs",
            ))
        }
    };

    let mut columns = Vec::with_capacity(fields.len());
    for field in fields {
        let Some(ident) = &field.ident else {
            continue;
        };
        let serde = SerdeAttrs::parse(&field.attrs)?;
        let column = serde.rename.unwrap_or_else(|| ident.to_string());
        let aliases = serde.aliases;
        let required = !serde.has_default && !is_option_type(&field.ty);
        let description = doc_comment(&field.attrs);

        columns.push(quote! {
            CsvColumn {
                name: #column,
                aliases: &[#(#aliases),*],
                required: #required,
                description: #description,
            }
        });
    }

    Ok(quote! {
        impl #name {
            pub fn csv_columns() -> &'static [CsvColumn] {
                static COLUMNS: &[CsvColumn] = &[
                    #(#columns),*
                ];
                COLUMNS
            }
        }
    })
}

#[derive(Default)]
struct SerdeAttrs {
    rename: Option<String>,
    aliases: Vec<String>,
    has_default: bool,
}

impl SerdeAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = SerdeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("serde")) {
            attr.parse_nested_meta(|meta| {
                // rename(serialize = "..", deserialize = "..") and friends are skipped
                if meta.input.peek(token::Paren) {
                    return meta.parse_nested_meta(|inner| {
                        if inner.input.peek(Token![=]) {
                            inner.value()?.parse::<Expr>()?;
                        }
                        Ok(())
                    });
                }

                if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("alias") {
                    out.aliases.push(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("default") {
                    out.has_default = true;
                    if meta.input.peek(Token![=]) {
                        meta.value()?.parse::<LitStr>()?;
                    }
                } else if meta.input.peek(Token![=]) {
                    meta.value()?.parse::<Expr>()?;
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

fn doc_comment(attrs: &[Attribute]) -> String {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}
