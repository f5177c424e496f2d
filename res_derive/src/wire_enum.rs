// The WireEnum derive: Default, TryFrom and FromStr for the wire enums.
// The wire codec transmits the discriminant itself, so the derive insists
// on unit variants whose values are spelled out as integer literals and
// fit the 16-bit fields of the DNS message format.
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, Fields, Ident, Lit};

// one acceptable variant: a bare name and its wire value
struct WireVariant {
    ident: Ident,
    value: u16,
}

// Check the enum shape and pull out the (name, value) pairs. Anything the
// codec could not faithfully put on the wire is a hard error at expansion
// time.
fn unit_variants(ast: &DeriveInput) -> Vec<WireVariant> {
    let data = match &ast.data {
        Data::Enum(data) => data,
        _ => panic!(
            "WireEnum can only be derived for an enum, and {} is not one",
            ast.ident
        ),
    };

    let mut variants = Vec::new();
    for v in &data.variants {
        if !matches!(v.fields, Fields::Unit) {
            panic!(
                "{}::{} carries data; wire enums need unit variants only",
                ast.ident, v.ident
            );
        }

        let expr = match &v.discriminant {
            Some((_, expr)) => expr,
            None => panic!(
                "{}::{} has no discriminant; wire enums spell every value out",
                ast.ident, v.ident
            ),
        };

        let value = match expr {
            Expr::Lit(el) => match &el.lit {
                Lit::Int(int) => match int.base10_parse::<u16>() {
                    Ok(value) => value,
                    Err(_) => panic!(
                        "{}::{} discriminant does not fit in 16 bits",
                        ast.ident, v.ident
                    ),
                },
                _ => panic!(
                    "{}::{} discriminant is not an integer literal",
                    ast.ident, v.ident
                ),
            },
            _ => panic!(
                "{}::{} discriminant is not a plain literal",
                ast.ident, v.ident
            ),
        };

        variants.push(WireVariant {
            ident: v.ident.clone(),
            value,
        });
    }

    // Default needs somebody to point at
    if variants.is_empty() {
        panic!("{} has no variants", ast.ident);
    }

    variants
}

// emit the Default, TryFrom<u8>, TryFrom<u16> and FromStr impls
pub fn wire_enum(ast: &DeriveInput) -> TokenStream {
    let variants = unit_variants(ast);

    let enum_name = &ast.ident;
    let enum_name_s = enum_name.to_string();

    // the first variant doubles as the Default
    let default_variant = &variants[0].ident;

    let value_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let value = v.value;
        quote! { #value => Ok(#enum_name::#ident), }
    });

    let name_arms = variants.iter().map(|v| {
        let ident = &v.ident;
        let name = ident.to_string();
        quote! { #name => Ok(#enum_name::#ident), }
    });

    let impls = quote! {
        impl Default for #enum_name {
            fn default() -> Self {
                #enum_name::#default_variant
            }
        }

        // the single-octet fields go through the same table
        impl std::convert::TryFrom<u8> for #enum_name {
            type Error = String;

            fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
                <#enum_name>::try_from(value as u16)
            }
        }

        impl std::convert::TryFrom<u16> for #enum_name {
            type Error = String;

            fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
                match value {
                    #(#value_arms)*
                    _ => Err(format!("no variant of {} has wire value {}", #enum_name_s, value)),
                }
            }
        }

        impl std::str::FromStr for #enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    #(#name_arms)*
                    _ => Err(format!("no variant of {} is named '{}'", #enum_name_s, s)),
                }
            }
        }
    };

    TokenStream::from(impls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_str;

    fn derive_input(src: &str) -> DeriveInput {
        parse_str::<DeriveInput>(src).unwrap()
    }

    #[test]
    #[should_panic]
    fn rejects_structs() {
        let _ = unit_variants(&derive_input("struct Point { x: u8, y: u8 }"));
    }

    #[test]
    #[should_panic]
    fn rejects_data_variants() {
        let _ = unit_variants(&derive_input("enum Foo { A(u8), B = 1 }"));
    }

    #[test]
    #[should_panic]
    fn rejects_missing_discriminants() {
        let _ = unit_variants(&derive_input("enum Foo { A = 1, B, C }"));
    }

    #[test]
    #[should_panic]
    fn rejects_computed_discriminants() {
        let _ = unit_variants(&derive_input("enum Foo { A = 2 * 3, B = 1 }"));
    }

    #[test]
    #[should_panic]
    fn rejects_oversized_discriminants() {
        let _ = unit_variants(&derive_input("enum Foo { A = 100000 }"));
    }

    #[test]
    #[should_panic]
    fn rejects_empty_enums() {
        let _ = unit_variants(&derive_input("enum Foo {}"));
    }

    #[test]
    fn collects_names_and_values() {
        let variants = unit_variants(&derive_input("enum Foo { A = 1, B = 2, C = 255 }"));
        let got: Vec<(String, u16)> = variants
            .iter()
            .map(|v| (v.ident.to_string(), v.value))
            .collect();

        assert_eq!(
            got,
            vec![
                (String::from("A"), 1),
                (String::from("B"), 2),
                (String::from("C"), 255),
            ]
        );
    }
}
