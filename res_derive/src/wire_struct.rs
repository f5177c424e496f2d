// The Wire derive: a ToFromNetworkOrder impl which converts each named
// field in declaration order, so a wire structure reads exactly like its
// RFC diagram.
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput};

// only structs with named fields describe a wire layout
fn get_struct(ast: &DeriveInput) -> &DataStruct {
    match &ast.data {
        Data::Struct(data) => data,
        _ => panic!(
            "Wire can only be derived for a struct, and {} is not one",
            ast.ident
        ),
    }
}

// create the impl methods for trait ToFromNetworkOrder
pub fn wire_struct(ast: &DeriveInput) -> TokenStream {
    // get struct data or panic
    let struct_token = get_struct(ast);

    // save structure name because we're gonna use it soon
    let structure_name = &ast.ident;

    // to_network_bytes() call for each field
    let to_method_calls = struct_token.fields.iter().map(|f| {
        // get name of the field as TokenStream
        let field_name = f.ident.as_ref().unwrap();

        quote! {
            length += crate::network_order::ToFromNetworkOrder::to_network_bytes(&self.#field_name, buffer)?;
        }
    });

    // from_network_bytes() call for each field
    let from_method_calls = struct_token.fields.iter().map(|f| {
        // get name of the field as TokenStream
        let field_name = f.ident.as_ref().unwrap();

        quote! {
            crate::network_order::ToFromNetworkOrder::from_network_bytes(&mut self.#field_name, buffer)?;
        }
    });

    // wire structures own their data, so no lifetime juggling is needed here
    let new_code = quote! {
        // the generated impl.
        impl crate::network_order::ToFromNetworkOrder for #structure_name {
            fn to_network_bytes(&self, buffer: &mut Vec<u8>) -> std::io::Result<usize> {
                let mut length = 0usize;
                #( #to_method_calls)*
                Ok(length)
            }

            fn from_network_bytes(&mut self, buffer: &mut std::io::Cursor<&[u8]>) -> crate::error::Result<()> {
                #( #from_method_calls)*
                Ok(())
            }
        }
    };

    // Hand the output tokens back to the compiler
    TokenStream::from(new_code)
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
    fn rejects_enums() {
        let _ = get_struct(&derive_input("enum Foo { A = 1 }"));
    }

    #[test]
    fn walks_fields_in_declaration_order() {
        let ast = derive_input("struct Header { id: u16, flags: u16, count: u16 }");
        let names: Vec<String> = get_struct(&ast)
            .fields
            .iter()
            .map(|f| f.ident.as_ref().unwrap().to_string())
            .collect();

        assert_eq!(names, vec!["id", "flags", "count"]);
    }
}
