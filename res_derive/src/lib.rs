// derive macros for the DNS wire structures in reslib
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod wire_enum;
mod wire_struct;

use wire_enum::wire_enum;
use wire_struct::wire_struct;

/// Implements the ToFromNetworkOrder trait for a struct by chaining the
/// conversion of each field, in declaration order.
#[proc_macro_derive(Wire)]
pub fn wire_macro_struct(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // inject code
    wire_struct(&ast)
}

/// Implements Default, TryFrom<u8>, TryFrom<u16> and FromStr for a unit-only
/// enum whose variants all carry integer discriminants (RR types, classes,
/// opcodes, ...).
#[proc_macro_derive(WireEnum)]
pub fn wire_macro_enum(input: TokenStream) -> TokenStream {
    // Parse the input tokens into a syntax tree
    let ast = parse_macro_input!(input as DeriveInput);

    // inject code
    wire_enum(&ast)
}
