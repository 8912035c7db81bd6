//! Derive macros for tasklist slices
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates lifecycle helpers for slice action enums
//!
//! # Example
//!
//! ```ignore
//! use tasklist_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(slice = "todolists")]
//! enum TodolistsAction {
//!     #[command]
//!     CreateTodolist { title: String },
//!
//!     #[fulfilled]
//!     TodolistCreated { todolist: Todolist },
//!
//!     #[rejected]
//!     RequestFailed { operation: Operation, error: RequestError },
//! }
//!
//! // Generated methods:
//! assert!(TodolistsAction::CreateTodolist { title: "Groceries".into() }.is_command());
//! assert_eq!(
//!     TodolistsAction::CreateTodolist { title: "Groceries".into() }.action_type(),
//!     "todolists/CreateTodolist",
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr, Variant};

/// Derive macro for slice action enums
///
/// Generates helper methods:
/// - `is_command()` - true for variants that start a request
/// - `is_fulfilled()` - true for variants that carry a successful result
/// - `is_rejected()` - true for variants that carry a failure
/// - `phase()` - the lifecycle phase the variant moves the slice into
///   (`Pending` for commands), `None` for unmarked variants
/// - `action_type()` - `"<slice>/<Variant>"`, or the bare variant name when
///   no `#[action(slice = "...")]` is given
///
/// # Attributes
///
/// - `#[action(slice = "name")]` (on the enum) - Prefix for `action_type()`
/// - `#[command]` - Mark a variant as a command (request start)
/// - `#[fulfilled]` - Mark a variant as a fulfilled result
/// - `#[rejected]` - Mark a variant as a rejected result
///
/// The generated `phase()` refers to `tasklist_core::lifecycle::Phase`, so the
/// deriving crate must depend on `tasklist-core`.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant carries more than one of `#[command]`, `#[fulfilled]`, `#[rejected]`
#[proc_macro_derive(Action, attributes(action, command, fulfilled, rejected))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let slice = match slice_name(&input.attrs) {
        Ok(slice) => slice,
        Err(error) => return error.to_compile_error().into(),
    };

    let mut command_arms = Vec::new();
    let mut fulfilled_arms = Vec::new();
    let mut rejected_arms = Vec::new();
    let mut type_arms = Vec::new();

    for variant in &data_enum.variants {
        let pattern = variant_pattern(variant);
        let marks = ["command", "fulfilled", "rejected"]
            .into_iter()
            .filter(|mark| has_attribute(&variant.attrs, mark))
            .collect::<Vec<_>>();

        if marks.len() > 1 {
            return syn::Error::new_spanned(
                variant,
                "Variant can carry only one of #[command], #[fulfilled], #[rejected]",
            )
            .to_compile_error()
            .into();
        }

        match marks.first() {
            Some(&"command") => command_arms.push(pattern.clone()),
            Some(&"fulfilled") => fulfilled_arms.push(pattern.clone()),
            Some(&"rejected") => rejected_arms.push(pattern.clone()),
            _ => {},
        }

        let action_type = match &slice {
            Some(slice) => format!("{slice}/{}", variant.ident),
            None => variant.ident.to_string(),
        };
        type_arms.push(quote! { #pattern => #action_type, });
    }

    let command_match = matches_any(&command_arms);
    let fulfilled_match = matches_any(&fulfilled_arms);
    let rejected_match = matches_any(&rejected_arms);

    let expanded = quote! {
        impl #name {
            /// Returns true if this action starts a request
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #command_match
                    _ => false,
                }
            }

            /// Returns true if this action carries a fulfilled result
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_fulfilled(&self) -> bool {
                match self {
                    #fulfilled_match
                    _ => false,
                }
            }

            /// Returns true if this action carries a rejection
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_rejected(&self) -> bool {
                match self {
                    #rejected_match
                    _ => false,
                }
            }

            /// Lifecycle phase this action moves its slice into
            #[must_use]
            pub const fn phase(&self) -> Option<tasklist_core::lifecycle::Phase> {
                if self.is_command() {
                    Some(tasklist_core::lifecycle::Phase::Pending)
                } else if self.is_fulfilled() {
                    Some(tasklist_core::lifecycle::Phase::Fulfilled)
                } else if self.is_rejected() {
                    Some(tasklist_core::lifecycle::Phase::Rejected)
                } else {
                    None
                }
            }

            /// Action type name, used in logs
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                match self {
                    #(#type_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// `pat | pat => true,`, or nothing for an empty set
fn matches_any(patterns: &[proc_macro2::TokenStream]) -> proc_macro2::TokenStream {
    if patterns.is_empty() {
        quote! {}
    } else {
        quote! { #(#patterns)|* => true, }
    }
}

/// Pattern matching a variant regardless of its fields
fn variant_pattern(variant: &Variant) -> proc_macro2::TokenStream {
    let ident = &variant.ident;
    match variant.fields {
        Fields::Named(_) => quote! { Self::#ident { .. } },
        Fields::Unnamed(_) => quote! { Self::#ident(..) },
        Fields::Unit => quote! { Self::#ident },
    }
}

/// Reads `#[action(slice = "...")]` from the enum attributes
fn slice_name(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut slice = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("slice") {
                let value: LitStr = meta.value()?.parse()?;
                slice = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported action attribute, expected `slice = \"...\"`"))
            }
        })?;
    }
    Ok(slice)
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}
