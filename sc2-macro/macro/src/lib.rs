#[macro_use]
extern crate quote;

use proc_macro::TokenStream;
use regex::Regex;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Ident, ItemEnum, Meta, NestedMeta};

fn snake_case(ident: &Ident) -> String {
	let re = Regex::new(r"[A-Z0-9]{1}[a-z0-9]*").unwrap();
	re.find_iter(&ident.to_string())
		.map(|m| m.as_str().to_ascii_lowercase())
		.collect::<Vec<String>>()
		.join("_")
}

fn has_option(attrs: &[Attribute], option: &str) -> bool {
	attrs.iter().any(|a| {
		if !a.path.is_ident("enum_from_str") {
			return false;
		}
		match a.parse_meta() {
			Ok(Meta::List(list)) => list.nested.iter().any(|n| {
				if let NestedMeta::Meta(Meta::Path(path)) = n {
					path.is_ident(option)
				} else {
					false
				}
			}),
			_ => false,
		}
	})
}

/// Derives `FromStr` for fieldless enums.
///
/// Accepts exact variant names (`VictoryMarginal`) and their snake case form (`victory_marginal`).
/// With `#[enum_from_str(use_primitives)]` integer discriminants are accepted too.
#[proc_macro_derive(FromStr, attributes(enum_from_str))]
pub fn enum_from_str_derive(input: TokenStream) -> TokenStream {
	let item = parse_macro_input!(input as DeriveInput);
	let data = match item.data {
		Data::Enum(data) => data,
		_ => panic!("Can only derive FromStr for enums"),
	};
	let name = item.ident;
	let variants = data.variants.iter().map(|v| &v.ident).collect::<Vec<_>>();
	let snake_variants = variants.iter().map(|v| snake_case(v)).collect::<Vec<_>>();

	let other_cases = if has_option(&item.attrs, "use_primitives") {
		quote! {
			n => {
				if let Ok(num) = n.parse::<i64>() {
					if let Some(result) = <Self as num_traits::FromPrimitive>::from_i64(num) {
						return Ok(result);
					}
				}
				return Err(sc2_macro::ParseEnumError);
			}
		}
	} else {
		quote! {_ => return Err(sc2_macro::ParseEnumError)}
	};

	TokenStream::from(quote! {
		impl std::str::FromStr for #name {
			type Err = sc2_macro::ParseEnumError;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Ok(match s.trim() {
					#(
						stringify!(#variants) | #snake_variants => Self::#variants,
					)*
					#other_cases,
				})
			}
		}
	})
}

/// Generates `is_<variant>` checkers for every variant of fieldless enum.
#[proc_macro_attribute]
pub fn variant_checkers(_attr: TokenStream, item: TokenStream) -> TokenStream {
	let item = parse_macro_input!(item as ItemEnum);

	let name = &item.ident;
	let variants = item.variants.iter().map(|v| &v.ident);
	let checkers = item
		.variants
		.iter()
		.map(|v| format_ident!("is_{}", snake_case(&v.ident)));

	TokenStream::from(quote! {
		#item
		impl #name {
			#(
				#[inline]
				pub fn #checkers(self) -> bool {
					matches!(self, Self::#variants)
				}
			)*
		}
	})
}
