use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Rewrites a `Result`-returning `main` so that logging is installed before
/// anything runs and an error exits the process with a non-zero status.
pub(crate) fn main_impl(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    let ident = sig.ident.clone();
    let mut inner_sig = sig;
    inner_sig.ident = syn::Ident::new("__main", ident.span());

    quote! {
        #(#attrs)*
        #vis fn #ident() -> ::std::process::ExitCode {
            env_logger::init();
            #inner_sig #block
            match __main() {
                Ok(()) => ::std::process::ExitCode::SUCCESS,
                Err(err) => {
                    ::log::error!("fatal: {err}");
                    ::std::process::ExitCode::FAILURE
                }
            }
        }
    }
    .into()
}
