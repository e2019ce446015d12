use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, parse_macro_input};

/// Wraps the function body and logs the labelled wall-clock time on exit,
/// error paths included.
pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = parse_macro_input!(attr as LitStr);
    let mut func = parse_macro_input!(item as ItemFn);
    let block = func.block.clone();

    let wrapped: syn::Block = syn::parse_quote!({
        let __timer_started = std::time::Instant::now();
        let __timer_output = (move || #block)();
        log::debug!(
            "{}: elapsed secs={:.2}",
            #label,
            __timer_started.elapsed().as_secs_f32()
        );
        __timer_output
    });

    func.block = Box::new(wrapped);
    quote!(#func).into()
}
