use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, parse_macro_input};

/// Applies the default multiversion target set used by imagefilter's
/// per-pixel kernels.
///
/// This macro expands to `#[multiversion(targets(...))]`, so the crate using it
/// must depend on `multiversion`.
///
/// # Example
///
/// ```ignore
/// use imagefilter_macros::simd_targets;
///
/// #[simd_targets]
/// fn invert_row(row: &mut [u8]) {
///     row.iter_mut().for_each(|c| *c = 255 - *c);
/// }
/// ```
#[proc_macro_attribute]
pub fn simd_targets(_attr: TokenStream, input: TokenStream) -> TokenStream {
    let func = parse_macro_input!(input as ItemFn);

    // Use minimal targets for debug builds to speed up compilation
    #[cfg(debug_assertions)]
    let expanded = quote! {
        #[multiversion::multiversion(targets(
            "x86_64+sse2",
            "aarch64+neon",
        ))]
        #func
    };

    // Use full target set for release builds
    #[cfg(not(debug_assertions))]
    let expanded = quote! {
        #[multiversion::multiversion(targets(
            // x86_64 (most modern desktops/servers)
            "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
            "x86_64+avx2+fma",
            "x86_64+sse4.2",
            "x86_64+sse2",

            // ARM64 (mobile, Apple Silicon, ARM servers)
            "aarch64+neon",
        ))]
        #func
    };

    TokenStream::from(expanded)
}
