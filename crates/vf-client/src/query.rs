//! Page URL glue for the embedded form variants.
//!
//! The embedding page passes the initial spec and its layout hints as
//! query parameters; everything here is plain extraction, the semantics
//! live in vf-sync.

use reqwest::Url;
use vf_sync::PlotDims;

/// Raw `spec` parameter from a page URL, percent-decoded, if present.
pub fn spec_param(url: &Url) -> Option<String> {
    param(url, "spec")
}

/// Plot dimensions from the `frameHeight`/`formHeight`/`formWidth`
/// companions, falling back to the measured form dimensions.
pub fn dims_from_url(url: &Url, measured_form_height: u32, measured_form_width: u32) -> PlotDims {
    let frame_height = numeric_param(url, "frameHeight");
    let form_height = numeric_param(url, "formHeight").unwrap_or(measured_form_height);
    let form_width = numeric_param(url, "formWidth").unwrap_or(measured_form_width);
    PlotDims::from_frame(frame_height, form_height, form_width)
}

fn param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn numeric_param(url: &Url, name: &str) -> Option<u32> {
    param(url, name).and_then(|value| value.parse().ok())
}
