use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use super::StructuralFilter;

static SVG_ANIMATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(?:animate|animateTransform|animateMotion|animateColor)\b|<set\s|@keyframes\b")
        .unwrap()
});

/// Vector markup filter: an `<svg>` root with SMIL elements or CSS keyframes.
///
/// Scripted animation (JavaScript setting attributes on a timer) is not
/// detected.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgFilter;

impl StructuralFilter for SvgFilter {
    fn accepts(&self, code: &str) -> bool {
        code.contains("<svg") && SVG_ANIMATION_REGEX.is_match(code)
    }
}

/// Lottie filter: a JSON document with layers and a non-empty frame range.
///
/// Files that are not valid JSON are rejected rather than reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct LottieFilter;

impl StructuralFilter for LottieFilter {
    fn accepts(&self, code: &str) -> bool {
        let Ok(Value::Object(doc)) = serde_json::from_str::<Value>(code) else {
            return false;
        };

        let has_layers = doc
            .get("layers")
            .and_then(Value::as_array)
            .is_some_and(|layers| !layers.is_empty());
        let frame_rate = doc.get("fr").and_then(Value::as_f64);
        let in_point = doc.get("ip").and_then(Value::as_f64);
        let out_point = doc.get("op").and_then(Value::as_f64);

        match (frame_rate, in_point, out_point) {
            (Some(fr), Some(ip), Some(op)) => has_layers && fr > 0.0 && op > ip,
            _ => false,
        }
    }
}
