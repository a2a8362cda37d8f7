use super::{DetectError, DetectorBackend, LanguageTag};

/// Trigram-based detector from the `whatlang` crate.
///
/// `whatlang` reports ISO 639-3 codes; the common ones are mapped to the
/// two-letter tags used in configuration (`eng` -> `EN`, `jpn` -> `JA`).
/// Codes without a mapping are kept as upper-cased three-letter tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangBackend;

impl WhatlangBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DetectorBackend for WhatlangBackend {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectError> {
        let info = whatlang::detect(text).ok_or(DetectError::Undetermined {
            chars: text.chars().count(),
        })?;
        Ok(LanguageTag::new(two_letter_code(info.lang().code())))
    }
}

fn two_letter_code(iso639_3: &str) -> &str {
    match iso639_3 {
        "eng" => "en",
        "jpn" => "ja",
        "cmn" => "zh",
        "kor" => "ko",
        "spa" => "es",
        "por" => "pt",
        "fra" => "fr",
        "deu" => "de",
        "ita" => "it",
        "nld" => "nl",
        "rus" => "ru",
        "ukr" => "uk",
        "pol" => "pl",
        "ces" => "cs",
        "slk" => "sk",
        "slv" => "sl",
        "hrv" => "hr",
        "srp" => "sr",
        "bul" => "bg",
        "ron" => "ro",
        "hun" => "hu",
        "ell" => "el",
        "tur" => "tr",
        "swe" => "sv",
        "dan" => "da",
        "nob" => "no",
        "fin" => "fi",
        "est" => "et",
        "lav" => "lv",
        "lit" => "lt",
        "cat" => "ca",
        "lat" => "la",
        "epo" => "eo",
        "afr" => "af",
        "ara" => "ar",
        "heb" => "he",
        "pes" => "fa",
        "hin" => "hi",
        "ben" => "bn",
        "urd" => "ur",
        "tam" => "ta",
        "tha" => "th",
        "vie" => "vi",
        "ind" => "id",
        other => other,
    }
}
