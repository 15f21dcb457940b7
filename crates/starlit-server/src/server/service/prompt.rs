use serde_json::{Value, json};
use starlit::RandSource;

/// Name of the structured output format sent upstream.
pub const SCHEMA_NAME: &str = "CitazioneSchema";

/// Longest quote the model may return, in characters.
pub const MAX_QUOTE_CHARS: u64 = 280;

pub const THEMES: [&str; 4] = ["romantico", "sociologico", "filosofico", "esistenziale"];

pub const AUTHOR_ERAS: [&str; 2] = ["classico", "contemporaneo"];

/// A prompt ready to be sent, with the timestamp it was built for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    /// Unix milliseconds, echoed back to the page as `ts`.
    pub ts: u64,
}

impl Prompt {
    /// Fills the template with a random theme and author era. The timestamp
    /// keeps consecutive prompts distinct.
    pub fn build<R: RandSource>(rng: &mut R, ts: u64) -> Self {
        let theme = THEMES[rng.index(THEMES.len())];
        let era = AUTHOR_ERAS[rng.index(AUTHOR_ERAS.len())];

        let text = format!(
            "Genera una citazione breve (1 o 2 frasi) in italiano.
- Tema: {theme}.
- Autore: scegli un autore {era} appropriato; non limitarti a una lista fissa.
- Tono: poetico, sobrio, immagini notturne/fugaci consentite.
- Evita contenuti sensibili o espliciti.
- Non superare 35 parole.
- Restituisci SOLO JSON valido con chiavi:
  {{\"author\":\"string\",\"quote\":\"string\"}}
  Dove \"author\" deve essere l'autore scelto da te.

Timestamp: {ts}"
        );

        Self { text, ts }
    }
}

/// JSON schema the model's output must satisfy.
pub fn quote_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": false,
        "required": ["author", "quote"],
        "properties": {
            "author": { "type": "string" },
            "quote": { "type": "string", "maxLength": MAX_QUOTE_CHARS }
        }
    })
}
