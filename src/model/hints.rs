use serde::{Deserialize, Serialize};

/// Overall register of a document's prose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Formal,
    Casual,
    Dramatic,
    #[default]
    Neutral,
}

/// Heuristic lexical annotations used downstream to gate AI narrative
/// generation
///
/// All numeric fields are clamped to [0, 1]. These are approximate by
/// design: they are derived from fixed wordlists, not semantic analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DreamingHints {
    pub emotions: Vec<String>,
    pub themes: Vec<String>,
    pub motifs: Vec<String>,
    pub tone: Tone,
    pub complexity: f64,
    #[serde(rename = "surrealism_potential")]
    pub surrealism: f64,
    pub visual_cues: Vec<String>,
    pub audio_cues: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub color_palette: Vec<String>,
    pub abstractness: f64,
}
