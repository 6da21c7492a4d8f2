// src/models/question.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::{numeric::lenient_id, text::lenient_string};

/// Chemical-element category a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChemicalElement {
    #[serde(rename = "Hidrogênio")]
    Hydrogen,
    #[serde(rename = "Oxigênio")]
    Oxygen,
    #[serde(rename = "Hélio")]
    Helium,
    #[serde(rename = "Neônio")]
    Neon,
    #[serde(rename = "Argônio")]
    Argon,
    #[serde(rename = "Criptônio")]
    Krypton,
    #[serde(rename = "Xenônio")]
    Xenon,
    #[serde(rename = "Radônio")]
    Radon,
    #[serde(rename = "Oganessônio")]
    Oganesson,
}

impl ChemicalElement {
    pub const ALL: [ChemicalElement; 9] = [
        ChemicalElement::Hydrogen,
        ChemicalElement::Oxygen,
        ChemicalElement::Helium,
        ChemicalElement::Neon,
        ChemicalElement::Argon,
        ChemicalElement::Krypton,
        ChemicalElement::Xenon,
        ChemicalElement::Radon,
        ChemicalElement::Oganesson,
    ];

    /// Label used on the wire and in the element picker.
    pub fn label(self) -> &'static str {
        match self {
            ChemicalElement::Hydrogen => "Hidrogênio",
            ChemicalElement::Oxygen => "Oxigênio",
            ChemicalElement::Helium => "Hélio",
            ChemicalElement::Neon => "Neônio",
            ChemicalElement::Argon => "Argônio",
            ChemicalElement::Krypton => "Criptônio",
            ChemicalElement::Xenon => "Xenônio",
            ChemicalElement::Radon => "Radônio",
            ChemicalElement::Oganesson => "Oganessônio",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }
}

impl fmt::Display for ChemicalElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A question record as served by the upstream `pergunta` resource.
///
/// The element is kept as the raw string upstream sent: reads are not
/// validated, only writes go through [`QuestionForm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: i64,

    /// Prompt text.
    #[serde(default, deserialize_with = "lenient_string")]
    pub question: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub chemical_element: String,
}

/// Body sent to upstream on create and update, and the editable form state
/// of the questions screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionForm {
    #[validate(length(
        min = 1,
        max = 300,
        message = "Question text must be between 1 and 300 characters."
    ))]
    pub question: String,
    pub chemical_element: ChemicalElement,
}

/// What the question form currently shows. Unlike [`QuestionForm`] it may be
/// half-filled, e.g. after selecting a question whose element is unknown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDraft {
    pub question: String,
    pub chemical_element: Option<ChemicalElement>,
}

impl From<&Question> for QuestionDraft {
    fn from(question: &Question) -> Self {
        Self {
            question: question.question.clone(),
            chemical_element: ChemicalElement::from_label(&question.chemical_element),
        }
    }
}
