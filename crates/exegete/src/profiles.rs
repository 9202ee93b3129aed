#![forbid(unsafe_code)]

//! Shipped document profiles for the study backend's endpoints.

use serde::{Deserialize, Serialize};

use crate::profile::DocumentProfile;

/// Original-language analysis of one word in its verse context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WordStudy {
    pub word_header: String,
    pub language_info: String,
    pub original_text: String,
    pub pronunciation: String,
    pub root_meanings: String,
    pub contextual_meaning: String,
    pub other_uses: String,
    pub cultural_significance: String,
}

/// Profile for word-level analysis, keyed by book/chapter/verse/word.
pub struct WordAnalysis;

impl DocumentProfile for WordAnalysis {
    type Document = WordStudy;

    const CLASS: &'static str = "word-analysis";

    const SECTIONS: &'static [&'static str] = &[
        "WordHeader",
        "LanguageInfo",
        "OriginalText",
        "Pronunciation",
        "RootMeanings",
        "ContextualMeaning",
        "OtherUses",
        "CulturalSignificance",
    ];
}

/// One titled paragraph of a chapter introduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroPara {
    pub title: String,
    pub content: String,
}

/// Historical/cultural introduction to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChapterIntro {
    pub main_heading: String,
    pub timeline_info: String,
    pub paras: Vec<IntroPara>,
}

/// Profile for chapter context, keyed by book/chapter.
pub struct ChapterContext;

impl DocumentProfile for ChapterContext {
    type Document = ChapterIntro;

    const CLASS: &'static str = "chapter-context";

    const SECTIONS: &'static [&'static str] = &[
        "CulturalContext",
        "WhatMightSeemStrange",
        "KeyInsights",
        "WhyThisMattersToday",
    ];
}
