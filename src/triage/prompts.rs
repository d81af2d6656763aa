// src/triage/prompts.rs
//! Prompt construction and reply interpretation for the scoring pipeline.

use anyhow::{bail, Result};
use std::borrow::Cow;

/// Ask for a single 1-5 digit rating the resume against the vacancy.
pub fn score_prompt(resume_text: &str, vacancy_text: &str) -> String {
    format!(
        "Системная инструкция: Ты — HR-ассистент. Оцени соответствие резюме вакансии \
         по шкале от 1 до 5. В ответе укажи только одну цифру без пояснений. \
         \n\n### Резюме:\n{resume_text}\n\n### Вакансия:\n{vacancy_text}\n\n### Оценка:"
    )
}

pub fn cover_letter_prompt(resume_text: &str, vacancy_text: &str) -> String {
    format!(
        "Системная инструкция: Ты — HR-ассистент. Напиши профессиональное и вежливое \
         сопроводительное письмо на основе резюме для указанной вакансии. \
         \n\n### Резюме:\n{resume_text}\n\n### Вакансия:\n{vacancy_text}\n\n### Сопроводительное письмо:"
    )
}

/// Interpret a model reply as a 1-5 score.
///
/// Reasoning models prepend a `<think>...</think>` block; the first such
/// block is stripped before the leading digits are read. Scores outside
/// 1-5 are treated as malformed replies.
pub fn parse_score(reply: &str) -> Result<i64> {
    let cleaned = strip_reasoning(reply);
    let cleaned = cleaned.trim();

    let digits: String = cleaned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        bail!("Model reply did not contain a score: {:?}", truncate(cleaned, 80));
    }

    let score: i64 = digits.parse()?;
    if !(1..=5).contains(&score) {
        bail!("Score {score} is outside the 1-5 range");
    }
    Ok(score)
}

fn strip_reasoning(reply: &str) -> Cow<'_, str> {
    let Some(start) = reply.find("<think>") else {
        return Cow::Borrowed(reply);
    };
    let Some(end) = reply[start..].find("</think>") else {
        return Cow::Borrowed(reply);
    };
    let after = start + end + "</think>".len();
    Cow::Owned(format!("{}{}", &reply[..start], &reply[after..]))
}

fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
