// src/triage/extract.rs
//! DOM field extraction for hh.ru pages. Pure functions of the fetched
//! document; the selectors mirror the site's `data-qa` markup and will
//! need updating whenever the site changes.

use super::page::PageError;
use super::Resume;
use scraper::{Html, Selector};
use url::Url;

const RESUME_SECTIONS: &[(&str, &str)] = &[
    ("[data-qa=\"resume-block-title-position\"]", "Должность"),
    ("[data-qa=\"title-description\"]", "Зарплата"),
    ("[data-qa=\"resume-contacts-phone\"]", "Контакты"),
    ("[data-qa=\"resume-contact-email\"]", "Почта"),
    ("[data-qa=\"resume-list-card-experience\"]", "Опыт работы"),
    ("[data-qa=\"skills-card\"]", "Навыки"),
    ("[data-qa=\"resume-list-card-education\"]", "Образование"),
    ("[data-qa=\"resume-about-card\"]", "Обо мне"),
    ("[data-qa=\"resume-list-card-recommendation\"]", "Рекомендации"),
];

const RESUME_TITLE_SELECTOR: &str = "[data-qa=\"resume-title\"]";
const VACANCY_LINK_SELECTOR: &str = "a.serp-item__title";
const VACANCY_DESCRIPTION_SELECTOR: &str = ".vacancy-description";
const VACANCY_URL_MARKER: &str = "hh.ru/vacancy";

/// Extract the resume field bundle from a resume detail page.
pub fn resume_details(html: &str, page_url: &str) -> Result<Resume, PageError> {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for (selector, heading) in RESUME_SECTIONS {
        if let Some(section) = select_text(&document, selector) {
            text.push_str(&format!("### {heading}\n{section}\n\n"));
        }
    }

    if text.trim().is_empty() {
        return Err(PageError::Extraction(
            "Could not find resume text on the page.".to_string(),
        ));
    }

    let id = resume_id_from_url(page_url).ok_or_else(|| {
        PageError::Extraction("Could not parse resume ID from URL.".to_string())
    })?;

    let title = select_text(&document, RESUME_TITLE_SELECTOR)
        .unwrap_or_else(|| "Untitled Resume".to_string());

    Ok(Resume { id, title, text })
}

/// Collect vacancy links from a search results page.
pub fn vacancy_links(html: &str) -> Result<Vec<String>, PageError> {
    let document = Html::parse_document(html);

    let Ok(selector) = Selector::parse(VACANCY_LINK_SELECTOR) else {
        return Ok(Vec::new());
    };

    Ok(document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(VACANCY_URL_MARKER))
        .map(str::to_string)
        .collect())
}

/// Extract the description text from a vacancy page.
pub fn vacancy_description(html: &str) -> Result<String, PageError> {
    let document = Html::parse_document(html);

    select_text(&document, VACANCY_DESCRIPTION_SELECTOR).ok_or_else(|| {
        PageError::Extraction("Could not find vacancy description on the page.".to_string())
    })
}

/// The vacancy's site identifier: the last path segment of its URL.
pub fn vacancy_id(vacancy_url: &str) -> Option<String> {
    let url = Url::parse(vacancy_url).ok()?;
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

fn resume_id_from_url(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    url.path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .map(str::to_string)
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = document.select(&selector).next()?;
    let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
    (!text.is_empty()).then_some(text)
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
