use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Contact, Hero, ItemId, PortfolioDocument};
use crate::validation::{validate_email, validate_phone, validate_required, validate_url, FieldValidation};

/// Per-form result: field name → error message for every failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormValidation {
    pub valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl FormValidation {
    fn collect<'a>(checks: impl IntoIterator<Item = (&'a str, FieldValidation)>) -> Self {
        let errors: BTreeMap<String, String> = checks
            .into_iter()
            .filter(|(_, check)| !check.valid)
            .map(|(field, check)| (field.to_string(), check.error))
            .collect();
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// The full name is the only required field of the whole portfolio.
pub fn validate_hero(hero: &Hero) -> FormValidation {
    FormValidation::collect([("fullName", validate_required(&hero.full_name, "Full name"))])
}

pub fn validate_contact(contact: &Contact) -> FormValidation {
    let mut checks = vec![
        ("email", validate_email(&contact.email)),
        ("phone", validate_phone(&contact.phone)),
    ];
    checks.extend(
        contact
            .social_links()
            .into_iter()
            .map(|(field, url)| (field, validate_url(url))),
    );
    FormValidation::collect(checks)
}

pub fn validate_project_links(github_link: &str, live_link: &str) -> FormValidation {
    FormValidation::collect([
        ("githubLink", validate_url(github_link)),
        ("liveLink", validate_url(live_link)),
    ])
}

/// Advisory report over every validated form in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub valid: bool,
    pub hero: FormValidation,
    pub contact: FormValidation,
    /// Only projects with at least one failing link appear here.
    pub projects: BTreeMap<ItemId, FormValidation>,
}

pub fn validate_document(document: &PortfolioDocument) -> DocumentReport {
    let hero = validate_hero(&document.hero);
    let contact = validate_contact(&document.contact);
    let projects: BTreeMap<ItemId, FormValidation> = document
        .projects
        .iter()
        .map(|p| (p.id.clone(), validate_project_links(&p.github_link, &p.live_link)))
        .filter(|(_, result)| !result.valid)
        .collect();

    DocumentReport {
        valid: hero.valid && contact.valid && projects.is_empty(),
        hero,
        contact,
        projects,
    }
}
