//! Primitives shared by many expression kinds, plus API metadata.

use blueprint_expr::{ContactExpr, DocsExpr, Expression, LicenseExpr};
use blueprint_foundation::Reporter;

use crate::opt::{Opt, apply_within, first_invalid, incompatible, misplaced};

/// Sets the description of the enclosing expression.
pub fn description(text: impl Into<String>) -> Opt {
    let text = text.into();
    Opt::new("description", move |target, reporter| {
        set_text(target, reporter, "description", |t| t.description_mut(), text);
        Ok(())
    })
}

/// Sets the URL of a docs, contact or license expression.
pub fn url(url: impl Into<String>) -> Opt {
    let url = url.into();
    Opt::new("url", move |target, reporter| {
        set_text(target, reporter, "url", |t| t.url_mut(), url);
        Ok(())
    })
}

/// Sets the name of a contact or license expression.
pub fn name(name: impl Into<String>) -> Opt {
    let name = name.into();
    Opt::new("name", move |target, reporter| {
        set_text(target, reporter, "name", |t| t.name_mut(), name);
        Ok(())
    })
}

/// Sets the email of a contact expression.
pub fn email(email: impl Into<String>) -> Opt {
    let email = email.into();
    Opt::new("email", move |target, reporter| {
        set_text(target, reporter, "email", |t| t.email_mut(), email);
        Ok(())
    })
}

fn set_text(
    target: &mut dyn Expression,
    reporter: &mut Reporter,
    call: &str,
    field: fn(&mut dyn Expression) -> Option<&mut Option<String>>,
    text: String,
) {
    match field(target) {
        Some(slot) => *slot = Some(text),
        None => incompatible(call, target, reporter),
    }
}

/// Adds a generator hint to the enclosing expression.
///
/// ```ignore
/// field(1, "id", (STRING, vec![meta("struct:tag:json", "id")]))
/// ```
pub fn meta(key: impl Into<String>, value: impl Into<String>) -> Opt {
    let key = key.into();
    let value = value.into();
    Opt::new("meta", move |target, reporter| {
        match target.meta_mut() {
            Some(meta) => {
                meta.insert(key, value);
            }
            None => incompatible("meta", target, reporter),
        }
        Ok(())
    })
}

/// Attaches external documentation.
pub fn docs(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("docs", move |target, reporter| {
        if target.docs_mut().is_none() {
            return misplaced("docs", &opts, target, reporter);
        }
        let mut docs = DocsExpr::default();
        apply_within("docs".into(), opts, &mut docs, reporter)?;
        if let Some(slot) = target.docs_mut() {
            *slot = Some(docs);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

// =============================================================================
// API metadata
// =============================================================================

/// Sets the API title.
pub fn title(title: impl Into<String>) -> Opt {
    let title = title.into();
    Opt::new("title", move |target, reporter| {
        match target.api_mut() {
            Some(api) => api.title = Some(title),
            None => incompatible("title", target, reporter),
        }
        Ok(())
    })
}

/// Sets the API version.
pub fn version(version: impl Into<String>) -> Opt {
    let version = version.into();
    Opt::new("version", move |target, reporter| {
        match target.api_mut() {
            Some(api) => api.version = Some(version),
            None => incompatible("version", target, reporter),
        }
        Ok(())
    })
}

/// Sets the API terms of service.
pub fn terms_of_service(terms: impl Into<String>) -> Opt {
    let terms = terms.into();
    Opt::new("terms_of_service", move |target, reporter| {
        match target.api_mut() {
            Some(api) => api.terms_of_service = Some(terms),
            None => incompatible("terms_of_service", target, reporter),
        }
        Ok(())
    })
}

/// Sets the API contact from `name`, `email` and `url` options.
pub fn contact(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("contact", move |target, reporter| {
        if target.api_mut().is_none() {
            return misplaced("contact", &opts, target, reporter);
        }
        let mut contact = ContactExpr::default();
        apply_within("contact".into(), opts, &mut contact, reporter)?;
        if let Some(api) = target.api_mut() {
            api.contact = Some(contact);
        }
        Ok(())
    })
    .guarded_by(invalid)
}

/// Sets the API license from `name` and `url` options.
pub fn license(opts: Vec<Opt>) -> Opt {
    let invalid = first_invalid(&opts);
    Opt::new("license", move |target, reporter| {
        if target.api_mut().is_none() {
            return misplaced("license", &opts, target, reporter);
        }
        let mut license = LicenseExpr::default();
        apply_within("license".into(), opts, &mut license, reporter)?;
        if let Some(api) = target.api_mut() {
            api.license = Some(license);
        }
        Ok(())
    })
    .guarded_by(invalid)
}
