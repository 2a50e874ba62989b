//! Expert review request: a prefilled mail carrying the intake and the
//! grouped recommendations.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;

use metlab_core::config::ExportConfig;
use metlab_core::errors::ExportError;
use metlab_core::models::{IntakeAttributes, Recommendation};

use crate::formats::text::write_group;
use crate::grouping::group_by_stage;

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const NOT_SPECIFIED: &str = "Not specified";

/// Contact details entered in the review form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: Option<String>,
}

impl ReviewRequest {
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.name.trim().is_empty() {
            return Err(ExportError::MissingContact { field: "name" });
        }
        if self.email.trim().is_empty() {
            return Err(ExportError::MissingContact { field: "email" });
        }
        Ok(())
    }

    fn company(&self) -> Option<&str> {
        non_blank(self.company.as_deref())
    }
}

/// A composed review mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMail {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ReviewMail {
    /// `mailto:` URL with subject and body percent-encoded.
    pub fn mailto_url(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            utf8_percent_encode(&self.subject, URI_COMPONENT),
            utf8_percent_encode(&self.body, URI_COMPONENT),
        )
    }
}

/// Builds the review mail. Name and email are required.
pub fn compose_review(
    request: &ReviewRequest,
    intake: &IntakeAttributes,
    recommendations: &[Recommendation],
    config: &ExportConfig,
) -> Result<ReviewMail, ExportError> {
    request.validate()?;

    let mut body = String::from("LAB BUILDER REVIEW REQUEST\n==========================\n\n");
    write_contact(&mut body, request);
    write_requirements(&mut body, intake);

    let groups = group_by_stage(recommendations);
    if !groups.is_empty() {
        body.push_str("RECOMMENDED EQUIPMENT & CONSUMABLES\n");
        body.push_str("===================================\n\n");
        for group in &groups {
            write_group(&mut body, group);
            body.push('\n');
        }
    }

    if let Some(message) = non_blank(request.message.as_deref()) {
        body.push_str("ADDITIONAL MESSAGE\n------------------\n");
        body.push_str(message);
        body.push('\n');
    }

    body.push_str("\n---\n");
    body.push_str(&format!(
        "This request was generated from the Lab Builder tool on {}",
        config.effective_site_label()
    ));

    let subject = match request.company() {
        Some(company) => format!("Lab Builder Review Request - {company}"),
        None => "Lab Builder Review Request".to_string(),
    };

    debug!(
        recipient = config.effective_review_recipient(),
        stages = groups.len(),
        "review mail composed"
    );

    Ok(ReviewMail {
        recipient: config.effective_review_recipient().to_string(),
        subject,
        body,
    })
}

fn write_contact(body: &mut String, request: &ReviewRequest) {
    body.push_str("CONTACT INFORMATION\n-------------------\n");
    body.push_str(&format!("Name: {}\n", request.name.trim()));
    body.push_str(&format!("Email: {}\n", request.email.trim()));
    if let Some(phone) = non_blank(request.phone.as_deref()) {
        body.push_str(&format!("Phone: {phone}\n"));
    }
    if let Some(company) = request.company() {
        body.push_str(&format!("Company: {company}\n"));
    }
    body.push('\n');
}

fn write_requirements(body: &mut String, intake: &IntakeAttributes) {
    body.push_str("LAB REQUIREMENTS\n----------------\n");
    line(body, "Material Type", non_blank(Some(&intake.material_type)).unwrap_or(NOT_SPECIFIED));
    if let Some(material) = &intake.selected_material {
        line(body, "Specific Material", &material.name);
        if let Some(hrc) = material.hardness_hrc.filter(|h| *h != 0.0) {
            line(body, "Material Hardness (HRC)", &hrc.to_string());
        }
    }
    line(body, "Material Hardness", label_or(intake.material_hardness.map(|v| v.label())));
    line(body, "Sample Size", label_or(intake.sample_size.map(|v| v.label())));
    line(body, "Sample Shape", label_or(intake.sample_shape.map(|v| v.label())));
    line(body, "Daily Throughput", label_or(intake.throughput.map(|v| v.label())));
    line(body, "Automation Level", label_or(intake.automation.map(|v| v.label())));
    line(body, "Equipment Tier", label_or(intake.budget.map(|v| v.label())));
    line(body, "Surface Finish", intake.effective_surface_finish().label());
    line(body, "Applications", &join_or(intake.applications.iter().map(|a| a.label())));
    line(body, "Process Stages", &join_or(intake.process_stages.iter().map(|s| s.as_str())));

    let r = &intake.refinements;
    let optional = [
        ("Section Type", r.section_type.map(|v| v.label())),
        ("Damage Criticality", r.damage_criticality.map(|v| v.label())),
        ("Mounting Type Preference", r.mounting_type_preference.map(|v| v.label())),
        ("Mount Size Requirements", r.mount_size_requirements.map(|v| v.label())),
        ("Grinding Method Preference", r.grinding_method_preference.map(|v| v.label())),
        ("Grinding Surface Requirements", r.grinding_surface_requirements.map(|v| v.label())),
        ("Polishing Method Preference", r.polishing_method_preference.map(|v| v.label())),
        ("Final Surface Quality", r.final_surface_quality.map(|v| v.label())),
        ("Etching Frequency", r.etching_frequency.map(|v| v.label())),
    ];
    for (name, value) in optional {
        if let Some(value) = value {
            line(body, name, value);
        }
    }
    let etchants: Vec<&str> = r.etchant_types.iter().map(|e| e.trim()).filter(|e| !e.is_empty()).collect();
    if !etchants.is_empty() {
        line(body, "Etchant Types", &etchants.join(", "));
    }
    if !r.microscopy_types.is_empty() {
        line(body, "Microscopy Types", &join_or(r.microscopy_types.iter().map(|m| m.label())));
    }
    if let Some(docs) = r.documentation_requirements {
        line(body, "Documentation Requirements", docs.label());
    }
    if let Some(freq) = r.cleaning_frequency {
        line(body, "Cleaning Frequency", freq.label());
    }
    if let Some(method) = r.cleaning_method_preference {
        line(body, "Cleaning Method Preference", method.label());
    }
    if !r.hardness_test_types.is_empty() {
        line(body, "Hardness Test Types", &join_or(r.hardness_test_types.iter().map(|t| t.label())));
    }
    if let Some(freq) = r.hardness_testing_frequency {
        line(body, "Hardness Testing Frequency", freq.label());
    }
    body.push('\n');
}

fn line(body: &mut String, name: &str, value: &str) {
    body.push_str(name);
    body.push_str(": ");
    body.push_str(value);
    body.push('\n');
}

fn label_or(label: Option<&'static str>) -> &'static str {
    label.unwrap_or(NOT_SPECIFIED)
}

fn join_or<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = values.collect();
    if joined.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        joined.join(", ")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
