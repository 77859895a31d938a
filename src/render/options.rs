//! Formatting profiles.

use serde::{Deserialize, Serialize};

/// A fixed set of page and typography values used for one render.
///
/// Sizes are in points, lengths in inches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatProfile {
    /// Profile name, used in logs and reports
    pub name: String,

    /// Margin on all four sides
    pub margin: f32,

    /// Body font family
    pub font_family: String,

    /// Body font size
    pub body_pt: f32,

    /// Title (name) font size
    pub name_pt: f32,

    /// Section header font size
    pub section_pt: f32,

    /// Subsection header font size
    pub subsection_pt: f32,

    /// Space after the title line
    pub title_after: f32,

    /// Space before a section header
    pub section_before: f32,

    /// Space after a section header
    pub section_after: f32,

    /// Space before a subsection header
    pub subsection_before: f32,

    /// Space after a subsection header
    pub subsection_after: f32,

    /// Space after a plain paragraph
    pub paragraph_after: f32,

    /// Space after a bullet
    pub bullet_after: f32,

    /// Left indent of bullet text
    pub bullet_indent: f32,

    /// First-line hanging indent of bullets
    pub bullet_hanging: f32,
}

impl FormatProfile {
    /// The roomier preset: half-inch margins, 10pt body.
    pub fn standard() -> Self {
        Self {
            name: "standard".to_string(),
            margin: 0.50,
            font_family: "Calibri".to_string(),
            body_pt: 10.0,
            name_pt: 13.0,
            section_pt: 10.5,
            subsection_pt: 10.0,
            title_after: 2.0,
            section_before: 4.0,
            section_after: 1.0,
            subsection_before: 2.0,
            subsection_after: 0.0,
            paragraph_after: 0.0,
            bullet_after: 0.0,
            bullet_indent: 0.25,
            bullet_hanging: 0.25,
        }
    }

    /// The tighter preset.
    pub fn tight() -> Self {
        Self {
            name: "tight".to_string(),
            margin: 0.45,
            body_pt: 9.8,
            name_pt: 12.5,
            section_pt: 10.2,
            subsection_pt: 9.8,
            section_before: 3.0,
            ..Self::standard()
        }
    }

    /// Set the profile name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the page margin.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the body font size.
    pub fn with_body_size(mut self, pt: f32) -> Self {
        self.body_pt = pt;
        self
    }
}

impl Default for FormatProfile {
    fn default() -> Self {
        Self::standard()
    }
}

/// Built-in profiles, most spacious first.
pub fn default_profiles() -> Vec<FormatProfile> {
    vec![FormatProfile::standard(), FormatProfile::tight()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_tighten() {
        let profiles = default_profiles();
        assert_eq!(profiles.len(), 2);
        let (a, b) = (&profiles[0], &profiles[1]);
        assert!(a.margin > b.margin);
        assert!(a.body_pt > b.body_pt);
        assert!(a.name_pt > b.name_pt);
        assert!(a.section_before > b.section_before);
        assert_eq!(b.font_family, "Calibri");
    }

    #[test]
    fn test_builder() {
        let p = FormatProfile::tight().with_name("tiny").with_margin(0.3).with_body_size(9.0);
        assert_eq!(p.name, "tiny");
        assert_eq!(p.margin, 0.3);
        assert_eq!(p.body_pt, 9.0);
    }

    #[test]
    fn test_partial_profile_from_json() {
        let p: FormatProfile = serde_json::from_str(r#"{"name": "narrow", "margin": 0.4}"#).unwrap();
        assert_eq!(p.name, "narrow");
        assert_eq!(p.margin, 0.4);
        assert_eq!(p.body_pt, 10.0);
    }
}
