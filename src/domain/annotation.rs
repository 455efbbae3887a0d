//! Parser for the packed profile annotation used by older intake forms.
//!
//! The annotation is a single free-text field of `key: value` segments
//! separated by semicolons or newlines, e.g.
//! `"Skills: Bricklaying, Tiling; Location: Rotterdam; Availability: busy"`.
//! Keys are case-insensitive. Unknown segments are ignored.

use super::AvailabilityStatus;

/// Structured view of a packed annotation field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAnnotation {
    pub skills: Vec<String>,
    pub location: Option<String>,
    pub availability: Option<AvailabilityStatus>,
}

pub fn parse(text: &str) -> ParsedAnnotation {
    let mut parsed = ParsedAnnotation::default();

    for segment in text.split(|c| c == ';' || c == '\n') {
        let Some((key, value)) = segment.split_once(':') else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.trim().to_ascii_lowercase().as_str() {
            "skills" | "skill tags" => {
                parsed.skills = value
                    .split(',')
                    .map(|skill| skill.trim().to_string())
                    .filter(|skill| !skill.is_empty())
                    .collect();
            }
            "location" => parsed.location = Some(value.to_string()),
            "availability" => parsed.availability = AvailabilityStatus::parse_label(value),
            _ => {}
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_annotation() {
        let parsed = parse("Skills: Bricklaying, Tiling; Location: Rotterdam; Availability: busy");
        assert_eq!(parsed.skills, vec!["Bricklaying", "Tiling"]);
        assert_eq!(parsed.location.as_deref(), Some("Rotterdam"));
        assert_eq!(parsed.availability, Some(AvailabilityStatus::Busy));
    }

    #[test]
    fn keys_are_case_insensitive_and_newline_separated() {
        let parsed = parse("SKILLS: Welding\nlocation: Utrecht");
        assert_eq!(parsed.skills, vec!["Welding"]);
        assert_eq!(parsed.location.as_deref(), Some("Utrecht"));
        assert_eq!(parsed.availability, None);
    }

    #[test]
    fn ignores_unknown_segments_and_empty_values() {
        let parsed = parse("Hobby: chess; Skills: ; Location: Delft");
        assert!(parsed.skills.is_empty());
        assert_eq!(parsed.location.as_deref(), Some("Delft"));
    }

    #[test]
    fn plain_prose_yields_empty_annotation() {
        assert_eq!(parse("Looking forward to hearing from you"), ParsedAnnotation::default());
    }
}
