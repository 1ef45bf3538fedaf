use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ranked pick from the "support expectations" question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SupportExpectation {
    pub label: String,
    pub priority: i32,
}

/// A completed questionnaire submission, flattened. No foreign keys;
/// rows are immutable once created.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub id: i64,

    // Respondent identity
    pub respondent_first_name: String,
    pub respondent_last_name: String,
    pub respondent_email: String,
    pub respondent_phone: Option<String>,

    // Section I: club information
    pub club_name: String,
    pub respondent_role: String,
    pub other_role: Option<String>,
    pub has_label: String,
    pub wants_label_support: Option<String>,

    // Section II: welcoming experience
    pub has_welcomed_disabled: String,
    pub handicap_types: Vec<String>,
    pub other_handicap_type: Option<String>,
    pub public_types: Vec<String>,
    pub adaptation_story: Option<String>,

    // Section III: needs and expectations
    pub support_expectations: Vec<SupportExpectation>,
    pub other_expectation: Option<String>,
    pub adapted_material: Vec<String>,
    pub other_material: Option<String>,
    pub desired_access: Vec<String>,
    pub additional_comments: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Boundary payload for POST /api/responses. Optional scalars default to
/// null and list fields to empty when absent from the body; required
/// fields are enforced by deserialization (the public form validates
/// formats client-side).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSurveyResponse {
    pub respondent_first_name: String,
    pub respondent_last_name: String,
    pub respondent_email: String,
    #[serde(default)]
    pub respondent_phone: Option<String>,

    pub club_name: String,
    pub respondent_role: String,
    #[serde(default)]
    pub other_role: Option<String>,
    pub has_label: String,
    #[serde(default)]
    pub wants_label_support: Option<String>,

    pub has_welcomed_disabled: String,
    #[serde(default)]
    pub handicap_types: Vec<String>,
    #[serde(default)]
    pub other_handicap_type: Option<String>,
    #[serde(default)]
    pub public_types: Vec<String>,
    #[serde(default)]
    pub adaptation_story: Option<String>,

    #[serde(default)]
    pub support_expectations: Vec<SupportExpectation>,
    #[serde(default)]
    pub other_expectation: Option<String>,
    #[serde(default)]
    pub adapted_material: Vec<String>,
    #[serde(default)]
    pub other_material: Option<String>,
    #[serde(default)]
    pub desired_access: Vec<String>,
    #[serde(default)]
    pub additional_comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_when_absent() {
        let payload: NewSurveyResponse = serde_json::from_str(
            r#"{
                "respondentFirstName": "Marie",
                "respondentLastName": "Dubois",
                "respondentEmail": "marie@club.fr",
                "clubName": "Club de Bordeaux",
                "respondentRole": "Président",
                "hasLabel": "Non",
                "hasWelcomedDisabled": "Non"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.respondent_phone, None);
        assert_eq!(payload.other_role, None);
        assert_eq!(payload.adaptation_story, None);
        assert!(payload.handicap_types.is_empty());
        assert!(payload.public_types.is_empty());
        assert!(payload.support_expectations.is_empty());
        assert!(payload.adapted_material.is_empty());
        assert!(payload.desired_access.is_empty());
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result: Result<NewSurveyResponse, _> = serde_json::from_str(
            r#"{ "respondentFirstName": "Marie" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn prioritized_expectations_deserialize() {
        let payload: NewSurveyResponse = serde_json::from_str(
            r#"{
                "respondentFirstName": "Jean",
                "respondentLastName": "Martin",
                "respondentEmail": "jean@club.fr",
                "clubName": "Échiquier Palois",
                "respondentRole": "Animateur",
                "hasLabel": "Oui",
                "hasWelcomedDisabled": "Oui",
                "supportExpectations": [
                    { "label": "Formations", "priority": 1 },
                    { "label": "Matériel adapté", "priority": 2 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(payload.support_expectations.len(), 2);
        assert_eq!(payload.support_expectations[0].label, "Formations");
        assert_eq!(payload.support_expectations[1].priority, 2);
    }
}
