use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

/// Shared `?q=` search plus the flash message carried across redirects.
#[derive(Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub flash: Option<String>,
}

#[derive(Deserialize)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub read_time: Option<String>,
    pub hero_image_url: Option<String>,
    pub tags: Option<String>,
}

#[derive(Deserialize)]
pub struct AutosaveForm {
    pub content: String,
}

#[derive(Deserialize)]
pub struct BlogPreviewForm {
    pub content: Option<String>,
    pub category: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct BlogGenerateForm {
    pub topic: String,
    pub category: Option<String>,
    pub product: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ContentImageForm {
    pub url: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub position: String,
}

#[derive(Deserialize)]
pub struct ImageGenerateForm {
    pub prompt: String,
    pub alt_text: Option<String>,
    pub caption: Option<String>,
    pub position: String,
    pub size: Option<String>,
    pub quality: Option<String>,
    pub reference_url: Option<String>,
}

/// The suggestion picker posts the suggested specs back as parallel
/// repeated fields; `picked` holds the indexes whose checkbox was on.
/// Repeated keys are not something `web::Form` deserializes, so the
/// handler feeds the raw key/value pairs through `from_pairs`.
#[derive(Debug, Default)]
pub struct SuggestionPickForm {
    pub picked: Vec<usize>,
    pub prompt: Vec<String>,
    pub alt: Vec<String>,
    pub caption: Vec<String>,
    pub position: Vec<String>,
}

impl SuggestionPickForm {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "picked" => {
                    if let Ok(index) = value.parse() {
                        form.picked.push(index);
                    }
                }
                "prompt" => form.prompt.push(value),
                "alt" => form.alt.push(value),
                "caption" => form.caption.push(value),
                "position" => form.position.push(value),
                _ => {}
            }
        }
        form
    }
}

#[derive(Deserialize)]
pub struct AdForm {
    pub title: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    pub link_url: String,
    pub placement: String,
    pub target_type: String,
    pub target_value: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

#[derive(Deserialize)]
pub struct AdNewQuery {
    pub placement: Option<String>,
    pub flash: Option<String>,
}

#[derive(Deserialize)]
pub struct AdGenerateForm {
    pub placement: String,
    pub product: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct CompanyForm {
    pub name: String,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct PersonForm {
    pub name: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub company_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: Option<String>,
    pub price_label: Option<String>,
    /// One feature per line.
    pub features: Option<String>,
    /// `quote :: author :: company?` per line.
    pub testimonials: Option<String>,
}

#[derive(Deserialize)]
pub struct CampaignForm {
    pub name: String,
    pub channel: Option<String>,
    pub description: Option<String>,
    pub budget_label: Option<String>,
    pub status: Option<String>,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusForm {
    pub status: String,
}

#[derive(Deserialize)]
pub struct BuildEventForm {
    pub title: String,
    pub description: Option<String>,
    pub stream_url: Option<String>,
    pub scheduled_at: String,
    pub duration_minutes: Option<i32>,
}

#[derive(Deserialize)]
pub struct SopForm {
    pub title: String,
    pub category: Option<String>,
    pub summary: Option<String>,
    /// `Title :: detail` per line.
    pub steps: Option<String>,
    pub source_transcript: Option<String>,
}

/// The SOP studio is a stateless round trip: the whole transcript rides in
/// a hidden field, `USER:`/`ASSISTANT:` prefixed lines, one turn per line.
#[derive(Deserialize)]
pub struct SopChatForm {
    pub transcript: Option<String>,
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct PeopleQuery {
    pub q: Option<String>,
    pub company: Option<String>,
    pub flash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::SuggestionPickForm;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn suggestion_pairs_group_into_parallel_fields() {
        let form = SuggestionPickForm::from_pairs([
            pair("picked", "0"),
            pair("picked", "2"),
            pair("prompt", "a"),
            pair("prompt", "b"),
            pair("prompt", "c"),
            pair("position", "after_heading_1"),
            pair("position", "after_heading_2"),
            pair("position", "after_heading_3"),
        ]);

        assert_eq!(form.picked, vec![0, 2]);
        assert_eq!(form.prompt, vec!["a", "b", "c"]);
        assert_eq!(form.position.len(), 3);
    }

    #[test]
    fn unknown_keys_and_bad_indexes_are_skipped() {
        let form = SuggestionPickForm::from_pairs([
            pair("picked", "not-a-number"),
            pair("csrf", "zzz"),
            pair("alt", "chart"),
        ]);

        assert!(form.picked.is_empty());
        assert_eq!(form.alt, vec!["chart"]);
    }
}
