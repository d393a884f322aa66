//! Prompt text for the commentary model

use crate::filter::{FilterState, RangeSel};
use crate::geo::find_curated_metro;

/// Location as the user would name it
pub fn location(filters: &FilterState) -> String {
    if let Some(cbsa) = filters.selected_cbsa {
        return match find_curated_metro(cbsa.0) {
            Some(metro) => metro.name.to_string(),
            None => format!("Metro Area {}", cbsa),
        };
    }
    if filters.selected_state.is_national() {
        "USA".to_string()
    } else {
        filters.selected_state.abbr().to_string()
    }
}

fn feet_inches(inches: i64) -> String {
    format!("{}'{}\"", inches / 12, inches % 12)
}

fn height(range: RangeSel) -> String {
    format!("{} - {}", feet_inches(range.low()), feet_inches(range.high()))
}

fn selected(options: &[(bool, &str)]) -> String {
    let names: Vec<&str> = options.iter().filter(|(on, _)| *on).map(|(_, name)| *name).collect();
    names.join(", ")
}

/// Describe the filter and ask for one short, playful sentence about the odds
pub fn build_prompt(filters: &FilterState) -> String {
    let politics = &filters.politics;
    let religion = &filters.religion;
    let body_types: Vec<String> = filters.body_types.iter().map(|b| b.to_string()).collect();

    let lines = [
        "Act as a witty, data-savvy dating coach.".to_string(),
        "The user is looking for a partner with these stats in the US:".to_string(),
        format!("- Gender: {}", filters.gender),
        format!("- Location: {}", location(filters)),
        format!("- Age: {}-{}", filters.age_range.low(), filters.age_range.high()),
        format!("- Income: ${}k - ${}k", filters.income_range.low(), filters.income_range.high()),
        format!("- Height: {}", height(filters.height_range)),
        format!("- Needs Degree: {}", !filters.education.no_degree),
        format!("- Body Type: {}", body_types.join(", ")),
        format!("- No Kids: {}", filters.exclude_people_with_kids),
        format!(
            "- Politics: {}",
            selected(&[
                (politics.conservative, "conservative"),
                (politics.moderate, "moderate"),
                (politics.liberal, "liberal"),
                (politics.apolitical, "apolitical"),
            ])
        ),
        format!(
            "- Religion: {}",
            selected(&[
                (religion.christian, "christian"),
                (religion.agnostic_atheist, "agnostic/atheist"),
                (religion.spiritual, "spiritual"),
                (religion.other, "other"),
            ])
        ),
        String::new(),
        "Give me a ONE sentence fun, slightly roast-y, but encouraging comment about the statistical probability of finding this person.".to_string(),
        "Keep it under 30 words.".to_string(),
    ];
    lines.join("\n")
}
