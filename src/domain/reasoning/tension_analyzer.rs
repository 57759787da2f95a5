//! TensionAnalyzer (C1): rule-based classification and assessment of a
//! raw tension's free text.
//!
//! Grounded on `original_source/trm_api/reasoning/tension_analyzer.py`.
//! The Vietnamese keyword halves of the original's bilingual pattern
//! sets are dropped per SPEC_FULL §4.1 (English-only scope); the English
//! patterns, keyword lists and scoring formulas are carried verbatim.

use std::collections::HashMap;

use regex::Regex;

use crate::domain::models::tension::TensionType;
use crate::domain::models::tension_analysis::{ImpactLevel, TensionAnalysis, UrgencyLevel};

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "customer", "revenue", "system", "security", "data", "product", "strategy", "financial",
];

const HIGH_URGENCY_KEYWORDS: &[&str] = &[
    "immediately", "urgent", "asap", "deadline", "critical", "production", "live",
];

const CRITICAL_KEYWORDS: &[&str] = &[
    "crash", "down", "data loss", "hack", "attack", "leak", "breach", "legal",
];

/// Classifies and assesses a tension's text using fixed pattern and
/// keyword tables (§4.1). Stateless beyond its compiled regex patterns,
/// so a single instance can be shared across concurrent analyses.
pub struct TensionAnalyzer {
    problem_patterns: Vec<Regex>,
    opportunity_patterns: Vec<Regex>,
    risk_patterns: Vec<Regex>,
    conflict_patterns: Vec<Regex>,
    idea_patterns: Vec<Regex>,
    theme_patterns: Vec<(&'static str, Regex)>,
}

impl Default for TensionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TensionAnalyzer {
    pub fn new() -> Self {
        Self {
            problem_patterns: compile(&[
                r"\b(error|failure|issue|problem|broken|not working)\b",
                r"\b(missing|lack|insufficient|absent)\b",
            ]),
            opportunity_patterns: compile(&[
                r"\b(opportunity|potential|could|should|possibility)\b",
                r"\b(improve|optimize|enhance|develop|growth)\b",
            ]),
            risk_patterns: compile(&[
                r"\b(risk|danger|threat|concern|vulnerability)\b",
                r"\b(if not|might lead to|could cause)\b",
            ]),
            conflict_patterns: compile(&[
                r"\b(conflict|disagreement|dispute|tension|clash)\b",
                r"\b(disagree|oppose|different|contradiction)\b",
            ]),
            idea_patterns: compile(&[
                r"\b(idea|suggestion|proposal|initiative)\b",
                r"\b(could try|should do|propose|recommend)\b",
            ]),
            theme_patterns: vec![
                ("Technology", one(r"\b(api|database|server|code|bug|system)\b")),
                ("Business", one(r"\b(customer|revenue|business|market|strategy)\b")),
                ("Process", one(r"\b(process|workflow|procedure|method)\b")),
                ("People", one(r"\b(team|user|staff|people|human)\b")),
                ("Security", one(r"\b(security|breach|hack|vulnerability|attack)\b")),
            ],
        }
    }

    pub fn analyze(&self, title: &str, description: &str) -> TensionAnalysis {
        let combined = format!("{title} {description}");
        let lower = combined.to_lowercase();

        let (tension_type, confidence) = self.classify_type(&lower);
        let impact_level = self.assess_impact(&lower);
        let urgency_level = self.assess_urgency(&lower);
        let key_themes = self.extract_themes(&lower);
        let extracted_entities = extract_entities(&combined);
        let suggested_priority = calculate_priority(impact_level, urgency_level);
        let reasoning = generate_reasoning(
            tension_type,
            impact_level,
            urgency_level,
            &key_themes,
            confidence,
            suggested_priority,
        );

        TensionAnalysis {
            tension_type,
            impact_level,
            urgency_level,
            confidence_score: confidence,
            key_themes,
            extracted_entities,
            suggested_priority,
            reasoning,
        }
    }

    fn classify_type(&self, text: &str) -> (TensionType, f64) {
        let mut scores: HashMap<TensionType, u32> = HashMap::new();
        scores.insert(TensionType::Problem, count_matches(text, &self.problem_patterns));
        scores.insert(
            TensionType::Opportunity,
            count_matches(text, &self.opportunity_patterns),
        );
        scores.insert(TensionType::Risk, count_matches(text, &self.risk_patterns));
        scores.insert(
            TensionType::Conflict,
            count_matches(text, &self.conflict_patterns),
        );
        scores.insert(TensionType::Idea, count_matches(text, &self.idea_patterns));

        let total: u32 = scores.values().sum();
        if total == 0 {
            return (TensionType::Unknown, 0.5);
        }

        let (best_type, max_score) = scores
            .iter()
            .max_by_key(|(_, score)| **score)
            .map(|(t, s)| (*t, *s))
            .unwrap_or((TensionType::Unknown, 0));

        let confidence = max_score as f64 / total as f64;
        (best_type, confidence.min(0.95))
    }

    fn assess_impact(&self, text: &str) -> ImpactLevel {
        let critical_count = CRITICAL_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        let high_count = HIGH_IMPACT_KEYWORDS.iter().filter(|k| text.contains(*k)).count();

        if critical_count > 0 {
            ImpactLevel::Critical
        } else if high_count >= 2 {
            ImpactLevel::High
        } else if high_count == 1 {
            ImpactLevel::Medium
        } else {
            ImpactLevel::Low
        }
    }

    fn assess_urgency(&self, text: &str) -> UrgencyLevel {
        let critical_count = CRITICAL_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        let urgent_count = HIGH_URGENCY_KEYWORDS.iter().filter(|k| text.contains(*k)).count();

        if critical_count > 0 {
            UrgencyLevel::Critical
        } else if urgent_count >= 2 {
            UrgencyLevel::High
        } else if urgent_count == 1 {
            UrgencyLevel::Medium
        } else {
            UrgencyLevel::Low
        }
    }

    fn extract_themes(&self, text: &str) -> Vec<String> {
        let themes: Vec<String> = self
            .theme_patterns
            .iter()
            .filter(|(_, re)| re.is_match(text))
            .map(|(name, _)| (*name).to_string())
            .collect();

        if themes.is_empty() {
            vec!["General".to_string()]
        } else {
            themes
        }
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("static pattern is valid regex"))
        .collect()
}

fn one(pattern: &str) -> Regex {
    Regex::new(&format!("(?i){pattern}")).expect("static pattern is valid regex")
}

fn count_matches(text: &str, patterns: &[Regex]) -> u32 {
    patterns
        .iter()
        .map(|re| re.find_iter(text).count() as u32)
        .sum()
}

/// Capitalized-word-sequence entity extraction, scanning the
/// original-case combined text rather than the lowercased text the
/// original Python analyzer ran this regex against (a latent bug there,
/// since `\b[A-Z]...` can never match lowercase input — fixed here so
/// entity extraction actually extracts something).
fn extract_entities(original_case_text: &str) -> Vec<String> {
    let re = Regex::new(r"\b[A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*\b")
        .expect("static pattern is valid regex");
    re.find_iter(original_case_text)
        .take(5)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Priority matrix (§4.1 step 6): derives the 0-2 suggested priority
/// ordinal from impact and urgency. Monotone in both arguments
/// (testable property 2).
pub fn calculate_priority(impact: ImpactLevel, urgency: UrgencyLevel) -> u8 {
    if impact == ImpactLevel::Critical || urgency == UrgencyLevel::Critical {
        2
    } else if impact == ImpactLevel::High && urgency == UrgencyLevel::High {
        2
    } else if impact == ImpactLevel::High || urgency == UrgencyLevel::High {
        1
    } else if impact == ImpactLevel::Medium && urgency == UrgencyLevel::Medium {
        1
    } else {
        0
    }
}

fn generate_reasoning(
    tension_type: TensionType,
    impact: ImpactLevel,
    urgency: UrgencyLevel,
    themes: &[String],
    confidence: f64,
    priority: u8,
) -> String {
    let priority_name = match priority {
        2 => "Critical",
        1 => "High",
        _ => "Normal",
    };
    let mut parts = vec![
        format!(
            "Classified as {} with {:.1}% confidence",
            tension_type.label(),
            confidence * 100.0
        ),
        format!("Impact: {}, Urgency: {}", impact.name(), urgency.name()),
    ];
    if !themes.is_empty() {
        parts.push(format!("Key themes: {}", themes.join(", ")));
    }
    parts.push(format!(
        "Suggested priority: {priority_name} based on impact/urgency matrix"
    ));
    format!("{}.", parts.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crash_in_production_is_critical() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "Production API is down",
            "The payment system crashed immediately after the deploy, customers cannot check out.",
        );
        assert_eq!(analysis.impact_level, ImpactLevel::Critical);
        assert_eq!(analysis.urgency_level, UrgencyLevel::Critical);
        assert_eq!(analysis.suggested_priority, 2);
    }

    #[test]
    fn low_stakes_suggestion_is_an_idea() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "Suggestion for the onboarding flow",
            "I propose we could try a short tooltip to improve the first-run experience.",
        );
        assert_eq!(analysis.tension_type, TensionType::Idea);
        assert_eq!(analysis.suggested_priority, 0);
    }

    #[test]
    fn no_matching_keywords_is_unknown_with_half_confidence() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze("Lunch order", "Please order sandwiches for Friday.");
        assert_eq!(analysis.tension_type, TensionType::Unknown);
        assert_eq!(analysis.confidence_score, 0.5);
    }

    #[test]
    fn entities_are_extracted_in_original_case() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "Billing Service outage",
            "The Billing Service and Payment Gateway are both affected.",
        );
        assert!(analysis.extracted_entities.contains(&"Billing Service".to_string()));
    }

    #[test]
    fn confidence_never_exceeds_cap() {
        let analyzer = TensionAnalyzer::new();
        let analysis = analyzer.analyze(
            "error error error broken",
            "issue problem not working missing lack insufficient absent",
        );
        assert!(analysis.confidence_score <= 0.95);
    }
}
