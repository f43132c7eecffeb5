//! Static catalog of selectable skillsets.

use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SkillCategory {
    #[strum(to_string = "Fundamental")]
    Fundamental,
    #[strum(to_string = "UI")]
    Ui,
    #[strum(to_string = "UX")]
    Ux,
}

const FUNDAMENTAL_SKILLSETS: &[&str] = &[
    "Information Architecture and User Flows",
    "Interaction Design",
    "Wireframing and Prototyping",
];

const UI_SKILLSETS: &[&str] = &[
    "Design Principles",
    "Typography",
    "Visual Communication",
];

const UX_SKILLSETS: &[&str] = &[
    "Empathy Mapping",
    "Feedback Methodology and Incorporation",
    "Heuristic Evaluation",
    "Usability Testing & Feedback",
    "User Personas",
    "User Research and Survey Design",
];

impl SkillCategory {
    /// Group heading shown above the category's skills.
    pub fn heading(self) -> String {
        format!("{self} Skillsets")
    }

    pub fn skills(self) -> &'static [&'static str] {
        match self {
            Self::Fundamental => FUNDAMENTAL_SKILLSETS,
            Self::Ui => UI_SKILLSETS,
            Self::Ux => UX_SKILLSETS,
        }
    }
}

pub fn category_of(skill: &str) -> Option<SkillCategory> {
    SkillCategory::iter().find(|category| category.skills().contains(&skill))
}

pub fn is_known(skill: &str) -> bool {
    category_of(skill).is_some()
}

/// Every skill in display order: Fundamental, then UI, then UX.
pub fn all_skills() -> impl Iterator<Item = (SkillCategory, &'static str)> {
    SkillCategory::iter().flat_map(|category| {
        category
            .skills()
            .iter()
            .map(move |skill| (category, *skill))
    })
}
