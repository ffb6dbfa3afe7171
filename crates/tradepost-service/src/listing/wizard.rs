//! The five-step listing wizard.
//!
//! Steps run in order: Category & Title, Details, Photos, Location,
//! Review & Publish. A step can only be left forward once its required
//! fields are filled in. [`ListingDraft::finalize`] is the publish gate that
//! turns a draft into a validated [`ListingInput`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_core::config::MarketplaceConfig;
use tradepost_core::error::AppError;
use tradepost_core::result::AppResult;

/// A wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    CategoryTitle,
    Details,
    Photos,
    Location,
    Review,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::CategoryTitle;
    pub const LAST: WizardStep = WizardStep::Review;

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Self::CategoryTitle => 1,
            Self::Details => 2,
            Self::Photos => 3,
            Self::Location => 4,
            Self::Review => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::CategoryTitle),
            2 => Some(Self::Details),
            3 => Some(Self::Photos),
            4 => Some(Self::Location),
            5 => Some(Self::Review),
            _ => None,
        }
    }

    /// Heading shown for the step.
    pub fn title(self) -> &'static str {
        match self {
            Self::CategoryTitle => "Category & Title",
            Self::Details => "Details",
            Self::Photos => "Photos",
            Self::Location => "Location",
            Self::Review => "Review & Publish",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }
}

/// Field limits enforced by the wizard.
#[derive(Debug, Clone, Copy)]
pub struct WizardLimits {
    pub max_photos: usize,
    pub title_max_length: usize,
    pub description_max_length: usize,
}

impl From<&MarketplaceConfig> for WizardLimits {
    fn from(config: &MarketplaceConfig) -> Self {
        Self {
            max_photos: config.max_photos,
            title_max_length: config.title_max_length,
            description_max_length: config.description_max_length,
        }
    }
}

impl Default for WizardLimits {
    fn default() -> Self {
        Self::from(&MarketplaceConfig::default())
    }
}

/// Everything the seller has entered so far. Price is kept as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingDraft {
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub condition_id: Option<Uuid>,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub location: String,
    /// Number of photos attached in this session.
    #[serde(default)]
    pub photo_count: usize,
    /// Editing an existing listing; its stored photos satisfy the photo step.
    #[serde(default)]
    pub editing: bool,
}

/// A draft that passed the publish gate.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingInput {
    pub category_id: Uuid,
    pub condition_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

impl ListingDraft {
    /// Names of the required fields of `step` that are still empty.
    pub fn missing_fields(&self, step: WizardStep) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match step {
            WizardStep::CategoryTitle => {
                if self.category_id.is_none() {
                    missing.push("category_id");
                }
                if blank(&self.title) {
                    missing.push("title");
                }
            }
            WizardStep::Details => {
                if blank(&self.description) {
                    missing.push("description");
                }
                if self.condition_id.is_none() {
                    missing.push("condition_id");
                }
                if blank(&self.price) {
                    missing.push("price");
                }
            }
            WizardStep::Photos => {
                if self.photo_count == 0 && !self.editing {
                    missing.push("photos");
                }
            }
            WizardStep::Location => {
                if blank(&self.location) {
                    missing.push("location");
                }
            }
            WizardStep::Review => {}
        }
        missing
    }

    /// Whether the seller may leave `step` forward.
    pub fn can_proceed(&self, step: WizardStep) -> bool {
        self.missing_fields(step).is_empty()
    }

    /// Check steps 1 through 4 in order and report the first incomplete one.
    pub fn check_steps(&self) -> AppResult<()> {
        let mut step = WizardStep::FIRST;
        while step < WizardStep::LAST {
            let missing = self.missing_fields(step);
            if !missing.is_empty() {
                return Err(AppError::validation(format!(
                    "Please complete step {} ({}): missing {}",
                    step.number(),
                    step.title(),
                    missing.join(", ")
                )));
            }
            step = match step.next() {
                Some(next) => next,
                None => break,
            };
        }
        Ok(())
    }

    /// Publish gate: validate the draft and produce the listing input.
    pub fn finalize(&self, limits: &WizardLimits) -> AppResult<ListingInput> {
        if blank(&self.title) || blank(&self.description) || blank(&self.price) {
            return Err(AppError::validation(
                "Please complete all steps before publishing",
            ));
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .ok()
            .filter(|p: &f64| p.is_finite())
            .ok_or_else(|| AppError::validation("Please enter a valid numeric price"))?;
        if price < 0.0 {
            return Err(AppError::validation("Price cannot be negative"));
        }

        let title = self.title.trim();
        if title.chars().count() > limits.title_max_length {
            return Err(AppError::validation(format!(
                "Title must be at most {} characters",
                limits.title_max_length
            )));
        }
        let description = self.description.trim();
        if description.chars().count() > limits.description_max_length {
            return Err(AppError::validation(format!(
                "Description must be at most {} characters",
                limits.description_max_length
            )));
        }

        let (Some(category_id), Some(condition_id)) = (self.category_id, self.condition_id) else {
            return Err(AppError::validation(
                "Please complete all steps before publishing",
            ));
        };

        Ok(ListingInput {
            category_id,
            condition_id,
            title: title.to_string(),
            description: description.to_string(),
            price,
            location: self.location.trim().to_string(),
        })
    }
}

/// Step navigation over a draft.
#[derive(Debug, Clone)]
pub struct ListingWizard {
    step: WizardStep,
    draft: ListingDraft,
    limits: WizardLimits,
}

impl ListingWizard {
    pub fn new(draft: ListingDraft, limits: WizardLimits) -> Self {
        Self {
            step: WizardStep::FIRST,
            draft,
            limits,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ListingDraft {
        &mut self.draft
    }

    pub fn can_proceed(&self) -> bool {
        self.draft.can_proceed(self.step)
    }

    /// Advance when the current step is complete. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        match self.step.next() {
            Some(next) if self.can_proceed() => {
                self.step = next;
                true
            }
            _ => false,
        }
    }

    /// Go back one step. Returns whether it moved.
    pub fn prev(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                true
            }
            None => false,
        }
    }

    /// Attach photos up to the limit; returns how many were accepted.
    pub fn attach_photos(&mut self, count: usize) -> usize {
        let room = self.limits.max_photos.saturating_sub(self.draft.photo_count);
        let accepted = count.min(room);
        self.draft.photo_count += accepted;
        accepted
    }

    /// Run the publish gate on the current draft.
    pub fn finalize(&self) -> AppResult<ListingInput> {
        self.draft.finalize(&self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> ListingDraft {
        ListingDraft {
            category_id: Some(Uuid::new_v4()),
            title: "CNC lathe".to_string(),
            description: "Two-axis lathe, serviced 2023".to_string(),
            condition_id: Some(Uuid::new_v4()),
            price: "12500".to_string(),
            location: "Lyon, France".to_string(),
            photo_count: 2,
            editing: false,
        }
    }

    #[test]
    fn test_next_blocked_until_step_fields_filled() {
        let mut wizard = ListingWizard::new(ListingDraft::default(), WizardLimits::default());
        assert!(!wizard.next());
        assert_eq!(wizard.step(), WizardStep::CategoryTitle);

        wizard.draft_mut().title = "Forklift".to_string();
        assert!(!wizard.next());

        wizard.draft_mut().category_id = Some(Uuid::new_v4());
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.draft_mut().description = "Electric, 2t".to_string();
        wizard.draft_mut().condition_id = Some(Uuid::new_v4());
        assert!(!wizard.next(), "price still empty");
        wizard.draft_mut().price = "8000".to_string();
        assert!(wizard.next());

        assert_eq!(wizard.step(), WizardStep::Photos);
        assert!(!wizard.next());
        assert_eq!(wizard.attach_photos(1), 1);
        assert!(wizard.next());

        assert!(!wizard.next(), "location still empty");
        wizard.draft_mut().location = "Ghent".to_string();
        assert!(wizard.next());
        assert_eq!(wizard.step(), WizardStep::Review);
        assert!(wizard.can_proceed());
        assert!(!wizard.next(), "no step after review");
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let draft = ListingDraft {
            category_id: Some(Uuid::new_v4()),
            title: "   ".to_string(),
            ..ListingDraft::default()
        };
        assert_eq!(draft.missing_fields(WizardStep::CategoryTitle), vec!["title"]);
    }

    #[test]
    fn test_editing_skips_photo_requirement() {
        let draft = ListingDraft {
            editing: true,
            ..ListingDraft::default()
        };
        assert!(draft.can_proceed(WizardStep::Photos));
        assert!(draft.can_proceed(WizardStep::Review));
    }

    #[test]
    fn test_prev_stops_at_first_step() {
        let mut wizard = ListingWizard::new(complete_draft(), WizardLimits::default());
        assert!(!wizard.prev());
        assert!(wizard.next());
        assert!(wizard.prev());
        assert_eq!(wizard.step(), WizardStep::CategoryTitle);
    }

    #[test]
    fn test_photos_beyond_limit_are_dropped() {
        let mut wizard = ListingWizard::new(ListingDraft::default(), WizardLimits::default());
        assert_eq!(wizard.attach_photos(5), 5);
        assert_eq!(wizard.attach_photos(5), 3);
        assert_eq!(wizard.draft().photo_count, 8);
    }

    #[test]
    fn test_finalize_requires_fields() {
        let draft = ListingDraft {
            price: String::new(),
            ..complete_draft()
        };
        let err = draft.finalize(&WizardLimits::default()).unwrap_err();
        assert_eq!(err.message, "Please complete all steps before publishing");
    }

    #[test]
    fn test_finalize_rejects_non_numeric_price() {
        let draft = ListingDraft {
            price: "about 100".to_string(),
            ..complete_draft()
        };
        let err = draft.finalize(&WizardLimits::default()).unwrap_err();
        assert_eq!(err.message, "Please enter a valid numeric price");
    }

    #[test]
    fn test_finalize_trims_and_parses() {
        let draft = ListingDraft {
            title: "  CNC lathe ".to_string(),
            price: " 12500.50 ".to_string(),
            ..complete_draft()
        };
        let input = draft.finalize(&WizardLimits::default()).unwrap();
        assert_eq!(input.title, "CNC lathe");
        assert_eq!(input.price, 12500.5);
    }

    #[test]
    fn test_finalize_enforces_title_limit() {
        let draft = ListingDraft {
            title: "x".repeat(101),
            ..complete_draft()
        };
        assert!(draft.finalize(&WizardLimits::default()).is_err());
    }

    #[test]
    fn test_finalize_follows_configured_title_limit() {
        let draft = ListingDraft {
            title: "x".repeat(120),
            ..complete_draft()
        };
        let limits = WizardLimits {
            title_max_length: 150,
            ..WizardLimits::default()
        };
        assert_eq!(draft.finalize(&limits).unwrap().title.len(), 120);
    }

    #[test]
    fn test_check_steps_reports_first_gap() {
        let draft = ListingDraft {
            location: String::new(),
            ..complete_draft()
        };
        let err = draft.check_steps().unwrap_err();
        assert!(err.message.starts_with("Please complete step 4 (Location)"));
        assert!(complete_draft().check_steps().is_ok());
    }
}
